//! Data access port trait.

use crate::domain::bar::Bar;
use crate::domain::error::RsitraderError;

pub trait DataPort {
    /// Fetch the bar series for a code, sorted by ascending timestamp.
    fn fetch_bars(&self, code: &str) -> Result<Vec<Bar>, RsitraderError>;

    /// Codes with a loadable data file.
    fn list_codes(&self) -> Result<Vec<String>, RsitraderError>;
}
