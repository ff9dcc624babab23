//! CSV bar file adapter.
//!
//! Expects a header row `timestamp,open,high,low,close,volume`.

use crate::domain::bar::Bar;
use crate::domain::error::RsitraderError;
use std::fs::File;
use std::path::Path;

pub fn read_file(path: &Path) -> Result<Vec<Bar>, RsitraderError> {
    let file = File::open(path).map_err(|e| RsitraderError::Data {
        reason: format!("failed to open {}: {}", path.display(), e),
    })?;

    let mut rdr = csv::Reader::from_reader(file);
    let mut bars = Vec::new();

    for result in rdr.deserialize() {
        let bar: Bar = result.map_err(|e| RsitraderError::Data {
            reason: format!("CSV parse error in {}: {}", path.display(), e),
        })?;
        bar.validate()?;
        bars.push(bar);
    }

    bars.sort_by_key(|b| b.timestamp);
    Ok(bars)
}
