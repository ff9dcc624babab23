//! JSON bar file adapter.
//!
//! Expects an array of objects with `timestamp`, `open`, `high`, `low`,
//! `close`, `volume` keys.

use crate::domain::bar::Bar;
use crate::domain::error::RsitraderError;
use std::fs;
use std::path::Path;

pub fn read_file(path: &Path) -> Result<Vec<Bar>, RsitraderError> {
    let content = fs::read_to_string(path).map_err(|e| RsitraderError::Data {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;

    let mut bars: Vec<Bar> =
        serde_json::from_str(&content).map_err(|e| RsitraderError::Data {
            reason: format!("JSON parse error in {}: {}", path.display(), e),
        })?;

    for bar in &bars {
        bar.validate()?;
    }

    bars.sort_by_key(|b| b.timestamp);
    Ok(bars)
}
