//! File-based data adapter with extension dispatch.
//!
//! Resolves `<code>.json` or `<code>.csv` under a base directory and
//! routes each to the matching format adapter.

use crate::adapters::{csv_adapter, json_adapter};
use crate::domain::bar::Bar;
use crate::domain::error::RsitraderError;
use crate::ports::data_port::DataPort;
use std::fs;
use std::path::{Path, PathBuf};

const SUPPORTED_EXTENSIONS: [&str; 2] = ["json", "csv"];

pub struct FileDataAdapter {
    base_path: PathBuf,
}

impl FileDataAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }
}

/// Load a bar file, dispatching on its extension.
pub fn read_path(path: &Path) -> Result<Vec<Bar>, RsitraderError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => json_adapter::read_file(path),
        Some("csv") => csv_adapter::read_file(path),
        _ => Err(RsitraderError::UnsupportedExtension {
            path: path.display().to_string(),
        }),
    }
}

impl DataPort for FileDataAdapter {
    fn fetch_bars(&self, code: &str) -> Result<Vec<Bar>, RsitraderError> {
        for ext in SUPPORTED_EXTENSIONS {
            let path = self.base_path.join(format!("{}.{}", code, ext));
            if path.is_file() {
                return read_path(&path);
            }
        }
        Err(RsitraderError::NoData {
            code: code.to_string(),
        })
    }

    fn list_codes(&self) -> Result<Vec<String>, RsitraderError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| RsitraderError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut codes = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| RsitraderError::Data {
                reason: format!("directory entry error: {}", e),
            })?;
            let path = entry.path();

            let supported = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext));
            if !supported {
                continue;
            }

            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                codes.push(stem.to_string());
            }
        }

        codes.sort();
        codes.dedup();
        Ok(codes)
    }
}
