//! Domain error types.

/// Top-level error type for rsitrader.
#[derive(Debug, thiserror::Error)]
pub enum RsitraderError {
    #[error(
        "invalid time frame: want_tf {want_tf} must be greater than and a multiple of current_tf {current_tf}"
    )]
    InvalidTimeFrame { current_tf: u32, want_tf: u32 },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("unsupported file extension: {path}")]
    UnsupportedExtension { path: String },

    #[error("no data file for {code}")]
    NoData { code: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RsitraderError {
    /// Process exit status for this error category.
    pub fn exit_status(&self) -> u8 {
        match self {
            RsitraderError::Io(_) => 1,
            RsitraderError::ConfigParse { .. }
            | RsitraderError::ConfigMissing { .. }
            | RsitraderError::ConfigInvalid { .. } => 2,
            RsitraderError::Data { .. } | RsitraderError::UnsupportedExtension { .. } => 3,
            RsitraderError::InvalidTimeFrame { .. } => 4,
            RsitraderError::NoData { .. } => 5,
        }
    }
}

impl From<&RsitraderError> for std::process::ExitCode {
    fn from(err: &RsitraderError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
