//! Error types for Orrery

use thiserror::Error;

/// The main error type for Orrery operations
#[derive(Debug, Error)]
pub enum OrreryError {
    /// Invalid or missing drawing target, size source, scheduler or scene entry.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A particle variant did not provide `update` or `draw`.
    #[error("Unimplemented operation: {0}")]
    UnimplementedOperation(String),

    /// Non-fatal: the offending item is skipped by batch operations.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Color parse error: {0}")]
    ColorParse(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Image error: {0}")]
    ImageError(String),
}

/// Result type alias for Orrery operations
pub type Result<T> = std::result::Result<T, OrreryError>;

impl From<toml::de::Error> for OrreryError {
    fn from(err: toml::de::Error) -> Self {
        OrreryError::TomlParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_errors_convert() {
        let err: OrreryError = toml::from_str::<toml::Table>("a = ").unwrap_err().into();
        assert!(matches!(err, OrreryError::TomlParseError(_)));
    }
}
