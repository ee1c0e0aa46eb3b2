//! Error types used by the crate.

use thiserror::Error;

/// Fieldplan error type.
///
/// The interaction controllers never fail; errors only come from loading and validating the
/// configuration.
#[derive(Debug, Error)]
pub enum FieldplanError {
    /// Configuration text is not valid JSON or does not match the expected shape.
    #[error("failed to parse configuration")]
    ConfigParse(#[from] serde_json::Error),
    /// Error reading configuration from the FS.
    #[error("failed to read configuration file")]
    FsIo(#[from] std::io::Error),
    /// Configuration was parsed but holds values that cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Tile url template cannot be rendered.
    #[error("invalid tile url template '{template}': {reason}")]
    TileTemplate {
        /// Template as given in the configuration.
        template: String,
        /// Reason reported by the formatter.
        reason: String,
    },
    /// String does not name an interaction mode.
    #[error("unknown interaction mode '{0}'")]
    UnknownMode(String),
}
