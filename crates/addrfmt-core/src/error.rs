// crates/addrfmt-core/src/error.rs

use thiserror::Error;

/// Errors surfaced by the fixing/formatting pipeline and the catalog loader.
///
/// Data anomalies in the input (unknown components, broken postcodes, missing
/// fields) are *not* errors; they are handled by fallback policy. Everything
/// here points at a defect in the supplied catalog, a caller mistake or I/O.
#[derive(Debug, Error)]
pub enum AddrFmtError {
    /// Malformed template or rule in the supplied catalog.
    #[error("configuration error: {0}")]
    Config(String),

    /// A raw component could not be mapped and the policy is `Reject`.
    #[error("mapping error: {0}")]
    Mapping(String),

    #[error("invalid output format: {0:?} (expected array, oneline or postal)")]
    InvalidOutputFormat(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "yaml")]
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Short alias used throughout the crate.
pub type Error = AddrFmtError;

pub type Result<T> = std::result::Result<T, AddrFmtError>;
