// crates/addrfmt-core/src/loader/common_io.rs
use crate::error::{AddrFmtError, Result};
use std::path::Path;

/// Opens a file for buffered reading.
#[cfg(feature = "json")]
pub fn open_stream(path: &Path) -> Result<Box<dyn std::io::Read>> {
    let file = std::fs::File::open(path).map_err(|e| not_found(path, e))?;
    Ok(Box::new(std::io::BufReader::new(file)))
}

/// Reads a required file.
#[cfg(feature = "yaml")]
pub fn read_required(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| not_found(path, e))
}

/// Reads an optional file. A missing file is `None`; other failures are
/// errors.
#[cfg(feature = "yaml")]
pub fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AddrFmtError::Io(e)),
    }
}

fn not_found(path: &Path, e: std::io::Error) -> AddrFmtError {
    AddrFmtError::NotFound(format!("catalog file not found at {}: {}", path.display(), e))
}
