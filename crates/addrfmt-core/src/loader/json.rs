// crates/addrfmt-core/src/loader/json.rs

// ---------------------------------------------------------------------------
// FILE GUARD: this module is only compiled with the 'json' feature.
// ---------------------------------------------------------------------------

use crate::catalog::CatalogRaw;
use crate::error::Result;
use std::io::Read;

/// Parses a whole catalog bundle from one JSON document.
pub fn read_catalog(reader: impl Read) -> Result<CatalogRaw> {
    Ok(serde_json::from_reader(reader)?)
}
