// crates/addrfmt-core/src/common.rs
use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for a catalog.
///
/// Returned by [`Catalog::stats`](crate::Catalog::stats), these counts reflect
/// the compiled in-memory catalog (rules whose regex failed to compile are
/// already gone).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    pub templates: usize,
    pub aliases: usize,
    pub state_code_countries: usize,
    pub state_codes: usize,
    pub county_code_countries: usize,
    pub county_codes: usize,
    pub country_codes: usize,
    pub abbreviation_languages: usize,
}
