// crates/addrfmt-core/src/lib.rs

//! # addrfmt-core
//!
//! Template-driven postal address fixing and formatting.
//!
//! Raw geocoder output (a loose key → value map) is first *fixed* into a
//! typed [`Address`] by [`fix`], then *formatted* with the country's
//! template by [`format`]:
//!
//! ```rust,no_run
//! use addrfmt_core::{fix_and_format, Catalog, ComponentMap};
//!
//! let catalog = Catalog::load()?;
//! let raw: ComponentMap = [
//!     ("country_code", "de"),
//!     ("road", "Platz der Republik"),
//!     ("house_number", "1"),
//!     ("postcode", "11011"),
//!     ("city", "Berlin"),
//!     ("country", "Deutschland"),
//! ]
//! .into_iter()
//! .map(|(k, v)| (k.to_owned(), v.to_owned()))
//! .collect();
//!
//! println!("{}", fix_and_format(&raw, &catalog)?);
//! # Ok::<(), addrfmt_core::AddrFmtError>(())
//! ```

pub mod address;
pub mod catalog;
pub mod common;
pub mod error;
pub mod fixer;
pub mod formatter;
pub mod loader;
pub mod prelude;
pub mod text;
pub mod traits;

// Re-exports
pub use crate::address::{Address, Component, ComponentMap};
pub use crate::catalog::{Catalog, CatalogBuilder, CatalogRaw, Options, UnknownComponents};
pub use crate::common::CatalogStats;
pub use crate::error::{AddrFmtError, Error, Result};
pub use crate::fixer::fix;
pub use crate::formatter::{format, format_as, render, Formatted, OutputFormat};
pub use crate::loader::ConfigFiles;

/// Fixes a raw component map and formats the result in the catalog's
/// configured output shape.
pub fn fix_and_format(components: &ComponentMap, catalog: &Catalog) -> Result<Formatted> {
    let address = fix(components, catalog)?;
    format(&address, catalog)
}
