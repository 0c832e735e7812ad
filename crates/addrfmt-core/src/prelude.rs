//! addrfmt prelude: bring common types and functions into scope for demos.

#![allow(unused_imports)]

pub use crate::address::{Address, Component, ComponentMap};
pub use crate::catalog::{Catalog, CatalogBuilder, Options, UnknownComponents};
pub use crate::error::{AddrFmtError, Result};
pub use crate::fixer::fix;
pub use crate::formatter::{format, format_as, render, Formatted, OutputFormat};
pub use crate::text::{equals_folded, fold_key};
pub use crate::traits::NameMatch;
pub use crate::fix_and_format;
