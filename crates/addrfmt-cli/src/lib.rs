//! addrfmt-cli
//! ===========
//!
//! Command-line interface for the `addrfmt-core` address fixer and
//! formatter.
//!
//! This crate primarily provides a binary (`addrfmt`). The library target
//! only exists so that docs.rs renders this overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cargo install addrfmt-cli
//! addrfmt --help
//! addrfmt stats
//! addrfmt format '{"country_code":"us","house_number":"1600","road":"Pennsylvania Avenue NW"}'
//! addrfmt --format oneline --abbreviate format -  < components.json
//! addrfmt --config ./my-catalog fix '{"street":"Main St"}'
//! ```
//!
//! For programmatic access use the [`addrfmt-core`] crate directly.
//!
//! Links
//! -----
//! - Repository: <https://github.com/holg/addrfmt-rs>
//! - Core crate: <https://docs.rs/addrfmt-core>
//!
#![cfg_attr(docsrs, feature(doc_cfg))]
