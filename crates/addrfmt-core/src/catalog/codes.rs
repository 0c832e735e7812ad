// crates/addrfmt-core/src/catalog/codes.rs

//! Per-country code tables: state codes, county codes and the country-code
//! table itself.

use crate::traits::NameMatch;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The name side of a code table entry.
///
/// ```yaml
/// US:
///     CA: California          # Name
/// CA:
///     QC:                     # Variants
///         default: Quebec
///         fr: Québec
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CodeName {
    Name(String),
    Variants(BTreeMap<String, String>),
}

impl NameMatch for CodeName {
    fn names(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            CodeName::Name(n) => Box::new(std::iter::once(n.as_str())),
            CodeName::Variants(v) => Box::new(v.values().map(String::as_str)),
        }
    }
}

/// Country code → (short code → name).
pub type CodeTableRaw = BTreeMap<String, BTreeMap<String, CodeName>>;

/// Read-only lookup over a state- or county-code table.
#[derive(Debug, Clone, Default)]
pub struct CodeTable {
    by_country: CodeTableRaw,
}

impl CodeTable {
    pub fn new(raw: CodeTableRaw) -> Self {
        Self { by_country: raw }
    }

    /// Finds the short code for `name` within `country_code`.
    ///
    /// Case-insensitive over every variant; when nothing matches exactly, a
    /// second pass compares accent-folded names.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use addrfmt_core::catalog::{CodeName, CodeTable};
    /// use std::collections::BTreeMap;
    ///
    /// let mut us = BTreeMap::new();
    /// us.insert("CA".to_string(), CodeName::Name("California".into()));
    /// let mut raw = BTreeMap::new();
    /// raw.insert("US".to_string(), us);
    ///
    /// let table = CodeTable::new(raw);
    /// assert_eq!(table.code_for("US", "california"), Some("CA"));
    /// assert_eq!(table.code_for("DE", "California"), None);
    /// ```
    pub fn code_for(&self, country_code: &str, name: &str) -> Option<&str> {
        let entries = self.by_country.get(country_code)?;
        entries
            .iter()
            .find(|(_, n)| n.is_named(name))
            .or_else(|| entries.iter().find(|(_, n)| n.is_named_folded(name)))
            .map(|(code, _)| code.as_str())
    }

    pub fn countries(&self) -> usize {
        self.by_country.len()
    }

    pub fn entries(&self) -> usize {
        self.by_country.values().map(BTreeMap::len).sum()
    }
}

/// Country code → country name, plus the code alias table (`UK → GB`).
#[derive(Debug, Clone)]
pub struct CountryCodes {
    names: BTreeMap<String, String>,
    aliases: BTreeMap<String, String>,
}

impl Default for CountryCodes {
    fn default() -> Self {
        Self::new(BTreeMap::new(), default_country_code_aliases())
    }
}

/// The alias table used when a catalog does not supply one.
pub fn default_country_code_aliases() -> BTreeMap<String, String> {
    BTreeMap::from([("UK".to_string(), "GB".to_string())])
}

impl CountryCodes {
    pub fn new(names: BTreeMap<String, String>, aliases: BTreeMap<String, String>) -> Self {
        Self { names, aliases }
    }

    /// Applies the alias table; codes without an alias are returned as is.
    pub fn resolve_alias<'a>(&'a self, code: &'a str) -> &'a str {
        self.aliases.get(code).map(String::as_str).unwrap_or(code)
    }

    pub fn name_of(&self, code: &str) -> Option<&str> {
        let code = code.trim().to_uppercase();
        self.names
            .get(self.resolve_alias(&code))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
