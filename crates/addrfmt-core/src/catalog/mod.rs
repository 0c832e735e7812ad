// crates/addrfmt-core/src/catalog/mod.rs

//! # Catalog
//!
//! The immutable configuration object every pipeline call receives:
//! component aliases, per-country templates, code tables, abbreviations and
//! the pipeline [`Options`].
//!
//! A catalog is assembled from raw (serde) parts with [`CatalogBuilder`] or
//! read from disk by the loader. Every regex is compiled once during
//! `build()`; afterwards the catalog is read-only and can be shared across
//! threads.

pub mod abbreviations;
pub mod codes;
pub mod components;
pub mod templates;

pub use abbreviations::{AbbreviationTableRaw, Abbreviations};
pub use codes::{default_country_code_aliases, CodeName, CodeTable, CodeTableRaw, CountryCodes};
pub use components::{AliasTable, ComponentAlias, ComponentDef};
pub use templates::{
    CountryOverride, PostformatReplacement, Replacement, TemplateCatalog, TemplateEntry,
    TemplateEntryRaw, TemplateRules, TemplateRulesRaw, DEFAULT_TEMPLATE,
};

use crate::address::Component;
use crate::common::CatalogStats;
use crate::error::Result;
use crate::formatter::{OutputFormat, TemplateRenderer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// -----------------------------------------------------------------------------
// OPTIONS
// -----------------------------------------------------------------------------

/// What to do with raw keys that are neither a component nor an alias.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownComponents {
    /// Silently discard them.
    #[default]
    Drop,
    /// Sort, de-duplicate and join them into `attention` (unless an explicit
    /// `attention` was given).
    Attention,
    /// Fail with a mapping error.
    Reject,
}

/// Pipeline behavior switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub unknown_components: UnknownComponents,
    pub abbreviate: bool,
    pub output_format: OutputFormat,
    /// The fallback template is used when *all* of these are missing.
    pub required_components: Vec<Component>,
    /// Components an `add_component` rule may set.
    pub injectable_components: Vec<Component>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            unknown_components: UnknownComponents::Drop,
            abbreviate: false,
            output_format: OutputFormat::Array,
            required_components: vec![Component::Road, Component::Postcode],
            injectable_components: vec![Component::State],
        }
    }
}

// -----------------------------------------------------------------------------
// RAW BUNDLE
// -----------------------------------------------------------------------------

/// Every catalog file, already parsed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogRaw {
    pub components: Vec<ComponentDef>,
    pub templates: BTreeMap<String, TemplateEntryRaw>,
    pub state_codes: CodeTableRaw,
    pub county_codes: CodeTableRaw,
    pub country_codes: BTreeMap<String, String>,
    pub country_code_aliases: Option<BTreeMap<String, String>>,
    /// Country code → comma-separated language codes.
    pub country_languages: BTreeMap<String, String>,
    /// Language → abbreviation table.
    pub abbreviations: BTreeMap<String, AbbreviationTableRaw>,
}

// -----------------------------------------------------------------------------
// CATALOG
// -----------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Catalog {
    aliases: AliasTable,
    templates: TemplateCatalog,
    state_codes: CodeTable,
    county_codes: CodeTable,
    country_codes: CountryCodes,
    abbreviations: Abbreviations,
    renderer: TemplateRenderer,
    options: Options,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Builds a catalog from an already parsed bundle.
    pub fn from_raw(raw: CatalogRaw, options: Options) -> Result<Self> {
        CatalogBuilder::from_raw(raw).options(options).build()
    }

    /// The same catalog with different options.
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn templates(&self) -> &TemplateCatalog {
        &self.templates
    }

    pub fn state_codes(&self) -> &CodeTable {
        &self.state_codes
    }

    pub fn county_codes(&self) -> &CodeTable {
        &self.county_codes
    }

    pub fn country_codes(&self) -> &CountryCodes {
        &self.country_codes
    }

    pub fn abbreviations(&self) -> &Abbreviations {
        &self.abbreviations
    }

    pub(crate) fn renderer(&self) -> &TemplateRenderer {
        &self.renderer
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            templates: self.templates.len(),
            aliases: self.aliases.len(),
            state_code_countries: self.state_codes.countries(),
            state_codes: self.state_codes.entries(),
            county_code_countries: self.county_codes.countries(),
            county_codes: self.county_codes.entries(),
            country_codes: self.country_codes.len(),
            abbreviation_languages: self.abbreviations.language_count(),
        }
    }
}

// -----------------------------------------------------------------------------
// BUILDER
// -----------------------------------------------------------------------------

/// Step-by-step catalog assembly.
///
/// ```rust
/// use addrfmt_core::catalog::{Catalog, ComponentDef, TemplateEntryRaw, TemplateRulesRaw};
/// use std::collections::BTreeMap;
///
/// let default = TemplateEntryRaw::Rules(TemplateRulesRaw {
///     address_template: Some("{{{road}}} {{{house_number}}}\n{{{city}}}".into()),
///     fallback_template: Some("{{{city}}}".into()),
///     ..Default::default()
/// });
///
/// let catalog = Catalog::builder()
///     .components(vec![ComponentDef {
///         name: "road".into(),
///         aliases: vec!["street".into()],
///     }])
///     .templates(BTreeMap::from([("default".to_string(), default)]))
///     .build()
///     .unwrap();
///
/// assert_eq!(catalog.stats().templates, 1);
/// assert_eq!(catalog.stats().aliases, 1);
/// ```
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    raw: CatalogRaw,
    options: Options,
}

impl CatalogBuilder {
    pub fn from_raw(raw: CatalogRaw) -> Self {
        Self {
            raw,
            options: Options::default(),
        }
    }

    pub fn components(mut self, defs: Vec<ComponentDef>) -> Self {
        self.raw.components = defs;
        self
    }

    pub fn templates(mut self, templates: BTreeMap<String, TemplateEntryRaw>) -> Self {
        self.raw.templates = templates;
        self
    }

    pub fn state_codes(mut self, codes: CodeTableRaw) -> Self {
        self.raw.state_codes = codes;
        self
    }

    pub fn county_codes(mut self, codes: CodeTableRaw) -> Self {
        self.raw.county_codes = codes;
        self
    }

    pub fn country_codes(mut self, codes: BTreeMap<String, String>) -> Self {
        self.raw.country_codes = codes;
        self
    }

    pub fn country_code_aliases(mut self, aliases: BTreeMap<String, String>) -> Self {
        self.raw.country_code_aliases = Some(aliases);
        self
    }

    pub fn country_languages(mut self, languages: BTreeMap<String, String>) -> Self {
        self.raw.country_languages = languages;
        self
    }

    pub fn abbreviations(mut self, tables: BTreeMap<String, AbbreviationTableRaw>) -> Self {
        self.raw.abbreviations = tables;
        self
    }

    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Compiles the catalog. Fails only when the template catalog has no
    /// `default` entry; broken rules are logged and dropped.
    pub fn build(self) -> Result<Catalog> {
        let CatalogRaw {
            components,
            templates,
            state_codes,
            county_codes,
            country_codes,
            country_code_aliases,
            country_languages,
            abbreviations,
        } = self.raw;

        let country_code_aliases = country_code_aliases
            .unwrap_or_else(default_country_code_aliases)
            .into_iter()
            .map(|(k, v)| (k.to_uppercase(), v.to_uppercase()))
            .collect();

        Ok(Catalog {
            aliases: AliasTable::from_defs(&components),
            templates: TemplateCatalog::compile(templates)?,
            state_codes: CodeTable::new(state_codes),
            county_codes: CodeTable::new(county_codes),
            country_codes: CountryCodes::new(country_codes, country_code_aliases),
            abbreviations: Abbreviations::compile(abbreviations, &country_languages),
            renderer: TemplateRenderer::new(),
            options: self.options,
        })
    }
}
