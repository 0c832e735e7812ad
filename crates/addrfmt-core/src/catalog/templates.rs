// crates/addrfmt-core/src/catalog/templates.rs

//! # Template Catalog
//!
//! Per-country template entries as found in `countries/worldwide.yaml`.
//! Raw entries are deserialized with serde and compiled once into
//! [`TemplateEntry`] values holding ready-to-use regexes.

use crate::address::ComponentMap;
use crate::error::{AddrFmtError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Key of the entry every lookup falls back to.
pub const DEFAULT_TEMPLATE: &str = "default";

// -----------------------------------------------------------------------------
// RAW (serde)
// -----------------------------------------------------------------------------

/// A template entry exactly as written in the catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateEntryRaw {
    Plain(String),
    Rules(TemplateRulesRaw),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRulesRaw {
    #[serde(default)]
    pub address_template: Option<String>,
    #[serde(default)]
    pub fallback_template: Option<String>,
    /// Forced country code, e.g. `GB` for Guernsey.
    #[serde(default)]
    pub use_country: Option<String>,
    /// New country name; may contain one `$component` placeholder.
    #[serde(default)]
    pub change_country: Option<String>,
    /// `key=value`
    #[serde(default)]
    pub add_component: Option<String>,
    #[serde(default)]
    pub replace: Vec<(String, String)>,
    #[serde(default)]
    pub postformat_replace: Vec<(String, String)>,
}

// -----------------------------------------------------------------------------
// COMPILED
// -----------------------------------------------------------------------------

/// A compiled template entry.
#[derive(Debug, Clone)]
pub enum TemplateEntry {
    /// A bare template string.
    Plain(String),
    /// A structured entry with optional rules.
    Rules(TemplateRules),
}

#[derive(Debug, Clone, Default)]
pub struct TemplateRules {
    pub address_template: Option<String>,
    pub fallback_template: Option<String>,
    pub use_country: Option<String>,
    pub change_country: Option<CountryOverride>,
    pub add_component: Option<(String, String)>,
    pub replacements: Vec<Replacement>,
    pub postformat_replacements: Vec<PostformatReplacement>,
}

/// A pre-render replacement rule.
#[derive(Debug, Clone)]
pub enum Replacement {
    /// `component=literal`: exact match on one component's value.
    Exact {
        component: String,
        literal: String,
        value: String,
    },
    /// A regex applied to every component's value.
    Pattern { regex: Regex, value: String },
}

#[derive(Debug, Clone)]
pub struct PostformatReplacement {
    pub regex: Regex,
    pub replacement: String,
}

/// The `change_country` rule, split into its text and placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryOverride {
    pub text: String,
    pub placeholder: Option<String>,
}

static EXACT_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^([a-z_]+)=(.*)$").expect("static regex"));
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$(\w+)").expect("static regex"));

impl Replacement {
    /// Applies the rule to every component of the map.
    pub fn apply(&self, components: ComponentMap) -> ComponentMap {
        match self {
            Replacement::Exact {
                component,
                literal,
                value,
            } => {
                let mut out = components;
                if out.get(component) == Some(literal) {
                    out.insert(component.clone(), value.clone());
                }
                out
            }
            Replacement::Pattern { regex, value } => components
                .into_iter()
                .map(|(k, v)| {
                    let replaced = regex.replace_all(&v, value.as_str()).into_owned();
                    (k, replaced)
                })
                .collect(),
        }
    }
}

impl CountryOverride {
    pub fn parse(text: &str) -> Self {
        let placeholder = PLACEHOLDER
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_owned());
        Self {
            text: text.to_owned(),
            placeholder,
        }
    }

    /// The new country value, with the placeholder substituted by the
    /// component's current value (or nothing when it is absent).
    ///
    /// ```rust
    /// use addrfmt_core::catalog::CountryOverride;
    /// use addrfmt_core::ComponentMap;
    ///
    /// let rule = CountryOverride::parse("$state, Channel Islands");
    /// let mut map = ComponentMap::new();
    /// map.insert("state".into(), "Guernsey".into());
    /// assert_eq!(rule.apply(&map), "Guernsey, Channel Islands");
    /// assert_eq!(rule.apply(&ComponentMap::new()), ", Channel Islands");
    /// ```
    pub fn apply(&self, components: &ComponentMap) -> String {
        match &self.placeholder {
            Some(name) => {
                let value = components.get(name).map(String::as_str).unwrap_or("");
                self.text.replace(&format!("${name}"), value)
            }
            None => self.text.clone(),
        }
    }
}

impl TemplateEntry {
    /// Compiles a raw entry. Regexes that do not compile are logged and
    /// their rule is skipped.
    pub fn compile(name: &str, raw: TemplateEntryRaw) -> Self {
        match raw {
            TemplateEntryRaw::Plain(text) => TemplateEntry::Plain(text),
            TemplateEntryRaw::Rules(r) => TemplateEntry::Rules(TemplateRules {
                address_template: r.address_template,
                fallback_template: r.fallback_template,
                use_country: r.use_country,
                change_country: r.change_country.as_deref().map(CountryOverride::parse),
                add_component: r
                    .add_component
                    .as_deref()
                    .and_then(|rule| parse_add_component(name, rule)),
                replacements: r
                    .replace
                    .iter()
                    .filter_map(|(pattern, value)| compile_replacement(name, pattern, value))
                    .collect(),
                postformat_replacements: r
                    .postformat_replace
                    .iter()
                    .filter_map(|(pattern, replacement)| {
                        compile_regex(name, pattern).map(|regex| PostformatReplacement {
                            regex,
                            replacement: replacement.clone(),
                        })
                    })
                    .collect(),
            }),
        }
    }

    pub fn rules(&self) -> Option<&TemplateRules> {
        match self {
            TemplateEntry::Plain(_) => None,
            TemplateEntry::Rules(r) => Some(r),
        }
    }
}

fn parse_add_component(template: &str, rule: &str) -> Option<(String, String)> {
    match rule.split_once('=') {
        Some((k, v)) => Some((k.trim().to_owned(), v.to_owned())),
        None => {
            warn!(template, rule, "add_component rule is not of the form key=value, skipped");
            None
        }
    }
}

fn compile_replacement(template: &str, pattern: &str, value: &str) -> Option<Replacement> {
    if let Some(caps) = EXACT_RULE.captures(pattern) {
        return Some(Replacement::Exact {
            component: caps[1].to_owned(),
            literal: caps[2].to_owned(),
            value: value.to_owned(),
        });
    }
    compile_regex(template, pattern).map(|regex| Replacement::Pattern {
        regex,
        value: value.to_owned(),
    })
}

fn compile_regex(template: &str, pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(r) => Some(r),
        Err(e) => {
            warn!(template, pattern, error = %e, "could not compile replacement regex, rule skipped");
            None
        }
    }
}

// -----------------------------------------------------------------------------
// CATALOG
// -----------------------------------------------------------------------------

/// Country code → compiled template entry. Always contains `default`.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    entries: BTreeMap<String, TemplateEntry>,
}

impl TemplateCatalog {
    pub fn compile(raw: BTreeMap<String, TemplateEntryRaw>) -> Result<Self> {
        if !raw.contains_key(DEFAULT_TEMPLATE) {
            return Err(AddrFmtError::Config(format!(
                "template catalog has no `{DEFAULT_TEMPLATE}` entry"
            )));
        }
        let entries = raw
            .into_iter()
            .map(|(name, entry)| {
                let compiled = TemplateEntry::compile(&name, entry);
                (name, compiled)
            })
            .collect();
        Ok(Self { entries })
    }

    /// The entry for a country code, or `default`.
    pub fn select(&self, country_code: &str) -> &TemplateEntry {
        self.entries
            .get(country_code)
            .unwrap_or_else(|| self.default_entry())
    }

    pub fn default_entry(&self) -> &TemplateEntry {
        // `compile` refuses catalogs without a default entry.
        &self.entries[DEFAULT_TEMPLATE]
    }

    /// The template text to render for `entry`.
    ///
    /// A plain entry is its own text. A rule entry uses its fallback (when
    /// `use_fallback`) or address template, and borrows the `default`
    /// entry's one when it has none.
    pub fn template_text<'a>(
        &'a self,
        entry: &'a TemplateEntry,
        use_fallback: bool,
    ) -> Option<&'a str> {
        let pick = |rules: &'a TemplateRules| {
            if use_fallback {
                rules.fallback_template.as_deref()
            } else {
                rules.address_template.as_deref()
            }
        };
        match entry {
            TemplateEntry::Plain(text) => Some(text.as_str()),
            TemplateEntry::Rules(rules) => {
                pick(rules).or_else(|| self.default_entry().rules().and_then(pick))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn map(pairs: &[(&str, &str)]) -> ComponentMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn rules(raw: TemplateRulesRaw) -> TemplateRules {
        match TemplateEntry::compile("XX", TemplateEntryRaw::Rules(raw)) {
            TemplateEntry::Rules(r) => r,
            TemplateEntry::Plain(_) => unreachable!(),
        }
    }

    #[test]
    fn component_rule_is_exact_match_only() {
        let r = rules(TemplateRulesRaw {
            replace: vec![("county=County Durham".into(), "Durham".into())],
            ..Default::default()
        });
        assert!(matches!(r.replacements[0], Replacement::Exact { .. }));

        let out = r.replacements[0].apply(map(&[("county", "County Durham")]));
        assert_eq!(out["county"], "Durham");
        let out = r.replacements[0].apply(map(&[("county", "County Durham North")]));
        assert_eq!(out["county"], "County Durham North");
    }

    #[test]
    fn regex_rule_applies_to_every_component() {
        let r = rules(TemplateRulesRaw {
            replace: vec![("^Borough of ".into(), "".into())],
            ..Default::default()
        });
        let out = r.replacements[0].apply(map(&[
            ("county", "Borough of Hackney"),
            ("city", "Borough of Foo"),
            ("road", "Main St"),
        ]));
        assert_eq!(out["county"], "Hackney");
        assert_eq!(out["city"], "Foo");
        assert_eq!(out["road"], "Main St");
    }

    #[test]
    fn bad_regex_is_skipped_not_fatal() {
        let r = rules(TemplateRulesRaw {
            replace: vec![("(unclosed".into(), "".into()), ("^X".into(), "Y".into())],
            postformat_replace: vec![("[".into(), "".into())],
            ..Default::default()
        });
        assert_eq!(r.replacements.len(), 1);
        assert!(r.postformat_replacements.is_empty());
    }

    #[test]
    fn add_component_is_split_on_first_equals() {
        let r = rules(TemplateRulesRaw {
            add_component: Some("state=Foo=Bar".into()),
            ..Default::default()
        });
        assert_eq!(r.add_component, Some(("state".into(), "Foo=Bar".into())));
    }

    #[test]
    fn catalog_requires_default_entry() {
        let raw = BTreeMap::from([("DE".to_string(), TemplateEntryRaw::Plain("{{road}}".into()))]);
        assert!(matches!(
            TemplateCatalog::compile(raw),
            Err(AddrFmtError::Config(_))
        ));
    }

    #[test]
    fn template_text_falls_back_to_default_entry() {
        let raw = BTreeMap::from([
            (
                "default".to_string(),
                TemplateEntryRaw::Rules(TemplateRulesRaw {
                    address_template: Some("A".into()),
                    fallback_template: Some("F".into()),
                    ..Default::default()
                }),
            ),
            (
                "DE".to_string(),
                TemplateEntryRaw::Rules(TemplateRulesRaw {
                    address_template: Some("DE-A".into()),
                    ..Default::default()
                }),
            ),
            ("XX".to_string(), TemplateEntryRaw::Plain("P".into())),
        ]);
        let catalog = TemplateCatalog::compile(raw).unwrap();
        let de = catalog.select("DE");
        assert_eq!(catalog.template_text(de, false), Some("DE-A"));
        assert_eq!(catalog.template_text(de, true), Some("F"));
        assert_eq!(catalog.template_text(catalog.select("XX"), true), Some("P"));
        assert_eq!(catalog.template_text(catalog.select("ZZ"), false), Some("A"));
    }
}
