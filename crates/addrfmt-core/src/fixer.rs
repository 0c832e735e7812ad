// crates/addrfmt-core/src/fixer.rs

//! # Address Fixer
//!
//! Turns a raw component map (e.g. from OSM/Nominatim) into a corrected,
//! typed [`Address`].
//!
//! The stages run in a fixed order and each one consumes the previous
//! stage's map and returns a new one; the caller's map is never touched.
//! The template entry is chosen *before* country-code aliases are applied,
//! so an entry can redirect to another country's rules.

use crate::address::{Address, Component, ComponentMap};
use crate::catalog::{AliasTable, Catalog, CountryCodes, TemplateEntry, UnknownComponents};
use crate::error::{AddrFmtError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

const COUNTRY_CODE: &str = "country_code";
const COUNTRY: &str = "country";
const STATE: &str = "state";
const ATTENTION: &str = "attention";

static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://").expect("static regex"));
static WASHINGTON_DC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^washington,? d\.?c\.?").expect("static regex"));
static POSTCODE_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{5}),[0-9]{5}").expect("static regex"));
static MULTIPLE_POSTCODES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+;[0-9]+").expect("static regex"));

const MAX_POSTCODE_LEN: usize = 20;

/// A territory that OSM tags as a state of another country.
struct TerritoryException {
    country_code: &'static str,
    state: Regex,
    new_country_code: &'static str,
    new_country: &'static str,
}

/// `(country_code, state pattern) → (country_code, country)`. First match wins.
static TERRITORY_EXCEPTIONS: Lazy<Vec<TerritoryException>> = Lazy::new(|| {
    [
        ("NL", r"^Curaçao$", "CW", "Curaçao"),
        ("NL", r"(?i)sint maarten", "SX", "Sint Maarten"),
        ("NL", r"(?i)aruba", "AW", "Aruba"),
    ]
    .into_iter()
    .map(|(cc, state, new_cc, new_country)| TerritoryException {
        country_code: cc,
        state: Regex::new(state).expect("static regex"),
        new_country_code: new_cc,
        new_country,
    })
    .collect()
});

/// Fixes a raw component map into an [`Address`].
///
/// # Examples
///
/// ```rust,no_run
/// use addrfmt_core::{fix, Catalog, ComponentMap};
///
/// let catalog = Catalog::load().unwrap();
/// let mut raw = ComponentMap::new();
/// raw.insert("country_code".into(), "uk".into());
/// raw.insert("street".into(), "Downing Street".into());
///
/// let address = fix(&raw, &catalog).unwrap();
/// assert_eq!(address.country_code.as_deref(), Some("GB"));
/// assert_eq!(address.road.as_deref(), Some("Downing Street"));
/// ```
pub fn fix(components: &ComponentMap, catalog: &Catalog) -> Result<Address> {
    let raw_code = components.get(COUNTRY_CODE).map(String::as_str).unwrap_or("");
    let components = with_value(components.clone(), COUNTRY_CODE, normalize_country_code(raw_code));

    let code = value_of(&components, COUNTRY_CODE).to_owned();
    let entry = catalog.templates().select(&code);
    debug!(country_code = %code, "template selected");

    let components = override_country_code(components, entry, catalog.country_codes());
    let components = override_country(components, entry);
    let components = inject_component(components, entry, &catalog.options().injectable_components);
    let components = apply_territory_exceptions(components);
    let components = apply_replacements(components, entry);
    let components = strip_urls(components);

    let address = map_to_address(
        components,
        catalog.aliases(),
        catalog.options().unknown_components,
    )?;
    Ok(cleanup_address(address, catalog))
}

// -----------------------------------------------------------------------------
// STAGES
// -----------------------------------------------------------------------------

/// Uppercases a two-character code and maps `UK` to `GB`; anything else
/// becomes empty.
///
/// ```rust
/// use addrfmt_core::fixer::normalize_country_code;
///
/// assert_eq!(normalize_country_code("de"), "DE");
/// assert_eq!(normalize_country_code("uk"), "GB");
/// assert_eq!(normalize_country_code("DEU"), "");
/// ```
pub fn normalize_country_code(code: &str) -> String {
    if code.chars().count() != 2 {
        return String::new();
    }
    match code.to_uppercase().as_str() {
        "UK" => "GB".to_owned(),
        other => other.to_owned(),
    }
}

fn override_country_code(
    components: ComponentMap,
    entry: &TemplateEntry,
    country_codes: &CountryCodes,
) -> ComponentMap {
    let code = value_of(&components, COUNTRY_CODE);
    if code.chars().count() != 2 {
        return with_value(components, COUNTRY_CODE, String::new());
    }
    let code = match entry.rules().and_then(|r| r.use_country.as_deref()) {
        Some(forced) => forced.to_uppercase(),
        None => code.to_owned(),
    };
    let code = country_codes.resolve_alias(&code).to_owned();
    with_value(components, COUNTRY_CODE, code)
}

fn override_country(components: ComponentMap, entry: &TemplateEntry) -> ComponentMap {
    match entry.rules().and_then(|r| r.change_country.as_ref()) {
        Some(rule) => {
            let country = rule.apply(&components);
            debug!(%country, "country overridden by template");
            with_value(components, COUNTRY, country)
        }
        None => components,
    }
}

fn inject_component(
    components: ComponentMap,
    entry: &TemplateEntry,
    allowed: &[Component],
) -> ComponentMap {
    let Some((key, value)) = entry.rules().and_then(|r| r.add_component.as_ref()) else {
        return components;
    };
    let permitted = Component::from_key(key).is_some_and(|c| allowed.contains(&c));
    if !permitted {
        debug!(%key, "add_component for a component outside the allow-list ignored");
        return components;
    }
    let mut out = components;
    out.insert(key.clone(), value.clone());
    out
}

fn apply_territory_exceptions(components: ComponentMap) -> ComponentMap {
    let code = value_of(&components, COUNTRY_CODE);
    let state = value_of(&components, STATE);
    let hit = TERRITORY_EXCEPTIONS
        .iter()
        .find(|t| t.country_code == code && t.state.is_match(state));
    match hit {
        Some(t) => {
            let mut out = components;
            out.insert(COUNTRY_CODE.to_owned(), t.new_country_code.to_owned());
            out.insert(COUNTRY.to_owned(), t.new_country.to_owned());
            out
        }
        None => components,
    }
}

fn apply_replacements(components: ComponentMap, entry: &TemplateEntry) -> ComponentMap {
    match entry.rules() {
        Some(rules) => rules
            .replacements
            .iter()
            .fold(components, |acc, rule| rule.apply(acc)),
        None => components,
    }
}

fn strip_urls(components: ComponentMap) -> ComponentMap {
    components
        .into_iter()
        .filter(|(_, v)| !URL.is_match(v))
        .collect()
}

/// Resolves aliases and moves canonical keys into an [`Address`].
///
/// Keys that are neither components nor aliases follow `policy`.
pub fn map_to_address(
    components: ComponentMap,
    aliases: &AliasTable,
    policy: UnknownComponents,
) -> Result<Address> {
    let resolved = aliases.resolve(components);
    let mut address = Address::default();
    let mut unknown: Vec<&str> = Vec::new();

    for (key, value) in &resolved {
        if let Some(component) = Component::from_key(key) {
            address.set(component, value.as_str());
            continue;
        }
        if aliases.is_alias(key) {
            continue;
        }
        match policy {
            UnknownComponents::Drop => debug!(%key, "unknown component dropped"),
            UnknownComponents::Attention => {
                if !value.trim().is_empty() {
                    unknown.push(value);
                }
            }
            UnknownComponents::Reject => {
                return Err(AddrFmtError::Mapping(format!(
                    "`{key}` is neither an address component nor an alias"
                )));
            }
        }
    }

    if policy == UnknownComponents::Attention && !resolved.contains_key(ATTENTION) {
        unknown.sort_unstable();
        unknown.dedup();
        address.set(Component::Attention, unknown.join(", "));
    }

    Ok(address)
}

/// Post-mapping repairs: swapped country/state, derived codes, postcode
/// sanity.
fn cleanup_address(address: Address, catalog: &Catalog) -> Address {
    let mut a = address;

    let numeric_country = a
        .country
        .as_deref()
        .is_some_and(|c| c.parse::<i64>().is_ok());
    if numeric_country && a.state.is_some() {
        debug!("numeric country replaced by state");
        a.country = a.take(Component::State);
    }

    if a.state_code.is_none() {
        if let Some(state) = a.state.clone() {
            if let Some(cc) = a.country_code.as_deref() {
                a.state_code = catalog.state_codes().code_for(cc, &state).map(str::to_owned);
            }
            if WASHINGTON_DC.is_match(&state) {
                a.set(Component::StateCode, "DC");
                a.set(Component::State, "District of Columbia");
                a.set(Component::City, "Washington");
            }
        }
    }

    if a.county_code.is_none() {
        if let (Some(county), Some(cc)) = (a.county.as_deref(), a.country_code.as_deref()) {
            a.county_code = catalog.county_codes().code_for(cc, county).map(str::to_owned);
        }
    }

    if let Some(postcode) = a.take(Component::Postcode) {
        a.postcode = sanitize_postcode(postcode);
    }

    a
}

/// Drops implausible postcodes and collapses `NNNNN,NNNNN` ranges.
///
/// ```rust
/// use addrfmt_core::fixer::sanitize_postcode;
///
/// assert_eq!(sanitize_postcode("12345,12346".into()).as_deref(), Some("12345"));
/// assert_eq!(sanitize_postcode("12345;12346".into()), None);
/// assert_eq!(sanitize_postcode("SW1A 2AA".into()).as_deref(), Some("SW1A 2AA"));
/// ```
pub fn sanitize_postcode(postcode: String) -> Option<String> {
    if postcode.chars().count() > MAX_POSTCODE_LEN || MULTIPLE_POSTCODES.is_match(&postcode) {
        debug!(%postcode, "postcode dropped");
        return None;
    }
    if let Some(caps) = POSTCODE_RANGE.captures(&postcode) {
        return Some(caps[1].to_owned());
    }
    Some(postcode)
}

// -----------------------------------------------------------------------------
// MAP HELPERS
// -----------------------------------------------------------------------------

fn value_of<'a>(components: &'a ComponentMap, key: &str) -> &'a str {
    components.get(key).map(String::as_str).unwrap_or("")
}

/// Sets `key`, or removes it for an empty value.
fn with_value(components: ComponentMap, key: &str, value: String) -> ComponentMap {
    let mut out = components;
    if value.is_empty() {
        out.remove(key);
    } else {
        out.insert(key.to_owned(), value);
    }
    out
}
