// crates/addrfmt-core/src/formatter/mod.rs

//! # Address Formatter
//!
//! Renders a fixed [`Address`] through its country's template and shapes
//! the result.
//!
//! ```text
//! Address → ComponentMap → (abbreviate) → template → cleanup
//!         → postformat replacements → cleanup → Formatted
//! ```

mod cleanup;
mod output;
mod render;

pub use cleanup::{cleanup_render, dedupe};
pub use output::{Formatted, OutputFormat};
pub use render::{first_alternative, TemplateRenderer};

use crate::address::{Address, ComponentMap};
use crate::catalog::{Catalog, TemplateEntry};
use crate::error::{AddrFmtError, Result};
use tracing::debug;

/// Formats an address in the catalog's configured output shape.
pub fn format(address: &Address, catalog: &Catalog) -> Result<Formatted> {
    format_as(address, catalog, catalog.options().output_format)
}

/// Formats an address in an explicit output shape.
///
/// # Examples
///
/// ```rust,no_run
/// use addrfmt_core::{format_as, Address, Catalog, Component, OutputFormat};
///
/// let catalog = Catalog::load().unwrap();
/// let mut address = Address::default();
/// address.set(Component::Road, "Friedrichstraße");
/// address.set(Component::HouseNumber, "43");
/// address.set(Component::Postcode, "10117");
/// address.set(Component::City, "Berlin");
/// address.set(Component::CountryCode, "DE");
///
/// let line = format_as(&address, &catalog, OutputFormat::OneLine).unwrap();
/// println!("{line}");
/// ```
pub fn format_as(address: &Address, catalog: &Catalog, format: OutputFormat) -> Result<Formatted> {
    let block = render(address, catalog)?;
    Ok(Formatted::project(&block, format))
}

/// Renders the cleaned, post-formatted multi-line block.
pub fn render(address: &Address, catalog: &Catalog) -> Result<String> {
    let country_code = address.country_code.as_deref().unwrap_or("");
    let components = address.to_components();
    let components = if catalog.options().abbreviate {
        catalog.abbreviations().apply(country_code, components)
    } else {
        components
    };

    let entry = catalog.templates().select(country_code);
    let use_fallback = needs_fallback(address, catalog);
    let template = catalog
        .templates()
        .template_text(entry, use_fallback)
        .ok_or_else(|| {
            AddrFmtError::Config(format!(
                "no {} template for `{country_code}` and none in the default entry",
                if use_fallback { "fallback" } else { "address" }
            ))
        })?;
    debug!(country_code, use_fallback, "rendering address");

    let rendered = catalog.renderer().render(template, &components)?;
    let cleaned = cleanup_render(&rendered);
    Ok(postformat(entry, cleaned))
}

/// True when every required component is missing.
fn needs_fallback(address: &Address, catalog: &Catalog) -> bool {
    let required = &catalog.options().required_components;
    !required.is_empty() && required.iter().all(|&c| !address.has(c))
}

fn postformat(entry: &TemplateEntry, cleaned: String) -> String {
    let Some(rules) = entry.rules() else {
        return cleaned;
    };
    if rules.postformat_replacements.is_empty() {
        return cleaned;
    }
    let replaced = rules
        .postformat_replacements
        .iter()
        .fold(cleaned, |text, rule| {
            rule.regex
                .replace_all(&text, rule.replacement.as_str())
                .into_owned()
        });
    cleanup_render(&replaced)
}

/// Renders a raw component map without fixing it first; only canonical
/// keys reach the template.
pub fn render_components(components: &ComponentMap, catalog: &Catalog) -> Result<String> {
    render(&Address::from_components(components), catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AbbreviationTableRaw, Options, TemplateEntryRaw, TemplateRulesRaw};
    use crate::Component;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn catalog(options: Options) -> Catalog {
        let templates = BTreeMap::from([
            (
                "default".to_string(),
                TemplateEntryRaw::Rules(TemplateRulesRaw {
                    address_template: Some(
                        "{{{house_number}}} {{{road}}}\n{{{postcode}}} {{#first}} {{{city}}} || {{{town}}} || {{{village}}} {{/first}}\n{{{country}}}"
                            .into(),
                    ),
                    fallback_template: Some(
                        "{{#first}} {{{city}}} || {{{town}}} {{/first}}, {{{state}}}\n{{{country}}}".into(),
                    ),
                    ..Default::default()
                }),
            ),
            (
                "DE".to_string(),
                TemplateEntryRaw::Rules(TemplateRulesRaw {
                    address_template: Some(
                        "{{{road}}} {{{house_number}}}\n{{{postcode}}} {{{city}}}\n{{{country}}}".into(),
                    ),
                    postformat_replace: vec![("Berlin\\nBerlin".into(), "Berlin".into())],
                    ..Default::default()
                }),
            ),
            (
                "SG".to_string(),
                TemplateEntryRaw::Plain("{{{road}}}\n{{{country}}} {{{postcode}}}".into()),
            ),
            (
                "XX".to_string(),
                TemplateEntryRaw::Rules(TemplateRulesRaw {
                    postformat_replace: vec![(r"^(\d+) ".into(), "No. $1 ".into())],
                    ..Default::default()
                }),
            ),
        ]);
        let abbreviations = BTreeMap::from([(
            "en".to_string(),
            AbbreviationTableRaw::from([(
                "road".to_string(),
                BTreeMap::from([("Street".to_string(), "St".to_string())]),
            )]),
        )]);
        Catalog::builder()
            .templates(templates)
            .country_languages(BTreeMap::from([("US".to_string(), "en".to_string())]))
            .abbreviations(abbreviations)
            .options(options)
            .build()
            .unwrap()
    }

    fn address(pairs: &[(Component, &str)]) -> Address {
        let mut a = Address::default();
        for (c, v) in pairs {
            a.set(*c, *v);
        }
        a
    }

    #[test]
    fn renders_default_template() {
        let a = address(&[
            (Component::HouseNumber, "12"),
            (Component::Road, "Main Street"),
            (Component::Postcode, "12345"),
            (Component::Town, "Springfield"),
            (Component::Country, "Nowhere"),
        ]);
        let out = render(&a, &catalog(Options::default())).unwrap();
        assert_eq!(out, "12 Main Street\n12345 Springfield\nNowhere");
    }

    #[test]
    fn country_template_is_selected_by_code() {
        let a = address(&[
            (Component::Road, "Friedrichstraße"),
            (Component::HouseNumber, "43"),
            (Component::Postcode, "10117"),
            (Component::City, "Berlin"),
            (Component::Country, "Deutschland"),
            (Component::CountryCode, "DE"),
        ]);
        let out = render(&a, &catalog(Options::default())).unwrap();
        assert_eq!(out, "Friedrichstraße 43\n10117 Berlin\nDeutschland");
    }

    #[test]
    fn fallback_template_when_required_components_missing() {
        let a = address(&[
            (Component::City, "Springfield"),
            (Component::State, "Illinois"),
            (Component::Country, "USA"),
        ]);
        let out = render(&a, &catalog(Options::default())).unwrap();
        assert_eq!(out, "Springfield, Illinois\nUSA");

        let no_fallback = Options {
            required_components: vec![],
            ..Default::default()
        };
        let out = render(&a, &catalog(no_fallback)).unwrap();
        assert_eq!(out, "Springfield\nUSA");
    }

    #[test]
    fn rule_entry_without_text_borrows_default() {
        let a = address(&[
            (Component::HouseNumber, "7"),
            (Component::Road, "Elm Road"),
            (Component::City, "Oakville"),
            (Component::CountryCode, "XX"),
        ]);
        let out = render(&a, &catalog(Options::default())).unwrap();
        assert_eq!(out, "No. 7 Elm Road\nOakville");
    }

    #[test]
    fn plain_entry_is_its_own_template() {
        let a = address(&[
            (Component::Road, "1 Raffles Place"),
            (Component::Postcode, "048616"),
            (Component::Country, "Singapore"),
            (Component::CountryCode, "SG"),
        ]);
        let out = render(&a, &catalog(Options::default())).unwrap();
        assert_eq!(out, "1 Raffles Place\nSingapore 048616");
    }

    #[test]
    fn output_shapes() {
        let a = address(&[
            (Component::Road, "Main Street"),
            (Component::HouseNumber, "1"),
            (Component::City, "Springfield"),
        ]);
        let cat = catalog(Options::default());
        assert_eq!(
            format(&a, &cat).unwrap(),
            Formatted::Lines(vec!["1 Main Street".into(), "Springfield".into()])
        );
        assert_eq!(
            format_as(&a, &cat, OutputFormat::OneLine).unwrap(),
            Formatted::OneLine("1 Main Street, Springfield".into())
        );
        assert_eq!(
            format_as(&a, &cat, OutputFormat::PostalFormat).unwrap().to_string(),
            "1 Main Street\nSpringfield\n"
        );
    }

    #[test]
    fn abbreviation_is_opt_in() {
        let a = address(&[
            (Component::Road, "Main Street"),
            (Component::HouseNumber, "1"),
            (Component::City, "Springfield"),
            (Component::CountryCode, "US"),
        ]);
        let plain = render(&a, &catalog(Options::default())).unwrap();
        assert_eq!(plain, "1 Main Street\nSpringfield");

        let opts = Options {
            abbreviate: true,
            ..Default::default()
        };
        let short = render(&a, &catalog(opts)).unwrap();
        assert_eq!(short, "1 Main St\nSpringfield");
    }

    #[test]
    fn html_characters_pass_through() {
        let a = address(&[(Component::Road, "Rue d'Alésia & Co"), (Component::City, "Paris")]);
        let out = render(&a, &catalog(Options::default())).unwrap();
        assert_eq!(out, "Rue d'Alésia & Co\nParis");
    }
}
