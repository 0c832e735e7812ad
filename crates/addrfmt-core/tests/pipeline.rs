// crates/addrfmt-core/tests/pipeline.rs

use addrfmt_core::catalog::{CatalogRaw, TemplateEntryRaw, TemplateRulesRaw};
use addrfmt_core::formatter::render_components;
use addrfmt_core::{
    fix, fix_and_format, format_as, AddrFmtError, Catalog, Component, ComponentMap, Formatted,
    Options, OutputFormat, UnknownComponents,
};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fn map(pairs: &[(&str, &str)]) -> ComponentMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn berlin() -> ComponentMap {
    map(&[
        ("country_code", "de"),
        ("road", "Berliner Straße"),
        ("house_number", "12"),
        ("postcode", "14169"),
        ("city", "Berlin"),
        ("country", "Deutschland"),
    ])
}

#[test]
fn bundled_catalog_loads_once() {
    let first = Catalog::load().expect("bundled catalog");
    let second = Catalog::load().expect("bundled catalog");
    assert_eq!(first.stats(), second.stats());

    let stats = first.stats();
    assert!(stats.templates > 10);
    assert!(stats.aliases > 20);
    assert_eq!(stats.county_code_countries, 1);
    assert_eq!(stats.abbreviation_languages, 3);
}

#[test]
fn default_output_is_lines() {
    let catalog = Catalog::load().unwrap();
    let out = fix_and_format(&berlin(), &catalog).unwrap();
    assert_eq!(
        out,
        Formatted::Lines(vec![
            "Berliner Straße 12".into(),
            "14169 Berlin".into(),
            "Deutschland".into()
        ])
    );
}

#[test]
fn one_line_and_abbreviated() {
    let options = Options {
        abbreviate: true,
        output_format: OutputFormat::OneLine,
        ..Default::default()
    };
    let catalog = Catalog::load().unwrap().with_options(options);
    let out = fix_and_format(&berlin(), &catalog).unwrap();
    assert_eq!(out.to_string(), "Berliner Str. 12, 14169 Berlin, Deutschland");

    let address = fix(&map(&[("country_code", "us"), ("road", "Main Street"), ("house_number", "5")]), &catalog).unwrap();
    let out = format_as(&address, &catalog, OutputFormat::OneLine).unwrap();
    assert_eq!(out.to_string(), "5 Main St");
}

#[test]
fn unknown_components_policy() {
    let raw = map(&[("road", "Main Street"), ("shop", "Bakery")]);
    let catalog = Catalog::load().unwrap();

    let dropped = fix(&raw, &catalog).unwrap();
    assert_eq!(dropped.attention, None);

    let reject = catalog.clone().with_options(Options {
        unknown_components: UnknownComponents::Reject,
        ..Default::default()
    });
    match fix(&raw, &reject) {
        Err(AddrFmtError::Mapping(msg)) => assert!(msg.contains("shop")),
        other => panic!("expected a mapping error, got {other:?}"),
    }

    // aliases are never "unknown"
    let aliased = map(&[("street", "Main Street"), ("postal_code", "12345")]);
    let address = fix(&aliased, &reject).unwrap();
    assert_eq!(address.get(Component::Road), Some("Main Street"));
    assert_eq!(address.get(Component::Postcode), Some("12345"));
}

#[test]
fn fixed_address_carries_derived_codes() {
    let catalog = Catalog::load().unwrap();
    let address = fix(
        &map(&[("country_code", "de"), ("state", "Bavaria"), ("city", "München")]),
        &catalog,
    )
    .unwrap();
    assert_eq!(address.state_code.as_deref(), Some("BY"));

    let address = fix(
        &map(&[("country_code", "it"), ("county", "Rome"), ("city", "Roma")]),
        &catalog,
    )
    .unwrap();
    assert_eq!(address.county_code.as_deref(), Some("RM"));
}

#[test]
fn missing_directory_is_not_found() {
    let err = Catalog::load_from_dir("/nonexistent/addrfmt", Options::default()).unwrap_err();
    assert!(matches!(err, AddrFmtError::NotFound(_)), "{err}");
}

#[test]
fn catalog_without_default_template_is_a_config_error() {
    let raw = CatalogRaw {
        templates: BTreeMap::from([(
            "DE".to_string(),
            TemplateEntryRaw::Plain("{{{road}}}".into()),
        )]),
        ..Default::default()
    };
    assert!(matches!(
        Catalog::from_raw(raw, Options::default()),
        Err(AddrFmtError::Config(_))
    ));
}

#[test]
fn json_bundle_round_trip() {
    let raw = CatalogRaw {
        templates: BTreeMap::from([(
            "default".to_string(),
            TemplateEntryRaw::Rules(TemplateRulesRaw {
                address_template: Some("{{{road}}} {{{house_number}}}\n{{{city}}}".into()),
                fallback_template: Some("{{{city}}}".into()),
                ..Default::default()
            }),
        )]),
        ..Default::default()
    };
    let json = serde_json::to_string(&raw).unwrap();
    let catalog = Catalog::from_json_reader(json.as_bytes(), Options::default()).unwrap();

    let out = fix_and_format(&map(&[("road", "Elm Road"), ("house_number", "4"), ("city", "Oakville")]), &catalog).unwrap();
    assert_eq!(out.to_string(), "Elm Road 4\nOakville");

    let out = fix_and_format(&map(&[("city", "Oakville")]), &catalog).unwrap();
    assert_eq!(out.to_string(), "Oakville");
}

#[test]
fn json_bundle_loads_from_file() {
    let raw = CatalogRaw {
        templates: BTreeMap::from([(
            "default".to_string(),
            TemplateEntryRaw::Plain("{{{road}}}\n{{{city}}}".into()),
        )]),
        ..Default::default()
    };
    let path = std::env::temp_dir().join(format!("addrfmt-bundle-{}.json", std::process::id()));
    std::fs::write(&path, serde_json::to_string(&raw).unwrap()).unwrap();

    let loaded = Catalog::load_json(&path, Options::default());
    std::fs::remove_file(&path).unwrap();

    let catalog = loaded.unwrap();
    let out = fix_and_format(&map(&[("road", "Elm Road"), ("city", "Oakville")]), &catalog).unwrap();
    assert_eq!(out.to_string(), "Elm Road\nOakville");
}

#[test]
fn missing_json_bundle_is_not_found() {
    let err = Catalog::load_json("/nonexistent/addrfmt/catalog.json", Options::default()).unwrap_err();
    assert!(matches!(err, AddrFmtError::NotFound(_)), "{err}");
}

#[test]
fn render_components_skips_fixing() {
    let catalog = Catalog::load().unwrap();
    let raw = map(&[
        ("country_code", "DE"),
        ("road", "Unter den Linden"),
        ("house_number", "77"),
        ("postcode", "10117"),
        ("city", "Berlin"),
        ("stadtbezirk", "Mitte"),
    ]);
    let out = render_components(&raw, &catalog).unwrap();
    assert_eq!(out, "Unter den Linden 77\n10117 Berlin");
}

#[test]
fn broken_json_is_reported() {
    let err = Catalog::from_json_reader("{ not json".as_bytes(), Options::default()).unwrap_err();
    assert!(matches!(err, AddrFmtError::Json(_)));
}

#[test]
fn catalog_is_usable_from_many_threads() {
    let catalog = Catalog::load().unwrap();
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let out = fix_and_format(&berlin(), &catalog).unwrap();
                assert_eq!(out.lines()[0], "Berliner Straße 12");
            });
        }
    });
}
