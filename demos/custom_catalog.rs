//! Custom catalog example for addrfmt-rs
//!
//! Builds a small catalog in code instead of loading the bundled files.

use addrfmt_core::catalog::{CodeName, ComponentDef, TemplateEntryRaw, TemplateRulesRaw};
use addrfmt_core::prelude::*;
use std::collections::BTreeMap;

fn main() -> Result<()> {
    println!("=== addrfmt-rs Custom Catalog Example ===\n");

    let default = TemplateEntryRaw::Rules(TemplateRulesRaw {
        address_template: Some(
            "{{{house_number}}} {{{road}}}\n{{#first}} {{{city}}} || {{{town}}} {{/first}}, {{{state_code}}} {{{postcode}}}\n{{{country}}}"
                .into(),
        ),
        fallback_template: Some("{{#first}} {{{city}}} || {{{town}}} {{/first}}\n{{{country}}}".into()),
        postformat_replace: vec![(r"\bUSA$".into(), "United States".into())],
        ..Default::default()
    });

    let states = BTreeMap::from([(
        "US".to_string(),
        BTreeMap::from([("OR".to_string(), CodeName::Name("Oregon".into()))]),
    )]);

    let catalog = Catalog::builder()
        .components(vec![ComponentDef {
            name: "road".into(),
            aliases: vec!["street".into(), "avenue".into()],
        }])
        .templates(BTreeMap::from([("default".to_string(), default)]))
        .state_codes(states)
        .build()?;

    let raw: ComponentMap = [
        ("country_code", "us"),
        ("street", "SW Broadway"),
        ("house_number", "1120"),
        ("city", "Portland"),
        ("state", "Oregon"),
        ("postcode", "97205"),
        ("country", "USA"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect();

    let address = fix(&raw, &catalog)?;
    println!("state_code derived: {:?}\n", address.state_code);
    println!("{}", format_as(&address, &catalog, OutputFormat::PostalFormat)?);

    Ok(())
}
