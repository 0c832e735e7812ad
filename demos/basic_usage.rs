//! Basic usage example for addrfmt-rs
//!
//! This example demonstrates how to:
//! - Load the bundled catalog
//! - Fix raw geocoder components into an `Address`
//! - Format it in each output shape
//! - Turn on abbreviations and the attention line

use addrfmt_core::prelude::*;

fn components(pairs: &[(&str, &str)]) -> ComponentMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn main() -> Result<()> {
    println!("=== addrfmt-rs Basic Usage Example ===\n");

    println!("Loading catalog...");
    let catalog = Catalog::load()?;
    let stats = catalog.stats();
    println!(
        "✓ Catalog loaded: {} templates, {} aliases\n",
        stats.templates, stats.aliases
    );

    // Example 1: raw components in, address out
    println!("--- Example 1: Fix raw components ---");
    let raw = components(&[
        ("country_code", "uk"),
        ("street", "Downing Street"),
        ("street_number", "10"),
        ("city", "London"),
        ("postcode", "SW1A 2AA"),
        ("country", "United Kingdom"),
    ]);
    let address = fix(&raw, &catalog)?;
    println!("country_code: {:?}", address.country_code);
    println!("road:         {:?}", address.road);
    println!("house_number: {:?}\n", address.house_number);

    // Example 2: the three output shapes
    println!("--- Example 2: Output shapes ---");
    for shape in [OutputFormat::Array, OutputFormat::OneLine, OutputFormat::PostalFormat] {
        let formatted = format_as(&address, &catalog, shape)?;
        println!("{shape:?}:\n{formatted}\n");
    }

    // Example 3: abbreviations
    println!("--- Example 3: Abbreviations ---");
    let raw = components(&[
        ("country_code", "de"),
        ("road", "Berliner Straße"),
        ("house_number", "12"),
        ("postcode", "14169"),
        ("city", "Berlin"),
    ]);
    let short = catalog.clone().with_options(Options {
        abbreviate: true,
        output_format: OutputFormat::OneLine,
        ..Default::default()
    });
    println!("{}\n", fix_and_format(&raw, &short)?);

    // Example 4: unknown components as attention line
    println!("--- Example 4: Attention line ---");
    let raw = components(&[
        ("country_code", "us"),
        ("restaurant", "Katz's Delicatessen"),
        ("house_number", "205"),
        ("road", "East Houston Street"),
        ("city", "New York"),
        ("state", "New York"),
        ("postcode", "10002"),
    ]);
    let attention = catalog.with_options(Options {
        unknown_components: UnknownComponents::Attention,
        ..Default::default()
    });
    println!("{}", fix_and_format(&raw, &attention)?);

    Ok(())
}
