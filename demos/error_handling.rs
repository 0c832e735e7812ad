//! Error handling example for addrfmt-rs
//!
//! This example demonstrates the error cases of the pipeline and how
//! input anomalies are absorbed instead of failing.

use addrfmt_core::prelude::*;

fn main() -> Result<()> {
    println!("=== addrfmt-rs Error Handling Example ===\n");

    // Example 1: catalog directory that does not exist
    println!("--- Example 1: Loading a missing catalog ---");
    match Catalog::load_from_dir("/does/not/exist", Options::default()) {
        Ok(_) => println!("  unexpectedly loaded"),
        Err(e) => println!("  ✗ {e}"),
    }
    println!();

    let catalog = Catalog::load()?;

    // Example 2: output selectors
    println!("--- Example 2: Parsing output selectors ---");
    for selector in ["array", "oneline", "postal", "html"] {
        match selector.parse::<OutputFormat>() {
            Ok(f) => println!("  {selector:8} -> {f:?}"),
            Err(e) => println!("  {selector:8} -> ✗ {e}"),
        }
    }
    println!();

    // Example 3: rejecting unknown components
    println!("--- Example 3: Reject policy ---");
    let raw: ComponentMap = [("road", "Main Street"), ("shop", "Bakery")]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .collect();
    let strict = catalog.clone().with_options(Options {
        unknown_components: UnknownComponents::Reject,
        ..Default::default()
    });
    match fix(&raw, &strict) {
        Ok(a) => println!("  fixed: {a:?}"),
        Err(AddrFmtError::Mapping(msg)) => println!("  ✗ rejected: {msg}"),
        Err(e) => return Err(e),
    }
    println!();

    // Example 4: anomalies that are repaired, not reported
    println!("--- Example 4: Repaired input ---");
    let cases: &[&[(&str, &str)]] = &[
        &[("country_code", "DEU"), ("road", "Unter den Linden")],
        &[("country_code", "us"), ("road", "Broadway"), ("postcode", "10001;10002")],
        &[("country_code", "de"), ("country", "49"), ("state", "Bayern")],
        &[("road", "https://example.org"), ("city", "Springfield")],
    ];
    for pairs in cases {
        let raw: ComponentMap = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let address = fix(&raw, &catalog)?;
        println!("  {raw:?}\n    -> {address:?}");
    }

    Ok(())
}
