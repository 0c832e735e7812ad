//! addrfmt: command-line interface for addrfmt-core
//!
//! Fixes raw geocoder components and formats them with the catalog's
//! per-country templates.
//!
//! Usage examples
//! --------------
//!
//! - Format a component map
//!   $ addrfmt format '{"country_code":"de","road":"Unter den Linden","house_number":"77","city":"Berlin"}'
//!
//! - One line, unknown keys kept as attention
//!   $ echo '{"shop":"Bakery","road":"Main St"}' | addrfmt --format oneline --attention format -
//!
//! - Show the fixed address
//!   $ addrfmt fix '{"country_code":"uk","street":"Downing Street"}'
//!
//! - Catalog summary and lookups
//!   $ addrfmt stats
//!   $ addrfmt state-code US "New York"
//!
//! Logging goes to stderr and honors `RUST_LOG` (default `warn`).
mod args;

use crate::args::{CliArgs, Commands};
use addrfmt_core::{
    fix, format_as, Catalog, ComponentMap, Options, OutputFormat, UnknownComponents,
};
use anyhow::Context;
use clap::Parser;
use std::io::Read;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let output_format: OutputFormat = args.format.parse()?;
    let options = Options {
        unknown_components: if args.reject_unknown {
            UnknownComponents::Reject
        } else if args.attention {
            UnknownComponents::Attention
        } else {
            UnknownComponents::Drop
        },
        abbreviate: args.abbreviate,
        output_format,
        ..Default::default()
    };

    let dir = args.config.unwrap_or_else(Catalog::default_data_dir);
    tracing::debug!(dir = %dir.display(), "loading catalog");
    let catalog = Catalog::load_from_dir(&dir, options)
        .with_context(|| format!("could not load catalog from {}", dir.display()))?;

    match args.command {
        Commands::Format { input } => {
            let raw = read_components(&input)?;
            let address = fix(&raw, &catalog)?;
            let formatted = format_as(&address, &catalog, output_format)?;
            match output_format {
                OutputFormat::PostalFormat => print!("{formatted}"),
                _ => println!("{formatted}"),
            }
        }

        Commands::Fix { input } => {
            let raw = read_components(&input)?;
            let address = fix(&raw, &catalog)?;
            println!("{}", serde_json::to_string_pretty(&address)?);
        }

        Commands::Stats => {
            let stats = catalog.stats();
            println!("Catalog statistics:");
            println!("  Templates: {}", stats.templates);
            println!("  Component aliases: {}", stats.aliases);
            println!(
                "  State codes: {} in {} countries",
                stats.state_codes, stats.state_code_countries
            );
            println!(
                "  County codes: {} in {} countries",
                stats.county_codes, stats.county_code_countries
            );
            println!("  Country codes: {}", stats.country_codes);
            println!("  Abbreviation languages: {}", stats.abbreviation_languages);
        }

        Commands::StateCode { country, state } => {
            let country = country.to_uppercase();
            match catalog.state_codes().code_for(&country, &state) {
                Some(code) => println!("{code}"),
                None => eprintln!("No state code for {state} in {country}"),
            }
        }

        Commands::Country { code } => match catalog.country_codes().name_of(&code) {
            Some(name) => println!("{name}"),
            None => eprintln!("Country {code} not found"),
        },
    }

    Ok(())
}

/// Parses a JSON object of string values; `-` reads it from stdin.
fn read_components(input: &str) -> anyhow::Result<ComponentMap> {
    let text = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("could not read stdin")?;
        buf
    } else {
        input.to_owned()
    };
    serde_json::from_str(&text).context("input must be a JSON object of string values")
}
