use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for addrfmt
#[derive(Debug, Parser)]
#[command(
    name = "addrfmt",
    version,
    about = "Fix and format postal addresses with per-country templates"
)]
pub struct CliArgs {
    /// Catalog directory (components.yaml, countries/worldwide.yaml, ...).
    /// Defaults to the catalog bundled with addrfmt-core.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Output shape: array, oneline or postal
    #[arg(short = 'f', long = "format", global = true, default_value = "postal")]
    pub format: String,

    /// Collect unknown components into the attention line instead of dropping them
    #[arg(long = "attention", global = true, conflicts_with = "reject_unknown")]
    pub attention: bool,

    /// Fail on unknown components
    #[arg(long = "reject-unknown", global = true)]
    pub reject_unknown: bool,

    /// Abbreviate component values (e.g. Street -> St)
    #[arg(short = 'a', long = "abbreviate", global = true)]
    pub abbreviate: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fix and format a component map given as a JSON object ("-" reads stdin)
    Format {
        /// e.g. '{"road":"Main St","house_number":"1","country_code":"us"}'
        input: String,
    },

    /// Print the fixed address as JSON
    Fix {
        /// JSON object, or "-" for stdin
        input: String,
    },

    /// Show a summary of the catalog contents
    Stats,

    /// Look up the code of a state
    StateCode {
        /// ISO2 code of the country (e.g. US)
        country: String,
        /// State name (e.g. California)
        state: String,
    },

    /// Look up a country name by ISO2 code
    Country {
        /// ISO2 code (e.g. DE, uk)
        code: String,
    },
}
