// crates/addrfmt-core/src/formatter/output.rs
use crate::error::{AddrFmtError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shape of the formatter's output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// One entry per line.
    #[default]
    Array,
    /// Lines joined with `", "`.
    OneLine,
    /// Multi-line block with a trailing newline.
    PostalFormat,
}

impl FromStr for OutputFormat {
    type Err = AddrFmtError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "array" | "lines" => Ok(OutputFormat::Array),
            "oneline" | "one_line" | "one-line" => Ok(OutputFormat::OneLine),
            "postal" | "postalformat" | "postal_format" | "postal-format" => {
                Ok(OutputFormat::PostalFormat)
            }
            _ => Err(AddrFmtError::InvalidOutputFormat(s.to_owned())),
        }
    }
}

/// A formatted address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Formatted {
    Lines(Vec<String>),
    OneLine(String),
    Postal(String),
}

impl Formatted {
    /// Projects a cleaned multi-line render into the requested shape.
    pub fn project(render: &str, format: OutputFormat) -> Self {
        match format {
            OutputFormat::Array => Formatted::Lines(render.split('\n').map(str::to_owned).collect()),
            OutputFormat::OneLine => Formatted::OneLine(render.replace('\n', ", ")),
            OutputFormat::PostalFormat => Formatted::Postal(format!("{render}\n")),
        }
    }

    pub fn lines(&self) -> Vec<&str> {
        match self {
            Formatted::Lines(lines) => lines.iter().map(String::as_str).collect(),
            Formatted::OneLine(line) => vec![line.as_str()],
            Formatted::Postal(block) => block.lines().collect(),
        }
    }
}

impl fmt::Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formatted::Lines(lines) => f.write_str(&lines.join("\n")),
            Formatted::OneLine(line) => f.write_str(line),
            Formatted::Postal(block) => f.write_str(block),
        }
    }
}
