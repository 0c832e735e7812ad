// crates/addrfmt-core/src/loader/yaml.rs

// ---------------------------------------------------------------------------
// FILE GUARD: this module is only compiled with the 'yaml' feature.
// ---------------------------------------------------------------------------

use super::common_io::{read_optional, read_required};
use super::ConfigFiles;
use crate::catalog::{AbbreviationTableRaw, CatalogRaw, ComponentDef};
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Reads every table named by `files`.
pub fn read_catalog(files: &ConfigFiles) -> Result<CatalogRaw> {
    let components = parse_components(&read_required(&files.components)?)?;
    let templates = serde_yaml::from_str(&read_required(&files.templates)?)?;

    let raw = CatalogRaw {
        components,
        templates,
        state_codes: read_table(&files.state_codes)?,
        county_codes: read_table(&files.county_codes)?,
        country_codes: read_table(&files.country_codes)?,
        country_code_aliases: None,
        country_languages: read_table(&files.country_languages)?,
        abbreviations: read_abbreviations(&files.abbreviations_dir)?,
    };
    debug!(
        components = raw.components.len(),
        templates = raw.templates.len(),
        abbreviation_languages = raw.abbreviations.len(),
        "catalog files read"
    );
    Ok(raw)
}

/// `components.yaml` is a stream of `---` separated documents.
pub fn parse_components(text: &str) -> Result<Vec<ComponentDef>> {
    let mut defs = Vec::new();
    for document in serde_yaml::Deserializer::from_str(text) {
        let def: Option<ComponentDef> = Option::deserialize(document)?;
        defs.extend(def);
    }
    Ok(defs)
}

/// An optional table; a missing file reads as empty.
fn read_table<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    match read_optional(path)? {
        Some(text) => Ok(serde_yaml::from_str::<Option<T>>(&text)?.unwrap_or_default()),
        None => {
            debug!(path = %path.display(), "optional catalog file missing");
            Ok(T::default())
        }
    }
}

/// One table per `<lang>.yaml` file.
fn read_abbreviations(dir: &Path) -> Result<BTreeMap<String, AbbreviationTableRaw>> {
    let mut tables = BTreeMap::new();
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(tables),
        Err(e) => return Err(e.into()),
    };
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
            continue;
        }
        let Some(lang) = path.file_stem().and_then(|s| s.to_str()) else {
            warn!(path = %path.display(), "abbreviation file name is not UTF-8, skipped");
            continue;
        };
        let lang = lang.to_lowercase();
        let table: AbbreviationTableRaw = read_table(&path)?;
        tables.insert(lang, table);
    }
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TemplateEntryRaw;
    use pretty_assertions::assert_eq;

    #[test]
    fn components_stream_is_split_into_documents() {
        let text = "---\nname: road\naliases:\n  - street\n  - footway\n---\nname: city\n";
        let defs = parse_components(text).unwrap();
        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].aliases, vec!["street", "footway"]);
        assert!(defs[1].aliases.is_empty());
    }

    #[test]
    fn templates_resolve_anchors_and_plain_entries() {
        let text = r#"
generic1: &generic1 |
    {{{road}}}
    {{{city}}}
default:
    address_template: *generic1
    fallback_template: "{{{city}}}"
GB:
    address_template: *generic1
    replace:
        - ["^Borough of ", ""]
"#;
        let templates: BTreeMap<String, TemplateEntryRaw> = serde_yaml::from_str(text).unwrap();
        assert_eq!(
            templates["generic1"],
            TemplateEntryRaw::Plain("{{{road}}}\n{{{city}}}\n".into())
        );
        let TemplateEntryRaw::Rules(gb) = &templates["GB"] else {
            panic!("GB should be a rule entry");
        };
        assert_eq!(gb.address_template.as_deref(), Some("{{{road}}}\n{{{city}}}\n"));
        assert_eq!(gb.replace, vec![("^Borough of ".to_string(), String::new())]);
    }
}
