// crates/addrfmt-core/src/catalog/abbreviations.rs
use crate::address::ComponentMap;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::warn;

/// Component → (long form → short form), one table per language file.
pub type AbbreviationTableRaw = BTreeMap<String, BTreeMap<String, String>>;

#[derive(Debug, Clone)]
struct Abbreviation {
    /// `(^|\s)<long>\b`
    pattern: Regex,
    short: String,
}

/// Compiled abbreviation tables plus the country → languages mapping.
#[derive(Debug, Clone, Default)]
pub struct Abbreviations {
    /// lang → component → rules
    by_language: BTreeMap<String, BTreeMap<String, Vec<Abbreviation>>>,
    /// country code → languages
    languages: BTreeMap<String, Vec<String>>,
}

impl Abbreviations {
    pub fn compile(
        tables: BTreeMap<String, AbbreviationTableRaw>,
        country_languages: &BTreeMap<String, String>,
    ) -> Self {
        let by_language = tables
            .into_iter()
            .map(|(lang, table)| {
                let compiled = table
                    .into_iter()
                    .map(|(component, pairs)| {
                        let rules = pairs
                            .into_iter()
                            .filter_map(|(long, short)| compile_rule(&lang, &long, short))
                            .collect();
                        (component, rules)
                    })
                    .collect();
                (lang, compiled)
            })
            .collect();

        let languages = country_languages
            .iter()
            .map(|(cc, langs)| {
                let list = langs
                    .split(',')
                    .map(|l| l.trim().to_lowercase())
                    .filter(|l| !l.is_empty())
                    .collect();
                (cc.to_uppercase(), list)
            })
            .collect();

        Self {
            by_language,
            languages,
        }
    }

    /// Languages spoken in a country, as listed in `country2lang.yaml`.
    pub fn languages_for(&self, country_code: &str) -> &[String] {
        self.languages
            .get(country_code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn language_count(&self) -> usize {
        self.by_language.len()
    }

    /// Shortens component values using every language of the country.
    ///
    /// Each `(long, short)` pair replaces the first occurrence of `long`
    /// that starts the value or follows whitespace.
    pub fn apply(&self, country_code: &str, components: ComponentMap) -> ComponentMap {
        let mut out = components;
        for lang in self.languages_for(country_code) {
            let Some(table) = self.by_language.get(lang) else {
                continue;
            };
            for (component, rules) in table {
                let Some(value) = out.get_mut(component) else {
                    continue;
                };
                for rule in rules {
                    let replaced = rule
                        .pattern
                        .replace(value, format!("${{1}}{}", rule.short.replace('$', "$$")));
                    *value = replaced.into_owned();
                }
            }
        }
        out
    }
}

fn compile_rule(lang: &str, long: &str, short: String) -> Option<Abbreviation> {
    let pattern = format!(r"(^|\s){}\b", regex::escape(long));
    match Regex::new(&pattern) {
        Ok(pattern) => Some(Abbreviation { pattern, short }),
        Err(e) => {
            warn!(lang, long, error = %e, "could not compile abbreviation, skipped");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn abbreviations() -> Abbreviations {
        let en = BTreeMap::from([(
            "road".to_string(),
            BTreeMap::from([
                ("Avenue".to_string(), "Ave".to_string()),
                ("Street".to_string(), "St".to_string()),
            ]),
        )]);
        Abbreviations::compile(
            BTreeMap::from([("en".to_string(), en)]),
            &BTreeMap::from([("US".to_string(), "en".to_string())]),
        )
    }

    #[test]
    fn shortens_whole_words_only() {
        let a = abbreviations();
        let map = ComponentMap::from([
            ("road".to_string(), "Main Street".to_string()),
            ("city".to_string(), "Street City".to_string()),
        ]);
        let out = a.apply("US", map);
        assert_eq!(out["road"], "Main St");
        assert_eq!(out["city"], "Street City");

        let map = ComponentMap::from([("road".to_string(), "Streetside Avenue".to_string())]);
        assert_eq!(a.apply("US", map)["road"], "Streetside Ave");
    }

    #[test]
    fn countries_without_languages_are_untouched() {
        let map = ComponentMap::from([("road".to_string(), "Main Street".to_string())]);
        assert_eq!(abbreviations().apply("DE", map)["road"], "Main Street");
    }
}
