// crates/addrfmt-core/src/catalog/components.rs
use crate::address::ComponentMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One document of `components.yaml`:
///
/// ```yaml
/// name: house_number
/// aliases:
///     - street_number
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDef {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Where an alias points to, and how strongly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentAlias {
    pub canonical: String,
    /// Position in the alias list; lower wins.
    pub rank: usize,
}

/// Alias key → canonical component key.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    aliases: HashMap<String, ComponentAlias>,
}

impl AliasTable {
    /// Builds the table from component definitions. When an alias is listed
    /// under more than one component, the later definition wins.
    pub fn from_defs(defs: &[ComponentDef]) -> Self {
        let mut aliases = HashMap::new();
        for def in defs {
            for (rank, alias) in def.aliases.iter().enumerate() {
                aliases.insert(
                    alias.clone(),
                    ComponentAlias {
                        canonical: def.name.clone(),
                        rank,
                    },
                );
            }
        }
        Self { aliases }
    }

    pub fn is_alias(&self, key: &str) -> bool {
        self.aliases.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Copies alias values onto their canonical keys.
    ///
    /// A canonical key that already carries a non-empty value keeps it.
    /// Among several aliases of the same canonical key the lowest rank wins.
    /// Alias keys themselves stay in the map.
    pub fn resolve(&self, components: ComponentMap) -> ComponentMap {
        let mut winners: BTreeMap<&str, (usize, &str)> = BTreeMap::new();

        for (key, value) in &components {
            let Some(alias) = self.aliases.get(key) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            let canonical = alias.canonical.as_str();
            if components.get(canonical).is_some_and(|v| !v.is_empty()) {
                continue;
            }
            match winners.get(canonical) {
                Some(&(rank, _)) if rank <= alias.rank => {}
                _ => {
                    winners.insert(canonical, (alias.rank, value.as_str()));
                }
            }
        }

        let resolved: Vec<(String, String)> = winners
            .into_iter()
            .map(|(k, (_, v))| (k.to_owned(), v.to_owned()))
            .collect();

        let mut out = components;
        out.extend(resolved);
        out
    }
}
