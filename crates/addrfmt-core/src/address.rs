// crates/addrfmt-core/src/address.rs

//! # Address Model
//!
//! The typed [`Address`] record and the fixed bijection between its fields
//! and the component keys used by the template catalog.
//!
//! The table below is the single source of truth: the [`Component`] enum,
//! the key strings and the `Address` fields are all generated from it, so a
//! field without a key (or a key without a field) cannot compile.

use crate::error::{AddrFmtError, Result};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Component key → value. The wire format of the pipeline.
///
/// Ordered so every stage iterates deterministically.
pub type ComponentMap = BTreeMap<String, String>;

macro_rules! component_table {
    ($( $(#[$doc:meta])* $variant:ident => $field:ident ),+ $(,)?) => {
        /// A recognized address component.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Component {
            $( $(#[$doc])* $variant ),+
        }

        impl Component {
            /// Every component, in template-ish order (smallest unit first).
            pub const ALL: &'static [Component] = &[ $( Component::$variant ),+ ];

            /// The component key used in templates and raw maps.
            pub const fn key(self) -> &'static str {
                match self {
                    $( Component::$variant => stringify!($field) ),+
                }
            }

            /// Inverse of [`Component::key`].
            pub fn from_key(key: &str) -> Option<Self> {
                match key {
                    $( stringify!($field) => Some(Component::$variant), )+
                    _ => None,
                }
            }
        }

        /// A corrected, typed postal address.
        ///
        /// One optional field per [`Component`]. Empty strings are never
        /// stored; use [`Address::set`] to keep that invariant.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct Address {
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<String>,
            )+
        }

        impl Address {
            /// Value of a component, if populated.
            pub fn get(&self, component: Component) -> Option<&str> {
                match component {
                    $( Component::$variant => self.$field.as_deref() ),+
                }
            }

            fn slot_mut(&mut self, component: Component) -> &mut Option<String> {
                match component {
                    $( Component::$variant => &mut self.$field ),+
                }
            }
        }
    };
}

component_table! {
    Attention => attention,
    House => house,
    HouseNumber => house_number,
    Road => road,
    Hamlet => hamlet,
    Village => village,
    Neighbourhood => neighbourhood,
    Suburb => suburb,
    City => city,
    CityDistrict => city_district,
    PostalCity => postal_city,
    Town => town,
    Municipality => municipality,
    County => county,
    CountyCode => county_code,
    StateDistrict => state_district,
    State => state,
    StateCode => state_code,
    Region => region,
    Postcode => postcode,
    Island => island,
    Archipelago => archipelago,
    Country => country,
    CountryCode => country_code,
    /// Not rendered by the reference templates, but kept round-trippable.
    Continent => continent,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Component {
    type Err = AddrFmtError;

    fn from_str(s: &str) -> Result<Self> {
        Component::from_key(s)
            .ok_or_else(|| AddrFmtError::Mapping(format!("{s} is not an address component")))
    }
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for Component {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        Component::from_key(&key)
            .ok_or_else(|| de::Error::custom(format!("unknown address component `{key}`")))
    }
}

impl Address {
    /// Sets a component. An empty (or whitespace-only) value clears it.
    pub fn set(&mut self, component: Component, value: impl Into<String>) {
        let value = value.into();
        *self.slot_mut(component) = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
    }

    /// Removes and returns a component's value.
    pub fn take(&mut self, component: Component) -> Option<String> {
        self.slot_mut(component).take()
    }

    pub fn has(&self, component: Component) -> bool {
        self.get(component).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Populated components in [`Component::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Component, &str)> + '_ {
        Component::ALL
            .iter()
            .filter_map(move |&c| self.get(c).map(|v| (c, v)))
    }

    /// Maps the address back to its component map (populated fields only).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use addrfmt_core::{Address, Component};
    ///
    /// let mut address = Address::default();
    /// address.set(Component::Road, "Main St");
    /// address.set(Component::HouseNumber, "12");
    ///
    /// let map = address.to_components();
    /// assert_eq!(map["road"], "Main St");
    /// assert_eq!(map["house_number"], "12");
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn to_components(&self) -> ComponentMap {
        self.iter()
            .map(|(c, v)| (c.key().to_owned(), v.to_owned()))
            .collect()
    }

    /// Builds an address from canonical keys only; aliases and unknown keys
    /// are ignored. Use [`crate::fix`] for raw input.
    pub fn from_components(components: &ComponentMap) -> Self {
        let mut address = Address::default();
        for (key, value) in components {
            if let Some(c) = Component::from_key(key) {
                address.set(c, value.as_str());
            }
        }
        address
    }
}
