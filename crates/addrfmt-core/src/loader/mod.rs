// crates/addrfmt-core/src/loader/mod.rs

//! # Catalog Loader
//!
//! Handles the physical layer (files, directories) and delegates parsing to
//! the format-specific modules:
//!
//! - `yaml`: the reference on-disk layout (one file per table);
//! - `json`: a single JSON document holding a whole [`CatalogRaw`].

use crate::catalog::{Catalog, Options};
use crate::error::Result;
#[cfg(feature = "yaml")]
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

#[cfg(any(feature = "yaml", feature = "json"))]
mod common_io;

#[cfg(feature = "yaml")]
mod yaml;

#[cfg(feature = "json")]
mod json;

#[cfg(feature = "yaml")]
static CATALOG_CACHE: OnceCell<Catalog> = OnceCell::new();

/// Where each catalog table lives.
///
/// `components` and `templates` are required; the other tables may be
/// missing, in which case they load empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFiles {
    pub components: PathBuf,
    pub templates: PathBuf,
    pub state_codes: PathBuf,
    pub county_codes: PathBuf,
    pub country_codes: PathBuf,
    pub country_languages: PathBuf,
    /// Directory of `<lang>.yaml` abbreviation files.
    pub abbreviations_dir: PathBuf,
}

impl ConfigFiles {
    /// The reference layout below `dir`.
    ///
    /// ```rust
    /// use addrfmt_core::loader::ConfigFiles;
    /// use std::path::Path;
    ///
    /// let files = ConfigFiles::in_dir("conf");
    /// assert_eq!(files.templates, Path::new("conf/countries/worldwide.yaml"));
    /// assert_eq!(files.abbreviations_dir, Path::new("conf/abbreviations"));
    /// ```
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            components: dir.join("components.yaml"),
            templates: dir.join("countries").join("worldwide.yaml"),
            state_codes: dir.join("state_codes.yaml"),
            county_codes: dir.join("county_codes.yaml"),
            country_codes: dir.join("country_codes.yaml"),
            country_languages: dir.join("country2lang.yaml"),
            abbreviations_dir: dir.join("abbreviations"),
        }
    }
}

impl Catalog {
    /// The catalog bundled with the crate, resolved relative to the crate
    /// root (`CARGO_MANIFEST_DIR`).
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    /// Loads the bundled catalog with default [`Options`].
    ///
    /// The catalog is parsed and compiled once per process; later calls
    /// return a clone of the cached instance.
    #[cfg(feature = "yaml")]
    pub fn load() -> Result<Self> {
        CATALOG_CACHE
            .get_or_try_init(|| Self::load_from_dir(Self::default_data_dir(), Options::default()))
            .cloned()
    }

    /// Loads a catalog stored in the reference layout below `dir`.
    #[cfg(feature = "yaml")]
    pub fn load_from_dir(dir: impl AsRef<Path>, options: Options) -> Result<Self> {
        Self::load_from_files(&ConfigFiles::in_dir(dir), options)
    }

    /// Loads a catalog from explicitly named files.
    #[cfg(feature = "yaml")]
    pub fn load_from_files(files: &ConfigFiles, options: Options) -> Result<Self> {
        let raw = yaml::read_catalog(files)?;
        Catalog::from_raw(raw, options)
    }

    /// Loads a catalog from a single JSON bundle.
    #[cfg(feature = "json")]
    pub fn from_json_reader(reader: impl std::io::Read, options: Options) -> Result<Self> {
        let raw = json::read_catalog(reader)?;
        Catalog::from_raw(raw, options)
    }

    /// Loads a catalog from a JSON bundle file.
    #[cfg(feature = "json")]
    pub fn load_json(path: impl AsRef<Path>, options: Options) -> Result<Self> {
        let reader = common_io::open_stream(path.as_ref())?;
        Self::from_json_reader(reader, options)
    }
}
