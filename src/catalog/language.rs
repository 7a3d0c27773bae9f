//! Culture -> primary language lookup
//!
//! Built once from the culture catalog and indexed by lowercase culture id
//! and name. An empty catalog is a normal state: the census then derives
//! languages from resident characters instead.

use std::path::Path;

use ahash::AHashMap;
use serde::Deserialize;

use crate::core::error::{CensusError, Result};
use crate::world::lenient;

/// Resolves a culture key to the language its people primarily speak
pub trait CategoryMapper {
    fn primary_language_of(&self, culture_id: &str) -> Option<&str>;

    /// True when no mappings are loaded at all
    fn is_empty(&self) -> bool;
}

/// One culture record as saved by the authoring tools.
/// The language may be saved as `primary_language` or `language`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "CultureRecordIn")]
pub struct CultureRecord {
    pub id: String,
    pub name: Option<String>,
    pub primary_language: Option<String>,
}

#[derive(Deserialize)]
struct CultureRecordIn {
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    id: String,
    #[serde(default, deserialize_with = "lenient::optional_key")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_key")]
    primary_language: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_key")]
    language: Option<String>,
}

impl From<CultureRecordIn> for CultureRecord {
    fn from(raw: CultureRecordIn) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            primary_language: raw.primary_language.or(raw.language),
        }
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    cultures: Vec<CultureRecord>,
}

/// Indexed culture catalog
#[derive(Debug, Clone, Default)]
pub struct LanguageCatalog {
    /// Lowercase culture id or name -> language
    languages: AHashMap<String, String>,
    cultures: usize,
}

impl LanguageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = CultureRecord>) -> Self {
        let mut catalog = Self::new();
        for record in records {
            catalog.insert(record);
        }
        catalog
    }

    /// Index a culture record. Records without a language are ignored.
    /// Ids take precedence over names when the two collide.
    pub fn insert(&mut self, record: CultureRecord) {
        let Some(language) = record.primary_language else {
            return;
        };
        let language = language.trim().to_string();
        let id = record.id.trim().to_lowercase();
        if !id.is_empty() {
            self.languages.insert(id, language.clone());
        }
        if let Some(name) = record.name {
            self.languages
                .entry(name.trim().to_lowercase())
                .or_insert(language);
        }
        self.cultures += 1;
    }

    /// Load a catalog file: an array of culture records, or `{"cultures": [...]}`.
    /// A missing file yields an empty catalog.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No culture catalog at {}, language lookup disabled", path.display());
                return Ok(Self::new());
            }
            Err(e) => return Err(e.into()),
        };
        let records = if content.trim_start().starts_with('[') {
            serde_json::from_str(&content)
        } else {
            serde_json::from_str::<CatalogFile>(&content).map(|file| file.cultures)
        }
        .map_err(|source| CensusError::RecordError {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_records(records);
        tracing::info!(
            "Loaded {} cultures with languages from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Load every `.json` culture record in a directory.
    /// A missing directory yields an empty catalog.
    pub fn load_directory(path: &Path) -> Result<Self> {
        let mut catalog = Self::new();
        let entries = match std::fs::read_dir(path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No culture directory at {}, language lookup disabled", path.display());
                return Ok(catalog);
            }
            Err(e) => return Err(e.into()),
        };

        let mut paths = Vec::new();
        for entry in entries {
            let entry_path = entry?.path();
            if entry_path.extension().and_then(|s| s.to_str()) == Some("json") {
                paths.push(entry_path);
            }
        }
        paths.sort();

        for record_path in paths {
            let content = std::fs::read_to_string(&record_path)?;
            let mut record: CultureRecord =
                serde_json::from_str(&content).map_err(|source| CensusError::RecordError {
                    path: record_path.clone(),
                    source,
                })?;
            if record.id.trim().is_empty() {
                if let Some(stem) = record_path.file_stem().and_then(|s| s.to_str()) {
                    record.id = stem.to_string();
                }
            }
            catalog.insert(record);
        }

        tracing::info!(
            "Loaded {} cultures with languages from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Load from either a catalog file or a directory of records
    pub fn load(path: &Path) -> Result<Self> {
        if path.is_dir() {
            Self::load_directory(path)
        } else {
            Self::load_file(path)
        }
    }

    /// Number of cultures that map to a language
    pub fn len(&self) -> usize {
        self.cultures
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

impl CategoryMapper for LanguageCatalog {
    fn primary_language_of(&self, culture_id: &str) -> Option<&str> {
        self.languages
            .get(&culture_id.trim().to_lowercase())
            .map(String::as_str)
    }

    fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
