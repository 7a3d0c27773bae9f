//! Secondary catalogs consulted during a census

pub mod language;

pub use language::{CategoryMapper, CultureRecord, LanguageCatalog};
