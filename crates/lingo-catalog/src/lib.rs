#![forbid(unsafe_code)]

//! Message catalogs for lingo.
//!
//! Provides normalized language tags, per-language message storage with
//! plain and plural entries, CLDR cardinal plural rules, strict `{name}`
//! templates, and the pluggable parse/load seams used to populate a
//! [`CatalogStore`] from TOML, JSON or YAML files.
//!
//! # Role in lingo
//! `lingo-catalog` is the data layer. It knows nothing about requests,
//! fallback chains or resolver caching; `lingo-i18n` builds those on top of a
//! fully loaded, immutable `CatalogStore`.

pub mod catalog;
pub mod error;
pub mod format;
pub mod loader;
pub mod plural;
pub mod tag;
pub mod template;

pub use catalog::{CatalogEntry, CatalogStore, CoverageReport, LanguageCatalog, LanguageCoverage};
pub use error::{BoxError, CatalogError};
pub use format::{MessageTree, UnmarshalFn, unmarshal_for_format};
pub use loader::{FsLoader, Loader, MemoryLoader};
pub use plural::{PluralCategory, PluralForms, PluralRule};
pub use tag::LanguageTag;
pub use template::{TemplateData, TemplateError};
