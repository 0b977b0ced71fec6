//! Per-language message catalogs.
//!
//! # Invariants
//!
//! 1. **One bucket per tag**: every entry belongs to exactly one
//!    [`LanguageCatalog`], keyed by normalized [`LanguageTag`].
//!
//! 2. **Last load wins**: loading a second document into an existing bucket
//!    overrides entries with the same id and keeps the rest.
//!
//! 3. **Thread safety**: `CatalogStore` is `Send + Sync` and has no interior
//!    mutability; once it is shared behind an `Arc` it can only be read.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Byte source unreadable | Loader error | [`CatalogError::Load`] |
//! | Malformed document | Parse function error | [`CatalogError::Parse`] |
//! | Same id twice in one document | Flattening collision | [`CatalogError::DuplicateKey`] |
//! | Message table with a non-reserved key | Flattening | [`CatalogError::Parse`] |
//! | Lookup in unknown language | Not loaded | `None` |

use std::collections::HashMap;
use std::path::Path;

use crate::error::{CatalogError, Result};
use crate::format::{FlattenError, MessageTree};
use crate::loader::Loader;
use crate::plural::{PluralForms, PluralRule};
use crate::tag::LanguageTag;

/// A single message: either a plain string or plural forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEntry {
    /// A non-pluralized string.
    Simple(String),
    /// Forms keyed by CLDR plural category.
    Plural(PluralForms),
}

impl CatalogEntry {
    /// The text used when no plural count is involved: the string itself, or
    /// the `other` form of a plural entry.
    #[must_use]
    pub fn default_text(&self) -> Option<&str> {
        match self {
            Self::Simple(s) => Some(s),
            Self::Plural(forms) => forms.other.as_deref(),
        }
    }
}

impl From<&str> for CatalogEntry {
    fn from(s: &str) -> Self {
        Self::Simple(s.to_owned())
    }
}

impl From<String> for CatalogEntry {
    fn from(s: String) -> Self {
        Self::Simple(s)
    }
}

impl From<PluralForms> for CatalogEntry {
    fn from(forms: PluralForms) -> Self {
        Self::Plural(forms)
    }
}

/// Messages for one language.
#[derive(Debug, Clone, Default)]
pub struct LanguageCatalog {
    entries: HashMap<String, CatalogEntry>,
}

impl LanguageCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a plain string, replacing any previous entry with this id.
    pub fn insert(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.entries
            .insert(id.into(), CatalogEntry::Simple(text.into()));
    }

    /// Insert plural forms, replacing any previous entry with this id.
    pub fn insert_plural(&mut self, id: impl Into<String>, forms: PluralForms) {
        self.entries.insert(id.into(), CatalogEntry::Plural(forms));
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn merge(&mut self, entries: Vec<(String, CatalogEntry)>) -> usize {
        let count = entries.len();
        self.entries.extend(entries);
        count
    }
}

/// All loaded catalogs, keyed by language.
///
/// # Example
///
/// ```
/// use lingo_catalog::{CatalogStore, LanguageTag};
///
/// let en = LanguageTag::parse("en").unwrap();
/// let mut store = CatalogStore::new();
/// store
///     .load(&en, br#"{"greeting": "Hello"}"#, &lingo_catalog::format::json_unmarshal)
///     .unwrap();
///
/// assert_eq!(store.text("en", "greeting"), Some("Hello"));
/// assert_eq!(store.text("en", "missing"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    languages: HashMap<LanguageTag, LanguageCatalog>,
    plural_rules: HashMap<LanguageTag, PluralRule>,
}

impl CatalogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `raw` with `parse` and merge the entries into `language`'s
    /// bucket. Returns the number of entries merged.
    pub fn load<F>(&mut self, language: &LanguageTag, raw: &[u8], parse: &F) -> Result<usize>
    where
        F: Fn(&[u8]) -> std::result::Result<MessageTree, crate::error::BoxError> + ?Sized,
    {
        let _span = tracing::debug_span!("catalog.load", language = %language).entered();

        let tree = parse(raw).map_err(|source| CatalogError::Parse {
            language: language.to_string(),
            source,
        })?;
        let entries = tree.into_entries().map_err(|err| match err {
            FlattenError::Duplicate { id } => CatalogError::DuplicateKey {
                language: language.to_string(),
                key: id,
            },
            other => CatalogError::parse(language.as_str(), other),
        })?;

        let bucket = self.bucket_mut(language);
        let before = bucket.len();
        let merged = bucket.merge(entries);
        let overridden = before + merged - bucket.len();

        tracing::debug!(
            target: "lingo.catalog",
            language = %language,
            entries = merged,
            overridden = overridden,
            "catalog merged"
        );
        Ok(merged)
    }

    /// Read `path` through `loader`, then [`load`](Self::load) it.
    pub fn load_from<L, F>(
        &mut self,
        loader: &L,
        path: &Path,
        language: &LanguageTag,
        parse: &F,
    ) -> Result<usize>
    where
        L: Loader + ?Sized,
        F: Fn(&[u8]) -> std::result::Result<MessageTree, crate::error::BoxError> + ?Sized,
    {
        let raw = loader
            .load_message(path)
            .map_err(|source| CatalogError::load(path, source))?;
        self.load(language, &raw, parse)
    }

    /// Add an in-memory catalog for `language`, merging with any existing
    /// bucket.
    pub fn add_language(&mut self, language: LanguageTag, catalog: LanguageCatalog) {
        let bucket = self.bucket_mut(&language);
        bucket.entries.extend(catalog.entries);
    }

    /// Override the plural rule derived from the tag.
    pub fn set_plural_rule(&mut self, language: LanguageTag, rule: PluralRule) {
        self.plural_rules.insert(language, rule);
    }

    fn bucket_mut(&mut self, language: &LanguageTag) -> &mut LanguageCatalog {
        self.plural_rules
            .entry(language.clone())
            .or_insert_with(|| PluralRule::for_locale(language.as_str()));
        self.languages.entry(language.clone()).or_default()
    }

    /// The cardinal plural rule for `language`.
    #[must_use]
    pub fn plural_rule(&self, language: &str) -> PluralRule {
        self.plural_rules
            .get(language)
            .copied()
            .unwrap_or_else(|| PluralRule::for_locale(language))
    }

    #[must_use]
    pub fn catalog(&self, language: &str) -> Option<&LanguageCatalog> {
        self.languages.get(language)
    }

    /// Look up an entry in exactly one language (no fallback).
    #[must_use]
    pub fn entry(&self, language: &str, id: &str) -> Option<&CatalogEntry> {
        self.languages.get(language).and_then(|c| c.get(id))
    }

    /// Shorthand for the [`default_text`](CatalogEntry::default_text) of an
    /// entry in exactly one language.
    #[must_use]
    pub fn text(&self, language: &str, id: &str) -> Option<&str> {
        self.entry(language, id).and_then(CatalogEntry::default_text)
    }

    #[must_use]
    pub fn contains_language(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    /// Loaded languages, sorted.
    #[must_use]
    pub fn languages(&self) -> Vec<&LanguageTag> {
        let mut tags: Vec<&LanguageTag> = self.languages.keys().collect();
        tags.sort_unstable();
        tags
    }

    // -----------------------------------------------------------------
    // Coverage
    // -----------------------------------------------------------------

    /// Ids of `reference` that `language` does not define itself, sorted.
    #[must_use]
    pub fn missing_keys(&self, language: &str, reference: &str) -> Vec<String> {
        let Some(reference) = self.languages.get(reference) else {
            return Vec::new();
        };
        let own = self.languages.get(language);
        let mut missing: Vec<String> = reference
            .ids()
            .filter(|id| !own.is_some_and(|c| c.contains(id)))
            .map(String::from)
            .collect();
        missing.sort_unstable();
        missing
    }

    /// Coverage of every loaded language against the ids of `reference`.
    #[must_use]
    pub fn coverage_report(&self, reference: &str) -> CoverageReport {
        let total = self.languages.get(reference).map_or(0, LanguageCatalog::len);
        let languages = self
            .languages()
            .into_iter()
            .map(|tag| {
                let missing = self.missing_keys(tag.as_str(), reference);
                let present = total.saturating_sub(missing.len());
                let coverage_percent = if total == 0 {
                    100.0
                } else {
                    (present as f32 / total as f32) * 100.0
                };
                LanguageCoverage {
                    language: tag.clone(),
                    present,
                    missing,
                    coverage_percent,
                }
            })
            .collect();
        CoverageReport {
            total_keys: total,
            languages,
        }
    }
}

/// How completely each language covers a reference language.
#[derive(Debug, Clone)]
pub struct CoverageReport {
    /// Number of ids in the reference language.
    pub total_keys: usize,
    /// Per-language coverage, sorted by tag.
    pub languages: Vec<LanguageCoverage>,
}

impl CoverageReport {
    /// Languages missing at least one reference id.
    pub fn incomplete(&self) -> impl Iterator<Item = &LanguageCoverage> {
        self.languages.iter().filter(|c| !c.missing.is_empty())
    }
}

/// Coverage of one language.
#[derive(Debug, Clone)]
pub struct LanguageCoverage {
    pub language: LanguageTag,
    /// Reference ids defined by this language.
    pub present: usize,
    /// Reference ids this language lacks (they resolve via fallback).
    pub missing: Vec<String>,
    /// 0.0–100.0
    pub coverage_percent: f32,
}
