//! Normalized language tags.
//!
//! A [`LanguageTag`] is the canonical BCP-47 rendering of a locale string as
//! produced by `unic-langid`: lowercase language, titlecase script, uppercase
//! region, `-` separators. Two tags are equal iff their canonical forms are
//! byte-equal, so `en_us`, `EN-us` and `en-US` all name the same bucket.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::error::CatalogError;

/// Canonical locale identifier (e.g. `"en"`, `"en-US"`, `"zh-Hant"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Parse and normalize a locale string.
    ///
    /// Accepts `-` or `_` separators and any casing. Empty input and strings
    /// that are not well-formed language identifiers are rejected.
    pub fn parse(input: &str) -> Result<Self, CatalogError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::InvalidLanguage(input.to_owned()));
        }
        let id: LanguageIdentifier = trimmed
            .parse()
            .map_err(|_| CatalogError::InvalidLanguage(input.to_owned()))?;
        Ok(Self(id.to_string()))
    }

    /// The canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary language subtag (`"en"` for `"en-US"`).
    #[must_use]
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

/// `en`, the conventional root fallback language.
impl Default for LanguageTag {
    fn default() -> Self {
        Self("en".to_owned())
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LanguageTag {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LanguageTag {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for LanguageTag {
    type Error = CatalogError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<LanguageTag> for String {
    fn from(tag: LanguageTag) -> Self {
        tag.0
    }
}

impl AsRef<str> for LanguageTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Hash/Eq are derived from the single `String` field, so map lookups by
// `&str` agree with lookups by `&LanguageTag`.
impl Borrow<str> for LanguageTag {
    fn borrow(&self) -> &str {
        &self.0
    }
}
