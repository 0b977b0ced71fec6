use std::path::PathBuf;

use thiserror::Error;

/// Boxed error returned by pluggable parse functions and loaders.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while building a [`CatalogStore`](crate::CatalogStore).
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The byte source for a catalog could not be read.
    #[error("failed to load catalog {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    /// Catalog bytes were malformed for the declared format.
    #[error("failed to parse catalog for language '{language}': {source}")]
    Parse {
        language: String,
        #[source]
        source: BoxError,
    },

    /// Two paths in one catalog document flattened to the same message id.
    #[error("duplicate message id '{key}' in catalog for language '{language}'")]
    DuplicateKey { language: String, key: String },

    /// A language tag could not be parsed.
    #[error("invalid language tag: {0:?}")]
    InvalidLanguage(String),
}

impl CatalogError {
    #[must_use]
    pub fn parse(language: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Parse {
            language: language.into(),
            source: source.into(),
        }
    }

    #[must_use]
    pub fn load(path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
        Self::Load {
            path: path.into(),
            source: source.into(),
        }
    }

    /// True for errors that mean the catalog bytes themselves were bad.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::DuplicateKey { .. })
    }
}
