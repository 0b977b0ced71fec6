use std::fmt;

use lingo_catalog::{CatalogError, LanguageTag, TemplateError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, I18nError>;

/// Errors from building an [`I18n`](crate::I18n) or resolving a message.
#[derive(Debug, Error)]
pub enum I18nError {
    /// Catalog loading or parsing failed during initialization.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The lookup request was neither a message id nor a structured request.
    #[error("unsupported localize param: {0}")]
    UnsupportedParamType(String),

    /// The id is absent from every candidate language.
    #[error("message \"{message_id}\" not found in language(s) {}", LanguageList(.languages))]
    MessageNotFound {
        message_id: String,
        languages: Vec<LanguageTag>,
    },

    /// Template data did not fit the selected message form.
    #[error("cannot render message \"{message_id}\" in {language}: {source}")]
    Template {
        message_id: String,
        language: LanguageTag,
        #[source]
        source: TemplateError,
    },

    /// Bundle settings were invalid.
    #[error("invalid i18n configuration: {0}")]
    Config(String),
}

/// Flat classification of [`I18nError`] for matching and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Load,
    Parse,
    InvalidLanguage,
    Config,
    UnsupportedParamType,
    MessageNotFound,
    Template,
}

impl I18nError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Catalog(CatalogError::Load { .. }) => ErrorKind::Load,
            Self::Catalog(CatalogError::InvalidLanguage(_)) => ErrorKind::InvalidLanguage,
            Self::Catalog(_) => ErrorKind::Parse,
            Self::Config(_) => ErrorKind::Config,
            Self::UnsupportedParamType(_) => ErrorKind::UnsupportedParamType,
            Self::MessageNotFound { .. } => ErrorKind::MessageNotFound,
            Self::Template { .. } => ErrorKind::Template,
        }
    }

    /// Whether this error can only occur while building the bundle.
    #[must_use]
    pub fn is_init_error(&self) -> bool {
        matches!(self, Self::Catalog(_) | Self::Config(_))
    }

    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

struct LanguageList<'a>(&'a [LanguageTag]);

impl fmt::Display for LanguageList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{tag}")?;
        }
        Ok(())
    }
}
