//! Message resolution against an ordered candidate list.
//!
//! # Resolution order
//!
//! 1. The requested language, if its catalog defines the id.
//! 2. The default language.
//! 3. The request's default message, if it carries one.
//! 4. [`I18nError::MessageNotFound`].
//!
//! A candidate that defines the id ends the search even when rendering then
//! fails: a plural entry lacking the selected form is a
//! [`TemplateError::MissingPluralForm`], not a reason to try the next
//! language.

use std::sync::Arc;

use lingo_catalog::{
    CatalogEntry, CatalogStore, LanguageTag, PluralCategory, TemplateError, template,
};

use crate::error::{I18nError, Result};
use crate::request::{LocalizeConfig, LookupRequest};

/// Resolves messages for one requested language.
///
/// Immutable once built and cheap to clone; the store is shared.
#[derive(Debug, Clone)]
pub struct Resolver {
    candidates: Vec<LanguageTag>,
    store: Arc<CatalogStore>,
}

impl Resolver {
    /// Resolver trying `requested`, then `default`. Equal tags collapse to a
    /// single candidate.
    #[must_use]
    pub fn new(store: Arc<CatalogStore>, requested: LanguageTag, default: &LanguageTag) -> Self {
        let mut candidates = vec![requested];
        if candidates[0] != *default {
            candidates.push(default.clone());
        }
        Self { candidates, store }
    }

    /// Candidate languages in lookup order.
    #[must_use]
    pub fn candidates(&self) -> &[LanguageTag] {
        &self.candidates
    }

    /// The requested language (first candidate).
    #[must_use]
    pub fn language(&self) -> &LanguageTag {
        &self.candidates[0]
    }

    /// Resolve `request` to its final text.
    ///
    /// # Errors
    ///
    /// - [`I18nError::UnsupportedParamType`] for an empty message id.
    /// - [`I18nError::MessageNotFound`] when no candidate defines the id and
    ///   no default message was supplied.
    /// - [`I18nError::Template`] when the selected form cannot be rendered
    ///   with the supplied data.
    pub fn localize(&self, request: &LookupRequest) -> Result<String> {
        request.validate()?;
        let id = request.message_id();

        for (rank, language) in self.candidates.iter().enumerate() {
            let Some(entry) = self.store.entry(language.as_str(), id) else {
                continue;
            };
            if rank > 0 {
                tracing::trace!(
                    target: "lingo.resolve",
                    message_id = id,
                    requested = %self.language(),
                    resolved = %language,
                    "fallback hit"
                );
            }
            return self.render(entry, language, request);
        }

        if let LookupRequest::Structured(LocalizeConfig {
            default_message: Some(entry),
            ..
        }) = request
        {
            let language = self.default_language();
            tracing::debug!(
                target: "lingo.resolve",
                message_id = id,
                language = %language,
                "using default message"
            );
            return self.render(entry, language, request);
        }

        tracing::debug!(
            target: "lingo.resolve",
            message_id = id,
            requested = %self.language(),
            "message not found"
        );
        Err(I18nError::MessageNotFound {
            message_id: id.to_owned(),
            languages: self.candidates.clone(),
        })
    }

    /// Best-effort [`localize`](Self::localize): any error yields `""`.
    ///
    /// The swallowed error is logged at `warn` on `lingo.resolve`.
    #[must_use]
    pub fn must_localize(&self, request: &LookupRequest) -> String {
        self.localize(request).unwrap_or_else(|err| {
            tracing::warn!(
                target: "lingo.resolve",
                message_id = request.message_id(),
                language = %self.language(),
                error = %err,
                "localization failed, returning empty string"
            );
            String::new()
        })
    }

    fn default_language(&self) -> &LanguageTag {
        // Never empty: `new` always pushes the requested tag.
        &self.candidates[self.candidates.len() - 1]
    }

    fn render(
        &self,
        entry: &CatalogEntry,
        language: &LanguageTag,
        request: &LookupRequest,
    ) -> Result<String> {
        let template_error = |source: TemplateError| I18nError::Template {
            message_id: request.message_id().to_owned(),
            language: language.clone(),
            source,
        };

        match request {
            LookupRequest::Plain(_) => entry.default_text().map(str::to_owned).ok_or_else(|| {
                template_error(TemplateError::MissingPluralForm {
                    category: PluralCategory::Other,
                })
            }),
            LookupRequest::Structured(config) => {
                let text = self
                    .select_form(entry, language, config)
                    .map_err(template_error)?;
                template::render(text, &config.render_data()).map_err(template_error)
            }
        }
    }

    fn select_form<'e>(
        &self,
        entry: &'e CatalogEntry,
        language: &LanguageTag,
        config: &LocalizeConfig,
    ) -> std::result::Result<&'e str, TemplateError> {
        match entry {
            CatalogEntry::Simple(text) => Ok(text),
            CatalogEntry::Plural(forms) => {
                let category = config.plural_count.map_or(PluralCategory::Other, |count| {
                    self.store.plural_rule(language.as_str()).categorize(count)
                });
                forms
                    .form(category)
                    .ok_or(TemplateError::MissingPluralForm { category })
            }
        }
    }
}
