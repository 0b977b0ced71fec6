//! Binding requests to languages.
//!
//! [`I18n<C>`] pairs the shared [`ResolverCache`] with a language extraction
//! function over some request context `C`. The context is an explicit
//! argument of every call and is never stored, so one `I18n` serves any
//! number of concurrent requests.
//!
//! ```
//! use lingo_i18n::{BundleConfig, I18n, LanguageTag, LocalizeConfig, MemoryLoader};
//!
//! struct Request {
//!     lang: &'static str,
//! }
//!
//! let loader = MemoryLoader::new()
//!     .with_file("localize/en.json", r#"{"welcome": "Welcome {Name}"}"#)
//!     .with_file("localize/de.json", r#"{"welcome": "Willkommen {Name}"}"#);
//! let config = BundleConfig::new()
//!     .format_bundle_file("json")
//!     .root_path("localize")
//!     .accept_language([LanguageTag::parse("de").unwrap()])
//!     .loader(loader);
//!
//! let i18n = I18n::<Request>::builder()
//!     .bundle(config)
//!     .extract_language(|req: &Request, _default: &str| req.lang.to_owned())
//!     .build()
//!     .unwrap();
//!
//! let msg = i18n
//!     .get_message(&Request { lang: "de" }, LocalizeConfig::new("welcome").arg("Name", "Ann"))
//!     .unwrap();
//! assert_eq!(msg, "Willkommen Ann");
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use lingo_catalog::LanguageTag;

use crate::bundle::load_bundle;
use crate::cache::ResolverCache;
use crate::config::BundleConfig;
use crate::error::Result;
use crate::request::LookupRequest;
use crate::resolver::Resolver;

/// Query parameter consulted by [`extract_language_default`].
pub const LANGUAGE_QUERY_PARAM: &str = "lng";

/// Header consulted by [`extract_language_default`].
pub const ACCEPT_LANGUAGE_HEADER: &str = "Accept-Language";

/// Language extraction function: `(context, default) -> tag`.
pub type ExtractLanguageFn<C> = Arc<dyn Fn(&C, &str) -> String + Send + Sync>;

/// Per-request localizer over context type `C`.
pub struct I18n<C> {
    cache: Arc<ResolverCache>,
    extract: ExtractLanguageFn<C>,
    // `fn(&C)` keeps `I18n<C>` Send + Sync whatever `C` is.
    _context: PhantomData<fn(&C)>,
}

impl<C> Clone for I18n<C> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            extract: Arc::clone(&self.extract),
            _context: PhantomData,
        }
    }
}

impl<C> fmt::Debug for I18n<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I18n")
            .field("languages", &self.cache.languages())
            .field("default", self.cache.default_language())
            .finish_non_exhaustive()
    }
}

impl<C: 'static> I18n<C> {
    #[must_use]
    pub fn builder() -> I18nBuilder<C> {
        I18nBuilder::new()
    }
}

impl<C> I18n<C> {
    /// Wrap an already built cache.
    #[must_use]
    pub fn from_cache(cache: ResolverCache, extract: ExtractLanguageFn<C>) -> Self {
        Self {
            cache: Arc::new(cache),
            extract,
            _context: PhantomData,
        }
    }

    /// Resolve `request` in the language extracted from `ctx`.
    pub fn get_message(&self, ctx: &C, request: impl Into<LookupRequest>) -> Result<String> {
        self.resolver_for_context(ctx).localize(&request.into())
    }

    /// Best-effort [`get_message`](Self::get_message): `""` on any error,
    /// logged at `warn`.
    #[must_use]
    pub fn must_get_message(&self, ctx: &C, request: impl Into<LookupRequest>) -> String {
        self.resolver_for_context(ctx).must_localize(&request.into())
    }

    /// The resolver for the language extracted from `ctx`.
    #[must_use]
    pub fn resolver_for_context(&self, ctx: &C) -> &Resolver {
        let default = self.cache.default_language().as_str();
        let language = (self.extract)(ctx, default);
        self.cache.get(&language)
    }

    /// Normalized form of the language extracted from `ctx`, when it parses.
    #[must_use]
    pub fn language_for_context(&self, ctx: &C) -> Option<LanguageTag> {
        let default = self.cache.default_language().as_str();
        LanguageTag::parse(&(self.extract)(ctx, default)).ok()
    }

    /// Whether `language` has a cached resolver of its own.
    #[must_use]
    pub fn has_language(&self, language: &str) -> bool {
        self.cache.contains(language)
    }

    #[must_use]
    pub fn cache(&self) -> &ResolverCache {
        &self.cache
    }
}

/// Builder for [`I18n`].
pub struct I18nBuilder<C> {
    config: BundleConfig,
    extract: ExtractLanguageFn<C>,
}

impl<C: 'static> Default for I18nBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> I18nBuilder<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: BundleConfig::default(),
            extract: Arc::new(|_: &C, default: &str| default.to_owned()),
        }
    }

    #[must_use]
    pub fn bundle(mut self, config: BundleConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn extract_language<F>(mut self, extract: F) -> Self
    where
        F: Fn(&C, &str) -> String + Send + Sync + 'static,
    {
        self.extract = Arc::new(extract);
        self
    }

    /// Load every catalog and build the resolver cache.
    ///
    /// # Errors
    ///
    /// Any catalog load or parse failure, or an unusable configuration.
    pub fn build(self) -> Result<I18n<C>> {
        let cache = load_bundle(&self.config)?;
        Ok(I18n::from_cache(cache, self.extract))
    }
}

/// Language hints a request context can expose.
pub trait LanguageHints {
    /// Value of a query parameter, if present.
    fn query_param(&self, name: &str) -> Option<String>;

    /// Value of a header, if present.
    fn header(&self, name: &str) -> Option<String>;
}

/// Default extractor: the `lng` query parameter, then the first tag of
/// `Accept-Language`, then `default`.
pub fn extract_language_default<C: LanguageHints + ?Sized>(ctx: &C, default: &str) -> String {
    if let Some(lng) = ctx.query_param(LANGUAGE_QUERY_PARAM) {
        let lng = lng.trim();
        if !lng.is_empty() {
            return lng.to_owned();
        }
    }
    ctx.header(ACCEPT_LANGUAGE_HEADER)
        .and_then(|header| parse_accept_language(&header).into_iter().next())
        .unwrap_or_else(|| default.to_owned())
}

/// Tags of an `Accept-Language` value in listed order. Quality weights are
/// ignored, as are `*` and empty items.
#[must_use]
pub fn parse_accept_language(header: &str) -> Vec<String> {
    header
        .split(',')
        .filter_map(|item| {
            let tag = item.split(';').next().unwrap_or("").trim();
            (!tag.is_empty() && tag != "*").then(|| tag.to_owned())
        })
        .collect()
}
