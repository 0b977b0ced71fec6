#![forbid(unsafe_code)]

//! Per-request message localization for lingo.
//!
//! At startup, [`I18nBuilder::build`] loads one catalog per configured
//! language (plus the default language) and caches a [`Resolver`] for each.
//! Per request, [`I18n`] extracts a language from the caller's context,
//! picks the cached resolver (the default one for unknown tags) and resolves
//! the message, falling back to the default language when the requested
//! catalog lacks the id.
//!
//! # Role in lingo
//! `lingo-i18n` is the request-facing layer over `lingo-catalog`. Everything
//! it builds is immutable after [`I18nBuilder::build`] returns and is shared
//! across threads without locks.

pub mod binding;
pub mod bundle;
pub mod cache;
pub mod config;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod request;
pub mod resolver;

pub use binding::{
    ExtractLanguageFn, I18n, I18nBuilder, LanguageHints, extract_language_default,
    parse_accept_language,
};
pub use bundle::load_bundle;
pub use cache::ResolverCache;
pub use config::{BundleConfig, BundleSettings};
pub use error::{ErrorKind, I18nError, Result};
pub use request::{LocalizeConfig, LookupRequest, PLURAL_COUNT_KEY};
pub use resolver::Resolver;

pub use lingo_catalog::{
    BoxError, CatalogEntry, CatalogError, CatalogStore, FsLoader, LanguageCatalog, LanguageTag,
    Loader, MemoryLoader, MessageTree, PluralCategory, PluralForms, PluralRule, TemplateData,
    TemplateError, UnmarshalFn,
};
