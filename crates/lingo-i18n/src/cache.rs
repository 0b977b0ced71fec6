//! Per-language resolver cache.
//!
//! Built once from the loaded [`CatalogStore`]; afterwards every lookup is a
//! read of an immutable map. [`ResolverCache::get`] is total: any string,
//! including garbage from a request header, maps to some resolver.

use std::collections::HashMap;
use std::sync::Arc;

use lingo_catalog::{CatalogStore, LanguageTag};

use crate::resolver::Resolver;

#[derive(Debug, Clone)]
pub struct ResolverCache {
    resolvers: HashMap<LanguageTag, Resolver>,
    default: Resolver,
}

impl ResolverCache {
    /// One resolver per accepted tag plus one for `default`.
    #[must_use]
    pub fn build(store: Arc<CatalogStore>, accepted: &[LanguageTag], default: &LanguageTag) -> Self {
        let mut resolvers = HashMap::with_capacity(accepted.len() + 1);
        for tag in accepted {
            resolvers
                .entry(tag.clone())
                .or_insert_with(|| Resolver::new(Arc::clone(&store), tag.clone(), default));
        }
        let default_resolver = Resolver::new(store, default.clone(), default);
        resolvers.insert(default.clone(), default_resolver.clone());

        tracing::debug!(
            target: "lingo.init",
            resolvers = resolvers.len(),
            default = %default,
            "resolver cache built"
        );
        Self {
            resolvers,
            default: default_resolver,
        }
    }

    /// The resolver for `language`, or the default resolver when the tag is
    /// unknown or unparsable.
    #[must_use]
    pub fn get(&self, language: &str) -> &Resolver {
        self.lookup(language).unwrap_or(&self.default)
    }

    /// Whether `language` has its own resolver (not the default fallback).
    #[must_use]
    pub fn contains(&self, language: &str) -> bool {
        self.lookup(language).is_some()
    }

    #[must_use]
    pub fn default_resolver(&self) -> &Resolver {
        &self.default
    }

    #[must_use]
    pub fn default_language(&self) -> &LanguageTag {
        self.default.language()
    }

    /// Cached languages, sorted.
    #[must_use]
    pub fn languages(&self) -> Vec<&LanguageTag> {
        let mut tags: Vec<&LanguageTag> = self.resolvers.keys().collect();
        tags.sort_unstable();
        tags
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    fn lookup(&self, language: &str) -> Option<&Resolver> {
        // Fast path for already-canonical input.
        if let Some(resolver) = self.resolvers.get(language) {
            return Some(resolver);
        }
        let tag = LanguageTag::parse(language).ok()?;
        self.resolvers.get(&tag)
    }
}
