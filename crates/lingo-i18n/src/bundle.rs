//! Catalog loading at initialization.

use std::sync::Arc;

use lingo_catalog::CatalogStore;

use crate::cache::ResolverCache;
use crate::config::BundleConfig;
use crate::error::Result;

/// Load every configured catalog and build the resolver cache.
///
/// The default language is loaded even when it is missing from
/// `accept_language`. The first failing catalog aborts initialization.
pub fn load_bundle(config: &BundleConfig) -> Result<ResolverCache> {
    let _span = tracing::debug_span!(
        "i18n.init",
        root = %config.root_path.display(),
        format = %config.format_bundle_file
    )
    .entered();

    let parse = config.resolve_unmarshal()?;
    let languages = config.languages_to_load();

    let mut store = CatalogStore::new();
    let mut entries = 0usize;
    for language in &languages {
        let path = config.catalog_path(language);
        entries += store.load_from(config.loader.as_ref(), &path, language, parse.as_ref())?;
    }

    let report = store.coverage_report(config.default_language.as_str());
    for coverage in report.incomplete() {
        tracing::debug!(
            target: "lingo.init",
            language = %coverage.language,
            missing = coverage.missing.len(),
            coverage_percent = coverage.coverage_percent,
            "catalog incomplete, missing ids resolve through the default language"
        );
    }

    tracing::info!(
        target: "lingo.init",
        languages = languages.len(),
        entries,
        default = %config.default_language,
        "i18n bundle loaded"
    );

    Ok(ResolverCache::build(
        Arc::new(store),
        &config.accept_language,
        &config.default_language,
    ))
}
