#![no_main]

use std::sync::{Arc, OnceLock};

use libfuzzer_sys::fuzz_target;
use lingo_i18n::{CatalogStore, LanguageCatalog, LanguageTag, ResolverCache};

fn cache() -> &'static ResolverCache {
    static CACHE: OnceLock<ResolverCache> = OnceLock::new();
    CACHE.get_or_init(|| {
        let tags: Vec<LanguageTag> = ["en", "de", "pt-BR", "zh-Hant"]
            .iter()
            .filter_map(|s| LanguageTag::parse(s).ok())
            .collect();
        let mut store = CatalogStore::new();
        for tag in &tags {
            let mut catalog = LanguageCatalog::new();
            catalog.insert("hello", format!("hello {tag}"));
            store.add_language(tag.clone(), catalog);
        }
        ResolverCache::build(Arc::new(store), &tags[1..], &tags[0])
    })
}

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };
    if input.len() > 256 {
        return;
    }

    // Total: every input maps to a resolver ending in the default language.
    let cache = cache();
    let resolver = cache.get(input);
    assert_eq!(resolver.candidates().last(), Some(cache.default_language()));
    assert!(resolver.candidates().len() <= 2);

    // "hello" exists everywhere, so resolution must succeed.
    let text = resolver.localize(&"hello".into()).unwrap();
    assert_eq!(text, format!("hello {}", resolver.language()));
});
