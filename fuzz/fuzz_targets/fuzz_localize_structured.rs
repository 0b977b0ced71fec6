#![no_main]

use std::sync::{Arc, OnceLock};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lingo_i18n::{
    CatalogStore, LanguageCatalog, LanguageTag, LocalizeConfig, LookupRequest, PluralForms,
    ResolverCache,
};

#[derive(Arbitrary, Debug)]
struct Input {
    language: String,
    message_id: String,
    args: Vec<(String, String)>,
    plural_count: Option<i64>,
    plain: bool,
}

fn cache() -> &'static ResolverCache {
    static CACHE: OnceLock<ResolverCache> = OnceLock::new();
    CACHE.get_or_init(|| {
        let tags: Vec<LanguageTag> = ["en", "ru", "ar", "ja"]
            .iter()
            .filter_map(|s| LanguageTag::parse(s).ok())
            .collect();
        let mut store = CatalogStore::new();
        for tag in &tags {
            let mut catalog = LanguageCatalog::new();
            catalog.insert("greeting", "Hi {Name}{{!}}");
            catalog.insert_plural(
                "items",
                PluralForms::one_other("{PluralCount} item", "{PluralCount} items"),
            );
            store.add_language(tag.clone(), catalog);
        }
        ResolverCache::build(Arc::new(store), &tags[1..], &tags[0])
    })
}

fuzz_target!(|input: Input| {
    if input.args.len() > 16 {
        return;
    }
    let request = if input.plain {
        LookupRequest::from(input.message_id)
    } else {
        let mut config = LocalizeConfig::new(input.message_id);
        config.template_data = input.args.into_iter().collect();
        config.plural_count = input.plural_count;
        LookupRequest::from(config)
    };

    // Errors are fine; panics are not. The best-effort path agrees with the
    // fallible one.
    let resolver = cache().get(&input.language);
    match resolver.localize(&request) {
        Ok(text) => assert_eq!(resolver.must_localize(&request), text),
        Err(_) => assert_eq!(resolver.must_localize(&request), ""),
    }
});
