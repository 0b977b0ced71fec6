#![no_main]

use libfuzzer_sys::fuzz_target;
use lingo_catalog::format::{json_unmarshal, toml_unmarshal, yaml_unmarshal};
use lingo_catalog::{CatalogStore, LanguageTag};

fuzz_target!(|data: &[u8]| {
    if data.len() > 4096 {
        return;
    }
    let Ok(tag) = LanguageTag::parse("en") else {
        return;
    };

    // Arbitrary catalog bytes must produce entries or an error, never a panic.
    for parse in [toml_unmarshal, json_unmarshal, yaml_unmarshal] {
        let mut store = CatalogStore::new();
        if let Ok(merged) = store.load(&tag, data, &parse) {
            let len = store.catalog("en").map_or(0, |c| c.len());
            assert_eq!(merged, len);
        }
    }
});
