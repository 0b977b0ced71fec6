//! Property-based invariant tests for the catalog layer.
//!
//! 1.  Every built-in plural rule returns a category for any count
//! 2.  Plural rules are deterministic
//! 3.  CJK always returns Other
//! 4.  English: One for ±1, Other otherwise
//! 5.  French: One for |n| <= 1, Other otherwise
//! 6.  Negative counts categorize like their absolute value
//! 7.  Templates without braces render unchanged
//! 8.  Substituted values are never re-expanded
//! 9.  A placeholder with data renders exactly once and leaves no braces
//! 10. A placeholder without data is a MissingArgument error
//! 11. PluralForms::select falls back to `other`
//! 12. for_locale and LanguageTag::parse never panic
//! 13. Normalized tags are idempotent under re-parsing
//! 14. Coverage: present + missing == total, percentage in [0, 100]

use lingo_catalog::template::{self, TemplateData, TemplateError};
use lingo_catalog::{
    CatalogStore, LanguageCatalog, LanguageTag, PluralCategory, PluralForms, PluralRule,
};
use proptest::prelude::*;

// ── Helpers ──────────────────────────────────────────────────────────

fn all_built_in_rules() -> Vec<PluralRule> {
    vec![
        PluralRule::English,
        PluralRule::French,
        PluralRule::Russian,
        PluralRule::Polish,
        PluralRule::Czech,
        PluralRule::Arabic,
        PluralRule::CJK,
    ]
}

fn data(pairs: &[(&str, &str)]) -> TemplateData {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

// ═════════════════════════════════════════════════════════════════════════
// 1–2. Rules are total and deterministic
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rules_total_and_deterministic(count in any::<i64>()) {
        for rule in all_built_in_rules() {
            let a = rule.categorize(count);
            let b = rule.categorize(count);
            prop_assert!(PluralCategory::ALL.contains(&a));
            prop_assert_eq!(a, b, "rule {:?} non-deterministic for count {}", rule, count);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. CJK always returns Other
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cjk_always_other(count in any::<i64>()) {
        prop_assert_eq!(PluralRule::CJK.categorize(count), PluralCategory::Other);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. English: One for ±1
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn english_one_or_other(count in any::<i64>()) {
        let cat = PluralRule::English.categorize(count);
        if count == 1 || count == -1 {
            prop_assert_eq!(cat, PluralCategory::One);
        } else {
            prop_assert_eq!(cat, PluralCategory::Other);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. French: One for |n| <= 1
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn french_zero_and_one_are_singular(count in any::<i64>()) {
        let cat = PluralRule::French.categorize(count);
        if count.unsigned_abs() <= 1 {
            prop_assert_eq!(cat, PluralCategory::One);
        } else {
            prop_assert_eq!(cat, PluralCategory::Other);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Negative counts use absolute value
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn negative_matches_positive(count in 0i64..=100_000) {
        for rule in all_built_in_rules() {
            prop_assert_eq!(rule.categorize(count), rule.categorize(-count));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Brace-free templates are identity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn template_without_braces_is_identity(text in "[a-zA-Z0-9 .,!?]*") {
        prop_assert_eq!(template::render(&text, &TemplateData::new()), Ok(text.clone()));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 8. No recursive substitution
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn substituted_values_are_verbatim(value in "[{}a-z ]{0,20}") {
        let out = template::render("<{v}>", &data(&[("v", value.as_str())]));
        prop_assert_eq!(out, Ok(format!("<{value}>")));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 9. Exactly-once substitution, no residual placeholder syntax
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn placeholder_substituted_once(
        prefix in "[a-z ]{0,10}",
        name in "[A-Za-z][A-Za-z0-9_]{0,8}",
        value in "[a-zA-Z]{1,10}",
        suffix in "[a-z ]{0,10}",
    ) {
        let template = format!("{prefix}{{{name}}}{suffix}");
        let out = template::render(&template, &data(&[(name.as_str(), value.as_str())])).unwrap();
        prop_assert_eq!(&out, &format!("{prefix}{value}{suffix}"));
        prop_assert!(
            !out.contains('{') && !out.contains('}'),
            "residual brace in {:?}",
            out
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 10. Missing data is reported, not passed through
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn missing_argument_is_reported(name in "[a-z]{1,10}") {
        let template = format!("Value: {{{name}}}");
        prop_assert_eq!(
            template::render(&template, &TemplateData::new()),
            Err(TemplateError::MissingArgument { name: name.clone() })
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 11. PluralForms::select falls back to other
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn plural_forms_select_falls_back(one in "[a-z]{1,20}", other in "[a-z]{1,20}") {
        let forms = PluralForms::one_other(one.clone(), other.clone());
        for cat in PluralCategory::ALL {
            let selected = forms.select(cat);
            match cat {
                PluralCategory::One => prop_assert_eq!(selected, one.as_str()),
                _ => prop_assert_eq!(selected, other.as_str()),
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 12–13. Tag handling is total; normalization is idempotent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn tag_parsing_never_panics(input in ".*") {
        let _rule = PluralRule::for_locale(&input);
        let _tag = LanguageTag::parse(&input);
    }

    #[test]
    fn normalization_is_idempotent(
        lang in "[a-zA-Z]{2,3}",
        region in proptest::option::of("[a-zA-Z]{2}"),
        sep in "[-_]",
    ) {
        let input = match &region {
            Some(r) => format!("{lang}{sep}{r}"),
            None => lang.clone(),
        };
        if let Ok(tag) = LanguageTag::parse(&input) {
            let again = LanguageTag::parse(tag.as_str()).unwrap();
            prop_assert_eq!(&again, &tag);
            prop_assert_eq!(tag.language(), lang.to_ascii_lowercase());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 14. Coverage bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn coverage_percent_bounded(n_keys in 0usize..=10, n_languages in 1usize..=3) {
        let tags = ["en", "de", "fr"];
        let mut store = CatalogStore::new();
        for (idx, tag) in tags.iter().take(n_languages).enumerate() {
            let mut catalog = LanguageCatalog::new();
            for k in 0..n_keys {
                if k % (idx + 1) == 0 {
                    catalog.insert(format!("key_{k}"), format!("val_{k}"));
                }
            }
            store.add_language(LanguageTag::parse(tag).unwrap(), catalog);
        }

        let report = store.coverage_report("en");
        prop_assert_eq!(report.total_keys, n_keys);
        for lc in &report.languages {
            prop_assert!((0.0..=100.0).contains(&lc.coverage_percent));
            prop_assert_eq!(lc.present + lc.missing.len(), report.total_keys);
        }
    }
}
