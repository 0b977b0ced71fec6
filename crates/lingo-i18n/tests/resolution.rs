//! End-to-end resolution through real catalog files.
//!
//! Catalogs are written to a temp directory and loaded through the default
//! filesystem loader, exactly as an application would at startup.
//!
//! Run:
//!   cargo test -p lingo-i18n --test resolution

use std::path::Path;

use lingo_i18n::{
    BundleConfig, BundleSettings, ErrorKind, I18n, I18nError, LanguageTag, LocalizeConfig,
    LookupRequest, MemoryLoader, PluralForms, TemplateError,
};

// ── Helpers ──────────────────────────────────────────────────────────

fn tag(s: &str) -> LanguageTag {
    LanguageTag::parse(s).unwrap()
}

const EN_TOML: &str = r#"
welcome = "Welcome {Name}"
braces = "{{literal}} {Name}"

[apples]
one = "{PluralCount} apple"
other = "{PluralCount} apples"

[errors]
missing = "Not found"

[errors.auth]
id = "errors.denied"
description = "Shown when a request is rejected"
translation = "Access denied"
"#;

const RU_TOML: &str = r#"
welcome = "Добро пожаловать, {Name}"

[apples]
one = "{PluralCount} яблоко"
few = "{PluralCount} яблока"
many = "{PluralCount} яблок"
other = "{PluralCount} яблока"
"#;

const DE_TOML: &str = r#"
welcome = "Willkommen {Name}"

[apples]
one = "ein Apfel"
"#;

fn write_catalogs(dir: &Path, files: &[(&str, &str)]) {
    for (name, body) in files {
        std::fs::write(dir.join(name), body).unwrap();
    }
}

/// `I18n` keyed by a plain language string as the context.
fn build(dir: &Path) -> I18n<&'static str> {
    write_catalogs(
        dir,
        &[("en.toml", EN_TOML), ("ru.toml", RU_TOML), ("de.toml", DE_TOML)],
    );
    I18n::builder()
        .bundle(
            BundleConfig::new()
                .root_path(dir)
                .format_bundle_file("toml")
                .default_language(tag("en"))
                .accept_language([tag("ru"), tag("de")]),
        )
        .extract_language(|lang: &&'static str, _default: &str| (*lang).to_owned())
        .build()
        .unwrap()
}

// ═════════════════════════════════════════════════════════════════════════
// Fallback
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn accepted_language_gets_its_own_text() {
    let dir = tempfile::tempdir().unwrap();
    let i18n = build(dir.path());
    let msg = i18n
        .get_message(&"ru", LocalizeConfig::new("welcome").arg("Name", "Anna"))
        .unwrap();
    assert_eq!(msg, "Добро пожаловать, Anna");
}

#[test]
fn unaccepted_language_gets_default_text() {
    let dir = tempfile::tempdir().unwrap();
    let i18n = build(dir.path());
    for lang in ["fr", "", "not a tag", "xx-YY"] {
        let msg = i18n
            .get_message(&lang, LocalizeConfig::new("welcome").arg("Name", "Ann"))
            .unwrap();
        assert_eq!(msg, "Welcome Ann", "lang {lang:?}");
    }
}

#[test]
fn id_missing_in_requested_language_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let i18n = build(dir.path());
    assert_eq!(i18n.get_message(&"ru", "errors.missing").unwrap(), "Not found");
    assert_eq!(i18n.get_message(&"de", "errors.denied").unwrap(), "Access denied");
}

#[test]
fn missing_everywhere_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let i18n = build(dir.path());
    let err = i18n.get_message(&"ru", "no.such.id").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MessageNotFound);
    assert_eq!(
        err.to_string(),
        "message \"no.such.id\" not found in language(s) ru, en"
    );
    assert_eq!(i18n.must_get_message(&"ru", "no.such.id"), "");
}

// ═════════════════════════════════════════════════════════════════════════
// Plurals and templates
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn english_plural_selection() {
    let dir = tempfile::tempdir().unwrap();
    let i18n = build(dir.path());
    let apples = |n| LocalizeConfig::new("apples").plural_count(n);
    assert_eq!(i18n.get_message(&"en", apples(1)).unwrap(), "1 apple");
    assert_eq!(i18n.get_message(&"en", apples(2)).unwrap(), "2 apples");
    assert_eq!(i18n.get_message(&"en", apples(0)).unwrap(), "0 apples");
}

#[test]
fn russian_plural_selection() {
    let dir = tempfile::tempdir().unwrap();
    let i18n = build(dir.path());
    let apples = |n| LocalizeConfig::new("apples").plural_count(n);
    assert_eq!(i18n.get_message(&"ru", apples(1)).unwrap(), "1 яблоко");
    assert_eq!(i18n.get_message(&"ru", apples(3)).unwrap(), "3 яблока");
    assert_eq!(i18n.get_message(&"ru", apples(5)).unwrap(), "5 яблок");
    assert_eq!(i18n.get_message(&"ru", apples(11)).unwrap(), "11 яблок");
    assert_eq!(i18n.get_message(&"ru", apples(21)).unwrap(), "21 яблоко");
}

#[test]
fn partial_plural_forms_are_template_errors() {
    let dir = tempfile::tempdir().unwrap();
    let i18n = build(dir.path());
    assert_eq!(
        i18n.get_message(&"de", LocalizeConfig::new("apples").plural_count(1))
            .unwrap(),
        "ein Apfel"
    );
    let err = i18n
        .get_message(&"de", LocalizeConfig::new("apples").plural_count(4))
        .unwrap_err();
    match err {
        I18nError::Template {
            message_id,
            language,
            source,
        } => {
            assert_eq!(message_id, "apples");
            assert_eq!(language, tag("de"));
            assert!(matches!(source, TemplateError::MissingPluralForm { .. }));
        }
        other => panic!("expected template error, got {other:?}"),
    }
}

#[test]
fn placeholder_substituted_exactly_once() {
    let dir = tempfile::tempdir().unwrap();
    let i18n = build(dir.path());
    let msg = i18n
        .get_message(&"en", LocalizeConfig::new("welcome").arg("Name", "{Name}"))
        .unwrap();
    assert_eq!(msg, "Welcome {Name}");

    let msg = i18n
        .get_message(&"en", LocalizeConfig::new("braces").arg("Name", "Ann"))
        .unwrap();
    assert_eq!(msg, "{literal} Ann");
}

#[test]
fn plain_request_skips_templating() {
    let dir = tempfile::tempdir().unwrap();
    let i18n = build(dir.path());
    assert_eq!(i18n.get_message(&"en", "welcome").unwrap(), "Welcome {Name}");
}

#[test]
fn missing_template_data_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let i18n = build(dir.path());
    let err = i18n
        .get_message(&"en", LocalizeConfig::new("welcome"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Template);
    assert_eq!(i18n.must_get_message(&"en", LocalizeConfig::new("welcome")), "");
}

#[test]
fn default_message_used_when_absent() {
    let dir = tempfile::tempdir().unwrap();
    let i18n = build(dir.path());
    let request = LocalizeConfig::new("inbox.unread")
        .plural_count(3)
        .default_message(PluralForms::one_other(
            "One unread message",
            "{PluralCount} unread messages",
        ));
    assert_eq!(
        i18n.get_message(&"ru", request).unwrap(),
        "3 unread messages"
    );
}

#[test]
fn dynamic_requests_are_validated() {
    let dir = tempfile::tempdir().unwrap();
    let i18n = build(dir.path());

    let request = LookupRequest::try_from(serde_json::json!({
        "MessageID": "apples",
        "PluralCount": 2
    }))
    .unwrap();
    assert_eq!(i18n.get_message(&"en", request).unwrap(), "2 apples");

    let err = LookupRequest::try_from(serde_json::json!(17)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedParamType);
}

// ═════════════════════════════════════════════════════════════════════════
// Initialization
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn default_language_loaded_without_being_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let i18n = build(dir.path());
    assert!(i18n.has_language("en"));
    assert!(i18n.has_language("ru"));
    assert!(!i18n.has_language("fr"));
}

#[test]
fn missing_catalog_file_fails_build() {
    let dir = tempfile::tempdir().unwrap();
    write_catalogs(dir.path(), &[("en.toml", EN_TOML)]);
    let err = I18n::<()>::builder()
        .bundle(
            BundleConfig::new()
                .root_path(dir.path())
                .format_bundle_file("toml")
                .accept_language([tag("fr")]),
        )
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Load);
    assert!(err.is_init_error());
}

#[test]
fn malformed_catalog_fails_build() {
    let dir = tempfile::tempdir().unwrap();
    write_catalogs(dir.path(), &[("en.toml", "welcome = ")]);
    let err = I18n::<()>::builder()
        .bundle(
            BundleConfig::new()
                .root_path(dir.path())
                .format_bundle_file("toml")
                .accept_language(Vec::new()),
        )
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn unknown_format_without_parser_fails_build() {
    let err = I18n::<()>::builder()
        .bundle(BundleConfig::new().format_bundle_file("ini"))
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn yaml_and_json_catalogs() {
    let dir = tempfile::tempdir().unwrap();
    write_catalogs(
        dir.path(),
        &[
            ("en.yaml", "greeting: Hello\nnav:\n  home: Home\n"),
            ("zh.yaml", "greeting: 你好\n"),
            ("en.json", r#"{"greeting": "Hello"}"#),
        ],
    );
    let yaml = I18n::<&'static str>::builder()
        .bundle(BundleConfig::new().root_path(dir.path()))
        .extract_language(|lang: &&'static str, _: &str| (*lang).to_owned())
        .build()
        .unwrap();
    assert_eq!(yaml.get_message(&"zh", "greeting").unwrap(), "你好");
    assert_eq!(yaml.get_message(&"zh", "nav.home").unwrap(), "Home");

    let json = I18n::<()>::builder()
        .bundle(
            BundleConfig::new()
                .root_path(dir.path())
                .format_bundle_file("json")
                .accept_language(Vec::new()),
        )
        .build()
        .unwrap();
    assert_eq!(json.get_message(&(), "greeting").unwrap(), "Hello");
}

#[test]
fn custom_loader_and_parser() {
    let loader = MemoryLoader::new().with_file("bundles/en.lines", "greeting=Hi\n");
    let parse: lingo_i18n::UnmarshalFn = std::sync::Arc::new(
        |raw: &[u8]| -> Result<lingo_i18n::MessageTree, lingo_i18n::BoxError> {
            let mut table = std::collections::BTreeMap::new();
            for line in std::str::from_utf8(raw)?.lines() {
                if let Some((key, value)) = line.split_once('=') {
                    table.insert(key.to_owned(), lingo_i18n::MessageTree::Text(value.to_owned()));
                }
            }
            Ok(lingo_i18n::MessageTree::Table(table))
        },
    );
    let i18n = I18n::<()>::builder()
        .bundle(
            BundleConfig::new()
                .root_path("bundles")
                .format_bundle_file("lines")
                .accept_language(Vec::new())
                .unmarshal(parse)
                .loader(loader),
        )
        .build()
        .unwrap();
    assert_eq!(i18n.get_message(&(), "greeting").unwrap(), "Hi");
}

#[test]
fn settings_file_drives_build() {
    let dir = tempfile::tempdir().unwrap();
    write_catalogs(dir.path(), &[("en.toml", EN_TOML), ("de.toml", DE_TOML)]);
    let settings_path = dir.path().join("i18n.toml");
    std::fs::write(
        &settings_path,
        format!(
            "root_path = {:?}\nformat_bundle_file = \"toml\"\naccept_language = [\"de\"]\n",
            dir.path().display().to_string()
        ),
    )
    .unwrap();

    let config = BundleSettings::from_toml_file(&settings_path)
        .unwrap()
        .into_config()
        .unwrap();
    let i18n = I18n::<()>::builder()
        .bundle(config)
        .extract_language(|_: &(), _: &str| "de".to_owned())
        .build()
        .unwrap();
    assert_eq!(
        i18n.get_message(&(), LocalizeConfig::new("welcome").arg("Name", "Jo"))
            .unwrap(),
        "Willkommen Jo"
    );
}
