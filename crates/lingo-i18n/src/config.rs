//! Bundle configuration.
//!
//! [`BundleConfig`] is the full runtime configuration, including the
//! pluggable parse function and byte loader. [`BundleSettings`] is its
//! serde-friendly subset, loadable from TOML or JSON at startup:
//!
//! ```toml
//! # i18n.toml
//! root_path = "assets/localize"
//! format_bundle_file = "toml"
//! default_language = "en"
//! accept_language = ["en", "de", "fr"]
//! ```
//!
//! ```rust,ignore
//! let config = BundleSettings::from_toml_file("i18n.toml")?.into_config()?;
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lingo_catalog::{FsLoader, LanguageTag, Loader, UnmarshalFn, unmarshal_for_format};
use serde::{Deserialize, Serialize};

use crate::error::{I18nError, Result};

pub const DEFAULT_ROOT_PATH: &str = "./localize";
pub const DEFAULT_FORMAT_BUNDLE_FILE: &str = "yaml";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_ACCEPT_LANGUAGE: [&str; 2] = ["en", "zh"];

/// Everything needed to load catalogs and build resolvers.
#[derive(Clone)]
pub struct BundleConfig {
    /// Directory holding one catalog file per language.
    pub root_path: PathBuf,
    /// Format discriminator; also the catalog file extension.
    pub format_bundle_file: String,
    /// Fallback language. Its catalog must load.
    pub default_language: LanguageTag,
    /// Languages to preload and cache resolvers for, in order.
    pub accept_language: Vec<LanguageTag>,
    /// Parse function. `None` selects the built-in one for the format.
    pub unmarshal: Option<UnmarshalFn>,
    /// Byte source for catalog files.
    pub loader: Arc<dyn Loader>,
}

impl fmt::Debug for BundleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BundleConfig")
            .field("root_path", &self.root_path)
            .field("format_bundle_file", &self.format_bundle_file)
            .field("default_language", &self.default_language)
            .field("accept_language", &self.accept_language)
            .field("unmarshal", &self.unmarshal.as_ref().map(|_| "<fn>"))
            .finish_non_exhaustive()
    }
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from(DEFAULT_ROOT_PATH),
            format_bundle_file: DEFAULT_FORMAT_BUNDLE_FILE.to_owned(),
            default_language: LanguageTag::parse(DEFAULT_LANGUAGE).unwrap_or_default(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE
                .iter()
                .filter_map(|s| LanguageTag::parse(s).ok())
                .collect(),
            unmarshal: None,
            loader: Arc::new(FsLoader),
        }
    }
}

impl BundleConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn root_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.root_path = path.into();
        self
    }

    #[must_use]
    pub fn format_bundle_file(mut self, format: impl Into<String>) -> Self {
        self.format_bundle_file = format.into();
        self
    }

    #[must_use]
    pub fn default_language(mut self, tag: LanguageTag) -> Self {
        self.default_language = tag;
        self
    }

    #[must_use]
    pub fn accept_language(mut self, tags: impl IntoIterator<Item = LanguageTag>) -> Self {
        self.accept_language = tags.into_iter().collect();
        self
    }

    #[must_use]
    pub fn unmarshal(mut self, parse: UnmarshalFn) -> Self {
        self.unmarshal = Some(parse);
        self
    }

    #[must_use]
    pub fn loader(mut self, loader: impl Loader + 'static) -> Self {
        self.loader = Arc::new(loader);
        self
    }

    /// Source path of `language`'s catalog: `root_path/<tag>.<format>`.
    #[must_use]
    pub fn catalog_path(&self, language: &LanguageTag) -> PathBuf {
        self.root_path
            .join(format!("{language}.{}", self.format_bundle_file))
    }

    /// The parse function in effect: the configured one, else the built-in
    /// one for `format_bundle_file`.
    pub fn resolve_unmarshal(&self) -> Result<UnmarshalFn> {
        if let Some(parse) = &self.unmarshal {
            return Ok(Arc::clone(parse));
        }
        unmarshal_for_format(&self.format_bundle_file).ok_or_else(|| {
            I18nError::config(format!(
                "no parse function for format {:?}; enable its feature or set `unmarshal`",
                self.format_bundle_file
            ))
        })
    }

    /// Languages to load: accepted languages in order without duplicates,
    /// followed by the default language if it was not listed.
    #[must_use]
    pub fn languages_to_load(&self) -> Vec<LanguageTag> {
        let mut out: Vec<LanguageTag> = Vec::with_capacity(self.accept_language.len() + 1);
        for tag in self
            .accept_language
            .iter()
            .chain(std::iter::once(&self.default_language))
        {
            if !out.contains(tag) {
                out.push(tag.clone());
            }
        }
        out
    }
}

/// File-loadable subset of [`BundleConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleSettings {
    pub root_path: PathBuf,
    pub format_bundle_file: String,
    pub default_language: String,
    pub accept_language: Vec<String>,
}

impl Default for BundleSettings {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from(DEFAULT_ROOT_PATH),
            format_bundle_file: DEFAULT_FORMAT_BUNDLE_FILE.to_owned(),
            default_language: DEFAULT_LANGUAGE.to_owned(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

impl BundleSettings {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| I18nError::config(format!("TOML: {e}")))
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml_str(&read_settings(path.as_ref())?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| I18nError::config(format!("JSON: {e}")))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&read_settings(path.as_ref())?)
    }

    /// Check every field. An empty list means the settings are valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.format_bundle_file.trim().is_empty() {
            errors.push("format_bundle_file must not be empty".into());
        } else if self.format_bundle_file.contains(['/', '\\', '.']) {
            errors.push(format!(
                "format_bundle_file must be a bare extension, got {:?}",
                self.format_bundle_file
            ));
        }

        if LanguageTag::parse(&self.default_language).is_err() {
            errors.push(format!(
                "default_language is not a valid language tag: {:?}",
                self.default_language
            ));
        }

        for (i, lang) in self.accept_language.iter().enumerate() {
            if LanguageTag::parse(lang).is_err() {
                errors.push(format!(
                    "accept_language[{i}] is not a valid language tag: {lang:?}"
                ));
            }
        }

        errors
    }

    /// Validate and convert, using the built-in parse function for the format
    /// and the filesystem loader.
    pub fn into_config(self) -> Result<BundleConfig> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(I18nError::config(errors.join("; ")));
        }
        let default_language = LanguageTag::parse(&self.default_language)?;
        let accept_language = self
            .accept_language
            .iter()
            .map(|s| LanguageTag::parse(s))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(BundleConfig {
            root_path: self.root_path,
            format_bundle_file: self.format_bundle_file,
            default_language,
            accept_language,
            ..BundleConfig::default()
        })
    }
}

fn read_settings(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| I18nError::config(format!("cannot read {}: {e}", path.display())))
}
