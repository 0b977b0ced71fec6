//! Lookup requests.
//!
//! A lookup is either a bare message id or a [`LocalizeConfig`]; there is no
//! third shape. Typed callers get that guarantee from the compiler. Dynamic
//! callers (template engines, scripting bridges) go through
//! [`LookupRequest::try_from`] on a JSON value, which rejects anything else
//! with [`I18nError::UnsupportedParamType`].

use std::fmt;

use lingo_catalog::{CatalogEntry, TemplateData};
use serde_json::Value;

use crate::error::I18nError;

/// Template key under which the plural count is exposed when the caller did
/// not supply one.
pub const PLURAL_COUNT_KEY: &str = "PluralCount";

/// A message lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupRequest {
    /// Bare message id: returned verbatim, no template substitution.
    Plain(String),
    /// Message id with template data and an optional plural count.
    Structured(LocalizeConfig),
}

impl LookupRequest {
    #[must_use]
    pub fn message_id(&self) -> &str {
        match self {
            Self::Plain(id) => id,
            Self::Structured(config) => &config.message_id,
        }
    }

    /// Reject requests that cannot be resolved before any catalog is consulted.
    pub(crate) fn validate(&self) -> Result<(), I18nError> {
        if self.message_id().trim().is_empty() {
            return Err(I18nError::UnsupportedParamType(
                "empty message id".to_owned(),
            ));
        }
        Ok(())
    }
}

impl From<&str> for LookupRequest {
    fn from(id: &str) -> Self {
        Self::Plain(id.to_owned())
    }
}

impl From<String> for LookupRequest {
    fn from(id: String) -> Self {
        Self::Plain(id)
    }
}

impl From<&String> for LookupRequest {
    fn from(id: &String) -> Self {
        Self::Plain(id.clone())
    }
}

impl From<LocalizeConfig> for LookupRequest {
    fn from(config: LocalizeConfig) -> Self {
        Self::Structured(config)
    }
}

/// Accepts a JSON string (bare id) or an object with `MessageID` and optional
/// `TemplateData` (object of scalars) and `PluralCount` (integer).
impl TryFrom<Value> for LookupRequest {
    type Error = I18nError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(id) => Ok(Self::Plain(id)),
            Value::Object(mut map) => {
                let Some(Value::String(id)) = map.remove("MessageID") else {
                    return Err(unsupported("object without a string MessageID"));
                };
                let mut config = LocalizeConfig::new(id);
                match map.remove("TemplateData") {
                    None | Some(Value::Null) => {}
                    Some(Value::Object(data)) => {
                        for (key, value) in data {
                            config.template_data.insert(key, scalar_to_string(value)?);
                        }
                    }
                    Some(other) => return Err(unsupported(&other)),
                }
                match map.remove("PluralCount") {
                    None | Some(Value::Null) => {}
                    Some(Value::Number(n)) => {
                        let count = n
                            .as_i64()
                            .ok_or_else(|| unsupported(format!("PluralCount {n}")))?;
                        config.plural_count = Some(count);
                    }
                    Some(other) => return Err(unsupported(&other)),
                }
                if let Some(key) = map.keys().next() {
                    return Err(unsupported(format!("unknown field {key:?}")));
                }
                Ok(Self::Structured(config))
            }
            other => Err(unsupported(&other)),
        }
    }
}

fn unsupported(what: impl fmt::Display) -> I18nError {
    I18nError::UnsupportedParamType(what.to_string())
}

fn scalar_to_string(value: Value) -> Result<String, I18nError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(unsupported(format!("template value {other}"))),
    }
}

/// Structured lookup: id, template data, plural count, and a default message
/// used when no candidate language defines the id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizeConfig {
    pub message_id: String,
    pub template_data: TemplateData,
    pub plural_count: Option<i64>,
    pub default_message: Option<CatalogEntry>,
}

impl LocalizeConfig {
    #[must_use]
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            ..Self::default()
        }
    }

    /// Add one template value.
    #[must_use]
    pub fn arg(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.template_data.insert(name.into(), value.to_string());
        self
    }

    /// Replace the template data.
    #[must_use]
    pub fn template_data(mut self, data: TemplateData) -> Self {
        self.template_data = data;
        self
    }

    #[must_use]
    pub fn plural_count(mut self, count: i64) -> Self {
        self.plural_count = Some(count);
        self
    }

    #[must_use]
    pub fn default_message(mut self, entry: impl Into<CatalogEntry>) -> Self {
        self.default_message = Some(entry.into());
        self
    }

    /// Template data as rendered: the caller's data plus
    /// [`PLURAL_COUNT_KEY`] when a count is set and the key is free.
    pub(crate) fn render_data(&self) -> std::borrow::Cow<'_, TemplateData> {
        match self.plural_count {
            Some(count) if !self.template_data.contains_key(PLURAL_COUNT_KEY) => {
                let mut data = self.template_data.clone();
                data.insert(PLURAL_COUNT_KEY.to_owned(), count.to_string());
                std::borrow::Cow::Owned(data)
            }
            _ => std::borrow::Cow::Borrowed(&self.template_data),
        }
    }
}
