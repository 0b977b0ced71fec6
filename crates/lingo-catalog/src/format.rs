//! Catalog document trees and the built-in parse functions.
//!
//! A parse function turns raw catalog bytes into a [`MessageTree`]; the tree
//! is then flattened into message entries by [`MessageTree::into_entries`].
//! The flattening rules are format-independent:
//!
//! ```toml
//! greeting = "Hello"              # plain message "greeting"
//!
//! [unread]                        # table with reserved keys: a message
//! description = "inbox counter"
//! one = "{PluralCount} unread message"
//! other = "{PluralCount} unread messages"
//!
//! [errors]                        # table without reserved keys: a namespace
//! missing = "Not found"           # message "errors.missing"
//! ```
//!
//! Reserved keys (case-insensitive): `id`, `description`, `hash`,
//! `leftdelim`, `rightdelim`, `translation`, `zero`, `one`, `two`, `few`,
//! `many`, `other`.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::catalog::CatalogEntry;
use crate::error::BoxError;
use crate::plural::{PluralCategory, PluralForms};

/// Parsed but not yet flattened catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum MessageTree {
    Text(String),
    Table(BTreeMap<String, MessageTree>),
}

/// Pluggable parse function: raw catalog bytes to a document tree.
pub type UnmarshalFn = Arc<dyn Fn(&[u8]) -> Result<MessageTree, BoxError> + Send + Sync>;

const METADATA_KEYS: [&str; 5] = ["id", "description", "hash", "leftdelim", "rightdelim"];

fn is_metadata(key: &str) -> bool {
    METADATA_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn is_reserved(key: &str) -> bool {
    is_metadata(key)
        || key.eq_ignore_ascii_case("translation")
        || PluralCategory::from_keyword(key).is_some()
}

/// Why a tree could not be flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlattenError {
    /// The document root was a bare string.
    RootNotTable,
    /// A message table carried no translated text.
    EmptyMessage { id: String },
    /// Two paths produced the same message id.
    Duplicate { id: String },
    /// A message table mixed a non-reserved key in with its reserved ones.
    UnknownKey { id: String, key: String },
}

impl fmt::Display for FlattenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotTable => f.write_str("catalog root must be a table"),
            Self::EmptyMessage { id } => write!(f, "message '{id}' has no translation"),
            Self::Duplicate { id } => write!(f, "duplicate message id '{id}'"),
            Self::UnknownKey { id, key } => {
                write!(f, "message '{id}' has unknown key '{key}'")
            }
        }
    }
}

impl std::error::Error for FlattenError {}

impl MessageTree {
    /// Flatten into `(message id, entry)` pairs, sorted by id.
    pub fn into_entries(self) -> Result<Vec<(String, CatalogEntry)>, FlattenError> {
        let Self::Table(root) = self else {
            return Err(FlattenError::RootNotTable);
        };
        let mut out = BTreeMap::new();
        flatten_table(root, "", &mut out)?;
        Ok(out.into_iter().collect())
    }

    fn is_message(table: &BTreeMap<String, MessageTree>) -> bool {
        table.keys().any(|k| is_reserved(k))
            && table.values().all(|v| matches!(v, MessageTree::Text(_)))
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_owned()
    } else {
        format!("{prefix}.{key}")
    }
}

fn insert(
    out: &mut BTreeMap<String, CatalogEntry>,
    id: String,
    entry: CatalogEntry,
) -> Result<(), FlattenError> {
    if out.contains_key(&id) {
        return Err(FlattenError::Duplicate { id });
    }
    out.insert(id, entry);
    Ok(())
}

fn flatten_table(
    table: BTreeMap<String, MessageTree>,
    prefix: &str,
    out: &mut BTreeMap<String, CatalogEntry>,
) -> Result<(), FlattenError> {
    for (key, node) in table {
        let path = join(prefix, &key);
        match node {
            MessageTree::Text(text) => insert(out, path, CatalogEntry::Simple(text))?,
            MessageTree::Table(child) if MessageTree::is_message(&child) => {
                let (id, entry) = message_from_table(path, child)?;
                insert(out, id, entry)?;
            }
            MessageTree::Table(child) => flatten_table(child, &path, out)?,
        }
    }
    Ok(())
}

fn message_from_table(
    path: String,
    table: BTreeMap<String, MessageTree>,
) -> Result<(String, CatalogEntry), FlattenError> {
    let mut id = None;
    let mut forms = PluralForms::default();
    for (key, node) in table {
        // is_message guarantees every value is text.
        let MessageTree::Text(text) = node else {
            continue;
        };
        if key.eq_ignore_ascii_case("id") {
            id = Some(text);
        } else if key.eq_ignore_ascii_case("translation") {
            forms.other.get_or_insert(text);
        } else if let Some(category) = PluralCategory::from_keyword(&key) {
            *forms.slot_mut(category) = Some(text);
        } else if !is_metadata(&key) {
            return Err(FlattenError::UnknownKey { id: path, key });
        }
        // description, hash and delimiters are translator metadata.
    }
    let id = id.unwrap_or(path);
    if forms.is_empty() {
        return Err(FlattenError::EmptyMessage { id });
    }
    let entry = if forms.is_plural() {
        CatalogEntry::Plural(forms)
    } else {
        CatalogEntry::Simple(forms.other.unwrap_or_default())
    };
    Ok((id, entry))
}

/// Parse TOML catalog bytes.
#[cfg(feature = "toml")]
pub fn toml_unmarshal(bytes: &[u8]) -> Result<MessageTree, BoxError> {
    let text = std::str::from_utf8(bytes)?;
    Ok(toml::from_str(text)?)
}

/// Parse JSON catalog bytes.
#[cfg(feature = "json")]
pub fn json_unmarshal(bytes: &[u8]) -> Result<MessageTree, BoxError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Parse YAML catalog bytes.
#[cfg(feature = "yaml")]
pub fn yaml_unmarshal(bytes: &[u8]) -> Result<MessageTree, BoxError> {
    Ok(serde_yaml::from_slice(bytes)?)
}

/// Built-in parse function for a format discriminator (`"toml"`, `"json"`,
/// `"yaml"`/`"yml"`), if the corresponding feature is enabled.
#[must_use]
pub fn unmarshal_for_format(format: &str) -> Option<UnmarshalFn> {
    match format.to_ascii_lowercase().as_str() {
        #[cfg(feature = "toml")]
        "toml" => Some(Arc::new(toml_unmarshal)),
        #[cfg(feature = "json")]
        "json" => Some(Arc::new(json_unmarshal)),
        #[cfg(feature = "yaml")]
        "yaml" | "yml" => Some(Arc::new(yaml_unmarshal)),
        _ => None,
    }
}
