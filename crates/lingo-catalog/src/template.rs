//! Single-pass `{name}` templates.
//!
//! # Syntax
//!
//! | Source | Output |
//! |--------|--------|
//! | `{name}` | value of `name` in the template data |
//! | `{{` | literal `{` |
//! | `}}` | literal `}` |
//!
//! Whitespace inside braces is ignored (`{ name }` equals `{name}`).
//!
//! # Invariants
//!
//! 1. **Non-recursive**: substituted values are copied verbatim and never
//!    re-scanned, so a value containing `{x}` stays `{x}`.
//! 2. **Strict**: a placeholder without data, an unclosed `{`, a stray `}` or
//!    an empty `{}` is an error rather than being passed through.
//! 3. Unused template data is not an error.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::plural::PluralCategory;

/// Named values substituted into a template.
pub type TemplateData = BTreeMap<String, String>;

/// Template data did not fit the selected message form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("no value supplied for placeholder {{{name}}}")]
    MissingArgument { name: String },

    #[error("unclosed '{{' at byte {offset}")]
    Unclosed { offset: usize },

    #[error("unmatched '}}' at byte {offset}")]
    UnmatchedClose { offset: usize },

    #[error("empty placeholder at byte {offset}")]
    EmptyPlaceholder { offset: usize },

    /// The message has plural forms but none for the selected category.
    #[error("message has no '{category}' plural form")]
    MissingPluralForm { category: PluralCategory },
}

/// Render `template`, substituting every placeholder from `data`.
pub fn render(template: &str, data: &TemplateData) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let bytes = template.as_bytes();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' if bytes.get(i + 1) == Some(&b'{') => {
                out.push_str(&template[literal_start..i]);
                out.push('{');
                i += 2;
                literal_start = i;
            }
            b'}' if bytes.get(i + 1) == Some(&b'}') => {
                out.push_str(&template[literal_start..i]);
                out.push('}');
                i += 2;
                literal_start = i;
            }
            b'{' => {
                out.push_str(&template[literal_start..i]);
                let close = template[i + 1..]
                    .find(['{', '}'])
                    .map(|rel| i + 1 + rel)
                    .filter(|&pos| bytes[pos] == b'}')
                    .ok_or(TemplateError::Unclosed { offset: i })?;
                let name = template[i + 1..close].trim();
                if name.is_empty() {
                    return Err(TemplateError::EmptyPlaceholder { offset: i });
                }
                let value = data.get(name).ok_or_else(|| TemplateError::MissingArgument {
                    name: name.to_owned(),
                })?;
                out.push_str(value);
                i = close + 1;
                literal_start = i;
            }
            b'}' => return Err(TemplateError::UnmatchedClose { offset: i }),
            _ => i += 1,
        }
    }

    out.push_str(&template[literal_start..]);
    Ok(out)
}

/// Placeholder names referenced by `template`, in order of appearance.
///
/// Escaped braces are skipped; malformed trailing syntax ends the scan.
#[must_use]
pub fn placeholders(template: &str) -> Vec<&str> {
    let bytes = template.as_bytes();
    let mut names = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'{' | b'}' if bytes.get(i + 1) == Some(&bytes[i]) => i += 2,
            b'{' => {
                let Some(rel) = template[i + 1..].find('}') else {
                    break;
                };
                let name = template[i + 1..i + 1 + rel].trim();
                if !name.is_empty() {
                    names.push(name);
                }
                i += rel + 2;
            }
            _ => i += 1,
        }
    }
    names
}
