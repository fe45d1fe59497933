//! The field annotation mini-language.
//!
//! Annotation text is a comma-separated list of `key:"value"` attributes.
//! Two keys are recognized:
//!
//! - `flat` - the primary naming key. `flat:"-"` excludes the field
//!   unconditionally; `flat:"json"` defers naming to the `json` key; any
//!   other value overrides the output name.
//! - `json` - the interchange fallback name.
//!
//! Unrecognized keys are ignored. Key presence is detected with a cheap
//! substring check; value extraction uses the stricter attribute parser,
//! and presence without an extractable value is a hard error.

use std::sync::Arc;

use crate::error::ExtractError;

/// Primary naming key.
pub const FLAT_KEY: &str = "flat";
/// Interchange fallback key.
pub const JSON_KEY: &str = "json";

const FLAT_PREFIX: &str = "flat:";
const JSON_PREFIX: &str = "json:";
/// `flat:"-"` excludes a field regardless of every other policy.
const EXCLUDE_MARKER: &str = "flat:\"-\"";
/// A `flat` value of `json` means "use the `json` key's value".
const DEFER_KEYWORD: &str = "json";

/// Outcome of resolving one field's annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagResolution {
    /// The field contributes nothing to the output.
    Excluded,
    /// The output name to use for the field.
    Name(Arc<str>),
}

/// Resolve a field's raw annotation text against its declared name.
///
/// Precedence, first match wins:
/// 1. `flat` present with a non-keyword value - that value;
/// 2. `flat` present with the `json` keyword, or `flat` absent but `json`
///    present - the `json` key's value;
/// 3. neither key present - the declared name unchanged.
///
/// With `tag_required`, a field carrying neither key is excluded.
pub fn resolve(
    tag: &str,
    declared: &str,
    tag_required: bool,
) -> Result<TagResolution, ExtractError> {
    if tag.contains(EXCLUDE_MARKER) {
        return Ok(TagResolution::Excluded);
    }

    let has_primary = tag.contains(FLAT_PREFIX);
    let has_secondary = tag.contains(JSON_PREFIX);

    if tag_required && !has_primary && !has_secondary {
        return Ok(TagResolution::Excluded);
    }

    let name = if has_primary {
        let value = key_value(tag, FLAT_KEY, FLAT_PREFIX)?;
        if &*value == DEFER_KEYWORD {
            key_value(tag, JSON_KEY, JSON_PREFIX)?
        } else {
            value
        }
    } else if has_secondary {
        key_value(tag, JSON_KEY, JSON_PREFIX)?
    } else {
        Arc::from(declared)
    };

    Ok(TagResolution::Name(name))
}

/// Strict extraction of `key:"value"` from the attribute list.
///
/// The caller already saw the key's prefix somewhere in the text; failing
/// to find a well-formed quoted value now aborts the whole extraction.
fn key_value(tag: &str, key: &'static str, prefix: &str) -> Result<Arc<str>, ExtractError> {
    for attr in tag.split(',') {
        if let Some(rest) = attr.strip_prefix(prefix) {
            if let Some(value) = unquote(rest) {
                return Ok(Arc::from(value));
            }
        }
    }
    Err(ExtractError::TagParse {
        key,
        tag: tag.to_string(),
    })
}

/// `"value"` -> `value`; anything else is malformed.
fn unquote(raw: &str) -> Option<&str> {
    raw.strip_prefix('"')?.strip_suffix('"')
}
