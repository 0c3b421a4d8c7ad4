//! Localization substitution over designated document keys.
//!
//! Two of the application's own formats embed user-visible strings that
//! should be shown in the user's language. The document declares which keys
//! are translatable (`translateKeys`) and which keys identify array entries
//! for tooling (`_arrayIDKeys`); both fall back to built-in defaults keyed
//! by `fileType`. Translation lookups go through the [`Translator`] trait so
//! the catalog's lifecycle stays with the caller.
//!
//! A source string may carry a disambiguation tag for contexts where the
//! same English text translates differently:
//!
//! ```text
//! #loc.disambiguation#Go#Start the vehicle
//!                     ^tag ^text handed to the translator
//! ```

use crate::error::DocumentError;
use crate::header::FILE_TYPE_KEY;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

pub const TRANSLATE_KEYS_KEY: &str = "translateKeys";
pub const ARRAY_ID_KEYS_KEY: &str = "_arrayIDKeys";
pub const DISAMBIGUATION_PREFIX: &str = "#loc.disambiguation#";

/// File types with built-in localization defaults.
pub const MAV_CMD_INFO_FILE_TYPE: &str = "MavCmdInfo";
pub const FACT_META_DATA_FILE_TYPE: &str = "FactMetaData";

/// Translation lookup: `(context, source, disambiguation)` to a localized
/// string, or `None` when the catalog has no entry.
pub trait Translator {
    fn lookup(&self, context: &str, source: &str, disambiguation: &str) -> Option<String>;
}

/// A translator that never finds anything; documents pass through verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTranslator;

impl Translator for NullTranslator {
    fn lookup(&self, _context: &str, _source: &str, _disambiguation: &str) -> Option<String> {
        None
    }
}

/// JSON-catalog translator: `{ context: { source: translation } }`, with
/// `source@disambiguation` entries taking precedence over bare `source`.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CatalogTranslator {
    contexts: BTreeMap<String, BTreeMap<String, String>>,
}

impl CatalogTranslator {
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let bytes = std::fs::read(path).map_err(|source| DocumentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|err| DocumentError::Parse {
            detail: err.to_string(),
        })
    }

    pub fn insert(
        &mut self,
        context: impl Into<String>,
        source: impl Into<String>,
        translation: impl Into<String>,
    ) {
        self.contexts
            .entry(context.into())
            .or_default()
            .insert(source.into(), translation.into());
    }
}

impl Translator for CatalogTranslator {
    fn lookup(&self, context: &str, source: &str, disambiguation: &str) -> Option<String> {
        let entries = self.contexts.get(context)?;
        if !disambiguation.is_empty() {
            if let Some(hit) = entries.get(&format!("{source}@{disambiguation}")) {
                return Some(hit.clone());
            }
        }
        entries.get(source).cloned()
    }
}

/// Which keys translate and which keys identify array entries.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LocalizationSpec {
    pub translate_keys: BTreeSet<String>,
    pub array_id_keys: BTreeSet<String>,
}

impl LocalizationSpec {
    fn from_lists(translate: &str, array_ids: &str) -> Self {
        Self {
            translate_keys: split_key_list(translate),
            array_id_keys: split_key_list(array_ids),
        }
    }
}

fn split_key_list(list: &str) -> BTreeSet<String> {
    list.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}

fn default_key_lists(file_type: &str) -> Option<(&'static str, &'static str)> {
    match file_type {
        MAV_CMD_INFO_FILE_TYPE => Some((
            "label,enumStrings,friendlyName,description,category",
            "rawName,comment",
        )),
        FACT_META_DATA_FILE_TYPE => Some(("shortDesc,longDesc,enumStrings", "name")),
        _ => None,
    }
}

/// Resolve the localization spec for a document, writing the built-in
/// defaults into it when its `fileType` has defaults and the fields are
/// absent. Unknown file types get an empty spec and the document is left
/// untouched.
pub fn inject_default_keys(object: &mut Map<String, Value>) -> LocalizationSpec {
    let file_type = object
        .get(FILE_TYPE_KEY)
        .and_then(Value::as_str)
        .unwrap_or_default();
    let Some((default_translate, default_array_ids)) = default_key_lists(file_type) else {
        return LocalizationSpec::default();
    };

    let translate = match object.get(TRANSLATE_KEYS_KEY).and_then(Value::as_str) {
        Some(existing) => existing.to_string(),
        None => {
            object.insert(
                TRANSLATE_KEYS_KEY.to_string(),
                Value::String(default_translate.to_string()),
            );
            default_translate.to_string()
        }
    };

    let array_ids = match object.get(ARRAY_ID_KEYS_KEY).and_then(Value::as_str) {
        Some(existing) => existing.to_string(),
        None => {
            object.insert(
                ARRAY_ID_KEYS_KEY.to_string(),
                Value::String(default_array_ids.to_string()),
            );
            default_array_ids.to_string()
        }
    };

    LocalizationSpec::from_lists(&translate, &array_ids)
}

/// Split `#loc.disambiguation#TAG#text` into `(TAG, text)`. Without the
/// prefix the whole string is the source; without a closing `#` the whole
/// remainder is the source and the tag is empty.
fn split_disambiguation(raw: &str) -> (&str, &str) {
    let Some(rest) = raw.strip_prefix(DISAMBIGUATION_PREFIX) else {
        return ("", raw);
    };
    match rest.find('#') {
        Some(end) => (&rest[..end], &rest[end + 1..]),
        None => ("", rest),
    }
}

/// Recursively substitute translations into a document, returning the new
/// tree. Object values under keys in `spec.translate_keys` are looked up
/// and replaced when the catalog has an entry; other string values are
/// never touched, at any depth. Array elements recurse by their own
/// dynamic type.
pub fn translate_document(
    value: Value,
    context: &str,
    spec: &LocalizationSpec,
    translator: &dyn Translator,
) -> Value {
    match value {
        Value::Object(object) => {
            Value::Object(translate_map(object, context, spec, translator))
        }
        Value::Array(entries) => Value::Array(
            entries
                .into_iter()
                .map(|entry| match entry {
                    Value::Object(_) | Value::Array(_) => {
                        translate_document(entry, context, spec, translator)
                    }
                    scalar => scalar,
                })
                .collect(),
        ),
        scalar => scalar,
    }
}

/// Object form of [`translate_document`].
pub fn translate_map(
    object: Map<String, Value>,
    context: &str,
    spec: &LocalizationSpec,
    translator: &dyn Translator,
) -> Map<String, Value> {
    let mut out = Map::with_capacity(object.len());
    for (key, value) in object {
        let value = match value {
            Value::String(source) if spec.translate_keys.contains(&key) => {
                let (disambiguation, text) = split_disambiguation(&source);
                match translator.lookup(context, text, disambiguation) {
                    Some(translated) => Value::String(translated),
                    None => Value::String(source),
                }
            }
            Value::Object(_) | Value::Array(_) => {
                translate_document(value, context, spec, translator)
            }
            scalar => scalar,
        };
        out.insert(key, value);
    }

    out
}
