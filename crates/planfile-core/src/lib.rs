//! Validation, versioning, localization and geo codecs for ground-station
//! JSON files.
//!
//! Persisted documents (missions, fences, rallies, command metadata) carry
//! a three-field envelope — `groundStation`, `fileType`, `version` — that
//! gates loading, and two of the internal formats embed strings that are
//! substituted from a translation catalog before the document reaches the
//! rest of the application. This crate owns those rules plus the
//! lat/lon/alt array codecs shared by the mission formats.

pub mod error;
pub mod file;
pub mod geo;
pub mod header;
pub mod localize;
pub mod validate;
pub mod value;

// Convenience re-exports
pub use error::DocumentError;
pub use file::{open_internal, parse_bytes, parse_file, save_stamped};
pub use geo::{decode_point, decode_points, encode_point, encode_points, CoordinateOrder, GeoPoint};
pub use localize::{
    inject_default_keys, translate_document, CatalogTranslator, LocalizationSpec, NullTranslator,
    Translator,
};
pub use validate::{validate_key_types, validate_keys, validate_required_keys, KeyRule};
pub use value::JsonType;
