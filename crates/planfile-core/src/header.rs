//! The file-format envelope every persisted document carries.
//!
//! Internal documents declare a `fileType` and schema `version`; documents
//! meant to travel outside the application additionally carry a
//! `groundStation` marker identifying their producer.

use crate::error::DocumentError;
use crate::validate::{validate_keys, KeyRule};
use crate::value::JsonType;
use serde_json::{Map, Value};

pub const GROUND_STATION_KEY: &str = "groundStation";
pub const GROUND_STATION_VALUE: &str = "QGroundControl";
pub const FILE_TYPE_KEY: &str = "fileType";
pub const VERSION_KEY: &str = "version";

/// Validate the internal header: `fileType` must equal `expected_file_type`
/// and `version` must fall within `[min_version, max_version]` inclusive.
/// Returns the version on success.
pub fn validate_internal(
    object: &Map<String, Value>,
    expected_file_type: &str,
    min_version: u32,
    max_version: u32,
) -> Result<u32, DocumentError> {
    let rules = [
        KeyRule::required(FILE_TYPE_KEY, JsonType::String),
        KeyRule::required(VERSION_KEY, JsonType::Double),
    ];
    validate_keys(object, &rules)?;

    let file_type = object
        .get(FILE_TYPE_KEY)
        .and_then(Value::as_str)
        .unwrap_or_default();
    if file_type != expected_file_type {
        return Err(DocumentError::IncorrectFileType {
            expected: expected_file_type.to_string(),
            actual: file_type.to_string(),
        });
    }

    // toInt semantics: fractional versions truncate, null decodes to 0.
    let version = object
        .get(VERSION_KEY)
        .and_then(Value::as_f64)
        .unwrap_or(0.0) as u32;
    if version < min_version {
        return Err(DocumentError::VersionTooOld { version });
    }
    if version > max_version {
        return Err(DocumentError::VersionTooNew {
            version,
            max_supported: max_version,
        });
    }

    Ok(version)
}

/// Validate an externally-authored document: the ground-station marker must
/// be present and equal to [`GROUND_STATION_VALUE`] before the internal
/// header check runs.
pub fn validate_external(
    object: &Map<String, Value>,
    expected_file_type: &str,
    min_version: u32,
    max_version: u32,
) -> Result<u32, DocumentError> {
    let rules = [KeyRule::required(GROUND_STATION_KEY, JsonType::String)];
    validate_keys(object, &rules)?;

    let marker = object
        .get(GROUND_STATION_KEY)
        .and_then(Value::as_str)
        .unwrap_or_default();
    if marker != GROUND_STATION_VALUE {
        return Err(DocumentError::NotGroundStationFile);
    }

    validate_internal(object, expected_file_type, min_version, max_version)
}

/// Stamp the header onto a document, overwriting any existing values.
pub fn write(object: &mut Map<String, Value>, file_type: &str, version: u32) {
    object.insert(
        GROUND_STATION_KEY.to_string(),
        Value::String(GROUND_STATION_VALUE.to_string()),
    );
    object.insert(
        FILE_TYPE_KEY.to_string(),
        Value::String(file_type.to_string()),
    );
    object.insert(VERSION_KEY.to_string(), Value::from(version));
}
