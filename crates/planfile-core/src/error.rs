//! Error taxonomy for document validation.
//!
//! Every failure is a descriptive, caller-facing message; nothing here is
//! fatal to the process. Callers decide whether to abort loading, skip the
//! offending field, or surface the text to the user.

use crate::value::JsonType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Unable to parse json: {detail}")]
    Parse { detail: String },

    #[error("Unable to open file: '{path}', error: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Root of json file is not object")]
    RootNotObject,

    #[error("The following required keys are missing: {}", .keys.join(", "))]
    MissingRequiredKeys { keys: Vec<String> },

    #[error("Incorrect value type - key:type:expected {key}:{found}:{expected}")]
    IncorrectValueType {
        key: String,
        found: JsonType,
        expected: JsonType,
    },

    #[error("Incorrect file type key expected:{expected} actual:{actual}")]
    IncorrectFileType { expected: String, actual: String },

    #[error("File version {version} is no longer supported")]
    VersionTooOld { version: u32 },

    #[error("File version {version} is newer than current supported version {max_supported}")]
    VersionTooNew { version: u32, max_supported: u32 },

    #[error("File is not a QGroundControl file")]
    NotGroundStationFile,

    #[error("value for coordinate is not array")]
    CoordinateNotArray,

    #[error("value for coordinate array is not array")]
    CoordinateArrayNotArray,

    #[error("Coordinate array must contain {required} values")]
    CoordinateArrayCount { required: usize },

    #[error("Coordinate array may only contain double values, found: {found}")]
    CoordinateValueType { found: JsonType },

    #[error("Json file: '{path}'. {source}")]
    FileContext {
        path: String,
        #[source]
        source: Box<DocumentError>,
    },
}

impl DocumentError {
    /// Wrap an error with the name of the file it was raised for.
    pub fn in_file(self, path: impl Into<String>) -> Self {
        DocumentError::FileContext {
            path: path.into(),
            source: Box::new(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_are_comma_joined_in_order() {
        let err = DocumentError::MissingRequiredKeys {
            keys: vec!["a".into(), "b".into(), "c".into()],
        };
        assert_eq!(
            err.to_string(),
            "The following required keys are missing: a, b, c"
        );
    }

    #[test]
    fn type_mismatch_names_key_found_and_expected() {
        let err = DocumentError::IncorrectValueType {
            key: "version".into(),
            found: JsonType::Bool,
            expected: JsonType::Double,
        };
        assert_eq!(
            err.to_string(),
            "Incorrect value type - key:type:expected version:Bool:Double"
        );
    }

    #[test]
    fn file_context_prefixes_the_file_name() {
        let err = DocumentError::VersionTooOld { version: 0 }.in_file("mission.plan");
        assert_eq!(
            err.to_string(),
            "Json file: 'mission.plan'. File version 0 is no longer supported"
        );
    }
}
