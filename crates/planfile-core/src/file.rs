//! Parsing raw bytes and opening header-validated files.

use crate::error::DocumentError;
use crate::header;
use crate::localize::{self, Translator};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Parse raw bytes as a JSON document. On syntax failure the ~200-byte raw
/// window around the failure offset is logged at debug level as a forensics
/// aid; it has no effect on the returned error.
pub fn parse_bytes(bytes: &[u8]) -> Result<Value, DocumentError> {
    match serde_json::from_slice(bytes) {
        Ok(value) => Ok(value),
        Err(err) => {
            let offset = byte_offset(bytes, err.line(), err.column());
            let start = offset.saturating_sub(100);
            let end = (start + 200).min(bytes.len());
            debug!(
                offset,
                window = %String::from_utf8_lossy(&bytes[start..end]),
                "json read error"
            );
            Err(DocumentError::Parse {
                detail: err.to_string(),
            })
        }
    }
}

/// Read and parse a file.
pub fn parse_file(path: &Path) -> Result<Value, DocumentError> {
    let bytes = std::fs::read(path).map_err(|source| DocumentError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_bytes(&bytes)
}

/// Open one of the application's own files: parse, validate the internal
/// header against the expected type and version range, then localize the
/// designated keys using the file name as translation context. Returns the
/// (possibly translated) top-level object and the accepted version.
pub fn open_internal(
    path: &Path,
    expected_file_type: &str,
    min_version: u32,
    max_version: u32,
    translator: &dyn Translator,
) -> Result<(Map<String, Value>, u32), DocumentError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let value = parse_file(path).map_err(|err| match err {
        io @ DocumentError::Io { .. } => io,
        other => other.in_file(file_name.clone()),
    })?;
    let Value::Object(mut object) = value else {
        return Err(DocumentError::RootNotObject.in_file(file_name));
    };

    let version = header::validate_internal(&object, expected_file_type, min_version, max_version)
        .map_err(|err| err.in_file(file_name.clone()))?;

    let spec = localize::inject_default_keys(&mut object);
    let object = localize::translate_map(object, &file_name, &spec, translator);

    Ok((object, version))
}

/// Stamp the header onto a document and write it to disk, pretty-printed.
pub fn save_stamped(
    path: &Path,
    mut object: Map<String, Value>,
    file_type: &str,
    version: u32,
) -> Result<(), DocumentError> {
    header::write(&mut object, file_type, version);
    let mut bytes = serde_json::to_vec_pretty(&object).map_err(|err| DocumentError::Parse {
        detail: err.to_string(),
    })?;
    bytes.push(b'\n');
    std::fs::write(path, bytes).map_err(|source| DocumentError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Byte offset of a 1-based (line, column) position, clamped to the input.
fn byte_offset(bytes: &[u8], line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let mut remaining_newlines = line - 1;
    let mut offset = 0;
    for (index, byte) in bytes.iter().enumerate() {
        if remaining_newlines == 0 {
            break;
        }
        if *byte == b'\n' {
            remaining_newlines -= 1;
            offset = index + 1;
        }
    }
    (offset + column.saturating_sub(1)).min(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_well_formed_bytes() {
        let value = parse_bytes(br#"{ "fileType": "Mission" }"#).unwrap();
        assert_eq!(value, json!({ "fileType": "Mission" }));
    }

    #[test]
    fn parse_failure_reports_serde_detail() {
        let err = parse_bytes(b"{ \"fileType\": }").unwrap_err();
        assert!(matches!(err, DocumentError::Parse { .. }));
        assert!(err.to_string().starts_with("Unable to parse json:"));
    }

    #[test]
    fn parse_failure_logs_the_raw_window_at_debug() {
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

        impl std::io::Write for CaptureWriter {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CaptureWriter {
            type Writer = CaptureWriter;
            fn make_writer(&'a self) -> Self::Writer {
                self.clone()
            }
        }

        let capture = CaptureWriter::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(capture.clone())
            .with_ansi(false)
            .finish();

        // Push the failure past the 100-byte look-back so the window clamps
        // away the start of the input.
        let mut bytes = format!("{{ \"padding\": \"{}\",", "x".repeat(150)).into_bytes();
        bytes.extend_from_slice(b" \"marker\": !bad }");
        tracing::subscriber::with_default(subscriber, || {
            let err = parse_bytes(&bytes).unwrap_err();
            assert!(matches!(err, DocumentError::Parse { .. }));
        });

        let log = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(log.contains("json read error"), "missing debug event: {log}");
        assert!(log.contains("marker"), "window should cover the failure: {log}");
        assert!(
            !log.contains("padding"),
            "window should not reach back to the input start: {log}"
        );
    }

    #[test]
    fn byte_offset_walks_lines_and_columns() {
        let bytes = b"line one\nline two\nline three";
        assert_eq!(byte_offset(bytes, 1, 1), 0);
        assert_eq!(byte_offset(bytes, 2, 1), 9);
        assert_eq!(byte_offset(bytes, 3, 6), 23);
        // Positions past the input clamp instead of panicking.
        assert_eq!(byte_offset(bytes, 9, 99), bytes.len());
        assert_eq!(byte_offset(bytes, 0, 0), 0);
    }
}
