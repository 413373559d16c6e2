//! Text decoding with a fixed encoding fallback list.
//!
//! Uncontrolled CSV files routinely arrive in something other than UTF-8.
//! The importer first tries strict UTF-8; on failure it walks a fixed,
//! ordered list of three common single-byte encodings and gives up with
//! [`ImportError::UnreadableFile`] only when none decode cleanly.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use encoding_rs::{Encoding, ISO_8859_15, MACINTOSH, UTF_8, WINDOWS_1252};
use tracing::warn;

use crate::error::{ImportError, Result};

/// Fallback encodings tried in order after a strict UTF-8 failure.
const FALLBACK_ENCODINGS: [&Encoding; 3] = [WINDOWS_1252, ISO_8859_15, MACINTOSH];

/// Reads a file and decodes it to a string, applying the fallback list.
///
/// # Errors
///
/// - [`ImportError::FileNotFound`] / [`ImportError::PermissionDenied`] for
///   access failures
/// - [`ImportError::UnreadableFile`] when no encoding decodes the bytes
///   without replacement
pub fn read_to_string(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => ImportError::FileNotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => {
            ImportError::PermissionDenied(format!("cannot read '{}'", path.display()))
        }
        _ => ImportError::IoError(err),
    })?;

    if let Some(text) = try_decode(&bytes, UTF_8) {
        return Ok(text);
    }

    for encoding in FALLBACK_ENCODINGS {
        if let Some(text) = try_decode(&bytes, encoding) {
            warn!(
                path = %path.display(),
                encoding = encoding.name(),
                "decoded with fallback encoding"
            );
            return Ok(text);
        }
    }

    Err(ImportError::UnreadableFile(path.to_path_buf()))
}

/// Decodes with a single encoding, returning `None` when any byte sequence
/// had to be replaced.
fn try_decode(bytes: &[u8], encoding: &'static Encoding) -> Option<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors { None } else { Some(text.into_owned()) }
}
