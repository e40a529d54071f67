//! Reading uploaded sentence files.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use shuang_core::corpus::{parse_sentence_lines, CorpusError};
use shuang_core::settings::UploadSettings;

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: only .{expected} files are accepted")]
    NotTxt { path: String, expected: String },
    #[error("{path}: {size} bytes exceeds the {limit} byte limit")]
    TooLarge { path: String, size: u64, limit: u64 },
    #[error("{path}: no non-empty lines")]
    Empty { path: String },
}

/// Read a sentence file: one practice sentence per non-empty line.
///
/// The extension and size limit come from the `[upload]` settings.
pub fn read_sentence_file(path: &Path, limits: &UploadSettings) -> Result<Vec<String>, UploadError> {
    let display = path.display().to_string();

    let extension_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(&limits.extension));
    if !extension_ok {
        return Err(UploadError::NotTxt {
            path: display,
            expected: limits.extension.clone(),
        });
    }

    let io_err = |source| UploadError::Io {
        path: display.clone(),
        source,
    };
    let size = fs::metadata(path).map_err(io_err)?.len();
    if size > limits.max_file_bytes {
        warn!(path = %path.display(), size, limit = limits.max_file_bytes, "upload too large");
        return Err(UploadError::TooLarge {
            path: display,
            size,
            limit: limits.max_file_bytes,
        });
    }

    let content = fs::read_to_string(path).map_err(io_err)?;
    let lines = parse_sentence_lines(&content).map_err(|e| match e {
        CorpusError::EmptySource => UploadError::Empty {
            path: display.clone(),
        },
        other => UploadError::Io {
            path: display.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, other),
        },
    })?;
    debug!(path = %path.display(), lines = lines.len(), "upload read");
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn limits(max: u64) -> UploadSettings {
        UploadSettings {
            max_file_bytes: max,
            extension: "txt".to_string(),
        }
    }

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reads_trimmed_non_empty_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "poems.txt", "床前明月光\n\n  疑是地上霜 \r\n");
        let lines = read_sentence_file(&path, &limits(1024)).unwrap();
        assert_eq!(lines, ["床前明月光", "疑是地上霜"]);
    }

    #[test]
    fn extension_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "POEMS.TXT", "你好");
        assert!(read_sentence_file(&path, &limits(1024)).is_ok());
    }

    #[test]
    fn rejects_other_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "poems.md", "你好");
        let err = read_sentence_file(&path, &limits(1024)).unwrap_err();
        assert!(matches!(err, UploadError::NotTxt { .. }));
    }

    #[test]
    fn rejects_files_over_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "big.txt", "你好你好");
        let err = read_sentence_file(&path, &limits(4)).unwrap_err();
        match err {
            UploadError::TooLarge { size, limit, .. } => {
                assert_eq!(size, 12);
                assert_eq!(limit, 4);
            }
            other => panic!("expected TooLarge, got {other:?}"),
        }
    }

    #[test]
    fn blank_file_is_empty_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "blank.txt", " \n\n\t\n");
        let err = read_sentence_file(&path, &limits(1024)).unwrap_err();
        assert!(matches!(err, UploadError::Empty { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_sentence_file(&dir.path().join("absent.txt"), &limits(1024)).unwrap_err();
        assert!(matches!(err, UploadError::Io { .. }));
    }

    #[test]
    fn invalid_utf8_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin.txt");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let err = read_sentence_file(&path, &limits(1024)).unwrap_err();
        assert!(matches!(err, UploadError::Io { .. }));
    }
}
