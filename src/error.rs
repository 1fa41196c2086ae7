use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("invalid file type: {name} (expected a {expected} file)")]
    InvalidFileType { name: String, expected: String },

    #[error("could not read {}: {source}", .path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("nothing to save, convert a file first")]
    NoResultToDownload,

    #[error("{name} is not valid UTF-8 (first invalid byte at offset {valid_up_to})")]
    InvalidUtf8 { name: String, valid_up_to: usize },

    #[error("could not write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConvertError {
    /// Short heading used for notices.
    pub fn title(&self) -> &'static str {
        match self {
            ConvertError::InvalidFileType { .. } => "Invalid file",
            ConvertError::ReadFailure { .. } => "Read error",
            ConvertError::NoResultToDownload => "Nothing to save",
            ConvertError::InvalidUtf8 { .. } => "Not UTF-8",
            ConvertError::WriteFailure { .. } => "Write error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_failure_keeps_io_source() {
        let err = ConvertError::ReadFailure {
            path: PathBuf::from("missing.bin"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        let source = std::error::Error::source(&err).map(|e| e.to_string());
        assert_eq!(source.as_deref(), Some("gone"));
        assert!(err.to_string().contains("missing.bin"));
        assert_eq!(err.title(), "Read error");
    }

    #[test]
    fn invalid_type_message_names_both_sides() {
        let err = ConvertError::InvalidFileType {
            name: "photo.jpg".to_string(),
            expected: ".bin".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid file type: photo.jpg (expected a .bin file)"
        );
    }
}
