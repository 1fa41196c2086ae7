use log::debug;
use std::fs;
use std::path::Path;

use crate::error::ConvertError;

/// Bytes of an input file together with the name it was selected under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    name: String,
    bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn read(path: &Path) -> Result<Self, ConvertError> {
        let bytes = fs::read(path).map_err(|source| ConvertError::ReadFailure {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(Self::new(display_name(path), bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// The file-name component of `path`, falling back to the whole path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn display_name_drops_directories() {
        assert_eq!(display_name(Path::new("/tmp/dumps/a.bin")), "a.bin");
        assert_eq!(display_name(Path::new("b.bin")), "b.bin");
    }

    #[test]
    fn read_loads_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        fs::write(&path, [1u8, 2, 3]).unwrap();

        let source = SourceFile::read(&path).unwrap();
        assert_eq!(source.name(), "blob.bin");
        assert_eq!(source.bytes(), &[1, 2, 3]);
    }

    #[test]
    fn missing_file_is_a_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.bin");

        match SourceFile::read(&path) {
            Err(ConvertError::ReadFailure { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), ErrorKind::NotFound);
            }
            other => panic!("expected read failure, got {other:?}"),
        }
    }
}
