//! Selected File
//!
//! An opaque, cheaply clonable handle to the bytes of a user-chosen file.

use crate::types::FileError;
use bytes::Bytes;
use mime::Mime;
use std::path::{Path, PathBuf};
use tokio::fs;

/// A file chosen for analysis. No type or size validation happens here.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    path: PathBuf,
    name: String,
    mime: Mime,
    bytes: Bytes,
}

impl SelectedFile {
    /// Read a file from disk
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, FileError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let metadata = fs::metadata(path).await.map_err(|source| FileError::Read {
            path: display.clone(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(FileError::NotAFile(display));
        }

        let contents = fs::read(path).await.map_err(|source| FileError::Read {
            path: display,
            source,
        })?;

        Ok(Self::from_bytes(path, contents))
    }

    /// Build a handle from bytes already in memory
    pub fn from_bytes(path: impl Into<PathBuf>, contents: impl Into<Bytes>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let mime = mime_guess::from_path(&path).first_or_octet_stream();

        Self {
            path,
            name,
            mime,
            bytes: contents.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &Mime {
        &self.mime
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Whether a path looks like an image, judged by extension only
pub fn is_image_path(path: &Path) -> bool {
    mime_guess::from_path(path)
        .iter()
        .any(|m| m.type_() == mime::IMAGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_bytes_guesses_mime_and_name() {
        let file = SelectedFile::from_bytes("/tmp/pics/dog.JPG", vec![1u8, 2, 3]);
        assert_eq!(file.name(), "dog.JPG");
        assert_eq!(file.mime().essence_str(), "image/jpeg");
        assert_eq!(file.len(), 3);
    }

    #[test]
    fn test_unknown_extension_is_octet_stream() {
        let file = SelectedFile::from_bytes("notes.unknownext", Vec::new());
        assert_eq!(file.mime(), &mime::APPLICATION_OCTET_STREAM);
        assert!(file.is_empty());
    }

    #[test]
    fn test_is_image_path() {
        assert!(is_image_path(Path::new("a.png")));
        assert!(is_image_path(Path::new("a.webp")));
        assert!(is_image_path(Path::new("a.gif")));
        assert!(!is_image_path(Path::new("a.txt")));
        assert!(!is_image_path(Path::new("Makefile")));
    }

    #[tokio::test]
    async fn test_open_reads_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cat.png");
        std::fs::write(&path, b"not really a png").unwrap();

        let file = SelectedFile::open(&path).await.unwrap();
        assert_eq!(file.bytes().as_ref(), b"not really a png");
        assert_eq!(file.path(), path.as_path());
    }

    #[tokio::test]
    async fn test_open_rejects_directories_and_missing_files() {
        let dir = TempDir::new().unwrap();

        let err = SelectedFile::open(dir.path()).await.unwrap_err();
        assert!(matches!(err, FileError::NotAFile(_)));

        let err = SelectedFile::open(dir.path().join("missing.png")).await.unwrap_err();
        assert!(matches!(err, FileError::Read { .. }));
    }
}
