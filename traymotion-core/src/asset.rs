//! Raw asset bytes as read from storage

use crate::format::{sniff, SourceFormat};
use std::path::Path;

/// An image file read into memory together with its sniffed format
#[derive(Debug, Clone)]
pub struct RawAsset {
    /// File contents
    pub data: Vec<u8>,
    /// Format detected from the magic bytes
    pub format: SourceFormat,
}

impl RawAsset {
    /// Wraps a byte buffer, classifying it by content
    pub fn new(data: Vec<u8>) -> Self {
        let format = sniff(&data);
        Self { data, format }
    }

    /// Reads a file and classifies it by content, ignoring its extension
    pub fn read(path: &Path) -> crate::Result<Self> {
        let data = std::fs::read(path)?;
        Ok(Self::new(data))
    }

    /// Returns the size of the asset data in bytes
    pub fn data_size(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_sniffs_content_not_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        std::fs::write(&path, b"GIF89a\x01\x00\x01\x00").unwrap();

        let asset = RawAsset::read(&path).unwrap();
        assert_eq!(asset.format, SourceFormat::Gif);
        assert_eq!(asset.data_size(), 10);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = RawAsset::read(&dir.path().join("missing"));
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }
}
