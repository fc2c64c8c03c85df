//! Magic-byte format detection

use byteorder::{BigEndian, ByteOrder};
use std::fmt;

/// "GIF8"
const GIF_SIGNATURE: u32 = 0x4749_4638;
/// "\x89PNG"
const PNG_SIGNATURE: u32 = 0x8950_4e47;
/// JPEG SOI marker, matched on the first two bytes only
const JPG_SIGNATURE: u16 = 0xffd8;

/// Image container recognised by its leading bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Gif,
    Jpg,
    Png,
    Unknown,
}

impl SourceFormat {
    /// Lowercase name used in logs and CLI output
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Gif => "gif",
            SourceFormat::Jpg => "jpg",
            SourceFormat::Png => "png",
            SourceFormat::Unknown => "unknown",
        }
    }

    /// Whether the format is decoded as a single still image
    pub fn is_static(&self) -> bool {
        matches!(self, SourceFormat::Jpg | SourceFormat::Png)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a buffer by its first four bytes.
///
/// Buffers shorter than four bytes are always `Unknown`.
pub fn sniff(data: &[u8]) -> SourceFormat {
    if data.len() < 4 {
        return SourceFormat::Unknown;
    }

    let signature = BigEndian::read_u32(&data[..4]);
    if signature == GIF_SIGNATURE {
        SourceFormat::Gif
    } else if (signature >> 16) as u16 == JPG_SIGNATURE {
        SourceFormat::Jpg
    } else if signature == PNG_SIGNATURE {
        SourceFormat::Png
    } else {
        SourceFormat::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_known_signatures() {
        assert_eq!(sniff(b"GIF89a"), SourceFormat::Gif);
        assert_eq!(sniff(b"GIF87a"), SourceFormat::Gif);
        assert_eq!(sniff(&[0x47, 0x49, 0x46, 0x38]), SourceFormat::Gif);
        assert_eq!(sniff(&[0xff, 0xd8, 0xff, 0xe0, 0x00]), SourceFormat::Jpg);
        assert_eq!(sniff(&[0xff, 0xd8, 0x00, 0x00]), SourceFormat::Jpg);
        assert_eq!(sniff(&[0x89, 0x50, 0x4e, 0x47]), SourceFormat::Png);
        assert_eq!(
            sniff(&[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a]),
            SourceFormat::Png
        );
    }

    #[test]
    fn test_sniff_short_buffers_are_unknown() {
        assert_eq!(sniff(&[]), SourceFormat::Unknown);
        assert_eq!(sniff(&[0xff, 0xd8]), SourceFormat::Unknown);
        assert_eq!(sniff(b"GIF"), SourceFormat::Unknown);
    }

    #[test]
    fn test_sniff_unrecognised() {
        assert_eq!(sniff(b"RIFF\x00\x00\x00\x00WEBP"), SourceFormat::Unknown);
        assert_eq!(sniff(&[0x47, 0x49, 0x46, 0x39]), SourceFormat::Unknown);
        assert_eq!(sniff(&[0xd8, 0xff, 0x00, 0x00]), SourceFormat::Unknown);
        assert_eq!(sniff(&[0x89, 0x50, 0x4e, 0x00]), SourceFormat::Unknown);
    }

    #[test]
    fn test_sniff_is_deterministic() {
        let data = [0x47, 0x49, 0x46, 0x38, 0x39, 0x61];
        assert_eq!(sniff(&data), sniff(&data));
        assert_eq!(SourceFormat::Gif.to_string(), "gif");
        assert!(SourceFormat::Png.is_static());
        assert!(!SourceFormat::Gif.is_static());
    }
}
