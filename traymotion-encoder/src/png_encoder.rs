//! Static png encoding

use crate::Result;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::RgbaImage;

/// Maps a 0-9 compression level onto the png encoder presets
pub fn compression_for(level: u8) -> CompressionType {
    match level {
        0..=3 => CompressionType::Fast,
        4..=6 => CompressionType::Default,
        _ => CompressionType::Best,
    }
}

/// Encodes a still image as png
pub fn encode_png(image: &RgbaImage, compression_level: u8) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    let encoder = PngEncoder::new_with_quality(
        &mut output,
        compression_for(compression_level),
        FilterType::Adaptive,
    );
    image.write_with_encoder(encoder)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_compression_levels() {
        assert!(matches!(compression_for(3), CompressionType::Fast));
        assert!(matches!(compression_for(6), CompressionType::Default));
        assert!(matches!(compression_for(9), CompressionType::Best));
    }

    #[test]
    fn test_png_decodes_back() {
        let image = RgbaImage::from_pixel(5, 6, Rgba([4, 5, 6, 200]));
        for level in [3, 6, 9] {
            let data = encode_png(&image, level).unwrap();
            assert_eq!(traymotion_core::sniff(&data), traymotion_core::SourceFormat::Png);
            let decoded = image::load_from_memory(&data).unwrap().to_rgba8();
            assert_eq!(decoded, image);
        }
    }
}
