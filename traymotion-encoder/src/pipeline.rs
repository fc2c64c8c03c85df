//! Save path: source file to stored icon asset

use crate::{gif_encoder, png_encoder, write_atomically, CropRect, EncoderConfig, Error, Result};
use std::path::Path;
use traymotion_core::{PerformanceProfile, RawAsset, RenderFrame, SourceFormat};
use traymotion_decoder::loader::decode_static;
use traymotion_decoder::{composite_sampled, probe_gif, resize_square, GifFrames, SamplePlan};

/// Crops, resizes and re-encodes a source image under a performance profile
pub struct AssetProcessor {
    config: EncoderConfig,
    profile: &'static PerformanceProfile,
}

impl AssetProcessor {
    /// Creates a new processor with the given configuration
    pub fn new(config: EncoderConfig, profile: &'static PerformanceProfile) -> Self {
        Self { config, profile }
    }

    /// Produces the encoded asset bytes for `source` without touching storage.
    ///
    /// Format is decided by content: gifs become an animated gif, pngs and
    /// jpgs become a png.
    pub fn process(&self, source: &Path, crop: CropRect) -> Result<Vec<u8>> {
        let asset = RawAsset::new(std::fs::read(source)?);
        tracing::debug!(
            source = %source.display(),
            format = %asset.format,
            bytes = asset.data_size(),
            "Processing source"
        );

        match asset.format {
            SourceFormat::Gif => self.process_animation(&asset.data, crop),
            SourceFormat::Png | SourceFormat::Jpg => {
                self.process_still(&asset.data, asset.format, crop)
            }
            SourceFormat::Unknown => Err(Error::UnsupportedFormat(asset.format)),
        }
    }

    /// Processes `source` and atomically replaces the asset at `destination`.
    ///
    /// Nothing is written unless encoding succeeded.
    pub fn process_and_save(&self, source: &Path, crop: CropRect, destination: &Path) -> Result<()> {
        let data = self.process(source, crop)?;
        write_atomically(destination, &data)?;
        tracing::info!(
            destination = %destination.display(),
            bytes = data.len(),
            size = self.config.display_size,
            "Stored icon asset"
        );
        Ok(())
    }

    fn process_animation(&self, data: &[u8], crop: CropRect) -> Result<Vec<u8>> {
        let info = probe_gif(data)?;
        let region = crop.clamp_to(info.canvas_width, info.canvas_height)?;
        let plan = SamplePlan::new(info.frame_count, self.profile.max_frames);

        let mut frames = Vec::with_capacity(plan.len());
        composite_sampled(GifFrames::open(data)?, &plan, |composite| {
            let cropped = region.apply(&composite.image);
            let image = resize_square(&cropped, self.config.display_size, self.profile.quality)?;
            frames.push(RenderFrame::new(
                image,
                self.profile.effective_delay(composite.delay_ms),
            ));
            Ok(())
        })?;

        if frames.is_empty() {
            return Err(Error::OperationFailed(
                "animation produced no frames".to_string(),
            ));
        }
        gif_encoder::encode_animation(frames, self.config.gif_speed)
    }

    fn process_still(&self, data: &[u8], format: SourceFormat, crop: CropRect) -> Result<Vec<u8>> {
        let image = decode_static(data, format)?;
        let region = crop.clamp_to(image.width(), image.height())?;
        let cropped = region.apply(&image);
        drop(image);

        let resized = resize_square(&cropped, self.config.display_size, self.profile.quality)?;
        png_encoder::encode_png(&resized, self.profile.compression_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;
    use traymotion_core::profile::{BALANCED, LIGHT};
    use traymotion_core::sniff;
    use traymotion_decoder::{decode_gif, load_render_sequence};

    fn write_gif(path: &Path, width: u16, height: u16, count: usize, delay_cs: u16) {
        let mut out = Vec::new();
        {
            let mut encoder = gif::Encoder::new(&mut out, width, height, &[]).unwrap();
            for i in 0..count {
                let color = [(i * 7 % 256) as u8, 0, 255, 255];
                let mut rgba: Vec<u8> = color
                    .iter()
                    .copied()
                    .cycle()
                    .take(width as usize * height as usize * 4)
                    .collect();
                let mut frame = gif::Frame::from_rgba_speed(width, height, &mut rgba, 10);
                frame.delay = delay_cs;
                encoder.write_frame(&frame).unwrap();
            }
        }
        std::fs::write(path, out).unwrap();
    }

    fn processor(size: u32, profile: &'static PerformanceProfile) -> AssetProcessor {
        AssetProcessor::new(
            EncoderConfig {
                display_size: size,
                ..EncoderConfig::default()
            },
            profile,
        )
    }

    #[test]
    fn test_gif_source_becomes_sampled_animation() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.gif");
        write_gif(&source, 20, 20, 45, 2);

        let data = processor(16, &BALANCED)
            .process(&source, CropRect::new(2, 2, 12, 12))
            .unwrap();
        let decoded = decode_gif(&data).unwrap();

        // 45 frames, budget 30: stride 2, 23 frames
        assert_eq!(decoded.frame_count(), 23);
        assert_eq!((decoded.canvas_width, decoded.canvas_height), (16, 16));
        // 20ms declared, clamped to the 50ms minimum
        assert!(decoded.patches.iter().all(|p| p.delay_ms == Some(50)));
    }

    #[test]
    fn test_round_trip_through_display_path() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.gif");
        let asset = dir.path().join("asset");
        write_gif(&source, 10, 10, 20, 12);

        processor(32, &LIGHT)
            .process_and_save(&source, CropRect::new(0, 0, 10, 10), &asset)
            .unwrap();

        let stored = std::fs::read(&asset).unwrap();
        let sequence = load_render_sequence(&stored, 32, &LIGHT).unwrap();
        // 20 frames, budget 15: stride 2, 10 frames; stored again at 10 frames
        assert_eq!(sequence.len(), 10);
        assert!(sequence.frames().iter().all(|f| f.delay_ms == 120));
    }

    #[test]
    fn test_still_source_becomes_png() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("photo.jpg");
        let image = RgbaImage::from_pixel(30, 20, Rgba([200, 100, 50, 255]));
        let mut out = Vec::new();
        image::DynamicImage::ImageRgba8(image)
            .to_rgb8()
            .write_to(&mut Cursor::new(&mut out), ImageFormat::Jpeg)
            .unwrap();
        std::fs::write(&source, out).unwrap();

        let data = processor(24, &BALANCED)
            .process(&source, CropRect::from_user(5.2, 0.0, 20.0, 20.0))
            .unwrap();
        assert_eq!(sniff(&data), SourceFormat::Png);
        let decoded = image::load_from_memory(&data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (24, 24));
    }

    #[test]
    fn test_out_of_canvas_crop_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.gif");
        write_gif(&source, 10, 10, 2, 10);

        // x + width runs past the canvas edge: clamped to the 4x10 strip
        let data = processor(16, &BALANCED)
            .process(&source, CropRect::new(6, 0, 10, 10))
            .unwrap();
        assert_eq!(decode_gif(&data).unwrap().frame_count(), 2);

        let result = processor(16, &BALANCED).process(&source, CropRect::new(10, 0, 5, 5));
        assert!(matches!(result, Err(Error::InvalidCrop(..))));
    }

    #[test]
    fn test_oversized_canvas_source_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("huge.gif");
        let mut out = Vec::new();
        {
            let mut encoder = gif::Encoder::new(&mut out, 65535, 65535, &[]).unwrap();
            let mut rgba = vec![255, 0, 0, 255];
            let frame = gif::Frame::from_rgba_speed(1, 1, &mut rgba, 10);
            encoder.write_frame(&frame).unwrap();
        }
        std::fs::write(&source, out).unwrap();

        let result = processor(32, &BALANCED).process(&source, CropRect::new(0, 0, 16, 16));
        assert!(matches!(
            result,
            Err(Error::Decoder(traymotion_decoder::Error::Decode(_)))
        ));
    }

    #[test]
    fn test_failed_save_leaves_asset_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let asset = dir.path().join("asset");
        std::fs::write(&asset, b"previous asset bytes").unwrap();

        let missing = dir.path().join("missing.gif");
        let result = processor(32, &BALANCED).process_and_save(
            &missing,
            CropRect::new(0, 0, 4, 4),
            &asset,
        );
        assert!(matches!(result, Err(Error::Io(_))));

        let garbage = dir.path().join("garbage.bin");
        std::fs::write(&garbage, b"definitely not an image").unwrap();
        let result = processor(32, &BALANCED).process_and_save(
            &garbage,
            CropRect::new(0, 0, 4, 4),
            &asset,
        );
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));

        assert_eq!(std::fs::read(&asset).unwrap(), b"previous asset bytes");
    }
}
