//! Display-path loading and editor previews

use crate::{
    composite_sampled, probe_gif, resize_square, Error, FrameCompositor, GifFrames, Result,
    SamplePlan,
};
use image::{ImageFormat, ImageReader, RgbaImage};
use std::io::Cursor;
use traymotion_core::{sniff, PerformanceProfile, RenderFrame, RenderSequence, SourceFormat};

/// How long a still image stays up; it is shown once and never re-ticked
pub const STATIC_FRAME_DELAY_MS: u32 = 1000;

/// Shape of a stored asset as the display path would see it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSummary {
    /// Sniffed container format
    pub format: SourceFormat,
    /// Canvas width
    pub width: u32,
    /// Canvas height
    pub height: u32,
    /// Frames in the file
    pub frame_count: usize,
    /// Frames left after sampling under the profile
    pub sampled_frames: usize,
}

fn image_format(format: SourceFormat) -> Result<ImageFormat> {
    match format {
        SourceFormat::Png => Ok(ImageFormat::Png),
        SourceFormat::Jpg => Ok(ImageFormat::Jpeg),
        other => Err(Error::UnsupportedFormat(other)),
    }
}

/// Decodes a png or jpg into RGBA
pub fn decode_static(data: &[u8], format: SourceFormat) -> Result<RgbaImage> {
    let image = image::load_from_memory_with_format(data, image_format(format)?)?;
    Ok(image.to_rgba8())
}

/// Builds the render sequence for a stored asset.
///
/// Gifs are composited, stride-sampled to the profile's frame budget, resized
/// to `size` and given clamped delays. Stills become a single frame.
pub fn load_render_sequence(
    data: &[u8],
    size: u32,
    profile: &PerformanceProfile,
) -> Result<RenderSequence> {
    let format = sniff(data);
    let frames = match format {
        SourceFormat::Gif => {
            let info = probe_gif(data)?;
            let plan = SamplePlan::new(info.frame_count, profile.max_frames);
            let mut frames = Vec::with_capacity(plan.len());
            composite_sampled(GifFrames::open(data)?, &plan, |composite| {
                let image = resize_square(&composite.image, size, profile.quality)?;
                frames.push(RenderFrame::new(
                    image,
                    profile.effective_delay(composite.delay_ms),
                ));
                Ok(())
            })?;
            frames
        }
        SourceFormat::Png | SourceFormat::Jpg => {
            let image = decode_static(data, format)?;
            let image = resize_square(&image, size, profile.quality)?;
            vec![RenderFrame::new(image, STATIC_FRAME_DELAY_MS)]
        }
        SourceFormat::Unknown => return Err(Error::UnsupportedFormat(format)),
    };

    if frames.is_empty() {
        return Err(Error::NoFrames);
    }

    tracing::debug!(%format, size, frames = frames.len(), "Built render sequence");
    Ok(RenderSequence::new(frames))
}

/// Decodes a source for the editor preview.
///
/// Only the first frame of a gif is read and composited.
pub fn detect_and_load(data: &[u8]) -> Result<(SourceFormat, RgbaImage)> {
    let format = sniff(data);
    let preview = match format {
        SourceFormat::Gif => {
            let mut frames = GifFrames::open(data)?;
            let first = frames.next_patch()?.ok_or(Error::NoFrames)?;
            let mut compositor =
                FrameCompositor::new(frames.canvas_width(), frames.canvas_height());
            compositor.apply(&first).clone()
        }
        SourceFormat::Png | SourceFormat::Jpg => decode_static(data, format)?,
        SourceFormat::Unknown => return Err(Error::UnsupportedFormat(format)),
    };
    Ok((format, preview))
}

/// Describes an asset without resizing any frames
pub fn summarize(data: &[u8], profile: &PerformanceProfile) -> Result<AssetSummary> {
    let format = sniff(data);
    match format {
        SourceFormat::Gif => {
            let info = probe_gif(data)?;
            let plan = SamplePlan::new(info.frame_count, profile.max_frames);
            Ok(AssetSummary {
                format,
                width: info.canvas_width,
                height: info.canvas_height,
                frame_count: info.frame_count,
                sampled_frames: plan.len(),
            })
        }
        SourceFormat::Png | SourceFormat::Jpg => {
            let (width, height) =
                ImageReader::with_format(Cursor::new(data), image_format(format)?)
                    .into_dimensions()?;
            Ok(AssetSummary {
                format,
                width,
                height,
                frame_count: 1,
                sampled_frames: 1,
            })
        }
        SourceFormat::Unknown => Err(Error::UnsupportedFormat(format)),
    }
}
