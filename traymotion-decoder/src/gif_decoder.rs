//! GIF parsing into raw frame patches

use crate::{Error, Result};
use gif::{ColorOutput, DecodeOptions, Decoder, MemoryLimit};
use image::RgbaImage;
use std::num::NonZeroU64;
use traymotion_core::{DisposalMethod, PatchRect, RawPatch};

/// Upper bound for a single decoded buffer, frame or canvas
pub const MEMORY_LIMIT_BYTES: u64 = 64 * 1024 * 1024;

/// Header facts about a gif, read without decoding any pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GifInfo {
    /// Logical screen width
    pub canvas_width: u32,
    /// Logical screen height
    pub canvas_height: u32,
    /// Number of frames in the file
    pub frame_count: usize,
}

/// A fully decoded gif: logical canvas size plus every patch in file order
#[derive(Debug, Clone)]
pub struct DecodedGif {
    /// Logical screen width
    pub canvas_width: u32,
    /// Logical screen height
    pub canvas_height: u32,
    /// Patches in original order
    pub patches: Vec<RawPatch>,
}

impl DecodedGif {
    /// Number of patches
    pub fn frame_count(&self) -> usize {
        self.patches.len()
    }
}

fn open_decoder(data: &[u8]) -> Result<(Decoder<&[u8]>, u32, u32)> {
    let mut options = DecodeOptions::new();
    options.set_color_output(ColorOutput::RGBA);
    if let Some(limit) = NonZeroU64::new(MEMORY_LIMIT_BYTES) {
        options.set_memory_limit(MemoryLimit::Bytes(limit));
    }

    let decoder = options
        .read_info(data)
        .map_err(|e| Error::Decode(format!("unreadable gif header: {e}")))?;

    let width = decoder.width() as u32;
    let height = decoder.height() as u32;
    if width == 0 || height == 0 {
        return Err(Error::Decode(format!("empty gif canvas {width}x{height}")));
    }
    if width as u64 * height as u64 * 4 > MEMORY_LIMIT_BYTES {
        return Err(Error::Decode(format!(
            "gif canvas {width}x{height} exceeds the {MEMORY_LIMIT_BYTES} byte limit"
        )));
    }
    Ok((decoder, width, height))
}

/// Streams the patches of a gif one at a time.
///
/// Only the frame currently being read is held in memory.
pub struct GifFrames<'a> {
    decoder: Decoder<&'a [u8]>,
    canvas_width: u32,
    canvas_height: u32,
    read: usize,
}

impl<'a> GifFrames<'a> {
    /// Reads the header and checks the canvas against the memory limit
    pub fn open(data: &'a [u8]) -> Result<Self> {
        let (decoder, canvas_width, canvas_height) = open_decoder(data)?;
        Ok(Self {
            decoder,
            canvas_width,
            canvas_height,
            read: 0,
        })
    }

    /// Logical screen width
    pub fn canvas_width(&self) -> u32 {
        self.canvas_width
    }

    /// Logical screen height
    pub fn canvas_height(&self) -> u32 {
        self.canvas_height
    }

    /// Decodes the next patch, or `None` at the end of the file
    pub fn next_patch(&mut self) -> Result<Option<RawPatch>> {
        let index = self.read;
        let frame = match self
            .decoder
            .read_next_frame()
            .map_err(|e| Error::Decode(format!("frame {index}: {e}")))?
        {
            Some(frame) => frame,
            None => return Ok(None),
        };

        let rect = PatchRect::new(
            frame.left as u32,
            frame.top as u32,
            frame.width as u32,
            frame.height as u32,
        );
        let pixels = RgbaImage::from_raw(rect.width, rect.height, frame.buffer.to_vec())
            .ok_or_else(|| Error::Decode(format!("frame {index}: pixel buffer size mismatch")))?;

        // GIF delays are stored in centiseconds
        let delay_ms = match frame.delay {
            0 => None,
            cs => Some(cs as u32 * 10),
        };
        let disposal = map_disposal(frame.dispose);

        self.read += 1;
        Ok(Some(RawPatch {
            rect,
            pixels,
            disposal,
            delay_ms,
        }))
    }
}

/// Reads the canvas size and counts frames by walking frame headers only.
///
/// Fails with `Error::Decode` when the header is unreadable, the canvas is
/// empty or too large, or the file contains no frames.
pub fn probe_gif(data: &[u8]) -> Result<GifInfo> {
    let (mut decoder, canvas_width, canvas_height) = open_decoder(data)?;

    let mut frame_count = 0;
    while decoder
        .next_frame_info()
        .map_err(|e| Error::Decode(format!("frame {frame_count}: {e}")))?
        .is_some()
    {
        frame_count += 1;
    }

    if frame_count == 0 {
        return Err(Error::Decode("gif contains no frames".to_string()));
    }

    tracing::debug!(
        width = canvas_width,
        height = canvas_height,
        frames = frame_count,
        "Probed gif"
    );
    Ok(GifInfo {
        canvas_width,
        canvas_height,
        frame_count,
    })
}

/// Decodes every frame of a gif into RGBA patches.
///
/// Holds all patches at once; the display and save paths stream through
/// [`GifFrames`] instead.
pub fn decode_gif(data: &[u8]) -> Result<DecodedGif> {
    let mut frames = GifFrames::open(data)?;
    let mut patches = Vec::new();
    while let Some(patch) = frames.next_patch()? {
        patches.push(patch);
    }

    if patches.is_empty() {
        return Err(Error::Decode("gif contains no frames".to_string()));
    }

    Ok(DecodedGif {
        canvas_width: frames.canvas_width,
        canvas_height: frames.canvas_height,
        patches,
    })
}

fn map_disposal(method: gif::DisposalMethod) -> DisposalMethod {
    match method {
        gif::DisposalMethod::Any => DisposalMethod::Unspecified,
        gif::DisposalMethod::Keep => DisposalMethod::Keep,
        gif::DisposalMethod::Background => DisposalMethod::RestoreBackground,
        gif::DisposalMethod::Previous => DisposalMethod::RestorePrevious,
    }
}

/// Builds small gif fixtures for tests across the crate.
#[cfg(test)]
pub(crate) mod fixtures {
    use gif::{DisposalMethod, Encoder, Frame, Repeat};

    /// One frame description: rect, solid RGBA colour, delay (cs), disposal
    pub struct FrameSpec {
        pub left: u16,
        pub top: u16,
        pub width: u16,
        pub height: u16,
        pub color: [u8; 4],
        pub delay_cs: u16,
        pub dispose: DisposalMethod,
    }

    impl FrameSpec {
        pub fn full(width: u16, height: u16, color: [u8; 4], delay_cs: u16) -> Self {
            Self {
                left: 0,
                top: 0,
                width,
                height,
                color,
                delay_cs,
                dispose: DisposalMethod::Keep,
            }
        }
    }

    /// Encodes the frames into a gif with the given logical screen
    pub fn build_gif(width: u16, height: u16, frames: &[FrameSpec]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = Encoder::new(&mut out, width, height, &[]).unwrap();
            encoder.set_repeat(Repeat::Infinite).unwrap();
            for spec in frames {
                let mut rgba: Vec<u8> = spec
                    .color
                    .iter()
                    .copied()
                    .cycle()
                    .take(spec.width as usize * spec.height as usize * 4)
                    .collect();
                let mut frame = Frame::from_rgba_speed(spec.width, spec.height, &mut rgba, 10);
                frame.left = spec.left;
                frame.top = spec.top;
                frame.delay = spec.delay_cs;
                frame.dispose = spec.dispose;
                encoder.write_frame(&frame).unwrap();
            }
        }
        out
    }

    /// `count` full-canvas frames of alternating colours
    pub fn solid_frames(width: u16, height: u16, count: usize, delay_cs: u16) -> Vec<u8> {
        let frames: Vec<FrameSpec> = (0..count)
            .map(|i| {
                let color = if i % 2 == 0 {
                    [255, 0, 0, 255]
                } else {
                    [0, 0, 255, 255]
                };
                FrameSpec::full(width, height, color, delay_cs)
            })
            .collect();
        build_gif(width, height, &frames)
    }
}
