//! Traymotion Encoder Library
//!
//! This library turns a user-selected source image into the single stored
//! icon asset: crop in full canvas coordinates, resize to the display size,
//! then re-encode as an animated gif or a static png.

pub mod asset_writer;
pub mod crop;
pub mod gif_encoder;
pub mod pipeline;
pub mod png_encoder;

pub use asset_writer::write_atomically;
pub use crop::{CanvasRegion, CropRect};
pub use pipeline::AssetProcessor;

use traymotion_core::SourceFormat;

/// Result type for traymotion-encoder operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for traymotion-encoder operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Traymotion decoder error: {0}")]
    Decoder(#[from] traymotion_decoder::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Crop rectangle {0:?} does not overlap the {1}x{2} canvas")]
    InvalidCrop(CropRect, u32, u32),

    #[error("Unsupported source format: {0}")]
    UnsupportedFormat(SourceFormat),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Encoder configuration
#[derive(Debug, Clone)]
pub struct EncoderConfig {
    /// Side length of the stored square icon, in pixels
    pub display_size: u32,
    /// GIF quantizer speed (1-30, lower is better quality)
    pub gif_speed: i32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            display_size: traymotion_core::settings::DEFAULT_SIZE,
            gif_speed: 10,
        }
    }
}
