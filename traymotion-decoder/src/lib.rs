//! Traymotion Decoder Library
//!
//! Turns a stored image into frames ready for display: gif patches are
//! decoded, stacked onto an accumulation canvas according to their disposal
//! method, down-sampled under a performance profile and resized.

pub mod frame_compositor;
pub mod gif_decoder;
pub mod loader;
pub mod resizer;
pub mod sampler;

pub use frame_compositor::{composite_sampled, FrameCompositor};
pub use gif_decoder::{decode_gif, probe_gif, DecodedGif, GifFrames, GifInfo};
pub use loader::{detect_and_load, load_render_sequence, summarize, AssetSummary};
pub use resizer::resize_square;
pub use sampler::SamplePlan;

use traymotion_core::SourceFormat;

/// Result type for traymotion-decoder operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for traymotion-decoder operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Traymotion core error: {0}")]
    Core(#[from] traymotion_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(SourceFormat),

    #[error("No frames could be decoded")]
    NoFrames,

    #[error("Invalid target size: {0}")]
    InvalidSize(u32),
}
