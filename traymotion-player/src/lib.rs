//! Traymotion Player Library
//!
//! Cycles a render sequence onto an icon surface. All mutable state lives in
//! one [`AnimationEngine`]; ticks come from an injectable [`TickTimer`] so the
//! loop can be driven by real threads or stepped by hand.

pub mod engine;
pub mod runtime;
pub mod scheduler;
pub mod surface;
pub mod timer;

pub use engine::{AnimationEngine, StatusSummary};
pub use runtime::PlayerEvent;
pub use scheduler::{AnimationScheduler, SchedulerState};
pub use surface::{FileSurface, IconSurface, LogSurface, SurfaceError};
pub use timer::{ChannelTimer, ManualTimer, TickTimer, TickToken};

use std::path::PathBuf;

/// Result type for traymotion-player operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for traymotion-player operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Traymotion decoder error: {0}")]
    Decoder(#[from] traymotion_decoder::Error),

    #[error("Traymotion encoder error: {0}")]
    Encoder(#[from] traymotion_encoder::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No stored icon asset at {0}")]
    NoAsset(PathBuf),
}
