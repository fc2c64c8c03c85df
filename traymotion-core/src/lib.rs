//! Traymotion Core Library
//!
//! This library provides the data model shared by the Traymotion pipeline:
//! magic-byte format sniffing, raw and rendered frame types, the fixed
//! performance profiles, and the persisted settings document.

pub mod asset;
pub mod format;
pub mod frame;
pub mod paths;
pub mod profile;
pub mod settings;

pub use asset::RawAsset;
pub use format::{sniff, SourceFormat};
pub use frame::{
    CompositeFrame, DisposalMethod, PatchRect, RawPatch, RenderFrame, RenderSequence,
};
pub use paths::AppPaths;
pub use profile::{PerformanceProfile, ProfileKind, ProfileStore, ResizeQuality};
pub use settings::Settings;

/// Result type for traymotion-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for traymotion-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
