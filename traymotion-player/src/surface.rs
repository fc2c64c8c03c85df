//! Icon surfaces the scheduler draws onto

use std::path::PathBuf;
use traymotion_core::RenderFrame;
use traymotion_encoder::png_encoder::encode_png;
use traymotion_encoder::write_atomically;

/// Failure to update the icon
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("Icon surface has been destroyed")]
    Destroyed,

    #[error("Failed to update icon: {0}")]
    Update(String),
}

/// Something that can show one frame at a time, such as a tray icon
pub trait IconSurface {
    /// Replaces the displayed image
    fn set_icon(&mut self, frame: &RenderFrame) -> Result<(), SurfaceError>;
}

impl<S: IconSurface + ?Sized> IconSurface for Box<S> {
    fn set_icon(&mut self, frame: &RenderFrame) -> Result<(), SurfaceError> {
        (**self).set_icon(frame)
    }
}

/// Surface that only logs updates
#[derive(Debug, Default)]
pub struct LogSurface {
    updates: u64,
}

impl LogSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of icon updates so far
    pub fn updates(&self) -> u64 {
        self.updates
    }
}

impl IconSurface for LogSurface {
    fn set_icon(&mut self, frame: &RenderFrame) -> Result<(), SurfaceError> {
        self.updates += 1;
        tracing::trace!(
            update = self.updates,
            width = frame.image.width(),
            delay_ms = frame.delay_ms,
            "Icon updated"
        );
        Ok(())
    }
}

/// Surface that mirrors the current frame into a png file.
///
/// An external tray host can watch the file; each update replaces it atomically.
#[derive(Debug)]
pub struct FileSurface {
    path: PathBuf,
}

impl FileSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl IconSurface for FileSurface {
    fn set_icon(&mut self, frame: &RenderFrame) -> Result<(), SurfaceError> {
        let data = encode_png(&frame.image, 3).map_err(|e| SurfaceError::Update(e.to_string()))?;
        write_atomically(&self.path, &data).map_err(|e| SurfaceError::Update(e.to_string()))
    }
}

/// Surface that remembers what it was shown, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    /// Red channel of pixel (0, 0) of every frame shown
    pub shown: Vec<u8>,
    /// Fail once this many frames have been shown
    pub fail_after: Option<usize>,
}

#[cfg(test)]
impl IconSurface for RecordingSurface {
    fn set_icon(&mut self, frame: &RenderFrame) -> Result<(), SurfaceError> {
        if self.fail_after.is_some_and(|n| self.shown.len() >= n) {
            return Err(SurfaceError::Destroyed);
        }
        self.shown.push(frame.image.get_pixel(0, 0)[0]);
        Ok(())
    }
}
