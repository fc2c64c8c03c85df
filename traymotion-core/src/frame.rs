//! Frame data structures for the decode, composite and render stages

use image::RgbaImage;
use std::time::Duration;

/// Rectangle covered by one animation patch, relative to the logical canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchRect {
    /// Horizontal offset from the canvas origin
    pub left: u32,
    /// Vertical offset from the canvas origin
    pub top: u32,
    /// Patch width in pixels
    pub width: u32,
    /// Patch height in pixels
    pub height: u32,
}

impl PatchRect {
    /// Creates a new patch rectangle
    pub fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Returns true when the point lies inside the rectangle
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.left
            && y >= self.top
            && x < self.left.saturating_add(self.width)
            && y < self.top.saturating_add(self.height)
    }
}

/// What happens to the canvas after a frame has been shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisposalMethod {
    /// No disposal specified
    #[default]
    Unspecified,
    /// Leave the canvas as-is
    Keep,
    /// Clear to background before the next frame
    RestoreBackground,
    /// Restore the canvas to its state before this frame
    RestorePrevious,
}

impl DisposalMethod {
    /// Whether the compositor must clear the canvas before drawing the next patch.
    ///
    /// Only `RestoreBackground` clears; `RestorePrevious` keeps the canvas.
    pub fn clears_canvas(&self) -> bool {
        matches!(self, DisposalMethod::RestoreBackground)
    }
}

/// One decoded animation unit: a sub-image placed on the canvas
#[derive(Debug, Clone)]
pub struct RawPatch {
    /// Placement on the logical canvas
    pub rect: PatchRect,
    /// RGBA pixels covering `rect` only
    pub pixels: RgbaImage,
    /// Disposal applied after this patch
    pub disposal: DisposalMethod,
    /// Declared delay in milliseconds, `None` when absent or zero
    pub delay_ms: Option<u32>,
}

/// A full-canvas bitmap after applying one patch onto the accumulation surface
#[derive(Debug, Clone)]
pub struct CompositeFrame {
    /// Full logical-canvas bitmap
    pub image: RgbaImage,
    /// Delay declared by the patch that produced this frame
    pub delay_ms: Option<u32>,
}

/// A display-size bitmap paired with its clamped delay
#[derive(Debug, Clone)]
pub struct RenderFrame {
    /// Square bitmap at display size
    pub image: RgbaImage,
    /// Time this frame stays on screen, in milliseconds
    pub delay_ms: u32,
}

impl RenderFrame {
    /// Creates a new render frame
    pub fn new(image: RgbaImage, delay_ms: u32) -> Self {
        Self { image, delay_ms }
    }

    /// Delay as a `Duration`
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms as u64)
    }
}

/// Ordered frames cycled onto the icon surface
#[derive(Debug, Clone, Default)]
pub struct RenderSequence {
    frames: Vec<RenderFrame>,
}

impl RenderSequence {
    /// Creates a sequence from prepared frames
    pub fn new(frames: Vec<RenderFrame>) -> Self {
        Self { frames }
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true when there is nothing to show
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Gets a frame by index
    pub fn get(&self, index: usize) -> Option<&RenderFrame> {
        self.frames.get(index)
    }

    /// All frames in display order
    pub fn frames(&self) -> &[RenderFrame] {
        &self.frames
    }

    /// Sum of all frame delays in milliseconds
    pub fn total_duration_ms(&self) -> u64 {
        self.frames.iter().map(|f| f.delay_ms as u64).sum()
    }
}

impl From<Vec<RenderFrame>> for RenderSequence {
    fn from(frames: Vec<RenderFrame>) -> Self {
        Self::new(frames)
    }
}
