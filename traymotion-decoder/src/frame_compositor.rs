//! Frame compositor for stacking gif patches onto an accumulation canvas

use crate::{GifFrames, Result, SamplePlan};
use image::{Pixel, Rgba, RgbaImage};
use traymotion_core::{CompositeFrame, RawPatch};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Running canvas that patches are drawn onto in file order.
///
/// Only two disposal behaviours exist: a patch that restores to background
/// clears the whole canvas before the *next* patch is drawn; every other
/// method leaves the canvas untouched.
pub struct FrameCompositor {
    canvas: RgbaImage,
    clear_before_next: bool,
    applied: usize,
}

impl FrameCompositor {
    /// Creates a transparent canvas of the logical screen size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: RgbaImage::from_pixel(width, height, TRANSPARENT),
            clear_before_next: false,
            applied: 0,
        }
    }

    /// Draws one patch at its offset, honouring the previous patch's disposal
    pub fn apply(&mut self, patch: &RawPatch) -> &RgbaImage {
        if self.clear_before_next {
            self.canvas.pixels_mut().for_each(|p| *p = TRANSPARENT);
        }

        overlay_patch(
            &mut self.canvas,
            &patch.pixels,
            patch.rect.left,
            patch.rect.top,
        );

        self.clear_before_next = patch.disposal.clears_canvas();
        self.applied += 1;
        &self.canvas
    }

    /// Copies the current canvas out as a composite frame
    pub fn snapshot(&self, delay_ms: Option<u32>) -> CompositeFrame {
        CompositeFrame {
            image: self.canvas.clone(),
            delay_ms,
        }
    }

    /// The accumulation canvas
    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Number of patches drawn so far
    pub fn applied(&self) -> usize {
        self.applied
    }
}

/// Composites streamed patches in order and hands out a snapshot for each sampled step.
///
/// Unsampled steps are still drawn so the canvas stays correct; each patch is
/// dropped once drawn and reading stops once the plan has nothing left to
/// select. Returns the number of frames passed to `visit`.
pub fn composite_sampled<F>(
    mut frames: GifFrames<'_>,
    plan: &SamplePlan,
    mut visit: F,
) -> Result<usize>
where
    F: FnMut(CompositeFrame) -> Result<()>,
{
    let last = match plan.last_index() {
        Some(last) => last,
        None => return Ok(0),
    };
    let mut compositor = FrameCompositor::new(frames.canvas_width(), frames.canvas_height());

    let mut accepted = 0;
    for index in 0..=last {
        let patch = match frames.next_patch()? {
            Some(patch) => patch,
            None => break,
        };
        compositor.apply(&patch);
        if plan.selects(index) {
            visit(compositor.snapshot(patch.delay_ms))?;
            accepted += 1;
        }
    }

    tracing::debug!(
        drawn = compositor.applied(),
        accepted,
        stride = plan.stride(),
        "Composited gif"
    );
    Ok(accepted)
}

/// Draws a patch onto the canvas at the given offset, clipping to the canvas.
///
/// Opaque pixels replace, fully transparent pixels leave the canvas as-is,
/// anything in between is alpha blended.
fn overlay_patch(base: &mut RgbaImage, overlay: &RgbaImage, x: u32, y: u32) {
    let copy_width = overlay.width().min(base.width().saturating_sub(x));
    let copy_height = overlay.height().min(base.height().saturating_sub(y));

    for src_y in 0..copy_height {
        for src_x in 0..copy_width {
            let src = *overlay.get_pixel(src_x, src_y);
            match src[3] {
                0 => {}
                255 => base.put_pixel(x + src_x, y + src_y, src),
                _ => base.get_pixel_mut(x + src_x, y + src_y).blend(&src),
            }
        }
    }
}
