//! User crop rectangles and their clamping against the source canvas

use crate::{Error, Result};
use image::{imageops, RgbaImage};

/// Crop requested by the editor, in source canvas pixels.
///
/// Values are signed because the editor can report a rectangle that hangs
/// off the top-left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

/// A crop clamped to lie fully inside a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// Creates a crop rectangle from integer coordinates
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rounds fractional editor coordinates to whole pixels
    pub fn from_user(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            x.round() as i64,
            y.round() as i64,
            width.round() as i64,
            height.round() as i64,
        )
    }

    /// Intersects the rectangle with a `canvas_width` x `canvas_height` canvas.
    ///
    /// Parts outside the canvas are cut away; an empty intersection is an error.
    pub fn clamp_to(&self, canvas_width: u32, canvas_height: u32) -> Result<CanvasRegion> {
        let invalid = || Error::InvalidCrop(*self, canvas_width, canvas_height);
        if self.width <= 0 || self.height <= 0 {
            return Err(invalid());
        }

        let x0 = self.x.max(0);
        let y0 = self.y.max(0);
        let x1 = self.x.saturating_add(self.width).min(canvas_width as i64);
        let y1 = self.y.saturating_add(self.height).min(canvas_height as i64);
        if x1 <= x0 || y1 <= y0 {
            return Err(invalid());
        }

        Ok(CanvasRegion {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }
}

impl CanvasRegion {
    /// Copies the region out of a full-canvas image
    pub fn apply(&self, image: &RgbaImage) -> RgbaImage {
        imageops::crop_imm(image, self.x, self.y, self.width, self.height).to_image()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_from_user_rounds() {
        assert_eq!(
            CropRect::from_user(1.4, 2.5, 10.6, 9.49),
            CropRect::new(1, 3, 11, 9)
        );
    }

    #[test]
    fn test_inside_canvas_is_unchanged() {
        let region = CropRect::new(2, 3, 4, 5).clamp_to(10, 10).unwrap();
        assert_eq!(
            region,
            CanvasRegion {
                x: 2,
                y: 3,
                width: 4,
                height: 5
            }
        );
    }

    #[test]
    fn test_out_of_canvas_is_clamped() {
        let region = CropRect::new(6, -2, 10, 5).clamp_to(10, 8).unwrap();
        assert_eq!(
            region,
            CanvasRegion {
                x: 6,
                y: 0,
                width: 4,
                height: 3
            }
        );
    }

    #[test]
    fn test_disjoint_or_empty_fails() {
        assert!(matches!(
            CropRect::new(10, 0, 5, 5).clamp_to(10, 10),
            Err(Error::InvalidCrop(..))
        ));
        assert!(matches!(
            CropRect::new(-8, -8, 5, 5).clamp_to(10, 10),
            Err(Error::InvalidCrop(..))
        ));
        assert!(matches!(
            CropRect::new(0, 0, 0, 5).clamp_to(10, 10),
            Err(Error::InvalidCrop(..))
        ));
    }

    #[test]
    fn test_apply_copies_region() {
        let mut image = RgbaImage::new(4, 4);
        image.put_pixel(3, 3, Rgba([1, 2, 3, 255]));
        let region = CropRect::new(2, 2, 5, 5).clamp_to(4, 4).unwrap();
        let cropped = region.apply(&image);
        assert_eq!(cropped.dimensions(), (2, 2));
        assert_eq!(cropped.get_pixel(1, 1), &Rgba([1, 2, 3, 255]));
    }
}
