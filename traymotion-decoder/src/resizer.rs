//! Square resizing with a two-level quality hint

use crate::{Error, Result};
use image::imageops::{self, FilterType};
use image::RgbaImage;
use traymotion_core::ResizeQuality;

fn filter_for(quality: ResizeQuality) -> FilterType {
    match quality {
        ResizeQuality::Good => FilterType::Triangle,
        ResizeQuality::Best => FilterType::Lanczos3,
    }
}

/// Scales an image to `size` x `size`
pub fn resize_square(image: &RgbaImage, size: u32, quality: ResizeQuality) -> Result<RgbaImage> {
    if size == 0 {
        return Err(Error::InvalidSize(size));
    }
    if image.width() == 0 || image.height() == 0 {
        return Err(Error::NoFrames);
    }
    if image.dimensions() == (size, size) {
        return Ok(image.clone());
    }
    Ok(imageops::resize(image, size, size, filter_for(quality)))
}
