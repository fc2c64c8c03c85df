//! Animated gif encoding

use crate::{Error, Result};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};
use traymotion_core::RenderFrame;

/// Encodes frames into an infinitely repeating gif.
///
/// Each frame keeps its own delay; gif stores delays in centiseconds, so
/// only multiples of 10ms survive a round trip exactly.
pub fn encode_animation(frames: Vec<RenderFrame>, speed: i32) -> Result<Vec<u8>> {
    if frames.is_empty() {
        return Err(Error::OperationFailed("no frames to encode".to_string()));
    }

    let count = frames.len();
    let mut output = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut output, speed);
        encoder.set_repeat(Repeat::Infinite)?;

        for frame in frames {
            let delay = Delay::from_numer_denom_ms(frame.delay_ms, 1);
            encoder.encode_frame(Frame::from_parts(frame.image, 0, 0, delay))?;
        }
    } // encoder dropped here, trailer flushed to output

    tracing::debug!(frames = count, bytes = output.len(), "Encoded gif");
    Ok(output)
}
