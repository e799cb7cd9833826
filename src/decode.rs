use std::io::Cursor;

use image::{AnimationDecoder as _, codecs::gif::GifDecoder};

use crate::error::{FlipsheetError, FlipsheetResult};

/// Delay substituted for malformed zero-delay frames, in centiseconds.
///
/// Matches the common GIF-viewer convention of treating a 0 delay as 0.1 s.
pub const DEFAULT_DELAY_CS: u32 = 10;

/// One decoded frame: straight-alpha RGBA8, tightly packed, row-major.
#[derive(Clone, Debug)]
pub struct DecodedFrame {
    pub rgba8: Vec<u8>,
    /// Display duration in centiseconds, already normalized to be >= 1.
    pub delay_cs: u32,
}

/// An ordered frame sequence with uniform dimensions.
///
/// Owned exclusively by one conversion; moving it into the compositor frees
/// the pixel buffers at the end of the conversion on every path.
#[derive(Clone, Debug)]
pub struct DecodedAnimation {
    pub frame_width: u32,
    pub frame_height: u32,
    pub frames: Vec<DecodedFrame>,
}

impl DecodedAnimation {
    pub fn frame_count(&self) -> u32 {
        self.frames.len() as u32
    }

    pub fn delays_cs(&self) -> Vec<u32> {
        self.frames.iter().map(|f| f.delay_cs).collect()
    }
}

/// Decode a GIF byte stream into a [`DecodedAnimation`].
///
/// Delegates pixel decoding (palette expansion, interlacing, frame disposal)
/// to the `image` GIF codec, which yields full-canvas RGBA frames. This layer
/// converts per-frame delays to centiseconds, normalizes zero delays, and
/// enforces the uniform-dimensions invariant.
pub fn decode_gif(bytes: &[u8]) -> FlipsheetResult<DecodedAnimation> {
    let decoder = GifDecoder::new(Cursor::new(bytes))
        .map_err(|e| FlipsheetError::decode(format!("gif stream rejected: {e}")))?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| FlipsheetError::decode(format!("gif frame decode failed: {e}")))?;

    if frames.is_empty() {
        return Err(FlipsheetError::decode("gif contains no frames"));
    }

    let (frame_width, frame_height) = frames[0].buffer().dimensions();
    if frame_width == 0 || frame_height == 0 {
        return Err(FlipsheetError::decode("gif frames have zero dimensions"));
    }

    let mut decoded = Vec::with_capacity(frames.len());
    for (index, frame) in frames.into_iter().enumerate() {
        let delay_cs = match delay_centis(frame.delay()) {
            0 => {
                tracing::warn!(frame = index, "zero frame delay, using {DEFAULT_DELAY_CS}cs");
                DEFAULT_DELAY_CS
            }
            cs => cs,
        };

        let buffer = frame.into_buffer();
        if buffer.dimensions() != (frame_width, frame_height) {
            let (w, h) = buffer.dimensions();
            return Err(FlipsheetError::composite(format!(
                "frame {index} is {w}x{h}, expected {frame_width}x{frame_height}"
            )));
        }

        decoded.push(DecodedFrame {
            rgba8: buffer.into_raw(),
            delay_cs,
        });
    }

    Ok(DecodedAnimation {
        frame_width,
        frame_height,
        frames: decoded,
    })
}

/// Convert the codec's millisecond ratio to centiseconds, rounding half up.
///
/// GIF stores delays natively in centiseconds, so for real GIF input this is
/// exact.
fn delay_centis(delay: image::Delay) -> u32 {
    let (numer_ms, denom) = delay.numer_denom_ms();
    if denom == 0 {
        return 0;
    }
    let numer = u64::from(numer_ms);
    let denom = u64::from(denom);
    ((numer + denom * 5) / (denom * 10)) as u32
}
