use crate::transcode::{PostProcessFlags, Transcoded};

/// Everything the downstream attachment step needs to configure a
/// frame-stepping driver over the spritesheet texture.
///
/// The driver advances at `rate` frames per 100 time-units and wraps at
/// `repeat_at`; `preview_crop` selects the first cell as a static preview in
/// UV space (`[x, y, width, height]`). The pass-through flags are echoed from
/// the request untouched; the core never interprets them.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlaybackDescriptor {
    pub columns: u32,
    pub rows: u32,
    pub frame_count: u32,
    /// Frames per 100 time-units (see [`crate::rate::reduce_rate`]).
    pub rate: f64,
    /// The driver wraps back to frame 0 when it reaches this count.
    pub repeat_at: u32,
    /// UV rectangle of the first cell: `[0, 0, 1/columns, 1/rows]`.
    pub preview_crop: [f64; 4],
    pub point_filtering: bool,
    pub uncompressed: bool,
}

impl PlaybackDescriptor {
    pub fn new(result: &Transcoded, post: PostProcessFlags) -> Self {
        Self {
            columns: result.layout.columns,
            rows: result.layout.rows,
            frame_count: result.frame_count,
            rate: result.rate,
            repeat_at: result.frame_count,
            preview_crop: [
                0.0,
                0.0,
                1.0 / f64::from(result.layout.columns),
                1.0 / f64::from(result.layout.rows),
            ],
            point_filtering: post.point_filtering,
            uncompressed: post.uncompressed,
        }
    }
}
