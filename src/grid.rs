use crate::error::{FlipsheetError, FlipsheetResult};

/// The (columns, rows) tiling arrangement of frames within a spritesheet.
///
/// Invariants: `columns >= 1`, `rows >= 1`, `columns * rows >= frame_count`
/// for the frame count the layout was planned for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GridLayout {
    pub columns: u32,
    pub rows: u32,
}

impl GridLayout {
    /// Total number of cells in the grid.
    pub fn capacity(self) -> u64 {
        u64::from(self.columns) * u64::from(self.rows)
    }
}

/// Decide the grid dimensions for `frame_count` frames of
/// `frame_width x frame_height` pixels.
///
/// With `square_layout` off the result is a single horizontal strip. With it
/// on, the column count is `round(sqrt(frame_count / aspect))` where `aspect`
/// is the per-frame width/height ratio; this keeps the overall sheet close to
/// square without skewing it for non-square frames. The formula is kept
/// exactly as-is, including its occasionally suboptimal packing for extreme
/// aspect ratios, so existing sheets keep their dimensions.
pub fn plan_grid(
    frame_count: u32,
    frame_width: u32,
    frame_height: u32,
    square_layout: bool,
) -> FlipsheetResult<GridLayout> {
    if frame_count == 0 {
        return Err(FlipsheetError::validation("frame count must be > 0"));
    }
    if frame_width == 0 || frame_height == 0 {
        return Err(FlipsheetError::validation(
            "frame dimensions must be non-zero",
        ));
    }

    if !square_layout {
        return Ok(GridLayout {
            columns: frame_count,
            rows: 1,
        });
    }

    // A single frame is always a 1x1 grid, whatever its aspect ratio.
    if frame_count == 1 {
        return Ok(GridLayout {
            columns: 1,
            rows: 1,
        });
    }

    let aspect = f64::from(frame_width) / f64::from(frame_height);
    let ideal_columns = (f64::from(frame_count) / aspect).sqrt().round();
    // Rounding can hit 0 for very wide frames; never produce an empty column.
    let columns = (ideal_columns as u32).max(1);
    let rows = frame_count.div_ceil(columns);

    Ok(GridLayout { columns, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_layout_is_one_row() {
        for n in [1, 2, 7, 16, 100] {
            let layout = plan_grid(n, 32, 32, false).unwrap();
            assert_eq!(layout, GridLayout { columns: n, rows: 1 });
        }
    }

    #[test]
    fn single_frame_is_one_by_one_for_any_aspect() {
        for (w, h) in [(32, 32), (25, 100), (100, 25), (1, 500)] {
            let layout = plan_grid(1, w, h, true).unwrap();
            assert_eq!(layout, GridLayout { columns: 1, rows: 1 });
        }
    }

    #[test]
    fn sixteen_square_frames_make_a_four_by_four() {
        let layout = plan_grid(16, 64, 64, true).unwrap();
        assert_eq!(layout, GridLayout { columns: 4, rows: 4 });
    }

    #[test]
    fn very_wide_frames_clamp_columns_to_one() {
        // aspect = 100, sqrt(2/100) rounds to 0 without the clamp.
        let layout = plan_grid(2, 100, 1, true).unwrap();
        assert_eq!(layout, GridLayout { columns: 1, rows: 2 });
    }

    #[test]
    fn capacity_covers_frame_count_across_a_sweep() {
        for n in 1..=64 {
            for (w, h) in [(16, 16), (64, 16), (16, 64), (3, 7)] {
                for square in [false, true] {
                    let layout = plan_grid(n, w, h, square).unwrap();
                    assert!(layout.columns >= 1);
                    assert!(layout.rows >= 1);
                    assert!(
                        layout.capacity() >= u64::from(n),
                        "{n} frames at {w}x{h} square={square} got {layout:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn degenerate_inputs_are_rejected() {
        assert!(plan_grid(0, 16, 16, true).is_err());
        assert!(plan_grid(4, 0, 16, true).is_err());
        assert!(plan_grid(4, 16, 0, false).is_err());
    }
}
