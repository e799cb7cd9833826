use image::RgbaImage;

use crate::{
    decode::DecodedAnimation,
    error::{FlipsheetError, FlipsheetResult},
    grid::GridLayout,
};

/// Copy every frame of `anim` into its grid cell of a single RGBA raster.
///
/// Frames are placed in row-major order: frame `k` lands at cell
/// `(row = k / columns, col = k % columns)`, pixel offset
/// `(col * frame_width, row * frame_height)`. Rows are copied byte-exact with
/// no resampling. Cells past the last frame stay fully transparent.
///
/// The output raster is allocated once at its exact final size; this is the
/// dominant memory cost of a conversion. Any invariant violation aborts the
/// whole conversion — a partial spritesheet is never returned. The animation
/// is consumed, so its frame buffers are freed on return on every path.
pub fn composite(anim: DecodedAnimation, layout: &GridLayout) -> FlipsheetResult<RgbaImage> {
    let DecodedAnimation {
        frame_width,
        frame_height,
        frames,
    } = anim;

    if layout.columns == 0 || layout.rows == 0 {
        return Err(FlipsheetError::composite("grid layout has an empty axis"));
    }
    if layout.capacity() < frames.len() as u64 {
        return Err(FlipsheetError::composite(format!(
            "grid {}x{} cannot hold {} frames",
            layout.columns,
            layout.rows,
            frames.len()
        )));
    }

    let sheet_width = frame_width.checked_mul(layout.columns).ok_or_else(|| {
        FlipsheetError::composite("spritesheet width overflows pixel coordinates")
    })?;
    let sheet_height = frame_height.checked_mul(layout.rows).ok_or_else(|| {
        FlipsheetError::composite("spritesheet height overflows pixel coordinates")
    })?;

    let frame_row_bytes = frame_width as usize * 4;
    let frame_bytes = frame_row_bytes * frame_height as usize;
    let sheet_stride = sheet_width as usize * 4;

    // Zero-initialized, so unassigned cells come out fully transparent.
    let mut sheet = vec![0u8; sheet_stride * sheet_height as usize];

    for (k, frame) in frames.iter().enumerate() {
        if frame.rgba8.len() != frame_bytes {
            return Err(FlipsheetError::composite(format!(
                "frame {k} holds {} bytes, expected {frame_bytes}",
                frame.rgba8.len()
            )));
        }

        let col = k % layout.columns as usize;
        let row = k / layout.columns as usize;
        let x_offset_bytes = col * frame_row_bytes;
        let y_offset = row * frame_height as usize;

        for y in 0..frame_height as usize {
            let src_start = y * frame_row_bytes;
            let dst_start = (y_offset + y) * sheet_stride + x_offset_bytes;
            sheet[dst_start..dst_start + frame_row_bytes]
                .copy_from_slice(&frame.rgba8[src_start..src_start + frame_row_bytes]);
        }
    }

    RgbaImage::from_raw(sheet_width, sheet_height, sheet)
        .ok_or_else(|| FlipsheetError::composite("spritesheet buffer size mismatch"))
}

#[cfg(test)]
mod tests {
    use crate::decode::DecodedFrame;

    use super::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> DecodedFrame {
        let mut rgba8 = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            rgba8.extend_from_slice(&rgba);
        }
        DecodedFrame { rgba8, delay_cs: 10 }
    }

    fn pixel(sheet: &RgbaImage, x: u32, y: u32) -> [u8; 4] {
        sheet.get_pixel(x, y).0
    }

    #[test]
    fn frames_land_in_row_major_cells() {
        let anim = DecodedAnimation {
            frame_width: 2,
            frame_height: 2,
            frames: vec![
                solid(2, 2, [255, 0, 0, 255]),
                solid(2, 2, [0, 255, 0, 255]),
                solid(2, 2, [0, 0, 255, 255]),
            ],
        };
        let layout = GridLayout { columns: 2, rows: 2 };

        let sheet = composite(anim, &layout).unwrap();
        assert_eq!(sheet.dimensions(), (4, 4));

        // frame 0 at (0,0), frame 1 at (2,0), frame 2 at (0,2)
        assert_eq!(pixel(&sheet, 0, 0), [255, 0, 0, 255]);
        assert_eq!(pixel(&sheet, 1, 1), [255, 0, 0, 255]);
        assert_eq!(pixel(&sheet, 2, 0), [0, 255, 0, 255]);
        assert_eq!(pixel(&sheet, 3, 1), [0, 255, 0, 255]);
        assert_eq!(pixel(&sheet, 0, 2), [0, 0, 255, 255]);
        assert_eq!(pixel(&sheet, 1, 3), [0, 0, 255, 255]);
    }

    #[test]
    fn unassigned_trailing_cell_stays_transparent() {
        let anim = DecodedAnimation {
            frame_width: 2,
            frame_height: 2,
            frames: vec![
                solid(2, 2, [255, 0, 0, 255]),
                solid(2, 2, [0, 255, 0, 255]),
                solid(2, 2, [0, 0, 255, 255]),
            ],
        };
        let layout = GridLayout { columns: 2, rows: 2 };

        let sheet = composite(anim, &layout).unwrap();
        for y in 2..4 {
            for x in 2..4 {
                assert_eq!(pixel(&sheet, x, y), [0, 0, 0, 0]);
            }
        }
    }

    #[test]
    fn exact_pixel_mapping_for_a_nonuniform_frame() {
        // 2x1 frame with two distinct pixels, placed at cell (row 1, col 1).
        let mut frames = vec![solid(2, 1, [9, 9, 9, 255]); 3];
        frames.push(DecodedFrame {
            rgba8: vec![10, 20, 30, 255, 40, 50, 60, 255],
            delay_cs: 10,
        });
        let anim = DecodedAnimation {
            frame_width: 2,
            frame_height: 1,
            frames,
        };
        let layout = GridLayout { columns: 2, rows: 2 };

        let sheet = composite(anim, &layout).unwrap();
        // frame 3: row = 1, col = 1 → offset (2, 1)
        assert_eq!(pixel(&sheet, 2, 1), [10, 20, 30, 255]);
        assert_eq!(pixel(&sheet, 3, 1), [40, 50, 60, 255]);
    }

    #[test]
    fn corrupt_frame_buffer_aborts_with_composite_error() {
        let anim = DecodedAnimation {
            frame_width: 2,
            frame_height: 2,
            frames: vec![DecodedFrame {
                rgba8: vec![0u8; 7],
                delay_cs: 10,
            }],
        };
        let layout = GridLayout { columns: 1, rows: 1 };

        let err = composite(anim, &layout).unwrap_err();
        assert!(matches!(err, FlipsheetError::Composite(_)));
    }

    #[test]
    fn undersized_layout_is_rejected() {
        let anim = DecodedAnimation {
            frame_width: 2,
            frame_height: 2,
            frames: vec![solid(2, 2, [1, 2, 3, 255]); 3],
        };
        let layout = GridLayout { columns: 1, rows: 2 };

        let err = composite(anim, &layout).unwrap_err();
        assert!(matches!(err, FlipsheetError::Composite(_)));
    }
}
