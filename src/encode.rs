use std::io::Cursor;

use image::{
    ExtendedColorType, ImageEncoder as _, RgbaImage, codecs::jpeg::JpegEncoder,
    codecs::png::PngEncoder,
};

use crate::error::{FlipsheetError, FlipsheetResult};

/// Requested output encoding for the spritesheet raster.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl OutputFormat {
    /// File extension for the encoded bytes.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// Serialize the composited raster to bytes in the requested format.
///
/// PNG keeps the full RGBA channel set. Baseline JPEG carries no alpha, so the
/// raster is flattened to RGB8 first by discarding the alpha channel;
/// transparent (zeroed) filler cells come out black.
pub fn encode_spritesheet(sheet: &RgbaImage, format: OutputFormat) -> FlipsheetResult<Vec<u8>> {
    let (width, height) = sheet.dimensions();
    let mut bytes = Vec::new();

    match format {
        OutputFormat::Png => {
            PngEncoder::new(Cursor::new(&mut bytes))
                .write_image(sheet.as_raw(), width, height, ExtendedColorType::Rgba8)
                .map_err(|e| FlipsheetError::encode(format!("png encode failed: {e}")))?;
        }
        OutputFormat::Jpeg => {
            let rgb = flatten_to_rgb8(sheet);
            JpegEncoder::new(Cursor::new(&mut bytes))
                .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
                .map_err(|e| FlipsheetError::encode(format!("jpeg encode failed: {e}")))?;
        }
    }

    Ok(bytes)
}

fn flatten_to_rgb8(sheet: &RgbaImage) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(sheet.as_raw().len() / 4 * 3);
    for px in sheet.as_raw().chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }
    rgb
}
