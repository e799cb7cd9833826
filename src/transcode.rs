use crate::{
    composite::composite,
    decode::decode_gif,
    encode::{OutputFormat, encode_spritesheet},
    error::{FlipsheetError, FlipsheetResult},
    grid::{GridLayout, plan_grid},
    rate::reduce_rate,
    sniff,
    source::{self, ByteSource},
};

/// Post-processing hints the core passes through untouched to the downstream
/// attachment step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PostProcessFlags {
    pub point_filtering: bool,
    pub uncompressed: bool,
}

/// Immutable input for one conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscodeRequest {
    /// Lay frames out in a near-square grid instead of a single strip.
    pub square_layout: bool,
    pub format: OutputFormat,
    /// Opaque pass-through; never read by the core.
    pub post: PostProcessFlags,
}

impl Default for TranscodeRequest {
    fn default() -> Self {
        Self {
            square_layout: true,
            format: OutputFormat::Png,
            post: PostProcessFlags::default(),
        }
    }
}

/// The output tuple consumed by the downstream animation-attachment step.
#[derive(Clone, Debug)]
pub struct Transcoded {
    /// Encoded spritesheet image.
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
    pub layout: GridLayout,
    pub frame_count: u32,
    /// Frames per 100 time-units.
    pub rate: f64,
}

/// Convert an in-memory GIF byte stream into a spritesheet.
///
/// Stages run strictly in order: sniff → decode → plan → reduce → composite →
/// encode. Non-GIF input is rejected before any decode with an error whose
/// [`FlipsheetError::signals_fallback`] is `true`, so the caller can route the
/// bytes to a generic image importer instead of failing the operation. All
/// intermediate buffers (decoded frames, the raster) are owned by this call
/// and freed on every exit path.
#[tracing::instrument(skip(bytes, request), fields(input_len = bytes.len()))]
pub fn transcode(bytes: &[u8], request: &TranscodeRequest) -> FlipsheetResult<Transcoded> {
    sniff::require_gif(bytes)?;

    let anim = decode_gif(bytes)?;
    let frame_count = anim.frame_count();
    tracing::debug!(
        frames = frame_count,
        width = anim.frame_width,
        height = anim.frame_height,
        "decoded gif"
    );

    let layout = plan_grid(
        frame_count,
        anim.frame_width,
        anim.frame_height,
        request.square_layout,
    )?;
    let rate = reduce_rate(&anim.delays_cs())?;
    tracing::debug!(
        columns = layout.columns,
        rows = layout.rows,
        rate,
        "planned layout"
    );

    let sheet = composite(anim, &layout)?;
    let bytes = encode_spritesheet(&sheet, request.format)?;

    Ok(Transcoded {
        bytes,
        format: request.format,
        layout,
        frame_count,
        rate,
    })
}

/// Convert from a byte source, pre-checking cheaply where possible.
///
/// Local files are sniffed from their first 6 bytes before the full read.
/// Remote sources are probed with a HEAD request; an advertised content type
/// other than `image/gif` is rejected up front, while a missing or failed
/// probe falls back to sniffing the fetched bytes. The fetch completes before
/// decoding starts.
pub fn transcode_source(
    source: &ByteSource,
    request: &TranscodeRequest,
) -> FlipsheetResult<Transcoded> {
    match source {
        ByteSource::Path(path) => {
            let header = source::read_header(path)?;
            sniff::require_gif(&header)?;
        }
        ByteSource::Url(url) => {
            if let Some(content_type) = source::probe_content_type(url)
                && !sniff::content_type_is_gif(&content_type)
            {
                return Err(FlipsheetError::not_gif(format!(
                    "advertised content type '{content_type}' is not {}",
                    sniff::GIF_CONTENT_TYPE
                )));
            }
        }
    }

    let bytes = source::fetch(source)?;
    transcode(&bytes, request)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_gif_bytes_are_rejected_before_decode() {
        let err = transcode(b"\x89PNG\r\n\x1a\n....", &TranscodeRequest::default()).unwrap_err();
        assert!(matches!(err, FlipsheetError::NotGif(_)));
        assert!(err.signals_fallback());
    }

    #[test]
    fn short_input_is_rejected_before_decode() {
        let err = transcode(b"GIF", &TranscodeRequest::default()).unwrap_err();
        assert!(matches!(err, FlipsheetError::TooShortInput(3)));
        assert!(err.signals_fallback());
    }

    #[test]
    fn default_request_prefers_square_png() {
        let request = TranscodeRequest::default();
        assert!(request.square_layout);
        assert_eq!(request.format, OutputFormat::Png);
        assert_eq!(request.post, PostProcessFlags::default());
    }

    #[test]
    fn missing_file_surfaces_as_source_error() {
        let source = ByteSource::parse("/no/such/file.gif");
        let err = transcode_source(&source, &TranscodeRequest::default()).unwrap_err();
        assert!(matches!(err, FlipsheetError::Source(_)));
    }
}
