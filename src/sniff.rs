use crate::error::{FlipsheetError, FlipsheetResult};

/// Length of the GIF signature + version block at the start of every GIF.
pub const GIF_HEADER_LEN: usize = 6;

/// Content type that stands in for the byte-header check on remote sources.
pub const GIF_CONTENT_TYPE: &str = "image/gif";

const MAGIC_GIF87A: &[u8; GIF_HEADER_LEN] = b"GIF87a";
const MAGIC_GIF89A: &[u8; GIF_HEADER_LEN] = b"GIF89a";

/// Return `true` iff `header` starts with the `GIF87a` or `GIF89a` signature.
///
/// Fewer than 6 bytes is never a GIF. This is a pure prefix check and must run
/// before any decode attempt; it allocates nothing.
pub fn is_gif(header: &[u8]) -> bool {
    header.len() >= GIF_HEADER_LEN
        && (&header[..GIF_HEADER_LEN] == MAGIC_GIF87A || &header[..GIF_HEADER_LEN] == MAGIC_GIF89A)
}

/// Sniff `header`, mapping rejection onto the error taxonomy: a short input is
/// [`FlipsheetError::TooShortInput`], a wrong signature is
/// [`FlipsheetError::NotGif`]. Both signal fallback to a generic importer.
pub fn require_gif(header: &[u8]) -> FlipsheetResult<()> {
    if header.len() < GIF_HEADER_LEN {
        return Err(FlipsheetError::TooShortInput(header.len()));
    }
    if !is_gif(header) {
        return Err(FlipsheetError::not_gif(
            "magic bytes do not match GIF87a/GIF89a",
        ));
    }
    Ok(())
}

/// Return `true` when an advertised content type means `image/gif`.
///
/// Media-type parameters (`image/gif; charset=...`) are ignored and the match
/// is case-insensitive, per HTTP header semantics.
pub fn content_type_is_gif(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .is_some_and(|media_type| media_type.eq_ignore_ascii_case(GIF_CONTENT_TYPE))
}
