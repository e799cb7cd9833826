use std::{
    fs::File,
    io::Read as _,
    path::{Path, PathBuf},
};

use crate::{
    error::{FlipsheetError, FlipsheetResult},
    sniff::GIF_HEADER_LEN,
};

/// Where conversion input bytes come from: a local file or an http(s) URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ByteSource {
    Path(PathBuf),
    Url(String),
}

impl ByteSource {
    /// Classify a CLI-style input string. Anything that is not an http(s) URL
    /// is treated as a filesystem path.
    pub fn parse(input: &str) -> Self {
        if input.starts_with("http://") || input.starts_with("https://") {
            Self::Url(input.to_string())
        } else {
            Self::Path(PathBuf::from(input))
        }
    }
}

impl std::fmt::Display for ByteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Read at most the leading [`GIF_HEADER_LEN`] bytes of a file.
///
/// Used to sniff before committing to a full read; a file shorter than the
/// header yields however many bytes it has, and the sniffer rejects it.
pub fn read_header(path: &Path) -> FlipsheetResult<Vec<u8>> {
    let file = File::open(path)
        .map_err(|e| FlipsheetError::source(format!("open '{}': {e}", path.display())))?;

    let mut header = Vec::with_capacity(GIF_HEADER_LEN);
    file.take(GIF_HEADER_LEN as u64)
        .read_to_end(&mut header)
        .map_err(|e| FlipsheetError::source(format!("read header of '{}': {e}", path.display())))?;
    Ok(header)
}

/// Acquire the full byte content of a source.
///
/// Blocks until every byte is available; decoding never starts on a partial
/// stream.
pub fn fetch(source: &ByteSource) -> FlipsheetResult<Vec<u8>> {
    match source {
        ByteSource::Path(path) => std::fs::read(path)
            .map_err(|e| FlipsheetError::source(format!("read '{}': {e}", path.display()))),
        ByteSource::Url(url) => {
            let response = reqwest::blocking::get(url)
                .and_then(reqwest::blocking::Response::error_for_status)
                .map_err(|e| FlipsheetError::source(format!("fetch '{url}': {e}")))?;
            let bytes = response
                .bytes()
                .map_err(|e| FlipsheetError::source(format!("read body of '{url}': {e}")))?;
            Ok(bytes.to_vec())
        }
    }
}

/// Probe a URL's advertised content type with a HEAD request.
///
/// Remote header bytes are not cheaply inspectable, so the advertised
/// `Content-Type` stands in for the byte-header sniff. Returns `None` when the
/// probe fails or the server does not advertise a type; callers then fall back
/// to sniffing the fetched bytes.
pub fn probe_content_type(url: &str) -> Option<String> {
    let client = reqwest::blocking::Client::new();
    let response = client.head(url).send().ok()?;
    response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)?
        .to_str()
        .ok()
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn parse_classifies_urls_and_paths() {
        assert_eq!(
            ByteSource::parse("https://example.com/a.gif"),
            ByteSource::Url("https://example.com/a.gif".to_string())
        );
        assert_eq!(
            ByteSource::parse("http://example.com/a.gif"),
            ByteSource::Url("http://example.com/a.gif".to_string())
        );
        assert_eq!(
            ByteSource::parse("/tmp/a.gif"),
            ByteSource::Path(PathBuf::from("/tmp/a.gif"))
        );
        assert_eq!(
            ByteSource::parse("relative.gif"),
            ByteSource::Path(PathBuf::from("relative.gif"))
        );
    }

    #[test]
    fn read_header_caps_at_six_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("header.bin");
        let mut f = File::create(&path).unwrap();
        f.write_all(b"GIF89a-and-a-lot-more").unwrap();
        drop(f);

        let header = read_header(&path).unwrap();
        assert_eq!(header, b"GIF89a");
    }

    #[test]
    fn read_header_of_short_file_returns_what_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.bin");
        std::fs::write(&path, b"GI").unwrap();

        let header = read_header(&path).unwrap();
        assert_eq!(header, b"GI");
    }

    #[test]
    fn read_header_missing_file_is_source_error() {
        let err = read_header(Path::new("/definitely/not/here.gif")).unwrap_err();
        assert!(matches!(err, FlipsheetError::Source(_)));
    }
}
