pub type FlipsheetResult<T> = Result<T, FlipsheetError>;

#[derive(thiserror::Error, Debug)]
pub enum FlipsheetError {
    /// The sniff step determined the input is not a GIF. Callers should route
    /// the bytes to a generic image importer instead of failing the import.
    #[error("not a gif: {0}")]
    NotGif(String),

    /// Fewer than 6 header bytes were available. Treated like [`Self::NotGif`].
    #[error("input too short to sniff: {0} bytes")]
    TooShortInput(usize),

    #[error("source error: {0}")]
    Source(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("composite error: {0}")]
    Composite(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlipsheetError {
    pub fn not_gif(msg: impl Into<String>) -> Self {
        Self::NotGif(msg.into())
    }

    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn composite(msg: impl Into<String>) -> Self {
        Self::Composite(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Return `true` when the input was rejected before decoding and the
    /// caller should fall back to a non-animated import path.
    pub fn signals_fallback(&self) -> bool {
        matches!(self, Self::NotGif(_) | Self::TooShortInput(_))
    }
}
