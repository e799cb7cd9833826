//! Flipsheet converts an animated GIF into a single static spritesheet image
//! plus the timing metadata a constant-rate flipbook player needs: grid
//! dimensions, frame count, and one average playback rate.
//!
//! The pipeline is a strict forward pass — sniff → decode → plan → reduce →
//! composite → encode — with I/O only at the two edges (byte acquisition in
//! [`source`], byte delivery from [`transcode`]). One conversion is one
//! synchronous unit of work that owns all of its buffers; independent
//! conversions share no state and can run concurrently.
//!
//! ```no_run
//! use flipsheet::{ByteSource, TranscodeRequest, transcode_source};
//!
//! let source = ByteSource::parse("animation.gif");
//! let result = transcode_source(&source, &TranscodeRequest::default())?;
//! std::fs::write("sheet.png", &result.bytes)?;
//! # Ok::<(), anyhow::Error>(())
//! ```
#![forbid(unsafe_code)]

pub mod composite;
pub mod decode;
pub mod encode;
pub mod error;
pub mod grid;
pub mod playback;
pub mod rate;
pub mod sniff;
pub mod source;
pub mod transcode;

pub use composite::composite;
pub use decode::{DecodedAnimation, DecodedFrame, decode_gif};
pub use encode::{OutputFormat, encode_spritesheet};
pub use error::{FlipsheetError, FlipsheetResult};
pub use grid::{GridLayout, plan_grid};
pub use playback::PlaybackDescriptor;
pub use rate::reduce_rate;
pub use source::ByteSource;
pub use transcode::{PostProcessFlags, Transcoded, TranscodeRequest, transcode, transcode_source};
