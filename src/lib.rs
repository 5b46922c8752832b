//! Lenient parsing of SubRip (`.srt`) and WebVTT (`.vtt`) subtitles into timed cues.
//!
//! Subtitle files found in the wild are often slightly broken, so parsing never fails
//! on bad content. Blocks that do not make a cue are skipped and the rest of the
//! document is still returned.
//!
//! ```
//! let cues = subcue::parse_srt("1\n00:00:01,000 --> 00:00:02,000\nHello world\n\n");
//! assert_eq!(cues.len(), 1);
//! assert_eq!(cues[0].text, "Hello world");
//! ```

mod cue;
mod error;
mod parser;
mod segment;
mod srt;
pub mod timecode;
mod vtt;

#[cfg(feature = "tokio")]
pub mod nonblocking;

pub use cue::Cue;
pub use error::SubcueError;
pub use parser::{
    parse_srt, parse_srt_stream, parse_vtt, parse_vtt_stream, read_text, Format, ParseOptions,
    ParseReport, Parser,
};
