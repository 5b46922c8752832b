//! SubRip cue building.
//!
//! ```text
//! 1
//! 00:00:01,000 --> 00:00:04,000
//! Hello, world!
//!
//! ```

use crate::parser::{cue_text, BlockOutcome, ParseOptions};
use crate::segment::srt_blocks;
use crate::timecode::parse_srt_timecode;

use std::sync::LazyLock;

use regex::Regex;

static TIMING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\d,:]+)\s+-->\s+([\d,:]+)(?:\s,*)?$").unwrap());

pub(crate) fn build_cues(input: &str, options: &ParseOptions) -> Vec<BlockOutcome> {
    srt_blocks(input, options.accept_crlf, options.flush_trailing_block)
        .iter()
        .map(|block| build_cue(block, options))
        .collect()
}

fn build_cue(block: &str, options: &ParseOptions) -> BlockOutcome {
    if block.is_empty() {
        return BlockOutcome::Empty;
    }

    // Every line of a block ends in '\n', so the split leaves an empty last piece.
    // More than three pieces means sequence number, timing line and some text.
    let lines: Vec<&str> = block.split('\n').collect();
    if lines.len() <= 3 {
        return BlockOutcome::Malformed;
    }

    let caps = match TIMING_LINE.captures(lines[1]) {
        Some(caps) => caps,
        None => return BlockOutcome::Malformed,
    };
    let start = parse_srt_timecode(&caps[1]);
    let end = parse_srt_timecode(&caps[2]);

    BlockOutcome::from_timing(start, end, cue_text(&lines[2..]), options)
}
