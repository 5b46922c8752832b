//! WebVTT cue building.
//!
//! Cue identifiers are allowed before the timing line, and cue settings after the end
//! timecode are ignored. Any block mentioning `WEBVTT` is taken for the file header.

use crate::parser::{cue_text, BlockOutcome, ParseOptions};
use crate::segment::vtt_blocks;
use crate::timecode::parse_vtt_timecode;

use std::sync::LazyLock;

use regex::Regex;

static TIMING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\d\.:]+)\s+-->\s+([\d\.:]+)(?:\s.*)?$").unwrap());

const HEADER: &str = "webvtt";

pub(crate) fn build_cues(input: &str, options: &ParseOptions) -> Vec<BlockOutcome> {
    vtt_blocks(input)
        .iter()
        .map(|block| build_cue(block, options))
        .collect()
}

fn build_cue(block: &str, options: &ParseOptions) -> BlockOutcome {
    if block.to_lowercase().contains(HEADER) {
        return BlockOutcome::Header;
    }

    let lines: Vec<&str> = block.split('\n').collect();
    let (index, caps) = match lines
        .iter()
        .enumerate()
        .find_map(|(i, line)| TIMING_LINE.captures(line).map(|caps| (i, caps)))
    {
        Some(found) => found,
        None => return BlockOutcome::Malformed,
    };
    let start = parse_vtt_timecode(&caps[1]);
    let end = parse_vtt_timecode(&caps[2]);

    BlockOutcome::from_timing(start, end, cue_text(&lines[index + 1..]), options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kept(outcome: BlockOutcome) -> (u64, u64, String) {
        match outcome {
            BlockOutcome::Kept { cue, .. } => (
                cue.start.as_millis() as u64,
                cue.end.as_millis() as u64,
                cue.text,
            ),
            other => panic!("block was not kept: {:?}", other),
        }
    }

    #[test]
    fn header_blocks_are_dropped() {
        for block in ["WEBVTT\n", "webvtt - some title\n", "WebVTT\nKind: captions\n"] {
            let outcome = build_cue(block, &ParseOptions::default());
            assert!(matches!(outcome, BlockOutcome::Header), "{:?}", block);
        }
    }

    #[test]
    fn cue_mentioning_header_is_dropped() {
        let outcome = build_cue(
            "00:00:01.000 --> 00:00:02.000\nthis is WebVTT\n",
            &ParseOptions::default(),
        );
        assert!(matches!(outcome, BlockOutcome::Header));
    }

    #[test]
    fn timing_line_without_identifier() {
        let outcome = build_cue("00:00:01.000 --> 00:00:02.000\nHi there\n", &ParseOptions::default());
        assert_eq!(kept(outcome), (1000, 2000, "Hi there".to_string()));
    }

    #[test]
    fn identifier_before_timing_line() {
        let outcome = build_cue(
            "intro-1\n00:01.000 --> 00:02.500\nHello\nworld\n",
            &ParseOptions::default(),
        );
        assert_eq!(kept(outcome), (1000, 2500, "Hello\nworld".to_string()));
    }

    #[test]
    fn cue_settings_are_ignored() {
        let outcome = build_cue(
            "00:00:01.000 --> 00:00:02.000 align:start position:10%\nHi\n",
            &ParseOptions::default(),
        );
        assert_eq!(kept(outcome), (1000, 2000, "Hi".to_string()));
    }

    #[test]
    fn first_timing_line_wins() {
        let outcome = build_cue(
            "00:00:01.000 --> 00:00:02.000\n00:00:03.000 --> 00:00:04.000\n",
            &ParseOptions::default(),
        );
        assert_eq!(kept(outcome), (1000, 2000, "00:00:03.000 --> 00:00:04.000".to_string()));
    }

    #[test]
    fn timing_line_may_have_no_text() {
        let outcome = build_cue("00:00:01.000 --> 00:00:02.000\n", &ParseOptions::default());
        assert_eq!(kept(outcome), (1000, 2000, String::new()));
    }

    #[test]
    fn block_without_timing_line_is_malformed() {
        let outcome = build_cue("NOTE a comment\n", &ParseOptions::default());
        assert!(matches!(outcome, BlockOutcome::Malformed));
    }

    #[test]
    fn srt_style_comma_is_not_a_timing_line() {
        let outcome = build_cue("00:00:01,000 --> 00:00:02,000\nHi\n", &ParseOptions::default());
        assert!(matches!(outcome, BlockOutcome::Malformed));
    }

    #[test]
    fn strict_options_reject_half_valid_timing() {
        let block = "00:00:01.000 --> 00:99.000\nHi\n";
        assert!(matches!(
            build_cue(block, &ParseOptions::default()),
            BlockOutcome::Kept { partial: true, .. }
        ));
        assert!(matches!(
            build_cue(block, &ParseOptions::strict()),
            BlockOutcome::BadTimecodes
        ));
    }
}
