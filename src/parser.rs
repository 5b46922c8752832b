use crate::cue::Cue;
use crate::error::SubcueError;
use crate::{srt, vtt};

use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use tracing::{debug, trace};

const BOM: char = '\u{FEFF}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// SubRip, `.srt`
    Srt,
    /// WebVTT, `.vtt`
    Vtt,
}

impl Format {
    /// Guesses the format from a file extension, ignoring case.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Option<Format> {
        let ext = path.as_ref().extension()?.to_str()?;
        ext.parse().ok()
    }
}

impl FromStr for Format {
    type Err = SubcueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "srt" | "subrip" => Ok(Format::Srt),
            "vtt" | "webvtt" => Ok(Format::Vtt),
            _ => Err(SubcueError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Format::Srt => write!(f, "srt"),
            Format::Vtt => write!(f, "vtt"),
        }
    }
}

/// Switches for the places where the lenient legacy behaviour can be tightened.
///
/// `ParseOptions::default()` keeps the legacy behaviour everywhere.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Skip cues where either timecode is invalid. By default a cue is kept as long as
    /// one of the two parses, and the invalid one becomes zero.
    pub require_both_timecodes: bool,
    /// Keep a final SubRip entry that is not followed by a blank line.
    pub flush_trailing_block: bool,
    /// Let SubRip documents use `\r\n` line endings. WebVTT always accepts them.
    pub accept_crlf: bool,
}

impl ParseOptions {
    pub fn strict() -> Self {
        Self {
            require_both_timecodes: true,
            flush_trailing_block: true,
            accept_crlf: true,
        }
    }
}

/// Counts of what happened to each block of a document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseReport {
    pub blocks: usize,
    pub cues: usize,
    /// Blocks with no lines at all, left behind by runs of blank lines.
    pub empty: usize,
    /// WebVTT blocks mentioning `WEBVTT`.
    pub headers: usize,
    /// Blocks that are too short or have no timing line.
    pub malformed: usize,
    /// Blocks whose timing line did not yield usable timecodes.
    pub bad_timecodes: usize,
    /// Cues that were kept although one of their timecodes did not parse.
    pub partial_timecodes: usize,
}

impl ParseReport {
    pub fn skipped(&self) -> usize {
        self.blocks - self.cues
    }

    fn record(&mut self, index: usize, outcome: BlockOutcome) -> Option<Cue> {
        self.blocks += 1;
        match outcome {
            BlockOutcome::Kept { cue, partial } => {
                self.cues += 1;
                if partial {
                    self.partial_timecodes += 1;
                    trace!(block = index, "kept cue with one unparsed timecode");
                }
                return Some(cue);
            }
            BlockOutcome::Empty => self.empty += 1,
            BlockOutcome::Header => self.headers += 1,
            BlockOutcome::Malformed => self.malformed += 1,
            BlockOutcome::BadTimecodes => self.bad_timecodes += 1,
        }
        trace!(block = index, reason = ?outcome, "skipped block");
        None
    }
}

impl fmt::Display for ParseReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} blocks, {} cues ({} empty, {} header, {} malformed, {} bad timecodes, {} partial timecodes)",
            self.blocks,
            self.cues,
            self.empty,
            self.headers,
            self.malformed,
            self.bad_timecodes,
            self.partial_timecodes
        )
    }
}

/// What a cue builder made of one block.
#[derive(Debug)]
pub(crate) enum BlockOutcome {
    Kept { cue: Cue, partial: bool },
    Empty,
    Header,
    Malformed,
    BadTimecodes,
}

impl BlockOutcome {
    pub(crate) fn from_timing(
        start: Option<Duration>,
        end: Option<Duration>,
        text: String,
        options: &ParseOptions,
    ) -> Self {
        match (start, end) {
            (Some(start), Some(end)) => BlockOutcome::Kept {
                cue: Cue::new(start, end, text),
                partial: false,
            },
            (None, None) => BlockOutcome::BadTimecodes,
            _ if options.require_both_timecodes => BlockOutcome::BadTimecodes,
            (start, end) => BlockOutcome::Kept {
                cue: Cue::new(start.unwrap_or_default(), end.unwrap_or_default(), text),
                partial: true,
            },
        }
    }
}

/// Joins the non-empty lines of a cue body.
pub(crate) fn cue_text(lines: &[&str]) -> String {
    lines
        .iter()
        .copied()
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// A parser for one subtitle format. Holds no state besides its configuration, so a
/// single instance can be shared freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parser {
    format: Format,
    options: ParseOptions,
}

impl Parser {
    pub fn new(format: Format) -> Self {
        Self {
            format,
            options: ParseOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parses a whole document. Never fails; blocks that do not form a cue are skipped.
    pub fn parse(&self, input: &str) -> Vec<Cue> {
        self.parse_with_report(input).0
    }

    /// Like [`Parser::parse`], but also reports what happened to every block.
    pub fn parse_with_report(&self, input: &str) -> (Vec<Cue>, ParseReport) {
        let mut report = ParseReport::default();
        let outcomes: Vec<BlockOutcome> = match self.format {
            Format::Srt => srt::build_cues(input, &self.options),
            Format::Vtt => vtt::build_cues(input, &self.options),
        };
        let cues = outcomes
            .into_iter()
            .enumerate()
            .filter_map(|(index, outcome)| report.record(index, outcome))
            .collect();

        debug!(
            format = %self.format,
            blocks = report.blocks,
            cues = report.cues,
            "parsed subtitle document"
        );
        (cues, report)
    }

    /// Reads `reader` to the end as UTF-8 text and parses it.
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Vec<Cue>, SubcueError> {
        let text = read_text(reader)?;
        Ok(self.parse(&text))
    }
}

/// Reads all of `reader` and decodes it as UTF-8, dropping a leading byte order mark.
pub fn read_text<R: Read>(mut reader: R) -> Result<String, SubcueError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    decode(bytes)
}

pub(crate) fn decode(bytes: Vec<u8>) -> Result<String, SubcueError> {
    let mut text = String::from_utf8(bytes)?;
    if text.starts_with(BOM) {
        text.drain(..BOM.len_utf8());
    }
    Ok(text)
}

/// Parses a SubRip document with the legacy defaults.
pub fn parse_srt(input: &str) -> Vec<Cue> {
    Parser::new(Format::Srt).parse(input)
}

/// Parses a WebVTT document with the legacy defaults.
pub fn parse_vtt(input: &str) -> Vec<Cue> {
    Parser::new(Format::Vtt).parse(input)
}

pub fn parse_srt_stream<R: Read>(reader: R) -> Result<Vec<Cue>, SubcueError> {
    Parser::new(Format::Srt).parse_reader(reader)
}

pub fn parse_vtt_stream<R: Read>(reader: R) -> Result<Vec<Cue>, SubcueError> {
    Parser::new(Format::Vtt).parse_reader(reader)
}
