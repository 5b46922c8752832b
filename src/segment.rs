//! Splitting of whole documents into blank-line delimited blocks.
//!
//! A block is the text of consecutive non-blank lines, every line terminated with
//! `\n`. Blocks are not inspected here; the cue builders decide what they contain.

/// Splits a SubRip document into blocks.
///
/// Lines are separated by `\n` only, unless `accept_crlf` is set, and a line is blank
/// only when it is completely empty. Every blank line closes a block, so runs of blank
/// lines produce empty blocks. A single `\n` at the very end of the input already
/// counts as that closing blank line. Text after the last blank line is only returned
/// as a block when `flush_trailing` is set.
pub fn srt_blocks(input: &str, accept_crlf: bool, flush_trailing: bool) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut block = String::new();

    for line in input.split('\n') {
        let line = if accept_crlf {
            line.strip_suffix('\r').unwrap_or(line)
        } else {
            line
        };
        if line.is_empty() {
            blocks.push(std::mem::take(&mut block));
        } else {
            push_line(&mut block, line);
        }
    }

    if flush_trailing && !block.is_empty() {
        blocks.push(block);
    }
    blocks
}

/// Splits a WebVTT document into blocks.
///
/// Accepts both `\r\n` and `\n` line endings. Whitespace-only lines count as blank.
/// Trailing text is always kept and empty blocks are never returned.
pub fn vtt_blocks(input: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut block = String::new();

    for line in input.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            blocks.push(std::mem::take(&mut block));
        } else {
            push_line(&mut block, line);
        }
    }
    blocks.push(block);

    blocks.retain(|b| !b.is_empty());
    blocks
}

fn push_line(block: &mut String, line: &str) {
    block.push_str(line);
    block.push('\n');
}
