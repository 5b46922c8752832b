//! Async entry points, enabled with the `tokio` feature.
//!
//! Parsing itself stays synchronous. These functions only move it onto tokio's
//! blocking pool so large documents do not stall the calling task.

use crate::cue::Cue;
use crate::error::SubcueError;
use crate::parser::{decode, Parser};

use tokio::io::{AsyncRead, AsyncReadExt};

pub async fn parse(parser: Parser, input: String) -> Result<Vec<Cue>, SubcueError> {
    let cues = tokio::task::spawn_blocking(move || parser.parse(&input)).await?;
    Ok(cues)
}

/// Reads `reader` to the end as UTF-8 text and parses it on the blocking pool.
pub async fn parse_reader<R>(parser: Parser, mut reader: R) -> Result<Vec<Cue>, SubcueError>
where
    R: AsyncRead + Unpin,
{
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).await?;
    parse(parser, decode(bytes)?).await
}
