use std::io;
use std::string::FromUtf8Error;

/// Errors raised around the parser. Malformed subtitle content is never an error; these
/// only cover getting hold of the text and choosing a format.
#[derive(Debug, thiserror::Error)]
pub enum SubcueError {
    #[error("failed to read subtitle data")]
    Io(#[from] io::Error),

    #[error("subtitle data is not valid UTF-8")]
    Decode(#[from] FromUtf8Error),

    #[error("unknown subtitle format '{0}', expected 'srt' or 'vtt'")]
    UnknownFormat(String),

    #[cfg(feature = "tokio")]
    #[error("parse task did not complete")]
    Join(#[from] tokio::task::JoinError),
}
