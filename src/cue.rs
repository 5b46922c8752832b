use std::fmt;
use std::time::Duration;

/// A single timed subtitle entry.
///
/// `start` and `end` are offsets from the beginning of the document. The parsers do not
/// check that `end` comes after `start`; whatever the document says is passed through.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cue {
    pub start: Duration,
    pub end: Duration,
    /// Non-blank text lines of the entry, joined with `\n`.
    pub text: String,
}

impl Cue {
    pub fn new(start: Duration, end: Duration, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}

/// Renders a cue as a single listing line, e.g. `00:00:01.000 --> 00:00:02.000 | Hello`.
impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_ts(f, self.start)?;
        write!(f, " --> ")?;
        write_ts(f, self.end)?;
        write!(f, " |")?;
        for (i, line) in self.lines().enumerate() {
            let sep = if i == 0 { " " } else { " / " };
            write!(f, "{}{}", sep, line)?;
        }
        Ok(())
    }
}

fn write_ts(f: &mut fmt::Formatter, timestamp: Duration) -> fmt::Result {
    let total_secs = timestamp.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let millis = timestamp.subsec_millis();
    write!(f, "{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}
