//! Timecode parsing for both subtitle formats.
//!
//! Parsing happens in two stages. A regex first checks the overall shape of the
//! timecode, then the text is handed to a general duration grammar that does the
//! numeric conversion and range checks. Some strings the duration grammar would accept
//! (a bare `5`, say) are not valid SubRip timecodes, which is what the shape check is
//! for.

use std::sync::LazyLock;
use std::time::Duration;

use nom::branch::alt;
use nom::bytes::complete::take_while_m_n;
use nom::character::complete::{char, digit1};
use nom::combinator::{all_consuming, map, map_res, opt, verify};
use nom::sequence::{pair, preceded, terminated, tuple};
use nom::IResult;
use regex::Regex;

static SRT_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+:[0-9]+:[0-9]+,[0-9]+").unwrap());

// Matches `MM:SS.fff` and also `HH:MM:SS.fff`; both get a `00:` prefix, which turns
// the long form into `D:HH:MM:SS.fff` with a zero day field.
static VTT_NEEDS_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)?:?(\d+):([\d\.]+)\s*$").unwrap());

const MAX_DAYS: u64 = 10_675_199;
// 10675199.02:48:05.4775807, the largest duration the grammar accepts.
const MAX_DURATION: Duration = Duration::new(922_337_203_685, 477_580_700);
const MAX_FRACTION_DIGITS: usize = 7;

/// Parses a SubRip timecode (`HH:MM:SS,mmm`).
pub fn parse_srt_timecode(timecode: &str) -> Option<Duration> {
    if !SRT_SHAPE.is_match(timecode) {
        return None;
    }
    parse_duration(&timecode.replace(',', "."))
}

/// Parses a WebVTT timecode (`[HH:]MM:SS.mmm`).
pub fn parse_vtt_timecode(timecode: &str) -> Option<Duration> {
    if VTT_NEEDS_PREFIX.is_match(timecode) {
        parse_duration(&format!("00:{}", timecode))
    } else {
        parse_duration(timecode)
    }
}

/// Parses a duration written as `D:HH:MM:SS[.f]`, `[D.]HH:MM[:SS[.f]]` or a bare
/// number of days. Surrounding whitespace is ignored. Hours must be below 24, minutes
/// and seconds below 60, the fraction has at most seven digits, and the total may not
/// exceed `10675199.02:48:05.4775807`.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let input = input.trim();
    let result: IResult<&str, Duration> = alt((
        all_consuming(day_clock),
        all_consuming(clock),
        all_consuming(map(days, |d| to_duration(d, 0, 0, 0, 0))),
    ))(input);
    result
        .ok()
        .map(|(_, duration)| duration)
        .filter(|duration| *duration <= MAX_DURATION)
}

fn day_clock(input: &str) -> IResult<&str, Duration> {
    let (input, (days, _, hours, _, minutes, _, seconds, nanos)) = tuple((
        days,
        char(':'),
        hours,
        char(':'),
        minutes,
        char(':'),
        seconds,
        opt(fraction),
    ))(input)?;
    Ok((
        input,
        to_duration(days, hours, minutes, seconds, nanos.unwrap_or(0)),
    ))
}

fn clock(input: &str) -> IResult<&str, Duration> {
    let (input, days) = opt(terminated(days, char('.')))(input)?;
    let (input, hours) = hours(input)?;
    let (input, _) = char(':')(input)?;
    let (input, minutes) = minutes(input)?;
    let (input, secs) = opt(preceded(char(':'), pair(seconds, opt(fraction))))(input)?;

    let (seconds, nanos) = match secs {
        Some((seconds, nanos)) => (seconds, nanos.unwrap_or(0)),
        None => (0, 0),
    };
    Ok((
        input,
        to_duration(days.unwrap_or(0), hours, minutes, seconds, nanos),
    ))
}

fn number(input: &str) -> IResult<&str, u64> {
    map_res(digit1, |s: &str| s.parse())(input)
}

fn days(input: &str) -> IResult<&str, u64> {
    verify(number, |d: &u64| *d <= MAX_DAYS)(input)
}

fn hours(input: &str) -> IResult<&str, u64> {
    verify(number, |h: &u64| *h < 24)(input)
}

fn minutes(input: &str) -> IResult<&str, u64> {
    verify(number, |m: &u64| *m < 60)(input)
}

fn seconds(input: &str) -> IResult<&str, u64> {
    verify(number, |s: &u64| *s < 60)(input)
}

/// A decimal fraction of a second, returned in nanoseconds.
fn fraction(input: &str) -> IResult<&str, u32> {
    let (input, _) = char('.')(input)?;
    map_res(
        take_while_m_n(1, MAX_FRACTION_DIGITS, |c: char| c.is_ascii_digit()),
        // `.5` means half a second, so pad on the right up to nanosecond precision.
        |s: &str| format!("{:0<9}", s).parse::<u32>(),
    )(input)
}

fn to_duration(days: u64, hours: u64, minutes: u64, seconds: u64, nanos: u32) -> Duration {
    let secs = ((days * 24 + hours) * 60 + minutes) * 60 + seconds;
    Duration::new(secs, nanos)
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_timecode {
        ($parse:ident; $($name:ident: $value:expr,)*) => {
        $(
            #[test]
            fn $name() {
                let (input, expected): (&str, Option<u64>) = $value;

                let parsed = $parse(input).map(|d| d.as_millis() as u64);

                assert_eq!(parsed, expected, "input: {:?}", input);
            }
        )*
        }
    }

    test_timecode! { parse_srt_timecode;
        test_srt_0: ("00:00:01,500", Some(1500)),
        test_srt_1: ("00:00:01,200", Some(1200)),
        test_srt_2: ("00:00:01,2", Some(1200)),
        test_srt_3: ("00:00:01,02", Some(1020)),
        test_srt_4: ("1:1:1,200", Some(3_661_200)),
        test_srt_5: ("01:01:01,200", Some(3_661_200)),
        test_srt_6: ("bad", None),
        test_srt_7: ("00:00:01.500", None),
        test_srt_8: ("00:00:01", None),
        test_srt_9: ("24:00:00,000", None),
        test_srt_10: ("00:60:00,000", None),
        test_srt_11: ("00:00:60,000", None),
        test_srt_12: ("00:00:01,12345678", None),
        test_srt_13: ("00:00:01,500,1", None),
        test_srt_14: ("1:00:00:01,500", Some(86_401_500)),
        test_srt_15: ("23:59:59,999", Some(86_399_999)),
    }

    test_timecode! { parse_vtt_timecode;
        test_vtt_0: ("01:02.500", Some(62_500)),
        test_vtt_1: ("00:01:02.500", Some(62_500)),
        test_vtt_2: ("01:00:00.000", Some(3_600_000)),
        test_vtt_3: ("1:02.5", Some(62_500)),
        test_vtt_4: ("00:00:01.000", Some(1000)),
        test_vtt_5: ("bad", None),
        test_vtt_6: ("", None),
        test_vtt_7: ("00:61.000", None),
        test_vtt_8: ("00:01:02.500.1", None),
        test_vtt_9: ("24:00:00.000", None),
        test_vtt_10: ("00:01:02,500", None),
        test_vtt_11: ("10675199.23:59:59.9999999", None),
    }

    test_timecode! { parse_duration;
        test_duration_0: ("5", Some(5 * 86_400_000)),
        test_duration_1: ("1:02", Some(3_720_000)),
        test_duration_2: ("1.02:03:04", Some(93_784_000)),
        test_duration_3: ("1.02:03:04.5", Some(93_784_500)),
        test_duration_4: ("  00:00:01.25  ", Some(1250)),
        test_duration_5: ("1:02:03:04", Some(93_784_000)),
        test_duration_6: ("1:02.5", None),
        test_duration_7: ("1:2:3:4:5", None),
        test_duration_8: ("10675200", None),
        test_duration_9: ("-1", None),
        test_duration_10: ("00:00:00.1234567", Some(123)),
        test_duration_11: ("10675199.02:48:05.4775807", Some(922_337_203_685_477)),
        test_duration_12: ("10675199.02:48:05.4775808", None),
        test_duration_13: ("10675199.23:59:59.9999999", None),
        test_duration_14: ("10675199:23:59:59", None),
    }

    #[test]
    fn fraction_keeps_sub_millisecond_precision() {
        let parsed = parse_duration("00:00:00.1234567").unwrap();
        assert_eq!(parsed, Duration::from_nanos(123_456_700));
    }
}
