//! ISO-8601 timestamp parsing for range bounds.
//!
//! Grammar: a calendar date (`YYYY-MM-DD`, `YYYYMMDD`) or ISO week date
//! (`YYYY-Www[-D]`, `YYYYWww[D]`), optionally followed by any single
//! separator character and a time. Times are `HH[:MM[:SS]]` or the
//! basic `HH[MM[SS]]` with an optional fraction, followed by an optional
//! `+`/`-` offset in the same layouts. A `Z` suffix means UTC. Naive
//! values are taken as UTC and a bare date is midnight UTC. Surrounding
//! whitespace is rejected.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeDelta, Utc, Weekday};
use thiserror::Error;

const MICROS_PER_DAY: i64 = 86_400 * 1_000_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("'{input}' is not an ISO-8601 timestamp: {reason}")]
    Invalid { input: String, reason: &'static str },
}

/// Parse `input` into a UTC instant
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, TimestampError> {
    let normalized = input.replace('Z', "+00:00");
    parse_iso(normalized.as_bytes()).map_err(|reason| TimestampError::Invalid {
        input: input.to_string(),
        reason,
    })
}

fn parse_iso(text: &[u8]) -> Result<DateTime<Utc>, &'static str> {
    if !text.is_ascii() {
        return Err("non-ASCII character");
    }
    if text.len() < 7 {
        return Err("too short");
    }

    let date_len = date_length(text)?;
    if date_len > text.len() {
        return Err("incomplete date");
    }
    let date = parse_date(&text[..date_len])?;
    if date_len == text.len() {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    // text[date_len] is the separator, any character
    let (time, offset_micros) = parse_time(&text[date_len + 1..])?;
    date.and_time(time)
        .and_utc()
        .checked_sub_signed(TimeDelta::microseconds(offset_micros))
        .ok_or("out of range")
}

/// Length of the date portion, following the week-date disambiguation
/// rules of ISO-8601 extended and basic formats
fn date_length(text: &[u8]) -> Result<usize, &'static str> {
    let len = text.len();
    if len == 7 {
        return Ok(7);
    }

    if text[4] == b'-' {
        if text[5] != b'W' {
            return Ok(10);
        }
        if len > 8 && text[8] == b'-' {
            if len == 9 {
                return Err("incomplete week date");
            }
            if len > 10 && text[10].is_ascii_digit() {
                return Ok(8);
            }
            return Ok(10);
        }
        return Ok(8);
    }

    if text[4] == b'W' {
        let digits_end = 7 + text[7..].iter().take_while(|b| b.is_ascii_digit()).count();
        if digits_end < 9 {
            return Ok(digits_end);
        }
        return Ok(if digits_end % 2 == 0 { 7 } else { 8 });
    }

    Ok(8)
}

fn parse_date(text: &[u8]) -> Result<NaiveDate, &'static str> {
    let year = digits(text, 0, 4).ok_or("invalid year")? as i32;
    if year < 1 {
        return Err("year out of range");
    }
    let dashed = text.get(4) == Some(&b'-');
    let mut pos = 4 + usize::from(dashed);

    if text.get(pos) == Some(&b'W') {
        pos += 1;
        let week = digits(text, pos, 2).ok_or("invalid week number")?;
        pos += 2;
        let mut day = 1;
        if pos < text.len() {
            if (text[pos] == b'-') != dashed {
                return Err("inconsistent use of dash separator");
            }
            pos += usize::from(dashed);
            day = digits(text, pos, 1).ok_or("invalid weekday")?;
            pos += 1;
        }
        if pos != text.len() || !(1..=7).contains(&day) {
            return Err("invalid week date");
        }
        return NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
            .and_then(|monday| monday.checked_add_days(Days::new(u64::from(day - 1))))
            .ok_or("week out of range");
    }

    let month = digits(text, pos, 2).ok_or("invalid month")?;
    pos += 2;
    if (text.get(pos) == Some(&b'-')) != dashed {
        return Err("inconsistent use of dash separator");
    }
    pos += usize::from(dashed);
    let day = digits(text, pos, 2).ok_or("invalid day")?;
    if pos + 2 != text.len() {
        return Err("invalid date");
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or("day out of range for month")
}

/// Time of day plus the UTC offset in microseconds (zero when naive)
fn parse_time(text: &[u8]) -> Result<(NaiveTime, i64), &'static str> {
    let tz_pos = text.iter().position(|b| matches!(b, b'+' | b'-'));
    let (clock, trailing) = parse_clock(&text[..tz_pos.unwrap_or(text.len())])?;
    // a dangling separator before an offset is tolerated
    if trailing && tz_pos.is_none() {
        return Err("unexpected characters after time");
    }
    let [hour, minute, second, micro] = clock;
    let time =
        NaiveTime::from_hms_micro_opt(hour, minute, second, micro).ok_or("time out of range")?;

    let Some(tz_pos) = tz_pos else {
        return Ok((time, 0));
    };
    let ([hours, minutes, seconds, micros], trailing) = parse_clock(&text[tz_pos + 1..])?;
    if trailing {
        return Err("malformed UTC offset");
    }
    let whole_seconds = i64::from(hours) * 3600 + i64::from(minutes) * 60 + i64::from(seconds);
    // a zero offset is UTC whatever its fraction says
    if whole_seconds == 0 {
        return Ok((time, 0));
    }
    let magnitude = whole_seconds * 1_000_000 + i64::from(micros);
    if magnitude >= MICROS_PER_DAY {
        return Err("UTC offset must be under 24 hours");
    }
    let sign = if text[tz_pos] == b'-' { -1 } else { 1 };
    Ok((time, sign * magnitude))
}

/// `[hour, minute, second, microsecond]` from `HH[:MM[:SS]]` or
/// `HH[MM[SS]]`, with an optional `.`/`,` fraction after any component.
/// Fraction digits beyond six are dropped. The flag is set when
/// characters remain after the parsed clock.
fn parse_clock(text: &[u8]) -> Result<([u32; 4], bool), &'static str> {
    let mut parts = [0u32; 4];
    let mut pos = 0;
    let mut separated = false;

    for index in 0..3 {
        parts[index] = digits(text, pos, 2).ok_or("incomplete time component")?;
        pos += 2;
        let Some(&next) = text.get(pos) else {
            return Ok((parts, false));
        };
        pos += 1;
        if index == 0 {
            separated = next == b':';
        }
        if pos >= text.len() {
            return Ok((parts, true));
        }
        match next {
            b':' if separated => continue,
            b'.' | b',' => break,
            _ if !separated => pos -= 1,
            _ => return Err("invalid time separator"),
        }
    }

    let fraction = &text[pos..];
    let used = fraction.len().min(6);
    let value = digits(fraction, 0, used).ok_or("invalid fractional seconds")?;
    parts[3] = value * 10u32.pow((6 - used) as u32);
    let skipped = fraction[used..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();

    Ok((parts, used + skipped < fraction.len()))
}

/// `count` ASCII digits starting at `pos`
fn digits(text: &[u8], pos: usize, count: usize) -> Option<u32> {
    let slice = text.get(pos..pos + count)?;
    slice.iter().try_fold(0u32, |acc, b| {
        b.is_ascii_digit().then(|| acc * 10 + u32::from(b - b'0'))
    })
}
