use thiserror::Error;

/// Header shown above the playtime column; also the narrowest clock string.
pub const CLOCK_HEADER: &str = "hh:mm:ss";

#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("malformed duration {value:?} (expected HH:MM:SS)")]
pub struct MalformedDuration {
    pub value: String,
}

/// Formats whole seconds as `HH:MM:SS`. Hours are zero-padded to two digits
/// and grow past that instead of wrapping.
pub fn format_clock(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

pub fn parse_clock(value: &str) -> Result<u64, MalformedDuration> {
    let malformed = || MalformedDuration {
        value: value.to_string(),
    };

    let mut fields = value.split(':');
    let (Some(hours), Some(minutes), Some(secs), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(malformed());
    };

    let hours = parse_field(hours).ok_or_else(malformed)?;
    let minutes = parse_field(minutes).ok_or_else(malformed)?;
    let secs = parse_field(secs).ok_or_else(malformed)?;

    hours
        .checked_mul(3600)
        .and_then(|total| total.checked_add(minutes.checked_mul(60)?))
        .and_then(|total| total.checked_add(secs))
        .ok_or_else(malformed)
}

fn parse_field(field: &str) -> Option<u64> {
    let field = field.trim();
    if field.is_empty() || !field.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
