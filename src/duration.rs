//! Duration formatting, parsing, and side splitting.

use core::fmt;

use crate::model::Track;

/// Error from [`parse_duration`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseDurationError {
    /// Input did not look like `mm:ss`.
    Malformed,
    /// Seconds field was 60 or greater.
    SecondsOutOfRange(u64),
}

impl fmt::Display for ParseDurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "duration must be mm:ss"),
            Self::SecondsOutOfRange(secs) => {
                write!(f, "seconds field {secs} out of range (expected < 60)")
            }
        }
    }
}

impl std::error::Error for ParseDurationError {}

/// Format milliseconds as `m:ss`, seconds rounded and zero-padded.
///
/// Zero formats as `0:00`; rounding carries into the minute field.
pub fn format_duration_ms(ms: u64) -> String {
    let total_seconds = (ms + 500) / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes}:{seconds:02}")
}

/// Parse a `mm:ss` string into milliseconds.
pub fn parse_duration(text: &str) -> Result<u64, ParseDurationError> {
    let (minutes, seconds) = text
        .split_once(':')
        .ok_or(ParseDurationError::Malformed)?;
    let minutes: u64 = minutes
        .trim()
        .parse()
        .map_err(|_| ParseDurationError::Malformed)?;
    let seconds: u64 = seconds
        .trim()
        .parse()
        .map_err(|_| ParseDurationError::Malformed)?;
    if seconds >= 60 {
        return Err(ParseDurationError::SecondsOutOfRange(seconds));
    }
    Ok((minutes * 60 + seconds) * 1000)
}

/// Split an imported track sequence into Side A / Side B.
///
/// When the release reports two or more physical media, the split point is
/// the first medium's track count. Otherwise tracks accumulate onto Side A
/// until the running time reaches half the album total.
pub fn split_for_sides(
    tracks: Vec<Track>,
    media_track_counts: &[usize],
) -> (Vec<Track>, Vec<Track>) {
    let split_index = if media_track_counts.len() >= 2 {
        media_track_counts[0].min(tracks.len())
    } else {
        let total_ms: u64 = tracks.iter().map(|t| t.duration_ms).sum();
        let half_ms = total_ms / 2;
        let mut current_ms = 0u64;
        let mut split = tracks.len();
        for (i, track) in tracks.iter().enumerate() {
            current_ms += track.duration_ms;
            if current_ms >= half_ms {
                split = i + 1;
                break;
            }
        }
        split
    };

    let mut side_a = tracks;
    let side_b = side_a.split_off(split_index);
    (side_a, side_b)
}
