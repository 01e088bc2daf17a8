use crate::DomainError;

const SECONDS_PER_HOUR: u128 = 3_600;
const SECONDS_PER_MINUTE: u128 = 60;

/// Renders an offset in seconds as a zero-padded `HH:MM:SS` clock.
///
/// The fractional part is truncated, never rounded, so `59.999` stays at
/// `00:00:59`. Hours are not capped and grow past two digits. Offsets that
/// are negative, not finite, or at least 2^128 seconds are rejected.
pub fn format_timestamp(seconds: f64) -> Result<String, DomainError> {
    let whole = seconds.floor();
    if !seconds.is_finite() || seconds < 0.0 || whole >= u128::MAX as f64 {
        return Err(DomainError::InvalidTimestamp { seconds });
    }

    // Exact: every integral f64 below 2^128 fits in a u128.
    let whole = whole as u128;
    let hours = whole / SECONDS_PER_HOUR;
    let minutes = (whole % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let secs = whole % SECONDS_PER_MINUTE;

    Ok(format!("{hours:02}:{minutes:02}:{secs:02}"))
}
