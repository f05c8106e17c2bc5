//! Colon-delimited duration strings, as used for video lengths in the
//! catalog feeds.

/// Parse a `H:MM:SS` string into total seconds.
///
/// The input must split on `:` into exactly three numeric components.
/// Component magnitudes are not range-checked (`0:0:90` is 90 seconds).
/// Anything else is malformed and yields `None`.
pub fn parse_hms(input: &str) -> Option<u64> {
    let parts: Vec<&str> = input.split(':').collect();
    if parts.len() != 3 {
        return None;
    }
    let hours: u64 = parts[0].parse().ok()?;
    let minutes: u64 = parts[1].parse().ok()?;
    let seconds: u64 = parts[2].parse().ok()?;
    hours
        .checked_mul(3600)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(seconds)
}

/// Compatibility wrapper preserving the storefront's original behavior:
/// malformed input silently counts as zero seconds.
pub fn hms_to_seconds(input: &str) -> u64 {
    parse_hms(input).unwrap_or(0)
}
