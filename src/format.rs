pub const MIB: u64 = 1024 * 1024;

/// Render a value with exactly two decimal digits.
///
/// The value is rendered, reparsed and rendered again. The round trip is
/// load-bearing: consumers compare these strings, so the output must stay
/// identical to what the string-level rounding produces.
pub fn two_decimals(value: f64) -> String {
    let rendered = format!("{value:.2}");
    let reparsed: f64 = rendered.parse().unwrap_or(value);
    format!("{reparsed:.2}")
}

/// Usage fraction to a whole percent, rounded up, with a trailing `%`.
/// Negative inputs clamp to zero.
pub fn ceil_percent(value: f64) -> String {
    format!("{}%", value.max(0.0).ceil() as u64)
}

/// Whole mebibytes, truncating.
pub fn whole_mebibytes(bytes: u64) -> u64 {
    bytes / MIB
}
