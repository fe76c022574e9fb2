/// Format a percentage with exactly two decimals and a trailing `%`.
///
/// Rust's float formatting does not consult the host locale, so the
/// decimal separator is always `.`. Non-finite values print as `0.00%`
/// and negative zero loses its sign.
pub fn format_percent(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    // `-0.004` would otherwise round to "-0.00".
    let value = if value.abs() < 0.005 { 0.0 } else { value };
    format!("{value:.2}%")
}
