//! Scalar conversions for number and boolean fields.

/// Parse a decimal number.
///
/// Handles standard and scientific notation with surrounding whitespace.
/// Grouping separators are not accepted and non-finite results (`NaN`,
/// `inf`) are rejected so downstream statistics stay well-defined.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|number| number.is_finite())
}

/// Case-insensitive `true` / `false`.
pub fn parse_boolean(value: &str) -> Option<bool> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
