//! Conversions between CSS-style pixel strings and numbers.
//!
//! The UI layer hands geometry over as style strings (`"120px"`,
//! `"rotate(45deg)"`). Parsing here is lenient: malformed input becomes 0
//! rather than an error, since a bad style value should never abort a gesture.

const PIXEL_SUFFIX: &str = "px";
const ROTATE_OPEN: &str = "rotate(";
const ROTATE_CLOSE: &str = "deg)";

/// Parse a pixel value such as `"120px"`, `"12.5px"` or `"40"`.
///
/// Only the leading numeric prefix is read, so trailing units or garbage are
/// ignored. Returns 0 for empty or non-numeric input.
///
/// # Example
///
/// ```
/// use tagshot_core::units::pixels_to_number;
///
/// assert_eq!(pixels_to_number("120px"), 120.0);
/// assert_eq!(pixels_to_number(""), 0.0);
/// ```
pub fn pixels_to_number(text: &str) -> f64 {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_suffix(PIXEL_SUFFIX).unwrap_or(trimmed);
    leading_number(trimmed).unwrap_or(0.0)
}

/// Format a number as a pixel string (`20.0` becomes `"20px"`).
pub fn number_to_pixels(value: f64) -> String {
    format!("{}{}", value, PIXEL_SUFFIX)
}

/// Extract the angle from a transform description like `"rotate(45deg)"`.
///
/// Other transform functions before or after the rotation are skipped.
/// Returns 0 when there is no `rotate(...deg)` term or its argument is not a
/// number.
pub fn rotation_degrees(transform: Option<&str>) -> f64 {
    let Some(transform) = transform else {
        return 0.0;
    };
    let Some(start) = transform.find(ROTATE_OPEN) else {
        return 0.0;
    };
    let argument_start = start + ROTATE_OPEN.len();
    let Some(length) = transform[argument_start..].find(ROTATE_CLOSE) else {
        return 0.0;
    };
    let argument = transform[argument_start..argument_start + length].trim();
    argument.parse::<f64>().unwrap_or(0.0)
}

/// Format an angle as a rotation transform.
pub fn degrees_to_rotation(degrees: f64) -> String {
    format!("{}{}{}", ROTATE_OPEN, degrees, ROTATE_CLOSE)
}

/// Read the longest numeric prefix of `text` (sign, digits, one decimal point).
fn leading_number(text: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_point = false;

    for (index, ch) in text.char_indices() {
        match ch {
            '-' | '+' if index == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_point => seen_point = true,
            _ => break,
        }
        end = index + ch.len_utf8();
    }

    if !seen_digit {
        return None;
    }
    text[..end].trim_end_matches('.').parse().ok()
}


// ============================================================================
// Property-Based Tests
// ============================================================================
