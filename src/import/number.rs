//! Lenient decimal parsing for spreadsheet price cells
//!
//! Export files mix `19.90` and `19,90`, and cells often carry trailing
//! text. Parsing takes the longest numeric prefix and ignores the rest, so
//! `"12abc"` reads as `12` while `"abc"` has no value at all.

/// Replace the first comma with a dot (`"19,90"` -> `"19.90"`)
///
/// Only the first comma is touched: `"1,234,56"` becomes `"1.234,56"`.
pub fn comma_to_dot(raw: &str) -> String {
    raw.replacen(',', ".", 1)
}

/// Parse the longest floating point prefix of `s`
///
/// Leading whitespace is skipped. Accepts an optional sign, digits with an
/// optional fractional part, an optional exponent, or `Infinity`. Returns
/// `None` when no digits are found.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    if s[end..].starts_with("Infinity") {
        let inf = f64::INFINITY;
        return Some(if bytes.first() == Some(&b'-') { -inf } else { inf });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when followed by at least one digit
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Convert a decimal amount to integer cents, rounding half up
///
/// `None` for non-finite amounts and amounts whose cents do not fit an `i64`.
pub fn to_cents(value: f64) -> Option<i64> {
    let cents = (value * 100.0 + 0.5).floor();
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    if cents.is_finite() && cents >= i64::MIN as f64 && cents < i64::MAX as f64 {
        Some(cents as i64)
    } else {
        None
    }
}
