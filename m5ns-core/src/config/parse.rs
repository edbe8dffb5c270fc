//! Numeric value parsing
//!
//! Best-effort conversions from raw INI value bytes. Numbers are read from
//! the longest valid leading prefix (`"12abc"` reads as 12); a value with no
//! numeric prefix at all yields `None` so the caller can substitute the
//! field's default. Bytes after the prefix are never inspected, so values
//! need not be UTF-8.

/// Skip leading ASCII whitespace
fn trim_start(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    &bytes[start..]
}

/// Parse a leading decimal integer
///
/// Skips leading whitespace, accepts one optional sign, then consumes
/// digits. Saturates at the `i32` bounds instead of wrapping.
pub fn parse_int(value: &[u8]) -> Option<i32> {
    let bytes = trim_start(value);
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let mut result: i32 = 0;
    let mut seen_digit = false;

    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        seen_digit = true;
        let digit = (b - b'0') as i32;
        result = if negative {
            result.saturating_mul(10).saturating_sub(digit)
        } else {
            result.saturating_mul(10).saturating_add(digit)
        };
    }

    seen_digit.then_some(result)
}

/// Parse a leading decimal floating point number
///
/// Accepts an optional sign, digits with an optional fractional part, and an
/// optional exponent. Trailing garbage is ignored.
pub fn parse_float(value: &[u8]) -> Option<f32> {
    let bytes = trim_start(value);
    let end = float_prefix_len(bytes)?;
    // The prefix is plain ASCII
    core::str::from_utf8(&bytes[..end]).ok()?.parse().ok()
}

/// Length of the longest prefix that forms a decimal float, if any
fn float_prefix_len(bytes: &[u8]) -> Option<usize> {
    let count_digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut pos = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        pos += 1;
    }

    let int_digits = count_digits(pos);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = count_digits(pos + 1);
        if int_digits > 0 || frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp_pos = pos + 1;
        if matches!(bytes.get(exp_pos), Some(b'+' | b'-')) {
            exp_pos += 1;
        }
        let exp_digits = count_digits(exp_pos);
        if exp_digits > 0 {
            pos = exp_pos + exp_digits;
        }
    }

    Some(pos)
}
