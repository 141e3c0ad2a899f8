//! Input sanitizers for numeric settings

/// Coerce free-form input into a non-negative integer.
///
/// Negative numbers lose their sign, fractions are truncated, a leading
/// integer prefix is kept (`"1200px"` is 1200) and anything else becomes 0.
/// Values beyond `u32::MAX` saturate.
pub fn absint(raw: &str) -> u32 {
    let trimmed = raw.trim();

    if let Ok(n) = trimmed.parse::<i64>() {
        return u32::try_from(n.unsigned_abs()).unwrap_or(u32::MAX);
    }

    // `f64::from_str` also takes "inf" and "NaN"; only plain decimal or
    // exponent notation counts as a number here
    if is_decimal_literal(trimmed) {
        if let Ok(f) = trimmed.parse::<f64>() {
            // `as` saturates, so an exponent overflowing to infinity gives u32::MAX
            return f.abs().trunc() as u32;
        }
    }

    let unsigned = trimmed
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(trimmed);
    let digits: String = unsigned.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }

    digits
        .parse::<u64>()
        .ok()
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(u32::MAX)
}

fn is_decimal_literal(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
        && s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
}
