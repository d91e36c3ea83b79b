//! en_US number grammar
//!
//! Accepts an optional leading minus, digits with optional `,` grouping, an
//! optional `.` fraction and an optional `E` exponent. Parsing stops at the
//! first character that does not continue a number, so `"12 KB"` reads as 12.

/// Extract the longest numeric prefix of `text` and parse it.
///
/// Returns `None` when the prefix holds no digits at all.
pub fn scan_number(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut pos = 0;
    let mut literal = String::with_capacity(text.len());

    if bytes.first() == Some(&b'-') {
        literal.push('-');
        pos += 1;
    }

    let mut digits = 0usize;
    while pos < bytes.len() {
        match bytes[pos] {
            b @ b'0'..=b'9' => {
                literal.push(b as char);
                digits += 1;
            }
            // Grouping separator only counts when a digit follows it
            b',' if digits > 0 && bytes.get(pos + 1).is_some_and(u8::is_ascii_digit) => {}
            _ => break,
        }
        pos += 1;
    }

    if bytes.get(pos) == Some(&b'.') {
        let mut fraction = 0usize;
        let mut cursor = pos + 1;
        while bytes.get(cursor).is_some_and(u8::is_ascii_digit) {
            fraction += 1;
            cursor += 1;
        }
        if fraction > 0 || digits > 0 {
            literal.push('.');
            literal.push_str(&text[pos + 1..cursor]);
            digits += fraction;
            pos = cursor;
        }
    }

    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'E') | Some(b'e')) {
        let mut cursor = pos + 1;
        let signed = matches!(bytes.get(cursor), Some(b'-') | Some(b'+'));
        if signed {
            cursor += 1;
        }
        let start = cursor;
        while bytes.get(cursor).is_some_and(u8::is_ascii_digit) {
            cursor += 1;
        }
        if cursor > start {
            literal.push('E');
            literal.push_str(&text[pos + 1..cursor]);
        }
    }

    literal.parse::<f64>().ok()
}

/// Render `value` in en_US style: `,` grouping, at most three fraction
/// digits, ties rounded to even.
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = format!("{:.3}", value);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (idx, ch) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(scan_number("42"), Some(42.0));
        assert_eq!(scan_number("-2.5"), Some(-2.5));
        assert_eq!(scan_number(".5"), Some(0.5));
        assert_eq!(scan_number("7."), Some(7.0));
    }

    #[test]
    fn test_grouping_is_ignored() {
        assert_eq!(scan_number("1,234,567.25"), Some(1_234_567.25));
        // Trailing comma ends the number
        assert_eq!(scan_number("12,"), Some(12.0));
    }

    #[test]
    fn test_trailing_text_is_ignored() {
        assert_eq!(scan_number("12 KB"), Some(12.0));
        assert_eq!(scan_number("3.5min"), Some(3.5));
        assert_eq!(scan_number("1E3"), Some(1000.0));
        assert_eq!(scan_number("2Ex"), Some(2.0));
    }

    #[test]
    fn test_no_digits() {
        assert_eq!(scan_number("abc"), None);
        assert_eq!(scan_number("-"), None);
        assert_eq!(scan_number("."), None);
        assert_eq!(scan_number("+5"), None);
    }

    #[test]
    fn test_format_double() {
        assert_eq!(format_double(1234.5678), "1,234.568");
        assert_eq!(format_double(1_000_000.0), "1,000,000");
        assert_eq!(format_double(0.5), "0.5");
        assert_eq!(format_double(-987.0), "-987");
        assert_eq!(format_double(0.0626), "0.063");
    }
}
