//! Lenient numeric parsing for text typed by people.
//!
//! Threshold input and CSV cells are parsed the forgiving way: leading whitespace
//! is skipped and the longest numeric prefix is used, so `"12 units"` reads as
//! 12 and `"9.99$"` as 9.99. Text without a numeric prefix yields `None`.

/// Parse the leading integer of `input` (optional sign, then digits).
///
/// Magnitudes beyond `i64` saturate.
pub fn leading_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, rest) = split_sign(s);

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let magnitude = rest[..digits].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// Parse the leading decimal number of `input`.
///
/// Accepts an optional sign, digits with an optional fraction (`"3."`, `".5"`)
/// and an optional exponent (`"1e3"`).
pub fn leading_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

/// Integer input coerced into `0..=u32::MAX`; no numeric prefix gives 0.
pub fn non_negative_int(input: &str) -> u32 {
    leading_int(input)
        .map(|v| v.clamp(0, i64::from(u32::MAX)) as u32)
        .unwrap_or(0)
}

/// Price input coerced to a finite, non-negative amount; anything else gives 0.
pub fn non_negative_price(input: &str) -> f64 {
    leading_float(input)
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn leading_int_takes_numeric_prefix() {
        assert_eq!(leading_int("42"), Some(42));
        assert_eq!(leading_int("  7 boxes"), Some(7));
        assert_eq!(leading_int("12.9"), Some(12));
        assert_eq!(leading_int("-5"), Some(-5));
        assert_eq!(leading_int("+3"), Some(3));
        assert_eq!(leading_int("abc"), None);
        assert_eq!(leading_int(""), None);
        assert_eq!(leading_int("-"), None);
        assert_eq!(leading_int("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn leading_float_takes_numeric_prefix() {
        assert_eq!(leading_float("9.99"), Some(9.99));
        assert_eq!(leading_float(" 9.99 USD"), Some(9.99));
        assert_eq!(leading_float(".5"), Some(0.5));
        assert_eq!(leading_float("3."), Some(3.0));
        assert_eq!(leading_float("1e3"), Some(1000.0));
        assert_eq!(leading_float("2e"), Some(2.0));
        assert_eq!(leading_float("-1.25"), Some(-1.25));
        assert_eq!(leading_float("."), None);
        assert_eq!(leading_float("abc"), None);
    }

    #[test]
    fn coercions_never_go_negative() {
        assert_eq!(non_negative_int("abc"), 0);
        assert_eq!(non_negative_int("-5"), 0);
        assert_eq!(non_negative_int("10"), 10);
        assert_eq!(non_negative_int("99999999999"), u32::MAX);
        assert_eq!(non_negative_price("-2.5"), 0.0);
        assert_eq!(non_negative_price("n/a"), 0.0);
        assert_eq!(non_negative_price("12.50"), 12.5);
    }

    proptest! {
        #[test]
        fn leading_int_reads_back_formatted_values(v in any::<i64>().prop_filter("min has no positive twin", |v| *v != i64::MIN)) {
            prop_assert_eq!(leading_int(&v.to_string()), Some(v));
        }

        #[test]
        fn leading_float_reads_back_two_decimal_prices(cents in 0u32..10_000_000) {
            let text = format!("{}.{:02}", cents / 100, cents % 100);
            let parsed = leading_float(&text).unwrap();
            prop_assert!((parsed - f64::from(cents) / 100.0).abs() < 1e-9);
        }
    }
}
