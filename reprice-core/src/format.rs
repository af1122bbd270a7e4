//! Display formatting for amounts, currency and share counts.
//!
//! Amounts render with two decimals and `,` thousands separators. Rounding is
//! done on the shortest decimal representation of the value, half away from
//! zero, so `1.005` renders as `1.01` the way a browser's locale formatter
//! shows it.

pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// `1234567.891` → `"1,234,567.89"`. Non-finite values render `"0.00"`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0.00".into();
    }
    let cents = round_to_cents(value.abs());
    let (int_digits, frac_digits) = cents.split_at(cents.len() - 2);

    let is_zero = cents.bytes().all(|b| b == b'0');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    format!("{sign}{}.{frac_digits}", group_thousands(int_digits))
}

/// `"$" + format_number(|value|)`. The sign is dropped.
pub fn format_currency(value: f64) -> String {
    format_currency_with(value, DEFAULT_CURRENCY_SYMBOL)
}

pub fn format_currency_with(value: f64, symbol: &str) -> String {
    if !value.is_finite() {
        return format!("{symbol}0.00");
    }
    format!("{symbol}{}", format_number(value.abs()))
}

/// `-$12.00` for negatives, `+$12.00` otherwise (zero included).
pub fn format_signed_currency(value: f64, symbol: &str) -> String {
    let sign = if value < 0.0 { '-' } else { '+' };
    format!("{sign}{}", format_currency_with(value, symbol))
}

/// Share counts: integral values without a fractional part.
pub fn format_shares(value: f64) -> String {
    if value == 0.0 {
        // covers -0.0
        return "0".into();
    }
    value.to_string()
}

/// Digits of `abs` rounded to cents with the decimal point removed.
/// Always at least three digits long (`0.5` → `"050"`).
fn round_to_cents(abs: f64) -> String {
    let repr = abs.to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let round_up = frac_part.as_bytes().get(2).is_some_and(|d| *d >= b'5');
    let mut frac: Vec<u8> = frac_part.bytes().take(2).collect();
    frac.resize(2, b'0');

    let mut digits: Vec<u8> = int_part.bytes().chain(frac).collect();
    if round_up {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, b'1');
                break;
            }
            i -= 1;
            if digits[i] == b'9' {
                digits[i] = b'0';
            } else {
                digits[i] += 1;
                break;
            }
        }
    }
    while digits.len() < 3 {
        digits.insert(0, b'0');
    }
    digits.into_iter().map(char::from).collect()
}

fn group_thousands(int_digits: &str) -> String {
    let len = int_digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_has_separators_and_two_decimals() {
        assert_eq!(format_number(1234567.891), "1,234,567.89");
        assert_eq!(format_number(1000.0), "1,000.00");
        assert_eq!(format_number(999.999), "1,000.00");
        assert_eq!(format_number(0.0), "0.00");
        assert_eq!(format_number(42.5), "42.50");
        assert_eq!(format_number(100.0), "100.00");
    }

    #[test]
    fn number_rounds_half_away_from_zero() {
        assert_eq!(format_number(1.005), "1.01");
        assert_eq!(format_number(0.125), "0.13");
        assert_eq!(format_number(0.124), "0.12");
        assert_eq!(format_number(-2.345), "-2.35");
    }

    #[test]
    fn negative_numbers_keep_sign() {
        assert_eq!(format_number(-5.0), "-5.00");
        assert_eq!(format_number(-1234.5), "-1,234.50");
        assert_eq!(format_number(-0.001), "0.00");
    }

    #[test]
    fn non_finite_renders_zero() {
        assert_eq!(format_number(f64::NAN), "0.00");
        assert_eq!(format_number(f64::INFINITY), "0.00");
        assert_eq!(format_currency(f64::NEG_INFINITY), "$0.00");
    }

    #[test]
    fn currency_drops_sign() {
        assert_eq!(format_currency(-5.0), "$5.00");
        assert_eq!(format_currency(10000.0), "$10,000.00");
        assert_eq!(format_currency_with(12.0, "€"), "€12.00");
    }

    #[test]
    fn signed_currency_prefixes_direction() {
        assert_eq!(format_signed_currency(-2000.0, "$"), "-$2,000.00");
        assert_eq!(format_signed_currency(500.0, "$"), "+$500.00");
        assert_eq!(format_signed_currency(0.0, "$"), "+$0.00");
    }

    #[test]
    fn shares_render_without_trailing_zero() {
        assert_eq!(format_shares(100.0), "100");
        assert_eq!(format_shares(12.5), "12.5");
        assert_eq!(format_shares(-0.0), "0");
    }
}
