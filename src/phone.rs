//! Phone numbers
//!
//! Russian mobile numbers are typed progressively and rendered as `+7 (XXX) XXX-XX-XX`.

/// Digits kept for a full number, country code included.
pub const PHONE_DIGITS: usize = 11;

const COUNTRY_CODE: char = '7';

/// Canonical digit string: non-digits stripped, `7` prefixed when the input does not
/// start with it, truncated to [`PHONE_DIGITS`].
pub fn phone_digits(raw: &str) -> String {
    let mut digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    if !digits.is_empty() && !digits.starts_with(COUNTRY_CODE) {
        digits.insert(0, COUNTRY_CODE);
    }

    digits.truncate(PHONE_DIGITS);
    digits
}

fn segment(digits: &str, start: usize, end: usize) -> &str {
    digits.get(start..end.min(digits.len())).unwrap_or_default()
}

/// Render whatever has been typed so far as `+7 (XXX) XXX-XX-XX`.
///
/// Re-formatting an already formatted value is stable.
pub fn format_phone(raw: &str) -> String {
    let digits = phone_digits(raw);
    let len = digits.len();
    let mut formatted = String::with_capacity(18);

    if len > 0 {
        formatted.push_str("+7");
    }
    if len > 1 {
        formatted.push_str(" (");
        formatted.push_str(segment(&digits, 1, 4));
    }
    if len > 4 {
        formatted.push_str(") ");
        formatted.push_str(segment(&digits, 4, 7));
    }
    if len > 7 {
        formatted.push('-');
        formatted.push_str(segment(&digits, 7, 9));
    }
    if len > 9 {
        formatted.push('-');
        formatted.push_str(segment(&digits, 9, 11));
    }

    formatted
}

/// Username form of a phone: digits and `+` only.
pub fn login_username(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Whether the number has all of its digits.
pub fn is_complete(raw: &str) -> bool {
    phone_digits(raw).len() == PHONE_DIGITS
}
