//! Parameter-list parsing for directive values.
//!
//! Multi-field directives pack their fields into one text value separated by
//! `;`. Fields bind by position, so empty fields are kept.

/// Separator between the fields of a list directive.
pub const PARAM_SEPARATOR: char = ';';

/// Split `raw` on `separator`, trimming each token.
///
/// Blank input yields no tokens. Empty tokens are preserved: `"a;;b"` is three
/// tokens, the middle one empty.
pub fn split_params(raw: &str, separator: char) -> Vec<&str> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(separator).map(str::trim).collect()
}

/// Leading-integer parse: optional whitespace and sign, then digits.
///
/// Stops at the first non-digit; no digits yields 0. Saturates on overflow.
pub fn leading_int(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(b - b'0');
        value = value.saturating_mul(10).saturating_add(digit);
    }
    if negative {
        -value
    } else {
        value
    }
}

/// `yes` in any case.
pub fn is_yes(token: &str) -> bool {
    token.trim().eq_ignore_ascii_case("yes")
}

/// The `*` wildcard.
pub fn is_star(token: &str) -> bool {
    token.trim() == "*"
}
