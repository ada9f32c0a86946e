//! Canonical forms of the identifying fields.
//!
//! All the functions treat a missing value as an empty string and never fail.

use crate::config::{NormalizedKeys, PersonFields};

/// The number of digits kept from a phone number. Longer numbers are assumed to
/// carry a country prefix.
pub const PHONE_DIGITS: usize = 10;

/// Keeps the digits of a phone number, and only the last [PHONE_DIGITS] of them.
///
/// ```
/// use team_matching::normalize_phone;
/// assert_eq!(normalize_phone(Some("+91 98765-43210")), "9876543210");
/// assert_eq!(normalize_phone(None), "");
/// ```
pub fn normalize_phone(raw: Option<&str>) -> String {
    let digits: Vec<char> = raw
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    let start = digits.len().saturating_sub(PHONE_DIGITS);
    digits[start..].iter().collect()
}

/// Trims and lowercases an email address. The shape of the address is not checked.
pub fn normalize_email(raw: Option<&str>) -> String {
    raw.unwrap_or_default().trim().to_lowercase()
}

/// Trims a partial national ID. The case and the characters are preserved.
pub fn normalize_partial_id(raw: Option<&str>) -> String {
    raw.unwrap_or_default().trim().to_string()
}

impl NormalizedKeys {
    pub fn from_raw(email: Option<&str>, phone: Option<&str>, partial_id: Option<&str>) -> Self {
        NormalizedKeys {
            email: normalize_email(email),
            phone: normalize_phone(phone),
            partial_id: normalize_partial_id(partial_id),
        }
    }

    pub fn from_person(person: &PersonFields) -> Self {
        NormalizedKeys::from_raw(
            person.email.as_deref(),
            person.phone.as_deref(),
            person.partial_id.as_deref(),
        )
    }

    /// True when no key can be used for matching.
    pub fn is_empty(&self) -> bool {
        self.email.is_empty() && self.phone.is_empty() && self.partial_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_strips_formatting() {
        assert_eq!(normalize_phone(Some("(999) 999-9999")), "9999999999");
        assert_eq!(normalize_phone(Some(" 98765 43210 ")), "9876543210");
    }

    #[test]
    fn phone_keeps_last_ten_digits() {
        assert_eq!(normalize_phone(Some("91-9876543210")), "9876543210");
        assert_eq!(normalize_phone(Some("+1 (415) 555-1212 00")), "1555121200");
    }

    #[test]
    fn phone_short_numbers_are_kept() {
        assert_eq!(normalize_phone(Some("555-1212")), "5551212");
    }

    #[test]
    fn phone_without_digits_is_empty() {
        assert_eq!(normalize_phone(Some("n/a")), "");
        assert_eq!(normalize_phone(Some("")), "");
        assert_eq!(normalize_phone(None), "");
    }

    #[test]
    fn phone_is_digits_only_and_bounded() {
        let inputs = [
            "",
            "abc",
            "12",
            "+91 (0) 98765-43210 ext. 55",
            "0000000000000000000000",
            "٣٣٣ 123",
        ];
        for input in inputs.iter() {
            let out = normalize_phone(Some(input));
            assert!(out.len() <= PHONE_DIGITS, "{:?} -> {:?}", input, out);
            assert!(out.chars().all(|c| c.is_ascii_digit()), "{:?}", out);
            assert_eq!(normalize_phone(Some(out.as_str())), out);
        }
    }

    #[test]
    fn email_trims_and_lowercases() {
        assert_eq!(normalize_email(Some("  A@X.com ")), "a@x.com");
        assert_eq!(normalize_email(None), "");
    }

    #[test]
    fn email_is_idempotent_and_case_insensitive() {
        for input in ["Ada@Example.COM", " bob@b.org\t", "", "not an email"].iter() {
            let once = normalize_email(Some(input));
            assert_eq!(normalize_email(Some(once.as_str())), once);
            assert_eq!(normalize_email(Some(input.to_uppercase().as_str())), once);
        }
    }

    #[test]
    fn partial_id_preserves_content() {
        assert_eq!(normalize_partial_id(Some(" 12aB ")), "12aB");
        assert_eq!(normalize_partial_id(Some("0042")), "0042");
        assert_eq!(normalize_partial_id(None), "");
    }

    #[test]
    fn keys_from_person() {
        let person = PersonFields {
            name: Some("A".to_string()),
            email: Some("A@X.com ".to_string()),
            phone: Some("(999) 999-9999".to_string()),
            partial_id: None,
        };
        let keys = NormalizedKeys::from_person(&person);
        assert_eq!(keys.email, "a@x.com");
        assert_eq!(keys.phone, "9999999999");
        assert_eq!(keys.partial_id, "");
        assert!(!keys.is_empty());
        assert!(NormalizedKeys::default().is_empty());
    }
}
