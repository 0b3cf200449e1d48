//! Input normalization for user fields

use usuarios_shared::constants::{PHONE_MAX_DIGITS, PHONE_MIN_DIGITS};
use usuarios_shared::IdentifierKind;
use validator::ValidateEmail;

use crate::error::DomainError;

const MAX_NAME_CHARS: usize = 255;

/// Trims, collapses inner whitespace and title-cases every word.
///
/// A word starts after whitespace, a hyphen or an apostrophe:
/// "maria-JOSÉ" becomes "Maria-José", "o'neil" becomes "O'Neil".
pub fn normalize_name(raw: &str) -> Result<String, DomainError> {
    let name = raw
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() || name.chars().count() > MAX_NAME_CHARS {
        return Err(DomainError::InvalidName);
    }
    Ok(name)
}

fn title_case_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut word_start = true;
    for c in word.chars() {
        if word_start {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        word_start = matches!(c, '-' | '\'' | '\u{2019}');
    }
    out
}

/// Keeps only the digits; area code plus 8 or 9 digits.
pub fn normalize_phone(raw: &str) -> Result<String, DomainError> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits.len()) {
        return Err(DomainError::InvalidPhone);
    }
    Ok(digits)
}

pub fn normalize_email(raw: &str) -> Result<String, DomainError> {
    let email = raw.trim().to_lowercase();
    if !email.validate_email() {
        return Err(DomainError::InvalidEmail);
    }
    Ok(email)
}

pub fn normalize_identifier(kind: IdentifierKind, raw: &str) -> Result<String, DomainError> {
    match kind {
        IdentifierKind::Telefone => normalize_phone(raw),
        IdentifierKind::Email => normalize_email(raw),
    }
}

/// Login lookup key: same canonical form as stored, without length checks,
/// so a malformed identifier simply matches no user.
pub fn lookup_key(kind: IdentifierKind, raw: &str) -> String {
    match kind {
        IdentifierKind::Telefone => raw.chars().filter(|c| c.is_ascii_digit()).collect(),
        IdentifierKind::Email => raw.trim().to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_title_case() {
        assert_eq!(normalize_name("joão DA silva").unwrap(), "João Da Silva");
        assert_eq!(normalize_name("  ÉDSON   arantes  ").unwrap(), "Édson Arantes");
        assert_eq!(normalize_name("maria-JOSÉ").unwrap(), "Maria-José");
    }

    #[test]
    fn test_name_apostrophe_starts_word() {
        assert_eq!(
            normalize_name("maria d'ávila o'neil").unwrap(),
            "Maria D'Ávila O'Neil"
        );
        assert_eq!(normalize_name("JOANA D\u{2019}ARC").unwrap(), "Joana D\u{2019}Arc");
    }

    #[test]
    fn test_name_blank_rejected() {
        assert!(matches!(normalize_name("   "), Err(DomainError::InvalidName)));
        assert!(matches!(normalize_name(""), Err(DomainError::InvalidName)));
    }

    #[test]
    fn test_name_too_long() {
        let long = "a".repeat(MAX_NAME_CHARS + 1);
        assert!(normalize_name(&long).is_err());
    }

    #[test]
    fn test_phone_formatting_stripped() {
        let cases = [
            ("(11) 91234-5678", "11912345678"),
            ("11 9123 4567", "1191234567"),
            ("11.91234.5678", "11912345678"),
            ("tel: 1191234567", "1191234567"),
        ];
        for (raw, expected) in cases {
            assert_eq!(normalize_phone(raw).unwrap(), expected, "input {}", raw);
        }
    }

    #[test]
    fn test_phone_length_rejected() {
        assert!(matches!(normalize_phone("123456789"), Err(DomainError::InvalidPhone)));
        assert!(matches!(normalize_phone("123456789012"), Err(DomainError::InvalidPhone)));
        assert!(matches!(normalize_phone("abc"), Err(DomainError::InvalidPhone)));
        assert!(normalize_phone("+55 (11) 3123-4567").is_err());
    }

    #[test]
    fn test_email() {
        assert_eq!(normalize_email(" Ana@Example.COM ").unwrap(), "ana@example.com");
        assert!(matches!(normalize_email("not-an-email"), Err(DomainError::InvalidEmail)));
    }

    #[test]
    fn test_identifier_dispatch() {
        assert_eq!(
            normalize_identifier(IdentifierKind::Telefone, "(21) 99876-5432").unwrap(),
            "21998765432"
        );
        assert_eq!(
            normalize_identifier(IdentifierKind::Email, "X@Y.com").unwrap(),
            "x@y.com"
        );
    }

    #[test]
    fn test_lookup_key() {
        assert_eq!(lookup_key(IdentifierKind::Telefone, "(11) 9"), "119");
        assert_eq!(lookup_key(IdentifierKind::Email, " A@B.C "), "a@b.c");
    }
}
