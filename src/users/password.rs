use argon2::password_hash::{self, PasswordHasher, SaltString};
#[cfg(test)]
use argon2::password_hash::{PasswordHash, PasswordVerifier};
use argon2::Argon2;
use rand::rngs::OsRng;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Minimum length in UTF-8 bytes.
pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("password is too short, should be at least 8 symbols")]
    TooShort,
    #[error("wrong password format: password must contain at least 1 upper case letter, 1 lower case letter, 1 number and 1 symbol")]
    WeakFormat,
}

#[derive(Default)]
struct Classes {
    lower: bool,
    upper: bool,
    number: bool,
    symbol: bool,
}

impl Classes {
    fn note(&mut self, c: char) {
        use GeneralCategory::*;
        match get_general_category(c) {
            LowercaseLetter => self.lower = true,
            UppercaseLetter => self.upper = true,
            DecimalNumber | LetterNumber | OtherNumber => self.number = true,
            MathSymbol | CurrencySymbol | ModifierSymbol | OtherSymbol => self.symbol = true,
            ConnectorPunctuation | DashPunctuation | OpenPunctuation | ClosePunctuation
            | InitialPunctuation | FinalPunctuation | OtherPunctuation => self.symbol = true,
            _ => {}
        }
    }

    fn complete(&self) -> bool {
        self.lower && self.upper && self.number && self.symbol
    }
}

/// Check length and character classes of a plaintext password.
///
/// Classes follow the Unicode general category: `Ll`, `Lu`, any `N*`, and
/// any `S*` or `P*`. Other categories (marks, format, private use) count
/// towards length only.
pub fn validate_password(plain: &str) -> Result<(), PolicyError> {
    if plain.len() < MIN_PASSWORD_LEN {
        return Err(PolicyError::TooShort);
    }

    let mut classes = Classes::default();
    plain.chars().for_each(|c| classes.note(c));

    if classes.complete() {
        Ok(())
    } else {
        Err(PolicyError::WeakFormat)
    }
}

/// Argon2id PHC string with a fresh random salt.
pub fn hash_password(plain: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

/// `Ok(false)` on mismatch; `Err` only when `stored` is not a PHC string.
#[cfg(test)]
pub fn verify_password(plain: &str, stored: &str) -> Result<bool, password_hash::Error> {
    let parsed = PasswordHash::new(stored)?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_passwords_are_too_short() {
        for p in ["", "a", "Ab1!", "Ab1!xyz", "short1"] {
            assert_eq!(validate_password(p), Err(PolicyError::TooShort), "{p:?}");
        }
    }

    #[test]
    fn missing_any_class_is_weak() {
        for p in [
            "abcdef1!",  // no upper
            "ABCDEF1!",  // no lower
            "Abcdefg!",  // no digit
            "Abcdefg1",  // no symbol
            "Abc def1",  // space is not a symbol
        ] {
            assert_eq!(validate_password(p), Err(PolicyError::WeakFormat), "{p:?}");
        }
    }

    #[test]
    fn all_classes_pass() {
        for p in ["Str0ng!Pwd", "Test123.", "Pässw0rd€", "Ωmega9+xyz", "Abcdefg½!", "Abcdef1^x"] {
            assert_eq!(validate_password(p), Ok(()), "{p:?}");
        }
    }

    #[test]
    fn invisible_or_unassigned_chars_are_not_symbols() {
        for p in [
            "Abcdefg1\u{200B}", // Cf zero-width space
            "Abcdefg1\u{0301}", // Mn combining acute
            "Abcdefg1\u{E000}", // Co private use
            "Abcdefg1\u{0378}", // Cn unassigned
        ] {
            assert_eq!(validate_password(p), Err(PolicyError::WeakFormat), "{p:?}");
        }
    }

    #[test]
    fn other_letters_are_not_lowercase() {
        // ª is Lo with the Other_Lowercase property
        assert_eq!(validate_password("ABCDEF1!\u{00AA}"), Err(PolicyError::WeakFormat));
        // ǅ is Lt, neither upper nor lower
        assert_eq!(validate_password("abcdef1!\u{01C5}"), Err(PolicyError::WeakFormat));
    }

    #[test]
    fn length_counts_bytes() {
        // 7 chars, 12 bytes
        assert_eq!(validate_password("Ää1!ööö"), Ok(()));
        assert_eq!(validate_password("Aa1!aaa"), Err(PolicyError::TooShort));
    }

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert_ne!(hash, password);
        assert!(hash.starts_with("$argon2id$"));
        assert_eq!(verify_password(password, &hash), Ok(true));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("Secur3P@ssw0rd!").unwrap();
        let b = hash_password("Secur3P@ssw0rd!").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("correct-Horse-battery-1").expect("hashing should succeed");
        assert_eq!(verify_password("wrong-password", &hash), Ok(false));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        assert!(verify_password("anything", "not-a-valid-hash").is_err());
    }
}
