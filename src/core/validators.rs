use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]{3,}$").expect("username pattern is valid"));

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s'-]+$").expect("name pattern is valid"));

const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

pub fn is_email_valid(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_password_valid(password: &str) -> bool {
    password.chars().count() >= 6
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

/// Coarse strength bucket shown next to password inputs. Medium needs letters,
/// digits and 8+ characters; strong additionally mixed case and a symbol.
pub fn password_strength(password: &str) -> PasswordStrength {
    let length = password.chars().count();
    if length < 6 {
        return PasswordStrength::Weak;
    }

    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    if !has_digit || !has_letter || length < 8 {
        return PasswordStrength::Weak;
    }

    let has_special = password.chars().any(|c| SPECIAL_CHARS.contains(c));
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    if has_special && has_upper && has_lower {
        PasswordStrength::Strong
    } else {
        PasswordStrength::Medium
    }
}

/// Both non-empty and equal.
pub fn passwords_match(password: &str, confirmation: &str) -> bool {
    !password.is_empty() && password == confirmation
}

pub fn is_username_valid(username: &str) -> bool {
    USERNAME_RE.is_match(username)
}

pub fn is_name_valid(name: &str) -> bool {
    !name.trim().is_empty() && NAME_RE.is_match(name)
}

/// Auth fields with a dedicated line of error copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Password,
    ConfirmPassword,
    Username,
    Name,
}

/// Per-field error copy for the auth screens. `None` means the value passes.
/// `compare` is the other password for [`AuthField::ConfirmPassword`].
pub fn field_message(field: AuthField, value: &str, compare: Option<&str>) -> Option<&'static str> {
    match field {
        AuthField::Email => {
            if value.is_empty() {
                Some("Email is required")
            } else if !is_email_valid(value) {
                Some("Please enter a valid email address")
            } else {
                None
            }
        }
        AuthField::Password => {
            if value.is_empty() {
                Some("Password is required")
            } else if !is_password_valid(value) {
                Some("Password must be at least 6 characters")
            } else {
                None
            }
        }
        AuthField::ConfirmPassword => {
            if value.is_empty() {
                Some("Please confirm your password")
            } else if compare.is_some_and(|other| !other.is_empty() && other != value) {
                Some("Passwords do not match")
            } else {
                None
            }
        }
        AuthField::Username => {
            if value.is_empty() {
                Some("Username is required")
            } else if value.chars().count() < 3 {
                Some("Username must be at least 3 characters")
            } else if !is_username_valid(value) {
                Some("Username can only contain letters, numbers, and underscores")
            } else {
                None
            }
        }
        AuthField::Name => {
            if value.trim().is_empty() {
                Some("Name is required")
            } else if !is_name_valid(value) {
                Some("Name contains invalid characters")
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_needs_local_host_and_tld() {
        assert!(is_email_valid("user@example.com"));
        assert!(is_email_valid("a.b+c@sub.domain.org"));
        assert!(!is_email_valid("user@example"));
        assert!(!is_email_valid("user example@d.com"));
        assert!(!is_email_valid("@example.com"));
        assert!(!is_email_valid(""));
    }

    #[test]
    fn password_minimum_is_six_characters() {
        assert!(!is_password_valid("abc"));
        assert!(!is_password_valid("abcde"));
        assert!(is_password_valid("abcdef"));
    }

    #[test]
    fn strength_buckets() {
        assert_eq!(password_strength("abc"), PasswordStrength::Weak);
        assert_eq!(password_strength("abcdef"), PasswordStrength::Weak);
        assert_eq!(password_strength("abcd1234"), PasswordStrength::Medium);
        assert_eq!(password_strength("Abcd123!"), PasswordStrength::Strong);
        assert_eq!(password_strength("abcd123!"), PasswordStrength::Medium);
    }

    #[test]
    fn matching_requires_non_empty_pair() {
        assert!(passwords_match("hunter23", "hunter23"));
        assert!(!passwords_match("hunter23", "hunter2"));
        assert!(!passwords_match("", ""));
    }

    #[test]
    fn username_shape() {
        assert!(is_username_valid("ab_1"));
        assert!(is_username_valid("abc"));
        assert!(!is_username_valid("ab"));
        assert!(!is_username_valid("has space"));
        assert!(!is_username_valid("dash-ed"));
    }

    #[test]
    fn name_allows_letters_spaces_and_apostrophes() {
        assert!(is_name_valid("Mary O'Neil"));
        assert!(is_name_valid("Jean-Luc"));
        assert!(!is_name_valid("   "));
        assert!(!is_name_valid("R2D2"));
    }

    #[test]
    fn message_table_matches_screen_copy() {
        assert_eq!(
            field_message(AuthField::Email, "", None),
            Some("Email is required")
        );
        assert_eq!(
            field_message(AuthField::Email, "nope", None),
            Some("Please enter a valid email address")
        );
        assert_eq!(field_message(AuthField::Email, "a@b.co", None), None);

        assert_eq!(
            field_message(AuthField::Password, "abc", None),
            Some("Password must be at least 6 characters")
        );
        assert_eq!(
            field_message(AuthField::ConfirmPassword, "", Some("secret1")),
            Some("Please confirm your password")
        );
        assert_eq!(
            field_message(AuthField::ConfirmPassword, "secret2", Some("secret1")),
            Some("Passwords do not match")
        );
        assert_eq!(
            field_message(AuthField::ConfirmPassword, "secret1", Some("secret1")),
            None
        );

        assert_eq!(
            field_message(AuthField::Username, "ab", None),
            Some("Username must be at least 3 characters")
        );
        assert_eq!(
            field_message(AuthField::Username, "bad name", None),
            Some("Username can only contain letters, numbers, and underscores")
        );
        assert_eq!(
            field_message(AuthField::Name, "R2D2", None),
            Some("Name contains invalid characters")
        );
    }
}
