/// Password complexity policy: at least one special character out of
/// `! @ # $ *`, one lowercase letter, one uppercase letter and one digit.
/// Four independent membership checks; an empty string fails the first.
pub fn is_password_valid(password: &str) -> bool {
    let has_special = password.chars().any(|c| matches!(c, '!' | '@' | '#' | '$' | '*'));
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    has_special && has_lower && has_upper && has_digit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_password_meeting_all_classes() {
        assert!(is_password_valid("Abc123!"));
    }

    #[test]
    fn rejects_missing_uppercase() {
        assert!(!is_password_valid("abc123!"));
    }

    #[test]
    fn rejects_missing_lowercase() {
        assert!(!is_password_valid("ABC123!"));
    }

    #[test]
    fn rejects_missing_digit() {
        assert!(!is_password_valid("Abcdef!"));
    }

    #[test]
    fn rejects_missing_special_character() {
        assert!(!is_password_valid("Abc123"));
    }

    #[test]
    fn rejects_empty_password() {
        assert!(!is_password_valid(""));
    }

    #[test]
    fn accepts_each_listed_special_character() {
        for special in ['!', '@', '#', '$', '*'] {
            assert!(is_password_valid(&format!("Abc123{special}")));
        }
    }
}
