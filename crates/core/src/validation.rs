//! Field-level validation rules for account, bitmap-ID and game forms.
//!
//! Each rule returns `Result<(), CoreError>` so callers can surface the
//! message inline; wizard gates only care about `is_ok()`.

use std::sync::LazyLock;

use regex::Regex;
use validator::ValidateEmail;

use crate::error::CoreError;

/// Username length bounds, counted in characters.
pub const USERNAME_MIN_LEN: usize = 2;
pub const USERNAME_MAX_LEN: usize = 20;

/// Password length bounds, counted in characters.
pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 64;

/// Nickname length bounds, counted in characters.
pub const NICKNAME_MIN_LEN: usize = 2;
pub const NICKNAME_MAX_LEN: usize = 20;

/// Maximum profile bio length in characters.
pub const BIO_MAX_LEN: usize = 300;

/// Bitmap-ID: a lowercase letter followed by 3-15 lowercase letters,
/// digits or underscores.
const BITMAP_ID_PATTERN: &str = r"^[a-z][a-z0-9_]{3,15}$";

static BITMAP_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(BITMAP_ID_PATTERN).expect("valid regex"));

static HTTP_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("valid regex"));

pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.trim().is_empty() {
        return Err(CoreError::Validation("Email is required".to_string()));
    }
    if !email.validate_email() {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(())
}

fn validate_char_len(field: &str, value: &str, min: usize, max: usize) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(CoreError::Validation(format!(
            "{field} must be between {min} and {max} characters (got {len})"
        )));
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), CoreError> {
    validate_char_len("Username", username.trim(), USERNAME_MIN_LEN, USERNAME_MAX_LEN)
}

pub fn validate_password(password: &str) -> Result<(), CoreError> {
    validate_char_len("Password", password, PASSWORD_MIN_LEN, PASSWORD_MAX_LEN)
}

/// Check that the confirmation field repeats the password exactly.
pub fn validate_password_confirmation(password: &str, confirmation: &str) -> Result<(), CoreError> {
    if password != confirmation {
        return Err(CoreError::Validation(
            "Password confirmation does not match".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_nickname(nickname: &str) -> Result<(), CoreError> {
    validate_char_len("Nickname", nickname.trim(), NICKNAME_MIN_LEN, NICKNAME_MAX_LEN)
}

pub fn validate_bio(bio: &str) -> Result<(), CoreError> {
    validate_char_len("Bio", bio, 0, BIO_MAX_LEN)
}

pub fn validate_bitmap_id(id: &str) -> Result<(), CoreError> {
    if !BITMAP_ID_RE.is_match(id) {
        return Err(CoreError::Validation(format!(
            "Bitmap ID '{id}' must start with a lowercase letter and contain 4-16 \
             lowercase letters, digits or underscores"
        )));
    }
    Ok(())
}

/// Accepts `http://` and `https://` URLs only.
pub fn validate_http_url(url: &str) -> Result<(), CoreError> {
    if !HTTP_URL_RE.is_match(url) {
        return Err(CoreError::Validation(format!(
            "'{url}' is not an http(s) URL"
        )));
    }
    Ok(())
}

/// Release dates use the ISO `YYYY-MM-DD` form.
pub fn validate_release_date(date: &str) -> Result<chrono::NaiveDate, CoreError> {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
        CoreError::Validation(format!("Release date '{date}' is not YYYY-MM-DD: {e}"))
    })
}

/// Non-blank check shared by required text fields.
pub fn validate_required(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_accepts_plain_address() {
        assert!(validate_email("player@prodbybitmap.com").is_ok());
    }

    #[test]
    fn email_rejects_garbage() {
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("two@@signs.com").is_err());
    }

    #[test]
    fn username_counts_characters_not_bytes() {
        // Two Hangul syllables are six bytes but two characters.
        assert!(validate_username("비트").is_ok());
        assert!(validate_username("a").is_err());
        assert!(validate_username(&"x".repeat(USERNAME_MAX_LEN + 1)).is_err());
    }

    #[test]
    fn password_length_bounds() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long-enough").is_ok());
        assert!(validate_password(&"p".repeat(PASSWORD_MAX_LEN + 1)).is_err());
    }

    #[test]
    fn password_confirmation_must_match() {
        assert!(validate_password_confirmation("secret-pass", "secret-pass").is_ok());
        let msg = validate_password_confirmation("secret-pass", "secret-pas")
            .unwrap_err()
            .to_string();
        assert!(msg.contains("does not match"));
    }

    #[test]
    fn bitmap_id_format() {
        assert!(validate_bitmap_id("studio_9").is_ok());
        assert!(validate_bitmap_id("abc").is_err());
        assert!(validate_bitmap_id("9studio").is_err());
        assert!(validate_bitmap_id("Studio").is_err());
        assert!(validate_bitmap_id("studio-nine").is_err());
        assert!(validate_bitmap_id(&format!("a{}", "b".repeat(16))).is_err());
    }

    #[test]
    fn http_url_rules() {
        assert!(validate_http_url("https://prodbybitmap.com/games").is_ok());
        assert!(validate_http_url("http://example.org").is_ok());
        assert!(validate_http_url("ftp://example.org").is_err());
        assert!(validate_http_url("example.org").is_err());
    }

    #[test]
    fn release_date_is_iso() {
        let date = validate_release_date("2024-03-01").unwrap();
        assert_eq!(date.to_string(), "2024-03-01");
        assert!(validate_release_date("03/01/2024").is_err());
        assert!(validate_release_date("2024-02-30").is_err());
    }

    #[test]
    fn bio_limit() {
        assert!(validate_bio("").is_ok());
        assert!(validate_bio(&"가".repeat(BIO_MAX_LEN)).is_ok());
        assert!(validate_bio(&"가".repeat(BIO_MAX_LEN + 1)).is_err());
    }

    #[test]
    fn required_rejects_blank() {
        assert!(validate_required("Title", "  ").is_err());
        assert!(validate_required("Title", "Bitmap").is_ok());
    }
}
