//! Field validation and normalization rules shared by create and update.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // One non-whitespace, non-@ run, an @, another run, a dot, a final run.
    static ref EMAIL_FORMAT: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern must compile");
}

/// Inclusive upper bound for a user's age.
pub const MAX_AGE: i64 = 120;

/// A field value that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// The email does not have a `local@domain.tld` shape.
    #[error("the email format is not valid")]
    InvalidEmail,

    /// The age is not an integer in `[0, 120]`.
    #[error("age must be an integer between 0 and {MAX_AGE}")]
    AgeOutOfRange,

    /// The name is empty after trimming.
    #[error("name must not be empty")]
    EmptyName,

    /// The price is zero, negative, or not a finite number.
    #[error("price must be a positive number")]
    InvalidPrice,
}

/// Validate an email and return its stored form (trimmed, lowercased).
///
/// # Errors
/// Returns [`ValidationError::InvalidEmail`] if the trimmed value does not
/// match the email shape.
pub fn normalize_email(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if EMAIL_FORMAT.is_match(trimmed) {
        Ok(trimmed.to_lowercase())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Validate a display or product name and return its trimmed form.
///
/// # Errors
/// Returns [`ValidationError::EmptyName`] if nothing remains after trimming.
pub fn normalize_name(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyName)
    } else {
        Ok(trimmed.to_owned())
    }
}

/// Validate an age value and narrow it to the stored width.
///
/// # Errors
/// Returns [`ValidationError::AgeOutOfRange`] outside `[0, 120]`.
pub fn check_age(age: i64) -> Result<u8, ValidationError> {
    if (0..=MAX_AGE).contains(&age) {
        u8::try_from(age).map_err(|_| ValidationError::AgeOutOfRange)
    } else {
        Err(ValidationError::AgeOutOfRange)
    }
}

/// Validate a price.
///
/// # Errors
/// Returns [`ValidationError::InvalidPrice`] unless the value is finite and
/// strictly positive.
pub fn check_price(price: f64) -> Result<f64, ValidationError> {
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(ValidationError::InvalidPrice)
    }
}
