use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)+$").unwrap());

// International: '+', 1-3 digit country code, then 4-14 digits.
static PHONE_INTL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+\d{1,3}\d{4,14}$").unwrap());

// Dashed local format: NNN-NNN-NNNN.
static PHONE_DASHED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3}-\d{3}-\d{4}$").unwrap());

/// Standard address shape: local part, '@', and a domain with at least one dot.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// A phone number is accepted when it matches either supported format.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_INTL_RE.is_match(phone) || PHONE_DASHED_RE.is_match(phone)
}
