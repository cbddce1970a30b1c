use regex::Regex;
use rental_platform_shared::{PHONE_PATTERN, SLUG_PATTERN};
use validator::ValidationError;

/// Validate phone number format (E.164-ish, optional leading +).
pub fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    let phone_regex = Regex::new(PHONE_PATTERN).expect("phone pattern is valid");

    let normalized: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    if !phone_regex.is_match(&normalized) {
        return Err(ValidationError::new("invalid_phone_format"));
    }

    Ok(())
}

/// Validate an explicitly supplied slug (admin-entered page slugs).
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let slug_regex = Regex::new(SLUG_PATTERN).expect("slug pattern is valid");

    if slug.is_empty() || slug.len() > 255 {
        return Err(ValidationError::new("invalid_slug_length"));
    }

    if !slug_regex.is_match(slug) {
        return Err(ValidationError::new("invalid_slug_format"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_international_phone_numbers() {
        assert!(validate_phone_number("+971501234567").is_ok());
        assert!(validate_phone_number("+1 415 555 0100").is_ok());
    }

    #[test]
    fn rejects_malformed_phone_numbers() {
        assert!(validate_phone_number("abc").is_err());
        assert!(validate_phone_number("0").is_err());
    }

    #[test]
    fn accepts_well_formed_slugs() {
        assert!(validate_slug("about-us").is_ok());
        assert!(validate_slug("dubai-city-tour-2024").is_ok());
    }

    #[test]
    fn rejects_malformed_slugs() {
        assert!(validate_slug("").is_err());
        assert!(validate_slug("About Us").is_err());
        assert!(validate_slug("-leading").is_err());
        assert!(validate_slug("trailing-").is_err());
    }
}
