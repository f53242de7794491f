//! Field checks shared by the request payloads and the models.

use std::sync::LazyLock;

use regex::Regex;

use crate::table::TableError;

static EMAIL_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

pub fn is_valid_email(value: &str) -> bool {
    match EMAIL_RE.as_ref() {
        Ok(re) => re.is_match(value.trim()),
        Err(e) => {
            log::error!("email pattern failed to compile: {}", e);
            false
        }
    }
}

/// Rejects blank or malformed addresses with the form's message.
pub fn require_email(value: &str) -> Result<(), TableError> {
    if value.trim().is_empty() {
        return Err(TableError::validation("Email is required"));
    }
    if !is_valid_email(value) {
        return Err(TableError::validation("Please enter a valid email address"));
    }
    Ok(())
}

/// Rejects values that are blank or shorter than `min` characters once
/// trimmed. `label` names the field in the blank case, `short` is the
/// message for too-short input.
pub fn require_min_len(value: &str, min: usize, label: &str, short: &str) -> Result<(), TableError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TableError::validation(format!("{} is required", label)));
    }
    if trimmed.chars().count() < min {
        return Err(TableError::validation(short));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("emma.johnson@email.com"));
        assert!(is_valid_email("  a@b.co "));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("emma"));
        assert!(!is_valid_email("emma@email"));
        assert!(!is_valid_email("em ma@email.com"));
        assert_eq!(
            require_email(""),
            Err(TableError::validation("Email is required"))
        );
    }

    #[test]
    fn minimum_length_counts_trimmed_chars() {
        assert!(require_min_len(" Al ", 2, "Name", "too short").is_ok());
        assert_eq!(
            require_min_len(" A ", 2, "Name", "too short"),
            Err(TableError::validation("too short"))
        );
        assert_eq!(
            require_min_len("  ", 2, "Name", "too short"),
            Err(TableError::validation("Name is required"))
        );
    }
}
