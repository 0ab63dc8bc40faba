//! Request input checks that run before any store access.

use crate::error::{AppError, Result};
use uuid::Uuid;

/// Parse a path identifier, failing with `Invalid {label} ID`.
pub fn parse_id(raw: &str, label: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::BadRequest(format!("Invalid {label} ID")))
}

/// Trimmed text, or 400 with `message` when missing or blank.
pub fn require_text(value: Option<&str>, message: &str) -> Result<String> {
    optional_text(value).ok_or_else(|| AppError::BadRequest(message.to_string()))
}

/// Trimmed text, treating blank input as absent.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), "video").unwrap(), id);
    }

    #[test]
    fn parse_id_names_the_entity() {
        match parse_id("abc", "playlist") {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Invalid playlist ID"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn require_text_rejects_blank() {
        assert!(require_text(None, "Content is required").is_err());
        assert!(require_text(Some(""), "Content is required").is_err());
        assert!(require_text(Some("   \n"), "Content is required").is_err());
        assert_eq!(require_text(Some("  hello "), "x").unwrap(), "hello");
    }

    #[test]
    fn optional_text_drops_blank() {
        assert_eq!(optional_text(Some("  ")), None);
        assert_eq!(optional_text(Some(" a ")), Some("a".to_string()));
    }
}
