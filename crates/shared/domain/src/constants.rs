//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Users
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 6;

// =============================================================================
// Posts
// =============================================================================

/// Maximum length of a single tag
pub const MAX_TAG_LENGTH: usize = 32;

/// Maximum number of tags on one post
pub const MAX_TAGS_PER_POST: usize = 16;

/// Check that a tag list respects the per-tag and per-post limits
pub fn tags_are_valid(tags: &[String]) -> bool {
    tags.len() <= MAX_TAGS_PER_POST
        && tags
            .iter()
            .all(|tag| !tag.trim().is_empty() && tag.chars().count() <= MAX_TAG_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_within_limits() {
        assert!(tags_are_valid(&[]));
        assert!(tags_are_valid(&["rust".to_string(), "async".to_string()]));
    }

    #[test]
    fn test_tags_reject_blank_and_long() {
        assert!(!tags_are_valid(&["  ".to_string()]));
        assert!(!tags_are_valid(&["x".repeat(MAX_TAG_LENGTH + 1)]));
    }

    #[test]
    fn test_tags_reject_too_many() {
        let tags: Vec<String> = (0..=MAX_TAGS_PER_POST).map(|i| format!("t{}", i)).collect();
        assert!(!tags_are_valid(&tags));
    }
}
