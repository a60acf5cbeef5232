//! Headline content rules.
//!
//! A crown holder may broadcast one short message to the squad. Content is
//! trimmed before validation and stored trimmed; the limit counts characters,
//! not bytes, so multi-byte scripts get the full 50.

/// Maximum headline length in characters, after trimming.
pub const MAX_HEADLINE_CHARS: usize = 50;

/// Content failures, one variant per distinct client-facing condition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeadlineError {
    #[error("Headline must not be empty")]
    Empty,

    #[error("Headline exceeds {MAX_HEADLINE_CHARS} characters (got {chars})")]
    TooLong { chars: usize },
}

/// Validate raw headline input, returning the trimmed content to store.
pub fn validate_headline(raw: &str) -> Result<&str, HeadlineError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(HeadlineError::Empty);
    }
    let chars = trimmed.chars().count();
    if chars > MAX_HEADLINE_CHARS {
        return Err(HeadlineError::TooLong { chars });
    }
    Ok(trimmed)
}
