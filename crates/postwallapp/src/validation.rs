//! Field rules for posts.
//!
//! Every validator is pure and returns the value to store on success (aliases,
//! avatars and content are trimmed) or the reason for rejection.
//!
//! - Alias: 1-50 characters of letters, digits, spaces, `-` and `_`
//! - Content: 1-300 characters, length checked before trimming
//! - Avatar: one pictographic symbol sequence, or an `http(s)` image URL
//! - Edit code: exactly six ASCII digits
//! - Post id: ASCII alphanumeric, non-empty

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

pub const MAX_ALIAS_CHARS: usize = 50;
pub const MAX_CONTENT_CHARS: usize = 300;
pub const EDIT_ID_LEN: usize = 6;

static IMAGE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^https?://.+\.(jpg|jpeg|png|gif|webp)(\?.*)?$").expect("valid image url regex")
});

// A base pictograph, an optional presentation selector or skin tone, and any
// number of further pictographs glued on with zero-width joiners.
static PICTOGRAPH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\p{Extended_Pictographic}(?:\x{FE0F}|\p{Emoji_Modifier})?(?:\x{200D}\p{Extended_Pictographic}(?:\x{FE0F}|\p{Emoji_Modifier})?)*$",
    )
    .expect("valid pictograph regex")
});

/// Validates a display alias and returns it trimmed.
///
/// # Examples
/// ```
/// use postwallapp::validation::validate_alias;
///
/// assert_eq!(validate_alias(" abc-123 DEF ").unwrap(), "abc-123 DEF");
/// assert!(validate_alias("").is_err());
/// assert!(validate_alias("abc!").is_err());
/// ```
pub fn validate_alias(raw: &str) -> Result<String, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::AliasRequired);
    }
    if raw.chars().count() > MAX_ALIAS_CHARS {
        return Err(ValidationError::AliasTooLong);
    }

    let alias = raw.trim();
    if let Some(ch) = alias.chars().find(|c| !is_valid_alias_char(*c)) {
        return Err(ValidationError::AliasInvalidCharacter(ch));
    }
    Ok(alias.to_string())
}

fn is_valid_alias_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == ' ' || ch == '-' || ch == '_'
}

/// Validates post content and returns it trimmed.
///
/// The length limit applies to the raw input, so padding that would be
/// trimmed away still counts against it.
pub fn validate_content(raw: &str) -> Result<String, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::ContentRequired);
    }
    if raw.chars().count() > MAX_CONTENT_CHARS {
        return Err(ValidationError::ContentTooLong);
    }
    Ok(raw.trim().to_string())
}

/// Validates an avatar and returns it trimmed.
///
/// # Examples
/// ```
/// use postwallapp::validation::validate_avatar;
///
/// assert!(validate_avatar("🏂").is_ok());
/// assert!(validate_avatar("https://example.com/me.PNG?size=64").is_ok());
/// assert!(validate_avatar("me.png").is_err());
/// ```
pub fn validate_avatar(raw: &str) -> Result<String, ValidationError> {
    let avatar = raw.trim();
    if avatar.is_empty() {
        return Err(ValidationError::AvatarRequired);
    }
    if IMAGE_URL.is_match(avatar) || PICTOGRAPH.is_match(avatar) {
        Ok(avatar.to_string())
    } else {
        Err(ValidationError::AvatarInvalid)
    }
}

/// Checks the shape of an edit code without deciding whether one is required.
pub fn validate_edit_id(code: &str) -> Result<(), ValidationError> {
    if code.len() == EDIT_ID_LEN && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::EditIdInvalid)
    }
}

/// Edit code supplied at creation. Blank input means none was supplied.
pub fn validate_optional_edit_id(code: Option<&str>) -> Result<Option<String>, ValidationError> {
    match code {
        None => Ok(None),
        Some(c) if c.trim().is_empty() => Ok(None),
        Some(c) => validate_edit_id(c).map(|_| Some(c.to_string())),
    }
}

/// Edit code presented to authorize an update. Blank input is a failure.
pub fn validate_required_edit_id(code: &str) -> Result<(), ValidationError> {
    if code.trim().is_empty() {
        return Err(ValidationError::EditIdRequired);
    }
    validate_edit_id(code)
}

/// Validates a post id taken from a request path.
pub fn validate_post_id(id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::PostIdRequired);
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::PostIdInvalid);
    }
    Ok(())
}

/// Error type for field validation failures. The `Display` text is meant to be
/// shown to the end user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Alias is required")]
    AliasRequired,
    #[error("Alias must be 50 characters or less")]
    AliasTooLong,
    #[error("Alias can only contain letters, numbers, spaces, hyphens, and underscores")]
    AliasInvalidCharacter(char),
    #[error("Content is required")]
    ContentRequired,
    #[error("Content must be 300 characters or less")]
    ContentTooLong,
    #[error("Avatar is required")]
    AvatarRequired,
    #[error("Avatar must be an emoji or a valid image URL (jpg, jpeg, png, gif, webp)")]
    AvatarInvalid,
    #[error("Edit ID is required")]
    EditIdRequired,
    #[error("Edit ID must be exactly 6 digits")]
    EditIdInvalid,
    #[error("Post ID is required")]
    PostIdRequired,
    #[error("Post ID must contain only alphanumeric characters")]
    PostIdInvalid,
    #[error("At least one field must be provided for update")]
    EmptyUpdate,
}

impl ValidationError {
    /// The request field this error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::AliasRequired
            | ValidationError::AliasTooLong
            | ValidationError::AliasInvalidCharacter(_) => "alias",
            ValidationError::ContentRequired | ValidationError::ContentTooLong => "content",
            ValidationError::AvatarRequired | ValidationError::AvatarInvalid => "avatar",
            ValidationError::EditIdRequired | ValidationError::EditIdInvalid => "editId",
            ValidationError::PostIdRequired | ValidationError::PostIdInvalid => "id",
            ValidationError::EmptyUpdate => "updates",
        }
    }
}
