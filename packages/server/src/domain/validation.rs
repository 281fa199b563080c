//! Validation and sanitization rules.
//!
//! Pure functions with no shared state. Everything that ends up broadcast to
//! other connections (display names, message text) passes through
//! [`sanitize`] first.

use super::value_object::FileReference;

/// Minimum display name length in characters
pub const MIN_NAME_CHARS: usize = 2;
/// Maximum display name length in characters
pub const MAX_NAME_CHARS: usize = 20;
/// Maximum message text length in characters
pub const MAX_TEXT_CHARS: usize = 500;

/// Names that can never be claimed as a display identity
pub const RESERVED_NAMES: [&str; 8] = [
    "admin",
    "administrator",
    "moderator",
    "mod",
    "system",
    "server",
    "root",
    "bot",
];

/// Check whether a display name satisfies the shape rules: 2-20 characters,
/// each a letter, digit, space, hyphen, underscore or period.
pub fn is_valid_display_name(name: &str) -> bool {
    let len = name.chars().count();
    if !(MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&len) {
        return false;
    }
    name.chars()
        .all(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | '.'))
}

/// Check whether a name matches the reserved-name list (case-insensitive
/// exact match).
pub fn is_reserved_name(name: &str) -> bool {
    RESERVED_NAMES.iter().any(|r| r.eq_ignore_ascii_case(name))
}

/// Check whether message text fits within the length cap.
pub fn is_valid_text(text: &str) -> bool {
    text.chars().count() <= MAX_TEXT_CHARS
}

/// Strip markup constructs from user-supplied input.
///
/// The output contains no tag delimiters, so nothing script-executable
/// survives into a broadcast. Idempotent: `sanitize(sanitize(x)) == sanitize(x)`.
pub fn sanitize(input: &str) -> String {
    input.chars().filter(|c| !matches!(c, '<' | '>')).collect()
}

/// Check that a file reference carries the two fields the core requires.
///
/// MIME type and size are trusted from the upload collaborator and not
/// re-validated here.
pub fn is_valid_file_reference(file: &FileReference) -> bool {
    !file.name.trim().is_empty() && !file.locator.trim().is_empty()
}
