//! Shared utility functions for the doa CLI.

use std::borrow::Cow;
use std::path::PathBuf;

/// Expands a leading `~` to the user's home directory.
///
/// # Examples
///
/// ```ignore
/// use doa::utils::expand_path;
///
/// let path = expand_path("~/.doa.yaml");
/// assert!(path.ends_with(".doa.yaml"));
/// ```
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Truncates a string to a maximum length in bytes, appending "..." if
/// truncated. Never splits a UTF-8 character.
///
/// # Examples
///
/// ```ignore
/// use doa::utils::truncate;
///
/// assert_eq!(truncate("hello", 10), "hello");
/// assert_eq!(truncate("hello world", 8), "hello...");
/// ```
pub fn truncate(s: &str, max_len: usize) -> Cow<'_, str> {
    if s.len() <= max_len {
        Cow::Borrowed(s)
    } else if max_len <= 3 {
        Cow::Borrowed(&s[..floor_char_boundary(s, max_len)])
    } else {
        Cow::Owned(format!("{}...", &s[..floor_char_boundary(s, max_len - 3)]))
    }
}

fn floor_char_boundary(s: &str, index: usize) -> usize {
    (0..=index.min(s.len()))
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_path_tilde() {
        let home = shellexpand::tilde("~").to_string();
        assert_eq!(expand_path("~/.doa.yaml"), PathBuf::from(home).join(".doa.yaml"));
    }

    #[test]
    fn test_expand_path_absolute_untouched() {
        assert_eq!(expand_path("/etc/doa.yaml"), PathBuf::from("/etc/doa.yaml"));
    }

    #[test]
    fn test_truncate_no_truncation_needed() {
        let result = truncate("hello", 10);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, "hello");
    }

    #[test]
    fn test_truncate_exact_length() {
        let result = truncate("hello", 5);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, "hello");
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        let result = truncate("hello world", 8);
        assert!(matches!(result, Cow::Owned(_)));
        assert_eq!(result, "hello...");
    }

    #[test]
    fn test_truncate_very_short_max() {
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("hello", 2), "he");
    }

    #[test]
    fn test_truncate_multibyte() {
        // "é" is two bytes; cutting at byte 5 would split it
        assert_eq!(truncate("abcdéfgh", 8), "abcd...");
        assert_eq!(truncate("éé", 3), "é");
    }
}
