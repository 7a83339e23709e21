//! Entry name sanitization.

use std::borrow::Cow;

/// Characters that are not allowed in file names on common filesystems.
pub const FORBIDDEN_CHARS: [char; 4] = [':', '?', '*', '|'];

/// Substitute written in place of each forbidden character.
pub const REPLACEMENT: char = '_';

/// Replaces every forbidden character in `raw` with [`REPLACEMENT`].
///
/// Path separators are left untouched, so a nested entry name keeps its
/// structure. Borrows when nothing needs replacing.
///
/// # Examples
///
/// ```
/// use summa_core::types::sanitize_name;
///
/// assert_eq!(sanitize_name("a:b?c*d|e"), "a_b_c_d_e");
/// assert_eq!(sanitize_name("data/train.csv"), "data/train.csv");
/// ```
#[must_use]
pub fn sanitize_name(raw: &str) -> Cow<'_, str> {
    if raw.contains(FORBIDDEN_CHARS) {
        Cow::Owned(raw.replace(FORBIDDEN_CHARS, "_"))
    } else {
        Cow::Borrowed(raw)
    }
}

/// Returns `true` if `raw` contains any forbidden character.
#[must_use]
pub fn needs_sanitizing(raw: &str) -> bool {
    raw.contains(FORBIDDEN_CHARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_forbidden_chars_replaced() {
        assert_eq!(sanitize_name("a:b?c*d|e"), "a_b_c_d_e");
    }

    #[test]
    fn test_repeated_chars_replaced_independently() {
        assert_eq!(sanitize_name("::??**||"), "________");
        assert_eq!(sanitize_name("data:info?.txt"), "data_info_.txt");
    }

    #[test]
    fn test_clean_name_is_borrowed() {
        let name = "nested/dir/file.txt";
        assert!(matches!(sanitize_name(name), Cow::Borrowed(_)));
        assert!(!needs_sanitizing(name));
    }

    #[test]
    fn test_separators_preserved() {
        assert_eq!(sanitize_name("logs:2024/run|1/"), "logs_2024/run_1/");
    }

    #[test]
    fn test_multibyte_names() {
        assert_eq!(sanitize_name("résumé:v2.txt"), "résumé_v2.txt");
    }
}
