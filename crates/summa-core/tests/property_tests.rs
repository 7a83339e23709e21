//! Property-based tests for entry name sanitization.
//!
//! These tests use proptest to generate arbitrary entry names and check
//! that sanitization and path resolution hold across a wide range of cases.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::Path;

use proptest::prelude::*;
use summa_core::ArchiveEntry;
use summa_core::sanitize_name;
use summa_core::types::FORBIDDEN_CHARS;

proptest! {
    /// No forbidden character survives sanitization.
    #[test]
    fn prop_no_forbidden_chars_remain(raw in "\\PC{0,64}") {
        let sanitized = sanitize_name(&raw);
        prop_assert!(!sanitized.contains(FORBIDDEN_CHARS));
    }

    /// Sanitization replaces characters one for one.
    #[test]
    fn prop_char_count_preserved(raw in "[a-z:?*|/._-]{0,64}") {
        prop_assert_eq!(sanitize_name(&raw).chars().count(), raw.chars().count());
    }

    /// Path separators and dots are never touched.
    #[test]
    fn prop_separators_kept(raw in "[a-z:?*|/.]{0,64}") {
        let sanitized = sanitize_name(&raw);
        let separators = |s: &str| s.char_indices()
            .filter(|(_, c)| *c == '/' || *c == '.')
            .collect::<Vec<_>>();
        prop_assert_eq!(separators(&sanitized), separators(&raw));
    }

    /// Names without forbidden characters are returned unchanged.
    #[test]
    fn prop_clean_names_unchanged(raw in "[a-zA-Z0-9_./-]{0,64}") {
        let sanitized = sanitize_name(&raw);
        prop_assert_eq!(sanitized.as_ref(), raw.as_str());
    }

    /// Sanitizing twice is the same as sanitizing once.
    #[test]
    fn prop_idempotent(raw in "\\PC{0,64}") {
        let once = sanitize_name(&raw).into_owned();
        let twice = sanitize_name(&once);
        prop_assert_eq!(twice.as_ref(), once.as_str());
    }

    /// Relative names built from plain components stay inside the destination.
    #[test]
    fn prop_relative_entries_stay_inside(
        components in prop::collection::vec("[a-z:?*|]{1,12}", 1..6)
    ) {
        let entry = ArchiveEntry::new(components.join("/"));
        let target = entry.target_path(Path::new("/dest")).unwrap();
        prop_assert!(target.starts_with("/dest"));
    }

    /// Any `..` component is rejected.
    #[test]
    fn prop_parent_components_rejected(
        prefix in "([a-z]+/){0,4}",
        suffix in "[a-z]{1,8}"
    ) {
        let entry = ArchiveEntry::new(format!("{prefix}../{suffix}"));
        prop_assert!(entry.relative_path().is_err());
    }
}
