//! Archive entry naming.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use super::sanitize::sanitize_name;
use crate::IngestError;
use crate::Result;

/// One file or directory record read from an archive.
///
/// Holds the name exactly as stored in the archive alongside its
/// sanitized form. Content is streamed separately by the unpacker.
///
/// # Examples
///
/// ```
/// use summa_core::types::ArchiveEntry;
///
/// let entry = ArchiveEntry::new("data:info?.txt");
/// assert_eq!(entry.sanitized_name(), "data_info_.txt");
/// assert!(!entry.is_directory());
///
/// let dir = ArchiveEntry::new("logs/");
/// assert!(dir.is_directory());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchiveEntry {
    raw_name: String,
    sanitized_name: String,
    is_directory: bool,
}

impl ArchiveEntry {
    /// Creates an entry, inferring a directory from a trailing `/`.
    pub fn new(raw_name: impl Into<String>) -> Self {
        let raw_name = raw_name.into();
        let is_directory = raw_name.ends_with('/');
        Self::with_kind(raw_name, is_directory)
    }

    /// Creates an entry with an explicit directory flag.
    ///
    /// Used for formats that record the entry kind in a header rather
    /// than in the name.
    pub fn with_kind(raw_name: impl Into<String>, is_directory: bool) -> Self {
        let raw_name = raw_name.into();
        let sanitized_name = sanitize_name(&raw_name).into_owned();
        Self {
            raw_name,
            sanitized_name,
            is_directory,
        }
    }

    /// The name as stored in the archive.
    #[must_use]
    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    /// The name with forbidden characters replaced.
    #[must_use]
    pub fn sanitized_name(&self) -> &str {
        &self.sanitized_name
    }

    /// Whether this entry is a directory.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        self.is_directory
    }

    /// Whether sanitization changed the name.
    #[must_use]
    pub fn was_sanitized(&self) -> bool {
        self.raw_name != self.sanitized_name
    }

    /// Returns the sanitized name as a relative path.
    ///
    /// `.` components are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::UnsafeEntryPath`] if the name is absolute or
    /// contains a `..` component.
    pub fn relative_path(&self) -> Result<PathBuf> {
        let mut relative = PathBuf::new();
        for component in Path::new(&self.sanitized_name).components() {
            match component {
                Component::Normal(part) => relative.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(IngestError::UnsafeEntryPath {
                        name: self.raw_name.clone(),
                    });
                }
            }
        }
        Ok(relative)
    }

    /// Resolves the on-disk path of this entry under `dest`.
    pub fn target_path(&self, dest: &Path) -> Result<PathBuf> {
        Ok(dest.join(self.relative_path()?))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_inferred_from_trailing_slash() {
        assert!(ArchiveEntry::new("logs/").is_directory());
        assert!(!ArchiveEntry::new("logs").is_directory());
        assert!(ArchiveEntry::with_kind("logs", true).is_directory());
    }

    #[test]
    fn test_sanitized_target_path() {
        let entry = ArchiveEntry::new("a:b?c*d|e");
        assert!(entry.was_sanitized());
        let target = entry.target_path(Path::new("/out")).unwrap();
        assert_eq!(target, PathBuf::from("/out/a_b_c_d_e"));
    }

    #[test]
    fn test_nested_relative_path() {
        let entry = ArchiveEntry::new("./nested/dir/file.txt");
        assert_eq!(
            entry.relative_path().unwrap(),
            PathBuf::from("nested/dir/file.txt")
        );
        assert!(!entry.was_sanitized());
    }

    #[test]
    fn test_parent_component_rejected() {
        let entry = ArchiveEntry::new("data/../../etc/passwd");
        let err = entry.relative_path().unwrap_err();
        assert!(matches!(err, IngestError::UnsafeEntryPath { name } if name == "data/../../etc/passwd"));
    }

    #[test]
    fn test_absolute_rejected() {
        let entry = ArchiveEntry::new("/etc/passwd");
        assert!(entry.relative_path().is_err());
    }

    #[test]
    fn test_windows_drive_neutralized_by_sanitizing() {
        let entry = ArchiveEntry::new("C:evil.txt");
        assert_eq!(
            entry.relative_path().unwrap(),
            PathBuf::from("C_evil.txt")
        );
    }
}
