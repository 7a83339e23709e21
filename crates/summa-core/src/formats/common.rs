//! Extraction steps shared between archive formats.
//!
//! [`UnpackSession`] owns the per-run state (report, copy buffer, names
//! already written) and implements the directory and file steps so every
//! format applies sanitization and collision handling the same way.

use std::collections::HashMap;
use std::fs::File;
use std::fs::create_dir_all;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use crate::IngestError;
use crate::ProgressCallback;
use crate::Result;
use crate::UnpackReport;
use crate::config::CollisionPolicy;
use crate::config::UnpackOptions;
use crate::copy::CopyBuffer;
use crate::copy::CopyError;
use crate::copy::copy_entry;
use crate::types::ArchiveEntry;

/// Per-run extraction state.
pub struct UnpackSession<'a> {
    archive_path: &'a Path,
    dest: &'a Path,
    options: UnpackOptions,
    report: UnpackReport,
    copy_buffer: CopyBuffer,
    /// Relative output path -> entry that last claimed it.
    claimed: HashMap<PathBuf, Claim>,
    /// Raw directory path -> relative output path it resolved to.
    directories: HashMap<String, PathBuf>,
    started: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClaimKind {
    File,
    Directory,
}

/// Raw name (or raw directory prefix) that owns an output path.
#[derive(Debug, Clone)]
struct Claim {
    raw: String,
    kind: ClaimKind,
}

impl<'a> UnpackSession<'a> {
    /// Creates `dest` (and missing ancestors) and starts a session.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Filesystem`] if `dest` cannot be created.
    pub fn begin(archive_path: &'a Path, dest: &'a Path, options: UnpackOptions) -> Result<Self> {
        create_dir_all(dest).map_err(|e| IngestError::filesystem(dest, e))?;
        Ok(Self {
            archive_path,
            dest,
            options,
            report: UnpackReport::new(),
            copy_buffer: CopyBuffer::new(),
            claimed: HashMap::new(),
            directories: HashMap::new(),
            started: Instant::now(),
        })
    }

    /// Archive being unpacked.
    pub const fn archive_path(&self) -> &Path {
        self.archive_path
    }

    /// Creates the directory for a directory entry.
    ///
    /// Idempotent: an existing directory is not an error.
    pub fn create_directory(&mut self, entry: &ArchiveEntry) -> Result<PathBuf> {
        let relative = self.resolve(entry)?;
        let target = self.dest.join(&relative);
        create_dir_all(&target).map_err(|e| IngestError::filesystem(&target, e))?;

        self.note_sanitized(entry);
        self.report.directories_created += 1;
        tracing::debug!(entry = entry.raw_name(), path = %target.display(), "created directory");
        Ok(target)
    }

    /// Writes a file entry, creating missing ancestors first.
    ///
    /// The file is created or truncated. Read failures on `reader` are
    /// reported as a corrupt archive, write failures as filesystem errors.
    pub fn write_file<R: Read + ?Sized>(
        &mut self,
        entry: &ArchiveEntry,
        reader: &mut R,
        progress: &mut dyn ProgressCallback,
    ) -> Result<PathBuf> {
        let relative = self.resolve(entry)?;
        let target = self.dest.join(&relative);

        if let Some(parent) = target.parent() {
            create_dir_all(parent).map_err(|e| IngestError::filesystem(parent, e))?;
        }

        let file = File::create(&target).map_err(|e| IngestError::filesystem(&target, e))?;
        let mut writer = BufWriter::with_capacity(self.copy_buffer.size(), file);
        let written = copy_entry(reader, &mut writer, &mut self.copy_buffer, |n| {
            progress.on_bytes_written(n);
        })
        .map_err(|err| match err {
            CopyError::Read(e) => IngestError::corrupt(
                self.archive_path,
                format!("failed to read entry '{}': {e}", entry.raw_name()),
            ),
            CopyError::Write(e) => IngestError::filesystem(&target, e),
        })?;
        writer
            .flush()
            .map_err(|e| IngestError::filesystem(&target, e))?;

        self.note_sanitized(entry);
        self.report.files_extracted += 1;
        self.report.bytes_written = self.report.bytes_written.saturating_add(written);
        tracing::debug!(
            entry = entry.raw_name(),
            path = %target.display(),
            bytes = written,
            "wrote file"
        );
        Ok(target)
    }

    /// Records an entry that the format cannot represent on disk.
    pub fn skip(&mut self, raw_name: &str, reason: &str) {
        self.warn(format!("skipped '{raw_name}': {reason}"));
    }

    /// Finishes the session and returns the report.
    pub fn finish(mut self) -> UnpackReport {
        self.report.duration = self.started.elapsed();
        tracing::info!(
            dest = %self.dest.display(),
            files = self.report.files_extracted,
            directories = self.report.directories_created,
            bytes = self.report.bytes_written,
            "extraction completed"
        );
        self.report
    }

    fn note_sanitized(&mut self, entry: &ArchiveEntry) {
        if entry.was_sanitized() {
            self.report.names_sanitized += 1;
        }
    }

    /// Resolves the relative output path of an entry.
    ///
    /// Every component is claimed in turn: ancestors as directories, the
    /// last one with the entry's own kind. A directory that was renamed or
    /// merged once keeps resolving to the same place for later entries.
    fn resolve(&mut self, entry: &ArchiveEntry) -> Result<PathBuf> {
        let relative = entry.relative_path()?;
        let parts: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let raw_parts: Vec<&str> = entry
            .raw_name()
            .split('/')
            .filter(|part| !part.is_empty() && *part != ".")
            .collect();
        let aligned = raw_parts.len() == parts.len();

        let last = parts.len().saturating_sub(1);
        let mut resolved = PathBuf::new();
        let mut raw_prefix = String::new();

        for (index, part) in parts.iter().enumerate() {
            let raw_part = match raw_parts.get(index) {
                Some(raw) if aligned => *raw,
                _ => part.as_str(),
            };
            if !raw_prefix.is_empty() {
                raw_prefix.push('/');
            }
            raw_prefix.push_str(raw_part);

            if index < last || entry.is_directory() {
                if let Some(known) = self.directories.get(&raw_prefix) {
                    resolved = known.clone();
                    continue;
                }
                resolved = self.claim(resolved.join(part), &raw_prefix, ClaimKind::Directory)?;
                self.directories.insert(raw_prefix.clone(), resolved.clone());
            } else {
                resolved = self.claim(resolved.join(part), entry.raw_name(), ClaimKind::File)?;
            }
        }

        Ok(resolved)
    }

    /// Claims `candidate` for `raw`, applying the collision policy when a
    /// different raw name already owns it.
    fn claim(&mut self, candidate: PathBuf, raw: &str, kind: ClaimKind) -> Result<PathBuf> {
        let previous = match self.claimed.get(&candidate) {
            Some(previous) if previous.raw != raw => previous.clone(),
            Some(_) => return Ok(candidate),
            None => {
                self.record(candidate.clone(), raw, kind);
                return Ok(candidate);
            }
        };

        self.report.collisions += 1;
        let sanitized = candidate.display().to_string();

        match self.options.collision_policy {
            CollisionPolicy::Reject => Err(IngestError::NameCollision {
                sanitized,
                first: previous.raw,
                second: raw.to_string(),
            }),
            CollisionPolicy::LastWriteWins if previous.kind == kind => {
                let verb = match kind {
                    ClaimKind::File => "overwrites",
                    ClaimKind::Directory => "merges into",
                };
                self.warn(format!(
                    "'{raw}' {verb} '{}' (both sanitize to '{sanitized}')",
                    previous.raw
                ));
                self.record(candidate.clone(), raw, kind);
                Ok(candidate)
            }
            // A file and a directory cannot replace each other in place,
            // so last-write-wins falls back to renaming here.
            CollisionPolicy::LastWriteWins | CollisionPolicy::Rename => {
                let renamed = self.unclaimed_variant(&candidate);
                self.warn(format!(
                    "'{raw}' collides with '{}' on '{sanitized}'; written as '{}'",
                    previous.raw,
                    renamed.display()
                ));
                self.record(renamed.clone(), raw, kind);
                Ok(renamed)
            }
        }
    }

    fn record(&mut self, path: PathBuf, raw: &str, kind: ClaimKind) {
        self.claimed.insert(
            path,
            Claim {
                raw: raw.to_string(),
                kind,
            },
        );
    }

    fn warn(&mut self, message: String) {
        tracing::warn!("{message}");
        self.report.add_warning(message);
    }

    /// Returns `stem_N.ext` for the smallest N not yet claimed.
    fn unclaimed_variant(&self, relative: &Path) -> PathBuf {
        let stem = relative
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = relative
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        (1_usize..)
            .map(|n| relative.with_file_name(format!("{stem}_{n}{extension}")))
            .find(|candidate| !self.claimed.contains_key(candidate))
            .unwrap_or_else(|| relative.to_path_buf())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::NoopProgress;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn session<'a>(dest: &'a Path, policy: CollisionPolicy) -> UnpackSession<'a> {
        UnpackSession::begin(
            Path::new("test.zip"),
            dest,
            UnpackOptions {
                collision_policy: policy,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_begin_creates_missing_destination() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("a/b/c");
        let _session = session(&dest, CollisionPolicy::default());
        assert!(dest.is_dir());
    }

    #[test]
    fn test_write_file_creates_ancestors() {
        let temp = TempDir::new().unwrap();
        let mut s = session(temp.path(), CollisionPolicy::default());
        let entry = ArchiveEntry::new("nested/dir/file.txt");
        s.write_file(&entry, &mut Cursor::new(b"x".to_vec()), &mut NoopProgress)
            .unwrap();
        assert!(temp.path().join("nested").is_dir());
        assert!(temp.path().join("nested/dir").is_dir());
        assert_eq!(
            std::fs::read(temp.path().join("nested/dir/file.txt")).unwrap(),
            b"x"
        );
    }

    #[test]
    fn test_write_file_truncates_existing() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("f.txt"), b"much longer old content").unwrap();
        let mut s = session(temp.path(), CollisionPolicy::default());
        s.write_file(
            &ArchiveEntry::new("f.txt"),
            &mut Cursor::new(b"new".to_vec()),
            &mut NoopProgress,
        )
        .unwrap();
        assert_eq!(std::fs::read(temp.path().join("f.txt")).unwrap(), b"new");
    }

    #[test]
    fn test_same_raw_name_twice_is_not_a_collision() {
        let temp = TempDir::new().unwrap();
        let mut s = session(temp.path(), CollisionPolicy::Reject);
        let entry = ArchiveEntry::new("dup.txt");
        s.write_file(&entry, &mut Cursor::new(b"1".to_vec()), &mut NoopProgress)
            .unwrap();
        s.write_file(&entry, &mut Cursor::new(b"2".to_vec()), &mut NoopProgress)
            .unwrap();
        assert_eq!(s.finish().collisions, 0);
    }

    #[test]
    fn test_unclaimed_variant_skips_taken_names() {
        let temp = TempDir::new().unwrap();
        let mut s = session(temp.path(), CollisionPolicy::Rename);
        s.record(PathBuf::from("d/a_b.txt"), "d/a:b.txt", ClaimKind::File);
        s.record(PathBuf::from("d/a_b_1.txt"), "d/a_b_1.txt", ClaimKind::File);
        assert_eq!(
            s.unclaimed_variant(Path::new("d/a_b.txt")),
            PathBuf::from("d/a_b_2.txt")
        );
        assert_eq!(
            s.unclaimed_variant(Path::new("README")),
            PathBuf::from("README_1")
        );
    }
}
