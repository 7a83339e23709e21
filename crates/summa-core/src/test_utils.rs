//! Helpers for building dataset archives in tests.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use flate2::Compression;
use flate2::write::GzEncoder;

/// Creates an in-memory ZIP archive of stored files.
///
/// # Examples
///
/// ```
/// use summa_core::test_utils::create_test_zip;
///
/// let zip_data = create_test_zip(vec![("train.csv", &b"a,b"[..]), ("test.csv", &b"c,d"[..])]);
/// assert!(!zip_data.is_empty());
/// ```
#[must_use]
pub fn create_test_zip(entries: Vec<(&str, &[u8])>) -> Vec<u8> {
    entries
        .into_iter()
        .fold(ZipTestBuilder::new(), |builder, (path, data)| {
            builder.add_file(path, data)
        })
        .build()
}

/// Writes archive bytes to `dir/name` and returns the path.
pub fn write_archive(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}

/// Builder for ZIP test archives.
///
/// Entries keep their names exactly as given, including characters that are
/// illegal on some filesystems.
///
/// # Examples
///
/// ```
/// use summa_core::test_utils::ZipTestBuilder;
///
/// let zip_data = ZipTestBuilder::new()
///     .add_directory("data/")
///     .add_file("data/train.csv", b"a,b,c")
///     .add_file("data:info?.txt", b"meta")
///     .build();
/// ```
pub struct ZipTestBuilder {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a stored (uncompressed) file.
    #[must_use]
    pub fn add_file(self, path: &str, data: &[u8]) -> Self {
        self.add_with_method(path, data, zip::CompressionMethod::Stored)
    }

    /// Adds a deflate-compressed file.
    #[must_use]
    pub fn add_deflated_file(self, path: &str, data: &[u8]) -> Self {
        self.add_with_method(path, data, zip::CompressionMethod::Deflated)
    }

    /// Adds a directory entry. `path` should end with `/`.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        use zip::write::SimpleFileOptions;

        let options = SimpleFileOptions::default().unix_permissions(0o755);
        self.zip.add_directory(path, options).unwrap();
        self
    }

    /// Finishes the archive and returns its bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }

    fn add_with_method(mut self, path: &str, data: &[u8], method: zip::CompressionMethod) -> Self {
        use zip::write::SimpleFileOptions;

        let options = SimpleFileOptions::default()
            .compression_method(method)
            .unix_permissions(0o644);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for gzip-compressed TAR test archives.
///
/// # Examples
///
/// ```
/// use summa_core::test_utils::TarGzTestBuilder;
///
/// let tgz = TarGzTestBuilder::new()
///     .add_directory("data/")
///     .add_file("data/train.csv", b"a,b,c")
///     .build();
/// assert_eq!(&tgz[..2], &[0x1f, 0x8b]);
/// ```
pub struct TarGzTestBuilder {
    builder: tar::Builder<Vec<u8>>,
}

impl TarGzTestBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: tar::Builder::new(Vec::new()),
        }
    }

    /// Adds a regular file.
    #[must_use]
    pub fn add_file(mut self, path: &str, data: &[u8]) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        self.builder.append_data(&mut header, path, data).unwrap();
        self
    }

    /// Adds a directory entry.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o755);
        header.set_entry_type(tar::EntryType::Directory);
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Adds a symbolic link.
    #[must_use]
    pub fn add_symlink(mut self, path: &str, target: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o777);
        header.set_entry_type(tar::EntryType::Symlink);
        header.set_link_name(target).unwrap();
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Finishes the archive, gzips it and returns the bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        let tar_data = self.builder.into_inner().unwrap();
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&tar_data).unwrap();
        encoder.finish().unwrap()
    }
}

impl Default for TarGzTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_zip() {
        let zip_data = create_test_zip(vec![("file.txt", &b"hello"[..])]);
        assert_eq!(&zip_data[..4], b"PK\x03\x04");
    }

    #[test]
    fn test_zip_builder_keeps_raw_names() {
        let zip_data = ZipTestBuilder::new()
            .add_file("a:b?.txt", b"content")
            .add_directory("dir/")
            .build();
        let archive = zip::ZipArchive::new(Cursor::new(zip_data)).unwrap();
        let names: Vec<_> = archive.file_names().collect();
        assert!(names.contains(&"a:b?.txt"));
        assert!(names.contains(&"dir/"));
    }

    #[test]
    fn test_tar_gz_builder_is_gzip() {
        let data = TarGzTestBuilder::new().add_file("f.txt", b"x").build();
        assert_eq!(&data[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn test_write_archive() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = write_archive(temp.path(), "a.zip", b"bytes");
        assert_eq!(std::fs::read(path).unwrap(), b"bytes");
    }
}
