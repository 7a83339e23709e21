//! Archive entry types.
//!
//! An [`ArchiveEntry`] pairs the raw name stored in the archive with its
//! sanitized form, and is the only way the unpacker turns an entry name
//! into an on-disk path.

pub mod entry;
pub mod sanitize;

pub use entry::ArchiveEntry;
pub use sanitize::FORBIDDEN_CHARS;
pub use sanitize::REPLACEMENT;
pub use sanitize::needs_sanitizing;
pub use sanitize::sanitize_name;
