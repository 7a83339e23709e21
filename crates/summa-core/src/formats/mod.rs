//! Archive format implementations.

pub mod common;
pub mod detect;
pub mod tar;
pub mod traits;
pub mod zip;

pub use detect::ArchiveType;
pub use detect::detect_format;
pub use detect::unpacker_for;
pub use tar::TarGzUnpacker;
pub use traits::Unpacker;
pub use zip::ZipUnpacker;
