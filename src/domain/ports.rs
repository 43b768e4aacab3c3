use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use std::path::Path;

/// Byte-level access to the backing document.
pub trait Storage {
    /// Where the document lives, for log messages.
    fn location(&self) -> &Path;

    /// Creates the document with `empty` contents if it does not exist yet.
    fn ensure_initialized(&self, empty: &[u8]) -> Result<()>;

    fn read(&self) -> Result<Vec<u8>>;

    /// Replaces the whole document. Readers never observe a partial write.
    fn write(&self, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn data_file(&self) -> &Path;
    fn log_file(&self) -> Option<&Path>;
    fn log_level(&self) -> Option<&str>;
    fn log_format(&self) -> LogFormat;
    fn verbose(&self) -> bool;
}
