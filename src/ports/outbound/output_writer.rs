use crate::shared::Result;
use std::path::PathBuf;

/// OutputWriter port for the run's output directory
///
/// Abstracts where images and the statistics table end up.
pub trait OutputWriter: Send + Sync {
    /// Creates the output directory if it is absent
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created
    fn prepare(&self) -> Result<()>;

    /// Full path of `file_name` inside the output directory
    fn path_for(&self, file_name: &str) -> PathBuf;

    /// Writes `content` to `file_name`, replacing any previous file
    ///
    /// # Errors
    /// Returns an error if the file name is unsafe or the write fails
    fn write_text(&self, file_name: &str, content: &str) -> Result<PathBuf>;
}
