use crate::ports::outbound::OutputWriter;
use crate::shared::error::GraphError;
use crate::shared::security::{validate_file_name, validate_not_symlink};
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// OutputDirectory adapter writing run outputs below one directory
///
/// This adapter implements the OutputWriter port. Files are replaced on
/// every run; symbolic links are never written through.
pub struct OutputDirectory {
    root: PathBuf,
}

impl OutputDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputWriter for OutputDirectory {
    fn prepare(&self) -> Result<()> {
        validate_not_symlink(&self.root, "write").map_err(|e| GraphError::OutputDirectory {
            path: self.root.clone(),
            details: e.to_string(),
        })?;

        if self.root.exists() && !self.root.is_dir() {
            return Err(GraphError::OutputDirectory {
                path: self.root.clone(),
                details: "Path exists but is not a directory".to_string(),
            }
            .into());
        }

        fs::create_dir_all(&self.root).map_err(|e| GraphError::OutputDirectory {
            path: self.root.clone(),
            details: e.to_string(),
        })?;
        Ok(())
    }

    fn path_for(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    fn write_text(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        let path = self.path_for(file_name);
        let write_error = |details: String| GraphError::FileWriteError {
            path: path.clone(),
            details,
        };

        validate_file_name(file_name).map_err(|e| write_error(e.to_string()))?;
        validate_not_symlink(&path, "write").map_err(|e| write_error(e.to_string()))?;

        fs::write(&path, content).map_err(|e| write_error(e.to_string()))?;
        Ok(path)
    }
}
