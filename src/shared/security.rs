use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Validates that a path is not a symbolic link
///
/// # Security
/// Uses `symlink_metadata()` instead of `metadata()` so the link itself is
/// inspected, not the target it points to. Missing paths pass.
///
/// # Arguments
/// * `path` - The path to validate
/// * `operation` - Description of the operation (e.g., "write") for error messages
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            anyhow::bail!(
                "Failed to read metadata for {} operation on {}: {}",
                operation,
                path.display(),
                e
            );
        }
    };

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, {} operations on symbolic links are not allowed.",
            path.display(),
            operation
        );
    }

    Ok(())
}

/// Validates that a generated file name stays inside its output directory
pub fn validate_file_name(file_name: &str) -> Result<()> {
    if file_name.is_empty() {
        anyhow::bail!("Security: output file name cannot be empty");
    }

    if file_name.contains('/') || file_name.contains('\\') {
        anyhow::bail!(
            "Security: output file name '{}' contains path separators which are not allowed",
            file_name
        );
    }

    if file_name == "." || file_name == ".." {
        anyhow::bail!("Security: output file name '{}' is not allowed", file_name);
    }

    Ok(())
}
