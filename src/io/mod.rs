pub mod walker;

pub use walker::FileWalker;

use crate::errors::CheckError;
use std::fs;
use std::path::{Path, PathBuf};

pub fn read_file(path: &Path) -> Result<String, CheckError> {
    fs::read_to_string(path).map_err(|e| CheckError::io("Failed to read file", path, e))
}

pub fn write_file(path: &Path, content: &str) -> Result<(), CheckError> {
    fs::write(path, content).map_err(|e| CheckError::io("Failed to write file", path, e))
}

pub fn ensure_dir(path: &Path) -> Result<(), CheckError> {
    if !path.exists() {
        fs::create_dir_all(path)
            .map_err(|e| CheckError::io("Failed to create directory", path, e))?;
    }
    Ok(())
}

pub fn canonicalize(path: &Path) -> Result<PathBuf, CheckError> {
    path.canonicalize()
        .map_err(|e| CheckError::io("Failed to resolve path", path, e))
}

pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

pub fn dir_exists(path: &Path) -> bool {
    path.exists() && path.is_dir()
}
