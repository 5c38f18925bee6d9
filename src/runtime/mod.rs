//! Runtime abstraction for filesystem operations.
//!
//! Trait-based seam over the filesystem, enabling dependency injection and
//! testability: download logic is exercised in tests against `MockRuntime`
//! without touching the disk.

mod fs;

use anyhow::Result;
use std::path::Path;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    /// Create a directory and any missing parents. Succeeds when the
    /// directory already exists.
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Open a file for writing, truncating any existing file at the path.
    fn create_file(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>>;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn create_file(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>> {
        self.create_file_impl(path)
    }
}
