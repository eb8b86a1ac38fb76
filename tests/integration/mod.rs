// Integration test utilities and common code
// WHY: every on-disk test needs a book and a wordlist in a temporary directory

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub mod fixtures;

/// Temporary directory holding a book and its wordlist
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();
        Self { temp_dir, root_path }
    }

    /// Write a book text file
    pub fn create_book<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Write the shared test wordlist
    pub fn create_wordlist(&self) -> PathBuf {
        self.create_book("wordlist.txt", fixtures::WORDLIST)
    }

    pub fn path<P: AsRef<Path>>(&self, relative_path: P) -> PathBuf {
        self.root_path.join(relative_path)
    }
}
