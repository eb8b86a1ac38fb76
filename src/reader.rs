// WHY: every later pass indexes lines by position, so loading fixes the line
// sequence once: BOM stripped, CR stripped, no trailing empty lines

use std::path::Path;
use std::time::Instant;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::error::{FatalError, Result};

const BOM: char = '\u{FEFF}';

/// Configuration for file reading behavior
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { buffer_size: 8192 }
    }
}

/// Statistics for a completed load
#[derive(Debug, Clone, Default)]
pub struct ReadStats {
    pub file_path: String,
    pub lines_read: u64,
    pub bytes_read: u64,
    pub duration_ms: u64,
}

/// The ordered, 0-indexed lines of one book.
#[derive(Debug, Clone, Default)]
pub struct LineStore {
    lines: Vec<String>,
    stats: ReadStats,
}

impl LineStore {
    /// Build from already split lines, applying the loading postconditions.
    pub fn from_lines(lines: Vec<String>) -> Self {
        let lines = normalize_lines(lines);
        let stats = ReadStats {
            lines_read: lines.len() as u64,
            bytes_read: lines.iter().map(|l| l.len() as u64 + 1).sum(),
            ..Default::default()
        };
        Self { lines, stats }
    }

    /// Build from a whole text buffer split on `\n`.
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.split('\n').map(str::to_string).collect())
    }

    /// Load a UTF-8 text file with the default reader configuration.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_with(path, &ReaderConfig::default()).await
    }

    pub async fn load_with<P: AsRef<Path>>(path: P, config: &ReaderConfig) -> Result<Self> {
        let path = path.as_ref();
        let start_time = Instant::now();

        debug!("Starting async read of file: {}", path.display());

        // WHY: a missing book is fatal and must be told apart from an unreadable one
        if !path.is_file() {
            warn!("Input file missing: {}", path.display());
            return Err(FatalError::InputNotFound(path.to_path_buf()));
        }

        let unreadable = |source: std::io::Error| FatalError::Unreadable {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).await.map_err(unreadable)?;
        let reader = BufReader::with_capacity(config.buffer_size, file);
        let mut lines = reader.lines();
        let mut raw = Vec::new();
        let mut byte_count = 0u64;

        while let Some(line) = lines.next_line().await.map_err(unreadable)? {
            byte_count += line.len() as u64 + 1;
            raw.push(line);
        }

        let lines = normalize_lines(raw);
        let stats = ReadStats {
            file_path: path.display().to_string(),
            lines_read: lines.len() as u64,
            bytes_read: byte_count,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "Read {}: {} lines, {} bytes in {}ms",
            path.display(),
            stats.lines_read,
            stats.bytes_read,
            stats.duration_ms
        );

        Ok(Self { lines, stats })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn stats(&self) -> &ReadStats {
        &self.stats
    }
}

fn normalize_lines(mut lines: Vec<String>) -> Vec<String> {
    for line in lines.iter_mut() {
        if line.ends_with('\r') {
            line.pop();
        }
    }
    if let Some(first) = lines.first_mut() {
        if first.starts_with(BOM) {
            first.remove(0);
        }
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}
