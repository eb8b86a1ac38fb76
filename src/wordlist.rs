// WHY: dictionary membership is the only question the heuristics ask of the
// wordlist, so it is loaded once into a set and queried by lower-case word

use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use crate::error::{FatalError, Result};

/// English words and contractions, one per line in the source file.
#[derive(Debug, Clone, Default)]
pub struct Wordlist {
    words: HashSet<String>,
}

impl Wordlist {
    /// Parse wordlist text. `--` lines are comments and a `%` suffix marks
    /// an entry that also has a listed plural form (`absorbencies%`).
    pub fn parse(text: &str) -> Self {
        let words = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.starts_with("--"))
            .map(|line| line.replace('%', "").trim().to_string())
            .filter(|word| !word.is_empty())
            .collect();
        Self { words }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(FatalError::WordlistNotFound(path.to_path_buf()));
        }
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| FatalError::Unreadable {
                path: path.to_path_buf(),
                source,
            })?;
        let wordlist = Self::parse(text.trim_start_matches('\u{FEFF}'));
        info!("Loaded wordlist {}: {} entries", path.display(), wordlist.len());
        Ok(wordlist)
    }

    /// Exact membership test. Callers pass the lower-cased form.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
