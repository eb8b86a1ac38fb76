// WHY: a capitalized word that is not in the dictionary and recurs is most
// likely a name; names with legitimate internal capitals (McPherson) must
// not be reported as mixed case.

use regex_automata::meta::Regex;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::error::{FatalError, Result};
use crate::paragraph::ParagraphIndex;
use crate::wordlist::Wordlist;

/// Dictionary words that are also common given names.
pub const COMMON_GIVEN_NAMES: &[&str] = &[
    "Bud", "Will", "Jack", "Jimmy", "Carol", "Amber", "Mark", "Scott", "Frank",
];

/// Minimum occurrences before a dictionary-miss capitalized word counts as a name.
pub const MIN_NAME_FREQUENCY: usize = 2;

/// Result of the name pre-pass.
#[derive(Debug, Clone, Default)]
pub struct ProperNames {
    names: HashSet<String>,
    mixed_case: HashSet<String>,
}

impl ProperNames {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: HashSet<String> = names.into_iter().map(Into::into).collect();
        let mixed_case = names.iter().filter(|n| has_case_transition(n)).cloned().collect();
        Self { names, mixed_case }
    }

    pub fn is_proper_name(&self, word: &str) -> bool {
        self.names.contains(word)
    }

    /// Name whose mixed capitalization is legitimate.
    pub fn allows_mixed_case(&self, word: &str) -> bool {
        self.mixed_case.contains(word)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in sorted order.
    pub fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// True for a lower-to-upper or upper-to-lower change after the first character.
pub fn has_case_transition(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    chars.windows(2).skip(1).any(|pair| {
        (pair[0].is_lowercase() && pair[1].is_uppercase())
            || (pair[0].is_uppercase() && pair[1].is_lowercase())
    })
}

/// Two-pass capitalization frequency analysis.
pub struct NameHeuristics {
    capitalized: Regex,
}

impl NameHeuristics {
    pub fn new() -> Result<Self> {
        let capitalized =
            Regex::new(r"\p{Lu}\p{L}+").map_err(|e| FatalError::pattern("capitalized word", e))?;
        Ok(Self { capitalized })
    }

    /// Frequency of every capitalized token in the book.
    pub fn count_capitalized(&self, paragraphs: &ParagraphIndex) -> HashMap<String, usize> {
        let mut frequency: HashMap<String, usize> = HashMap::new();
        for paragraph in paragraphs {
            let text = paragraph.text();
            for m in self.capitalized.find_iter(text) {
                *frequency.entry(text[m.range()].to_string()).or_insert(0) += 1;
            }
        }
        frequency
    }

    pub fn analyze(&self, paragraphs: &ParagraphIndex, wordlist: &Wordlist) -> ProperNames {
        let frequency = self.count_capitalized(paragraphs);
        let names = frequency
            .into_iter()
            .filter(|(word, count)| {
                // WHY: given names like "Will" are also dictionary words, so they
                // bypass the dictionary test
                COMMON_GIVEN_NAMES.contains(&word.as_str())
                    || (*count >= MIN_NAME_FREQUENCY && !wordlist.contains(&word.to_lowercase()))
            })
            .map(|(word, _)| word);
        let proper = ProperNames::from_names(names);
        debug!(
            names = proper.names.len(),
            mixed_case = proper.mixed_case.len(),
            "Proper name analysis complete"
        );
        proper
    }
}
