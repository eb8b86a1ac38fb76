// WHY: fixed word tables used by the rule catalog, kept apart from the
// patterns so each table can be read and tested on its own

use std::collections::HashSet;

/// Abbreviations that legitimately take a period mid-sentence
/// ("50 per cent. per annum").
pub const PERIOD_ABBREVIATIONS: &[&str] = &[
    "cent", "cents", "viz", "vol", "vols", "vid", "ed", "al", "etc", "op", "cit", "deg", "min",
    "chap", "oz", "mme", "mlle", "mssrs", "gym",
];

/// Words that should never be followed directly by a comma.
pub const NO_COMMA_WORDS: &[&str] = &[
    "the", "it’s", "their", "an", "mrs", "a", "our", "that’s", "its", "whose", "every", "i’ll",
    "your", "my", "mr", "mss", "mssrs", "ft", "pm", "st", "dr", "rd", "pp", "cf", "jr", "sr", "vs",
    "lb", "lbs", "ltd", "i'm", "during", "let", "toward", "among",
];

/// Words that should never be followed directly by a period.
pub const NO_PERIOD_WORDS: &[&str] = &[
    "every", "i’m", "during", "that’s", "their", "your", "our", "my", "or", "and", "but", "as",
    "if", "the", "its", "it’s", "until", "than", "whether", "i’ll", "whose", "who", "because",
    "when", "let", "till", "very", "an", "among", "those", "into", "whom", "having", "thence",
];

/// Letter pairs that rarely end an English word.
pub const RARE_ENDINGS: &[&str] = &[
    "cb", "gb", "pb", "sb", "tb", "wh", "fr", "br", "qu", "tw", "gl", "fl", "sw", "gr", "sl", "cl",
    "iy",
];

/// Letter pairs that rarely start an English word.
pub const RARE_STARTS: &[&str] = &["hr", "hl", "cb", "sb", "tb", "wb", "tl", "tn", "rn", "lt", "tj"];

/// Dash glyphs that render safely in every ePub reader: em dash, hyphen, en dash.
pub const SAFE_DASHES: &[char] = &['\u{2014}', '-', '\u{2013}'];

/// Suffixes that make a digit run an ordinal ("1st", "22nd").
pub const ORDINAL_SUFFIXES: &[&str] = &["st", "nd", "rd", "th"];

/// Alternation of `words` for embedding in a pattern. The tables hold
/// plain words, apostrophes included, with no pattern metacharacters.
pub fn alternation(words: &[&str]) -> String {
    words.join("|")
}

/// True for a digit run followed by an ordinal suffix at the start of `word`.
pub fn is_ordinal(word: &str) -> bool {
    let rest = word.trim_start_matches(|c: char| c.is_numeric());
    rest.len() < word.len() && ORDINAL_SUFFIXES.iter().any(|suffix| rest.starts_with(suffix))
}

/// Lookup of the abbreviations allowed before a mid-sentence period.
pub struct AbbreviationChecker {
    abbreviations: HashSet<&'static str>,
}

impl AbbreviationChecker {
    pub fn new() -> Self {
        Self {
            abbreviations: PERIOD_ABBREVIATIONS.iter().copied().collect(),
        }
    }

    /// `word` is the run of letters immediately before the period.
    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations.contains(word)
    }
}

impl Default for AbbreviationChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviations() {
        let checker = AbbreviationChecker::new();
        for abbr in ["cent", "viz", "etc", "mlle"] {
            assert!(checker.is_abbreviation(abbr), "Should accept {abbr}");
        }
        assert!(!checker.is_abbreviation("task"));
        // case-sensitive: sentence-initial forms are not exempt
        assert!(!checker.is_abbreviation("Vol"));
    }

    #[test]
    fn test_ordinals() {
        assert!(is_ordinal("1st"));
        assert!(is_ordinal("22nd"));
        assert!(is_ordinal("103rd"));
        assert!(is_ordinal("4th"));
        assert!(!is_ordinal("st"));
        assert!(!is_ordinal("4to"));
        assert!(!is_ordinal("B52"));
    }

    #[test]
    fn test_alternation() {
        assert_eq!(alternation(&["a", "an", "the"]), "a|an|the");
    }
}
