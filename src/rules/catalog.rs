// WHY: the rule catalog as data. Each entry is a label, a pattern, and the
// filter that decides whether a match is reported. Entries are independent
// and order-insensitive.

use crate::quotes::QuoteStyle;

use super::lexicon::{alternation, NO_COMMA_WORDS, NO_PERIOD_WORDS, RARE_ENDINGS, RARE_STARTS};

/// Category labels shared with the report.
pub mod category {
    pub const BRACKET: &str = "unexpected character after '['";
    pub const PUNCT_AFTER_THE: &str = "punctuation after 'the'";
    pub const DATE_PUNCT: &str = "suspect date punctuation";
    pub const CONTIGUOUS_PUNCT: &str = "suspect contiguous punctuation";
    pub const SPACED_PUNCT: &str = "incorrectly spaced punctuation";
    pub const MIXED_CASE: &str = "mixed case in word";
    pub const RARE_ENDING: &str = "unusual characters ending word";
    pub const RARE_START: &str = "unusual characters starting word";
    pub const SINGLE_CHAR: &str = "single character paragraph";
    pub const HYPHEN_SPACE: &str = "hyphenation adjacent to space";
    pub const EXCLAMATION: &str = "exclamation point suspect";
    pub const UNEXPECTED_PERIOD: &str = "unexpected period";
    pub const CONTRACTION: &str = "disjointed contraction";
    pub const HTML_TAG: &str = "suspected HTML tag";
    pub const QUOTE_DIRECTION: &str = "quote direction (by context)";
    pub const STANDALONE_DIGIT: &str = "standalone 0 or 1";
    pub const MIXED_ALNUM: &str = "mixed numbers/letters in word";
    pub const PERIOD_COMMA: &str = "period/comma suspect";
    pub const BLANK_PAGE: &str = "Blank Page placeholder";
    pub const MIXED_DASH: &str = "mixed hyphen-dash";
    pub const UNSAFE_DASH: &str = "potentially unsafe ePub dash";
    pub const SPACED_DASH: &str = "spaced dash";
    pub const UNUSUAL_CHAR: &str = "unusual character";
    pub const NO_COMMA: &str = "unexpected comma after word";
    pub const NO_PERIOD: &str = "unexpected period after word";
    pub const PARAGRAPH_END: &str = "paragraph ends with unusual character";
    pub const INCONSISTENT_QUOTES: &str = "inconsistent quote marks";
    pub const ELLIPSIS: &str = "suspect ellipsis check";
    pub const HAD_BAD: &str = "had/bad suspect";
    pub const HUT_BUT: &str = "hut/but suspect";
    pub const HE_BE: &str = "he/be suspect";
    pub const HYPHEN_VARIANT: &str = "inconsistent hyphenation";
    pub const QUOTE_NESTING: &str = "quotation mark nesting";
}

/// A single whitespace/separator or punctuation character.
pub const BOUNDARY: &str = r"[\p{Z}\p{P}]";
/// Token boundary: start of text or a boundary character.
const LEAD: &str = r"(^|[\p{Z}\p{P}])";

/// Which text a rule scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The paragraph text as is
    Text,
    /// The paragraph text with each "etc.," blanked out, offsets unchanged
    EtcMasked,
}

/// Post-match decision applied to each capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// Every match is reported
    Always,
    /// Skip when groups 1 and 2 are both digits ("3:30")
    NotDigitPair,
    /// Skip when group 2 is a name allowed to have mixed case
    MixedCaseName,
    /// Skip when group 1 is an allowed abbreviation
    NotAbbreviation,
    /// Skip a "1" in group 2 followed by a comma ("1,000", "Oct. 1,")
    NotThousandsOne,
    /// Skip ordinals in group 2; the word is appended to the label
    NotOrdinal,
    /// Report only when group 1 is a dictionary word and not a known name
    DictionaryCapital,
    /// Report only when groups 1 and 2 are different dash glyphs
    DistinctDashes,
    /// Report only dashes outside the safe set
    UnsafeDash,
    /// Skip thought-break paragraphs; the code point is appended to the label
    UnusualCharacter,
}

/// Static description of one rule.
#[derive(Debug, Clone)]
pub struct RuleSpec {
    pub label: &'static str,
    pub pattern: String,
    pub filter: Filter,
    pub source: Source,
    /// Only evaluated under this corpus quote style
    pub style: Option<QuoteStyle>,
    /// The match must be followed by a boundary character or the end of text.
    /// Checked after matching so the boundary is left for the next token.
    pub trailing_boundary: bool,
}

impl RuleSpec {
    fn new(label: &'static str, pattern: impl Into<String>) -> Self {
        Self {
            label,
            pattern: pattern.into(),
            filter: Filter::Always,
            source: Source::Text,
            style: None,
            trailing_boundary: false,
        }
    }

    fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    fn source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    fn bounded(mut self) -> Self {
        self.trailing_boundary = true;
        self
    }

    fn style(mut self, style: QuoteStyle) -> Self {
        self.style = Some(style);
        self
    }
}

/// Pattern recognizing a decorative thought break at the start of a paragraph.
pub const THOUGHT_BREAK: &str = r"^\s+\*\s+\*\s+\*\s+\*\s+\*";

/// The full rule catalog.
pub fn default_rules() -> Vec<RuleSpec> {
    use category::*;

    let mixed_case = |shape: &str| format!(r"{LEAD}({shape})");

    vec![
        // structural punctuation; Illustration, Greek, Music, Transcriber or a number may follow '['
        RuleSpec::new(BRACKET, r"\[[^IGMT\d]"),
        RuleSpec::new(PUNCT_AFTER_THE, format!(r"{LEAD}the\p{{P}}")),
        RuleSpec::new(DATE_PUNCT, r",1\p{N}\p{N}\p{N}"),
        RuleSpec::new(CONTIGUOUS_PUNCT, r"(,\.)|(\.,)|(,,)|([^.]\.\.([^.]|$))")
            .source(Source::EtcMasked),
        RuleSpec::new(SPACED_PUNCT, r"([\p{L}\p{N}])[.:;,]([\p{L}\p{N}])").filter(Filter::NotDigitPair),
        // casing: HAPpy, HapPy, hapPy
        RuleSpec::new(MIXED_CASE, mixed_case(r"\p{Lu}\p{Lu}\p{L}*\p{Ll}\p{L}*"))
            .filter(Filter::MixedCaseName)
            .bounded(),
        RuleSpec::new(MIXED_CASE, mixed_case(r"\p{Lu}\p{Ll}\p{L}*\p{Lu}\p{L}*"))
            .filter(Filter::MixedCaseName)
            .bounded(),
        RuleSpec::new(MIXED_CASE, mixed_case(r"\p{Ll}\p{L}*\p{Lu}\p{L}*"))
            .filter(Filter::MixedCaseName)
            .bounded(),
        // lexical oddities
        RuleSpec::new(RARE_ENDING, format!("({})", alternation(RARE_ENDINGS))).bounded(),
        RuleSpec::new(RARE_START, format!("{LEAD}({})", alternation(RARE_STARTS))),
        RuleSpec::new(SINGLE_CHAR, r"^.$"),
        RuleSpec::new(HYPHEN_SPACE, r"\p{L}(-\s+|\s+-)\p{L}"),
        RuleSpec::new(EXCLAMATION, "I\u{201D}"),
        RuleSpec::new(UNEXPECTED_PERIOD, r"(\p{L}+)\.\p{Z}\p{Ll}").filter(Filter::NotAbbreviation),
        RuleSpec::new(CONTRACTION, "\\p{Z}\u{2019}(m|ve|ll|t)").bounded(),
        RuleSpec::new(HTML_TAG, r"<[^>]+>"),
        RuleSpec::new(
            QUOTE_DIRECTION,
            "([.,;!?\u{2019}\u{2018}]+[\u{2018}\u{201C}])|([A-Za-z]+[\u{201C}])|([A-LN-Za-z]+[\u{2018}])|(\u{201C} )|( \u{201D})|(\u{2018}s\\s)",
        ),
        RuleSpec::new(STANDALONE_DIGIT, format!("{LEAD}([01])"))
            .filter(Filter::NotThousandsOne)
            .bounded(),
        RuleSpec::new(
            MIXED_ALNUM,
            format!(r"{LEAD}([^\p{{Z}}\p{{P}}]*(\p{{L}}\p{{N}}|\p{{N}}\p{{L}})[^\p{{Z}}\p{{P}}]*)"),
        )
        .filter(Filter::NotOrdinal)
        .bounded(),
        RuleSpec::new(PERIOD_COMMA, r"\. \p{Ll}"),
        RuleSpec::new(PERIOD_COMMA, r", (\p{Lu}\p{L}+)").filter(Filter::DictionaryCapital),
        // placeholders
        RuleSpec::new(BLANK_PAGE, r"(?i)blank page"),
        // dashes
        RuleSpec::new(MIXED_DASH, r"(\p{Pd})(\p{Pd})").filter(Filter::DistinctDashes),
        RuleSpec::new(UNSAFE_DASH, r"\p{Pd}").filter(Filter::UnsafeDash),
        RuleSpec::new(SPACED_DASH, r"\p{Z}\p{Pd}"),
        RuleSpec::new(SPACED_DASH, r"\p{Pd}\p{Z}"),
        // character-set policy
        RuleSpec::new(UNUSUAL_CHAR, r#"[^A-Za-z0-9 .,:;"'\-?—!()_\[\]]"#)
            .filter(Filter::UnusualCharacter)
            .style(QuoteStyle::Straight),
        RuleSpec::new(UNUSUAL_CHAR, r"[^A-Za-z0-9 .,:;“”‘’\-?—!()_\[\]]")
            .filter(Filter::UnusualCharacter)
            .style(QuoteStyle::Curly),
        // lexical context
        RuleSpec::new(NO_COMMA, format!("{LEAD}({}),", alternation(NO_COMMA_WORDS))),
        RuleSpec::new(NO_PERIOD, format!(r"{LEAD}({})\.", alternation(NO_PERIOD_WORDS))),
        RuleSpec::new(PARAGRAPH_END, r"[^.”?!*:]$"),
        // minority quote family
        RuleSpec::new(INCONSISTENT_QUOTES, r#"['"]"#).style(QuoteStyle::Curly),
        RuleSpec::new(INCONSISTENT_QUOTES, r"[‘’“”]").style(QuoteStyle::Straight),
        // ellipses
        RuleSpec::new(ELLIPSIS, r"(\.\.\.\.)[^\p{Z}]"),
        RuleSpec::new(ELLIPSIS, r"\P{Z}(\.\.\.)\p{Z}"),
        RuleSpec::new(ELLIPSIS, r"\p{Z}(\.\.\.)\P{Z}"),
        RuleSpec::new(ELLIPSIS, r"\.\.\.\.\."),
        // common scannos
        RuleSpec::new(
            HAD_BAD,
            r"\bi bad\b|\byou bad\b|\bhe bad\b|\bshe bad\b|\bthey bad\b|\ba had\b|\bthe had\b",
        ),
        RuleSpec::new(HUT_BUT, r"(, hut\P{L})|(; hut\P{L})"),
        RuleSpec::new(
            HE_BE,
            r"\bto he\b|\bis be\b|\bbe is\b|\bwas be\b|\bbe would\b|\bbe could\b",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        let rules = default_rules();
        assert!(rules.iter().any(|r| r.label == category::PUNCT_AFTER_THE));
        assert_eq!(rules.iter().filter(|r| r.label == category::MIXED_CASE).count(), 3);
        assert_eq!(rules.iter().filter(|r| r.label == category::ELLIPSIS).count(), 4);
    }

    #[test]
    fn test_style_specific_rules_come_in_pairs() {
        let rules = default_rules();
        for label in [category::UNUSUAL_CHAR, category::INCONSISTENT_QUOTES] {
            let styles: Vec<_> = rules.iter().filter(|r| r.label == label).map(|r| r.style).collect();
            assert!(styles.contains(&Some(QuoteStyle::Curly)));
            assert!(styles.contains(&Some(QuoteStyle::Straight)));
        }
    }
}
