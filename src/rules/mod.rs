// WHY: rule evaluation over one paragraph's flattened text. Each compiled
// rule runs independently; matches are translated back to source lines.

use regex_automata::meta::Regex;
use regex_automata::util::captures::Captures;
use tracing::debug;

use crate::error::{FatalError, Result};
use crate::findings::Finding;
use crate::hyphenation::{bounded_offsets, HyphenVariantTable};
use crate::names::ProperNames;
use crate::paragraph::Paragraph;
use crate::quotes::QuoteStyle;
use crate::wordlist::Wordlist;

pub mod catalog;
pub mod lexicon;

pub use catalog::{category, default_rules, Filter, RuleSpec, Source};
use lexicon::{is_ordinal, AbbreviationChecker, SAFE_DASHES};

/// Corpus-wide tables the rules consult. Built once, read-only afterwards.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub quote_style: QuoteStyle,
    pub names: &'a ProperNames,
    pub wordlist: &'a Wordlist,
    pub hyphen_variants: &'a HyphenVariantTable,
}

/// One rule match inside a paragraph's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub category: String,
    /// Byte offset of the match start in the paragraph text
    pub offset: usize,
}

struct CompiledRule {
    spec: RuleSpec,
    regex: Regex,
}

/// The compiled rule catalog.
pub struct RuleEngine {
    rules: Vec<CompiledRule>,
    thought_break: Regex,
    boundary: Regex,
    abbreviations: AbbreviationChecker,
}

impl RuleEngine {
    /// Compile the default catalog.
    pub fn new() -> Result<Self> {
        Self::with_rules(default_rules())
    }

    pub fn with_rules(specs: Vec<RuleSpec>) -> Result<Self> {
        let rules = specs
            .into_iter()
            .map(|spec| {
                let regex = Regex::new(&spec.pattern).map_err(|e| FatalError::pattern(spec.label, e))?;
                Ok(CompiledRule { spec, regex })
            })
            .collect::<Result<Vec<_>>>()?;
        let thought_break = Regex::new(catalog::THOUGHT_BREAK)
            .map_err(|e| FatalError::pattern("thought break", e))?;
        let boundary =
            Regex::new(catalog::BOUNDARY).map_err(|e| FatalError::pattern("token boundary", e))?;

        debug!("Compiled {} rules", rules.len());
        Ok(Self {
            rules,
            thought_break,
            boundary,
            abbreviations: AbbreviationChecker::new(),
        })
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// All rule matches in `text`, rule by rule, in text order within a rule.
    pub fn matches(&self, text: &str, context: &RuleContext<'_>) -> Vec<RuleMatch> {
        // WHY: blanking keeps every byte offset valid for line anchoring
        let etc_masked = text.replace("etc.,", "etc  ");
        let thought_break = self.thought_break.is_match(text);
        let mut found = Vec::new();

        for rule in &self.rules {
            if rule.spec.style.is_some_and(|style| style != context.quote_style) {
                continue;
            }
            if rule.spec.filter == Filter::UnusualCharacter && thought_break {
                continue;
            }
            let haystack = match rule.spec.source {
                Source::Text => text,
                Source::EtcMasked => etc_masked.as_str(),
            };
            for caps in rule.regex.captures_iter(haystack) {
                let Some(whole) = caps.get_match() else {
                    continue;
                };
                // WHY: the trailing boundary is checked here rather than matched,
                // so the separator joining two lines still leads the next token
                let after = haystack[whole.end()..].chars().next();
                if rule.spec.trailing_boundary && !after.map_or(true, |c| self.is_boundary(c)) {
                    continue;
                }
                if let Some(category) = self.apply_filter(&rule.spec, &caps, haystack, after, context) {
                    found.push(RuleMatch {
                        category,
                        offset: whole.start(),
                    });
                }
            }
        }

        found.extend(hyphen_variant_matches(text, context.hyphen_variants));
        found
    }

    /// Evaluate one paragraph and anchor every match to its source line.
    pub fn evaluate(&self, paragraph: &Paragraph, context: &RuleContext<'_>) -> Vec<Finding> {
        self.matches(paragraph.text(), context)
            .into_iter()
            .map(|m| {
                let position = paragraph.translate(m.offset);
                Finding::new(
                    m.category,
                    paragraph.start_line() + position.line,
                    paragraph.lines()[position.line].as_str(),
                )
                .with_column(position.column)
            })
            .collect()
    }

    fn is_boundary(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        let encoded: &str = c.encode_utf8(&mut buf);
        self.boundary.is_match(encoded)
    }

    fn apply_filter(
        &self,
        spec: &RuleSpec,
        caps: &Captures,
        haystack: &str,
        after: Option<char>,
        context: &RuleContext<'_>,
    ) -> Option<String> {
        let group = |index: usize| caps.get_group(index).map(|span| &haystack[span.range()]).unwrap_or("");
        let whole = group(0);
        let label = spec.label;

        let keep = match spec.filter {
            Filter::Always => true,
            Filter::NotDigitPair => !(is_digit(group(1)) && is_digit(group(2))),
            Filter::MixedCaseName => !context.names.allows_mixed_case(group(2)),
            Filter::NotAbbreviation => !self.abbreviations.is_abbreviation(group(1)),
            Filter::NotThousandsOne => !(group(2) == "1" && after == Some(',')),
            Filter::NotOrdinal => {
                let word = group(2);
                if is_ordinal(word) {
                    return None;
                }
                return Some(format!("{label} {word}"));
            }
            Filter::DictionaryCapital => {
                let word = group(1);
                !context.names.is_proper_name(word) && context.wordlist.contains(&word.to_lowercase())
            }
            Filter::DistinctDashes => group(1) != group(2),
            Filter::UnsafeDash => !whole.chars().all(|c| SAFE_DASHES.contains(&c)),
            Filter::UnusualCharacter => {
                let c = whole.chars().next()?;
                return Some(format!("{label} U+{:04X} '{c}'", c as u32));
            }
        };
        keep.then(|| label.to_string())
    }
}

fn is_digit(s: &str) -> bool {
    let mut chars = s.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_numeric())
}

/// Flag each paragraph that uses either form of an inconsistently
/// hyphenated phrase.
fn hyphen_variant_matches(text: &str, table: &HyphenVariantTable) -> Vec<RuleMatch> {
    let mut found = Vec::new();
    for variant in table.variants() {
        for form in [&variant.hyphenated, &variant.spaced] {
            if let Some(offset) = bounded_offsets(text, form).next() {
                found.push(RuleMatch {
                    category: format!("{} \"{}\"", category::HYPHEN_VARIANT, variant.hyphenated),
                    offset,
                });
            }
        }
    }
    found
}
