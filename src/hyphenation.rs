// WHY: the same phrase written both "stair-case" and "stair case" in one
// book is a consistency problem worth a top-level notice

use regex_automata::meta::Regex;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::error::{FatalError, Result};
use crate::paragraph::ParagraphIndex;

/// Example locations listed per variant form.
pub const MAX_EXAMPLES: usize = 3;

/// A source line cited as an example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRef {
    pub line_index: usize,
    pub text: String,
}

/// One phrase that appears both hyphenated and space-separated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HyphenVariant {
    pub hyphenated: String,
    pub hyphenated_count: usize,
    pub spaced: String,
    pub spaced_count: usize,
    pub hyphenated_examples: Vec<LineRef>,
    pub spaced_examples: Vec<LineRef>,
}

/// Hyphenated phrases with a co-occurring spaced variant, keyed by the
/// hyphenated form.
#[derive(Debug, Clone, Default)]
pub struct HyphenVariantTable {
    variants: Vec<HyphenVariant>,
}

impl HyphenVariantTable {
    pub fn variants(&self) -> &[HyphenVariant] {
        &self.variants
    }

    pub fn get(&self, hyphenated: &str) -> Option<&HyphenVariant> {
        self.variants.iter().find(|v| v.hyphenated == hyphenated)
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Top-level notice lines, empty when no pair was found.
    pub fn notices(&self) -> Vec<String> {
        if self.variants.is_empty() {
            return Vec::new();
        }
        let mut lines = vec!["hyphenation/non-hyphenation phrase report".to_string()];
        for variant in &self.variants {
            lines.push(format!(
                "  \"{}\" ({}) <-> \"{}\" ({})",
                variant.spaced, variant.spaced_count, variant.hyphenated, variant.hyphenated_count
            ));
            for example in variant.spaced_examples.iter().chain(&variant.hyphenated_examples) {
                lines.push(format!("    {}: {}", example.line_index + 1, example.text));
            }
        }
        lines
    }
}

/// Count occurrences of `phrase` not touching a letter on either side.
pub fn count_bounded(text: &str, phrase: &str) -> usize {
    bounded_offsets(text, phrase).count()
}

/// Byte offsets of `phrase` in `text` not touching a letter on either side.
pub fn bounded_offsets<'a>(text: &'a str, phrase: &'a str) -> impl Iterator<Item = usize> + 'a {
    text.match_indices(phrase).filter_map(move |(start, _)| {
        let before = text[..start].chars().next_back();
        let after = text[start + phrase.len()..].chars().next();
        let bounded = !before.is_some_and(char::is_alphabetic) && !after.is_some_and(char::is_alphabetic);
        bounded.then_some(start)
    })
}

/// Detects phrases written both with and without hyphens.
pub struct HyphenVariantFinder {
    hyphenated: Regex,
}

impl HyphenVariantFinder {
    pub fn new() -> Result<Self> {
        let hyphenated = Regex::new(r"(\p{L}+)-([\p{L}-]+)")
            .map_err(|e| FatalError::pattern("hyphenated phrase", e))?;
        Ok(Self { hyphenated })
    }

    /// Pass 1: literal hyphenated phrases with their counts, in first-seen order.
    pub fn count_hyphenated(&self, paragraphs: &ParagraphIndex) -> Vec<(String, usize)> {
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for paragraph in paragraphs {
            let text = paragraph.text();
            for m in self.hyphenated.find_iter(text) {
                let phrase = &text[m.range()];
                let count = counts.entry(phrase.to_string()).or_insert_with(|| {
                    order.push(phrase.to_string());
                    0
                });
                *count += 1;
            }
        }
        order
            .into_iter()
            .map(|phrase| {
                let count = counts.get(&phrase).copied().unwrap_or_default();
                (phrase, count)
            })
            .collect()
    }

    /// Pass 2: keep phrases whose spaced variant also occurs.
    pub fn find(&self, paragraphs: &ParagraphIndex) -> HyphenVariantTable {
        let mut variants = Vec::new();

        for (hyphenated, hyphenated_count) in self.count_hyphenated(paragraphs) {
            let spaced = hyphenated.replace('-', " ");
            let spaced_count: usize = paragraphs
                .iter()
                .map(|p| count_bounded(p.text(), &spaced))
                .sum();
            if spaced_count == 0 {
                continue;
            }
            variants.push(HyphenVariant {
                hyphenated_examples: examples(paragraphs, &hyphenated),
                spaced_examples: examples(paragraphs, &spaced),
                hyphenated,
                hyphenated_count,
                spaced,
                spaced_count,
            });
        }

        debug!("Found {} hyphenation variant pairs", variants.len());
        HyphenVariantTable { variants }
    }
}

fn examples(paragraphs: &ParagraphIndex, phrase: &str) -> Vec<LineRef> {
    paragraphs
        .iter()
        .flat_map(|p| {
            bounded_offsets(p.text(), phrase).map(move |offset| {
                let line = p.translate(offset).line;
                LineRef {
                    line_index: p.start_line() + line,
                    text: p.lines()[line].clone(),
                }
            })
        })
        .take(MAX_EXAMPLES)
        .collect()
}
