// WHY: the passes depend on each other's tables (names and hyphen variants
// feed the rules, the census gates the nesting check), so one driver runs
// them in a fixed order over a single paragraph index

use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use crate::error::Result;
use crate::findings::FindingStore;
use crate::hyphenation::HyphenVariantFinder;
use crate::line_length::LineLengthReport;
use crate::names::NameHeuristics;
use crate::paragraph::{ParagraphIndex, TextPosition, CARET};
use crate::quotes::{QuoteBalanceConfig, QuoteBalanceValidator, QuoteCensus};
use crate::reader::{LineStore, ReaderConfig};
use crate::report::Report;
use crate::rules::{category, RuleContext, RuleEngine};
use crate::wordlist::Wordlist;

/// Configuration for one check run
#[derive(Debug, Clone, Default)]
pub struct CheckConfig {
    /// Place carets under every rule hit and list the marked paragraphs
    pub annotate: bool,
    /// Clear the quotation stack after each nesting fault
    pub reset_quotes_on_fault: bool,
    pub reader: ReaderConfig,
}

/// Compiled passes, reusable across books.
pub struct Checker {
    config: CheckConfig,
    rules: RuleEngine,
    names: NameHeuristics,
    hyphens: HyphenVariantFinder,
    quotes: QuoteBalanceValidator,
}

impl Checker {
    pub fn new(config: CheckConfig) -> Result<Self> {
        let rules = RuleEngine::new()?;
        let names = NameHeuristics::new()?;
        let hyphens = HyphenVariantFinder::new()?;
        let quotes = QuoteBalanceValidator::new(QuoteBalanceConfig {
            reset_on_fault: config.reset_quotes_on_fault,
        });
        Ok(Self {
            config,
            rules,
            names,
            hyphens,
            quotes,
        })
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Run every pass over one book.
    pub fn check(&self, lines: &LineStore, wordlist: &Wordlist) -> Report {
        let start_time = Instant::now();
        let mut paragraphs = ParagraphIndex::build(lines.lines());
        let mut notices = Vec::new();
        let mut findings = FindingStore::new();

        let census = QuoteCensus::count(&paragraphs);
        let quote_style = census.style();
        notices.extend(census.mixed_notice());

        let names = self.names.analyze(&paragraphs, wordlist);
        info!("Identified {} proper names", names.len());

        let hyphen_variants = self.hyphens.find(&paragraphs);
        notices.extend(hyphen_variants.notices());

        let context = RuleContext {
            quote_style,
            names: &names,
            wordlist,
            hyphen_variants: &hyphen_variants,
        };
        // WHY: rules borrow the index while evaluating, so carets are placed afterwards
        let mut marks = Vec::new();
        for (index, paragraph) in paragraphs.iter().enumerate() {
            let found = self.rules.evaluate(paragraph, &context);
            if self.config.annotate {
                marks.extend(found.iter().map(|f| {
                    let position = TextPosition {
                        line: f.line_index - paragraph.start_line(),
                        column: f.column,
                    };
                    (index, position)
                }));
            }
            findings.extend(found);
        }
        debug!("Rule pass recorded {} findings", findings.len());

        let quote_faults = self.quotes.validate(&paragraphs, &census);
        for fault in quote_faults.iter().flatten() {
            let text = lines.get(fault.line_index).unwrap_or("");
            findings.record(category::QUOTE_NESTING, fault.line_index, text);
        }

        let line_lengths = LineLengthReport::scan(lines.lines());
        notices.extend(line_lengths.notices(lines.lines()));

        for (index, position) in marks {
            paragraphs.annotate(index, position, CARET);
        }
        let annotations = annotated_listing(&paragraphs);

        info!(
            "Checked {} lines in {} paragraphs: {} findings in {}ms",
            lines.len(),
            paragraphs.len(),
            findings.len(),
            start_time.elapsed().as_millis()
        );

        Report {
            source: source_name(&lines.stats().file_path),
            generated_at: chrono::Utc::now().to_rfc3339(),
            line_count: lines.len(),
            paragraph_count: paragraphs.len(),
            quote_census: census,
            quote_style,
            notices,
            findings,
            hyphen_variants: hyphen_variants.variants().to_vec(),
            quote_faults,
            line_lengths,
            annotations,
        }
    }
}

/// File name of the loaded book, without its directories.
fn source_name(file_path: &str) -> String {
    Path::new(file_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Source lines of every marked paragraph, each followed by its marker row.
fn annotated_listing(paragraphs: &ParagraphIndex) -> Vec<String> {
    let mut out = Vec::new();
    for paragraph in paragraphs.iter().filter(|p| p.is_annotated()) {
        for (i, line) in paragraph.lines().iter().enumerate() {
            out.push(format!("  {:5}: {}", paragraph.start_line() + i + 1, line));
            if let Some(row) = paragraph.annotation_row(i).filter(|r| !r.is_empty()) {
                out.push(format!("         {row}"));
            }
        }
        out.push(String::new());
    }
    out
}

/// Load a book and a wordlist from disk and check the book.
pub async fn check_file<P, W>(input: P, wordlist: W, config: CheckConfig) -> Result<Report>
where
    P: AsRef<Path>,
    W: AsRef<Path>,
{
    let checker = Checker::new(config)?;
    let lines = LineStore::load_with(input, &checker.config().reader).await?;
    let wordlist = Wordlist::load(wordlist).await?;
    Ok(checker.check(&lines, &wordlist))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(text: &str, config: CheckConfig) -> Report {
        let lines = LineStore::from_text(text);
        let wordlist = Wordlist::from_words(["the", "he", "said", "then", "went", "home"]);
        Checker::new(config).unwrap().check(&lines, &wordlist)
    }

    #[test]
    fn test_rule_hits_land_in_store() {
        let report = check("He went home,then stopped.", CheckConfig::default());
        assert_eq!(report.line_count, 1);
        assert_eq!(report.paragraph_count, 1);
        let spaced = report.findings.get(category::SPACED_PUNCT);
        assert_eq!(spaced.len(), 1);
        assert_eq!(spaced[0].line_text, "He went home,then stopped.");
    }

    #[test]
    fn test_quote_fault_recorded_at_paragraph_start() {
        let report = check("Plain text.\n\n\u{201C}Never closed,\nhe said.", CheckConfig::default());
        let faults = report.findings.get(category::QUOTE_NESTING);
        assert_eq!(faults.len(), 1);
        assert_eq!(faults[0].line_index, 2);
        assert_eq!(faults[0].line_text, "\u{201C}Never closed,");
        assert_eq!(report.quote_faults.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_nesting_check_skipped_for_straight_quotes() {
        let report = check("\"Hello,\" he said.", CheckConfig::default());
        assert!(report.quote_faults.is_none());
        assert!(!report.findings.contains_category(category::QUOTE_NESTING));
    }

    #[test]
    fn test_mixed_quotes_notice() {
        let report = check("\u{201C}Hi,\u{201D} he said. \"Bye.\"", CheckConfig::default());
        assert_eq!(report.notices[0], "error: mixed quotes found. curly:2 straight:2");
    }

    #[test]
    fn test_hyphen_notice_and_rule() {
        let report = check("a stair-case\n\nthe stair case.", CheckConfig::default());
        assert!(report
            .notices
            .iter()
            .any(|n| n == "hyphenation/non-hyphenation phrase report"));
        let label = format!("{} \"stair-case\"", category::HYPHEN_VARIANT);
        let lines: Vec<usize> = report.findings.get(&label).iter().map(|f| f.line_index).collect();
        assert_eq!(lines, vec![0, 2]);
    }

    #[test]
    fn test_check_is_idempotent() {
        let text = "Mr. Brown said, \u{201C}hut it was;\n\u{2018}odd\u{2019} to me.\n\nTHe end";
        let lines = LineStore::from_text(text);
        let wordlist = Wordlist::from_words(["the", "end"]);
        let checker = Checker::new(CheckConfig::default()).unwrap();
        let first = checker.check(&lines, &wordlist);
        let second = checker.check(&lines, &wordlist);
        assert_eq!(
            serde_json::to_value(&first.findings).unwrap(),
            serde_json::to_value(&second.findings).unwrap()
        );
        assert_eq!(first.notices, second.notices);
    }

    #[test]
    fn test_annotation_listing() {
        let config = CheckConfig {
            annotate: true,
            ..Default::default()
        };
        let report = check("Clean line here.\n\nsome <b>bold</b> text.", config);
        assert_eq!(report.annotations[0], "      3: some <b>bold</b> text.");
        let marker_row = &report.annotations[1];
        assert!(marker_row.starts_with(&format!("{}^", " ".repeat(14))));
    }

    #[test]
    fn test_no_annotation_by_default() {
        let report = check("some <b>bold</b> text.", CheckConfig::default());
        assert!(report.annotations.is_empty());
    }

    #[test]
    fn test_source_is_file_name_only() {
        assert_eq!(source_name("/data/mirror/12345/book-0.txt"), "book-0.txt");
        assert_eq!(source_name("book-0.txt"), "book-0.txt");
        assert_eq!(source_name(""), "");
    }

    #[test]
    fn test_empty_book() {
        let report = check("", CheckConfig::default());
        assert_eq!(report.paragraph_count, 0);
        assert!(report.findings.is_empty());
        assert!(report.notices.is_empty());
    }
}
