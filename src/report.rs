// WHY: the report is plain data so that the text and JSON renderers see the
// same thing; all formatting decisions live in the renderers

use serde::Serialize;
use std::fmt::Write as _;

use crate::findings::FindingStore;
use crate::hyphenation::HyphenVariant;
use crate::line_length::LineLengthReport;
use crate::quotes::{QuoteCensus, QuoteFault, QuoteStyle};

/// Entries listed per category in the default text report.
pub const DEFAULT_LISTED: usize = 4;
/// Entries listed per category in verbose mode.
pub const VERBOSE_LISTED: usize = 100;

/// Everything one run found in one book.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub source: String,
    /// RFC 3339 timestamp of the run
    pub generated_at: String,
    pub line_count: usize,
    pub paragraph_count: usize,
    pub quote_census: QuoteCensus,
    pub quote_style: QuoteStyle,
    /// Top-level notices in pass order
    pub notices: Vec<String>,
    pub findings: FindingStore,
    pub hyphen_variants: Vec<HyphenVariant>,
    /// `None` when the nesting check was skipped
    pub quote_faults: Option<Vec<QuoteFault>>,
    pub line_lengths: LineLengthReport,
    /// Annotated listing lines; empty unless annotation was requested
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<String>,
}

impl Report {
    pub fn finding_count(&self) -> usize {
        self.findings.len()
    }
}

/// Plain-text rendering.
pub fn render_text(report: &Report, verbose: bool) -> String {
    let limit = if verbose { VERBOSE_LISTED } else { DEFAULT_LISTED };
    let mut out = String::new();

    // writes into a String cannot fail
    let _ = writeln!(out, "pgscan run report");
    let _ = writeln!(out, "run started: {}", report.generated_at);
    let _ = writeln!(out, "source file: {}", report.source);
    out.push('\n');

    for notice in &report.notices {
        let _ = writeln!(out, "{notice}");
    }

    for (category, findings) in report.findings.categories() {
        out.push('\n');
        let _ = writeln!(out, "{category}");
        for finding in findings.iter().take(limit) {
            let _ = writeln!(out, "  {:5}: {}", finding.line_index + 1, finding.line_text);
        }
        if findings.len() > limit {
            let _ = writeln!(out, "   ... {} more", findings.len() - limit);
        }
    }

    if !report.annotations.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "annotated paragraphs");
        for line in &report.annotations {
            let _ = writeln!(out, "{line}");
        }
    }

    out
}

/// JSON rendering of the whole report.
pub fn render_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
