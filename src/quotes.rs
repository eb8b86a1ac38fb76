// WHY: quote nesting is the one check that carries state from paragraph to
// paragraph, so the scanner state is an explicit value threaded through
// `scan_paragraph` rather than hidden in the validator.

use serde::Serialize;
use tracing::{debug, info};

use crate::paragraph::ParagraphIndex;

pub const OPEN_DOUBLE: char = '\u{201C}';
pub const CLOSE_DOUBLE: char = '\u{201D}';
pub const OPEN_SINGLE: char = '\u{2018}';
pub const CLOSE_SINGLE: char = '\u{2019}';

/// Stand-in written over apostrophes before scanning.
const APOSTROPHE_MASK: char = 'X';

/// Corpus-wide quotation glyph family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    Curly,
    Straight,
}

/// Aggregate glyph counts over every paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QuoteCensus {
    pub straight: usize,
    pub curly: usize,
}

impl QuoteCensus {
    pub fn count(paragraphs: &ParagraphIndex) -> Self {
        let mut census = Self::default();
        for paragraph in paragraphs {
            for c in paragraph.text().chars() {
                match c {
                    '"' | '\'' => census.straight += 1,
                    OPEN_DOUBLE | CLOSE_DOUBLE | OPEN_SINGLE | CLOSE_SINGLE => census.curly += 1,
                    _ => {}
                }
            }
        }
        debug!(straight = census.straight, curly = census.curly, "Quote census");
        census
    }

    /// Curly only when curly glyphs strictly outnumber straight ones.
    pub fn style(&self) -> QuoteStyle {
        if self.curly > self.straight {
            QuoteStyle::Curly
        } else {
            QuoteStyle::Straight
        }
    }

    pub fn is_mixed(&self) -> bool {
        self.curly > 0 && self.straight > 0
    }

    /// Nesting can only be checked on purely curly text.
    pub fn supports_balance_check(&self) -> bool {
        self.curly > 0 && self.straight == 0
    }

    pub fn mixed_notice(&self) -> Option<String> {
        self.is_mixed().then(|| {
            format!(
                "error: mixed quotes found. curly:{} straight:{}",
                self.curly, self.straight
            )
        })
    }
}

/// An open quotation waiting for its close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteMark {
    DoubleOpen,
    SingleOpen,
}

/// Why a paragraph failed the nesting check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// Open double quote while a double quote is already open
    NestedDouble,
    /// Close double quote with no open double quote on top
    UnmatchedCloseDouble,
    /// Open single quote outside a double-quoted span
    SingleOutsideDouble,
    /// Paragraph ended with quotations still open
    Unclosed,
}

/// One nesting fault, anchored at the first line of its paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteFault {
    pub paragraph: usize,
    pub line_index: usize,
    pub kind: FaultKind,
}

/// Scanner state carried from one paragraph into the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteState {
    stack: Vec<QuoteMark>,
    /// The previous paragraph ended inside a quotation that this paragraph
    /// reopens with a leading open double quote.
    continued: bool,
}

impl QuoteState {
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn top(&self) -> Option<QuoteMark> {
        self.stack.last().copied()
    }

    pub fn is_continued(&self) -> bool {
        self.continued
    }

    fn reset(&mut self) {
        self.stack.clear();
        self.continued = false;
    }
}

/// Replace each closing single quote that sits between two letters.
pub fn mask_apostrophes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            let between_letters = c == CLOSE_SINGLE
                && i > 0
                && chars[i - 1].is_alphabetic()
                && chars.get(i + 1).is_some_and(|n| n.is_alphabetic());
            if between_letters {
                APOSTROPHE_MASK
            } else {
                c
            }
        })
        .collect()
}

/// Scan one paragraph, updating `state`. `next_text` is the text of the
/// following paragraph, if any, for the continuation convention.
///
/// Returns the first fault found; scanning of the paragraph stops there.
pub fn scan_paragraph(
    text: &str,
    next_text: Option<&str>,
    state: &mut QuoteState,
) -> Option<FaultKind> {
    let masked = mask_apostrophes(text);
    let mut chars = masked.chars().peekable();

    if state.continued {
        // WHY: the reopening quote restates the quotation already on the stack
        state.continued = false;
        if chars.peek() == Some(&OPEN_DOUBLE) {
            chars.next();
        }
    }

    for c in chars {
        match c {
            OPEN_DOUBLE => {
                if state.top() == Some(QuoteMark::DoubleOpen) {
                    return Some(FaultKind::NestedDouble);
                }
                state.stack.push(QuoteMark::DoubleOpen);
            }
            CLOSE_DOUBLE => {
                if state.top() != Some(QuoteMark::DoubleOpen) {
                    return Some(FaultKind::UnmatchedCloseDouble);
                }
                state.stack.pop();
            }
            OPEN_SINGLE => {
                if state.top() != Some(QuoteMark::DoubleOpen) {
                    return Some(FaultKind::SingleOutsideDouble);
                }
                state.stack.push(QuoteMark::SingleOpen);
            }
            CLOSE_SINGLE => {
                // an unmatched close single is indistinguishable from an apostrophe
                if state.top() == Some(QuoteMark::SingleOpen) {
                    state.stack.pop();
                }
            }
            _ => {}
        }
    }

    if state.stack.is_empty() {
        return None;
    }

    let continues = state.stack == [QuoteMark::DoubleOpen]
        && next_text.is_some_and(|next| next.starts_with(OPEN_DOUBLE));
    if continues {
        state.continued = true;
        None
    } else {
        Some(FaultKind::Unclosed)
    }
}

/// Configuration for the nesting validator.
#[derive(Debug, Clone, Default)]
pub struct QuoteBalanceConfig {
    /// Clear the carried stack after a fault instead of keeping it
    pub reset_on_fault: bool,
}

/// Runs [`scan_paragraph`] over a whole book in paragraph order.
#[derive(Debug, Default)]
pub struct QuoteBalanceValidator {
    config: QuoteBalanceConfig,
}

impl QuoteBalanceValidator {
    pub fn new(config: QuoteBalanceConfig) -> Self {
        Self { config }
    }

    /// Validate every paragraph. Returns `None` when the census rules the
    /// check out (no curly quotes, or any straight quotes present).
    pub fn validate(&self, paragraphs: &ParagraphIndex, census: &QuoteCensus) -> Option<Vec<QuoteFault>> {
        if !census.supports_balance_check() {
            info!(
                straight = census.straight,
                curly = census.curly,
                "Skipping quotation nesting check"
            );
            return None;
        }

        let mut state = QuoteState::default();
        let mut faults = Vec::new();
        let list = paragraphs.paragraphs();

        for (index, paragraph) in list.iter().enumerate() {
            let next_text = list.get(index + 1).map(|p| p.text());
            if let Some(kind) = scan_paragraph(paragraph.text(), next_text, &mut state) {
                debug!(paragraph = index, ?kind, "Quotation nesting fault");
                faults.push(QuoteFault {
                    paragraph: index,
                    line_index: paragraph.start_line(),
                    kind,
                });
                if self.config.reset_on_fault {
                    state.reset();
                }
            }
        }

        info!("Quotation nesting check found {} faults", faults.len());
        Some(faults)
    }
}
