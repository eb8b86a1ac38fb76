pub mod error;
pub mod findings;
pub mod hyphenation;
pub mod line_length;
pub mod names;
pub mod paragraph;
pub mod pipeline;
pub mod quotes;
pub mod reader;
pub mod report;
pub mod rules;
pub mod wordlist;

// Re-export the types a caller needs for a full run
pub use error::{FatalError, Result};
pub use findings::{Finding, FindingStore};
pub use paragraph::{Paragraph, ParagraphIndex, TextPosition};
pub use pipeline::{check_file, CheckConfig, Checker};
pub use reader::{LineStore, ReaderConfig};
pub use report::{render_json, render_text, Report};
pub use wordlist::Wordlist;
