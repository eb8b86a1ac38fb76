// WHY: long lines are judged absolutely, short lines only against their
// neighbours, so a book of uniformly short lines produces no short-line noise

use serde::Serialize;

/// Lines at or above this many characters are long.
pub const LONGEST_PG_LINE: usize = 75;
/// A short line has at most this many characters, and its predecessor more.
pub const SHORTEST_PG_LINE: usize = 55;
/// Lines listed per report.
pub const MAX_LISTED: usize = 5;

/// A line singled out by length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LengthEntry {
    pub line_index: usize,
    pub length: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineLengthReport {
    /// Longest first
    pub long: Vec<LengthEntry>,
    /// Shortest first
    pub short: Vec<LengthEntry>,
}

impl LineLengthReport {
    pub fn scan<S: AsRef<str>>(lines: &[S]) -> Self {
        let lengths: Vec<usize> = lines.iter().map(|l| l.as_ref().chars().count()).collect();
        let mut long = Vec::new();
        let mut short = Vec::new();

        for (i, &len) in lengths.iter().enumerate() {
            if len >= LONGEST_PG_LINE {
                long.push(LengthEntry { line_index: i, length: len });
            }
            if i == 0 || i + 1 == lengths.len() {
                continue;
            }
            let prev = lengths[i - 1];
            let next = lengths[i + 1];
            if prev > len && len < next && prev > SHORTEST_PG_LINE && len != 0 && len <= SHORTEST_PG_LINE {
                short.push(LengthEntry { line_index: i, length: len });
            }
        }

        // stable sorts keep source order among equal lengths
        long.sort_by(|a, b| b.length.cmp(&a.length));
        short.sort_by(|a, b| a.length.cmp(&b.length));
        long.truncate(MAX_LISTED);
        short.truncate(MAX_LISTED);

        Self { long, short }
    }

    /// Notice lines; a heading is only emitted for a non-empty list.
    pub fn notices<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        let mut out = Vec::new();
        for (heading, entries) in [("long lines:", &self.long), ("short lines:", &self.short)] {
            if entries.is_empty() {
                continue;
            }
            out.push(heading.to_string());
            for entry in entries {
                let text = lines.get(entry.line_index).map(|l| l.as_ref()).unwrap_or("");
                out.push(format!("  {:5}: {} ({})", entry.line_index + 1, text, entry.length));
            }
        }
        out
    }
}
