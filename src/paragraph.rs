// WHY: rules scan whole paragraphs so that defects spanning a line break are
// visible, but every finding is reported against a source line. This module
// owns the flattening and the way back.

use tracing::debug;

/// Blank marker used to initialize annotation rows.
pub const BLANK_MARKER: char = ' ';

/// Default caret placed by annotation mode.
pub const CARET: char = '^';

/// Position inside one paragraph: the line within the paragraph and the
/// byte column within that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextPosition {
    pub line: usize,
    pub column: usize,
}

/// A maximal run of contiguous non-blank lines.
#[derive(Debug, Clone)]
pub struct Paragraph {
    start_line: usize,
    lines: Vec<String>,
    text: String,
    annotation_rows: Vec<Vec<char>>,
}

impl Paragraph {
    fn new(start_line: usize, lines: Vec<String>) -> Self {
        let text = lines.join(" ");
        let annotation_rows = lines
            .iter()
            .map(|line| vec![BLANK_MARKER; line.chars().count()])
            .collect();
        Self {
            start_line,
            lines,
            text,
            annotation_rows,
        }
    }

    /// Index of the first line of this paragraph in the source.
    pub fn start_line(&self) -> usize {
        self.start_line
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Lines joined with a single space; the string every rule scans.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Map a byte offset in [`Paragraph::text`] back to a line and column.
    ///
    /// An offset on the separator space between two lines maps to column 0
    /// of the following line. Offsets past the end of the text stay on the
    /// last line.
    pub fn translate(&self, offset: usize) -> TextPosition {
        let mut remaining = offset;
        let mut line = 0;
        while line + 1 < self.lines.len() && remaining >= self.lines[line].len() {
            // the separator space itself lands on column 0 of the next line
            remaining = remaining.saturating_sub(self.lines[line].len() + 1);
            line += 1;
        }
        TextPosition {
            line,
            column: remaining,
        }
    }

    /// Source line index for a byte offset in the paragraph text.
    pub fn source_line(&self, offset: usize) -> usize {
        self.start_line + self.translate(offset).line
    }

    /// Overwrite one annotation cell. `position.column` is the byte column
    /// returned by [`Paragraph::translate`]; out-of-range positions are ignored.
    pub fn annotate(&mut self, position: TextPosition, marker: char) {
        let Some(line) = self.lines.get(position.line) else {
            return;
        };
        let Some(prefix) = line.get(..position.column) else {
            return;
        };
        let cell = prefix.chars().count();
        if let Some(slot) = self
            .annotation_rows
            .get_mut(position.line)
            .and_then(|row| row.get_mut(cell))
        {
            *slot = marker;
        }
    }

    /// Marker row for one line, trailing blanks trimmed.
    pub fn annotation_row(&self, line: usize) -> Option<String> {
        self.annotation_rows
            .get(line)
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
    }

    /// True if any annotation cell has been written.
    pub fn is_annotated(&self) -> bool {
        self.annotation_rows
            .iter()
            .flatten()
            .any(|&c| c != BLANK_MARKER)
    }
}

/// All paragraphs of a book, in source order.
#[derive(Debug, Clone, Default)]
pub struct ParagraphIndex {
    paragraphs: Vec<Paragraph>,
}

impl ParagraphIndex {
    /// Group lines into paragraphs. An empty line ends the current paragraph
    /// and belongs to none.
    pub fn build<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut paragraphs = Vec::new();
        let mut current: Vec<String> = Vec::new();
        let mut start_line = 0;

        for (index, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            if line.is_empty() {
                if !current.is_empty() {
                    paragraphs.push(Paragraph::new(start_line, std::mem::take(&mut current)));
                }
                continue;
            }
            if current.is_empty() {
                start_line = index;
            }
            current.push(line.to_string());
        }
        if !current.is_empty() {
            paragraphs.push(Paragraph::new(start_line, current));
        }

        debug!("Built {} paragraphs from {} lines", paragraphs.len(), lines.len());
        Self { paragraphs }
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn get(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Paragraph> {
        self.paragraphs.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Paragraph> {
        self.paragraphs.iter()
    }

    /// Translate an offset in paragraph `index`.
    pub fn translate(&self, index: usize, offset: usize) -> Option<TextPosition> {
        self.paragraphs.get(index).map(|p| p.translate(offset))
    }

    /// Place a marker in paragraph `index`.
    pub fn annotate(&mut self, index: usize, position: TextPosition, marker: char) {
        if let Some(paragraph) = self.paragraphs.get_mut(index) {
            paragraph.annotate(position, marker);
        }
    }
}

impl<'a> IntoIterator for &'a ParagraphIndex {
    type Item = &'a Paragraph;
    type IntoIter = std::slice::Iter<'a, Paragraph>;

    fn into_iter(self) -> Self::IntoIter {
        self.paragraphs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParagraphIndex {
        ParagraphIndex::build(&[
            "It was a dark",
            "and stormy night;",
            "",
            "",
            "the rain fell in",
            "torrents—except",
            "at occasional intervals.",
        ])
    }

    #[test]
    fn test_build_groups_lines() {
        let index = sample();
        assert_eq!(index.len(), 2);
        assert_eq!(index.paragraphs()[0].start_line(), 0);
        assert_eq!(index.paragraphs()[0].text(), "It was a dark and stormy night;");
        assert_eq!(index.paragraphs()[1].start_line(), 4);
        assert_eq!(index.paragraphs()[1].lines().len(), 3);
    }

    #[test]
    fn test_text_length_invariant() {
        for paragraph in sample().iter() {
            let expected: usize =
                paragraph.lines().iter().map(String::len).sum::<usize>() + paragraph.lines().len() - 1;
            assert_eq!(paragraph.text().len(), expected);
        }
    }

    #[test]
    fn test_blank_only_input_has_no_paragraphs() {
        let index = ParagraphIndex::build(&["", "", ""]);
        assert!(index.is_empty());
        let index = ParagraphIndex::build::<&str>(&[]);
        assert!(index.is_empty());
    }

    #[test]
    fn test_translate_separator_maps_to_next_line() {
        let index = sample();
        let paragraph = &index.paragraphs()[0];
        // "It was a dark" is 13 bytes; offset 13 is the joining space
        assert_eq!(paragraph.translate(13), TextPosition { line: 1, column: 0 });
        assert_eq!(paragraph.translate(14), TextPosition { line: 1, column: 0 });
        assert_eq!(paragraph.translate(15), TextPosition { line: 1, column: 1 });
        assert_eq!(paragraph.translate(12), TextPosition { line: 0, column: 12 });
    }

    #[test]
    fn test_translate_round_trips_every_offset() {
        let index = sample();
        for paragraph in index.iter() {
            let text = paragraph.text();
            for (offset, ch) in text.char_indices() {
                let pos = paragraph.translate(offset);
                let line = &paragraph.lines()[pos.line];
                assert!(pos.column < line.len(), "column out of range at offset {offset}");
                let found = line[pos.column..].chars().next().unwrap();
                if ch == ' ' && found != ' ' {
                    // separator space: must be column 0 of a following line
                    assert_eq!(pos.column, 0);
                    assert!(pos.line > 0);
                } else {
                    assert_eq!(found, ch, "mismatch at offset {offset}");
                }
            }
        }
    }

    #[test]
    fn test_annotate_multibyte_line() {
        let mut index = sample();
        let paragraph = index.get_mut(1).unwrap();
        let offset = paragraph.text().find("except").unwrap();
        let pos = paragraph.translate(offset);
        assert_eq!(pos.line, 1);
        paragraph.annotate(pos, CARET);
        // "torrents—" is nine characters wide
        assert_eq!(paragraph.annotation_row(1).unwrap(), "         ^");
        assert!(paragraph.is_annotated());
        assert_eq!(paragraph.annotation_row(0).unwrap(), "");
    }

    #[test]
    fn test_source_line() {
        let index = sample();
        let paragraph = &index.paragraphs()[1];
        let offset = paragraph.text().find("occasional").unwrap();
        assert_eq!(paragraph.source_line(offset), 6);
    }
}
