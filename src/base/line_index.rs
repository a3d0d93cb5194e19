//! Conversion between byte offsets and line/column positions.

use text_size::TextSize;

use super::Position;

/// Line start table for a single document.
///
/// Columns are counted in characters, matching [`Position`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the first character of every line.
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::from(offset as u32 + 1));
            }
        }
        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset into a position. Offsets past the end clamp to the last line.
    pub fn position(&self, text: &str, offset: TextSize) -> Position {
        let offset = offset.min(TextSize::of(text));
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = usize::from(self.line_starts[line]);
        let column = text
            .get(line_start..usize::from(offset))
            .map_or(0, |segment| segment.chars().count());
        Position::new(line as u32, column as u32)
    }

    /// Convert a position into a byte offset.
    ///
    /// Lines past the end clamp to the end of the text; columns past the end of
    /// a line clamp to the line end (before the newline).
    pub fn offset(&self, text: &str, position: Position) -> TextSize {
        let Some(&line_start) = self.line_starts.get(position.line as usize) else {
            return TextSize::of(text);
        };
        let line_start = usize::from(line_start);
        let line = &text[line_start..];
        let line = line.split('\n').next().unwrap_or_default();
        let column = line
            .char_indices()
            .nth(position.column as usize)
            .map_or(line.len(), |(index, _)| index);
        TextSize::from((line_start + column) as u32)
    }
}
