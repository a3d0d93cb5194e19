//! Document position context: what the resolver knows about the cursor.
//!
//! Built once per request from the raw document text. Comments are blanked
//! out so that pattern scans never match inside them, the word under the
//! cursor is located, and the text before and after that word is exposed
//! for scope-prefix and call-suffix checks.

use std::sync::Arc;

use smol_str::SmolStr;
use text_size::TextSize;

use super::component::Component;
use crate::base::{FileId, LineIndex, Position, Span};
use crate::core::text_utils::word_range_at;
use crate::core::{comment_ranges, sanitize};

/// Cursor-centric view of one document.
#[derive(Clone, Debug)]
pub struct DocumentContext {
    file: FileId,
    sanitized_text: Arc<str>,
    line_index: LineIndex,
    position: Position,
    word: SmolStr,
    word_range: Span,
    /// Byte offsets of the word in `sanitized_text`.
    word_start: usize,
    word_end: usize,
    in_comment: bool,
    is_script: bool,
    component: Option<Arc<Component>>,
}

impl DocumentContext {
    /// Build the context for `position` in `text`, treating the file as script.
    pub fn new(file: FileId, text: &str, position: Position) -> Self {
        Self::build(file, text, position, true, None)
    }

    /// Build the context for a file that declares `component`.
    ///
    /// The dialect follows the component's `is_script` flag.
    pub fn for_component(text: &str, position: Position, component: Arc<Component>) -> Self {
        let is_script = component.is_script;
        Self::build(component.file, text, position, is_script, Some(component))
    }

    /// Build the context for a template in the given dialect.
    pub fn with_dialect(file: FileId, text: &str, position: Position, is_script: bool) -> Self {
        Self::build(file, text, position, is_script, None)
    }

    fn build(
        file: FileId,
        text: &str,
        position: Position,
        is_script: bool,
        component: Option<Arc<Component>>,
    ) -> Self {
        let comments = comment_ranges(text, is_script);
        let raw_index = LineIndex::new(text);
        let raw_offset = usize::from(raw_index.offset(text, position));
        let in_comment = comments.iter().any(|comment| comment.contains(raw_offset));

        let sanitized = sanitize(text, &comments);
        let line_index = LineIndex::new(&sanitized);
        let offset = usize::from(line_index.offset(&sanitized, position));

        let (word_start, word_end, word_range) = match word_range_at(&sanitized, offset) {
            Some(range) => {
                let start = line_index.position(&sanitized, TextSize::from(range.start as u32));
                let end = line_index.position(&sanitized, TextSize::from(range.end as u32));
                (range.start, range.end, Span::new(start, end))
            }
            // No word under the cursor: a zero-width range keeps contains-checks defined.
            None => (offset, offset, Span::empty(position)),
        };
        let word = SmolStr::from(&sanitized[word_start..word_end]);

        Self {
            file,
            sanitized_text: Arc::from(sanitized),
            line_index,
            position,
            word,
            word_range,
            word_start,
            word_end,
            in_comment,
            is_script,
            component,
        }
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    /// The document text with comments blanked out.
    pub fn sanitized_text(&self) -> &str {
        &self.sanitized_text
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// The identifier under the cursor, empty when there is none.
    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn word_range(&self) -> Span {
        self.word_range
    }

    /// Text from the start of the document up to the cursor's word.
    pub fn doc_prefix(&self) -> &str {
        &self.sanitized_text[..self.word_start]
    }

    /// Text from the end of the cursor's word to the end of the document.
    pub fn text_after_word(&self) -> &str {
        &self.sanitized_text[self.word_end..]
    }

    pub fn in_comment(&self) -> bool {
        self.in_comment
    }

    pub fn is_script(&self) -> bool {
        self.is_script
    }

    /// The component declared by this document, if it is a component file.
    pub fn component(&self) -> Option<&Arc<Component>> {
        self.component.as_ref()
    }

    /// Convert a byte offset in the sanitized text to a position.
    pub fn position_at(&self, offset: usize) -> Position {
        self.line_index
            .position(&self.sanitized_text, TextSize::from(offset as u32))
    }
}
