//! Text manipulation utilities for working with CFML source code.

use std::ops::Range;

/// Check if a character is considered part of a word (identifier).
///
/// Uses Unicode Standard Annex #31 rules for identifier characters, plus `$`
/// which CFML allows anywhere in an identifier.
#[inline]
pub fn is_word_character(c: char) -> bool {
    c == '$' || unicode_ident::is_xid_continue(c)
}

/// Find the byte range of the word touching `offset`.
///
/// A cursor sitting just after the last character of a word still selects
/// that word. Returns `None` if neither side of the cursor is a word character.
pub fn word_range_at(text: &str, offset: usize) -> Option<Range<usize>> {
    if offset > text.len() || !text.is_char_boundary(offset) {
        return None;
    }

    // Find start of word
    let mut start = offset;
    while let Some(c) = text[..start].chars().next_back() {
        if !is_word_character(c) {
            break;
        }
        start -= c.len_utf8();
    }

    // Find end of word
    let mut end = offset;
    for c in text[offset..].chars() {
        if !is_word_character(c) {
            break;
        }
        end += c.len_utf8();
    }

    (start < end).then_some(start..end)
}

/// The flavor of a comment span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// `// ...` up to the end of the line
    Line,
    /// `/* ... */`
    Block,
    /// `<!--- ... --->`, may nest
    Tag,
}

/// A comment found in a document, as byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRange {
    pub kind: CommentKind,
    pub range: Range<usize>,
}

impl CommentRange {
    /// Whether a cursor at `offset` is inside this comment.
    ///
    /// The end of a line comment counts as inside it; the end of a block or
    /// tag comment does not, since the cursor then touches the code that follows.
    pub fn contains(&self, offset: usize) -> bool {
        self.range.contains(&offset) || (self.kind == CommentKind::Line && offset == self.range.end)
    }
}

/// Find every comment in a document.
///
/// In script dialect the whole file is script. In tag dialect only
/// `<!--- --->` comments apply, except inside `<cfscript>` blocks where the
/// script rules take over. String literals are skipped in script code so
/// that `"http://host"` does not open a comment.
pub fn comment_ranges(text: &str, is_script: bool) -> Vec<CommentRange> {
    let bytes = text.as_bytes();
    let mut ranges = Vec::new();
    let mut in_script = is_script;
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let rest = &bytes[i..];

        if let Some(q) = quote {
            if bytes[i] == q {
                if bytes.get(i + 1) == Some(&q) {
                    // doubled quote escape
                    i += 2;
                    continue;
                }
                quote = None;
            }
            i += 1;
            continue;
        }

        if in_script {
            if !is_script && starts_with_ignore_case(rest, b"</cfscript") {
                in_script = false;
                i += b"</cfscript".len();
                continue;
            }
            match bytes[i] {
                b'"' | b'\'' => {
                    quote = Some(bytes[i]);
                    i += 1;
                }
                b'/' if rest.starts_with(b"//") => {
                    let end = find_from(bytes, i, b"\n").unwrap_or(bytes.len());
                    let end = if end > i && bytes[end - 1] == b'\r' { end - 1 } else { end };
                    ranges.push(CommentRange {
                        kind: CommentKind::Line,
                        range: i..end,
                    });
                    i = end;
                }
                b'/' if rest.starts_with(b"/*") => {
                    let end = find_from(bytes, i + 2, b"*/").map_or(bytes.len(), |e| e + 2);
                    ranges.push(CommentRange {
                        kind: CommentKind::Block,
                        range: i..end,
                    });
                    i = end;
                }
                _ => i += 1,
            }
            continue;
        }

        if rest.starts_with(b"<!---") {
            let end = tag_comment_end(bytes, i);
            ranges.push(CommentRange {
                kind: CommentKind::Tag,
                range: i..end,
            });
            i = end;
        } else if starts_with_ignore_case(rest, b"<cfscript") {
            i = find_from(bytes, i, b">").map_or(bytes.len(), |e| e + 1);
            in_script = true;
        } else {
            i += 1;
        }
    }

    ranges
}

/// Replace every comment character with a space, keeping line breaks.
///
/// Characters are replaced one for one, so line/column positions computed on
/// the sanitized text match the original document.
pub fn sanitize(text: &str, comments: &[CommentRange]) -> String {
    if comments.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut comments = comments.iter().peekable();
    for (offset, c) in text.char_indices() {
        while comments.next_if(|comment| comment.range.end <= offset).is_some() {}
        let blank = comments
            .peek()
            .is_some_and(|comment| comment.range.start <= offset);
        if blank && c != '\n' && c != '\r' {
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}

fn starts_with_ignore_case(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.len() >= needle.len() && haystack[..needle.len()].eq_ignore_ascii_case(needle)
}

fn find_from(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| from + pos)
}

/// End offset (exclusive) of the tag comment opening at `start`, honoring nesting.
fn tag_comment_end(bytes: &[u8], start: usize) -> usize {
    let mut depth = 0usize;
    let mut i = start;
    while i < bytes.len() {
        let rest = &bytes[i..];
        if rest.starts_with(b"<!---") {
            depth += 1;
            i += 5;
        } else if rest.starts_with(b"--->") {
            depth -= 1;
            i += 4;
            if depth == 0 {
                return i;
            }
        } else {
            i += 1;
        }
    }
    bytes.len()
}
