pub mod text_utils;

pub use text_utils::{CommentKind, CommentRange, comment_ranges, sanitize};
