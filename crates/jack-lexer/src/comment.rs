//! Per-line comment filtering.
//!
//! Block comments are tracked across physical lines by threading a
//! [`CommentState`] through [`filter_line`]: the state a line leaves behind is
//! the state the next line starts in.

/// Whether scanning is currently inside a block comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentState {
    #[default]
    Code,
    Block,
}

/// What the tokenizer should do with a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineAction {
    Skip,
    Scan,
}

const BLOCK_OPEN: &str = "/*";
const BLOCK_CLOSE: &str = "*/";

/// Decides whether `line` carries code, given the state left by the previous
/// line, and returns the state for the next one.
///
/// A line holding the close marker is skipped as a whole and ends the block;
/// a line holding the open marker starts one. Outside a block, markers that
/// sit behind `//` are comment text and do not count. Outside a block, a line
/// whose first non-blank character is `/` is a whole-line comment.
pub fn filter_line(line: &str, state: CommentState) -> (LineAction, CommentState) {
    let marked = match state {
        CommentState::Block => line,
        CommentState::Code => strip_inline(line),
    };
    if marked.contains(BLOCK_CLOSE) {
        return (LineAction::Skip, CommentState::Code);
    }
    let state = if marked.contains(BLOCK_OPEN) {
        CommentState::Block
    } else {
        state
    };
    if state == CommentState::Block {
        return (LineAction::Skip, state);
    }
    if line.trim_start().starts_with('/') {
        return (LineAction::Skip, state);
    }
    (LineAction::Scan, state)
}

/// Drops everything from the first `//` onwards.
pub fn strip_inline(line: &str) -> &str {
    match line.find("//") {
        Some(at) => &line[..at],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_comment_spans_lines() {
        let (a, s) = filter_line("/** Returns the sum.", CommentState::Code);
        assert_eq!((a, s), (LineAction::Skip, CommentState::Block));
        let (a, s) = filter_line("    let x = 1;", s);
        assert_eq!((a, s), (LineAction::Skip, CommentState::Block));
        let (a, s) = filter_line("  */", s);
        assert_eq!((a, s), (LineAction::Skip, CommentState::Code));
        let (a, s) = filter_line("let x = 1;", s);
        assert_eq!((a, s), (LineAction::Scan, CommentState::Code));
    }

    #[test]
    fn test_single_line_block_comment() {
        let (a, s) = filter_line("/** one liner */", CommentState::Code);
        assert_eq!((a, s), (LineAction::Skip, CommentState::Code));
    }

    #[test]
    fn test_whole_line_comment() {
        assert_eq!(
            filter_line("   // note", CommentState::Code),
            (LineAction::Skip, CommentState::Code)
        );
        assert_eq!(
            filter_line("\tdo Output.println();", CommentState::Code),
            (LineAction::Scan, CommentState::Code)
        );
    }

    #[test]
    fn test_markers_after_line_comment_are_ignored() {
        assert_eq!(
            filter_line("  field int x; // see a/*b", CommentState::Code),
            (LineAction::Scan, CommentState::Code)
        );
        assert_eq!(
            filter_line("  let y = 2; // done */", CommentState::Code),
            (LineAction::Scan, CommentState::Code)
        );
        // inside a block everything is comment text, `//` included
        assert_eq!(
            filter_line(" // still doc */", CommentState::Block),
            (LineAction::Skip, CommentState::Code)
        );
    }

    #[test]
    fn test_strip_inline() {
        assert_eq!(strip_inline("let x = 1; // set x"), "let x = 1; ");
        assert_eq!(strip_inline("return;"), "return;");
    }
}
