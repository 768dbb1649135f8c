//! Indented XML line writer for the parse tree.

use jack_syntax::token::{Token, TokenKind};

const INDENT_SPACES: usize = 2;

/// Replaces the four XML-unsafe characters with their entities.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

/// Accumulates output lines; nesting is tracked by a single depth counter.
#[derive(Debug, Default)]
pub struct XmlWriter {
    lines: Vec<String>,
    depth: usize,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    fn indent(&self) -> String {
        " ".repeat(self.depth * INDENT_SPACES)
    }

    pub fn open(&mut self, tag: &str) {
        let line = format!("{}<{}>", self.indent(), tag);
        self.lines.push(line);
        self.depth += 1;
    }

    pub fn close(&mut self, tag: &str) {
        self.depth = self.depth.saturating_sub(1);
        let line = format!("{}</{}>", self.indent(), tag);
        self.lines.push(line);
    }

    pub fn leaf(&mut self, kind: TokenKind, text: &str) {
        let tag = kind.tag();
        let line = format!("{}<{}> {} </{}>", self.indent(), tag, escape(text), tag);
        self.lines.push(line);
    }

    pub fn error(&mut self, message: &str) {
        let line = format!("{}<error> {} </error>", self.indent(), escape(message));
        self.lines.push(line);
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Flat `<tokens>` listing with one leaf per token.
pub fn tokens_xml(tokens: &[Token]) -> Vec<String> {
    let mut out = XmlWriter::new();
    out.open("tokens");
    for t in tokens {
        out.leaf(t.kind(), t.display_text());
    }
    out.close("tokens");
    out.into_lines()
}
