//! Jack lexer: converts source lines into tokens.
pub mod comment;

pub use comment::{filter_line, strip_inline, CommentState, LineAction};

use jack_syntax::token::{is_ident_char, is_symbol, Token};

/// Scans one code line (comments already excluded) and appends its tokens to
/// `tokens`. Returns how many tokens were appended.
///
/// Unknown characters act as separators. A string constant runs to the
/// closing quote, or to the end of the line when it is unterminated.
pub fn scan_line(line: &str, line_no: usize, tokens: &mut Vec<Token>) -> usize {
    let before = tokens.len();
    LineScanner::new(strip_inline(line), line_no).scan(tokens);
    tokens.len() - before
}

/// Character scanner over a single line.
struct LineScanner {
    src: Vec<char>,
    pos: usize,
    line: usize,
    pending: String,
}

impl LineScanner {
    fn new(line: &str, line_no: usize) -> Self {
        Self {
            src: line.chars().collect(),
            pos: 0,
            line: line_no,
            pending: String::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn push(&self, tokens: &mut Vec<Token>, text: String) {
        let index = tokens.len();
        tokens.push(Token::new(text, index, self.line));
    }

    fn flush(&mut self, tokens: &mut Vec<Token>) {
        if !self.pending.is_empty() {
            let text = std::mem::take(&mut self.pending);
            self.push(tokens, text);
        }
    }

    fn read_string(&mut self) -> String {
        let mut s = String::from('"');
        while let Some(c) = self.advance() {
            if c == '"' {
                break;
            }
            s.push(c);
        }
        s
    }

    fn scan(mut self, tokens: &mut Vec<Token>) {
        while let Some(c) = self.peek() {
            if is_symbol(c) {
                self.flush(tokens);
                self.advance();
                self.push(tokens, c.to_string());
            } else if c == '"' {
                self.flush(tokens);
                self.advance();
                let s = self.read_string();
                self.push(tokens, s);
            } else if is_ident_char(c) {
                self.pending.push(c);
                self.advance();
            } else {
                self.flush(tokens);
                self.advance();
            }
        }
        self.flush(tokens);
    }
}

/// Line-oriented tokenizer over a whole source unit.
pub struct Lexer {
    lines: Vec<String>,
    state: CommentState,
}

impl Lexer {
    /// Create a lexer over the given source text.
    pub fn new(input: &str) -> Self {
        Self::from_lines(input.lines())
    }

    /// Create a lexer over already-split source lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            state: CommentState::Code,
        }
    }

    /// Comment state after the most recent call to [`Lexer::tokenize`].
    /// `CommentState::Block` here means a block comment was never closed.
    pub fn comment_state(&self) -> CommentState {
        self.state
    }

    /// Tokenize every line, skipping comment lines.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut state = CommentState::Code;
        for (i, line) in self.lines.iter().enumerate() {
            let (action, next) = filter_line(line, state);
            state = next;
            if action == LineAction::Scan {
                scan_line(line, i + 1, &mut tokens);
            }
        }
        self.state = state;
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jack_syntax::token::TokenKind;

    fn texts(src: &str) -> Vec<String> {
        Lexer::new(src).tokenize().into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_let_statement() {
        let tokens = Lexer::new("let x = 1;").tokenize();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind()).collect();
        assert_eq!(tokens.len(), 5);
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword,
                TokenKind::Identifier,
                TokenKind::Symbol,
                TokenKind::IntConst,
                TokenKind::Symbol,
            ]
        );
    }

    #[test]
    fn test_symbols_split_words() {
        assert_eq!(
            texts("do Output.printInt(a[i]);"),
            vec!["do", "Output", ".", "printInt", "(", "a", "[", "i", "]", ")", ";"]
        );
    }

    #[test]
    fn test_string_constant_is_one_token() {
        let tokens = Lexer::new("do Output.printString(\"Hello, world; x < y\");").tokenize();
        let s = &tokens[5];
        assert_eq!(s.kind(), TokenKind::StringConst);
        assert_eq!(s.text, "\"Hello, world; x < y");
        assert_eq!(s.string_value(), "Hello, world; x < y");
        assert_eq!(tokens[6].text, ")");
    }

    #[test]
    fn test_unterminated_string_runs_to_line_end() {
        let tokens = Lexer::new("let s = \"abc;\nreturn;").tokenize();
        assert_eq!(tokens[3].text, "\"abc;");
        assert_eq!(tokens[4].text, "return");
    }

    #[test]
    fn test_comments_are_skipped() {
        let src = "/** Doc comment\n * more doc\n */\nclass Main { // trailing\n// whole line\n}";
        assert_eq!(texts(src), vec!["class", "Main", "{", "}"]);
    }

    #[test]
    fn test_block_opener_inside_line_comment() {
        let src = "class A {\n field int x; // see a/*b\n field int y;\n}";
        assert_eq!(
            texts(src),
            vec!["class", "A", "{", "field", "int", "x", ";", "field", "int", "y", ";", "}"]
        );
    }

    #[test]
    fn test_unclosed_block_comment_is_reported_by_state() {
        let mut lexer = Lexer::new("class A {\n/** never closed\n}");
        let tokens = lexer.tokenize();
        assert_eq!(tokens.len(), 3);
        assert_eq!(lexer.comment_state(), CommentState::Block);
    }

    #[test]
    fn test_positions() {
        let tokens = Lexer::new("class A\n{\n}").tokenize();
        for (i, t) in tokens.iter().enumerate() {
            assert_eq!(t.index, i);
        }
        assert_eq!(tokens[2].line, 2);
        assert_eq!(tokens[3].line, 3);
    }

    #[test]
    fn test_scan_line_counts_and_appends() {
        let mut tokens = vec![Token::new("class", 0, 1)];
        let n = scan_line("  field int x, y; ", 2, &mut tokens);
        assert_eq!(n, 6);
        assert_eq!(tokens.len(), 7);
        assert_eq!(tokens[6].index, 6);
        assert_eq!(tokens[1].text, "field");
    }

    #[test]
    fn test_unknown_characters_separate() {
        assert_eq!(texts("let a\t=b@c;"), vec!["let", "a", "=", "b", "c", ";"]);
    }
}
