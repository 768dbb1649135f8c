//! Recursive-descent parser that writes the parse tree as indented XML.
//!
//! Every production method expects the cursor on the first token of its
//! production and leaves it on the first token after it. Terminals are
//! matched by the `expect_*` helpers, which emit a leaf and advance on a
//! match. On a mismatch the token is left unconsumed and the outcome depends
//! on the [`DiagnosticMode`].

use jack_syntax::error::{error_at, Result};
use jack_syntax::token::{Keyword, Token, TokenKind, BINARY_OPS, UNARY_OPS};

use crate::cursor::TokenCursor;
use crate::xml::XmlWriter;

/// How grammar mismatches are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagnosticMode {
    /// Emit an `<error>` node and continue from the unconsumed token.
    /// Output after the first diagnostic is not guaranteed to be well-formed.
    #[default]
    Recover,
    /// Stop at the first mismatch and return it as an [`Error`](jack_syntax::Error).
    Strict,
}

/// A grammar mismatch recorded in [`DiagnosticMode::Recover`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub line: usize,
}

/// Result of parsing one class.
#[derive(Debug, Clone, Default)]
pub struct ParseOutput {
    pub lines: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn to_xml(&self) -> String {
        let mut s = self.lines.join("\n");
        s.push('\n');
        s
    }
}

pub struct Parser {
    cursor: TokenCursor,
    out: XmlWriter,
    mode: DiagnosticMode,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_mode(tokens, DiagnosticMode::Recover)
    }

    pub fn with_mode(tokens: Vec<Token>, mode: DiagnosticMode) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            out: XmlWriter::new(),
            mode,
            diagnostics: Vec::new(),
        }
    }

    /// Parse a whole class: `'class' name '{' classVarDec* subroutineDec* '}'`.
    ///
    /// Tokens after the closing brace are ignored.
    pub fn parse_class(mut self) -> Result<ParseOutput> {
        self.class()?;
        Ok(ParseOutput {
            lines: self.out.into_lines(),
            diagnostics: self.diagnostics,
        })
    }

    // === Token helpers ===

    fn current(&self) -> Result<&Token> {
        self.cursor.current().ok_or_else(|| self.cursor.overrun())
    }

    fn at_keyword(&self, kw: Keyword) -> bool {
        self.cursor.current().map_or(false, |t| t.is_keyword(kw))
    }

    fn at_any_keyword(&self, kws: &[Keyword]) -> bool {
        self.cursor
            .current()
            .and_then(Token::keyword)
            .map_or(false, |k| kws.contains(&k))
    }

    fn at_symbol(&self, c: char) -> bool {
        self.cursor.current().map_or(false, |t| t.is_symbol(c))
    }

    fn at_any_symbol(&self, cs: &[char]) -> bool {
        self.cursor
            .current()
            .and_then(Token::symbol)
            .map_or(false, |c| cs.contains(&c))
    }

    fn at_type(&self) -> bool {
        match self.cursor.token_type() {
            Some(TokenKind::Identifier) => true,
            Some(TokenKind::Keyword) => self
                .cursor
                .current()
                .and_then(Token::keyword)
                .map_or(false, Keyword::is_primitive_type),
            _ => false,
        }
    }

    /// Whether the current token can begin a term, and so an expression.
    fn starts_term(&self) -> bool {
        match self.cursor.token_type() {
            Some(TokenKind::Identifier | TokenKind::IntConst | TokenKind::StringConst) => true,
            Some(TokenKind::Keyword) => self
                .cursor
                .current()
                .and_then(Token::keyword)
                .map_or(false, Keyword::is_constant),
            Some(TokenKind::Symbol) => self.at_symbol('(') || self.at_any_symbol(&UNARY_OPS),
            None => false,
        }
    }

    /// Emit the current token as a leaf and move past it.
    fn terminal(&mut self) -> Result<()> {
        let tok = self.cursor.advance()?;
        self.out.leaf(tok.kind(), tok.display_text());
        Ok(())
    }

    fn mismatch(&mut self, message: String) -> Result<()> {
        let line = self.cursor.current().map_or(0, |t| t.line);
        if self.mode == DiagnosticMode::Strict {
            return error_at(line, message);
        }
        self.out.error(&message);
        self.diagnostics.push(Diagnostic { message, line });
        Ok(())
    }

    fn expect_keyword(&mut self, kw: Keyword) -> Result<()> {
        let tok = self.current()?;
        if tok.is_keyword(kw) {
            return self.terminal();
        }
        let msg = format!("Expected '{}' keyword, received '{}'", kw, tok.display_text());
        self.mismatch(msg)
    }

    fn expect_symbol(&mut self, c: char) -> Result<()> {
        let tok = self.current()?;
        if tok.is_symbol(c) {
            return self.terminal();
        }
        let msg = format!("Expected {}, received '{}'", c, tok.display_text());
        self.mismatch(msg)
    }

    fn expect_identifier(&mut self) -> Result<()> {
        let tok = self.current()?;
        if tok.kind() == TokenKind::Identifier {
            return self.terminal();
        }
        let msg = format!("Expected identifier, received '{}'", tok.display_text());
        self.mismatch(msg)
    }

    /// `'int' | 'char' | 'boolean' | className`
    fn expect_type(&mut self) -> Result<()> {
        let tok = self.current()?;
        if self.at_type() {
            return self.terminal();
        }
        let msg = format!("Expected type, received '{}'", tok.display_text());
        self.mismatch(msg)
    }

    // === Program structure ===

    fn class(&mut self) -> Result<()> {
        self.out.open("class");
        self.expect_keyword(Keyword::Class)?;
        self.expect_identifier()?;
        self.expect_symbol('{')?;
        while self.at_any_keyword(&[Keyword::Static, Keyword::Field]) {
            self.class_var_dec()?;
        }
        while self.at_any_keyword(&[Keyword::Constructor, Keyword::Function, Keyword::Method]) {
            self.subroutine_dec()?;
        }
        self.expect_symbol('}')?;
        self.out.close("class");
        Ok(())
    }

    /// `('static' | 'field') type name (',' name)* ';'`
    fn class_var_dec(&mut self) -> Result<()> {
        self.out.open("classVarDec");
        self.terminal()?;
        self.var_dec_body()?;
        self.out.close("classVarDec");
        Ok(())
    }

    /// `type name (',' name)* ';'`, shared by class and local declarations.
    fn var_dec_body(&mut self) -> Result<()> {
        self.expect_type()?;
        self.expect_identifier()?;
        while self.at_symbol(',') {
            self.terminal()?;
            self.expect_identifier()?;
        }
        self.expect_symbol(';')
    }

    fn subroutine_dec(&mut self) -> Result<()> {
        self.out.open("subroutineDec");
        self.terminal()?;
        if self.at_keyword(Keyword::Void) {
            self.terminal()?;
        } else {
            self.expect_type()?;
        }
        self.expect_identifier()?;
        self.expect_symbol('(')?;
        self.parameter_list()?;
        self.expect_symbol(')')?;
        self.subroutine_body()?;
        self.out.close("subroutineDec");
        Ok(())
    }

    /// `(type name (',' type name)*)?`
    fn parameter_list(&mut self) -> Result<()> {
        self.out.open("parameterList");
        if self.at_type() {
            self.terminal()?;
            self.expect_identifier()?;
            while self.at_symbol(',') {
                self.terminal()?;
                self.expect_type()?;
                self.expect_identifier()?;
            }
        }
        self.out.close("parameterList");
        Ok(())
    }

    fn subroutine_body(&mut self) -> Result<()> {
        self.out.open("subroutineBody");
        self.expect_symbol('{')?;
        while self.at_keyword(Keyword::Var) {
            self.var_dec()?;
        }
        self.statements()?;
        self.expect_symbol('}')?;
        self.out.close("subroutineBody");
        Ok(())
    }

    fn var_dec(&mut self) -> Result<()> {
        self.out.open("varDec");
        self.terminal()?;
        self.var_dec_body()?;
        self.out.close("varDec");
        Ok(())
    }

    // === Statements ===

    fn statements(&mut self) -> Result<()> {
        self.out.open("statements");
        loop {
            match self.cursor.current().and_then(Token::keyword) {
                Some(Keyword::Let) => self.let_statement()?,
                Some(Keyword::If) => self.if_statement()?,
                Some(Keyword::While) => self.while_statement()?,
                Some(Keyword::Do) => self.do_statement()?,
                Some(Keyword::Return) => self.return_statement()?,
                _ => break,
            }
        }
        self.out.close("statements");
        Ok(())
    }

    /// `'{' statements '}'`
    fn block(&mut self) -> Result<()> {
        self.expect_symbol('{')?;
        self.statements()?;
        self.expect_symbol('}')
    }

    /// `open expression close`
    fn enclosed_expression(&mut self, open: char, close: char) -> Result<()> {
        self.expect_symbol(open)?;
        self.expression()?;
        self.expect_symbol(close)
    }

    fn let_statement(&mut self) -> Result<()> {
        self.out.open("letStatement");
        self.expect_keyword(Keyword::Let)?;
        self.expect_identifier()?;
        if self.at_symbol('[') {
            self.enclosed_expression('[', ']')?;
        }
        self.expect_symbol('=')?;
        self.expression()?;
        self.expect_symbol(';')?;
        self.out.close("letStatement");
        Ok(())
    }

    fn if_statement(&mut self) -> Result<()> {
        self.out.open("ifStatement");
        self.expect_keyword(Keyword::If)?;
        self.enclosed_expression('(', ')')?;
        self.block()?;
        if self.at_keyword(Keyword::Else) {
            self.terminal()?;
            self.block()?;
        }
        self.out.close("ifStatement");
        Ok(())
    }

    fn while_statement(&mut self) -> Result<()> {
        self.out.open("whileStatement");
        self.expect_keyword(Keyword::While)?;
        self.enclosed_expression('(', ')')?;
        self.block()?;
        self.out.close("whileStatement");
        Ok(())
    }

    fn do_statement(&mut self) -> Result<()> {
        self.out.open("doStatement");
        self.expect_keyword(Keyword::Do)?;
        self.subroutine_call()?;
        self.expect_symbol(';')?;
        self.out.close("doStatement");
        Ok(())
    }

    fn return_statement(&mut self) -> Result<()> {
        self.out.open("returnStatement");
        self.expect_keyword(Keyword::Return)?;
        if self.starts_term() {
            self.expression()?;
        }
        self.expect_symbol(';')?;
        self.out.close("returnStatement");
        Ok(())
    }

    // === Expressions ===

    fn expression(&mut self) -> Result<()> {
        self.out.open("expression");
        self.term()?;
        while self.at_any_symbol(&BINARY_OPS) {
            self.terminal()?;
            self.term()?;
        }
        self.out.close("expression");
        Ok(())
    }

    fn term(&mut self) -> Result<()> {
        self.out.open("term");
        let kind = self.cursor.token_type().ok_or_else(|| self.cursor.overrun())?;
        let tok = self.current()?;
        match kind {
            TokenKind::IntConst | TokenKind::StringConst => self.terminal()?,
            TokenKind::Keyword if tok.keyword().map_or(false, Keyword::is_constant) => {
                self.terminal()?
            }
            TokenKind::Identifier => {
                // one-token lookahead picks array access, call or plain name
                let next = self.cursor.peek_raw(self.cursor.position() + 1);
                match next {
                    Some("[") => {
                        self.terminal()?;
                        self.enclosed_expression('[', ']')?;
                    }
                    Some("(") | Some(".") => self.subroutine_call()?,
                    _ => self.terminal()?,
                }
            }
            TokenKind::Symbol if tok.is_symbol('(') => self.enclosed_expression('(', ')')?,
            TokenKind::Symbol if self.at_any_symbol(&UNARY_OPS) => {
                self.terminal()?;
                self.term()?;
            }
            _ => {
                let msg = format!("Expected term, received '{}'", tok.display_text());
                self.mismatch(msg)?;
            }
        }
        self.out.close("term");
        Ok(())
    }

    /// `(expression (',' expression)*)?`
    fn expression_list(&mut self) -> Result<()> {
        self.out.open("expressionList");
        if self.starts_term() {
            self.expression()?;
            while self.at_symbol(',') {
                self.terminal()?;
                self.expression()?;
            }
        }
        self.out.close("expressionList");
        Ok(())
    }

    /// `name '(' expressionList ')' | name '.' name '(' expressionList ')'`
    fn subroutine_call(&mut self) -> Result<()> {
        self.expect_identifier()?;
        if self.at_symbol('.') {
            self.terminal()?;
            self.expect_identifier()?;
        } else if !self.at_symbol('(') {
            let msg = format!(
                "Expected '(' or '.', received '{}'",
                self.current()?.display_text()
            );
            return self.mismatch(msg);
        }
        self.expect_symbol('(')?;
        self.expression_list()?;
        self.expect_symbol(')')
    }
}
