//! Token definitions and the fixed Jack vocabularies.
//!
//! A [`Token`] stores only its raw text and position. Its category is derived
//! from the text on demand by [`Token::kind`], which checks the categories in
//! a fixed priority order:
//!
//! 1. **Keyword**: one of the 21 reserved words (`class`, `let`, `while`, ...)
//! 2. **Symbol**: one of the 19 single-character symbols (`{`, `;`, `~`, ...)
//! 3. **Integer constant**: a run of decimal digits
//! 4. **String constant**: text carrying the opening `"` marker
//! 5. **Identifier**: anything else
//!
//! The first category that matches wins, so `class` is always a keyword and
//! never an identifier.
//!
//! # Examples
//!
//! ```rust
//! use jack_syntax::{Keyword, Token, TokenKind};
//!
//! let kw = Token::new("let", 0, 1);
//! assert_eq!(kw.kind(), TokenKind::Keyword);
//! assert_eq!(kw.keyword(), Some(Keyword::Let));
//!
//! let name = Token::new("counter", 1, 1);
//! assert_eq!(name.kind(), TokenKind::Identifier);
//!
//! let text = Token::new("\"hello world", 2, 1);
//! assert_eq!(text.kind(), TokenKind::StringConst);
//! assert_eq!(text.string_value(), "hello world");
//! ```

use std::fmt;

/// The 19 single-character symbols of the language.
pub const SYMBOLS: [char; 19] = [
    '{', '}', '(', ')', '[', ']', '.', ',', ';', '+', '-', '*', '/', '&', '|', '<', '>', '=', '~',
];

/// Binary operators accepted between the terms of an expression.
pub const BINARY_OPS: [char; 9] = ['+', '-', '*', '/', '&', '|', '<', '>', '='];

/// Unary operators accepted in front of a term.
pub const UNARY_OPS: [char; 2] = ['-', '~'];

/// Returns `true` if `c` belongs to the symbol alphabet.
pub fn is_symbol(c: char) -> bool {
    SYMBOLS.contains(&c)
}

/// Returns `true` if `c` may appear inside an identifier, keyword or integer.
pub fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// The reserved words of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Class,
    Method,
    Function,
    Constructor,
    Int,
    Boolean,
    Char,
    Void,
    Var,
    Static,
    Field,
    Let,
    Do,
    If,
    Else,
    While,
    Return,
    True,
    False,
    Null,
    This,
}

/// Every keyword, in declaration order.
pub const KEYWORDS: &[Keyword] = &[
    Keyword::Class,
    Keyword::Method,
    Keyword::Function,
    Keyword::Constructor,
    Keyword::Int,
    Keyword::Boolean,
    Keyword::Char,
    Keyword::Void,
    Keyword::Var,
    Keyword::Static,
    Keyword::Field,
    Keyword::Let,
    Keyword::Do,
    Keyword::If,
    Keyword::Else,
    Keyword::While,
    Keyword::Return,
    Keyword::True,
    Keyword::False,
    Keyword::Null,
    Keyword::This,
];

impl Keyword {
    /// Looks up the keyword spelled exactly as `text`.
    pub fn lookup(text: &str) -> Option<Keyword> {
        let kw = match text {
            "class" => Keyword::Class,
            "method" => Keyword::Method,
            "function" => Keyword::Function,
            "constructor" => Keyword::Constructor,
            "int" => Keyword::Int,
            "boolean" => Keyword::Boolean,
            "char" => Keyword::Char,
            "void" => Keyword::Void,
            "var" => Keyword::Var,
            "static" => Keyword::Static,
            "field" => Keyword::Field,
            "let" => Keyword::Let,
            "do" => Keyword::Do,
            "if" => Keyword::If,
            "else" => Keyword::Else,
            "while" => Keyword::While,
            "return" => Keyword::Return,
            "true" => Keyword::True,
            "false" => Keyword::False,
            "null" => Keyword::Null,
            "this" => Keyword::This,
            _ => return None,
        };
        Some(kw)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Class => "class",
            Keyword::Method => "method",
            Keyword::Function => "function",
            Keyword::Constructor => "constructor",
            Keyword::Int => "int",
            Keyword::Boolean => "boolean",
            Keyword::Char => "char",
            Keyword::Void => "void",
            Keyword::Var => "var",
            Keyword::Static => "static",
            Keyword::Field => "field",
            Keyword::Let => "let",
            Keyword::Do => "do",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Return => "return",
            Keyword::True => "true",
            Keyword::False => "false",
            Keyword::Null => "null",
            Keyword::This => "this",
        }
    }

    /// `true`, `false`, `null` and `this`: the keywords usable as a term.
    pub fn is_constant(self) -> bool {
        matches!(
            self,
            Keyword::True | Keyword::False | Keyword::Null | Keyword::This
        )
    }

    /// `int`, `char` and `boolean`: the keywords usable as a type.
    pub fn is_primitive_type(self) -> bool {
        matches!(self, Keyword::Int | Keyword::Char | Keyword::Boolean)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lexical category of a token, derived from its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Symbol,
    Identifier,
    IntConst,
    StringConst,
}

impl TokenKind {
    /// Element name used for this category in the XML output.
    pub fn tag(self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Symbol => "symbol",
            TokenKind::Identifier => "identifier",
            TokenKind::IntConst => "integerConstant",
            TokenKind::StringConst => "stringConstant",
        }
    }
}

/// Classifies raw token text using the keyword → symbol → integer →
/// string → identifier priority order.
pub fn classify(text: &str) -> TokenKind {
    if Keyword::lookup(text).is_some() {
        return TokenKind::Keyword;
    }
    let mut chars = text.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if is_symbol(c) {
            return TokenKind::Symbol;
        }
    }
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        return TokenKind::IntConst;
    }
    if text.contains('"') {
        return TokenKind::StringConst;
    }
    TokenKind::Identifier
}

/// A single lexical unit with its position in the token stream.
///
/// String constants keep their opening `"` in `text` as the classification
/// marker; use [`Token::string_value`] for the contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Raw token text as scanned
    pub text: String,

    /// Ordinal position in the token stream (0-based)
    pub index: usize,

    /// Line number in the source file (1-based)
    pub line: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, index: usize, line: usize) -> Self {
        Self {
            text: text.into(),
            index,
            line,
        }
    }

    /// Derived category of this token; recomputed from `text` on every call.
    pub fn kind(&self) -> TokenKind {
        classify(&self.text)
    }

    pub fn keyword(&self) -> Option<Keyword> {
        Keyword::lookup(&self.text)
    }

    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.keyword() == Some(kw)
    }

    /// The symbol character, if this token is a symbol.
    pub fn symbol(&self) -> Option<char> {
        match self.kind() {
            TokenKind::Symbol => self.text.chars().next(),
            _ => None,
        }
    }

    pub fn is_symbol(&self, c: char) -> bool {
        self.symbol() == Some(c)
    }

    /// Contents of a string constant without the quote marker.
    pub fn string_value(&self) -> &str {
        self.text.strip_prefix('"').unwrap_or(&self.text)
    }

    /// Text as it should appear in output: string constants lose their marker.
    pub fn display_text(&self) -> &str {
        match self.kind() {
            TokenKind::StringConst => self.string_value(),
            _ => &self.text,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
