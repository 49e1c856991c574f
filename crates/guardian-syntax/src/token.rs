//! Token definitions for the Guardian language.
//!
//! Tokens are the smallest meaningful units of Guardian source code. The lexer
//! produces them in order, each tagged with the 1-based line and column where it
//! starts. The parser addresses tokens by their place in that stream, which is
//! what a [`TokenIndex`] records.
//!
//! # Examples
//!
//! ```rust
//! use guardian_syntax::{Token, TokenKind};
//!
//! let keyword = Token { kind: TokenKind::Switch, line: 1, col: 1 };
//! let name = Token { kind: TokenKind::Ident("state".to_string()), line: 1, col: 8 };
//! assert_eq!(keyword.kind.to_string(), "'switch'");
//! assert_eq!(name.kind.to_string(), "identifier 'state'");
//! ```

use std::fmt;

/// Token types that can be produced by the Guardian lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // === Literals ===
    /// An identifier (`balance`, `owner`, `_tmp`)
    Ident(String),

    /// A non-negative integer literal
    Number(i64),

    /// A double-quoted string literal, escapes already resolved
    String(String),

    // === Keywords ===
    If,
    Elif,
    Else,
    For,
    Switch,
    Case,
    Default,
    Return,
    Break,
    Continue,
    Goto,
    /// `defer` - postpones a call until the enclosing scope exits
    Defer,
    /// `run` - launches a call as an independent unit of execution
    Run,
    True,
    False,

    // === Punctuation ===
    Comma,
    Colon,
    Semicolon,
    Dot,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,

    // === Assignment operators ===
    Equal,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    StarStarEq,
    AmpEq,
    PipeEq,
    CaretEq,
    ShlEq,
    ShrEq,
    /// Postfix `++`
    Increment,
    /// Postfix `--`
    Decrement,

    // === Operators ===
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    /// `**`, exponentiation
    StarStar,
    Amp,
    Pipe,
    Caret,
    Shl,
    Shr,
    EqEq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    AndAnd,
    OrOr,
    Bang,

    /// End-of-file marker
    Eof,
}

impl TokenKind {
    /// Maps a word to its keyword, if it is one.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "if" => TokenKind::If,
            "elif" => TokenKind::Elif,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            "switch" => TokenKind::Switch,
            "case" => TokenKind::Case,
            "default" => TokenKind::Default,
            "return" => TokenKind::Return,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "goto" => TokenKind::Goto,
            "defer" => TokenKind::Defer,
            "run" => TokenKind::Run,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => return None,
        };
        Some(kind)
    }

    /// Source spelling of fixed tokens; `None` for literals and `Eof`.
    pub fn lexeme(&self) -> Option<&'static str> {
        use TokenKind::*;
        let s = match self {
            Ident(_) | Number(_) | String(_) | Eof => return None,
            If => "if",
            Elif => "elif",
            Else => "else",
            For => "for",
            Switch => "switch",
            Case => "case",
            Default => "default",
            Return => "return",
            Break => "break",
            Continue => "continue",
            Goto => "goto",
            Defer => "defer",
            Run => "run",
            True => "true",
            False => "false",
            Comma => ",",
            Colon => ":",
            Semicolon => ";",
            Dot => ".",
            LParen => "(",
            RParen => ")",
            LBracket => "[",
            RBracket => "]",
            LBrace => "{",
            RBrace => "}",
            Equal => "=",
            PlusEq => "+=",
            MinusEq => "-=",
            StarEq => "*=",
            SlashEq => "/=",
            PercentEq => "%=",
            StarStarEq => "**=",
            AmpEq => "&=",
            PipeEq => "|=",
            CaretEq => "^=",
            ShlEq => "<<=",
            ShrEq => ">>=",
            Increment => "++",
            Decrement => "--",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Percent => "%",
            StarStar => "**",
            Amp => "&",
            Pipe => "|",
            Caret => "^",
            Shl => "<<",
            Shr => ">>",
            EqEq => "==",
            NotEq => "!=",
            Less => "<",
            LessEq => "<=",
            Greater => ">",
            GreaterEq => ">=",
            AndAnd => "&&",
            OrOr => "||",
            Bang => "!",
        };
        Some(s)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "identifier '{}'", name),
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::String(s) => write!(f, "string {:?}", s),
            TokenKind::Eof => f.write_str("end of file"),
            fixed => match fixed.lexeme() {
                Some(s) => write!(f, "'{}'", s),
                None => f.write_str("token"),
            },
        }
    }
}

/// A token with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The type and semantic content of this token
    pub kind: TokenKind,

    /// Line number in the source file (1-based)
    pub line: usize,

    /// Column number in the source file (1-based)
    pub col: usize,
}

/// Position of a token within the token stream.
///
/// Opaque and totally ordered: a later token always has a greater index.
/// Diagnostics map it back to a line and column through the stream it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenIndex(usize);

impl TokenIndex {
    pub fn new(index: usize) -> Self {
        TokenIndex(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TokenIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
