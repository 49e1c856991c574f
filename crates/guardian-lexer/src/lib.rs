//! Guardian lexer: converts source text into tokens.
use guardian_syntax::error::{error_at, Error, Result};
use guardian_syntax::token::{Token, TokenKind};

/// Streaming character scanner that produces tokens with positions.
pub struct Lexer {
    src: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    /// Create a new lexer over the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            src: input.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }
    fn peek_next(&self) -> Option<char> {
        self.src.get(self.pos + 1).copied()
    }
    fn advance(&mut self) -> Option<char> {
        let ch = self.src.get(self.pos).copied();
        if let Some(c) = ch {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        ch
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else if c == '/' && self.peek_next() == Some('/') {
                while let Some(c2) = self.peek() {
                    if c2 == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self, line: usize, col: usize) -> Result<TokenKind> {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
        let val: i64 = s
            .parse()
            .map_err(|_| Error::with_span("Invalid number", line, col))?;
        Ok(TokenKind::Number(val))
    }

    fn read_ident_or_keyword(&mut self) -> TokenKind {
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                s.push(c);
                self.advance();
            } else {
                break;
            }
        }
        TokenKind::keyword(&s).unwrap_or(TokenKind::Ident(s))
    }

    fn read_string(&mut self, line: usize, col: usize) -> Result<TokenKind> {
        let mut s = String::new();
        while let Some(c) = self.advance() {
            match c {
                '"' => return Ok(TokenKind::String(s)),
                '\\' => match self.advance() {
                    Some(n) => s.push(match n {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        other => other,
                    }),
                    None => break,
                },
                '\n' => break,
                other => s.push(other),
            }
        }
        error_at(line, col, "Unterminated string")
    }

    /// Consumes the current character and, if the next one is `second`, that too.
    fn one_or_two(&mut self, second: char, single: TokenKind, double: TokenKind) -> TokenKind {
        self.advance();
        if self.peek() == Some(second) {
            self.advance();
            double
        } else {
            single
        }
    }

    /// Tokenize the entire input into a vector of tokens ending with Eof.
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let line = self.line;
            let col = self.col;
            let Some(c) = self.peek() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    line,
                    col,
                });
                break;
            };
            let kind = match c {
                '(' | ')' | '[' | ']' | '{' | '}' | ',' | ':' | ';' | '.' => {
                    self.advance();
                    match c {
                        '(' => TokenKind::LParen,
                        ')' => TokenKind::RParen,
                        '[' => TokenKind::LBracket,
                        ']' => TokenKind::RBracket,
                        '{' => TokenKind::LBrace,
                        '}' => TokenKind::RBrace,
                        ',' => TokenKind::Comma,
                        ':' => TokenKind::Colon,
                        ';' => TokenKind::Semicolon,
                        _ => TokenKind::Dot,
                    }
                }
                '+' if self.peek_next() == Some('+') => {
                    self.advance();
                    self.advance();
                    TokenKind::Increment
                }
                '-' if self.peek_next() == Some('-') => {
                    self.advance();
                    self.advance();
                    TokenKind::Decrement
                }
                '+' => self.one_or_two('=', TokenKind::Plus, TokenKind::PlusEq),
                '-' => self.one_or_two('=', TokenKind::Minus, TokenKind::MinusEq),
                '*' if self.peek_next() == Some('*') => {
                    self.advance();
                    self.one_or_two('=', TokenKind::StarStar, TokenKind::StarStarEq)
                }
                '*' => self.one_or_two('=', TokenKind::Star, TokenKind::StarEq),
                '/' => self.one_or_two('=', TokenKind::Slash, TokenKind::SlashEq),
                '%' => self.one_or_two('=', TokenKind::Percent, TokenKind::PercentEq),
                '=' => self.one_or_two('=', TokenKind::Equal, TokenKind::EqEq),
                '!' => self.one_or_two('=', TokenKind::Bang, TokenKind::NotEq),
                '<' if self.peek_next() == Some('<') => {
                    self.advance();
                    self.one_or_two('=', TokenKind::Shl, TokenKind::ShlEq)
                }
                '>' if self.peek_next() == Some('>') => {
                    self.advance();
                    self.one_or_two('=', TokenKind::Shr, TokenKind::ShrEq)
                }
                '<' => self.one_or_two('=', TokenKind::Less, TokenKind::LessEq),
                '>' => self.one_or_two('=', TokenKind::Greater, TokenKind::GreaterEq),
                '&' if self.peek_next() == Some('&') => {
                    self.advance();
                    self.advance();
                    TokenKind::AndAnd
                }
                '|' if self.peek_next() == Some('|') => {
                    self.advance();
                    self.advance();
                    TokenKind::OrOr
                }
                '&' => self.one_or_two('=', TokenKind::Amp, TokenKind::AmpEq),
                '|' => self.one_or_two('=', TokenKind::Pipe, TokenKind::PipeEq),
                '^' => self.one_or_two('=', TokenKind::Caret, TokenKind::CaretEq),
                '"' => {
                    self.advance();
                    self.read_string(line, col)?
                }
                c if c.is_ascii_digit() => self.read_number(line, col)?,
                c if c.is_ascii_alphabetic() || c == '_' => self.read_ident_or_keyword(),
                other => {
                    return error_at(line, col, format!("Unexpected character '{}'", other));
                }
            };
            tokens.push(Token { kind, line, col });
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src)
            .tokenize()
            .expect("Lexing should succeed")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("if elif else switch case default defer run goto owner"),
            vec![
                TokenKind::If,
                TokenKind::Elif,
                TokenKind::Else,
                TokenKind::Switch,
                TokenKind::Case,
                TokenKind::Default,
                TokenKind::Defer,
                TokenKind::Run,
                TokenKind::Goto,
                TokenKind::Ident("owner".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_assignment_operators() {
        assert_eq!(
            kinds("= += -= *= /= %= ++ --"),
            vec![
                TokenKind::Equal,
                TokenKind::PlusEq,
                TokenKind::MinusEq,
                TokenKind::StarEq,
                TokenKind::SlashEq,
                TokenKind::PercentEq,
                TokenKind::Increment,
                TokenKind::Decrement,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comparison_and_logic() {
        assert_eq!(
            kinds("== != < <= > >= && || !"),
            vec![
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::Less,
                TokenKind::LessEq,
                TokenKind::Greater,
                TokenKind::GreaterEq,
                TokenKind::AndAnd,
                TokenKind::OrOr,
                TokenKind::Bang,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_bitwise_shift_and_power_operators() {
        assert_eq!(
            kinds("& | ^ << >> ** &= |= ^= <<= >>= **="),
            vec![
                TokenKind::Amp,
                TokenKind::Pipe,
                TokenKind::Caret,
                TokenKind::Shl,
                TokenKind::Shr,
                TokenKind::StarStar,
                TokenKind::AmpEq,
                TokenKind::PipeEq,
                TokenKind::CaretEq,
                TokenKind::ShlEq,
                TokenKind::ShrEq,
                TokenKind::StarStarEq,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("a<<=b>=c"),
            vec![
                TokenKind::Ident("a".to_string()),
                TokenKind::ShlEq,
                TokenKind::Ident("b".to_string()),
                TokenKind::GreaterEq,
                TokenKind::Ident("c".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(
            kinds(r#"42 "a\"b\n""#),
            vec![
                TokenKind::Number(42),
                TokenKind::String("a\"b\n".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("x // trailing words\n/ y"),
            vec![
                TokenKind::Ident("x".to_string()),
                TokenKind::Slash,
                TokenKind::Ident("y".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_positions() {
        let tokens = Lexer::new("a\n  b += 1").tokenize().unwrap();
        let positions: Vec<(usize, usize)> = tokens.iter().map(|t| (t.line, t.col)).collect();
        assert_eq!(positions, vec![(1, 1), (2, 3), (2, 5), (2, 8), (2, 9)]);
    }

    #[test]
    fn test_errors_carry_location() {
        let err = Lexer::new("x = \"open").tokenize().unwrap_err();
        assert_eq!(err.msg, "Unterminated string");
        assert_eq!((err.line, err.col), (Some(1), Some(5)));

        let err = Lexer::new("a $ b").tokenize().unwrap_err();
        assert_eq!(err.msg, "Unexpected character '$'");
        assert_eq!((err.line, err.col), (Some(1), Some(3)));

        let err = Lexer::new("\n  @").tokenize().unwrap_err();
        assert_eq!(err.msg, "Unexpected character '@'");
        assert_eq!((err.line, err.col), (Some(2), Some(3)));

        let err = Lexer::new("99999999999999999999").tokenize().unwrap_err();
        assert_eq!(err.msg, "Invalid number");
    }
}
