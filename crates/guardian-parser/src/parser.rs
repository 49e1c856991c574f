//! Recursive-descent parser producing the statement tree.
//!
//! Every statement is assembled through [`guardian_syntax::factory`]; when the
//! factory refuses a node its error is pinned to the token that started the
//! construct and returned like any other parse error.

use guardian_syntax::error::{error_at, ConstructionError, Error, Result};
use guardian_syntax::factory;
use guardian_syntax::{
    BinaryOp, Block, CallModifier, ElseBranch, Expr, IfStmt, Stmt, Token, TokenIndex, TokenKind,
};
use tracing::{debug, trace};

/// The operator a compound assignment like `x <<= n` applies before storing.
fn compound_op(kind: &TokenKind) -> Option<BinaryOp> {
    let op = match kind {
        TokenKind::PlusEq => BinaryOp::Add,
        TokenKind::MinusEq => BinaryOp::Sub,
        TokenKind::StarEq => BinaryOp::Mul,
        TokenKind::SlashEq => BinaryOp::Div,
        TokenKind::PercentEq => BinaryOp::Rem,
        TokenKind::StarStarEq => BinaryOp::Pow,
        TokenKind::AmpEq => BinaryOp::BitAnd,
        TokenKind::PipeEq => BinaryOp::BitOr,
        TokenKind::CaretEq => BinaryOp::BitXor,
        TokenKind::ShlEq => BinaryOp::Shl,
        TokenKind::ShrEq => BinaryOp::Shr,
        _ => return None,
    };
    Some(op)
}

/// What a loop or `if` header clause turned out to be.
enum Clause {
    Stmt(Stmt),
    Expr(Expr, Token),
}

/// Parser over a token stream ending in `Eof`.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Line of the last consumed token.
    prev_line: usize,
}

impl Parser {
    /// Create a parser. A missing trailing `Eof` is supplied.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| &t.kind) != Some(&TokenKind::Eof) {
            let (line, col) = tokens.last().map_or((1, 1), |t| (t.line, t.col));
            tokens.push(Token {
                kind: TokenKind::Eof,
                line,
                col,
            });
        }
        Self {
            tokens,
            pos: 0,
            prev_line: 0,
        }
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub(crate) fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    pub(crate) fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if tok.kind != TokenKind::Eof {
            self.pos += 1;
            self.prev_line = tok.line;
        }
        tok
    }

    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            let found = self.peek();
            error_at(
                found.line,
                found.col,
                format!("Expected {}, found {}", kind, found.kind),
            )
        }
    }

    pub(crate) fn error_here<T>(&self, msg: impl Into<String>) -> Result<T> {
        let tok = self.peek();
        error_at(tok.line, tok.col, msg)
    }

    /// Whether the next token sits on the line of the last consumed one.
    pub(crate) fn continues_line(&self) -> bool {
        self.peek().line == self.prev_line
    }

    /// A statement ends at `;`, a newline, a closing `}` or the end of input.
    fn expect_stmt_end(&mut self) -> Result<()> {
        if self.eat(&TokenKind::Semicolon)
            || matches!(self.peek_kind(), TokenKind::RBrace | TokenKind::Eof)
            || !self.continues_line()
        {
            return Ok(());
        }
        self.error_here(format!(
            "Expected ';' or newline after statement, found {}",
            self.peek_kind()
        ))
    }

    fn index(&self) -> TokenIndex {
        TokenIndex::new(self.pos)
    }

    /// Pins a factory failure to the token that opened the construct.
    fn built<T>(at: &Token, node: std::result::Result<T, ConstructionError>) -> Result<T> {
        node.map_err(|e| Error::from(e).located(at.line, at.col))
    }

    /// Parse a whole source file as a top-level block.
    pub fn parse_program(&mut self) -> Result<Block> {
        let mut statements = Vec::new();
        while !self.check(&TokenKind::Eof) {
            statements.push(self.parse_stmt()?);
        }
        debug!(statements = statements.len(), "parsed program");
        Ok(factory::block(Some(statements))?)
    }

    /// Parse one statement and its terminator.
    pub fn parse_stmt(&mut self) -> Result<Stmt> {
        let start = self.peek().clone();
        let stmt = match &start.kind {
            TokenKind::If => self.parse_if()?.into(),
            TokenKind::Elif => return self.error_here("'elif' without a preceding 'if'"),
            TokenKind::Else => return self.error_here("'else' without a preceding 'if'"),
            TokenKind::For => self.parse_for()?,
            TokenKind::Switch => self.parse_switch()?,
            TokenKind::LBrace => self.parse_block()?.into(),
            TokenKind::Case | TokenKind::Default => {
                return self.error_here(format!("{} outside of switch", start.kind));
            }
            _ => self.parse_simple_line()?,
        };
        self.expect_stmt_end()?;
        trace!(kind = %stmt.kind(), line = start.line, col = start.col, "parsed statement");
        Ok(stmt)
    }

    /// Statements that end at a `;` or the end of the line; the caller checks
    /// the terminator.
    fn parse_simple_line(&mut self) -> Result<Stmt> {
        let start = self.peek().clone();
        match &start.kind {
            TokenKind::Return => {
                self.advance();
                let results = if self.starts_expr() && self.peek().line == start.line {
                    self.parse_expr_list()?
                } else {
                    Vec::new()
                };
                Ok(factory::return_stmt(results).into())
            }
            TokenKind::Break | TokenKind::Continue => {
                self.advance();
                let keyword = start.kind.lexeme().unwrap_or_default();
                Ok(Self::built(&start, factory::branch(keyword))?.into())
            }
            TokenKind::Goto => {
                self.advance();
                let label = match self.advance() {
                    Token {
                        kind: TokenKind::Ident(name),
                        ..
                    } => name,
                    other => {
                        return error_at(
                            other.line,
                            other.col,
                            format!("Expected label after 'goto', found {}", other.kind),
                        );
                    }
                };
                Ok(Self::built(&start, factory::branch(label))?.into())
            }
            TokenKind::Defer | TokenKind::Run => {
                self.advance();
                let modifier = if start.kind == TokenKind::Defer {
                    CallModifier::Deferred
                } else {
                    CallModifier::Concurrent
                };
                let call = self.parse_expr()?.into_call();
                Ok(Self::built(&start, factory::call(call, modifier))?.into())
            }
            _ => self.parse_simple_stmt(),
        }
    }

    /// Assignment or call statement, as allowed in loop and `if` headers.
    pub(crate) fn parse_simple_stmt(&mut self) -> Result<Stmt> {
        let start = self.peek().clone();
        let exprs = self.parse_expr_list()?;
        self.finish_simple_stmt(start, exprs)
    }

    fn finish_simple_stmt(&mut self, start: Token, mut left: Vec<Expr>) -> Result<Stmt> {
        let op_tok = self.peek().clone();
        let position = self.index();
        let compound = match op_tok.kind {
            TokenKind::Equal => {
                self.advance();
                let right = self.parse_expr_list()?;
                return Ok(Self::built(&start, factory::assignment(left, position, right))?.into());
            }
            TokenKind::Increment | TokenKind::Decrement => None,
            ref kind => match compound_op(kind) {
                Some(op) => Some(op),
                None => {
                    if left.len() == 1 && left[0].is_call() {
                        let call = left.pop().and_then(Expr::into_call);
                        return Ok(
                            Self::built(&start, factory::call(call, CallModifier::Plain))?.into(),
                        );
                    }
                    return error_at(start.line, start.col, "Expression is not a statement");
                }
            },
        };
        self.advance();
        if left.len() != 1 {
            return error_at(
                op_tok.line,
                op_tok.col,
                format!("{} applies to a single target", op_tok.kind),
            );
        }
        let target = left.remove(0);
        let value = match compound {
            Some(op) => {
                let rhs = self.parse_expr()?;
                Expr::binary(op, target.clone(), rhs)
            }
            None => {
                let op = if op_tok.kind == TokenKind::Increment {
                    BinaryOp::Add
                } else {
                    BinaryOp::Sub
                };
                Expr::binary(op, target.clone(), Expr::Int(1))
            }
        };
        Ok(Self::built(&start, factory::assignment(vec![target], position, vec![value]))?.into())
    }

    /// Parses a header clause that may be either a simple statement or a bare
    /// expression; which one is only known after the expression list.
    fn parse_clause(&mut self) -> Result<Clause> {
        let start = self.peek().clone();
        let mut exprs = self.parse_expr_list()?;
        let is_assign = matches!(
            self.peek_kind(),
            TokenKind::Equal | TokenKind::Increment | TokenKind::Decrement
        ) || compound_op(self.peek_kind()).is_some();
        if is_assign {
            return Ok(Clause::Stmt(self.finish_simple_stmt(start, exprs)?));
        }
        match exprs.len() {
            1 => Ok(Clause::Expr(exprs.remove(0), start)),
            _ => error_at(start.line, start.col, "Expected a single expression"),
        }
    }

    fn clause_into_stmt(&mut self, clause: Clause) -> Result<Stmt> {
        match clause {
            Clause::Stmt(stmt) => Ok(stmt),
            Clause::Expr(expr, start) => self.finish_simple_stmt(start, vec![expr]),
        }
    }

    /// `if [init;] cond { } (elif cond { })* [else (if ... | { })]`
    fn parse_if(&mut self) -> Result<IfStmt> {
        let keyword = self.advance();
        let mut init = None;
        let mut cond = None;
        if !self.check(&TokenKind::LBrace) {
            let clause = self.parse_clause()?;
            if matches!(clause, Clause::Stmt(_)) || self.check(&TokenKind::Semicolon) {
                self.expect(TokenKind::Semicolon)?;
                init = Some(self.clause_into_stmt(clause)?);
                if !self.check(&TokenKind::LBrace) {
                    cond = Some(self.parse_expr()?);
                }
            } else if let Clause::Expr(expr, _) = clause {
                cond = Some(expr);
            }
        }
        let body = self.parse_block()?;
        let else_branch = match self.peek_kind() {
            TokenKind::Elif => Some(ElseBranch::If(Box::new(self.parse_if()?))),
            TokenKind::Else => {
                self.advance();
                if self.check(&TokenKind::If) {
                    Some(ElseBranch::If(Box::new(self.parse_if()?)))
                } else {
                    Some(ElseBranch::Block(self.parse_block()?))
                }
            }
            _ => None,
        };
        Self::built(&keyword, factory::if_stmt(init, cond, Some(body), else_branch))
    }

    /// `for { }`, `for cond { }` or `for [init]; [cond]; [post] { }`
    fn parse_for(&mut self) -> Result<Stmt> {
        let keyword = self.advance();
        let mut init = None;
        let mut cond = None;
        let mut post = None;
        if !self.check(&TokenKind::LBrace) {
            let first = if self.check(&TokenKind::Semicolon) {
                None
            } else {
                Some(self.parse_clause()?)
            };
            if self.eat(&TokenKind::Semicolon) {
                init = first.map(|c| self.clause_into_stmt(c)).transpose()?;
                if !self.check(&TokenKind::Semicolon) {
                    cond = Some(self.parse_expr()?);
                }
                self.expect(TokenKind::Semicolon)?;
                if !self.check(&TokenKind::LBrace) {
                    post = Some(self.parse_simple_stmt()?);
                }
            } else {
                match first {
                    Some(Clause::Expr(expr, _)) => cond = Some(expr),
                    _ => return self.error_here("Expected ';' after for-loop initializer"),
                }
            }
        }
        let block = self.parse_block()?;
        Ok(Self::built(&keyword, factory::for_stmt(init, cond, post, Some(block)))?.into())
    }

    /// `switch [subject] { case a, b: ... default: ... }`
    fn parse_switch(&mut self) -> Result<Stmt> {
        self.advance();
        let switching_on = if self.check(&TokenKind::LBrace) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let open = self.expect(TokenKind::LBrace)?;
        let mut clauses = Vec::new();
        loop {
            let label = self.peek().clone();
            let cases = match label.kind {
                TokenKind::RBrace => break,
                TokenKind::Case => {
                    self.advance();
                    self.parse_expr_list()?
                }
                TokenKind::Default => {
                    self.advance();
                    Vec::new()
                }
                TokenKind::Eof => {
                    return error_at(open.line, open.col, "Unterminated switch body");
                }
                ref other => {
                    return self.error_here(format!("Expected 'case' or 'default', found {}", other));
                }
            };
            self.expect(TokenKind::Colon)?;
            let mut statements = Vec::new();
            while !matches!(
                self.peek_kind(),
                TokenKind::Case | TokenKind::Default | TokenKind::RBrace | TokenKind::Eof
            ) {
                statements.push(self.parse_stmt()?);
            }
            let block = Self::built(&label, factory::block(Some(statements)))?;
            clauses.push(Self::built(&label, factory::case_clause(cases, Some(block)))?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(factory::switch(switching_on, clauses).into())
    }

    /// `{ statements }`
    pub(crate) fn parse_block(&mut self) -> Result<Block> {
        let open = self.expect(TokenKind::LBrace)?;
        let mut statements = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            if self.check(&TokenKind::Eof) {
                return error_at(
                    open.line,
                    open.col,
                    format!("Unclosed block opened at {}:{}", open.line, open.col),
                );
            }
            statements.push(self.parse_stmt()?);
        }
        self.advance();
        Self::built(&open, factory::block(Some(statements)))
    }
}
