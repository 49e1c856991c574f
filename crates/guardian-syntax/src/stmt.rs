//! Statement syntax tree.
//!
//! Nine statement shapes make up the tree. [`Stmt`] is the closed sum over them
//! and [`StmtKind`] is its tag; matching on either is exhaustive, so adding a
//! shape is a compile error in every consumer that has not handled it.
//!
//! Nodes are built only through the [`factory`](crate::factory) and expose
//! read-only accessors. Children are owned by value (`Box`/`Vec`), so a subtree
//! has exactly one parent and handing it to a second one does not compile:
//!
//! ```compile_fail
//! use guardian_syntax::{factory, Stmt};
//!
//! let inner = factory::block(Some(Vec::new())).unwrap();
//! let first = factory::block(Some(vec![Stmt::Block(inner)])).unwrap();
//! let second = factory::block(Some(vec![Stmt::Block(inner)])).unwrap();
//! ```

use std::fmt;

use crate::expr::{CallExpr, Expr};
use crate::token::TokenIndex;

/// Discriminant over the statement shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StmtKind {
    Assignment,
    Call,
    Return,
    Branch,
    If,
    CaseClause,
    Switch,
    Block,
    For,
}

impl StmtKind {
    pub const ALL: [StmtKind; 9] = [
        StmtKind::Assignment,
        StmtKind::Call,
        StmtKind::Return,
        StmtKind::Branch,
        StmtKind::If,
        StmtKind::CaseClause,
        StmtKind::Switch,
        StmtKind::Block,
        StmtKind::For,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StmtKind::Assignment => "assignment",
            StmtKind::Call => "call",
            StmtKind::Return => "return",
            StmtKind::Branch => "branch",
            StmtKind::If => "if",
            StmtKind::CaseClause => "case clause",
            StmtKind::Switch => "switch",
            StmtKind::Block => "block",
            StmtKind::For => "for",
        }
    }
}

impl fmt::Display for StmtKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a call statement runs its call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallModifier {
    /// Invoked in place.
    Plain,
    /// `defer`: runs when the enclosing scope exits.
    Deferred,
    /// `run`: launched as an independent unit of execution.
    Concurrent,
}

/// `a, b = x, y`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub(crate) left: Vec<Expr>,
    pub(crate) position: TokenIndex,
    pub(crate) right: Vec<Expr>,
}

impl Assignment {
    pub fn left(&self) -> &[Expr] {
        &self.left
    }

    /// Index of the assignment operator token.
    pub fn position(&self) -> TokenIndex {
        self.position
    }

    pub fn right(&self) -> &[Expr] {
        &self.right
    }
}

/// A call made for its effect, optionally deferred or launched concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct CallStmt {
    pub(crate) call: CallExpr,
    pub(crate) modifier: CallModifier,
}

impl CallStmt {
    pub fn call(&self) -> &CallExpr {
        &self.call
    }

    pub fn modifier(&self) -> CallModifier {
        self.modifier
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub(crate) results: Vec<Expr>,
}

impl ReturnStmt {
    pub fn results(&self) -> &[Expr] {
        &self.results
    }
}

/// `break`, `continue` or `goto label`.
///
/// The identifier is kept verbatim; whether it names an enclosing loop or a
/// label is decided during name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchStmt {
    pub(crate) identifier: String,
}

impl BranchStmt {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// What follows `else`.
#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    Block(Block),
    If(Box<IfStmt>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub(crate) init: Option<Box<Stmt>>,
    pub(crate) cond: Expr,
    pub(crate) body: Block,
    pub(crate) else_branch: Option<ElseBranch>,
}

impl IfStmt {
    pub fn init(&self) -> Option<&Stmt> {
        self.init.as_deref()
    }

    pub fn cond(&self) -> &Expr {
        &self.cond
    }

    pub fn body(&self) -> &Block {
        &self.body
    }

    pub fn else_branch(&self) -> Option<&ElseBranch> {
        self.else_branch.as_ref()
    }
}

/// One arm of a switch. An empty `cases` list marks the default arm.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseClause {
    pub(crate) cases: Vec<Expr>,
    pub(crate) block: Block,
}

impl CaseClause {
    pub fn cases(&self) -> &[Expr] {
        &self.cases
    }

    pub fn block(&self) -> &Block {
        &self.block
    }

    pub fn is_default(&self) -> bool {
        self.cases.is_empty()
    }
}

/// `switch [expr] { clauses }`
///
/// Without a subject the clauses hold boolean conditions. Clause order is match
/// order. More than one default clause is representable; rejecting it is left to
/// semantic analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStmt {
    pub(crate) switching_on: Option<Expr>,
    pub(crate) case_statements: Vec<CaseClause>,
}

impl SwitchStmt {
    pub fn switching_on(&self) -> Option<&Expr> {
        self.switching_on.as_ref()
    }

    pub fn case_statements(&self) -> &[CaseClause] {
        &self.case_statements
    }

    /// The first default clause, if any.
    pub fn default_clause(&self) -> Option<&CaseClause> {
        self.case_statements.iter().find(|c| c.is_default())
    }
}

/// Statements executed in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub(crate) statements: Vec<Stmt>,
}

impl Block {
    pub fn statements(&self) -> &[Stmt] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.statements.iter()
    }

    /// Gives up the block, yielding its statements in order.
    pub fn into_statements(self) -> Vec<Stmt> {
        self.statements
    }
}

impl<'a> IntoIterator for &'a Block {
    type Item = &'a Stmt;
    type IntoIter = std::slice::Iter<'a, Stmt>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

/// `for [init]; [cond]; [post] { block }`
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub(crate) init: Option<Box<Stmt>>,
    pub(crate) cond: Option<Expr>,
    pub(crate) post: Option<Box<Stmt>>,
    pub(crate) block: Block,
}

impl ForStmt {
    pub fn init(&self) -> Option<&Stmt> {
        self.init.as_deref()
    }

    pub fn cond(&self) -> Option<&Expr> {
        self.cond.as_ref()
    }

    pub fn post(&self) -> Option<&Stmt> {
        self.post.as_deref()
    }

    pub fn block(&self) -> &Block {
        &self.block
    }
}

/// A statement node of any shape.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assignment(Assignment),
    Call(CallStmt),
    Return(ReturnStmt),
    Branch(BranchStmt),
    If(IfStmt),
    CaseClause(CaseClause),
    Switch(SwitchStmt),
    Block(Block),
    For(ForStmt),
}

impl Stmt {
    pub fn kind(&self) -> StmtKind {
        match self {
            Stmt::Assignment(_) => StmtKind::Assignment,
            Stmt::Call(_) => StmtKind::Call,
            Stmt::Return(_) => StmtKind::Return,
            Stmt::Branch(_) => StmtKind::Branch,
            Stmt::If(_) => StmtKind::If,
            Stmt::CaseClause(_) => StmtKind::CaseClause,
            Stmt::Switch(_) => StmtKind::Switch,
            Stmt::Block(_) => StmtKind::Block,
            Stmt::For(_) => StmtKind::For,
        }
    }
}

macro_rules! impl_into_stmt {
    ($($node:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$node> for Stmt {
                fn from(node: $node) -> Self {
                    Stmt::$variant(node)
                }
            }
        )*
    };
}

impl_into_stmt! {
    Assignment => Assignment,
    CallStmt => Call,
    ReturnStmt => Return,
    BranchStmt => Branch,
    IfStmt => If,
    CaseClause => CaseClause,
    SwitchStmt => Switch,
    Block => Block,
    ForStmt => For,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_are_distinct() {
        let mut names: Vec<_> = StmtKind::ALL.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), StmtKind::ALL.len());
    }

    #[test]
    fn trees_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Stmt>();
        assert_send_sync::<Block>();
    }
}
