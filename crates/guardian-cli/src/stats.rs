//! Per-kind node counts over a parsed program.

use std::collections::BTreeMap;
use std::fmt;

use guardian_syntax::{Block, ElseBranch, IfStmt, Stmt, StmtKind};

/// Counts of every statement node reachable from a program, the root block excluded.
///
/// Bodies held directly by `if`, `for` and case clauses are counted as blocks.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct KindCounts {
    counts: BTreeMap<StmtKind, usize>,
}

impl KindCounts {
    pub fn of_program(program: &Block) -> Self {
        let mut counts = KindCounts::default();
        for stmt in program {
            counts.visit_stmt(stmt);
        }
        counts
    }

    pub fn get(&self, kind: StmtKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    fn bump(&mut self, kind: StmtKind) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    fn visit_block(&mut self, block: &Block) {
        self.bump(StmtKind::Block);
        for stmt in block {
            self.visit_stmt(stmt);
        }
    }

    fn visit_if(&mut self, node: &IfStmt) {
        self.bump(StmtKind::If);
        if let Some(init) = node.init() {
            self.visit_stmt(init);
        }
        self.visit_block(node.body());
        match node.else_branch() {
            Some(ElseBranch::Block(block)) => self.visit_block(block),
            Some(ElseBranch::If(elif)) => self.visit_if(elif),
            None => {}
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Assignment(_) | Stmt::Call(_) | Stmt::Return(_) | Stmt::Branch(_) => {
                self.bump(stmt.kind())
            }
            Stmt::If(node) => self.visit_if(node),
            Stmt::CaseClause(clause) => {
                self.bump(StmtKind::CaseClause);
                self.visit_block(clause.block());
            }
            Stmt::Switch(node) => {
                self.bump(StmtKind::Switch);
                for clause in node.case_statements() {
                    self.bump(StmtKind::CaseClause);
                    self.visit_block(clause.block());
                }
            }
            Stmt::Block(block) => self.visit_block(block),
            Stmt::For(node) => {
                self.bump(StmtKind::For);
                if let Some(init) = node.init() {
                    self.visit_stmt(init);
                }
                if let Some(post) = node.post() {
                    self.visit_stmt(post);
                }
                self.visit_block(node.block());
            }
        }
    }
}

impl fmt::Display for KindCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = StmtKind::ALL.iter().map(|k| k.name().len()).max().unwrap_or(0);
        for kind in StmtKind::ALL {
            writeln!(f, "  {:<width$}  {}", kind.name(), self.get(kind), width = width)?;
        }
        Ok(())
    }
}
