//! Node factory: the only way to build statement nodes.
//!
//! There is one constructor per statement shape, taking exactly that shape's
//! fields. Required children that a parser might fail to produce are taken as
//! `Option`, and leaving one out is reported as a [`ConstructionError`] rather
//! than producing a half-built node. Optional fields take `None` for "absent".
//!
//! Constructors return the concrete node type so it can be slotted into a typed
//! parent (a [`Block`] into an `if`, a [`CaseClause`] into a `switch`); every node
//! converts into [`Stmt`] with `.into()`.
//!
//! ```rust
//! use guardian_syntax::factory;
//! use guardian_syntax::{BinaryOp, Expr, Stmt, StmtKind};
//!
//! let body = factory::block(Some(vec![])).unwrap();
//! let cond = Expr::binary(BinaryOp::Lt, Expr::ident("i"), Expr::Int(10));
//! let stmt: Stmt = factory::for_stmt(None, Some(cond), None, Some(body)).unwrap().into();
//! assert_eq!(stmt.kind(), StmtKind::For);
//!
//! let err = factory::for_stmt(None, None, None, None).unwrap_err();
//! assert_eq!(err.to_string(), "cannot build for statement: missing block");
//! ```

use crate::error::ConstructionError;
use crate::expr::{CallExpr, Expr};
use crate::stmt::*;
use crate::token::TokenIndex;

type Built<T> = Result<T, ConstructionError>;

/// `left = right`. Both sides need at least one expression.
pub fn assignment(left: Vec<Expr>, position: TokenIndex, right: Vec<Expr>) -> Built<Assignment> {
    if left.is_empty() {
        return Err(ConstructionError::missing(StmtKind::Assignment, "left"));
    }
    if right.is_empty() {
        return Err(ConstructionError::missing(StmtKind::Assignment, "right"));
    }
    Ok(Assignment {
        left,
        position,
        right,
    })
}

/// A call statement. Pass the result of [`Expr::into_call`] straight through;
/// a non-call operand comes back as a missing `call`.
pub fn call(call: Option<CallExpr>, modifier: CallModifier) -> Built<CallStmt> {
    let call = call.ok_or(ConstructionError::missing(StmtKind::Call, "call"))?;
    Ok(CallStmt { call, modifier })
}

pub fn return_stmt(results: Vec<Expr>) -> ReturnStmt {
    ReturnStmt { results }
}

pub fn branch(identifier: impl Into<String>) -> Built<BranchStmt> {
    let identifier = identifier.into();
    if identifier.is_empty() {
        return Err(ConstructionError::missing(StmtKind::Branch, "identifier"));
    }
    Ok(BranchStmt { identifier })
}

pub fn if_stmt(
    init: Option<Stmt>,
    cond: Option<Expr>,
    body: Option<Block>,
    else_branch: Option<ElseBranch>,
) -> Built<IfStmt> {
    let cond = cond.ok_or(ConstructionError::missing(StmtKind::If, "cond"))?;
    let body = body.ok_or(ConstructionError::missing(StmtKind::If, "body"))?;
    Ok(IfStmt {
        init: init.map(Box::new),
        cond,
        body,
        else_branch,
    })
}

/// A switch arm. An empty `cases` list builds the default arm.
pub fn case_clause(cases: Vec<Expr>, block: Option<Block>) -> Built<CaseClause> {
    let block = block.ok_or(ConstructionError::missing(StmtKind::CaseClause, "block"))?;
    Ok(CaseClause { cases, block })
}

pub fn switch(switching_on: Option<Expr>, case_statements: Vec<CaseClause>) -> SwitchStmt {
    SwitchStmt {
        switching_on,
        case_statements,
    }
}

/// A block over `statements`. An empty list is a valid empty block; `None` is not.
pub fn block(statements: Option<Vec<Stmt>>) -> Built<Block> {
    let statements = statements.ok_or(ConstructionError::missing(StmtKind::Block, "statements"))?;
    Ok(Block { statements })
}

/// Wraps a single statement as a block of one.
pub fn block_of(stmt: Stmt) -> Block {
    Block {
        statements: vec![stmt],
    }
}

pub fn for_stmt(
    init: Option<Stmt>,
    cond: Option<Expr>,
    post: Option<Stmt>,
    block: Option<Block>,
) -> Built<ForStmt> {
    let block = block.ok_or(ConstructionError::missing(StmtKind::For, "block"))?;
    Ok(ForStmt {
        init: init.map(Box::new),
        cond,
        post: post.map(Box::new),
        block,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::expr::BinaryOp;

    fn empty_block() -> Block {
        block(Some(Vec::new())).unwrap()
    }

    fn named_block(names: &[&str]) -> Block {
        let stmts = names.iter().map(|n| branch(*n).unwrap().into()).collect();
        block(Some(stmts)).unwrap()
    }

    fn call_expr(name: &str) -> CallExpr {
        Expr::call(Expr::ident(name), Vec::new()).into_call().unwrap()
    }

    fn identifiers(block: &Block) -> Vec<&str> {
        block
            .iter()
            .map(|s| match s {
                Stmt::Branch(b) => b.identifier(),
                other => panic!("unexpected {}", other.kind()),
            })
            .collect()
    }

    #[test]
    fn every_shape_reports_its_kind_and_keeps_its_fields() {
        let pos = TokenIndex::new(7);
        let assign = assignment(vec![Expr::ident("a")], pos, vec![Expr::Int(1)]).unwrap();
        assert_eq!(assign.left(), &[Expr::ident("a")]);
        assert_eq!(assign.right(), &[Expr::Int(1)]);
        assert_eq!(assign.position(), pos);

        let call_stmt = call(Some(call_expr("f")), CallModifier::Plain).unwrap();
        assert_eq!(call_stmt.call(), &call_expr("f"));

        let ret = return_stmt(vec![Expr::Int(2), Expr::Int(3)]);
        assert_eq!(ret.results(), &[Expr::Int(2), Expr::Int(3)]);

        let br = branch("outer").unwrap();
        assert_eq!(br.identifier(), "outer");

        let iff = if_stmt(None, Some(Expr::Bool(true)), Some(empty_block()), None).unwrap();
        assert_eq!(iff.cond(), &Expr::Bool(true));

        let clause = case_clause(vec![Expr::Int(1)], Some(empty_block())).unwrap();
        assert_eq!(clause.cases(), &[Expr::Int(1)]);

        let sw = switch(Some(Expr::ident("x")), vec![clause.clone()]);
        assert_eq!(sw.switching_on(), Some(&Expr::ident("x")));

        let blk = named_block(&["a"]);
        let fr = for_stmt(None, None, None, Some(empty_block())).unwrap();

        let built: Vec<Stmt> = vec![
            assign.into(),
            call_stmt.into(),
            ret.into(),
            br.into(),
            iff.into(),
            clause.into(),
            sw.into(),
            blk.into(),
            fr.into(),
        ];
        let kinds: Vec<StmtKind> = built.iter().map(Stmt::kind).collect();
        assert_eq!(kinds, StmtKind::ALL.to_vec());
    }

    #[test]
    fn if_accepts_init_and_else_in_any_combination() {
        for with_init in [false, true] {
            for with_else in [false, true] {
                let init = with_init.then(|| {
                    assignment(vec![Expr::ident("x")], TokenIndex::new(1), vec![Expr::Int(0)])
                        .unwrap()
                        .into()
                });
                let else_branch = with_else.then(|| ElseBranch::Block(empty_block()));
                let node =
                    if_stmt(init, Some(Expr::ident("ok")), Some(empty_block()), else_branch)
                        .unwrap();
                assert_eq!(node.init().is_some(), with_init);
                assert_eq!(node.else_branch().is_some(), with_else);
            }
        }
    }

    #[test]
    fn if_requires_cond_and_body() {
        let err = if_stmt(None, None, Some(empty_block()), None).unwrap_err();
        assert_eq!(err, ConstructionError::missing(StmtKind::If, "cond"));
        let err = if_stmt(None, Some(Expr::Bool(true)), None, None).unwrap_err();
        assert_eq!(err, ConstructionError::missing(StmtKind::If, "body"));
    }

    #[test]
    fn else_can_chain_into_another_if() {
        let inner = if_stmt(None, Some(Expr::ident("b")), Some(named_block(&["two"])), None).unwrap();
        let outer = if_stmt(
            None,
            Some(Expr::ident("a")),
            Some(named_block(&["one"])),
            Some(ElseBranch::If(Box::new(inner))),
        )
        .unwrap();
        match outer.else_branch() {
            Some(ElseBranch::If(nested)) => assert_eq!(identifiers(nested.body()), ["two"]),
            other => panic!("expected nested if, got {:?}", other),
        }
    }

    #[test]
    fn for_accepts_all_optional_combinations() {
        for mask in 0u8..8 {
            let init = (mask & 1 != 0).then(|| {
                assignment(vec![Expr::ident("i")], TokenIndex::new(1), vec![Expr::Int(0)])
                    .unwrap()
                    .into()
            });
            let cond = (mask & 2 != 0)
                .then(|| Expr::binary(BinaryOp::Lt, Expr::ident("i"), Expr::Int(3)));
            let post = (mask & 4 != 0).then(|| {
                let inc = Expr::binary(BinaryOp::Add, Expr::ident("i"), Expr::Int(1));
                assignment(vec![Expr::ident("i")], TokenIndex::new(9), vec![inc])
                    .unwrap()
                    .into()
            });
            let node = for_stmt(init, cond, post, Some(empty_block())).unwrap();
            assert_eq!(node.init().is_some(), mask & 1 != 0);
            assert_eq!(node.cond().is_some(), mask & 2 != 0);
            assert_eq!(node.post().is_some(), mask & 4 != 0);
        }
    }

    #[test]
    fn absent_is_not_the_same_as_empty() {
        let with_true = for_stmt(None, Some(Expr::Bool(true)), None, Some(empty_block())).unwrap();
        let without = for_stmt(None, None, None, Some(empty_block())).unwrap();
        assert_ne!(with_true, without);
        assert_eq!(without.cond(), None);
    }

    #[test]
    fn for_without_block_fails() {
        let init = assignment(vec![Expr::ident("i")], TokenIndex::new(1), vec![Expr::Int(0)])
            .unwrap()
            .into();
        let err = for_stmt(Some(init), Some(Expr::Bool(true)), None, None).unwrap_err();
        assert_eq!(err, ConstructionError::missing(StmtKind::For, "block"));
    }

    #[test]
    fn block_without_sequence_fails_but_empty_is_fine() {
        assert_eq!(
            block(None).unwrap_err(),
            ConstructionError::missing(StmtKind::Block, "statements")
        );
        assert!(block(Some(Vec::new())).unwrap().is_empty());
    }

    #[test]
    fn block_preserves_order() {
        let b = named_block(&["a", "b", "c"]);
        assert_eq!(identifiers(&b), ["a", "b", "c"]);
        assert_eq!(b.len(), 3);
    }

    #[test]
    fn block_of_wraps_single_statement() {
        let b = block_of(branch("continue").unwrap().into());
        assert_eq!(identifiers(&b), ["continue"]);
    }

    #[test]
    fn switch_preserves_clause_order_and_finds_default() {
        let c1 = case_clause(vec![Expr::Int(1)], Some(named_block(&["one"]))).unwrap();
        let c2 = case_clause(vec![Expr::Int(2), Expr::Int(3)], Some(named_block(&["two"]))).unwrap();
        let default = case_clause(Vec::new(), Some(named_block(&["other"]))).unwrap();
        let sw = switch(Some(Expr::ident("x")), vec![c1, c2, default]);

        let order: Vec<&str> = sw
            .case_statements()
            .iter()
            .map(|c| identifiers(c.block())[0])
            .collect();
        assert_eq!(order, ["one", "two", "other"]);

        let default = sw.default_clause().expect("default clause");
        assert!(default.is_default());
        assert!(default.cases().is_empty());
        assert!(!sw.case_statements()[0].is_default());
    }

    #[test]
    fn switch_without_subject_and_repeated_defaults_are_representable() {
        let d1 = case_clause(Vec::new(), Some(empty_block())).unwrap();
        let d2 = case_clause(Vec::new(), Some(empty_block())).unwrap();
        let sw = switch(None, vec![d1, d2]);
        assert_eq!(sw.switching_on(), None);
        assert_eq!(sw.case_statements().iter().filter(|c| c.is_default()).count(), 2);
    }

    #[test]
    fn case_clause_requires_block() {
        let err = case_clause(vec![Expr::Int(1)], None).unwrap_err();
        assert_eq!(err, ConstructionError::missing(StmtKind::CaseClause, "block"));
    }

    #[test]
    fn call_keeps_exactly_one_modifier() {
        for modifier in [CallModifier::Plain, CallModifier::Deferred, CallModifier::Concurrent] {
            let node = call(Some(call_expr("close")), modifier).unwrap();
            assert_eq!(node.modifier(), modifier);
        }
        let deferred = call(Some(call_expr("close")), CallModifier::Deferred).unwrap();
        assert_ne!(deferred.modifier(), CallModifier::Plain);
        assert_ne!(deferred.modifier(), CallModifier::Concurrent);
    }

    #[test]
    fn call_without_call_expression_fails() {
        let err = call(Expr::ident("x").into_call(), CallModifier::Deferred).unwrap_err();
        assert_eq!(err, ConstructionError::missing(StmtKind::Call, "call"));
    }

    #[test]
    fn assignment_needs_both_sides() {
        let pos = TokenIndex::new(0);
        assert_eq!(
            assignment(Vec::new(), pos, vec![Expr::Int(1)]).unwrap_err(),
            ConstructionError::missing(StmtKind::Assignment, "left")
        );
        assert_eq!(
            assignment(vec![Expr::ident("a")], pos, Vec::new()).unwrap_err(),
            ConstructionError::missing(StmtKind::Assignment, "right")
        );
    }

    #[test]
    fn branch_requires_a_name() {
        assert_eq!(
            branch("").unwrap_err(),
            ConstructionError::missing(StmtKind::Branch, "identifier")
        );
    }

    #[test]
    fn return_may_be_empty() {
        assert!(return_stmt(Vec::new()).results().is_empty());
    }

    #[test]
    fn cloned_tree_compares_equal_to_original() {
        let inner = named_block(&["a"]);
        let outer = block(Some(vec![inner.into()])).unwrap();
        let copy = outer.clone();
        assert_eq!(outer, copy);
        match &outer.statements()[0] {
            Stmt::Block(b) => assert_eq!(identifiers(b), ["a"]),
            other => panic!("unexpected {}", other.kind()),
        }
    }
}
