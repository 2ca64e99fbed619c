use super::*;
use crate::{Name, SourcePos, StringInterner};
use pretty_assertions::assert_eq;

#[test]
fn strictly_numeric_operators() {
    let numeric = [
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Pow,
        BinaryOp::Lt,
        BinaryOp::LtEq,
        BinaryOp::Gt,
        BinaryOp::GtEq,
    ];
    for op in numeric {
        assert!(op.is_strictly_numeric(), "{}", op.as_symbol());
    }
    for op in [BinaryOp::Add, BinaryOp::Eq, BinaryOp::And, BinaryOp::Is] {
        assert!(!op.is_strictly_numeric(), "{}", op.as_symbol());
    }
}

#[test]
fn only_logical_operators_short_circuit() {
    assert!(BinaryOp::And.is_short_circuit());
    assert!(BinaryOp::Or.is_short_circuit());
    assert!(!BinaryOp::Eq.is_short_circuit());
}

#[test]
fn pattern_bound_names_in_order() {
    let interner = StringInterner::new();
    let a = interner.intern("a");
    let b = interner.intern("b");

    let pattern = Pattern::List(vec![
        Pattern::Bind(a),
        Pattern::Wildcard,
        Pattern::List(vec![Pattern::Literal(Literal::Number(1.0)), Pattern::Bind(b)]),
    ]);

    assert_eq!(pattern.bound_names(), vec![a, b]);
    assert_eq!(Pattern::Wildcard.bound_names(), Vec::<Name>::new());
}

#[test]
fn function_defs_compare_structurally() {
    let interner = StringInterner::new();
    let f = interner.intern("f");
    let x = interner.intern("x");

    let body = || {
        Expr::synthetic(ExprKind::Binary {
            op: BinaryOp::Add,
            left: Box::new(Expr::synthetic(ExprKind::Ident(x))),
            right: Box::new(Expr::synthetic(ExprKind::Number(1.0))),
        })
    };

    let one = FunctionDef::new(f, vec![Pattern::Bind(x)], body());
    let two = FunctionDef::new(f, vec![Pattern::Bind(x)], body());
    let other = FunctionDef::new(f, vec![Pattern::Wildcard], body());

    assert_eq!(one, two);
    assert_ne!(one, other);
    assert_eq!(one.arity(), 1);
}

#[test]
fn position_display() {
    let interner = StringInterner::new();
    let pos = SourcePos::new(interner.intern("main.lingua"), 12);

    assert_eq!(pos.display(&interner).to_string(), "main.lingua:12");
    assert_eq!(SourcePos::NONE.display(&interner).to_string(), "<none>");
}
