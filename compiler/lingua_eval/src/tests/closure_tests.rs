//! Lexical scoping through captured frames.

use lingua_ir::BinaryOp;
use pretty_assertions::assert_eq;

use super::fixture::{bin, block, call, if_, nil, num, while_, Fixture};
use crate::Value;

fn n(x: f64) -> Value {
    Value::Number(x)
}

#[test]
fn returned_lambda_keeps_defining_frame() {
    let mut f = Fixture::new();
    let script = vec![
        f.func(
            "make_adder",
            f.binds(&["n"]),
            f.lambda(f.binds(&["x"]), bin(BinaryOp::Add, f.ident("x"), f.ident("n"))),
        ),
        f.let_("add5", f.call_named("make_adder", vec![num(5.0)])),
        f.call_named("add5", vec![num(3.0)]),
    ];
    assert_eq!(f.run(script).unwrap(), n(8.0));
}

#[test]
fn counters_share_state_per_closure() {
    let mut f = Fixture::new();
    let bump = block(vec![
        f.assign("count", bin(BinaryOp::Add, f.ident("count"), num(1.0))),
        f.ident("count"),
    ]);
    let script = vec![
        f.func(
            "make_counter",
            vec![],
            block(vec![f.let_("count", num(0.0)), f.lambda(vec![], bump)]),
        ),
        f.let_("a", f.call_named("make_counter", vec![])),
        f.let_("b", f.call_named("make_counter", vec![])),
        f.call_named("a", vec![]),
        f.call_named("a", vec![]),
        f.call_named("b", vec![]),
    ];
    assert_eq!(f.run(script).unwrap(), n(1.0));
    assert_eq!(f.run(vec![f.call_named("a", vec![])]).unwrap(), n(3.0));
}

#[test]
fn closure_over_loop_variable_captures_each_iteration() {
    let mut f = Fixture::new();
    let body = block(vec![
        f.let_("j", f.ident("i")),
        if_(
            bin(BinaryOp::Eq, f.ident("j"), num(0.0)),
            f.assign("first", f.lambda(vec![], f.ident("j"))),
            Some(f.assign("second", f.lambda(vec![], f.ident("j")))),
        ),
        f.assign("i", bin(BinaryOp::Add, f.ident("i"), num(1.0))),
    ]);
    let script = vec![
        f.let_("i", num(0.0)),
        f.let_("first", nil()),
        f.let_("second", nil()),
        while_(bin(BinaryOp::Lt, f.ident("i"), num(2.0)), body),
        bin(
            BinaryOp::Add,
            f.call_named("first", vec![]),
            bin(BinaryOp::Mul, f.call_named("second", vec![]), num(10.0)),
        ),
    ];
    assert_eq!(f.run(script).unwrap(), n(10.0));
}

#[test]
fn free_variables_resolve_at_call_time() {
    let mut f = Fixture::new();
    let script = vec![
        f.func("read_later", vec![], f.ident("later")),
        f.let_("later", num(1.0)),
        f.call_named("read_later", vec![]),
    ];
    assert_eq!(f.run(script).unwrap(), n(1.0));
}

#[test]
fn recursive_lambda_through_binding() {
    let mut f = Fixture::new();
    let minus = |f: &Fixture, k: f64| bin(BinaryOp::Sub, f.ident("n"), num(k));
    let fib_body = if_(
        bin(BinaryOp::Lt, f.ident("n"), num(2.0)),
        f.ident("n"),
        Some(bin(
            BinaryOp::Add,
            f.call_named("fib", vec![minus(&f, 1.0)]),
            f.call_named("fib", vec![minus(&f, 2.0)]),
        )),
    );
    let script = vec![
        f.let_("fib", f.lambda(f.binds(&["n"]), fib_body)),
        f.call_named("fib", vec![num(10.0)]),
    ];
    assert_eq!(f.run(script).unwrap(), n(55.0));
}

#[test]
fn assignment_in_closure_updates_defining_scope() {
    let mut f = Fixture::new();
    let script = vec![
        f.let_("x", num(1.0)),
        f.func("set", vec![], f.assign("x", num(2.0))),
        f.call_named("set", vec![]),
        f.ident("x"),
    ];
    assert_eq!(f.run(script).unwrap(), n(2.0));
}

#[test]
fn nested_function_sees_enclosing_parameters() {
    let mut f = Fixture::new();
    let outer_body = block(vec![
        f.func(
            "inner",
            f.binds(&["b"]),
            bin(BinaryOp::Add, f.ident("a"), f.ident("b")),
        ),
        f.call_named("inner", vec![num(10.0)]),
    ]);
    let script = vec![
        f.func("outer", f.binds(&["a"]), outer_body),
        f.call_named("outer", vec![num(1.0)]),
    ];
    assert_eq!(f.run(script).unwrap(), n(11.0));
}

#[test]
fn immediately_invoked_lambda() {
    let mut f = Fixture::new();
    let script = vec![call(
        f.lambda(f.binds(&["v"]), bin(BinaryOp::Pow, f.ident("v"), num(2.0))),
        vec![num(7.0)],
    )];
    assert_eq!(f.run(script).unwrap(), n(49.0));
}

#[test]
fn parameter_shadows_global() {
    let mut f = Fixture::new();
    let script = vec![
        f.let_("x", f.str("global")),
        f.func("id", f.binds(&["x"]), f.ident("x")),
        f.call_named("id", vec![f.str("param")]),
    ];
    assert_eq!(f.run(script).unwrap(), Value::string("param"));
    assert_eq!(f.run(vec![f.ident("x")]).unwrap(), Value::string("global"));
}

#[test]
fn nested_named_function_is_bound_in_the_frame_it_captures() {
    let mut f = Fixture::new();
    let fact_body = if_(
        bin(BinaryOp::LtEq, f.ident("k"), num(1.0)),
        num(1.0),
        Some(bin(
            BinaryOp::Mul,
            f.ident("k"),
            f.call_named("fact", vec![bin(BinaryOp::Sub, f.ident("k"), num(1.0))]),
        )),
    );
    let outer_body = block(vec![f.func("fact", f.binds(&["k"]), fact_body), f.ident("fact")]);
    let script = vec![
        f.func("outer", vec![], outer_body),
        f.let_("fact5", f.call_named("outer", vec![])),
        f.call_named("fact5", vec![num(5.0)]),
    ];
    assert_eq!(f.run(script).unwrap(), n(120.0));

    // The call frame of `outer` outlives the call: it binds `fact`, whose
    // closure holds that same frame.
    let Value::Function(fact) = f.run(vec![f.ident("fact5")]).unwrap() else {
        panic!("expected a function value");
    };
    let captured = fact.captured().borrow().get_local(f.name("fact")).cloned();
    let Some(Value::Function(bound)) = captured else {
        panic!("defining frame should bind `fact`");
    };
    assert!(bound.captured().ptr_eq(fact.captured()));
}
