//! Classes, instances, method binding and `super` dispatch.

use std::rc::Rc;

use lingua_ir::{BinaryOp, Expr, FunctionDef};

use super::fixture::{bin, block, call, lit_num, num, Fixture};
use crate::errors::ErrorCategory;
use crate::Value;

fn n(x: f64) -> Value {
    Value::Number(x)
}

/// `init(x, y) = { self.x = x; self.y = y }`
fn point_init(f: &Fixture) -> Rc<FunctionDef> {
    f.def(
        "init",
        f.binds(&["x", "y"]),
        block(vec![
            f.set_member(f.ident("self"), "x", f.ident("x")),
            f.set_member(f.ident("self"), "y", f.ident("y")),
        ]),
    )
}

/// `class Point { init(x, y); sum() = self.x + self.y }`
fn define_point(f: &Fixture) -> Expr {
    let sum = f.def(
        "sum",
        vec![],
        bin(
            BinaryOp::Add,
            f.member(f.ident("self"), "x"),
            f.member(f.ident("self"), "y"),
        ),
    );
    f.class("Point", None, vec![point_init(f), sum])
}

fn new_point(f: &Fixture, x: f64, y: f64) -> Expr {
    f.call_named("Point", vec![num(x), num(y)])
}

mod instances {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn init_runs_and_methods_see_self() {
        let mut f = Fixture::new();
        let script = vec![
            define_point(&f),
            f.let_("p", new_point(&f, 1.0, 2.0)),
            f.method_call(f.ident("p"), "sum", vec![]),
        ];
        assert_eq!(f.run(script).unwrap(), n(3.0));
    }

    #[test]
    fn fields_are_readable_and_writable() {
        let mut f = Fixture::new();
        let script = vec![
            define_point(&f),
            f.let_("p", new_point(&f, 1.0, 2.0)),
            f.set_member(f.ident("p"), "x", num(10.0)),
            f.method_call(f.ident("p"), "sum", vec![]),
        ];
        assert_eq!(f.run(script).unwrap(), n(12.0));
    }

    #[test]
    fn bound_method_value_keeps_receiver() {
        let mut f = Fixture::new();
        let script = vec![
            define_point(&f),
            f.let_("m", f.member(new_point(&f, 4.0, 5.0), "sum")),
            f.call_named("m", vec![]),
        ];
        assert_eq!(f.run(script).unwrap(), n(9.0));
    }

    #[test]
    fn method_from_class_is_unbound() {
        let mut f = Fixture::new();
        let script = vec![
            define_point(&f),
            call(f.member(f.ident("Point"), "sum"), vec![]),
        ];
        let err = f.run(script).unwrap_err();
        assert_eq!(err.to_string(), "NameError: undefined variable: self");
    }

    #[test]
    fn class_without_init_takes_no_arguments() {
        let mut f = Fixture::new();
        f.run(vec![f.class("Empty", None, vec![])]).unwrap();

        let instance = f.run(vec![f.call_named("Empty", vec![])]).unwrap();
        assert_eq!(f.interp.display(&instance), "<Empty instance>");

        let err = f
            .run(vec![f.call_named("Empty", vec![num(1.0)])])
            .unwrap_err();
        assert_eq!(err.message, "invalid number of arguments for function Empty");
    }

    #[test]
    fn init_arity_is_checked() {
        let mut f = Fixture::new();
        let script = vec![define_point(&f), f.call_named("Point", vec![num(1.0)])];
        let err = f.run(script).unwrap_err();
        assert_eq!(err.message, "invalid number of arguments for function init");
    }

    #[test]
    fn field_shadows_method() {
        let mut f = Fixture::new();
        let script = vec![
            define_point(&f),
            f.let_("p", new_point(&f, 1.0, 2.0)),
            f.set_member(f.ident("p"), "sum", f.str("field")),
            f.member(f.ident("p"), "sum"),
        ];
        assert_eq!(f.run(script).unwrap(), Value::string("field"));
    }

    #[test]
    fn instances_compare_by_identity() {
        let mut f = Fixture::new();
        let script = vec![
            define_point(&f),
            f.let_("p", new_point(&f, 1.0, 2.0)),
            f.let_("q", new_point(&f, 1.0, 2.0)),
            bin(BinaryOp::Eq, f.ident("p"), f.ident("p")),
        ];
        assert_eq!(f.run(script).unwrap(), Value::Bool(true));
        assert_eq!(
            f.run(vec![bin(BinaryOp::Eq, f.ident("p"), f.ident("q"))])
                .unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn method_overloads_inside_class() {
        let mut f = Fixture::new();
        let classify = vec![
            f.def("kind", vec![lit_num(0.0)], f.str("zero")),
            f.def("kind", f.binds(&["v"]), f.str("other")),
        ];
        let script = vec![
            f.class("Classifier", None, classify),
            f.let_("c", f.call_named("Classifier", vec![])),
            bin(
                BinaryOp::Add,
                f.method_call(f.ident("c"), "kind", vec![num(0.0)]),
                f.method_call(f.ident("c"), "kind", vec![num(7.0)]),
            ),
        ];
        assert_eq!(f.run(script).unwrap(), Value::string("zeroother"));
    }
}

mod inheritance {
    use pretty_assertions::assert_eq;

    use super::*;

    /// `class Shape { name() = "shape"; describe() = "I am a " + self.name() }`
    fn define_shape(f: &Fixture) -> Expr {
        let name = f.def("name", vec![], f.str("shape"));
        let describe = f.def(
            "describe",
            vec![],
            bin(
                BinaryOp::Add,
                f.str("I am a "),
                f.method_call(f.ident("self"), "name", vec![]),
            ),
        );
        f.class("Shape", None, vec![name, describe])
    }

    #[test]
    fn methods_dispatch_on_runtime_class() {
        let mut f = Fixture::new();
        let square_name = f.def("name", vec![], f.str("square"));
        let script = vec![
            define_shape(&f),
            f.class("Square", Some("Shape"), vec![square_name]),
            f.method_call(f.call_named("Square", vec![]), "describe", vec![]),
        ];
        assert_eq!(f.run(script).unwrap(), Value::string("I am a square"));
    }

    #[test]
    fn super_calls_parent_with_same_self() {
        let mut f = Fixture::new();
        let square_name = f.def("name", vec![], f.str("square"));
        let describe = f.def(
            "describe",
            vec![],
            bin(
                BinaryOp::Add,
                f.method_call(f.ident("super"), "describe", vec![]),
                f.str("!"),
            ),
        );
        let script = vec![
            define_shape(&f),
            f.class("Square", Some("Shape"), vec![square_name, describe]),
            f.method_call(f.call_named("Square", vec![]), "describe", vec![]),
        ];
        assert_eq!(f.run(script).unwrap(), Value::string("I am a square!"));
    }

    #[test]
    fn super_chains_climb_one_level_each() {
        let mut f = Fixture::new();
        let greet_via_super = |f: &Fixture, suffix: &str| {
            f.def(
                "greet",
                vec![],
                bin(
                    BinaryOp::Add,
                    f.method_call(f.ident("super"), "greet", vec![]),
                    f.str(suffix),
                ),
            )
        };
        let script = vec![
            f.class("A", None, vec![f.def("greet", vec![], f.str("A"))]),
            f.class("B", Some("A"), vec![greet_via_super(&f, "B")]),
            f.class("C", Some("B"), vec![greet_via_super(&f, "C")]),
            f.method_call(f.call_named("C", vec![]), "greet", vec![]),
        ];
        assert_eq!(f.run(script).unwrap(), Value::string("ABC"));
    }

    #[test]
    fn init_is_inherited() {
        let mut f = Fixture::new();
        let script = vec![
            define_point(&f),
            f.class("Point3", Some("Point"), vec![]),
            f.method_call(
                f.call_named("Point3", vec![num(2.0), num(3.0)]),
                "sum",
                vec![],
            ),
        ];
        assert_eq!(f.run(script).unwrap(), n(5.0));
    }

    #[test]
    fn is_follows_class_chain() {
        let mut f = Fixture::new();
        let script = vec![
            define_shape(&f),
            f.class("Square", Some("Shape"), vec![]),
            f.let_("s", f.call_named("Square", vec![])),
        ];
        f.run(script).unwrap();

        let is = |f: &mut Fixture, class: &str| {
            let expr = bin(BinaryOp::Is, f.ident("s"), f.ident(class));
            f.run(vec![expr]).unwrap()
        };
        assert_eq!(is(&mut f, "Square"), Value::Bool(true));
        assert_eq!(is(&mut f, "Shape"), Value::Bool(true));
        assert_eq!(is(&mut f, "Object"), Value::Bool(true));
        assert_eq!(is(&mut f, "Number"), Value::Bool(false));
    }

    #[test]
    fn is_with_non_class_right_operand() {
        let mut f = Fixture::new();
        let err = f
            .run(vec![bin(BinaryOp::Is, num(1.0), f.str("Number"))])
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::InvalidOperationException);
    }

    #[test]
    fn superclass_must_be_a_class() {
        let mut f = Fixture::new();
        let script = vec![
            f.let_("NotAClass", num(1.0)),
            f.class("Broken", Some("NotAClass"), vec![]),
        ];
        let err = f.run(script).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::CallException);
        assert_eq!(err.message, "invalid type: expected Class, got Number");
    }
}

mod member_errors {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_member_on_instance() {
        let mut f = Fixture::new();
        let script = vec![
            define_point(&f),
            f.member(new_point(&f, 0.0, 0.0), "area"),
        ];
        let err = f.run(script).unwrap_err();
        assert_eq!(err.to_string(), "NameError: no member `area` on Point");
    }

    #[test]
    fn member_on_primitive() {
        let mut f = Fixture::new();
        let err = f.run(vec![f.member(num(5.0), "x")]).unwrap_err();
        assert_eq!(err.message, "no member `x` on Number");
    }

    #[test]
    fn set_member_requires_instance() {
        let mut f = Fixture::new();
        let err = f
            .run(vec![f.set_member(f.str("text"), "x", num(1.0))])
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::CallException);
        assert!(err.message.starts_with("invalid type"));
    }

    #[test]
    fn method_frames_are_labelled_with_class() {
        let mut f = Fixture::new();
        let fail = f.def("fail", vec![], f.ident("nowhere"));
        let script = vec![
            f.class("Widget", None, vec![fail]),
            f.method_call(f.call_named("Widget", vec![]), "fail", vec![]),
        ];
        let err = f.run(script).unwrap_err();
        let backtrace = err.backtrace.unwrap();
        assert_eq!(backtrace.frames()[0].name, "Widget.fail");
        assert!(f.interp.env().is_global_active());
    }
}
