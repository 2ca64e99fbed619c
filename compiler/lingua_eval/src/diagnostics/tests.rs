use lingua_ir::{SourcePos, StringInterner};
use pretty_assertions::assert_eq;

use super::*;
use crate::errors::{undefined_variable, ErrorCategory, EvalErrorKind};

fn frame(name: &str) -> CallFrame {
    CallFrame {
        name: name.to_string(),
        call_site: SourcePos::NONE,
    }
}

#[test]
fn push_pop_tracks_depth() {
    let mut stack = CallStack::default();
    assert!(stack.is_empty());
    stack.push(frame("f")).unwrap();
    stack.push(frame("g")).unwrap();
    assert_eq!(stack.depth(), 2);
    stack.pop();
    assert_eq!(stack.depth(), 1);
}

#[test]
fn depth_limit_rejects_push() {
    let mut stack = CallStack::new(Some(2));
    stack.push(frame("a")).unwrap();
    stack.push(frame("b")).unwrap();

    let err = stack.push(frame("c")).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::RecursionLimit { limit: 2 });
    assert_eq!(err.category(), ErrorCategory::CallException);
    assert_eq!(stack.depth(), 2);
}

#[test]
fn capture_is_most_recent_first() {
    let interner = StringInterner::new();
    let file = interner.intern("main.lg");
    let mut stack = CallStack::default();
    stack
        .push(CallFrame {
            name: "outer".to_string(),
            call_site: SourcePos::new(file, 10),
        })
        .unwrap();
    stack.push(frame("Point.init")).unwrap();

    let backtrace = stack.capture(&interner);
    let frames = backtrace.frames();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].name, "Point.init");
    assert_eq!(frames[0].call_site, None);
    assert_eq!(frames[1].name, "outer");
    assert_eq!(frames[1].call_site.as_deref(), Some("main.lg:10"));
}

#[test]
fn attach_keeps_innermost_backtrace() {
    let interner = StringInterner::new();
    let mut stack = CallStack::default();
    stack.push(frame("outer")).unwrap();
    stack.push(frame("inner")).unwrap();

    let err = stack.attach_backtrace(undefined_variable("x"), &interner);
    stack.pop();
    let err = stack.attach_backtrace(err, &interner);

    let backtrace = err.backtrace.unwrap();
    assert_eq!(backtrace.len(), 2);
    assert_eq!(backtrace.frames()[0].name, "inner");
}

#[test]
fn attach_on_empty_stack_is_noop() {
    let interner = StringInterner::new();
    let stack = CallStack::default();
    let err = stack.attach_backtrace(undefined_variable("x"), &interner);
    assert!(err.backtrace.is_none());
}
