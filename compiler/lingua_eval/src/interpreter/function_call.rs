//! The function-call protocol.
//!
//! Calling a function object:
//!
//! 1. check the argument count against the parameter count
//! 2. build a binding frame whose parent is the closure's captured frame
//! 3. match each argument against its parameter pattern into that frame
//! 4. bind `self`/`super` when the function carries them
//! 5. make the binding frame active and evaluate the body
//! 6. restore the caller's frame (guard) and pop the call stack
//!
//! The binding frame only becomes active once every pattern matched, so a
//! rejected call leaves no trace in the environment.

use std::rc::Rc;

use lingua_ir::SourcePos;

use super::pattern::match_params;
use super::Interpreter;
use crate::diagnostics::CallFrame;
use crate::environment::{Frame, LocalScope};
use crate::errors::{invalid_argument, not_callable, wrong_arg_count};
use crate::value::{ClassValue, FunctionValue, Instance, NativeFunction, OverloadSet};
use crate::{EvalResult, Value};

impl Interpreter {
    /// Call `callee` with already-evaluated arguments.
    pub fn call_value(&mut self, callee: &Value, args: &[Value]) -> EvalResult {
        self.call_at(callee, args, SourcePos::NONE)
    }

    pub(super) fn call_at(
        &mut self,
        callee: &Value,
        args: &[Value],
        call_site: SourcePos,
    ) -> EvalResult {
        match callee {
            Value::Function(func) => self.call_function(func, args, call_site),
            Value::Overloaded(set) => self.call_overloaded(set, args, call_site),
            Value::Native(native) => self.call_native(native, args),
            Value::Class(class) => self.instantiate(class, args, call_site),
            _ => Err(not_callable(callee.type_name(&self.interner))),
        }
    }

    /// Whether `func` would accept `args`: matching arity and every pattern
    /// matching. Probes a scratch frame, so nothing is bound.
    pub fn is_applicable(&self, func: &FunctionValue, args: &[Value]) -> bool {
        let mut probe = Frame::detached();
        match_params(func.params(), args, &mut probe, &self.interner)
    }

    /// Frame and backtrace label: `Class.name` for methods bound to a
    /// receiver, otherwise the function name.
    pub fn frame_label(&self, func: &FunctionValue) -> String {
        let name = self.interner.lookup(func.name());
        match func.self_value() {
            Some(receiver) => format!("{}.{name}", receiver.type_name(&self.interner)),
            None => name.to_string(),
        }
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn call_function(
        &mut self,
        func: &FunctionValue,
        args: &[Value],
        call_site: SourcePos,
    ) -> EvalResult {
        let name = self.interner.lookup(func.name());
        if args.len() != func.arity() {
            return Err(wrong_arg_count(name, func.arity(), args.len()));
        }

        let label = self.frame_label(func);
        let mut frame = Frame::child(label.clone(), func.captured().clone());
        if !match_params(func.params(), args, &mut frame, &self.interner) {
            return Err(invalid_argument(name));
        }
        if let Some(receiver) = func.self_value() {
            frame.define(self.names.self_, receiver.clone());
        }
        if let Some(super_value) = func.super_value() {
            frame.define(self.names.super_, super_value.clone());
        }

        tracing::debug!(function = %label, args = args.len(), "call");
        self.call_stack.push(CallFrame {
            name: label,
            call_site,
        })?;

        let result = {
            let mut scoped = self.enter_frame(LocalScope::new(frame));
            scoped.eval(func.body())
        };
        let result = result.map_err(|err| self.call_stack.attach_backtrace(err, &self.interner));
        self.call_stack.pop();
        result
    }

    /// Call the first candidate that accepts `args`.
    ///
    /// With no taker, the error is an arity error when no candidate has a
    /// matching parameter count, else an argument error.
    fn call_overloaded(
        &mut self,
        set: &OverloadSet,
        args: &[Value],
        call_site: SourcePos,
    ) -> EvalResult {
        let candidates = set.candidates();
        if let Some(func) = candidates.iter().find(|f| self.is_applicable(f, args)) {
            tracing::debug!(
                function = self.interner.lookup(set.name()),
                candidates = candidates.len(),
                "overload selected"
            );
            return self.call_function(func, args, call_site);
        }

        let name = self.interner.lookup(set.name());
        if candidates.iter().any(|f| f.arity() == args.len()) {
            Err(invalid_argument(name))
        } else {
            let expected = candidates.first().map_or(0, FunctionValue::arity);
            Err(wrong_arg_count(name, expected, args.len()))
        }
    }

    fn call_native(&mut self, native: &NativeFunction, args: &[Value]) -> EvalResult {
        if let Some(arity) = native.arity() {
            if args.len() != arity {
                let name = self.interner.lookup(native.name());
                return Err(wrong_arg_count(name, arity, args.len()));
            }
        }
        (native.func())(self, args)
    }

    /// Create an instance and run the class chain's `init`, if any.
    fn instantiate(
        &mut self,
        class: &Rc<ClassValue>,
        args: &[Value],
        call_site: SourcePos,
    ) -> EvalResult {
        let instance = Rc::new(Instance::new(Rc::clone(class)));
        tracing::debug!(class = self.interner.lookup(class.name()), "instantiate");

        match self.bind_method(&instance, class, self.names.init) {
            Some(init) => {
                self.call_at(&init, args, call_site)?;
            }
            None if !args.is_empty() => {
                return Err(wrong_arg_count(
                    self.interner.lookup(class.name()),
                    0,
                    args.len(),
                ));
            }
            None => {}
        }
        Ok(Value::Instance(instance))
    }
}
