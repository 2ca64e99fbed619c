//! Tree-walking interpreter for Lingua.
//!
//! [`Interpreter::eval`] dispatches on [`ExprKind`]. Helper modules split the
//! larger pieces out:
//!
//! - `function_call`: the call protocol and callable dispatch
//! - `pattern`: parameter pattern matching
//! - `member`: member access and method binding
//! - `definitions`: function and class definitions
//! - `scope_guard`: RAII frame management

mod builder;
mod definitions;
mod function_call;
mod member;
mod pattern;
mod scope_guard;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

use std::rc::Rc;

use lingua_ir::{BinaryOp, Expr, ExprKind, Name, SharedInterner, StringInterner};
use lingua_stack::ensure_sufficient_stack;

use crate::diagnostics::CallStack;
use crate::environment::{AssignError, Environment, Frame, LocalScope};
use crate::errors::{invalid_operator, undefined_variable};
use crate::operators::{eval_number_binary, evaluate_binary, expect_number};
use crate::print_handler::SharedPrintHandler;
use crate::unary_operators::evaluate_unary;
use crate::value::{BuiltinClasses, ClassValue, FunctionValue};
use crate::{EvalResult, Value};

/// Names bound implicitly by the runtime, interned once at construction.
#[derive(Clone, Copy)]
pub(crate) struct ImplicitNames {
    pub(crate) self_: Name,
    pub(crate) super_: Name,
    pub(crate) init: Name,
}

impl ImplicitNames {
    fn new(interner: &StringInterner) -> Self {
        Self {
            self_: interner.intern("self"),
            super_: interner.intern("super"),
            init: interner.intern("init"),
        }
    }
}

/// Tree-walking interpreter.
///
/// Owns the environment, the diagnostic call stack and the built-in class
/// objects. Construct with [`InterpreterBuilder`]; `Interpreter::new()` gives
/// the defaults (stdout printing, intrinsics registered, no depth limit).
pub struct Interpreter {
    pub(crate) interner: SharedInterner,
    pub(crate) env: Environment,
    pub(crate) classes: BuiltinClasses,
    pub(crate) names: ImplicitNames,
    pub(crate) call_stack: CallStack,
    pub(crate) print_handler: SharedPrintHandler,
}

impl Interpreter {
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    #[inline]
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    #[inline]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    #[inline]
    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn classes(&self) -> &BuiltinClasses {
        &self.classes
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Number of function calls currently active.
    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }

    /// The global frame, for registering built-ins.
    pub fn globals(&self) -> LocalScope<Frame> {
        self.env.globals()
    }

    /// Bind `name` in the global frame.
    pub fn define_global(&mut self, name: &str, value: Value) {
        let name = self.interner.intern(name);
        self.env.globals().borrow_mut().define(name, value);
    }

    /// Runtime class of `value`.
    pub fn class_of(&self, value: &Value) -> Rc<ClassValue> {
        value.class(&self.classes)
    }

    /// Printable form of `value`.
    pub fn display(&self, value: &Value) -> String {
        value.display_value(&self.interner)
    }

    /// Evaluate top-level nodes in order; yields the last value, or `nil`
    /// for no nodes.
    pub fn run(&mut self, exprs: &[Expr]) -> EvalResult {
        self.eval_sequence(exprs)
    }

    /// Evaluate one node.
    ///
    /// Errors leaving this node without a position get this node's position,
    /// so the reported position is the innermost positioned node.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(expr)).map_err(|err| err.or_pos(expr.pos))
    }

    fn eval_sequence(&mut self, exprs: &[Expr]) -> EvalResult {
        let mut last = Value::Nil;
        for expr in exprs {
            last = self.eval(expr)?;
        }
        Ok(last)
    }

    fn eval_inner(&mut self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            // Literals
            ExprKind::Nil => Ok(Value::Nil),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Number(n) => Ok(Value::Number(*n)),
            ExprKind::Str(s) => Ok(Value::string(self.interner.lookup(*s))),
            ExprKind::List(items) => {
                let values = items
                    .iter()
                    .map(|item| self.eval(item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::list(values))
            }

            // Bindings
            ExprKind::Ident(name) => self
                .env
                .lookup(*name)
                .ok_or_else(|| undefined_variable(self.interner.lookup(*name))),
            ExprKind::Let { name, value } => {
                let value = self.eval(value)?;
                self.env.define(*name, value.clone());
                Ok(value)
            }
            ExprKind::Assign { name, value } => {
                let value = self.eval(value)?;
                match self.env.assign(*name, value.clone()) {
                    Ok(()) => Ok(value),
                    Err(AssignError::Undefined) => {
                        Err(undefined_variable(self.interner.lookup(*name)))
                    }
                }
            }

            // Operators
            ExprKind::Unary { op, operand } => {
                let value = self.eval(operand)?;
                evaluate_unary(&value, *op, &self.interner)
            }
            ExprKind::Binary { op, left, right } => self.eval_binary(*op, left, right),

            // Control flow
            ExprKind::Block(exprs) => {
                let mut scoped = self.scoped("<block>");
                scoped.eval_sequence(exprs)
            }
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval(cond)?.is_truthy() {
                    self.eval(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.eval(else_branch)
                } else {
                    Ok(Value::Nil)
                }
            }
            ExprKind::While { cond, body } => {
                while self.eval(cond)?.is_truthy() {
                    self.eval(body)?;
                }
                Ok(Value::Nil)
            }

            // Definitions
            ExprKind::Function(def) => Ok(self.define_function(def)),
            ExprKind::Lambda(def) => Ok(Value::Function(FunctionValue::new(
                Rc::clone(def),
                self.env.current_frame(),
            ))),
            ExprKind::Class(def) => self.define_class(def),

            // Calls and members
            ExprKind::Call { callee, args } => {
                let callee = self.eval(callee)?;
                let args = args
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                self.call_at(&callee, &args, expr.pos)
            }
            ExprKind::Member { object, name } => {
                let target = self.eval(object)?;
                self.get_member(&target, *name)
            }
            ExprKind::SetMember {
                object,
                name,
                value,
            } => self.eval_set_member(object, *name, value),
        }
    }

    /// Evaluate a binary expression.
    ///
    /// `&&`/`||` short-circuit. Strictly numeric operators coerce the left
    /// operand before the right one is evaluated. Everything else evaluates
    /// both operands, left first.
    fn eval_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> EvalResult {
        match op {
            BinaryOp::And => {
                if !self.eval(left)?.is_truthy() {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.eval(right)?.is_truthy()))
            }
            BinaryOp::Or => {
                if self.eval(left)?.is_truthy() {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(self.eval(right)?.is_truthy()))
            }
            BinaryOp::Mod => Err(invalid_operator(op)),
            _ if op.is_strictly_numeric() => {
                let lhs = self.eval(left)?;
                let a = expect_number(&lhs, &self.interner)?;
                let rhs = self.eval(right)?;
                let b = expect_number(&rhs, &self.interner)?;
                eval_number_binary(a, b, op)
            }
            _ => {
                let lhs = self.eval(left)?;
                let rhs = self.eval(right)?;
                evaluate_binary(&lhs, &rhs, op, &self.interner, &self.classes)
            }
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
