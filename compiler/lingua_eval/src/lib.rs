//! Lingua Eval - runtime core for the Lingua scripting language.
//!
//! A tree-walking interpreter over `lingua_ir` nodes.
//!
//! # Architecture
//!
//! - [`Environment`]: parent-linked scope frames, with closures holding a
//!   handle to their defining frame
//! - [`Value`]: runtime values, including function objects, overload sets,
//!   classes, instances and `super` references
//! - [`evaluate_binary`] / [`evaluate_unary`]: operator semantics over
//!   evaluated operands
//! - [`Interpreter`]: expression evaluation and the function-call protocol
//!   (arity, parameter patterns, `self`/`super`, closure scope switch)
//! - [`InterpreterBuilder`]: interner, global frame, print handler, call-depth
//!   limit and intrinsics
//!
//! Failures are [`EvalError`]s categorized as `CallException`, `NameError`
//! or `InvalidOperationException`.

mod diagnostics;
mod environment;
pub mod errors;
mod intrinsics;
pub mod interpreter;
mod operators;
mod print_handler;
mod unary_operators;
pub mod value;

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

use std::sync::Once;

pub use diagnostics::{CallFrame, CallStack};
pub use environment::{AssignError, Environment, Frame, LocalScope};
pub use errors::{ErrorCategory, EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Interpreter, InterpreterBuilder, ScopedInterpreter};
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler,
};
pub use unary_operators::evaluate_unary;
pub use value::{
    BuiltinClasses, ClassValue, FunctionValue, Instance, NativeFn, NativeFunction, OverloadSet,
    SuperRef, Value,
};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set; safe to call repeatedly.
///
/// ```text
/// RUST_LOG=lingua_eval=debug    calls and method dispatch
/// RUST_LOG=lingua_eval=trace    plus frame push/pop
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
