//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use lingua_ir::SharedInterner;

use super::{ImplicitNames, Interpreter};
use crate::diagnostics::CallStack;
use crate::environment::{Environment, Frame, LocalScope};
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::value::BuiltinClasses;

/// Builder for [`Interpreter`].
///
/// Defaults: a fresh interner, a fresh global frame, stdout printing, no
/// call-depth limit, intrinsics registered.
pub struct InterpreterBuilder {
    interner: Option<SharedInterner>,
    globals: Option<LocalScope<Frame>>,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: Option<usize>,
    intrinsics: bool,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            interner: None,
            globals: None,
            print_handler: None,
            max_call_depth: None,
            intrinsics: true,
        }
    }

    /// Share the parser's interner. Required whenever the nodes to be
    /// evaluated were built elsewhere.
    #[must_use]
    pub fn interner(mut self, interner: SharedInterner) -> Self {
        self.interner = Some(interner);
        self
    }

    /// Use an explicitly built global frame.
    #[must_use]
    pub fn globals(mut self, globals: LocalScope<Frame>) -> Self {
        self.globals = Some(globals);
        self
    }

    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Fail calls nested deeper than `depth` with a `CallException`.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    /// Whether to register the built-in classes and native functions into
    /// the global frame.
    #[must_use]
    pub fn intrinsics(mut self, enabled: bool) -> Self {
        self.intrinsics = enabled;
        self
    }

    pub fn build(self) -> Interpreter {
        let interner = self.interner.unwrap_or_default();
        let env = match self.globals {
            Some(globals) => Environment::with_globals(globals),
            None => Environment::new(),
        };
        let interpreter = Interpreter {
            classes: BuiltinClasses::new(&interner),
            names: ImplicitNames::new(&interner),
            interner,
            env,
            call_stack: CallStack::new(self.max_call_depth),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
        };
        if self.intrinsics {
            crate::intrinsics::register(&interpreter);
        }
        interpreter
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
