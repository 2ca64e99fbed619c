//! RAII frame management for the interpreter.
//!
//! A [`ScopedInterpreter`] derefs to the interpreter and undoes its frame
//! change when dropped, including during unwinding. Two forms:
//!
//! - [`Interpreter::scoped`] pushes a child of the active frame and pops it
//!   on drop (blocks).
//! - [`Interpreter::enter_frame`] makes an existing frame active and restores
//!   the caller's frame on drop (function bodies, whose frame hangs off the
//!   closure's defining frame rather than the caller's).
//!
//! ```text
//! {
//!     let mut scoped = interpreter.enter_frame(call_frame);
//!     scoped.eval(body)?;
//! } // caller's frame active again, even on panic
//! ```

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::environment::{Frame, LocalScope};

/// Guard restoring the interpreter's active frame on drop.
pub struct ScopedInterpreter<'a> {
    interpreter: &'a mut Interpreter,
    /// `None`: pop the pushed frame. `Some`: reinstate this frame.
    restore: Option<LocalScope<Frame>>,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        match self.restore.take() {
            Some(frame) => {
                self.interpreter.env.replace_frame(frame);
            }
            None => self.interpreter.env.pop_frame(),
        }
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Push a child of the active frame, popped when the guard drops.
    pub fn scoped(&mut self, name: impl Into<String>) -> ScopedInterpreter<'_> {
        self.env.push_frame(name);
        ScopedInterpreter {
            interpreter: self,
            restore: None,
        }
    }

    /// Make `frame` active until the guard drops, then reinstate the
    /// current one.
    pub fn enter_frame(&mut self, frame: LocalScope<Frame>) -> ScopedInterpreter<'_> {
        let caller = self.env.replace_frame(frame);
        ScopedInterpreter {
            interpreter: self,
            restore: Some(caller),
        }
    }
}
