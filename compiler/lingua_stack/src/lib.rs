//! Stack growth for the tree-walking evaluator.
//!
//! Evaluating a Lingua program recurses once per nested expression and once
//! per user-level function call, so a deeply recursive script is a deeply
//! recursive host program. Every `Interpreter::eval` entry goes through
//! [`ensure_sufficient_stack`], which moves evaluation onto a freshly
//! allocated stack segment when the current one is close to exhausted.
//!
//! On `wasm32` the closure is called directly.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
