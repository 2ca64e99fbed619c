//! AST node types.

mod expr;
mod operators;
mod patterns;

pub use expr::{ClassDef, Expr, ExprKind, FunctionDef};
pub use operators::{BinaryOp, UnaryOp};
pub use patterns::{Literal, Pattern};

#[cfg(test)]
mod tests;
