//! Lingua IR - syntax tree types handed from the parser to the runtime.
//!
//! The parser (not part of this workspace) produces an already-validated tree
//! of [`Expr`] nodes. This crate holds:
//! - [`Name`] and [`StringInterner`] for interned identifiers and string literals
//! - [`SourcePos`] for diagnostics (origin + line)
//! - AST nodes: expressions, operators, parameter patterns, function and class
//!   definitions
//!
//! Nodes are immutable once built. Function and class definitions are held in
//! `Rc` so that every runtime function object created from a definition shares
//! it instead of copying the body.

pub mod ast;
mod interner;
mod name;
mod pos;

pub use ast::{BinaryOp, ClassDef, Expr, ExprKind, FunctionDef, Literal, Pattern, UnaryOp};
pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use pos::SourcePos;
