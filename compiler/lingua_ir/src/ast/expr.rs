//! Expression nodes.

use std::rc::Rc;

use super::operators::{BinaryOp, UnaryOp};
use super::patterns::Pattern;
use crate::{Name, SourcePos};

/// Expression node: a kind tag plus the position of its leading token.
#[derive(Clone, PartialEq, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub pos: SourcePos,
}

impl Expr {
    pub fn new(kind: ExprKind, pos: SourcePos) -> Self {
        Expr { kind, pos }
    }

    /// Node with no source position, for trees built outside the parser.
    pub fn synthetic(kind: ExprKind) -> Self {
        Expr {
            kind,
            pos: SourcePos::NONE,
        }
    }
}

/// Expression variants.
#[derive(Clone, PartialEq, Debug)]
pub enum ExprKind {
    // ===== Literals =====
    /// `nil`
    Nil,
    /// `true`, `false`
    Bool(bool),
    /// `42`, `2.5`
    Number(f64),
    /// `"text"` (interned contents)
    Str(Name),
    /// `[a, b, c]`
    List(Vec<Expr>),

    // ===== Names and bindings =====
    /// Variable reference, including `self` and `super`.
    Ident(Name),
    /// `let name = value`: defines in the current frame.
    Let { name: Name, value: Box<Expr> },
    /// `name = value`: rebinds the nearest existing binding.
    Assign { name: Name, value: Box<Expr> },

    // ===== Operators =====
    Unary { op: UnaryOp, operand: Box<Expr> },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    // ===== Control flow =====
    /// `{ a; b; c }`: evaluates in a fresh frame, yields the last value.
    Block(Vec<Expr>),
    If {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Option<Box<Expr>>,
    },
    While { cond: Box<Expr>, body: Box<Expr> },

    // ===== Definitions =====
    /// `fn name(patterns) = body`: creates a function and binds `name`.
    Function(Rc<FunctionDef>),
    /// Anonymous function value; nothing is bound.
    Lambda(Rc<FunctionDef>),
    /// `class Name : Super { methods }`
    Class(Rc<ClassDef>),

    // ===== Calls and members =====
    Call { callee: Box<Expr>, args: Vec<Expr> },
    /// `object.name`
    Member { object: Box<Expr>, name: Name },
    /// `object.name = value`
    SetMember {
        object: Box<Expr>,
        name: Name,
        value: Box<Expr>,
    },
}

/// A function definition as written.
///
/// Shared by every runtime function object created from it. Function objects
/// compare equal exactly when their definitions do.
#[derive(Clone, PartialEq, Debug)]
pub struct FunctionDef {
    pub name: Name,
    pub params: Vec<Pattern>,
    pub body: Expr,
}

impl FunctionDef {
    pub fn new(name: Name, params: Vec<Pattern>, body: Expr) -> Self {
        FunctionDef { name, params, body }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// A class definition as written.
#[derive(Clone, PartialEq, Debug)]
pub struct ClassDef {
    pub name: Name,
    /// Evaluated at definition time; must produce a class.
    pub superclass: Option<Expr>,
    /// Methods in source order. Repeated names form an overload set.
    pub methods: Vec<Rc<FunctionDef>>,
}
