//! Function objects, overload sets and native functions.

use std::fmt;
use std::rc::Rc;

use lingua_ir::{Expr, FunctionDef, Name, Pattern};

use super::Value;
use crate::environment::{Frame, LocalScope};
use crate::{EvalResult, Interpreter};

/// Implicit `self`/`super` bindings carried by a function object.
#[derive(Clone, Default)]
pub struct Binding {
    receiver: Option<Rc<Value>>,
    super_value: Option<Rc<Value>>,
}

/// A user-defined function: shared definition, captured defining frame, and
/// its implicit bindings.
///
/// Binding `self` or `super` produces a new function object; the definition
/// and captured frame are shared, never copied.
#[derive(Clone)]
pub struct FunctionValue {
    def: Rc<FunctionDef>,
    captured: LocalScope<Frame>,
    binding: Binding,
}

impl FunctionValue {
    pub fn new(def: Rc<FunctionDef>, captured: LocalScope<Frame>) -> Self {
        FunctionValue {
            def,
            captured,
            binding: Binding::default(),
        }
    }

    #[inline]
    pub fn def(&self) -> &Rc<FunctionDef> {
        &self.def
    }

    #[inline]
    pub fn name(&self) -> Name {
        self.def.name
    }

    #[inline]
    pub fn params(&self) -> &[Pattern] {
        &self.def.params
    }

    #[inline]
    pub fn body(&self) -> &Expr {
        &self.def.body
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.def.arity()
    }

    /// Frame the function was defined in.
    #[inline]
    pub fn captured(&self) -> &LocalScope<Frame> {
        &self.captured
    }

    pub fn self_value(&self) -> Option<&Value> {
        self.binding.receiver.as_deref()
    }

    pub fn super_value(&self) -> Option<&Value> {
        self.binding.super_value.as_deref()
    }

    /// Copy of this function with `self` bound to `value`.
    #[must_use]
    pub fn with_self(&self, value: Value) -> Self {
        let mut bound = self.clone();
        bound.binding.receiver = Some(Rc::new(value));
        bound
    }

    /// Copy of this function with `super` bound to `value`.
    #[must_use]
    pub fn with_super(&self, value: Value) -> Self {
        let mut bound = self.clone();
        bound.binding.super_value = Some(Rc::new(value));
        bound
    }
}

impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.def, &other.def) || *self.def == *other.def
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.def.name)
            .field("arity", &self.def.arity())
            .field("bound_self", &self.binding.receiver.is_some())
            .field("bound_super", &self.binding.super_value.is_some())
            .finish()
    }
}

/// Functions sharing a name in one frame, tried in definition order.
#[derive(Clone)]
pub struct OverloadSet {
    name: Name,
    candidates: Rc<[FunctionValue]>,
}

impl OverloadSet {
    pub fn new(first: FunctionValue) -> Self {
        OverloadSet {
            name: first.name(),
            candidates: Rc::from(vec![first]),
        }
    }

    pub fn from_candidates(name: Name, candidates: Vec<FunctionValue>) -> Self {
        OverloadSet {
            name,
            candidates: Rc::from(candidates),
        }
    }

    /// New set with `function` appended after the existing candidates.
    #[must_use]
    pub fn with_candidate(&self, function: FunctionValue) -> Self {
        let mut candidates = self.candidates.to_vec();
        candidates.push(function);
        Self::from_candidates(self.name, candidates)
    }

    #[inline]
    pub fn name(&self) -> Name {
        self.name
    }

    #[inline]
    pub fn candidates(&self) -> &[FunctionValue] {
        &self.candidates
    }

    #[must_use]
    pub fn with_self(&self, value: &Value) -> Self {
        self.map(|f| f.with_self(value.clone()))
    }

    #[must_use]
    pub fn with_super(&self, value: &Value) -> Self {
        self.map(|f| f.with_super(value.clone()))
    }

    fn map(&self, bind: impl Fn(&FunctionValue) -> FunctionValue) -> Self {
        Self::from_candidates(self.name, self.candidates.iter().map(bind).collect())
    }

    /// Collapse to a single function value when there is only one candidate.
    pub fn into_value(self) -> Value {
        match &*self.candidates {
            [only] => Value::Function(only.clone()),
            _ => Value::Overloaded(self),
        }
    }
}

impl PartialEq for OverloadSet {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.candidates == other.candidates
    }
}

impl fmt::Debug for OverloadSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverloadSet")
            .field("name", &self.name)
            .field("candidates", &self.candidates.len())
            .finish()
    }
}

/// Host function signature.
pub type NativeFn = fn(&mut Interpreter, &[Value]) -> EvalResult;

/// A function implemented by the host.
#[derive(Clone)]
pub struct NativeFunction {
    name: Name,
    arity: Option<usize>,
    func: NativeFn,
}

impl NativeFunction {
    /// `arity` of `None` accepts any number of arguments.
    pub fn new(name: Name, arity: Option<usize>, func: NativeFn) -> Self {
        NativeFunction { name, arity, func }
    }

    #[inline]
    pub fn name(&self) -> Name {
        self.name
    }

    #[inline]
    pub fn arity(&self) -> Option<usize> {
        self.arity
    }

    #[inline]
    pub fn func(&self) -> NativeFn {
        self.func
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .field("arity", &self.arity)
            .finish()
    }
}
