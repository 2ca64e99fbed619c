//! Runtime values for the Lingua interpreter.
//!
//! Values are cheap to clone: strings, lists, class objects and instances are
//! reference counted, and function objects share their definition with every
//! copy made by `with_self`/`with_super`.
//!
//! Equality never fails. Primitives compare by content, lists element-wise,
//! functions by definition (name, parameters, body), and classes and
//! instances by identity.

mod class;
mod function;

use std::fmt;
use std::rc::Rc;

use lingua_ir::StringInterner;

pub use class::{BuiltinClasses, ClassValue, Instance, SuperRef};
pub use function::{Binding, FunctionValue, NativeFn, NativeFunction, OverloadSet};

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    List(Rc<Vec<Value>>),

    // Callables
    Function(FunctionValue),
    /// Functions defined under one name in one frame, tried in order.
    Overloaded(OverloadSet),
    Native(NativeFunction),

    // Objects
    Class(Rc<ClassValue>),
    Instance(Rc<Instance>),
    /// Method lookup handle starting above the defining class.
    Super(SuperRef),
}

// Factory Methods

impl Value {
    #[inline]
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(items))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

// Queries

impl Value {
    /// `false` and `nil` are falsy; everything else is truthy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(&**s),
            _ => None,
        }
    }

    /// Runtime class name, as shown in diagnostics.
    pub fn type_name(&self, interner: &StringInterner) -> &'static str {
        match self {
            Value::Nil => "Nil",
            Value::Bool(_) => "Boolean",
            Value::Number(_) => "Number",
            Value::Str(_) => "String",
            Value::List(_) => "List",
            Value::Function(_) | Value::Overloaded(_) | Value::Native(_) => "Function",
            Value::Class(_) => "Class",
            Value::Instance(instance) => interner.lookup(instance.class().name()),
            Value::Super(sup) => interner.lookup(sup.start().name()),
        }
    }

    /// The class object describing this value's runtime type.
    pub fn class(&self, classes: &BuiltinClasses) -> Rc<ClassValue> {
        let class = match self {
            Value::Nil => &classes.nil,
            Value::Bool(_) => &classes.boolean,
            Value::Number(_) => &classes.number,
            Value::Str(_) => &classes.string,
            Value::List(_) => &classes.list,
            Value::Function(_) | Value::Overloaded(_) | Value::Native(_) => &classes.function,
            Value::Class(_) => &classes.class,
            Value::Instance(instance) => instance.class(),
            Value::Super(sup) => sup.start(),
        };
        Rc::clone(class)
    }

    /// Printable form, as produced by `print`, `str` and string
    /// concatenation.
    pub fn display_value(&self, interner: &StringInterner) -> String {
        ValueDisplay {
            value: self,
            interner,
        }
        .to_string()
    }

    pub fn display<'a>(&'a self, interner: &'a StringInterner) -> impl fmt::Display + 'a {
        ValueDisplay {
            value: self,
            interner,
        }
    }
}

struct ValueDisplay<'a> {
    value: &'a Value,
    interner: &'a StringInterner,
}

impl fmt::Display for ValueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = self.interner;
        match self.value {
            Value::Nil => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => fmt_number(*n, f),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item.display(interner))?;
                }
                f.write_str("]")
            }
            Value::Function(func) => write!(f, "<function {}>", interner.lookup(func.name())),
            Value::Overloaded(set) => write!(f, "<function {}>", interner.lookup(set.name())),
            Value::Native(native) => {
                write!(f, "<native function {}>", interner.lookup(native.name()))
            }
            Value::Class(class) => write!(f, "<class {}>", interner.lookup(class.name())),
            Value::Instance(instance) => {
                write!(f, "<{} instance>", interner.lookup(instance.class().name()))
            }
            Value::Super(sup) => write!(f, "<super {}>", interner.lookup(sup.start().name())),
        }
    }
}

/// Integral numbers print without a fractional part.
fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "integral and below 1e15, exact in i64"
        )]
        let int = n as i64;
        write!(f, "{int}")
    } else {
        write!(f, "{n}")
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("Nil"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::List(items) => f.debug_tuple("List").field(&**items).finish(),
            Value::Function(func) => fmt::Debug::fmt(func, f),
            Value::Overloaded(set) => fmt::Debug::fmt(set, f),
            Value::Native(native) => fmt::Debug::fmt(native, f),
            Value::Class(class) => fmt::Debug::fmt(class, f),
            Value::Instance(instance) => fmt::Debug::fmt(instance, f),
            Value::Super(sup) => fmt::Debug::fmt(sup, f),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            // NaN equals itself so that `a == a` holds for every value.
            #[allow(clippy::float_cmp, reason = "language equality is exact")]
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b) || a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            (Value::Overloaded(a), Value::Overloaded(b)) => a == b,
            (Value::Native(a), Value::Native(b)) => a == b,
            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),
            (Value::Super(a), Value::Super(b)) => a == b,
            _ => false,
        }
    }
}
