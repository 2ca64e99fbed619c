//! Evaluation errors.
//!
//! Every runtime failure is an [`EvalError`]: a structured [`EvalErrorKind`],
//! the human-readable message derived from it, the position of the innermost
//! failing node and, once it has crossed a function call, a backtrace of the
//! calls it unwound through.
//!
//! Kinds group into three user-visible categories ([`ErrorCategory`]); the
//! driver prints `<Category>: <message>`. Construct errors through the
//! factory functions below rather than by hand.

use std::fmt;

use lingua_ir::{BinaryOp, SourcePos, StringInterner};

use crate::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// User-visible error category.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Arity mismatch, parameter-pattern mismatch, operand type mismatch,
    /// calling a non-callable value.
    CallException,
    /// Identifier or member not found.
    NameError,
    /// Operator the evaluator does not implement.
    InvalidOperationException,
}

impl ErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CallException => "CallException",
            Self::NameError => "NameError",
            Self::InvalidOperationException => "InvalidOperationException",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed error condition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Calls
    ArityMismatch {
        function: String,
        expected: usize,
        got: usize,
    },
    ArgumentMismatch {
        function: String,
    },
    NotCallable {
        type_name: String,
    },
    RecursionLimit {
        limit: usize,
    },

    // Operands
    InvalidType {
        expected: String,
        got: String,
    },

    // Names
    UndefinedVariable {
        name: String,
    },
    UndefinedMember {
        member: String,
        type_name: String,
    },

    // Operators
    InvalidOperator {
        op: BinaryOp,
    },
    IsRequiresClass {
        got: String,
    },

    /// Free-form error raised by intrinsics.
    Custom {
        category: ErrorCategory,
        message: String,
    },
}

impl EvalErrorKind {
    /// The category this kind is reported under.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ArityMismatch { .. }
            | Self::ArgumentMismatch { .. }
            | Self::NotCallable { .. }
            | Self::RecursionLimit { .. }
            | Self::InvalidType { .. } => ErrorCategory::CallException,
            Self::UndefinedVariable { .. } | Self::UndefinedMember { .. } => {
                ErrorCategory::NameError
            }
            Self::InvalidOperator { .. } | Self::IsRequiresClass { .. } => {
                ErrorCategory::InvalidOperationException
            }
            Self::Custom { category, .. } => *category,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArityMismatch { function, .. } => {
                write!(f, "invalid number of arguments for function {function}")
            }
            Self::ArgumentMismatch { function } => {
                write!(f, "invalid argument for function {function}")
            }
            Self::NotCallable { type_name } => write!(f, "{type_name} is not callable"),
            Self::RecursionLimit { limit } => {
                write!(f, "maximum call depth exceeded (limit: {limit})")
            }
            Self::InvalidType { expected, got } => {
                write!(f, "invalid type: expected {expected}, got {got}")
            }
            Self::UndefinedVariable { name } => write!(f, "undefined variable: {name}"),
            Self::UndefinedMember { member, type_name } => {
                write!(f, "no member `{member}` on {type_name}")
            }
            Self::InvalidOperator { op } => write!(f, "invalid operator `{}`", op.as_symbol()),
            Self::IsRequiresClass { got } => write!(
                f,
                "invalid operator `is`: right operand must be a class, got {got}"
            ),
            Self::Custom { message, .. } => f.write_str(message),
        }
    }
}

/// One call in an error backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Frame label: `Class.method` or `function`.
    pub name: String,
    /// Rendered call-site position, when known.
    pub call_site: Option<String>,
}

/// Snapshot of the call stack where an error was raised, innermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in &self.frames {
            write!(f, "  at {}", frame.name)?;
            if let Some(site) = &frame.call_site {
                write!(f, " ({site})")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Equals `kind.to_string()`.
    pub message: String,
    /// Innermost node being evaluated when the error was raised.
    pub pos: Option<SourcePos>,
    /// Calls unwound through, set at the innermost call boundary.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            pos: None,
            backtrace: None,
        }
    }

    /// Free-form error under the given category.
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Custom {
            category,
            message: message.into(),
        })
    }

    #[inline]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Attach a source position unless one is already set.
    #[must_use]
    pub fn or_pos(mut self, pos: SourcePos) -> Self {
        if self.pos.is_none() && pos.is_known() {
            self.pos = Some(pos);
        }
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    /// Full diagnostic: category, message, position and backtrace.
    pub fn render(&self, interner: &StringInterner) -> String {
        let mut out = self.to_string();
        if let Some(pos) = self.pos {
            out.push_str(&format!(" at {}", pos.display(interner)));
        }
        out.push('\n');
        if let Some(backtrace) = &self.backtrace {
            out.push_str(&backtrace.to_string());
        }
        out
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category(), self.message)
    }
}

impl std::error::Error for EvalError {}

// Call Errors

/// Argument count differs from the parameter count.
#[cold]
pub fn wrong_arg_count(function: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        function: function.to_string(),
        expected,
        got,
    })
}

/// An argument was rejected by its parameter pattern.
#[cold]
pub fn invalid_argument(function: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArgumentMismatch {
        function: function.to_string(),
    })
}

#[cold]
pub fn not_callable(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { limit })
}

// Operand Errors

/// Operand or receiver of the wrong runtime type.
#[cold]
pub fn invalid_type(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidType {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

// Name Errors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_member(member: &str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedMember {
        member: member.to_string(),
        type_name: type_name.to_string(),
    })
}

// Operator Errors

#[cold]
pub fn invalid_operator(op: BinaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidOperator { op })
}

/// Right operand of `is` did not evaluate to a class.
#[cold]
pub fn is_requires_class(got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IsRequiresClass {
        got: got.to_string(),
    })
}
