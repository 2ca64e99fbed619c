//! Unary operator implementations for the evaluator.

use lingua_ir::{StringInterner, UnaryOp};

use crate::errors::invalid_type;
use crate::{EvalResult, Value};

/// Evaluate a unary operation over an evaluated operand.
///
/// `-` requires a number; `!` negates truthiness and never fails.
pub fn evaluate_unary(value: &Value, op: UnaryOp, interner: &StringInterner) -> EvalResult {
    match op {
        UnaryOp::Neg => match value {
            Value::Number(n) => Ok(Value::Number(-n)),
            _ => Err(invalid_type("Number", value.type_name(interner))),
        },
        UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
    }
}
