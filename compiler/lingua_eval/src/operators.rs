//! Binary operator implementations for the evaluator.
//!
//! Operands arrive already evaluated. Evaluation order and short-circuiting
//! of `&&`/`||` are the interpreter's concern; see
//! `Interpreter::eval_binary`.

use lingua_ir::{BinaryOp, StringInterner};

use crate::errors::{invalid_operator, invalid_type, is_requires_class};
use crate::value::BuiltinClasses;
use crate::{EvalError, EvalResult, Value};

/// Evaluate `left op right` over evaluated operands.
///
/// `+` adds numbers and otherwise concatenates display forms. `==`/`!=`
/// never fail. The remaining arithmetic and comparison operators require two
/// numbers. `&&` and `||` are rejected: with both operands already evaluated
/// there is nothing left to short-circuit, so only `Interpreter::eval_binary`
/// handles them.
pub fn evaluate_binary(
    left: &Value,
    right: &Value,
    op: BinaryOp,
    interner: &StringInterner,
    classes: &BuiltinClasses,
) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(eval_add(left, right, interner)),
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => Ok(Value::Bool(left != right)),
        BinaryOp::Is => eval_is(left, right, interner, classes),
        BinaryOp::Sub
        | BinaryOp::Mul
        | BinaryOp::Div
        | BinaryOp::Pow
        | BinaryOp::Lt
        | BinaryOp::LtEq
        | BinaryOp::Gt
        | BinaryOp::GtEq => {
            let a = expect_number(left, interner)?;
            let b = expect_number(right, interner)?;
            eval_number_binary(a, b, op)
        }
        BinaryOp::Mod | BinaryOp::And | BinaryOp::Or => Err(invalid_operator(op)),
    }
}

/// Coerce an operand of a strictly numeric operator.
#[inline]
pub fn expect_number(value: &Value, interner: &StringInterner) -> Result<f64, EvalError> {
    value
        .as_number()
        .ok_or_else(|| invalid_type("Number", value.type_name(interner)))
}

/// Arithmetic and ordering over two numbers.
///
/// Host float semantics: division by zero yields an infinity or NaN.
pub fn eval_number_binary(a: f64, b: f64, op: BinaryOp) -> EvalResult {
    let value = match op {
        BinaryOp::Add => Value::Number(a + b),
        BinaryOp::Sub => Value::Number(a - b),
        BinaryOp::Mul => Value::Number(a * b),
        BinaryOp::Div => Value::Number(a / b),
        BinaryOp::Pow => Value::Number(a.powf(b)),
        BinaryOp::Lt => Value::Bool(a < b),
        BinaryOp::LtEq => Value::Bool(a <= b),
        BinaryOp::Gt => Value::Bool(a > b),
        BinaryOp::GtEq => Value::Bool(a >= b),
        BinaryOp::Mod
        | BinaryOp::Eq
        | BinaryOp::NotEq
        | BinaryOp::And
        | BinaryOp::Or
        | BinaryOp::Is => return Err(invalid_operator(op)),
    };
    Ok(value)
}

fn eval_add(left: &Value, right: &Value, interner: &StringInterner) -> Value {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Value::Number(a + b),
        _ => {
            let mut out = left.display_value(interner);
            out.push_str(&right.display_value(interner));
            Value::string(out)
        }
    }
}

fn eval_is(
    left: &Value,
    right: &Value,
    interner: &StringInterner,
    classes: &BuiltinClasses,
) -> EvalResult {
    let Value::Class(target) = right else {
        return Err(is_requires_class(right.type_name(interner)));
    };
    Ok(Value::Bool(left.class(classes).is_subclass_of(target)))
}
