//! Parameter pattern matching.

use lingua_ir::{Literal, Pattern, StringInterner};

use crate::environment::Frame;
use crate::Value;

/// Match `value` against `pattern`, binding names into `frame`.
///
/// On failure some names may already be bound; callers discard the frame.
pub(crate) fn match_pattern(
    pattern: &Pattern,
    value: &Value,
    frame: &mut Frame,
    interner: &StringInterner,
) -> bool {
    match pattern {
        Pattern::Bind(name) => {
            frame.define(*name, value.clone());
            true
        }
        Pattern::Wildcard => true,
        Pattern::Literal(literal) => literal_value(*literal, interner) == *value,
        Pattern::List(items) => match value {
            Value::List(elements) if elements.len() == items.len() => items
                .iter()
                .zip(elements.iter())
                .all(|(item, element)| match_pattern(item, element, frame, interner)),
            _ => false,
        },
    }
}

/// Match each argument against its parameter, in order.
pub(crate) fn match_params(
    params: &[Pattern],
    args: &[Value],
    frame: &mut Frame,
    interner: &StringInterner,
) -> bool {
    params.len() == args.len()
        && params
            .iter()
            .zip(args)
            .all(|(param, arg)| match_pattern(param, arg, frame, interner))
}

pub(crate) fn literal_value(literal: Literal, interner: &StringInterner) -> Value {
    match literal {
        Literal::Nil => Value::Nil,
        Literal::Bool(b) => Value::Bool(b),
        Literal::Number(n) => Value::Number(n),
        Literal::Str(s) => Value::string(interner.lookup(s)),
    }
}
