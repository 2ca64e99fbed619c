//! Formal-parameter patterns.
//!
//! A parameter is not just a name: it accepts or rejects an argument and may
//! bind names while doing so. The set of forms is closed so matching is an
//! exhaustive `match` in the evaluator.

use crate::Name;

/// Literal accepted by a [`Pattern::Literal`].
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Literal {
    Nil,
    Bool(bool),
    Number(f64),
    /// Interned string contents.
    Str(Name),
}

/// Formal-parameter pattern.
#[derive(Clone, PartialEq, Debug)]
pub enum Pattern {
    /// `x`: accepts anything and binds it.
    Bind(Name),
    /// `_`: accepts anything, binds nothing.
    Wildcard,
    /// `0`, `"quit"`, `true`, `nil`: accepts only an equal value.
    Literal(Literal),
    /// `[head, _, 3]`: accepts a list of exactly this length whose elements
    /// match element-wise.
    List(Vec<Pattern>),
}

impl Pattern {
    /// Names this pattern binds on success, in order.
    pub fn bound_names(&self) -> Vec<Name> {
        fn collect(pattern: &Pattern, out: &mut Vec<Name>) {
            match pattern {
                Pattern::Bind(name) => out.push(*name),
                Pattern::List(items) => items.iter().for_each(|p| collect(p, out)),
                Pattern::Wildcard | Pattern::Literal(_) => {}
            }
        }
        let mut names = Vec::new();
        collect(self, &mut names);
        names
    }
}
