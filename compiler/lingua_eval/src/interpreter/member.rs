//! Member access and method binding.

use std::rc::Rc;

use lingua_ir::{Expr, Name};

use super::Interpreter;
use crate::errors::{invalid_type, undefined_member};
use crate::value::{ClassValue, Instance, SuperRef};
use crate::{EvalResult, Value};

impl Interpreter {
    /// Resolve `name` on `target`.
    ///
    /// - instance: its field, else a method from its class chain bound to it
    /// - `super`: a method from the class above the caller's, bound to the
    ///   same instance
    /// - class: the method, unbound
    pub fn get_member(&self, target: &Value, name: Name) -> EvalResult {
        let found = match target {
            Value::Instance(instance) => instance
                .get_field(name)
                .or_else(|| self.bind_method(instance, instance.class(), name)),
            Value::Super(sup) => self.bind_method(sup.instance(), sup.start(), name),
            Value::Class(class) => class.resolve_method(name).map(|(_, set)| set.into_value()),
            _ => None,
        };
        found.ok_or_else(|| {
            undefined_member(
                self.interner.lookup(name),
                target.type_name(&self.interner),
            )
        })
    }

    /// Look `name` up from `start` and bind it to `instance`.
    ///
    /// `self` is the instance. `super` starts at the superclass of the class
    /// that defines the method, so chained `super` calls keep climbing.
    pub(crate) fn bind_method(
        &self,
        instance: &Rc<Instance>,
        start: &Rc<ClassValue>,
        name: Name,
    ) -> Option<Value> {
        let (owner, set) = start.resolve_method(name)?;
        tracing::debug!(
            method = self.interner.lookup(name),
            owner = self.interner.lookup(owner.name()),
            "bind method"
        );

        let receiver = Value::Instance(Rc::clone(instance));
        let mut bound = set.with_self(&receiver);
        if let Some(parent) = owner.superclass() {
            let super_value = Value::Super(SuperRef::new(Rc::clone(instance), Rc::clone(parent)));
            bound = bound.with_super(&super_value);
        }
        Some(bound.into_value())
    }

    pub(super) fn eval_set_member(&mut self, object: &Expr, name: Name, value: &Expr) -> EvalResult {
        let target = self.eval(object)?;
        let Value::Instance(instance) = &target else {
            return Err(invalid_type("instance", target.type_name(&self.interner)));
        };
        let value = self.eval(value)?;
        instance.set_field(name, value.clone());
        Ok(value)
    }
}
