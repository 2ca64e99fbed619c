//! Function and class definitions.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use lingua_ir::{ClassDef, FunctionDef, Name};

use super::Interpreter;
use crate::errors::invalid_type;
use crate::value::{ClassValue, FunctionValue, OverloadSet};
use crate::{EvalResult, Value};

impl Interpreter {
    /// Create a function object closing over the active frame and bind it
    /// there. A function already bound under the same name in the same frame
    /// is extended into an overload set; the new definition is tried last.
    pub(super) fn define_function(&mut self, def: &Rc<FunctionDef>) -> Value {
        let frame = self.env.current_frame();
        let func = FunctionValue::new(Rc::clone(def), frame.clone());

        let existing = frame.borrow().get_local(def.name).cloned();
        let value = match existing {
            Some(Value::Function(previous)) => {
                OverloadSet::new(previous).with_candidate(func).into_value()
            }
            Some(Value::Overloaded(set)) => set.with_candidate(func).into_value(),
            _ => Value::Function(func),
        };
        frame.borrow_mut().define(def.name, value.clone());
        value
    }

    /// Evaluate a class definition and bind the class in the active frame.
    ///
    /// Without an explicit superclass the class derives from `Object`.
    pub(super) fn define_class(&mut self, def: &ClassDef) -> EvalResult {
        let superclass = match &def.superclass {
            Some(expr) => match self.eval(expr)? {
                Value::Class(class) => class,
                other => return Err(invalid_type("Class", other.type_name(&self.interner))),
            },
            None => Rc::clone(&self.classes.object),
        };

        let captured = self.env.current_frame();
        let mut methods: FxHashMap<Name, OverloadSet> = FxHashMap::default();
        for method in &def.methods {
            let func = FunctionValue::new(Rc::clone(method), captured.clone());
            let set = match methods.remove(&method.name) {
                Some(set) => set.with_candidate(func),
                None => OverloadSet::new(func),
            };
            methods.insert(method.name, set);
        }

        tracing::debug!(
            class = self.interner.lookup(def.name),
            superclass = self.interner.lookup(superclass.name()),
            methods = methods.len(),
            "define class"
        );
        let class = Value::Class(Rc::new(ClassValue::new(
            def.name,
            Some(superclass),
            methods,
        )));
        self.env.define(def.name, class.clone());
        Ok(class)
    }
}
