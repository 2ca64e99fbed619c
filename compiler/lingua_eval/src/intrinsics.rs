//! Built-ins registered into the global frame.
//!
//! Classes: `Object`, `Nil`, `Boolean`, `Number`, `String`, `List`,
//! `Function`, `Class`. Functions: `print(x)`, `str(x)`, `type(x)`.

use std::rc::Rc;

use crate::value::{NativeFn, NativeFunction};
use crate::{EvalResult, Interpreter, Value};

pub(crate) fn register(interpreter: &Interpreter) {
    let globals = interpreter.globals();
    for class in interpreter.classes().all() {
        globals
            .borrow_mut()
            .define(class.name(), Value::Class(Rc::clone(class)));
    }

    let natives: [(&str, NativeFn); 3] = [("print", print), ("str", to_str), ("type", type_of)];
    for (name, func) in natives {
        let name = interpreter.interner().intern(name);
        globals
            .borrow_mut()
            .define(name, Value::Native(NativeFunction::new(name, Some(1), func)));
    }
}

fn print(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult {
    let text = interpreter.display(&args[0]);
    interpreter.print_handler().println(&text);
    Ok(Value::Nil)
}

fn to_str(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult {
    Ok(Value::string(interpreter.display(&args[0])))
}

fn type_of(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult {
    Ok(Value::Class(interpreter.class_of(&args[0])))
}
