//! Class objects, instances and `super` references.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use lingua_ir::{Name, StringInterner};

use super::{OverloadSet, Value};

/// A class: name, optional superclass, and a method table mapping each
/// method name to its overload set. Immutable once created.
pub struct ClassValue {
    name: Name,
    superclass: Option<Rc<ClassValue>>,
    methods: FxHashMap<Name, OverloadSet>,
}

impl ClassValue {
    pub fn new(
        name: Name,
        superclass: Option<Rc<ClassValue>>,
        methods: FxHashMap<Name, OverloadSet>,
    ) -> Self {
        ClassValue {
            name,
            superclass,
            methods,
        }
    }

    #[inline]
    pub fn name(&self) -> Name {
        self.name
    }

    #[inline]
    pub fn superclass(&self) -> Option<&Rc<ClassValue>> {
        self.superclass.as_ref()
    }

    /// Whether `self` is `other` or transitively derives from it.
    pub fn is_subclass_of(&self, other: &ClassValue) -> bool {
        let mut current = Some(self);
        while let Some(class) = current {
            if std::ptr::eq(class, other) {
                return true;
            }
            current = class.superclass.as_deref();
        }
        false
    }

    /// Find `name` on this class or the nearest superclass defining it.
    ///
    /// Returns the owning class along with the overload set; the owner
    /// decides where a bound method's `super` starts.
    pub fn resolve_method(self: &Rc<Self>, name: Name) -> Option<(Rc<ClassValue>, OverloadSet)> {
        let mut current = Some(self);
        while let Some(class) = current {
            if let Some(set) = class.methods.get(&name) {
                return Some((Rc::clone(class), set.clone()));
            }
            current = class.superclass.as_ref();
        }
        None
    }
}

impl fmt::Debug for ClassValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<_> = self.methods.keys().copied().collect();
        methods.sort_unstable_by_key(|name| name.raw());
        f.debug_struct("ClassValue")
            .field("name", &self.name)
            .field("superclass", &self.superclass.as_ref().map(|c| c.name))
            .field("methods", &methods)
            .finish()
    }
}

/// An object created by calling a class.
pub struct Instance {
    class: Rc<ClassValue>,
    fields: RefCell<FxHashMap<Name, Value>>,
}

impl Instance {
    pub fn new(class: Rc<ClassValue>) -> Self {
        Instance {
            class,
            fields: RefCell::new(FxHashMap::default()),
        }
    }

    #[inline]
    pub fn class(&self) -> &Rc<ClassValue> {
        &self.class
    }

    pub fn get_field(&self, name: Name) -> Option<Value> {
        self.fields.borrow().get(&name).cloned()
    }

    pub fn set_field(&self, name: Name, value: Value) {
        self.fields.borrow_mut().insert(name, value);
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<_> = self.fields.borrow().keys().copied().collect();
        fields.sort_unstable_by_key(|name| name.raw());
        f.debug_struct("Instance")
            .field("class", &self.class.name)
            .field("fields", &fields)
            .finish()
    }
}

/// The `super` binding of a method fetched from an instance: the same
/// instance, with method lookup starting at `start`.
#[derive(Clone)]
pub struct SuperRef {
    instance: Rc<Instance>,
    start: Rc<ClassValue>,
}

impl SuperRef {
    pub fn new(instance: Rc<Instance>, start: Rc<ClassValue>) -> Self {
        SuperRef { instance, start }
    }

    #[inline]
    pub fn instance(&self) -> &Rc<Instance> {
        &self.instance
    }

    /// Class at which method lookup begins.
    #[inline]
    pub fn start(&self) -> &Rc<ClassValue> {
        &self.start
    }
}

impl PartialEq for SuperRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.instance, &other.instance) && Rc::ptr_eq(&self.start, &other.start)
    }
}

impl fmt::Debug for SuperRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuperRef")
            .field("class", &self.instance.class.name)
            .field("start", &self.start.name)
            .finish()
    }
}

/// Class objects for the built-in value types, all deriving from `Object`.
pub struct BuiltinClasses {
    pub object: Rc<ClassValue>,
    pub nil: Rc<ClassValue>,
    pub boolean: Rc<ClassValue>,
    pub number: Rc<ClassValue>,
    pub string: Rc<ClassValue>,
    pub list: Rc<ClassValue>,
    pub function: Rc<ClassValue>,
    pub class: Rc<ClassValue>,
}

impl BuiltinClasses {
    pub fn new(interner: &StringInterner) -> Self {
        let object = Rc::new(ClassValue::new(
            interner.intern("Object"),
            None,
            FxHashMap::default(),
        ));
        let derived = |name: &str| {
            Rc::new(ClassValue::new(
                interner.intern(name),
                Some(Rc::clone(&object)),
                FxHashMap::default(),
            ))
        };
        BuiltinClasses {
            nil: derived("Nil"),
            boolean: derived("Boolean"),
            number: derived("Number"),
            string: derived("String"),
            list: derived("List"),
            function: derived("Function"),
            class: derived("Class"),
            object,
        }
    }

    pub fn all(&self) -> [&Rc<ClassValue>; 8] {
        [
            &self.object,
            &self.nil,
            &self.boolean,
            &self.number,
            &self.string,
            &self.list,
            &self.function,
            &self.class,
        ]
    }
}
