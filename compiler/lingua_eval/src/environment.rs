//! Scope frames and the active-frame environment.
//!
//! Frames form a parent-linked chain ending at the global frame. A closure
//! keeps a [`LocalScope`] handle to the frame it was defined in; calling it
//! creates a child of that frame and makes the child active. Lookup walks
//! from the active frame outward, so a function body sees its parameters,
//! then its defining scopes, then globals, and never the caller's locals.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use lingua_ir::Name;

use crate::Value;

/// Error returned by [`Frame::assign`] when no frame in the chain binds the
/// name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    Undefined,
}

/// Shared, single-threaded handle to interior-mutable state.
///
/// Wraps `Rc<RefCell<T>>` so every frame allocation goes through
/// [`LocalScope::new`]. Not `Send`: an interpreter and its frames stay on
/// one thread.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Whether both handles point at the same allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(inner) => inner.fmt(f),
            Err(_) => f.write_str("LocalScope(<borrowed>)"),
        }
    }
}

/// One scope level: a name, its bindings, and its parent.
pub struct Frame {
    name: String,
    bindings: FxHashMap<Name, Value>,
    parent: Option<LocalScope<Frame>>,
}

impl Frame {
    /// Frame with no parent. Used for the global frame and for scratch
    /// frames that must not see any enclosing scope.
    pub fn root(name: impl Into<String>) -> Self {
        Frame {
            name: name.into(),
            bindings: FxHashMap::default(),
            parent: None,
        }
    }

    pub fn child(name: impl Into<String>, parent: LocalScope<Frame>) -> Self {
        Frame {
            name: name.into(),
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Scratch frame for speculative pattern matching.
    pub fn detached() -> Self {
        Frame::root("<probe>")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&LocalScope<Frame>> {
        self.parent.as_ref()
    }

    /// Bind `name` in this frame, replacing any existing local binding.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.bindings.insert(name, value);
    }

    /// Binding held directly by this frame.
    #[inline]
    pub fn get_local(&self, name: Name) -> Option<&Value> {
        self.bindings.get(&name)
    }

    /// Resolve `name` in this frame, then its ancestors.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        if let Some(value) = self.bindings.get(&name) {
            return Some(value.clone());
        }
        let mut next = self.parent.clone();
        while let Some(scope) = next {
            let frame = scope.borrow();
            if let Some(value) = frame.bindings.get(&name) {
                return Some(value.clone());
            }
            next = frame.parent.clone();
        }
        None
    }

    /// Rebind the nearest existing binding of `name`.
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), AssignError> {
        if let Some(slot) = self.bindings.get_mut(&name) {
            *slot = value;
            return Ok(());
        }
        let mut next = self.parent.clone();
        while let Some(scope) = next {
            let mut frame = scope.borrow_mut();
            if let Some(slot) = frame.bindings.get_mut(&name) {
                *slot = value;
                return Ok(());
            }
            next = frame.parent.clone();
        }
        Err(AssignError::Undefined)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// Bindings are listed by name only; closures bound here point back at the
// frame and would recurse.
impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.bindings.keys().copied().collect();
        names.sort_unstable_by_key(|name| name.raw());
        f.debug_struct("Frame")
            .field("name", &self.name)
            .field("bindings", &names)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

/// The active frame plus the global frame at the root of every chain.
pub struct Environment {
    current: LocalScope<Frame>,
    global: LocalScope<Frame>,
}

impl Environment {
    /// Environment with a fresh, empty global frame.
    pub fn new() -> Self {
        Self::with_globals(LocalScope::new(Frame::root("<global>")))
    }

    /// Environment rooted at an explicitly built global frame.
    pub fn with_globals(global: LocalScope<Frame>) -> Self {
        Environment {
            current: global.clone(),
            global,
        }
    }

    /// Push a child of the active frame and make it active.
    pub fn push_frame(&mut self, name: impl Into<String>) {
        let name = name.into();
        tracing::trace!(frame = %name, depth = self.depth() + 1, "push frame");
        let child = Frame::child(name, self.current.clone());
        self.current = LocalScope::new(child);
    }

    /// Re-activate the parent of the active frame.
    ///
    /// # Panics
    /// Popping the global frame is a bug in the caller.
    pub fn pop_frame(&mut self) {
        let parent = self.current.borrow().parent.clone();
        match parent {
            Some(parent) => {
                tracing::trace!(frame = %self.current.borrow().name, "pop frame");
                self.current = parent;
            }
            None => panic!("pop_frame: cannot pop the global frame"),
        }
    }

    #[inline]
    pub fn define(&mut self, name: Name, value: Value) {
        self.current.borrow_mut().define(name, value);
    }

    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.current.borrow().lookup(name)
    }

    #[inline]
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), AssignError> {
        self.current.borrow_mut().assign(name, value)
    }

    /// Handle to the active frame.
    #[inline]
    pub fn current_frame(&self) -> LocalScope<Frame> {
        self.current.clone()
    }

    /// Make `frame` active, returning the previously active frame.
    pub fn replace_frame(&mut self, frame: LocalScope<Frame>) -> LocalScope<Frame> {
        std::mem::replace(&mut self.current, frame)
    }

    #[inline]
    pub fn globals(&self) -> LocalScope<Frame> {
        self.global.clone()
    }

    pub fn is_global_active(&self) -> bool {
        self.current.ptr_eq(&self.global)
    }

    /// Number of frames in the active chain, the root included.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut next = self.current.borrow().parent.clone();
        while let Some(scope) = next {
            depth += 1;
            next = scope.borrow().parent.clone();
        }
        depth
    }

    /// Names of the active chain, innermost first.
    pub fn frame_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut next = Some(self.current.clone());
        while let Some(scope) = next {
            let frame = scope.borrow();
            names.push(frame.name.clone());
            next = frame.parent.clone();
        }
        names
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
