use std::{cell::RefCell, fmt, rc::Rc};

use rustc_hash::FxHashMap;

use crate::interpreter::value::core::Object;

/// Shared handle to an [`Environment`].
///
/// Closures and call frames hold these; a scope lives as long as any of them
/// does.
pub type Env = Rc<RefCell<Environment>>;

/// A lexical scope: local bindings plus an optional enclosing scope.
#[derive(Default)]
pub struct Environment {
    store: FxHashMap<String, Object>,
    outer: Option<Env>,
}

impl Environment {
    /// Creates an empty top-level scope.
    #[must_use]
    pub fn new() -> Env {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Creates an empty scope nested inside `outer`.
    #[must_use]
    pub fn new_enclosed(outer: &Env) -> Env {
        Rc::new(RefCell::new(Self { store: FxHashMap::default(),
                                    outer: Some(Rc::clone(outer)), }))
    }

    /// Resolves `name`, searching this scope first and then each enclosing
    /// one. Returns `None` when no scope binds it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => self.outer.as_ref()?.borrow().get(name),
        }
    }

    /// Binds `name` in this scope only, shadowing any outer binding and
    /// replacing a previous local one.
    pub fn set(&mut self, name: impl Into<String>, value: Object) {
        self.store.insert(name.into(), value);
    }
}

// Values may hold closures over this very scope, so only names are shown.
impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.store.keys().collect();
        names.sort();
        f.debug_struct("Environment")
         .field("names", &names)
         .field("outer", &self.outer.as_ref().map(|_| ".."))
         .finish()
    }
}
