//! Function registry: coordinate predicates, generative functions and math.
//!
//! Every function uses the same two-stage calling convention. A [`Function`]
//! is first applied to the [`Coords`] of the cell being compiled, which
//! yields a [`Bound`] callable; that callable then receives the evaluated
//! arguments and the compile [`Scope`] and returns the substitution, or
//! `None` for "no substitution".
//!
//! Lookup in value position checks the generative namespace before the math
//! namespace. Predicates live in their own namespace and are only consulted
//! by conditional blocks, so `@row(2) { }` and `@row()` do not collide.

pub mod generative;
pub mod math;
pub mod predicates;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;

use crate::grid::Coords;
use crate::value::{MemoCache, Value};

/// Mutable state a function may touch while it runs.
pub struct Scope<'a> {
    /// Memo cache for pure functions.
    pub cache: &'a mut MemoCache,
    /// Random source of the current compile.
    pub rng: &'a mut StdRng,
}

/// A function bound to one cell's coordinates.
pub type Bound = Box<dyn FnOnce(&[Value], &mut Scope<'_>) -> Option<Value>>;

/// A registered function: coordinates in, bound callable out.
pub type Function = Arc<dyn Fn(Coords) -> Bound + Send + Sync>;

/// Box a closure as a [`Bound`] callable.
pub fn bound(f: impl FnOnce(&[Value], &mut Scope<'_>) -> Option<Value> + 'static) -> Bound {
    Box::new(f)
}

/// Name → function lookup across the three namespaces.
#[derive(Clone)]
pub struct Registry {
    predicates: HashMap<String, Function>,
    functions: HashMap<String, Function>,
    math: HashMap<String, Function>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// A registry with every built-in predicate, generative function and
    /// math wrapper registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        predicates::register(&mut registry);
        generative::register(&mut registry);
        math::register(&mut registry);
        registry
    }

    /// A registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            predicates: HashMap::new(),
            functions: HashMap::new(),
            math: HashMap::new(),
        }
    }

    /// Register (or replace) a predicate usable as `@name(...) { }`.
    pub fn register_predicate(
        &mut self,
        name: impl Into<String>,
        f: impl Fn(Coords) -> Bound + Send + Sync + 'static,
    ) {
        self.predicates.insert(name.into(), Arc::new(f));
    }

    /// Register (or replace) a function usable as `@name(...)` in values.
    pub fn register_function(
        &mut self,
        name: impl Into<String>,
        f: impl Fn(Coords) -> Bound + Send + Sync + 'static,
    ) {
        self.functions.insert(name.into(), Arc::new(f));
    }

    /// Register a math-library wrapper (consulted after the functions).
    pub(crate) fn register_math(
        &mut self,
        name: impl Into<String>,
        f: impl Fn(Coords) -> Bound + Send + Sync + 'static,
    ) {
        self.math.insert(name.into(), Arc::new(f));
    }

    /// Look up a predicate.
    pub fn predicate(&self, name: &str) -> Option<&Function> {
        self.predicates.get(name)
    }

    /// Look up a value-position function: generative first, then math.
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name).or_else(|| self.math.get(name))
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn sorted(map: &HashMap<String, Function>) -> Vec<&str> {
            let mut names: Vec<&str> = map.keys().map(String::as_str).collect();
            names.sort_unstable();
            names
        }

        f.debug_struct("Registry")
            .field("predicates", &sorted(&self.predicates))
            .field("functions", &sorted(&self.functions))
            .field("math", &sorted(&self.math))
            .finish()
    }
}

/// Argument `i` as a number, if it is one.
pub(crate) fn number_arg(args: &[Value], i: usize) -> Option<f64> {
    args.get(i).and_then(Value::as_number)
}
