use crate::ast::{FunctionError, Unit, Value};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};

pub type Function = Arc<dyn Fn(&[Value]) -> Result<Value, FunctionError> + Send + Sync>;

/// Body of a runtime-defined function. The compiled template can be swapped
/// while call sites keep pointing at the same body.
pub(crate) struct RuntimeBody {
    name: String,
    program: RwLock<Arc<Unit>>,
}

impl RuntimeBody {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            program: RwLock::new(Arc::new(Unit::default())),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn program(&self) -> Arc<Unit> {
        self.program.read().clone()
    }

    pub(crate) fn replace_program(&self, unit: Unit) {
        *self.program.write() = Arc::new(unit);
    }
}

#[derive(Clone)]
pub(crate) enum Callable {
    Native(Function),
    Runtime(Arc<RuntimeBody>),
    /// Positional argument reader of a runtime function. Weak because the
    /// function's own body holds calls to it.
    Arguments(Weak<RuntimeBody>),
}

impl Callable {
    fn same_target(&self, other: &Callable) -> bool {
        match (self, other) {
            (Callable::Native(a), Callable::Native(b)) => Arc::ptr_eq(a, b),
            (Callable::Runtime(a), Callable::Runtime(b)) => Arc::ptr_eq(a, b),
            (Callable::Arguments(a), Callable::Arguments(b)) => Weak::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// A function resolved at parse time. Call nodes keep the handle, so later
/// re-registrations of the same name do not reach already compiled programs.
#[derive(Clone)]
pub struct FunctionHandle {
    name: Arc<str>,
    callable: Callable,
}

impl FunctionHandle {
    pub(crate) fn new(name: &str, callable: Callable) -> Self {
        Self {
            name: Arc::from(name),
            callable,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn callable(&self) -> &Callable {
        &self.callable
    }
}

impl PartialEq for FunctionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.callable.same_target(&other.callable)
    }
}

impl fmt::Debug for FunctionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FunctionHandle").field(&self.name).finish()
    }
}

/// Name to function map. The last registration of a name wins; there is no removal.
#[derive(Default, Clone)]
pub struct FunctionTable {
    functions: HashMap<String, FunctionHandle>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: &str, callable: Callable) {
        self.functions
            .insert(name.to_string(), FunctionHandle::new(name, callable));
    }

    pub fn get(&self, name: &str) -> Option<FunctionHandle> {
        self.functions.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(value: f64) -> Callable {
        Callable::Native(Arc::new(move |_args: &[Value]| -> Result<Value, FunctionError> {
            Ok(Value::Number(value))
        }))
    }

    #[test]
    fn test_last_registration_wins() {
        let mut table = FunctionTable::new();
        table.insert("answer", constant(41.0));
        let first = table.get("answer").unwrap();
        table.insert("answer", constant(42.0));
        let second = table.get("answer").unwrap();

        assert_eq!(table.len(), 1);
        assert_ne!(first, second);
        assert_eq!(second, table.get("answer").unwrap());
    }

    #[test]
    fn test_missing_function() {
        let table = FunctionTable::new();
        assert!(table.is_empty());
        assert!(!table.contains("nope"));
        assert!(table.get("nope").is_none());
    }

    #[test]
    fn test_runtime_body_swaps_program() {
        let body = RuntimeBody::new("roger");
        let before = body.program();
        body.replace_program(Unit::new(crate::ast::Ast::Literal(Value::Number(7.0))));

        assert_eq!(body.name(), "roger");
        assert_eq!(before.to_string(), "0");
        assert_eq!(body.program().to_string(), "7");
    }
}
