use crate::ast::{Callable, Evaluator, ExpressionError, FunctionError, Grammar, Unit, Value};
use log::debug;
use std::sync::Arc;

/// A compiled arithmetic expression bound to a set of callable functions.
///
/// Cloning an `Expression` shares its function table with the clone, while the
/// compiled program is copied. Functions registered through either side, before
/// or after the clone, are visible to both. Compiling one never changes the
/// program of the other.
#[derive(Clone, Default)]
pub struct Expression {
    grammar: Grammar,
    program: Unit,
    evaluator: Evaluator,
}

impl Expression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles `text`, replacing the current program only on success.
    pub fn compile(&mut self, text: &str) -> Result<(), ExpressionError> {
        let unit = self.grammar.parse(text).inspect_err(|error| {
            debug!("Compilation of {:?} failed: {}", text, error);
        })?;
        self.program = unit;
        Ok(())
    }

    /// Evaluates the current program. A never compiled expression yields `0`.
    pub fn eval(&self) -> Result<Value, FunctionError> {
        self.evaluator.evaluate(&self.program)
    }

    /// Registers `function` under `name` for every expression sharing this
    /// function table. Already compiled programs keep the function they resolved.
    pub fn register_function<F>(&self, name: &str, function: F) -> Result<(), ExpressionError>
    where
        F: Fn(&[Value]) -> Result<Value, FunctionError> + Send + Sync + 'static,
    {
        self.grammar
            .add_function(name, Callable::Native(Arc::new(function)))
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.grammar.contains_function(name)
    }

    pub fn program(&self) -> &Unit {
        &self.program
    }

    pub(crate) fn grammar(&self) -> &Grammar {
        &self.grammar
    }
}
