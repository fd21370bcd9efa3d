use crate::ast::{Callable, Evaluator, ExpressionError, FunctionError, RuntimeBody, Value};
use crate::Expression;
use log::debug;
use std::sync::Arc;

const ARGUMENT_READER_PREFIX: &str = "_Binder_";

/// A function defined at runtime from a template such as `"_1 + _2 * _3"`.
///
/// Creating one registers two functions on the owning expression's table:
/// `name` itself, and a hidden reader `_Binder_<name>` that returns the `N`th
/// argument of the call being evaluated. Templates are compiled on a private
/// expression sharing that table, so they may call any registered function,
/// including other runtime functions.
pub struct RuntimeFunction {
    name: String,
    reader_name: String,
    expression: Expression,
    body: Arc<RuntimeBody>,
}

impl RuntimeFunction {
    pub fn new(owner: &Expression, name: &str) -> Result<Self, ExpressionError> {
        let expression = owner.clone();
        let body = Arc::new(RuntimeBody::new(name));
        let reader_name = format!("{}{}", ARGUMENT_READER_PREFIX, name);

        let grammar = expression.grammar();
        grammar.add_function(name, Callable::Runtime(Arc::clone(&body)))?;
        grammar.add_function(&reader_name, Callable::Arguments(Arc::downgrade(&body)))?;

        Ok(Self {
            name: name.to_string(),
            reader_name,
            expression,
            body,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Compiles `template` as the body of this function. On failure the
    /// previous body stays in place.
    pub fn compile(&mut self, template: &str) -> Result<(), ExpressionError> {
        let rewritten = rewrite_placeholders(template, &self.reader_name);
        debug!("Runtime function {}: {:?} -> {:?}", self.name, template, rewritten);
        self.expression.compile(&rewritten)?;
        self.body.replace_program(self.expression.program().clone());
        Ok(())
    }

    /// Calls the function directly. `_N` in the template reads `args[N - 1]`.
    pub fn call(&self, args: &[Value]) -> Result<Value, FunctionError> {
        Evaluator::new().call_runtime(&self.body, args)
    }
}

/// Replaces every `_N` (an underscore followed by decimal digits) with
/// `reader(N)`. Everything else, a lone `_` included, is copied as is.
pub fn rewrite_placeholders(template: &str, reader: &str) -> String {
    let mut output = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '_' || !chars.peek().is_some_and(char::is_ascii_digit) {
            output.push(c);
            continue;
        }
        output.push_str(reader);
        output.push('(');
        while let Some(digit) = chars.next_if(char::is_ascii_digit) {
            output.push(digit);
        }
        output.push(')');
    }

    output
}
