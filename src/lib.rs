//! Compiles short arithmetic expressions into a tree and evaluates them, with
//! user-registered functions and functions defined at runtime from templates.

pub mod ast;
pub mod functions;

mod expression;
mod runtime;

pub use ast::{ExpressionError, FunctionError, Value};
pub use expression::Expression;
pub use runtime::{rewrite_placeholders, RuntimeFunction};

use functions::register_functions;

/// Compiles and evaluates `text` once, with the built-in function library available.
pub fn evaluate_expression(text: &str) -> Result<Value, ExpressionError> {
    let mut expression = Expression::new();
    register_functions(&expression)?;
    expression.compile(text)?;
    Ok(expression.eval()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_expression() {
        assert_eq!(evaluate_expression("4+3*2").unwrap(), Value::Number(10.0));
        assert_eq!(evaluate_expression("sqrt(9)^2").unwrap(), Value::Number(9.0));
        assert!(matches!(
            evaluate_expression("nope(1)"),
            Err(ExpressionError::UnknownFunction(_))
        ));
        assert!(matches!(
            evaluate_expression("sin()"),
            Err(ExpressionError::Function(FunctionError::ArgumentCount { .. }))
        ));
    }
}
