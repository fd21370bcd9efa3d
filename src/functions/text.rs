use crate::ast::{ExpressionError, FunctionError, Value};
use crate::Expression;
use compact_expression_macros::expression_fn;

pub fn register(expression: &Expression) -> Result<(), ExpressionError> {
    expression.register_function("length", length)?;
    expression.register_function("upper", upper)?;
    Ok(())
}

/// Number of characters in a text value.
#[expression_fn]
pub fn length(text: &str) -> Result<Value, FunctionError> {
    Ok(Value::Number(text.chars().count() as f64))
}

#[expression_fn]
pub fn upper(text: String) -> Result<Value, FunctionError> {
    Ok(Value::Text(text.to_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_of_escaped_literal() {
        let mut expression = Expression::new();
        register(&expression).unwrap();
        expression.compile(r#"length("ab\ \x41") * 2"#).unwrap();
        assert_eq!(expression.eval(), Ok(Value::Number(8.0)));
    }

    #[test]
    fn test_upper_returns_text() {
        let mut expression = Expression::new();
        register(&expression).unwrap();
        expression.compile(r#"upper("roger")"#).unwrap();
        assert_eq!(expression.eval(), Ok(Value::from("ROGER")));
    }

    #[test]
    fn test_number_argument_is_rejected() {
        assert_eq!(
            upper(&[Value::Number(1.0)]),
            Err(FunctionError::ArgumentType {
                function: "upper".to_string(),
                position: 1,
                expected: "text",
            })
        );
    }
}
