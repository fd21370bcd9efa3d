use crate::ast::{ExpressionError, FunctionError, Value};
use crate::Expression;
use compact_expression_macros::expression_fn;

pub fn register(expression: &Expression) -> Result<(), ExpressionError> {
    expression.register_function("Pi", pi)?;
    expression.register_function("sin", sin)?;
    expression.register_function("cos", cos)?;
    expression.register_function("tan", tan)?;
    expression.register_function("atan2", atan2)?;
    expression.register_function("sqrt", sqrt)?;
    expression.register_function("abs", abs)?;
    expression.register_function("exp", exp)?;
    expression.register_function("ln", ln)?;
    Ok(())
}

#[expression_fn]
pub fn pi() -> Result<Value, FunctionError> {
    Ok(Value::Number(std::f64::consts::PI))
}

#[expression_fn]
pub fn sin(x: f64) -> Result<Value, FunctionError> {
    Ok(Value::Number(x.sin()))
}

#[expression_fn]
pub fn cos(x: f64) -> Result<Value, FunctionError> {
    Ok(Value::Number(x.cos()))
}

#[expression_fn]
pub fn tan(x: f64) -> Result<Value, FunctionError> {
    Ok(Value::Number(x.tan()))
}

#[expression_fn]
pub fn atan2(y: f64, x: f64) -> Result<Value, FunctionError> {
    Ok(Value::Number(y.atan2(x)))
}

#[expression_fn]
pub fn sqrt(x: f64) -> Result<Value, FunctionError> {
    Ok(Value::Number(x.sqrt()))
}

#[expression_fn]
pub fn abs(x: f64) -> Result<Value, FunctionError> {
    Ok(Value::Number(x.abs()))
}

#[expression_fn]
pub fn exp(x: f64) -> Result<Value, FunctionError> {
    Ok(Value::Number(x.exp()))
}

// Natural logarithm; `ln(0)` is negative infinity.
#[expression_fn]
pub fn ln(x: f64) -> Result<Value, FunctionError> {
    Ok(Value::Number(x.ln()))
}
