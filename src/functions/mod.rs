pub mod math;
pub mod text;

use crate::ast::ExpressionError;
use crate::Expression;

/// Installs the whole function library on `expression` and every expression
/// sharing its function table.
pub fn register_functions(expression: &Expression) -> Result<(), ExpressionError> {
    math::register(expression)?;
    text::register(expression)?;
    Ok(())
}
