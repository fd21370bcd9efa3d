use crate::ast::Rule;
use thiserror::Error;

/// Failures reported by compilation and function registration.
///
/// None of these leave partial state behind: a failed compile keeps the previous
/// program and a rejected registration leaves the function table untouched.
#[derive(Error, Debug)]
pub enum ExpressionError {
    #[error("Parse error: {0}")]
    Parse(#[from] Box<pest::error::Error<Rule>>),
    #[error("Function '{0}' is not registered")]
    UnknownFunction(String),
    #[error("Invalid function name: '{0}'")]
    InvalidFunctionName(String),
    #[error(transparent)]
    Function(#[from] FunctionError),
}

/// Failures raised by callables during evaluation. The evaluator never catches
/// them; they propagate out of `eval`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FunctionError {
    #[error("Function '{function}' expects {expected} arguments, but got {found}")]
    ArgumentCount {
        function: String,
        expected: usize,
        found: usize,
    },
    #[error("Function '{function}' expects argument {position} to be a {expected}")]
    ArgumentType {
        function: String,
        position: usize,
        expected: &'static str,
    },
    #[error("Argument _{index} of '{function}' is out of range ({available} given)")]
    ArgumentOutOfRange {
        function: String,
        index: f64,
        available: usize,
    },
    #[error("'{0}' can only be called while its runtime function is running")]
    NoActiveArguments(String),
    #[error("{0}")]
    Failed(String),
}
