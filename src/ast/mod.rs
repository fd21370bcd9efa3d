use std::fmt;

mod error;
mod evaluator;
mod parser;
mod registry;
mod value;

pub use error::*;
pub use evaluator::Evaluator;
pub use parser::{ExpressionParser, Grammar, Rule};
pub use registry::{Function, FunctionHandle, FunctionTable};
pub(crate) use registry::{Callable, RuntimeBody};
pub use value::Value;

/// A node of a compiled expression. Every node owns its children.
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    Literal(Value),
    BinaryOperation {
        operator: BinaryOperator,
        left: Box<Ast>,
        right: Box<Ast>,
    },
    Call {
        function: FunctionHandle,
        args: Vec<Ast>,
    },
}

impl Ast {
    pub fn binary(operator: BinaryOperator, left: Ast, right: Ast) -> Self {
        Ast::BinaryOperation {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ast::Literal(value) => write!(f, "{}", value),
            Ast::BinaryOperation {
                operator,
                left,
                right,
            } => write!(f, "({} {} {})", operator, left, right),
            Ast::Call { function, args } => {
                write!(f, "{}(", function.name())?;
                for (index, arg) in args.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// The single top-level tree produced by one successful parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    root: Ast,
}

impl Unit {
    pub fn new(root: Ast) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Ast {
        &self.root
    }
}

impl Default for Unit {
    fn default() -> Self {
        Self::new(Ast::Literal(Value::default()))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.fmt(f)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOperator {
    /// IEEE 754 arithmetic: division by zero gives an infinity or NaN, never an error.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOperator::Add => left + right,
            BinaryOperator::Subtract => left - right,
            BinaryOperator::Multiply => left * right,
            BinaryOperator::Divide => left / right,
            BinaryOperator::Power => left.powf(right),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Power => "^",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl TryFrom<&str> for BinaryOperator {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "+" => Ok(BinaryOperator::Add),
            "-" => Ok(BinaryOperator::Subtract),
            "*" => Ok(BinaryOperator::Multiply),
            "/" => Ok(BinaryOperator::Divide),
            "^" => Ok(BinaryOperator::Power),
            _ => Err(format!("Unknown operator: {}", value)),
        }
    }
}
