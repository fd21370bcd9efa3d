use crate::ast::{Ast, Callable, FunctionError, FunctionHandle, RuntimeBody, Unit, Value};
use log::trace;
use std::sync::Arc;

/// Arguments of the runtime function currently being evaluated.
struct Frame<'a> {
    owner: &'a Arc<RuntimeBody>,
    args: &'a [Value],
}

/// Tree-walking evaluator.
///
/// Arithmetic works on the numeric view of its operands. Call arguments are
/// evaluated strictly left to right before the callee runs. Errors returned by
/// callables are propagated unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, unit: &Unit) -> Result<Value, FunctionError> {
        self.evaluate_node(unit.root(), None)
    }

    /// Runs the body of a runtime function with `args` as its positional arguments.
    pub(crate) fn call_runtime(
        &self,
        body: &Arc<RuntimeBody>,
        args: &[Value],
    ) -> Result<Value, FunctionError> {
        trace!("Calling runtime function {} with {} args", body.name(), args.len());
        let program = body.program();
        let frame = Frame { owner: body, args };
        self.evaluate_node(program.root(), Some(&frame))
    }

    fn evaluate_node(&self, node: &Ast, frame: Option<&Frame<'_>>) -> Result<Value, FunctionError> {
        match node {
            Ast::Literal(value) => Ok(value.clone()),

            Ast::BinaryOperation {
                operator,
                left,
                right,
            } => {
                let left_value = self.evaluate_node(left, frame)?.as_number();
                let right_value = self.evaluate_node(right, frame)?.as_number();
                let result = operator.apply(left_value, right_value);
                trace!("{} {} {} = {}", left_value, operator, right_value, result);
                Ok(Value::Number(result))
            }

            Ast::Call { function, args } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.evaluate_node(arg, frame)?);
                }
                self.invoke(function, &values, frame)
            }
        }
    }

    fn invoke(
        &self,
        function: &FunctionHandle,
        args: &[Value],
        frame: Option<&Frame<'_>>,
    ) -> Result<Value, FunctionError> {
        trace!("Invoking {} with {:?}", function.name(), args);
        match function.callable() {
            Callable::Native(native) => native(args),
            Callable::Runtime(body) => self.call_runtime(body, args),
            Callable::Arguments(owner) => {
                let frame = frame
                    .filter(|frame| std::ptr::eq(owner.as_ptr(), Arc::as_ptr(frame.owner)))
                    .ok_or_else(|| FunctionError::NoActiveArguments(function.name().to_string()))?;
                read_argument(function.name(), frame.owner, frame.args, args)
            }
        }
    }
}

// `_N` placeholders are 1-based.
fn read_argument(
    reader: &str,
    body: &RuntimeBody,
    available: &[Value],
    args: &[Value],
) -> Result<Value, FunctionError> {
    let [index] = args else {
        return Err(FunctionError::ArgumentCount {
            function: reader.to_string(),
            expected: 1,
            found: args.len(),
        });
    };
    let position = index.as_number();
    let out_of_range = || FunctionError::ArgumentOutOfRange {
        function: body.name().to_string(),
        index: position,
        available: available.len(),
    };
    if position.is_nan() || position < 1.0 {
        return Err(out_of_range());
    }
    available
        .get(position as usize - 1)
        .cloned()
        .ok_or_else(out_of_range)
}
