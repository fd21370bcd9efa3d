use compact_expression::ast::FunctionError;
use compact_expression::functions::register_functions;
use compact_expression::{Expression, Value};
use compact_expression_macros::expression_fn;
use log::debug;
use std::sync::{Arc, Mutex};

#[expression_fn]
fn hypot(a: f64, b: f64) -> Result<Value, FunctionError> {
    Ok(Value::Number(a.hypot(b)))
}

fn print_result(example: usize, result: Result<Value, FunctionError>) {
    match result {
        Ok(value) => println!("[Ex{}] The result is : {}", example, value),
        Err(err) => println!("[Ex{}] Error: {}", example, err),
    }
}

fn main() {
    pretty_env_logger::init();

    // Operator priorities and spaces.
    let mut expression = Expression::new();
    expression.compile("4+3*2").unwrap();
    print_result(1, expression.eval());
    expression
        .compile("4 + 3 * 2 / 13.21^(-1.) - (25-2)*1.7")
        .unwrap();
    print_result(1, expression.eval());

    // Compilation status.
    let status = expression.compile("4+3*2^(6+3)");
    println!("[Ex2] Compiled: {}", status.is_ok());
    let status = expression.compile("4++-1,5*/1523");
    println!("[Ex2] Compiled: {}", status.is_ok());

    // Library functions and a user function.
    let mut expression = Expression::new();
    register_functions(&expression).unwrap();
    expression.register_function("hypot", hypot).unwrap();
    for text in ["sin(Pi()/2)", "atan2(0,-1)", "cos(2*Pi()/3)", "hypot(3, 4)"] {
        expression.compile(text).unwrap();
        debug!("program: {}", expression.program());
        print_result(3, expression.eval());
    }

    // Arguments that change after compilation.
    let arg1 = Arc::new(Mutex::new(0.0));
    let arg2 = Arc::new(Mutex::new(0.0));
    let mut expression = Expression::new();
    for (name, arg) in [("Arg1", &arg1), ("Arg2", &arg2)] {
        let arg = Arc::clone(arg);
        expression
            .register_function(name, move |_args: &[Value]| {
                let value = arg
                    .lock()
                    .map_err(|err| FunctionError::Failed(err.to_string()))?;
                Ok(Value::Number(*value))
            })
            .unwrap();
    }
    expression.compile("4 + 3*Arg1() - Arg2()").unwrap();
    print_result(4, expression.eval());

    *arg1.lock().unwrap() = 2.0;
    *arg2.lock().unwrap() = 5.0;
    print_result(4, expression.eval());

    // A fresh expression does not know Arg1 and Arg2...
    let status = Expression::new().compile("4 + 3*Arg1() - Arg2()");
    println!("[Ex5] Compiled: {}", status.is_ok());

    // ...but a copy does, while keeping its own program.
    let mut copy = expression.clone();
    copy.compile("Arg1() + Arg2()").unwrap();
    print_result(6, expression.eval());
    print_result(6, copy.eval());
}
