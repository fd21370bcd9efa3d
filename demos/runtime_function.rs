use compact_expression::{Expression, RuntimeFunction, Value};

fn main() {
    pretty_env_logger::init();

    let mut expression = Expression::new();
    let mut roger = RuntimeFunction::new(&expression, "roger").unwrap();
    roger.compile("_1 + _2 * _3").unwrap();

    expression.compile("roger(1,2,2)").unwrap();
    println!("roger(1,2,2) = {}", expression.eval().unwrap());

    let args = [Value::Number(2.0), Value::Number(3.0), Value::Number(4.0)];
    println!("roger(2,3,4) = {}", roger.call(&args).unwrap());

    let mut cube = RuntimeFunction::new(&expression, "cube").unwrap();
    cube.compile("_1^3").unwrap();
    expression.compile("cube(roger(1, 1, 1))").unwrap();
    println!("cube(roger(1,1,1)) = {}", expression.eval().unwrap());

    match expression.compile("roger(1, 2)") {
        Ok(()) => match expression.eval() {
            Ok(value) => println!("roger(1,2) = {}", value),
            Err(err) => println!("roger(1,2) failed: {}", err),
        },
        Err(err) => println!("Compilation failed: {}", err),
    }
}
