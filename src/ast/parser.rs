use crate::ast::{
    Ast, BinaryOperator, Callable, ExpressionError, FunctionTable, Unit, Value,
};
use log::debug;
use parking_lot::RwLock;
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;
use std::sync::Arc;

#[derive(Parser)]
#[grammar = "./expression.pest"]
pub struct ExpressionParser;

/// Grammar plus the symbol table of callable names.
///
/// Cloning a `Grammar` shares the table: a function registered through any clone
/// is visible to every other clone, whenever the registration happens.
#[derive(Clone, Default)]
pub struct Grammar {
    functions: Arc<RwLock<FunctionTable>>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(letter | '_') (letter | digit | '_')*`
    pub fn is_valid_function_name(name: &str) -> bool {
        ExpressionParser::parse(Rule::function_name, name).is_ok()
    }

    pub fn contains_function(&self, name: &str) -> bool {
        self.functions.read().contains(name)
    }

    pub(crate) fn add_function(&self, name: &str, callable: Callable) -> Result<(), ExpressionError> {
        if !Self::is_valid_function_name(name) {
            debug!("Rejected function name: {:?}", name);
            return Err(ExpressionError::InvalidFunctionName(name.to_string()));
        }
        debug!("Registering function: {}", name);
        self.functions.write().insert(name, callable);
        Ok(())
    }

    /// Parses `input` into a `Unit`. The whole input must be consumed, and every
    /// call must name an already registered function.
    pub fn parse(&self, input: &str) -> Result<Unit, ExpressionError> {
        debug!("Parsing expression: {}", input);
        let mut pairs = ExpressionParser::parse(Rule::unit, input).map_err(Box::new)?;
        let unit = next_pair(&mut pairs);

        let functions = self.functions.read();
        let builder = AstBuilder {
            functions: &functions,
        };
        let root = builder.build(next_pair(&mut unit.into_inner()))?;
        debug!("Parse result: {}", root);
        Ok(Unit::new(root))
    }
}

fn next_pair<'i>(pairs: &mut Pairs<'i, Rule>) -> Pair<'i, Rule> {
    match pairs.next() {
        Some(pair) => pair,
        None => unreachable!("grammar guarantees the operand is present"),
    }
}

struct AstBuilder<'a> {
    functions: &'a FunctionTable,
}

impl AstBuilder<'_> {
    fn build(&self, pair: Pair<Rule>) -> Result<Ast, ExpressionError> {
        match pair.as_rule() {
            Rule::sum | Rule::product | Rule::power => self.build_operation(pair),
            Rule::group => self.build(next_pair(&mut pair.into_inner())),
            Rule::number => Ok(Ast::Literal(Value::Number(parse_number(pair.as_str())))),
            Rule::string => Ok(Ast::Literal(Value::Text(decode_string(pair)))),
            Rule::call => self.build_call(pair),
            rule => unreachable!("unexpected rule in expression: {:?}", rule),
        }
    }

    // `left (op right)?` where `right` recurses at the same level.
    fn build_operation(&self, pair: Pair<Rule>) -> Result<Ast, ExpressionError> {
        let mut pairs = pair.into_inner();
        let left = self.build(next_pair(&mut pairs))?;

        let Some(operator_pair) = pairs.next() else {
            return Ok(left);
        };
        let operator = match BinaryOperator::try_from(operator_pair.as_str()) {
            Ok(operator) => operator,
            Err(message) => unreachable!("{}", message),
        };
        let right = self.build(next_pair(&mut pairs))?;
        Ok(Ast::binary(operator, left, right))
    }

    fn build_call(&self, pair: Pair<Rule>) -> Result<Ast, ExpressionError> {
        let mut pairs = pair.into_inner();
        let name = next_pair(&mut pairs).as_str();
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| ExpressionError::UnknownFunction(name.to_string()))?;

        let args = pairs
            .map(|arg| self.build(arg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Ast::Call { function, args })
    }
}

fn parse_number(text: &str) -> f64 {
    match text.parse::<f64>() {
        Ok(value) => value,
        Err(_) => unreachable!("number token {:?} is not a float", text),
    }
}

fn decode_string(pair: Pair<Rule>) -> String {
    let mut text = String::new();
    for part in pair.into_inner() {
        let raw = part.as_str();
        match part.as_rule() {
            Rule::plain => text.push_str(raw),
            Rule::escape => text.push(match raw.as_bytes()[1] {
                b'a' => '\u{07}',
                b'b' => '\u{08}',
                b'f' => '\u{0C}',
                b'n' => '\n',
                b'r' => '\r',
                b't' => '\t',
                b'v' => '\u{0B}',
                other => char::from(other),
            }),
            Rule::hex_escape => {
                if let Ok(byte) = u8::from_str_radix(&raw[2..], 16) {
                    text.push(char::from(byte));
                }
            }
            rule => unreachable!("unexpected rule in string literal: {:?}", rule),
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::FunctionError;

    fn one() -> Callable {
        Callable::Native(Arc::new(|_args: &[Value]| -> Result<Value, FunctionError> {
            Ok(Value::Number(1.0))
        }))
    }

    fn grammar() -> Grammar {
        let grammar = Grammar::new();
        for name in ["f", "g", "Pi"] {
            grammar.add_function(name, one()).unwrap();
        }
        grammar
    }

    fn parse(input: &str) -> String {
        grammar().parse(input).unwrap().to_string()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(parse("4+3*2"), "(+ 4 (* 3 2))");
        assert_eq!(parse("4*3+2"), "(+ (* 4 3) 2)");
        assert_eq!(parse("2*3^2"), "(* 2 (^ 3 2))");
    }

    #[test]
    fn test_chains_group_to_the_right() {
        assert_eq!(parse("2^3^2"), "(^ 2 (^ 3 2))");
        assert_eq!(parse("8-4-2"), "(- 8 (- 4 2))");
        assert_eq!(parse("8/4*2"), "(/ 8 (* 4 2))");
    }

    #[test]
    fn test_groups_restart_at_lowest_level() {
        assert_eq!(parse("(8-4)-2"), "(- (- 8 4) 2)");
        assert_eq!(parse("((1))"), "1");
        assert_eq!(parse("(1+2)^2"), "(^ (+ 1 2) 2)");
    }

    #[test]
    fn test_signed_number_literals() {
        assert_eq!(parse("2--1"), "(- 2 -1)");
        assert_eq!(parse("4++1"), "(+ 4 1)");
        assert_eq!(parse("-2^2"), "(^ -2 2)");
        assert_eq!(parse("13.21^(-1.)"), "(^ 13.21 -1)");
        assert_eq!(parse(".5e1"), "5");
        assert!(grammar().parse("-(1)").is_err());
    }

    #[test]
    fn test_whitespace_is_skipped() {
        assert_eq!(parse("  4 +\t3 *\n2 "), "(+ 4 (* 3 2))");
        assert_eq!(parse("f ( 1 , 2 )"), "f(1, 2)");
    }

    #[test]
    fn test_calls() {
        assert_eq!(parse("Pi()"), "Pi()");
        assert_eq!(parse("f(1, g(2), 3+4)"), "f(1, g(2), (+ 3 4))");
        assert_eq!(parse("f(Pi())^2"), "(^ f(Pi()) 2)");
    }

    #[test]
    fn test_unknown_function_fails() {
        let result = grammar().parse("h(1)");
        assert!(matches!(result, Err(ExpressionError::UnknownFunction(name)) if name == "h"));
    }

    #[test]
    fn test_trailing_input_fails() {
        assert!(matches!(
            grammar().parse("4++-1,5*/1523"),
            Err(ExpressionError::Parse(_))
        ));
        assert!(grammar().parse("4 2").is_err());
        assert!(grammar().parse("f(1,)").is_err());
        assert!(grammar().parse("").is_err());
    }

    #[test]
    fn test_string_escapes() {
        let unit = grammar().parse(r#""\n\\\\""#).unwrap();
        assert_eq!(unit.root(), &Ast::Literal(Value::Text("\n\\\\".to_string())));

        let unit = grammar().parse(r#""a\a\b\f\r\t\v\'\"\ \/z""#).unwrap();
        assert_eq!(
            unit.root(),
            &Ast::Literal(Value::Text("a\u{07}\u{08}\u{0C}\r\t\u{0B}'\" /z".to_string()))
        );
    }

    #[test]
    fn test_string_hex_escape() {
        let unit = grammar().parse(r#""\x41B\x7a""#).unwrap();
        assert_eq!(unit.root(), &Ast::Literal(Value::Text("ABz".to_string())));
    }

    #[test]
    fn test_string_rejects_raw_punctuation() {
        assert!(grammar().parse(r#""hello world""#).is_err());
        assert!(grammar().parse(r#""what?""#).is_err());
        assert!(grammar().parse(r#""\q""#).is_err());
        assert_eq!(parse(r#""""#), "\"\"");
    }

    #[test]
    fn test_function_name_validity() {
        assert!(Grammar::is_valid_function_name("Salut34Roger"));
        assert!(Grammar::is_valid_function_name("_Binder_roger"));
        assert!(Grammar::is_valid_function_name("_"));
        assert!(!Grammar::is_valid_function_name("_12/Invalid?Func+Name"));
        assert!(!Grammar::is_valid_function_name("3d"));
        assert!(!Grammar::is_valid_function_name(""));
        assert!(!Grammar::is_valid_function_name("a b"));
    }

    #[test]
    fn test_rejected_name_is_not_registered() {
        let grammar = Grammar::new();
        let result = grammar.add_function("bad name", one());
        assert!(matches!(result, Err(ExpressionError::InvalidFunctionName(_))));
        assert!(!grammar.contains_function("bad name"));
    }

    #[test]
    fn test_clones_share_the_symbol_table() {
        let first = Grammar::new();
        let second = first.clone();
        first.add_function("late", one()).unwrap();
        assert!(second.parse("late()").is_ok());
    }
}
