//! # Scientific Expression Evaluator
//!
//! Tokenizer, shunting-yard parser, and RPN evaluator for scientific
//! expressions: arithmetic operators, parentheses, constants, unary
//! trigonometric/logarithmic functions, and variadic statistical functions
//! over comma-separated arguments.
//!
//! ## Example
//!
//! ```rust
//! use reckon_core::calculations::expression::evaluate;
//!
//! assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
//! assert!((evaluate("sin(pi / 2)").unwrap() - 1.0).abs() < 1e-12);
//! assert_eq!(evaluate("mean(1, 2, 3, 4)").unwrap(), 2.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Input parameters for an expression evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpressionInput {
    /// Expression text
    pub expression: String,
}

impl ExpressionInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.expression.trim().is_empty() {
            return Err(CalcError::domain("expression", "Expression is empty"));
        }
        Ok(())
    }
}

/// Results from an expression evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpressionResult {
    /// Evaluated value
    pub value: f64,
}

/// Calculate entry point matching the other calculators.
pub fn calculate(input: &ExpressionInput) -> CalcResult<ExpressionResult> {
    input.validate()?;
    Ok(ExpressionResult {
        value: evaluate(&input.expression)?,
    })
}

/// Evaluate an expression string.
pub fn evaluate(expression: &str) -> CalcResult<f64> {
    let tokens = tokenize(expression)?;
    let rpn = to_rpn(expression, tokens)?;
    eval_rpn(expression, &rpn)
}

// ============================================================================
// Tokenizer
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    /// Function or constant name
    Ident(String),
    Op(BinOp),
    Neg,
    LParen,
    RParen,
    Comma,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl BinOp {
    fn precedence(self) -> u8 {
        match self {
            BinOp::Add | BinOp::Sub => 2,
            BinOp::Mul | BinOp::Div | BinOp::Rem => 3,
            BinOp::Pow => 4,
        }
    }

    fn right_associative(self) -> bool {
        self == BinOp::Pow
    }

    fn apply(self, lhs: f64, rhs: f64) -> CalcResult<f64> {
        match self {
            BinOp::Add => Ok(lhs + rhs),
            BinOp::Sub => Ok(lhs - rhs),
            BinOp::Mul => Ok(lhs * rhs),
            BinOp::Div => {
                if rhs == 0.0 {
                    Err(CalcError::domain("division", "Division by zero"))
                } else {
                    Ok(lhs / rhs)
                }
            }
            BinOp::Rem => {
                if rhs == 0.0 {
                    Err(CalcError::domain("remainder", "Division by zero"))
                } else {
                    Ok(lhs % rhs)
                }
            }
            BinOp::Pow => Ok(lhs.powf(rhs)),
        }
    }
}

fn tokenize(expression: &str) -> CalcResult<Vec<(usize, Token)>> {
    let chars: Vec<char> = expression.chars().collect();
    let mut tokens: Vec<(usize, Token)> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' | '\t' => i += 1,
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let text: String = chars[start..i].iter().collect();
                let value = text.parse::<f64>().map_err(|_| {
                    CalcError::parse(expression, start, format!("Invalid number '{}'", text))
                })?;
                tokens.push((start, Token::Number(value)));
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let name: String = chars[start..i].iter().collect();
                tokens.push((start, Token::Ident(name.to_ascii_lowercase())));
            }
            '+' => {
                tokens.push((i, Token::Op(BinOp::Add)));
                i += 1;
            }
            '-' => {
                // Unary when at the start or after an operator, '(' or ','
                let unary = matches!(
                    tokens.last().map(|(_, t)| t),
                    None | Some(Token::Op(_)) | Some(Token::LParen) | Some(Token::Comma)
                        | Some(Token::Neg)
                );
                tokens.push((i, if unary { Token::Neg } else { Token::Op(BinOp::Sub) }));
                i += 1;
            }
            '*' => {
                tokens.push((i, Token::Op(BinOp::Mul)));
                i += 1;
            }
            '/' => {
                tokens.push((i, Token::Op(BinOp::Div)));
                i += 1;
            }
            '%' => {
                tokens.push((i, Token::Op(BinOp::Rem)));
                i += 1;
            }
            '^' => {
                tokens.push((i, Token::Op(BinOp::Pow)));
                i += 1;
            }
            '(' => {
                tokens.push((i, Token::LParen));
                i += 1;
            }
            ')' => {
                tokens.push((i, Token::RParen));
                i += 1;
            }
            ',' => {
                tokens.push((i, Token::Comma));
                i += 1;
            }
            other => {
                return Err(CalcError::parse(
                    expression,
                    i,
                    format!("Unexpected character '{}'", other),
                ));
            }
        }
    }

    if tokens.is_empty() {
        return Err(CalcError::domain("expression", "Expression is empty"));
    }
    Ok(tokens)
}

// ============================================================================
// Shunting-yard
// ============================================================================

#[derive(Debug, Clone)]
enum Rpn {
    Number(f64),
    Op(BinOp),
    Neg,
    Func { name: String, args: usize },
}

#[derive(Debug)]
enum StackItem {
    Op(BinOp),
    Neg,
    LParen { position: usize },
    Func { name: String, position: usize },
}

fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(std::f64::consts::PI),
        "e" => Some(std::f64::consts::E),
        _ => None,
    }
}

fn is_function(name: &str) -> bool {
    matches!(
        name,
        "sin" | "cos" | "tan" | "asin" | "acos" | "atan" | "sqrt" | "ln" | "log" | "abs"
            | "exp" | "mean" | "min" | "max" | "sum"
    )
}

fn to_rpn(expression: &str, tokens: Vec<(usize, Token)>) -> CalcResult<Vec<Rpn>> {
    let mut output = Vec::new();
    let mut stack: Vec<StackItem> = Vec::new();
    // Argument counts for nested function calls
    let mut arg_counts: Vec<usize> = Vec::new();

    let mut iter = tokens.into_iter().peekable();
    while let Some((position, token)) = iter.next() {
        match token {
            Token::Number(value) => output.push(Rpn::Number(value)),
            Token::Ident(name) => {
                let is_call = matches!(iter.peek(), Some((_, Token::LParen)));
                if is_call && is_function(&name) {
                    iter.next(); // consume '('
                    stack.push(StackItem::Func { name, position });
                    arg_counts.push(1);
                } else if let Some(value) = constant(&name) {
                    output.push(Rpn::Number(value));
                } else {
                    return Err(CalcError::parse(
                        expression,
                        position,
                        format!("Unknown identifier '{}'", name),
                    ));
                }
            }
            Token::Neg => stack.push(StackItem::Neg),
            Token::Op(op) => {
                while let Some(top) = stack.last() {
                    let pop = match top {
                        StackItem::Neg => true,
                        StackItem::Op(other) => {
                            other.precedence() > op.precedence()
                                || (other.precedence() == op.precedence()
                                    && !op.right_associative())
                        }
                        _ => false,
                    };
                    if !pop {
                        break;
                    }
                    match stack.pop().unwrap() {
                        StackItem::Op(o) => output.push(Rpn::Op(o)),
                        StackItem::Neg => output.push(Rpn::Neg),
                        _ => unreachable!(),
                    }
                }
                stack.push(StackItem::Op(op));
            }
            Token::LParen => stack.push(StackItem::LParen { position }),
            Token::Comma => {
                loop {
                    match stack.last() {
                        Some(StackItem::Op(_)) | Some(StackItem::Neg) => {
                            match stack.pop().unwrap() {
                                StackItem::Op(o) => output.push(Rpn::Op(o)),
                                StackItem::Neg => output.push(Rpn::Neg),
                                _ => unreachable!(),
                            }
                        }
                        Some(StackItem::Func { .. }) => break,
                        _ => {
                            return Err(CalcError::parse(
                                expression,
                                position,
                                "Comma outside a function call",
                            ));
                        }
                    }
                }
                let count = arg_counts.last_mut().ok_or_else(|| {
                    CalcError::parse(expression, position, "Comma outside a function call")
                })?;
                *count += 1;
            }
            Token::RParen => {
                loop {
                    match stack.pop() {
                        Some(StackItem::Op(o)) => output.push(Rpn::Op(o)),
                        Some(StackItem::Neg) => output.push(Rpn::Neg),
                        Some(StackItem::LParen { .. }) => break,
                        Some(StackItem::Func { name, .. }) => {
                            let args = arg_counts.pop().unwrap_or(1);
                            output.push(Rpn::Func { name, args });
                            break;
                        }
                        None => {
                            return Err(CalcError::parse(
                                expression,
                                position,
                                "Unmatched closing parenthesis",
                            ));
                        }
                    }
                }
            }
        }
    }

    while let Some(item) = stack.pop() {
        match item {
            StackItem::Op(o) => output.push(Rpn::Op(o)),
            StackItem::Neg => output.push(Rpn::Neg),
            StackItem::LParen { position } | StackItem::Func { position, .. } => {
                return Err(CalcError::parse(
                    expression,
                    position,
                    "Unmatched opening parenthesis",
                ));
            }
        }
    }

    Ok(output)
}

// ============================================================================
// RPN evaluation
// ============================================================================

fn apply_unary(name: &str, x: f64) -> CalcResult<f64> {
    let value = match name {
        "sin" => x.sin(),
        "cos" => x.cos(),
        "tan" => x.tan(),
        "asin" => {
            if !(-1.0..=1.0).contains(&x) {
                return Err(CalcError::domain("asin", "Argument must be in [-1, 1]"));
            }
            x.asin()
        }
        "acos" => {
            if !(-1.0..=1.0).contains(&x) {
                return Err(CalcError::domain("acos", "Argument must be in [-1, 1]"));
            }
            x.acos()
        }
        "atan" => x.atan(),
        "sqrt" => {
            if x < 0.0 {
                return Err(CalcError::domain(
                    "sqrt",
                    "Square root of a negative number",
                ));
            }
            x.sqrt()
        }
        "ln" => {
            if x <= 0.0 {
                return Err(CalcError::domain("ln", "Logarithm of a non-positive number"));
            }
            x.ln()
        }
        "log" => {
            if x <= 0.0 {
                return Err(CalcError::domain(
                    "log",
                    "Logarithm of a non-positive number",
                ));
            }
            x.log10()
        }
        "abs" => x.abs(),
        "exp" => x.exp(),
        _ => {
            return Err(CalcError::Internal {
                message: format!("Unknown unary function '{}'", name),
            });
        }
    };
    Ok(value)
}

fn apply_statistical(name: &str, args: &[f64]) -> CalcResult<f64> {
    let value = match name {
        "sum" => args.iter().sum(),
        "mean" => args.iter().sum::<f64>() / args.len() as f64,
        "min" => args.iter().copied().fold(f64::INFINITY, f64::min),
        "max" => args.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        _ => {
            return Err(CalcError::Internal {
                message: format!("Unknown statistical function '{}'", name),
            });
        }
    };
    Ok(value)
}

fn eval_rpn(expression: &str, rpn: &[Rpn]) -> CalcResult<f64> {
    let mut stack: Vec<f64> = Vec::new();

    for item in rpn {
        match item {
            Rpn::Number(value) => stack.push(*value),
            Rpn::Neg => {
                let x = stack.pop().ok_or_else(|| {
                    CalcError::parse(expression, 0, "Missing operand for unary minus")
                })?;
                stack.push(-x);
            }
            Rpn::Op(op) => {
                let rhs = stack.pop();
                let lhs = stack.pop();
                match (lhs, rhs) {
                    (Some(lhs), Some(rhs)) => stack.push(op.apply(lhs, rhs)?),
                    _ => {
                        return Err(CalcError::parse(
                            expression,
                            0,
                            "Missing operand for binary operator",
                        ));
                    }
                }
            }
            Rpn::Func { name, args } => {
                if stack.len() < *args {
                    return Err(CalcError::parse(
                        expression,
                        0,
                        format!("Missing arguments for '{}'", name),
                    ));
                }
                let values: Vec<f64> = stack.split_off(stack.len() - args);
                let result = if matches!(name.as_str(), "sum" | "mean" | "min" | "max") {
                    apply_statistical(name, &values)?
                } else if values.len() == 1 {
                    apply_unary(name, values[0])?
                } else {
                    return Err(CalcError::parse(
                        expression,
                        0,
                        format!("'{}' takes exactly one argument", name),
                    ));
                };
                stack.push(result);
            }
        }
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(value), true) => Ok(value),
        _ => Err(CalcError::parse(expression, 0, "Malformed expression")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic_precedence() {
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(evaluate("(2 + 3) * 4").unwrap(), 20.0);
        assert_eq!(evaluate("10 - 4 - 3").unwrap(), 3.0);
        assert_eq!(evaluate("10 % 3").unwrap(), 1.0);
    }

    #[test]
    fn test_power_right_associative() {
        // 2^3^2 = 2^(3^2) = 512
        assert_eq!(evaluate("2 ^ 3 ^ 2").unwrap(), 512.0);
    }

    #[test]
    fn test_unary_minus() {
        assert_eq!(evaluate("-5 + 3").unwrap(), -2.0);
        assert_eq!(evaluate("2 * -3").unwrap(), -6.0);
        assert_eq!(evaluate("-(2 + 3)").unwrap(), -5.0);
        assert_eq!(evaluate("--4").unwrap(), 4.0);
    }

    #[test]
    fn test_constants() {
        assert!((evaluate("pi").unwrap() - std::f64::consts::PI).abs() < 1e-15);
        assert!((evaluate("e ^ 2").unwrap() - std::f64::consts::E.powi(2)).abs() < 1e-12);
    }

    #[test]
    fn test_trig_functions() {
        assert!((evaluate("sin(pi / 2)").unwrap() - 1.0).abs() < 1e-12);
        assert!((evaluate("cos(0)").unwrap() - 1.0).abs() < 1e-12);
        assert!((evaluate("atan(1) * 4").unwrap() - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_log_functions() {
        assert!((evaluate("ln(e)").unwrap() - 1.0).abs() < 1e-12);
        assert!((evaluate("log(1000)").unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_statistical_functions() {
        assert_eq!(evaluate("mean(1, 2, 3, 4)").unwrap(), 2.5);
        assert_eq!(evaluate("min(3, 1, 2)").unwrap(), 1.0);
        assert_eq!(evaluate("max(3, 1, 2)").unwrap(), 3.0);
        assert_eq!(evaluate("sum(1, 2, 3)").unwrap(), 6.0);
        // Nested calls
        assert_eq!(evaluate("mean(min(1, 5), max(2, 3))").unwrap(), 2.0);
    }

    #[test]
    fn test_empty_expression() {
        let err = evaluate("   ").unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_ERROR");

        let err = calculate(&ExpressionInput {
            expression: String::new(),
        })
        .unwrap_err();
        assert_eq!(err.error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(evaluate("2 + $").unwrap_err().error_code(), "PARSE_ERROR");
        assert_eq!(evaluate("(2 + 3").unwrap_err().error_code(), "PARSE_ERROR");
        assert_eq!(evaluate("2 + 3)").unwrap_err().error_code(), "PARSE_ERROR");
        assert_eq!(evaluate("2 +").unwrap_err().error_code(), "PARSE_ERROR");
        assert_eq!(evaluate("foo(1)").unwrap_err().error_code(), "PARSE_ERROR");
        assert_eq!(evaluate("1, 2").unwrap_err().error_code(), "PARSE_ERROR");
    }

    #[test]
    fn test_domain_errors() {
        assert_eq!(evaluate("1 / 0").unwrap_err().error_code(), "DOMAIN_ERROR");
        assert_eq!(evaluate("sqrt(-1)").unwrap_err().error_code(), "DOMAIN_ERROR");
        assert_eq!(evaluate("ln(0)").unwrap_err().error_code(), "DOMAIN_ERROR");
        assert_eq!(evaluate("asin(2)").unwrap_err().error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_parse_error_reports_position() {
        match evaluate("12 + $") {
            Err(CalcError::ParseError { position, .. }) => assert_eq!(position, 5),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
