//! Evaluation of small arithmetic formulas with named variables, e.g. `2 * n + offset`.
//!
//! Variables are matched as whole words (so a binding for `n` doesn't affect `n2`), then the
//! expression is evaluated with the usual precedence: `^` (right-associative) binds tightest,
//! followed by unary `-`/`+`, then `*`, `/` and `%`, then `+` and `-`.
//!
//! ```
//! use std::collections::HashMap;
//!
//! let bindings = HashMap::from([("n".to_owned(), 3.0), ("n2".to_owned(), 10.0)]);
//! assert_eq!(bankdraw::formula::evaluate("2 * n + n2", &bindings), Ok(16.0));
//! assert!(bankdraw::formula::evaluate("2 * m", &bindings).is_err());
//! ```

use std::{
    collections::HashMap,
    fmt::{Display, Formatter},
    iter::Peekable,
    vec::IntoIter,
};

use crate::{Error, Result};

/// Substitute `bindings` into `formula` and evaluate the result
pub fn evaluate(formula: &str, bindings: &HashMap<String, f64>) -> Result<f64> {
    eval_inner(formula, bindings).map_err(|cause| Error::Formula {
        formula: formula.to_owned(),
        cause,
    })
}

fn eval_inner(formula: &str, bindings: &HashMap<String, f64>) -> std::result::Result<f64, FormulaError> {
    let tokens = tokenize(formula, bindings)?;
    let mut parser = Parser {
        tokens: tokens.into_iter().peekable(),
        depth: 0,
    };
    let value = parser.expr()?;
    if let Some(tok) = parser.tokens.next() {
        return Err(FormulaError::UnexpectedToken(tok.to_string()));
    }
    if !value.is_finite() {
        return Err(FormulaError::NonFinite);
    }
    Ok(value)
}

/// The ways that evaluating a formula can fail
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaError {
    /// A character which can't appear in any formula
    UnexpectedChar(char),
    /// A variable which isn't in the bindings
    UndefinedVariable(String),
    /// A number literal which couldn't be parsed (e.g. `1.2.3`)
    InvalidNumber(String),
    /// A token which doesn't fit the grammar at this point
    UnexpectedToken(String),
    /// The formula ended part-way through an expression
    UnexpectedEnd,
    DivisionByZero,
    /// The result was infinite or NaN
    NonFinite,
    /// Brackets, signs or powers were nested more than [`MAX_DEPTH`] deep
    TooDeep,
}

/// The deepest that sub-expressions can be nested
pub const MAX_DEPTH: usize = 256;

impl Display for FormulaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormulaError::UnexpectedChar(c) => write!(f, "unexpected character {:?}", c),
            FormulaError::UndefinedVariable(name) => write!(f, "undefined variable {:?}", name),
            FormulaError::InvalidNumber(s) => write!(f, "invalid number {:?}", s),
            FormulaError::UnexpectedToken(t) => write!(f, "unexpected `{}`", t),
            FormulaError::UnexpectedEnd => write!(f, "formula ended unexpectedly"),
            FormulaError::DivisionByZero => write!(f, "division by zero"),
            FormulaError::NonFinite => write!(f, "result is not a finite number"),
            FormulaError::TooDeep => {
                write!(f, "expressions nested more than {} deep", MAX_DEPTH)
            }
        }
    }
}

impl std::error::Error for FormulaError {}

///////////
// LEXER //
///////////

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Num(f64),
    Op(char),
    Open,
    Close,
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Num(n) => write!(f, "{}", n),
            Token::Op(c) => write!(f, "{}", c),
            Token::Open => write!(f, "("),
            Token::Close => write!(f, ")"),
        }
    }
}

/// Split `formula` into [`Token`]s, replacing every variable with its bound value
fn tokenize(
    formula: &str,
    bindings: &HashMap<String, f64>,
) -> std::result::Result<Vec<Token>, FormulaError> {
    let mut tokens = Vec::new();
    let mut chars = formula.char_indices().peekable();
    while let Some(&(start, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '+' | '-' | '*' | '/' | '%' | '^' => {
                chars.next();
                tokens.push(Token::Op(c));
            }
            '(' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ')' => {
                chars.next();
                tokens.push(Token::Close);
            }
            c if c.is_ascii_digit() || c == '.' => {
                let end = take_while(&mut chars, |c| c.is_ascii_digit() || c == '.', formula);
                let literal = &formula[start..end];
                let n = literal
                    .parse::<f64>()
                    .map_err(|_| FormulaError::InvalidNumber(literal.to_owned()))?;
                tokens.push(Token::Num(n));
            }
            c if c.is_alphabetic() || c == '_' => {
                let end = take_while(&mut chars, |c| c.is_alphanumeric() || c == '_', formula);
                let name = &formula[start..end];
                let value = bindings
                    .get(name)
                    .ok_or_else(|| FormulaError::UndefinedVariable(name.to_owned()))?;
                tokens.push(Token::Num(*value));
            }
            _ => return Err(FormulaError::UnexpectedChar(c)),
        }
    }
    Ok(tokens)
}

/// Consume chars while `pred` holds, returning the byte index after the last one consumed
fn take_while(
    chars: &mut Peekable<std::str::CharIndices>,
    pred: impl Fn(char) -> bool,
    formula: &str,
) -> usize {
    while let Some(&(idx, c)) = chars.peek() {
        if !pred(c) {
            return idx;
        }
        chars.next();
    }
    formula.len()
}

////////////
// PARSER //
////////////

/// Recursive descent parser which evaluates as it goes
struct Parser {
    tokens: Peekable<IntoIter<Token>>,
    /// How many calls to [`Parser::unary`] are in progress
    depth: usize,
}

type EvalResult = std::result::Result<f64, FormulaError>;

impl Parser {
    fn expr(&mut self) -> EvalResult {
        let mut acc = self.term()?;
        while let Some(Token::Op(op @ ('+' | '-'))) = self.tokens.peek().copied() {
            self.tokens.next();
            let rhs = self.term()?;
            acc = if op == '+' { acc + rhs } else { acc - rhs };
        }
        Ok(acc)
    }

    fn term(&mut self) -> EvalResult {
        let mut acc = self.unary()?;
        while let Some(Token::Op(op @ ('*' | '/' | '%'))) = self.tokens.peek().copied() {
            self.tokens.next();
            let rhs = self.unary()?;
            acc = match op {
                '*' => acc * rhs,
                _ if rhs == 0.0 => return Err(FormulaError::DivisionByZero),
                '/' => acc / rhs,
                _ => acc % rhs,
            };
        }
        Ok(acc)
    }

    /// Every nested sub-expression passes through here, so this is where nesting is limited
    fn unary(&mut self) -> EvalResult {
        if self.depth >= MAX_DEPTH {
            return Err(FormulaError::TooDeep);
        }
        self.depth += 1;
        let value = self.signed();
        self.depth -= 1;
        value
    }

    fn signed(&mut self) -> EvalResult {
        match self.tokens.peek() {
            Some(Token::Op('-')) => {
                self.tokens.next();
                Ok(-self.unary()?)
            }
            Some(Token::Op('+')) => {
                self.tokens.next();
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> EvalResult {
        let base = self.atom()?;
        if self.tokens.peek() == Some(&Token::Op('^')) {
            self.tokens.next();
            let exponent = self.unary()?; // Recursing into `unary` makes `^` right-associative
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn atom(&mut self) -> EvalResult {
        match self.tokens.next() {
            Some(Token::Num(n)) => Ok(n),
            Some(Token::Open) => {
                let value = self.expr()?;
                match self.tokens.next() {
                    Some(Token::Close) => Ok(value),
                    Some(tok) => Err(FormulaError::UnexpectedToken(tok.to_string())),
                    None => Err(FormulaError::UnexpectedEnd),
                }
            }
            Some(tok) => Err(FormulaError::UnexpectedToken(tok.to_string())),
            None => Err(FormulaError::UnexpectedEnd),
        }
    }
}
