use std::collections::HashMap;

use crate::stack::Stack;
use crate::token::{Token, TokenKind};

/// A runtime value on the evaluation stack.
///
/// The value domain is closed: booleans, 64-bit floats, raw byte strings
/// and null. There is no implicit coercion between variants; every
/// operator declares which variants it accepts and the evaluator fails on
/// anything else.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null
    Null,

    /// Boolean
    Bool(bool),

    /// 64-bit float; all numeric literals and bindings evaluate to this
    Number(f64),

    /// Raw bytes from a string literal or string binding
    Bytes(Vec<u8>),
}

// Discriminant used for the equality dispatch, copied out of the peeked
// value so the stack can be mutated afterwards.
#[derive(Clone, Copy)]
enum Tag {
    Null,
    Bool,
    Number,
    Bytes,
}

impl Value {
    /// Human-readable variant name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Bytes(_) => "string",
        }
    }

    fn tag(&self) -> Tag {
        match self {
            Value::Null => Tag::Null,
            Value::Bool(_) => Tag::Bool,
            Value::Number(_) => Tag::Number,
            Value::Bytes(_) => Tag::Bytes,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bytes(b) => write!(f, "\"{}\"", String::from_utf8_lossy(b)),
        }
    }
}

/// Errors that can occur while executing a postfix program.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Empty program, or a final stack that is not exactly one value
    BadExpression,

    /// An operator found fewer operands on the stack than it requires
    NotEnoughOperands { op: &'static str },

    /// A literal whose text does not parse in its declared kind
    BadValue { text: String, expected: &'static str },

    /// A path reference with no entry in the bindings
    ValueNotFound { name: String },

    /// A path bound to something other than a null, number or string token
    PathNotScalar { name: String },

    /// An operand whose variant does not match what the operator demands
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// Division by exactly zero
    DivisionByZero,

    /// A token kind the evaluator has no case for; converter/evaluator
    /// contract violation, not a user input error
    UnsupportedToken { kind: &'static str },
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::BadExpression => write!(f, "bad expression"),
            EvalError::NotEnoughOperands { op } => {
                write!(f, "not enough operands for operation {:?}", op)
            }
            EvalError::BadValue { text, expected } => {
                write!(f, "bad value {:?} for type {:?}", text, expected)
            }
            EvalError::ValueNotFound { name } => write!(f, "value for {:?} not found", name),
            EvalError::PathNotScalar { name } => {
                write!(f, "path value for {:?} must be scalar", name)
            }
            EvalError::TypeMismatch { expected, actual } => {
                write!(f, "type {} cannot be compared to type {}", expected, actual)
            }
            EvalError::DivisionByZero => write!(f, "cannot divide by zero"),
            EvalError::UnsupportedToken { kind } => {
                write!(f, "token not supported in evaluator: {}", kind)
            }
        }
    }
}

impl std::error::Error for EvalError {}

/// Executes a postfix token program against path bindings, producing a
/// single value.
///
/// Literals push their parsed value; path references push the value of
/// their binding; operators pop their operands (the first pop is the
/// right-hand operand, the second the left-hand one) and push the result.
/// Both operands of `&&` / `||` are always evaluated; there is no
/// short-circuiting. A successful run leaves exactly one value on the
/// stack, which is returned.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use sift_lang::{evaluate, infix_to_postfix, tokenize, Value};
///
/// let tokens = tokenize("5 - 3").unwrap();
/// let postfix = infix_to_postfix(&tokens).unwrap();
/// let result = evaluate(&postfix, &HashMap::new()).unwrap();
/// assert_eq!(result, Value::Number(2.0));
/// ```
pub fn evaluate(
    postfix: &[Token],
    bindings: &HashMap<String, Token>,
) -> Result<Value, EvalError> {
    if postfix.is_empty() {
        return Err(EvalError::BadExpression);
    }

    let mut stack: Stack<Value> = Stack::new();

    for token in postfix {
        match token.kind {
            // Literals
            TokenKind::Bool => {
                let val = parse_bool(token)?;
                stack.push(Value::Bool(val));
            }
            TokenKind::Number => {
                let val = parse_number(token)?;
                stack.push(Value::Number(val));
            }
            TokenKind::String => stack.push(Value::Bytes(token.text.clone())),
            TokenKind::Null => stack.push(Value::Null),

            // Path references
            TokenKind::Path => {
                let name = token.text_string();
                let Some(bound) = bindings.get(&name) else {
                    return Err(EvalError::ValueNotFound { name });
                };

                match bound.kind {
                    TokenKind::Null => stack.push(Value::Null),
                    TokenKind::Number => {
                        let val = parse_number(bound)?;
                        stack.push(Value::Number(val));
                    }
                    TokenKind::String => stack.push(Value::Bytes(bound.text.clone())),
                    _ => return Err(EvalError::PathNotScalar { name }),
                }
            }

            // Logical, always eager
            TokenKind::And => {
                let (a, b) = take2_bool(&mut stack, token.kind)?;
                stack.push(Value::Bool(a && b));
            }
            TokenKind::Or => {
                let (a, b) = take2_bool(&mut stack, token.kind)?;
                stack.push(Value::Bool(a || b));
            }
            TokenKind::Not => {
                let a = take1_bool(&mut stack, token.kind)?;
                stack.push(Value::Bool(!a));
            }

            // Equality dispatches on the top operand's variant
            TokenKind::Eq => {
                let eq = equality(&mut stack, token.kind)?;
                stack.push(Value::Bool(eq));
            }
            TokenKind::Neq => {
                let eq = equality(&mut stack, token.kind)?;
                stack.push(Value::Bool(!eq));
            }

            // Relational, numeric only; first pop is the right operand
            TokenKind::Lt => {
                let (a, b) = take2_number(&mut stack, token.kind)?;
                stack.push(Value::Bool(b < a));
            }
            TokenKind::Le => {
                let (a, b) = take2_number(&mut stack, token.kind)?;
                stack.push(Value::Bool(b <= a));
            }
            TokenKind::Gt => {
                let (a, b) = take2_number(&mut stack, token.kind)?;
                stack.push(Value::Bool(b > a));
            }
            TokenKind::Ge => {
                let (a, b) = take2_number(&mut stack, token.kind)?;
                stack.push(Value::Bool(b >= a));
            }

            // Arithmetic
            TokenKind::Plus => {
                let (a, b) = take2_number(&mut stack, token.kind)?;
                stack.push(Value::Number(b + a));
            }
            TokenKind::Minus => {
                let (a, b) = take2_number(&mut stack, token.kind)?;
                stack.push(Value::Number(b - a));
            }
            TokenKind::Star => {
                let (a, b) = take2_number(&mut stack, token.kind)?;
                stack.push(Value::Number(b * a));
            }
            TokenKind::Slash => {
                let (a, b) = take2_number(&mut stack, token.kind)?;
                if a == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                stack.push(Value::Number(b / a));
            }
            TokenKind::Percent => {
                let (a, b) = take2_number(&mut stack, token.kind)?;
                stack.push(Value::Number(b % a));
            }
            TokenKind::Hat => {
                let (a, b) = take2_number(&mut stack, token.kind)?;
                stack.push(Value::Number(b.powf(a)));
            }
            TokenKind::PlusUnary => {
                let a = take1_number(&mut stack, token.kind)?;
                stack.push(Value::Number(a));
            }
            TokenKind::MinusUnary => {
                let a = take1_number(&mut stack, token.kind)?;
                stack.push(Value::Number(-a));
            }

            // Parens never survive conversion; anything else has no case.
            TokenKind::ParenLeft | TokenKind::ParenRight => {
                return Err(EvalError::UnsupportedToken {
                    kind: token.kind.name(),
                });
            }
        }
    }

    if stack.len() != 1 {
        return Err(EvalError::BadExpression);
    }

    stack.pop().ok_or(EvalError::BadExpression)
}

/// Equality comparison, dispatching on the top-of-stack operand's
/// variant. Null requires both operands null; the variant mismatch is
/// reported before any boolean result.
fn equality(stack: &mut Stack<Value>, op: TokenKind) -> Result<bool, EvalError> {
    let Some(top) = stack.peek() else {
        return Err(EvalError::NotEnoughOperands { op: op.name() });
    };

    match top.tag() {
        Tag::Null => {
            take2_null(stack, op)?;
            Ok(true)
        }
        Tag::Bool => {
            let (a, b) = take2_bool(stack, op)?;
            Ok(a == b)
        }
        Tag::Number => {
            let (a, b) = take2_number(stack, op)?;
            Ok(a == b)
        }
        Tag::Bytes => {
            let (a, b) = take2_bytes(stack, op)?;
            Ok(a == b)
        }
    }
}

fn parse_bool(token: &Token) -> Result<bool, EvalError> {
    std::str::from_utf8(&token.text)
        .ok()
        .and_then(|s| s.parse::<bool>().ok())
        .ok_or_else(|| EvalError::BadValue {
            text: token.text_string(),
            expected: TokenKind::Bool.name(),
        })
}

fn parse_number(token: &Token) -> Result<f64, EvalError> {
    std::str::from_utf8(&token.text)
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .ok_or_else(|| EvalError::BadValue {
            text: token.text_string(),
            expected: TokenKind::Number.name(),
        })
}

// Typed pop helpers. The pop order is significant: for a binary operator
// the first pop is the right-hand operand `a`, the second the left-hand
// `b`, so non-commutative operators compute `b <op> a`.

fn take1_bool(stack: &mut Stack<Value>, op: TokenKind) -> Result<bool, EvalError> {
    let Some(value) = stack.pop() else {
        return Err(EvalError::NotEnoughOperands { op: op.name() });
    };

    match value {
        Value::Bool(b) => Ok(b),
        other => Err(EvalError::TypeMismatch {
            expected: "bool",
            actual: other.type_name(),
        }),
    }
}

fn take2_bool(stack: &mut Stack<Value>, op: TokenKind) -> Result<(bool, bool), EvalError> {
    let a = take1_bool(stack, op)?;
    let b = take1_bool(stack, op)?;

    Ok((a, b))
}

fn take1_number(stack: &mut Stack<Value>, op: TokenKind) -> Result<f64, EvalError> {
    let Some(value) = stack.pop() else {
        return Err(EvalError::NotEnoughOperands { op: op.name() });
    };

    match value {
        Value::Number(n) => Ok(n),
        other => Err(EvalError::TypeMismatch {
            expected: "number",
            actual: other.type_name(),
        }),
    }
}

fn take2_number(stack: &mut Stack<Value>, op: TokenKind) -> Result<(f64, f64), EvalError> {
    let a = take1_number(stack, op)?;
    let b = take1_number(stack, op)?;

    Ok((a, b))
}

fn take1_bytes(stack: &mut Stack<Value>, op: TokenKind) -> Result<Vec<u8>, EvalError> {
    let Some(value) = stack.pop() else {
        return Err(EvalError::NotEnoughOperands { op: op.name() });
    };

    match value {
        Value::Bytes(b) => Ok(b),
        other => Err(EvalError::TypeMismatch {
            expected: "string",
            actual: other.type_name(),
        }),
    }
}

fn take2_bytes(stack: &mut Stack<Value>, op: TokenKind) -> Result<(Vec<u8>, Vec<u8>), EvalError> {
    let a = take1_bytes(stack, op)?;
    let b = take1_bytes(stack, op)?;

    Ok((a, b))
}

fn take1_null(stack: &mut Stack<Value>, op: TokenKind) -> Result<(), EvalError> {
    let Some(value) = stack.pop() else {
        return Err(EvalError::NotEnoughOperands { op: op.name() });
    };

    match value {
        Value::Null => Ok(()),
        other => Err(EvalError::TypeMismatch {
            expected: "null",
            actual: other.type_name(),
        }),
    }
}

fn take2_null(stack: &mut Stack<Value>, op: TokenKind) -> Result<(), EvalError> {
    take1_null(stack, op)?;
    take1_null(stack, op)?;

    Ok(())
}
