use crate::stack::Stack;
use crate::token::{Token, TokenKind};

/// Errors produced while reordering an expression into postfix form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// Unbalanced `(` / `)` in the input
    MismatchedParens,
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::MismatchedParens => write!(f, "mismatched parentheses"),
        }
    }
}

impl std::error::Error for ConvertError {}

/// Reorders an infix token sequence into postfix (Reverse Polish) order
/// using the shunting-yard algorithm over the operator table.
///
/// Parentheses are resolved and discarded. Operators pop higher- or
/// equal-precedence left-associative operators off the stack before being
/// pushed; right-associative operators of equal precedence stay, so unary
/// chains keep their nesting order. Any token that is neither a
/// parenthesis nor a table operator passes through to the output as an
/// operand. An empty input is not an error here; the evaluator rejects
/// empty programs.
///
/// # Examples
///
/// ```
/// use sift_lang::{infix_to_postfix, tokenize};
///
/// let tokens = tokenize("1 + 2 * 3").unwrap();
/// let postfix = infix_to_postfix(&tokens).unwrap();
/// let texts: Vec<_> = postfix.iter().map(|t| t.text_string()).collect();
/// assert_eq!(texts, vec!["1", "2", "3", "*", "+"]);
/// ```
pub fn infix_to_postfix(tokens: &[Token]) -> Result<Vec<Token>, ConvertError> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut stack: Stack<Token> = Stack::new();

    for token in tokens {
        match token.kind {
            TokenKind::ParenLeft => stack.push(token.clone()),
            TokenKind::ParenRight => loop {
                let Some(op) = stack.pop() else {
                    return Err(ConvertError::MismatchedParens);
                };

                if op.kind == TokenKind::ParenLeft {
                    break; // discard "("
                }

                out.push(op);
            },
            kind => {
                if let Some(o1) = kind.op_info() {
                    // Top operator binds at least as tightly; it comes off first.
                    while let Some(o2) = stack.peek().and_then(|top| top.kind.op_info()) {
                        if o1.prec > o2.prec || (o1.prec == o2.prec && o1.right_assoc) {
                            break;
                        }

                        if let Some(op) = stack.pop() {
                            out.push(op);
                        }
                    }

                    stack.push(token.clone());
                } else {
                    // Operand (literal, path reference, or unknown kind).
                    out.push(token.clone());
                }
            }
        }
    }

    // Drain the remaining operators.
    while let Some(op) = stack.pop() {
        if op.kind == TokenKind::ParenLeft {
            return Err(ConvertError::MismatchedParens);
        }

        out.push(op);
    }

    Ok(out)
}
