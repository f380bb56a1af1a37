//! CLI support for sift-lang
//!
//! Provides programmatic access to the sift CLI functionality for
//! embedding in other tools.

use std::collections::HashMap;
use std::io;

use crate::bindings::{self, BindError};
use crate::eval::{evaluate, EvalError, Value};
use crate::lexer::{tokenize, LexError};
use crate::postfix::{infix_to_postfix, ConvertError};
use crate::token::TokenKind;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Tokenizer error
    Lex(LexError),
    /// Postfix conversion error
    Convert(ConvertError),
    /// Binding resolution error
    Bind(BindError),
    /// Evaluation error
    Eval(EvalError),
    /// JSON parsing error
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// Expression references paths but no document was provided
    NoInput,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Lex(e) => write!(f, "Lex error: {}", e),
            CliError::Convert(e) => write!(f, "Conversion error: {}", e),
            CliError::Bind(e) => write!(f, "Binding error: {}", e),
            CliError::Eval(e) => write!(f, "Evaluation error: {}", e),
            CliError::Json(e) => write!(f, "Invalid JSON: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(
                f,
                "Expression references document paths. Use --input or pipe JSON to stdin."
            ),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Lex(e) => Some(e),
            CliError::Convert(e) => Some(e),
            CliError::Bind(e) => Some(e),
            CliError::Eval(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LexError> for CliError {
    fn from(e: LexError) -> Self {
        CliError::Lex(e)
    }
}

impl From<ConvertError> for CliError {
    fn from(e: ConvertError) -> Self {
        CliError::Convert(e)
    }
}

impl From<BindError> for CliError {
    fn from(e: BindError) -> Self {
        CliError::Bind(e)
    }
}

impl From<EvalError> for CliError {
    fn from(e: EvalError) -> Self {
        CliError::Eval(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

/// Options for evaluating an expression against a document.
pub struct EvalOptions {
    /// The filter expression
    pub expr: String,
    /// JSON document text, if any
    pub input: Option<String>,
}

/// Tokenizes, converts and evaluates an expression.
///
/// When the expression references document paths, `input` must hold the
/// JSON document to resolve them against; pure literal expressions run
/// without one.
pub fn execute_eval(options: &EvalOptions) -> Result<Value, CliError> {
    let tokens = tokenize(&options.expr)?;
    let postfix = infix_to_postfix(&tokens)?;

    let bindings = match &options.input {
        Some(text) => {
            let document: serde_json::Value = serde_json::from_str(text)?;
            bindings::from_document(&tokens, &document)?
        }
        None if tokens.iter().any(|t| t.kind == TokenKind::Path) => {
            return Err(CliError::NoInput);
        }
        None => HashMap::new(),
    };

    let value = evaluate(&postfix, &bindings)?;
    Ok(value)
}

/// Converts an expression to postfix order and renders it as one token
/// text per space-separated column. Debugging aid.
pub fn execute_postfix(expr: &str) -> Result<String, CliError> {
    let tokens = tokenize(expr)?;
    let postfix = infix_to_postfix(&tokens)?;

    let texts: Vec<String> = postfix.iter().map(|t| t.text_string()).collect();
    Ok(texts.join(" "))
}
