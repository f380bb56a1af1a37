//! Resolves path-reference tokens against a JSON document into the
//! scalar binding tokens the evaluator consumes.
//!
//! The evaluator itself never sees JSON; it only reads the bindings map.
//! This module is the boundary where `serde_json` documents are turned
//! into binding tokens, one per distinct path reference in the token
//! stream.

use std::collections::HashMap;

use crate::token::{Token, TokenKind};

/// Errors produced while resolving path references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindError {
    /// The path resolved to an array or object
    NotScalar { name: String },
}

impl std::fmt::Display for BindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BindError::NotScalar { name } => {
                write!(f, "path value for {:?} must be scalar", name)
            }
        }
    }
}

impl std::error::Error for BindError {}

/// Builds the bindings map for a token stream from a JSON document.
///
/// Every distinct path-reference token (`@.a.b`) is walked through the
/// document's objects segment by segment. Scalar targets become binding
/// tokens (null, number or string); an array or object target is a
/// [`BindError::NotScalar`]. A path that resolves to nothing is left out
/// of the map, so the evaluator reports `value not found` for it.
///
/// # Examples
///
/// ```
/// use sift_lang::{bindings, tokenize};
/// use serde_json::json;
///
/// let tokens = tokenize("@.price < 10").unwrap();
/// let doc = json!({"price": 4.5});
/// let map = bindings::from_document(&tokens, &doc).unwrap();
/// assert!(map.contains_key("@.price"));
/// ```
pub fn from_document(
    tokens: &[Token],
    document: &serde_json::Value,
) -> Result<HashMap<String, Token>, BindError> {
    let mut bindings = HashMap::new();

    for token in tokens.iter().filter(|t| t.kind == TokenKind::Path) {
        let name = token.text_string();
        if bindings.contains_key(&name) {
            continue;
        }

        let Some(target) = resolve(&name, document) else {
            continue;
        };

        let bound = match target {
            serde_json::Value::Null => Token::new(TokenKind::Null, token.pos, b"null".as_slice()),
            serde_json::Value::Bool(b) => {
                let text: &[u8] = if *b { b"true" } else { b"false" };
                Token::new(TokenKind::Bool, token.pos, text)
            }
            serde_json::Value::Number(n) => {
                Token::new(TokenKind::Number, token.pos, n.to_string())
            }
            serde_json::Value::String(s) => {
                Token::new(TokenKind::String, token.pos, s.as_bytes())
            }
            _ => return Err(BindError::NotScalar { name }),
        };

        bindings.insert(name, bound);
    }

    Ok(bindings)
}

/// Walks a `@.a.b` reference through the document's objects.
fn resolve<'a>(name: &str, document: &'a serde_json::Value) -> Option<&'a serde_json::Value> {
    let mut segments = name.split('.');
    if segments.next() != Some("@") {
        return None;
    }

    let mut current = document;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }

    Some(current)
}
