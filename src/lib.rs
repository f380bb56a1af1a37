pub mod bindings;
#[cfg(feature = "cli")]
pub mod cli;
pub mod eval;
pub mod lexer;
pub mod postfix;
pub mod stack;
pub mod token;

pub use bindings::BindError;
pub use eval::{evaluate, EvalError, Value};
pub use lexer::{tokenize, LexError, Lexer};
pub use postfix::{infix_to_postfix, ConvertError};
pub use stack::Stack;
pub use token::{OpInfo, Token, TokenKind};
