use crate::token::{Token, TokenKind};

/// Errors produced while scanning a filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A byte that starts no token
    UnexpectedByte { byte: u8, pos: usize },
    /// A word that is not `true`, `false` or `null`
    UnexpectedWord { word: String, pos: usize },
    /// A string literal with no closing quote
    UnterminatedString { pos: usize },
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexError::UnexpectedByte { byte, pos } => {
                write!(f, "unexpected character {:?} at offset {}", *byte as char, pos)
            }
            LexError::UnexpectedWord { word, pos } => {
                write!(f, "unexpected word {:?} at offset {}", word, pos)
            }
            LexError::UnterminatedString { pos } => {
                write!(f, "unterminated string starting at offset {}", pos)
            }
        }
    }
}

impl std::error::Error for LexError {}

/// Scans filter-expression source bytes into classified tokens.
///
/// The lexer decides unary versus binary `+`/`-` from context: a sign is
/// unary at the start of the input, after another operator, or after an
/// opening parenthesis.
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    // Kind of the last emitted token, for sign disambiguation.
    last: Option<TokenKind>,
}

/// Tokenizes a complete expression.
///
/// # Examples
///
/// ```
/// use sift_lang::{tokenize, TokenKind};
///
/// let tokens = tokenize("@.price < 10").unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(kinds, vec![TokenKind::Path, TokenKind::Lt, TokenKind::Number]);
/// ```
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }

    Ok(tokens)
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input: input.as_bytes(),
            pos: 0,
            last: None,
        }
    }

    fn current(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.current() {
            if b == b' ' || b == b'\t' || b == b'\r' || b == b'\n' {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// True when a `+`/`-` at the current position starts an operand
    /// rather than continuing one.
    fn sign_is_unary(&self) -> bool {
        match self.last {
            None => true,
            Some(TokenKind::ParenLeft) => true,
            Some(kind) => kind.op_info().is_some(),
        }
    }

    fn emit(&mut self, kind: TokenKind, pos: usize, text: impl Into<Vec<u8>>) -> Token {
        self.last = Some(kind);
        Token::new(kind, pos, text)
    }

    /// Returns the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();

        let pos = self.pos;
        let Some(b) = self.current() else {
            return Ok(None);
        };

        let token = match b {
            b'(' => {
                self.advance();
                self.emit(TokenKind::ParenLeft, pos, b"(")
            }
            b')' => {
                self.advance();
                self.emit(TokenKind::ParenRight, pos, b")")
            }
            b'&' if self.peek(1) == Some(b'&') => {
                self.advance();
                self.advance();
                self.emit(TokenKind::And, pos, b"&&")
            }
            b'|' if self.peek(1) == Some(b'|') => {
                self.advance();
                self.advance();
                self.emit(TokenKind::Or, pos, b"||")
            }
            b'=' if self.peek(1) == Some(b'=') => {
                self.advance();
                self.advance();
                self.emit(TokenKind::Eq, pos, b"==")
            }
            b'!' if self.peek(1) == Some(b'=') => {
                self.advance();
                self.advance();
                self.emit(TokenKind::Neq, pos, b"!=")
            }
            b'!' => {
                self.advance();
                self.emit(TokenKind::Not, pos, b"!")
            }
            b'<' if self.peek(1) == Some(b'=') => {
                self.advance();
                self.advance();
                self.emit(TokenKind::Le, pos, b"<=")
            }
            b'<' => {
                self.advance();
                self.emit(TokenKind::Lt, pos, b"<")
            }
            b'>' if self.peek(1) == Some(b'=') => {
                self.advance();
                self.advance();
                self.emit(TokenKind::Ge, pos, b">=")
            }
            b'>' => {
                self.advance();
                self.emit(TokenKind::Gt, pos, b">")
            }
            b'+' => {
                let kind = if self.sign_is_unary() {
                    TokenKind::PlusUnary
                } else {
                    TokenKind::Plus
                };
                self.advance();
                self.emit(kind, pos, b"+")
            }
            b'-' => {
                let kind = if self.sign_is_unary() {
                    TokenKind::MinusUnary
                } else {
                    TokenKind::Minus
                };
                self.advance();
                self.emit(kind, pos, b"-")
            }
            b'*' => {
                self.advance();
                self.emit(TokenKind::Star, pos, b"*")
            }
            b'/' => {
                self.advance();
                self.emit(TokenKind::Slash, pos, b"/")
            }
            b'%' => {
                self.advance();
                self.emit(TokenKind::Percent, pos, b"%")
            }
            b'^' => {
                self.advance();
                self.emit(TokenKind::Hat, pos, b"^")
            }
            b'"' => self.read_string(pos)?,
            b'@' => self.read_path(pos),
            b'0'..=b'9' => self.read_number(pos),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.read_word(pos)?,
            other => return Err(LexError::UnexpectedByte { byte: other, pos }),
        };

        Ok(Some(token))
    }

    /// Scans a double-quoted string. The token text is the raw bytes
    /// between the quotes; a backslash keeps the following byte verbatim
    /// (no unescaping happens at this layer).
    fn read_string(&mut self, pos: usize) -> Result<Token, LexError> {
        self.advance(); // opening quote

        let start = self.pos;
        loop {
            match self.current() {
                None => return Err(LexError::UnterminatedString { pos }),
                Some(b'"') => break,
                Some(b'\\') => {
                    self.advance();
                    if self.current().is_none() {
                        return Err(LexError::UnterminatedString { pos });
                    }
                    self.advance();
                }
                Some(_) => self.advance(),
            }
        }

        let text = self.input[start..self.pos].to_vec();
        self.advance(); // closing quote

        Ok(self.emit(TokenKind::String, pos, text))
    }

    /// Scans `@` followed by `.segment` parts into a single path token
    /// whose text is the whole reference (`@.user.name`).
    fn read_path(&mut self, pos: usize) -> Token {
        self.advance(); // '@'

        while self.current() == Some(b'.') {
            self.advance();
            while let Some(b) = self.current() {
                if b.is_ascii_alphanumeric() || b == b'_' {
                    self.advance();
                } else {
                    break;
                }
            }
        }

        let text = self.input[pos..self.pos].to_vec();
        self.emit(TokenKind::Path, pos, text)
    }

    /// Scans a decimal number with optional fraction and exponent. The
    /// raw text is kept; the evaluator parses it as an f64.
    fn read_number(&mut self, pos: usize) -> Token {
        while self.current().is_some_and(|b| b.is_ascii_digit()) {
            self.advance();
        }

        if self.current() == Some(b'.') && self.peek(1).is_some_and(|b| b.is_ascii_digit()) {
            self.advance();
            while self.current().is_some_and(|b| b.is_ascii_digit()) {
                self.advance();
            }
        }

        if matches!(self.current(), Some(b'e') | Some(b'E')) {
            let mut after = 1;
            if matches!(self.peek(1), Some(b'+') | Some(b'-')) {
                after = 2;
            }
            if self.peek(after).is_some_and(|b| b.is_ascii_digit()) {
                for _ in 0..after {
                    self.advance();
                }
                while self.current().is_some_and(|b| b.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        let text = self.input[pos..self.pos].to_vec();
        self.emit(TokenKind::Number, pos, text)
    }

    /// Scans a bare word; only `true`, `false` and `null` are valid.
    fn read_word(&mut self, pos: usize) -> Result<Token, LexError> {
        while let Some(b) = self.current() {
            if b.is_ascii_alphanumeric() || b == b'_' {
                self.advance();
            } else {
                break;
            }
        }

        let text = &self.input[pos..self.pos];
        match text {
            b"true" | b"false" => Ok(self.emit(TokenKind::Bool, pos, text)),
            b"null" => Ok(self.emit(TokenKind::Null, pos, text)),
            other => Err(LexError::UnexpectedWord {
                word: String::from_utf8_lossy(other).into_owned(),
                pos,
            }),
        }
    }
}
