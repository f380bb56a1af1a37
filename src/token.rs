/// Token kinds produced by the expression lexer and consumed by the
/// postfix converter and evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    /// Boolean literal (`true` / `false`)
    Bool,

    /// Numeric literal, always evaluated as a 64-bit float
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 3.14
    /// 6.02e23
    /// ```
    Number,

    /// String literal enclosed in double quotes
    ///
    /// The token text is the raw bytes between the quotes; no unescaping
    /// is performed at this layer.
    String,

    /// Null literal
    Null,

    /// Path reference resolved against document bindings at eval time
    ///
    /// # Examples
    /// ```text
    /// @.price
    /// @.user.name
    /// ```
    Path,

    // Delimiters
    /// Left parenthesis for grouping
    ParenLeft,

    /// Right parenthesis
    ParenRight,

    // Logical
    /// Logical AND (`&&`), eager (no short-circuit)
    And,

    /// Logical OR (`||`), eager (no short-circuit)
    Or,

    /// Logical negation (`!`)
    Not,

    // Comparison
    /// Equality (`==`)
    Eq,

    /// Inequality (`!=`)
    Neq,

    /// Less than (`<`)
    Lt,

    /// Less than or equal (`<=`)
    Le,

    /// Greater than (`>`)
    Gt,

    /// Greater than or equal (`>=`)
    Ge,

    // Arithmetic
    /// Addition (`+`)
    Plus,

    /// Subtraction (`-`)
    Minus,

    /// Multiplication (`*`)
    Star,

    /// Division (`/`)
    Slash,

    /// Modulo (`%`), floating-point remainder
    Percent,

    /// Power (`^`)
    Hat,

    /// Unary plus
    PlusUnary,

    /// Unary minus
    MinusUnary,
}

/// Precedence and associativity for an operator kind.
///
/// Lower precedence binds more loosely. Right-associative operators of
/// equal precedence chain right-to-left in the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpInfo {
    pub prec: u8,
    pub right_assoc: bool,
}

impl TokenKind {
    /// The operator table. Returns `None` for non-operator kinds.
    pub fn op_info(self) -> Option<OpInfo> {
        use TokenKind::*;
        let (prec, right_assoc) = match self {
            And | Or => (1, false),
            Eq | Neq => (2, false),
            Lt | Le | Gt | Ge => (3, false),
            Plus | Minus => (4, false),
            Slash | Star | Percent => (5, false),
            Hat => (6, false),
            Not | PlusUnary | MinusUnary => (7, true),
            _ => return None,
        };
        Some(OpInfo { prec, right_assoc })
    }

    /// Human-readable name used in diagnostics.
    pub fn name(self) -> &'static str {
        use TokenKind::*;
        match self {
            Bool => "bool",
            Number => "number",
            String => "string",
            Null => "null",
            Path => "path",
            ParenLeft => "(",
            ParenRight => ")",
            And => "&&",
            Or => "||",
            Not => "!",
            Eq => "==",
            Neq => "!=",
            Lt => "<",
            Le => "<=",
            Gt => ">",
            Ge => ">=",
            Plus => "+",
            Minus => "-",
            Star => "*",
            Slash => "/",
            Percent => "%",
            Hat => "^",
            PlusUnary => "unary +",
            MinusUnary => "unary -",
        }
    }
}

/// A classified token: kind, byte offset in the source, and raw text.
///
/// Immutable once produced. The text is bytes rather than a `String`
/// because string literals carry their source bytes through to comparison
/// without any unescaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: usize,
    pub text: Vec<u8>,
}

impl Token {
    pub fn new(kind: TokenKind, pos: usize, text: impl Into<Vec<u8>>) -> Self {
        Token {
            kind,
            pos,
            text: text.into(),
        }
    }

    /// Token text as UTF-8, lossy. Used for binding keys and diagnostics.
    pub fn text_string(&self) -> String {
        String::from_utf8_lossy(&self.text).into_owned()
    }
}
