// tests/eval_tests.rs

use std::collections::HashMap;

use sift_lang::{evaluate, infix_to_postfix, tokenize, EvalError, Token, TokenKind, Value};

fn eval_str(input: &str) -> Result<Value, EvalError> {
    eval_with(input, &HashMap::new())
}

fn eval_with(input: &str, bindings: &HashMap<String, Token>) -> Result<Value, EvalError> {
    let tokens = tokenize(input).unwrap();
    let postfix = infix_to_postfix(&tokens).unwrap();
    evaluate(&postfix, bindings)
}

fn number_token(text: &str) -> Token {
    Token::new(TokenKind::Number, 0, text.as_bytes())
}

// ============================================================================
// Single literals
// ============================================================================

#[test]
fn test_number_literal() {
    assert_eq!(eval_str("5"), Ok(Value::Number(5.0)));
}

#[test]
fn test_float_literal() {
    assert_eq!(eval_str("3.14"), Ok(Value::Number(3.14)));
}

#[test]
fn test_bool_literal() {
    assert_eq!(eval_str("true"), Ok(Value::Bool(true)));
    assert_eq!(eval_str("false"), Ok(Value::Bool(false)));
}

#[test]
fn test_string_literal() {
    assert_eq!(eval_str("\"abc\""), Ok(Value::Bytes(b"abc".to_vec())));
}

#[test]
fn test_null_literal() {
    assert_eq!(eval_str("null"), Ok(Value::Null));
}

// ============================================================================
// Arithmetic and operand order
// ============================================================================

#[test]
fn test_subtraction_operand_order() {
    // Postfix `5 3 -` is b - a with a popped first.
    assert_eq!(eval_str("5 - 3"), Ok(Value::Number(2.0)));
}

#[test]
fn test_division_operand_order() {
    assert_eq!(eval_str("10 / 4"), Ok(Value::Number(2.5)));
}

#[test]
fn test_addition() {
    assert_eq!(eval_str("1 + 2"), Ok(Value::Number(3.0)));
}

#[test]
fn test_multiplication() {
    assert_eq!(eval_str("6 * 7"), Ok(Value::Number(42.0)));
}

#[test]
fn test_division_by_zero_is_an_error() {
    assert_eq!(eval_str("5 / 0"), Err(EvalError::DivisionByZero));
}

#[test]
fn test_zero_dividend_is_fine() {
    assert_eq!(eval_str("0 / 5"), Ok(Value::Number(0.0)));
}

#[test]
fn test_modulo() {
    assert_eq!(eval_str("7 % 3"), Ok(Value::Number(1.0)));
}

#[test]
fn test_modulo_sign_follows_dividend() {
    assert_eq!(eval_str("-7 % 3"), Ok(Value::Number(-1.0)));
}

#[test]
fn test_power() {
    assert_eq!(eval_str("2 ^ 10"), Ok(Value::Number(1024.0)));
}

#[test]
fn test_power_is_left_associative() {
    // (2 ^ 3) ^ 2, not 2 ^ (3 ^ 2)
    assert_eq!(eval_str("2 ^ 3 ^ 2"), Ok(Value::Number(64.0)));
}

#[test]
fn test_left_associative_subtraction_chain() {
    // (10 - 4) - 3
    assert_eq!(eval_str("10 - 4 - 3"), Ok(Value::Number(3.0)));
}

#[test]
fn test_precedence_end_to_end() {
    assert_eq!(eval_str("1 + 2 * 3"), Ok(Value::Number(7.0)));
    assert_eq!(eval_str("(1 + 2) * 3"), Ok(Value::Number(9.0)));
}

#[test]
fn test_unary_minus() {
    assert_eq!(eval_str("-5 + 3"), Ok(Value::Number(-2.0)));
}

#[test]
fn test_double_unary_minus() {
    assert_eq!(eval_str("- - 5"), Ok(Value::Number(5.0)));
}

#[test]
fn test_unary_plus_is_identity() {
    assert_eq!(eval_str("+5"), Ok(Value::Number(5.0)));
}

#[test]
fn test_arithmetic_rejects_non_numbers() {
    assert_eq!(
        eval_str("1 + true"),
        Err(EvalError::TypeMismatch {
            expected: "number",
            actual: "bool",
        })
    );
}

// ============================================================================
// Relational operators
// ============================================================================

#[test]
fn test_relational_operators() {
    assert_eq!(eval_str("5 > 3"), Ok(Value::Bool(true)));
    assert_eq!(eval_str("5 < 3"), Ok(Value::Bool(false)));
    assert_eq!(eval_str("3 <= 3"), Ok(Value::Bool(true)));
    assert_eq!(eval_str("3 >= 4"), Ok(Value::Bool(false)));
}

#[test]
fn test_relational_rejects_strings() {
    assert_eq!(
        eval_str("\"a\" < \"b\""),
        Err(EvalError::TypeMismatch {
            expected: "number",
            actual: "string",
        })
    );
}

// ============================================================================
// Equality dispatch
// ============================================================================

#[test]
fn test_number_equality() {
    assert_eq!(eval_str("1 == 1"), Ok(Value::Bool(true)));
    assert_eq!(eval_str("1 != 2"), Ok(Value::Bool(true)));
}

#[test]
fn test_bool_equality() {
    assert_eq!(eval_str("true == true"), Ok(Value::Bool(true)));
    assert_eq!(eval_str("true != false"), Ok(Value::Bool(true)));
}

#[test]
fn test_string_equality_is_bytewise() {
    assert_eq!(eval_str("\"abc\" == \"abc\""), Ok(Value::Bool(true)));
    assert_eq!(eval_str("\"abc\" == \"abd\""), Ok(Value::Bool(false)));
    assert_eq!(eval_str("\"a\" != \"b\""), Ok(Value::Bool(true)));
}

#[test]
fn test_null_equality() {
    assert_eq!(eval_str("null == null"), Ok(Value::Bool(true)));
    assert_eq!(eval_str("null != null"), Ok(Value::Bool(false)));
}

#[test]
fn test_mixed_equality_top_bool_is_type_mismatch() {
    // Top of stack is boolean, second operand numeric.
    assert_eq!(
        eval_str("5 == true"),
        Err(EvalError::TypeMismatch {
            expected: "bool",
            actual: "number",
        })
    );
}

#[test]
fn test_mixed_equality_top_number_is_type_mismatch() {
    assert_eq!(
        eval_str("true == 5"),
        Err(EvalError::TypeMismatch {
            expected: "number",
            actual: "bool",
        })
    );
}

#[test]
fn test_null_equality_with_one_side_non_null() {
    // Type mismatch is reported, never a boolean result.
    assert_eq!(
        eval_str("5 == null"),
        Err(EvalError::TypeMismatch {
            expected: "null",
            actual: "number",
        })
    );
}

// ============================================================================
// Logical operators
// ============================================================================

#[test]
fn test_and_or() {
    assert_eq!(eval_str("true && false"), Ok(Value::Bool(false)));
    assert_eq!(eval_str("true && true"), Ok(Value::Bool(true)));
    assert_eq!(eval_str("false || true"), Ok(Value::Bool(true)));
    assert_eq!(eval_str("false || false"), Ok(Value::Bool(false)));
}

#[test]
fn test_not() {
    assert_eq!(eval_str("!true"), Ok(Value::Bool(false)));
    assert_eq!(eval_str("!!true"), Ok(Value::Bool(true)));
}

#[test]
fn test_logical_operators_are_eager() {
    // Both operands are evaluated; a non-bool right operand is an error
    // even when the left operand alone would decide the outcome.
    assert_eq!(
        eval_str("false && 1"),
        Err(EvalError::TypeMismatch {
            expected: "bool",
            actual: "number",
        })
    );
}

// ============================================================================
// Path bindings
// ============================================================================

#[test]
fn test_number_binding_round_trip() {
    let mut bindings = HashMap::new();
    bindings.insert("@.x".to_string(), number_token("3.5"));

    assert_eq!(eval_with("@.x > 3", &bindings), Ok(Value::Bool(true)));
}

#[test]
fn test_string_binding() {
    let mut bindings = HashMap::new();
    bindings.insert(
        "@.name".to_string(),
        Token::new(TokenKind::String, 0, b"x".as_slice()),
    );

    assert_eq!(
        eval_with("@.name == \"x\"", &bindings),
        Ok(Value::Bool(true))
    );
}

#[test]
fn test_null_binding() {
    let mut bindings = HashMap::new();
    bindings.insert(
        "@.gone".to_string(),
        Token::new(TokenKind::Null, 0, b"null".as_slice()),
    );

    assert_eq!(
        eval_with("@.gone == null", &bindings),
        Ok(Value::Bool(true))
    );
}

#[test]
fn test_missing_binding() {
    assert_eq!(
        eval_str("@.absent == 1"),
        Err(EvalError::ValueNotFound {
            name: "@.absent".to_string(),
        })
    );
}

#[test]
fn test_non_scalar_binding_kind() {
    let mut bindings = HashMap::new();
    bindings.insert(
        "@.flag".to_string(),
        Token::new(TokenKind::Bool, 0, b"true".as_slice()),
    );

    assert_eq!(
        eval_with("@.flag == true", &bindings),
        Err(EvalError::PathNotScalar {
            name: "@.flag".to_string(),
        })
    );
}

#[test]
fn test_unparseable_number_binding() {
    let mut bindings = HashMap::new();
    bindings.insert("@.x".to_string(), number_token("abc"));

    assert_eq!(
        eval_with("@.x > 3", &bindings),
        Err(EvalError::BadValue {
            text: "abc".to_string(),
            expected: "number",
        })
    );
}

// ============================================================================
// Structural errors
// ============================================================================

#[test]
fn test_empty_program() {
    assert_eq!(
        evaluate(&[], &HashMap::new()),
        Err(EvalError::BadExpression)
    );
}

#[test]
fn test_leftover_operands_are_a_bad_expression() {
    let postfix = vec![number_token("1"), number_token("2")];
    assert_eq!(
        evaluate(&postfix, &HashMap::new()),
        Err(EvalError::BadExpression)
    );
}

#[test]
fn test_operator_without_operands_underflows() {
    let postfix = vec![Token::new(TokenKind::And, 0, b"&&".as_slice())];
    assert_eq!(
        evaluate(&postfix, &HashMap::new()),
        Err(EvalError::NotEnoughOperands { op: "&&" })
    );
}

#[test]
fn test_binary_operator_with_single_operand_underflows() {
    let postfix = vec![
        number_token("1"),
        Token::new(TokenKind::Plus, 0, b"+".as_slice()),
    ];
    assert_eq!(
        evaluate(&postfix, &HashMap::new()),
        Err(EvalError::NotEnoughOperands { op: "+" })
    );
}

#[test]
fn test_bad_bool_literal_text() {
    let postfix = vec![Token::new(TokenKind::Bool, 0, b"yes".as_slice())];
    assert_eq!(
        evaluate(&postfix, &HashMap::new()),
        Err(EvalError::BadValue {
            text: "yes".to_string(),
            expected: "bool",
        })
    );
}

#[test]
fn test_paren_reaching_evaluator_is_unsupported() {
    let postfix = vec![Token::new(TokenKind::ParenLeft, 0, b"(".as_slice())];
    assert_eq!(
        evaluate(&postfix, &HashMap::new()),
        Err(EvalError::UnsupportedToken { kind: "(" })
    );
}
