//! Unit tests for the arithmetic evaluator and result formatting.

use calcdesk::services::evaluator::{evaluate, format_result, normalize_glyphs, MAX_PRECISION};
use calcdesk::types::errors::EvalError;
use rstest::rstest;

#[rstest]
#[case("2+3", 5.0)]
#[case("2+3*4", 14.0)]
#[case("2*3+4", 10.0)]
#[case("10-4-3", 3.0)]
#[case("8/4/2", 1.0)]
#[case("1.5*2", 3.0)]
#[case("7.", 7.0)]
#[case(".5+1", 1.5)]
#[case("0.1+0.2", 0.30000000000000004)]
#[case("100-2*3/4", 98.5)]
#[case(" 6 / 3 ", 2.0)]
#[case("3×4÷2", 6.0)]
#[case("0.5", 0.5)]
#[case("10", 10.0)]
#[case("1+0", 1.0)]
#[case("100/0.25", 400.0)]
fn test_evaluate_values(#[case] expr: &str, #[case] expected: f64) {
    assert_eq!(evaluate(expr).unwrap(), expected);
}

#[rstest]
#[case("5/0")]
#[case("0/0")]
#[case("1-5/0")]
fn test_non_finite_results_rejected(#[case] expr: &str) {
    assert_eq!(evaluate(expr), Err(EvalError::NonFinite));
}

#[test]
fn test_empty_and_blank_expressions() {
    assert_eq!(evaluate(""), Err(EvalError::Empty));
    assert_eq!(evaluate("   "), Err(EvalError::Empty));
}

#[test]
fn test_trailing_operator_is_unexpected_end() {
    assert_eq!(evaluate("2+"), Err(EvalError::UnexpectedEnd));
}

#[test]
fn test_leading_operator_rejected() {
    assert_eq!(
        evaluate("*2"),
        Err(EvalError::UnexpectedToken("*".to_string(), 0))
    );
    assert!(evaluate("-2").is_err(), "unary minus is not supported");
}

#[test]
fn test_consecutive_operators_rejected() {
    assert_eq!(
        evaluate("2+*3"),
        Err(EvalError::UnexpectedToken("*".to_string(), 2))
    );
}

#[test]
fn test_unknown_characters_rejected() {
    assert_eq!(evaluate("2^3"), Err(EvalError::UnexpectedChar('^', 1)));
    assert_eq!(evaluate("(2)"), Err(EvalError::UnexpectedChar('(', 0)));
}

#[test]
fn test_lone_decimal_point_rejected() {
    assert_eq!(
        evaluate("2+."),
        Err(EvalError::InvalidNumber(".".to_string()))
    );
}

#[rstest]
#[case("1+05", "05")]
#[case("08", "08")]
#[case("00", "00")]
#[case("2*00.5", "00.5")]
fn test_leading_zero_literals_rejected(#[case] expr: &str, #[case] literal: &str) {
    assert_eq!(
        evaluate(expr),
        Err(EvalError::InvalidNumber(literal.to_string()))
    );
}

#[test]
fn test_adjacent_numbers_rejected() {
    assert!(evaluate("2 3").is_err());
}

#[test]
fn test_normalize_glyphs() {
    assert_eq!(normalize_glyphs("6÷2×3"), "6/2*3");
    assert_eq!(normalize_glyphs("1+2"), "1+2");
}

#[rstest]
#[case(5.0, "5")]
#[case(2.5, "2.5")]
#[case(0.30000000000000004, "0.3")]
#[case(1.0 / 3.0, "0.3333333333")]
#[case(2.0 / 3.0, "0.6666666667")]
#[case(-4.0, "-4")]
#[case(-0.0, "0")]
#[case(1e-11, "0")]
#[case(123456789.0, "123456789")]
#[case(1e21, "1e+21")]
#[case(-2.5e22, "-2.5e+22")]
#[case(1e-7, "1e-7")]
#[case(-1.5e-7, "-1.5e-7")]
#[case(1e-6, "0.000001")]
#[case(1e20, "100000000000000000000")]
fn test_format_result(#[case] value: f64, #[case] expected: &str) {
    assert_eq!(format_result(value, 10), expected);
}

#[test]
fn test_format_result_respects_precision() {
    assert_eq!(format_result(1.0 / 3.0, 2), "0.33");
    assert_eq!(format_result(2.675, 0), "3");
}

#[test]
fn test_format_result_clamps_huge_precision() {
    assert_eq!(format_result(0.5, 200_000_000), "0.5");
    assert_eq!(format_result(0.5, u32::MAX), "0.5");
    assert_eq!(
        format_result(1.0 / 3.0, u32::MAX),
        format_result(1.0 / 3.0, MAX_PRECISION)
    );
}
