use super::*;
use pretty_assertions::assert_eq;
use std::error::Error as _;
use tessera_types::TypeId;

#[test]
fn cast_target_error_has_a_fixed_message() {
    let error = ApplyError::InvalidCastTarget {
        target: "varchar(x)".to_owned(),
    };
    assert_eq!(error.to_string(), "Invalid target type for CAST");
}

#[test]
fn apply_error_messages() {
    let error = ApplyError::StaticArgumentCount {
        operation: "Negate",
        expected: 0,
        actual: 2,
    };
    assert_eq!(error.to_string(), "Negate takes 0 static argument(s), got 2");

    let error = ApplyError::UnknownOperation {
        name: "frob".to_owned(),
    };
    assert_eq!(error.to_string(), "unknown operation `frob`");
}

#[test]
fn invalid_literal_keeps_its_cause() {
    let error = EvalError::InvalidLiteral {
        text: "abc".to_owned(),
        target: "Int",
        cause: ParseValueError::Malformed {
            type_name: "Int",
            text: "abc".to_owned(),
        },
    };
    assert_eq!(error.to_string(), "cannot convert `abc` to Int");
    assert!(error.source().is_some());
}

#[test]
fn no_static_args_accepts_only_empty() {
    assert_eq!(no_static_args("Negate", &[]), Ok(()));
    assert_eq!(
        no_static_args("Negate", &[TypedValue::int(1)]),
        Err(ApplyError::StaticArgumentCount {
            operation: "Negate",
            expected: 0,
            actual: 1,
        })
    );
}

#[test]
fn operands_are_described_with_nullability() {
    let types = TypeFactory::new();
    let int = types.get_type(TypeId::Int, false);
    let varchar = types.get_parameterized(TypeId::VarChar, 8, true);
    assert_eq!(describe_operands(&[int, varchar]), "Int, VarChar(8) NULL");
    assert_eq!(describe_operands(&[]), "");
}

#[test]
#[should_panic(expected = "used on inputs it cannot apply to")]
fn unvalidated_panics() {
    unvalidated(
        "Add",
        &ApplyError::UnknownOperation {
            name: "x".to_owned(),
        },
    );
}
