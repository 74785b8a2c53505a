use super::*;
use pretty_assertions::assert_eq;
use tessera_types::{DateLit, YearMonthIntervalLit};

fn compare(
    op: ComparisonOp,
    types: &TypeFactory,
    (left_ty, left): (&Type, TypedValue<'_>),
    (right_ty, right): (&Type, TypedValue<'_>),
) -> TypedValue<'static> {
    ComparisonOperation::new(op)
        .make_unchecked_operator(types, left_ty, right_ty)
        .apply(&left, &right)
        .unwrap()
}

#[test]
fn holds_for_each_ordering() {
    let table = [
        (ComparisonOp::Equal, [false, true, false]),
        (ComparisonOp::NotEqual, [true, false, true]),
        (ComparisonOp::Less, [true, false, false]),
        (ComparisonOp::LessOrEqual, [true, true, false]),
        (ComparisonOp::Greater, [false, false, true]),
        (ComparisonOp::GreaterOrEqual, [false, true, true]),
    ];
    for (op, expected) in table {
        let actual = [Ordering::Less, Ordering::Equal, Ordering::Greater]
            .map(|ordering| op.holds(Some(ordering)));
        assert_eq!(actual, expected, "{op:?}");
        assert_eq!(op.holds(None), op == ComparisonOp::NotEqual, "{op:?} on unordered");
    }
}

#[test]
fn signature_families() {
    let signatures = ComparisonOperation::new(ComparisonOp::Less).signatures();
    // Bool with Bool, 4x4 numeric, 2x2 strings, 4 temporal kinds with themselves.
    assert_eq!(signatures.len(), 1 + 16 + 4 + 4);
    assert!(signatures
        .iter()
        .any(|sig| sig.matches(&[TypeId::Char, TypeId::VarChar])));
    assert!(!signatures
        .iter()
        .any(|sig| sig.matches(&[TypeId::Bool, TypeId::Int])));
    assert!(!signatures
        .iter()
        .any(|sig| sig.matches(&[TypeId::Date, TypeId::Datetime])));
}

#[test]
fn result_is_bool_with_merged_nullability() {
    let types = TypeFactory::new();
    let int = types.get_type(TypeId::Int, false);
    let double = types.get_type(TypeId::Double, true);
    let equal = ComparisonOperation::new(ComparisonOp::Equal);
    assert_eq!(
        equal.result_type(&types, int, int),
        types.get_type(TypeId::Bool, false)
    );
    assert_eq!(
        equal.result_type(&types, int, double),
        types.get_type(TypeId::Bool, true)
    );
}

#[test]
fn rejects_mixed_families() {
    let types = TypeFactory::new();
    let int = types.get_type(TypeId::Int, false);
    let varchar = types.get_parameterized(TypeId::VarChar, 4, false);
    let greater = ComparisonOperation::new(ComparisonOp::Greater);
    assert_eq!(
        greater.can_apply_to(&types, int, varchar),
        Err(ApplyError::IncompatibleOperands {
            operation: "Greater",
            left: "Int".to_owned(),
            right: "VarChar(4)".to_owned(),
        })
    );
    let null = types.get_type(TypeId::NullType, true);
    assert!(greater.can_apply_to(&types, null, null).is_err());
}

#[test]
fn numeric_comparison_across_kinds() {
    let types = TypeFactory::new();
    let int = types.get_type(TypeId::Int, false);
    let double = types.get_type(TypeId::Double, false);
    let long = types.get_type(TypeId::Long, false);

    assert_eq!(
        compare(
            ComparisonOp::Less,
            &types,
            (int, TypedValue::int(2)),
            (double, TypedValue::double(2.5))
        ),
        TypedValue::bool(true)
    );
    assert_eq!(
        compare(
            ComparisonOp::Equal,
            &types,
            (long, TypedValue::long(i64::MAX)),
            (long, TypedValue::long(i64::MAX))
        ),
        TypedValue::bool(true)
    );
    assert_eq!(
        compare(
            ComparisonOp::GreaterOrEqual,
            &types,
            (int, TypedValue::int(-1)),
            (long, TypedValue::long(0))
        ),
        TypedValue::bool(false)
    );
}

#[test]
fn nan_is_unordered() {
    let types = TypeFactory::new();
    let double = types.get_type(TypeId::Double, false);
    let nan = || (double, TypedValue::double(f64::NAN));
    assert_eq!(
        compare(ComparisonOp::Equal, &types, nan(), nan()),
        TypedValue::bool(false)
    );
    assert_eq!(
        compare(ComparisonOp::NotEqual, &types, nan(), nan()),
        TypedValue::bool(true)
    );
}

#[test]
fn strings_ignore_trailing_spaces() {
    let types = TypeFactory::new();
    let char4 = types.get_parameterized(TypeId::Char, 4, false);
    let varchar = types.get_parameterized(TypeId::VarChar, 8, false);

    assert_eq!(
        compare(
            ComparisonOp::Equal,
            &types,
            (char4, TypedValue::char("ab  ")),
            (varchar, TypedValue::varchar("ab"))
        ),
        TypedValue::bool(true)
    );
    assert_eq!(
        compare(
            ComparisonOp::Less,
            &types,
            (varchar, TypedValue::varchar("abc")),
            (varchar, TypedValue::varchar("abd"))
        ),
        TypedValue::bool(true)
    );
    assert_eq!(
        compare(
            ComparisonOp::Less,
            &types,
            (varchar, TypedValue::borrowed_bytes(TypeId::VarChar, b"ab")),
            (varchar, TypedValue::varchar("ab "))
        ),
        TypedValue::bool(false)
    );
}

#[test]
fn temporal_kinds_compare_with_themselves() {
    let types = TypeFactory::new();
    let date = types.get_type(TypeId::Date, false);
    assert_eq!(
        compare(
            ComparisonOp::Greater,
            &types,
            (date, TypedValue::date(DateLit { days: 10 })),
            (date, TypedValue::date(DateLit { days: -3 }))
        ),
        TypedValue::bool(true)
    );

    let months = types.get_type(TypeId::YearMonthInterval, false);
    assert_eq!(
        compare(
            ComparisonOp::LessOrEqual,
            &types,
            (months, TypedValue::year_month_interval(YearMonthIntervalLit { months: 13 })),
            (months, TypedValue::year_month_interval(YearMonthIntervalLit { months: 12 }))
        ),
        TypedValue::bool(false)
    );
}

#[test]
fn null_operand_gives_null_bool() {
    let types = TypeFactory::new();
    let varchar = types.get_parameterized(TypeId::VarChar, 8, true);
    let out = compare(
        ComparisonOp::Equal,
        &types,
        (varchar, TypedValue::null(TypeId::VarChar)),
        (varchar, TypedValue::varchar("x")),
    );
    assert!(out.is_null());
    assert_eq!(out.type_id(), TypeId::Bool);
}
