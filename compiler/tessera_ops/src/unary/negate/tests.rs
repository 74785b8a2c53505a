use super::*;
use pretty_assertions::assert_eq;
use tessera_types::{DatetimeIntervalLit, TypeId, YearMonthIntervalLit};

fn negate(types: &TypeFactory, ty: &Type, value: &TypedValue<'_>) -> TypedValue<'static> {
    NegateOperation
        .make_unchecked_operator(types, ty, &[])
        .apply(value)
        .unwrap()
}

#[test]
fn signatures_cover_signed_kinds() {
    let ids: Vec<TypeId> = NegateOperation
        .signatures()
        .iter()
        .map(|sig| sig.argument_type_ids()[0])
        .collect();
    assert_eq!(
        ids,
        vec![
            TypeId::Int,
            TypeId::Long,
            TypeId::Float,
            TypeId::Double,
            TypeId::DatetimeInterval,
            TypeId::YearMonthInterval,
        ]
    );
}

#[test]
fn result_type_is_the_operand_type() {
    let types = TypeFactory::new();
    let long = types.get_type(TypeId::Long, true);
    assert_eq!(NegateOperation.result_type(&types, long, &[]), long);
}

#[test]
fn rejects_unsigned_kinds_and_static_args() {
    let types = TypeFactory::new();
    let bool_ty = types.get_type(TypeId::Bool, false);
    assert_eq!(
        NegateOperation.can_apply_to(&types, bool_ty, &[]),
        Err(ApplyError::UnsupportedOperand {
            operation: "Negate",
            operand: "Bool".to_owned(),
        })
    );

    let varchar = types.get_parameterized(TypeId::VarChar, 3, false);
    assert!(NegateOperation.can_apply_to(&types, varchar, &[]).is_err());

    let int = types.get_type(TypeId::Int, false);
    assert!(matches!(
        NegateOperation.can_apply_to(&types, int, &[TypedValue::int(1)]),
        Err(ApplyError::StaticArgumentCount { .. })
    ));
}

#[test]
fn negates_numbers() {
    let types = TypeFactory::new();
    let int = types.get_type(TypeId::Int, false);
    assert_eq!(negate(&types, int, &TypedValue::int(7)), TypedValue::int(-7));
    assert_eq!(negate(&types, int, &TypedValue::int(i32::MIN)), TypedValue::int(i32::MIN));

    let double = types.get_type(TypeId::Double, false);
    assert_eq!(
        negate(&types, double, &TypedValue::double(1.5)),
        TypedValue::double(-1.5)
    );
}

#[test]
fn negates_intervals() {
    let types = TypeFactory::new();
    let interval = types.get_type(TypeId::DatetimeInterval, false);
    assert_eq!(
        negate(
            &types,
            interval,
            &TypedValue::datetime_interval(DatetimeIntervalLit { micros: 90 })
        ),
        TypedValue::datetime_interval(DatetimeIntervalLit { micros: -90 })
    );

    let months = types.get_type(TypeId::YearMonthInterval, false);
    assert_eq!(
        negate(
            &types,
            months,
            &TypedValue::year_month_interval(YearMonthIntervalLit { months: -14 })
        ),
        TypedValue::year_month_interval(YearMonthIntervalLit { months: 14 })
    );
}

#[test]
fn null_stays_null() {
    let types = TypeFactory::new();
    let float = types.get_type(TypeId::Float, true);
    let out = negate(&types, float, &TypedValue::null(TypeId::Float));
    assert!(out.is_null());
    assert_eq!(out.type_id(), TypeId::Float);
}
