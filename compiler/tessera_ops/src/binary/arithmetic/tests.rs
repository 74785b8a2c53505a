use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const ADD: ArithmeticOperation = ArithmeticOperation::new(ArithmeticOp::Add);
const SUBTRACT: ArithmeticOperation = ArithmeticOperation::new(ArithmeticOp::Subtract);
const MULTIPLY: ArithmeticOperation = ArithmeticOperation::new(ArithmeticOp::Multiply);
const DIVIDE: ArithmeticOperation = ArithmeticOperation::new(ArithmeticOp::Divide);
const MODULO: ArithmeticOperation = ArithmeticOperation::new(ArithmeticOp::Modulo);

fn eval(
    op: ArithmeticOperation,
    types: &TypeFactory,
    (left_ty, left): (&Type, TypedValue<'static>),
    (right_ty, right): (&Type, TypedValue<'static>),
) -> Result<TypedValue<'static>, EvalError> {
    op.make_unchecked_operator(types, left_ty, right_ty)
        .apply(&left, &right)
}

#[test]
fn names_and_symbols() {
    assert_eq!(ADD.name(), "Add");
    assert_eq!(ADD.short_name(), "+");
    assert_eq!(MODULO.name(), "Modulo");
    assert_eq!(MODULO.short_name(), "%");
    assert_eq!(DIVIDE.op(), ArithmeticOp::Divide);
}

#[test]
fn every_pair_of_arithmetic_kinds_has_a_signature() {
    let signatures = MULTIPLY.signatures();
    assert_eq!(signatures.len(), 16);
    assert!(signatures
        .iter()
        .any(|sig| sig.matches(&[TypeId::Float, TypeId::Long])));
    assert!(!signatures
        .iter()
        .any(|sig| sig.argument_type_ids().contains(&TypeId::Bool)));
}

#[test]
fn result_type_unifies_operands() {
    let types = TypeFactory::new();
    let int = types.get_type(TypeId::Int, false);
    let long = types.get_type(TypeId::Long, true);
    let float = types.get_type(TypeId::Float, false);

    assert_eq!(ADD.result_type(&types, int, int), int);
    assert_eq!(ADD.result_type(&types, int, long), long);
    assert_eq!(ADD.result_type(&types, int, float), float);
    assert_eq!(
        ADD.result_type(&types, long, float),
        types.get_type(TypeId::Double, true)
    );
}

#[test]
fn rejects_non_arithmetic_operands() {
    let types = TypeFactory::new();
    let int = types.get_type(TypeId::Int, false);
    let bool_ty = types.get_type(TypeId::Bool, true);
    assert_eq!(
        SUBTRACT.can_apply_to(&types, bool_ty, int),
        Err(ApplyError::IncompatibleOperands {
            operation: "Subtract",
            left: "Bool NULL".to_owned(),
            right: "Int".to_owned(),
        })
    );

    let date = types.get_type(TypeId::Date, false);
    assert!(ADD.can_apply_to(&types, int, date).is_err());
}

#[test]
fn mixed_kinds_compute_in_the_result_kind() {
    let types = TypeFactory::new();
    let int = types.get_type(TypeId::Int, false);
    let long = types.get_type(TypeId::Long, false);
    let float = types.get_type(TypeId::Float, false);

    assert_eq!(
        eval(ADD, &types, (int, TypedValue::int(2)), (long, TypedValue::long(3))),
        Ok(TypedValue::long(5))
    );
    assert_eq!(
        eval(
            ADD,
            &types,
            (long, TypedValue::long(1)),
            (float, TypedValue::float(0.5))
        ),
        Ok(TypedValue::double(1.5))
    );
    assert_eq!(
        eval(
            MULTIPLY,
            &types,
            (float, TypedValue::float(1.5)),
            (int, TypedValue::int(4))
        ),
        Ok(TypedValue::float(6.0))
    );
}

#[test]
fn integer_arithmetic_wraps() {
    let types = TypeFactory::new();
    let int = types.get_type(TypeId::Int, false);
    assert_eq!(
        eval(
            ADD,
            &types,
            (int, TypedValue::int(i32::MAX)),
            (int, TypedValue::int(1))
        ),
        Ok(TypedValue::int(i32::MIN))
    );
    assert_eq!(
        eval(
            SUBTRACT,
            &types,
            (int, TypedValue::int(3)),
            (int, TypedValue::int(10))
        ),
        Ok(TypedValue::int(-7))
    );
}

#[test]
fn division() {
    let types = TypeFactory::new();
    let int = types.get_type(TypeId::Int, false);
    let double = types.get_type(TypeId::Double, false);

    assert_eq!(
        eval(DIVIDE, &types, (int, TypedValue::int(7)), (int, TypedValue::int(2))),
        Ok(TypedValue::int(3))
    );
    assert_eq!(
        eval(MODULO, &types, (int, TypedValue::int(7)), (int, TypedValue::int(2))),
        Ok(TypedValue::int(1))
    );
    assert_eq!(
        eval(DIVIDE, &types, (int, TypedValue::int(7)), (int, TypedValue::int(0))),
        Err(EvalError::DivisionByZero)
    );
    assert_eq!(
        eval(MODULO, &types, (int, TypedValue::int(7)), (int, TypedValue::int(0))),
        Err(EvalError::DivisionByZero)
    );
    assert_eq!(
        eval(
            DIVIDE,
            &types,
            (double, TypedValue::double(1.0)),
            (double, TypedValue::double(0.0))
        ),
        Ok(TypedValue::double(f64::INFINITY))
    );
}

#[test]
fn null_operand_gives_null_result() {
    let types = TypeFactory::new();
    let int = types.get_type(TypeId::Int, true);
    let double = types.get_type(TypeId::Double, false);
    let out = eval(
        ADD,
        &types,
        (int, TypedValue::null(TypeId::Int)),
        (double, TypedValue::double(1.0)),
    )
    .unwrap();
    assert!(out.is_null());
    assert_eq!(out.type_id(), TypeId::Double);
}

proptest! {
    #[test]
    fn long_addition_matches_wrapping_add(a in any::<i64>(), b in any::<i64>()) {
        let types = TypeFactory::new();
        let long = types.get_type(TypeId::Long, false);
        let out = eval(ADD, &types, (long, TypedValue::long(a)), (long, TypedValue::long(b)));
        prop_assert_eq!(out, Ok(TypedValue::long(a.wrapping_add(b))));
    }

    #[test]
    fn int_and_long_agree_on_small_values(a in -1000i32..1000, b in 1i32..1000) {
        let types = TypeFactory::new();
        let int = types.get_type(TypeId::Int, false);
        let long = types.get_type(TypeId::Long, false);
        let narrow = eval(DIVIDE, &types, (int, TypedValue::int(a)), (int, TypedValue::int(b)))
            .unwrap();
        let wide = eval(DIVIDE, &types, (int, TypedValue::int(a)), (long, TypedValue::long(i64::from(b))))
            .unwrap();
        prop_assert_eq!(wide, TypedValue::long(i64::from(narrow.literal::<i32>())));
    }
}
