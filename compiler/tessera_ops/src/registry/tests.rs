use super::*;
use pretty_assertions::assert_eq;
use tessera_types::TypeId;

#[test]
fn registry_has_all_operations() {
    let registry = OperationRegistry::new();
    assert_eq!(registry.len(), 13);
    assert!(!registry.is_empty());
    assert_eq!(registry.ids().count(), 13);
    for id in registry.ids() {
        let operation = OperationRegistry::get(id);
        assert!(!operation.signatures().is_empty(), "{operation:?}");
    }
}

#[test]
fn lookup_by_full_and_short_name() {
    let registry = OperationRegistry::new();
    assert_eq!(registry.lookup("add"), &[OperationId::Add]);
    assert_eq!(registry.lookup("+"), &[OperationId::Add]);
    assert_eq!(registry.lookup("CAST"), &[OperationId::Cast]);
    assert_eq!(registry.lookup("<>"), &[OperationId::NotEqual]);
    assert_eq!(
        registry.lookup("-"),
        &[OperationId::Negate, OperationId::Subtract]
    );
    assert!(registry.lookup("frobnicate").is_empty());
}

#[test]
fn arity_picks_between_shared_names() {
    let types = TypeFactory::new();
    let registry = OperationRegistry::new();
    let int = types.get_type(TypeId::Int, false);

    let negate = registry.resolve_unary(&types, "-", int, &[]).unwrap();
    assert_eq!(negate.operation().name(), "Negate");

    let subtract = registry.resolve_binary(&types, "-", int, int).unwrap();
    assert_eq!(subtract.operation().name(), "Subtract");
}

#[test]
fn resolution_errors() {
    let types = TypeFactory::new();
    let registry = OperationRegistry::new();
    let int = types.get_type(TypeId::Int, false);
    let date = types.get_type(TypeId::Date, true);

    assert_eq!(
        registry.resolve_unary(&types, "sqrt", int, &[]).unwrap_err(),
        ApplyError::UnknownOperation {
            name: "sqrt".to_owned()
        }
    );
    assert_eq!(
        registry.resolve_unary(&types, "add", int, &[]).unwrap_err(),
        ApplyError::Arity {
            operation: "Add",
            expected: 2,
            actual: 1,
        }
    );
    assert_eq!(
        registry.resolve_binary(&types, "*", int, date).unwrap_err(),
        ApplyError::NoMatchingSignature {
            operation: "Multiply",
            operands: "Int, Date NULL".to_owned(),
        }
    );
    assert_eq!(
        registry
            .resolve_unary(&types, "cast", int, &[TypedValue::varchar("varchar(0)")])
            .unwrap_err()
            .to_string(),
        "Invalid target type for CAST"
    );
}

#[test]
fn bound_cast_runs() {
    let types = TypeFactory::new();
    let registry = OperationRegistry::new();
    let long = types.get_type(TypeId::Long, true);

    let bound = registry
        .resolve_unary(&types, "Cast", long, &[TypedValue::varchar("varchar(4)")])
        .unwrap();
    assert_eq!(bound.signature().to_string(), "Cast(Long; VarChar)");
    assert_eq!(bound.operand(), long);
    assert_eq!(bound.static_args(), &[TypedValue::varchar("varchar(4)")]);
    assert_eq!(
        bound.result_type(),
        types.get_parameterized(TypeId::VarChar, 4, true)
    );

    let operator = bound.make_unchecked_operator(&types);
    assert_eq!(
        operator.apply(&TypedValue::long(123_456)),
        Ok(TypedValue::varchar("1234"))
    );
}

#[test]
fn bound_comparison_runs() {
    let types = TypeFactory::new();
    let registry = OperationRegistry::new();
    let int = types.get_type(TypeId::Int, false);
    let float = types.get_type(TypeId::Float, false);

    let bound = registry.resolve_binary(&types, "<=", int, float).unwrap();
    assert_eq!(bound.signature().to_string(), "LessOrEqual(Int, Float)");
    assert_eq!(bound.left(), int);
    assert_eq!(bound.right(), float);
    assert_eq!(bound.result_type(), types.get_type(TypeId::Bool, false));

    let operator = bound.make_unchecked_operator(&types);
    assert_eq!(
        operator.apply(&TypedValue::int(3), &TypedValue::float(3.0)),
        Ok(TypedValue::bool(true))
    );
    let debug = format!("{bound:?}");
    assert!(debug.contains("LessOrEqual(Int, Float)"), "{debug}");
}
