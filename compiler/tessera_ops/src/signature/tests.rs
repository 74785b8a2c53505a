use super::*;
use pretty_assertions::assert_eq;

#[test]
fn display_lists_static_arguments_after_a_semicolon() {
    let cast = OperationSignature::new("Cast", &[TypeId::Int], &[TypeId::VarChar]);
    assert_eq!(cast.to_string(), "Cast(Int; VarChar)");

    let add = OperationSignature::binary("Add", TypeId::Int, TypeId::Long);
    assert_eq!(add.to_string(), "Add(Int, Long)");

    let negate = OperationSignature::unary("Negate", TypeId::Double);
    assert_eq!(negate.to_string(), "Negate(Double)");
}

#[test]
fn counts() {
    let cast = OperationSignature::new("Cast", &[TypeId::Char], &[TypeId::VarChar]);
    assert_eq!(cast.num_arguments(), 1);
    assert_eq!(cast.num_static_arguments(), 1);
    assert_eq!(cast.argument_type_ids(), &[TypeId::Char]);
    assert_eq!(cast.static_argument_type_ids(), &[TypeId::VarChar]);
    assert_eq!(cast.name(), "Cast");
}

#[test]
fn matching_is_exact_and_ordered() {
    let sig = OperationSignature::binary("Less", TypeId::Int, TypeId::Double);
    assert!(sig.matches(&[TypeId::Int, TypeId::Double]));
    assert!(!sig.matches(&[TypeId::Double, TypeId::Int]));
    assert!(!sig.matches(&[TypeId::Int]));
    assert!(!sig.matches(&[TypeId::Int, TypeId::Double, TypeId::Int]));
}
