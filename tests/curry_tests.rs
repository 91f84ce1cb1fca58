//! Integration tests for type-directed currying.
//!
//! Covers `curry`, `curry_all`, the `curry!` macro and `constant`.

use callgraft::prelude::*;
use callgraft::{args, curry};
use rstest::rstest;

fn describe(name: String, age: u32, verified: bool) -> String {
    format!("{name}:{age}:{verified}")
}

// =============================================================================
// Single value
// =============================================================================

#[rstest]
fn test_curry_removes_only_the_bound_slot() {
    let describe = Function::new(describe);
    let aged = describe.curry(Value::new(30_u32)).unwrap();

    assert_eq!(aged.slot(), 1);
    assert_eq!(
        aged.signature().params(),
        &ParamList::from_iter([TypeTag::of::<String>(), TypeTag::of::<bool>()])
    );
    assert_eq!(
        aged.call::<String>(args!["ada".to_string(), true]),
        Ok("ada:30:true".to_string())
    );
}

#[rstest]
fn test_curry_leaves_the_original_untouched() {
    let describe = Function::new(describe);
    let _aged = curry(&describe, Value::new(30_u32)).unwrap();

    assert_eq!(describe.signature().arity(), 3);
    assert_eq!(
        describe.call::<String>(args!["bob".to_string(), 4_u32, false]),
        Ok("bob:4:false".to_string())
    );
}

#[rstest]
fn test_curry_binds_leftmost_duplicate() {
    let minus = Function::new(|left: i64, right: i64| left - right);
    let ten_minus = minus.curry(Value::new(10_i64)).unwrap();

    assert_eq!(ten_minus.slot(), 0);
    assert_eq!(ten_minus.call::<i64>(args![3_i64]), Ok(7));
}

#[rstest]
fn test_curry_absent_type_is_a_construction_error() {
    let describe = Function::new(describe);
    let error = describe.curry(Value::new(1.5_f32)).unwrap_err();

    assert!(matches!(error, ConstructionError::TypeNotFound { .. }));
    assert!(error.to_string().contains("f32"));
}

#[rstest]
fn test_curry_fallible_value_does_not_match_plain_result_parameter() {
    let recover = Function::new(|attempt: Result<i32, String>| attempt.unwrap_or(-1));

    let error = recover
        .curry(Value::failure::<i32, String>("boom".to_string()))
        .unwrap_err();
    assert!(matches!(error, ConstructionError::TypeNotFound { .. }));

    let curried = recover
        .curry(Value::new(Err::<i32, String>("boom".to_string())))
        .unwrap();
    assert_eq!(curried.call::<i32>(args![]), Ok(-1));
}

// =============================================================================
// Several values
// =============================================================================

#[rstest]
fn test_curry_all_binds_in_order() {
    let describe = Function::new(describe);
    let bound = describe.curry_all(args![true, "eve".to_string()]).unwrap();

    assert_eq!(bound.signature().params().to_string(), "(u32)");
    assert_eq!(
        bound.call::<String>(args![7_u32]),
        Ok("eve:7:true".to_string())
    );
}

#[rstest]
fn test_curry_all_fills_successive_duplicates() {
    let ratio = Function::new(|numerator: i32, denominator: i32| numerator / denominator);
    let bound = curry!(ratio, 20_i32, 4_i32).unwrap();

    assert_eq!(bound.signature().arity(), 0);
    assert_eq!(bound.call::<i32>(args![]), Ok(5));
}

#[rstest]
fn test_curry_macro_without_values_copies() {
    let ratio = Function::new(|numerator: i32, denominator: i32| numerator / denominator);
    let copy = curry!(ratio).unwrap();

    assert_eq!(copy.signature(), ratio.signature());
    assert_eq!(copy.call::<i32>(args![9_i32, 3_i32]), Ok(3));
}

#[rstest]
fn test_curry_all_rejects_surplus_values() {
    let single = Function::new(|value: u8| value);
    let error = curry!(single, 1_u8, 2_u8).unwrap_err();

    assert_eq!(
        error,
        ConstructionError::type_not_found(TypeTag::of::<u8>(), ParamList::new())
    );
}

// =============================================================================
// Constant
// =============================================================================

#[rstest]
#[case(0)]
#[case(-17)]
#[case(i32::MAX)]
fn test_constant_always_returns_its_value(#[case] value: i32) {
    let always = constant(value);

    assert_eq!(always.signature().arity(), 0);
    assert_eq!(always.call::<i32>(args![]), Ok(value));
    assert_eq!(always.call::<i32>(args![]), Ok(value));
}

#[rstest]
fn test_constant_composes_as_an_argument_source() {
    let double = Function::new(|value: i32| value * 2);
    let fixed = compose(&double, &constant(21_i32)).unwrap();

    assert_eq!(fixed.signature().arity(), 0);
    assert_eq!(fixed.call::<i32>(args![]), Ok(42));
}
