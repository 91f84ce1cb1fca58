//! Integration tests for composition, duplicate removal and shared context.
//!
//! Exercises whole pipelines built from several transformations, including
//! bound methods and error short-circuiting.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use callgraft::args;
use callgraft::prelude::*;
use rstest::{fixture, rstest};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn square(value: i32) -> i32 {
    value * value
}

fn increment(value: i32) -> i32 {
    value + 1
}

fn divide(numerator: i32, denominator: i32) -> i32 {
    numerator / denominator
}

// =============================================================================
// Scenarios
// =============================================================================

#[rstest]
fn test_square_of_increment() {
    init_tracing();
    let composed = compose(&Function::new(square), &Function::new(increment)).unwrap();

    assert_eq!(composed.call::<i32>(args![3_i32]), Ok(16));
}

#[rstest]
fn test_divide_curried_with_numerator() {
    init_tracing();
    let ten_over = curry(&Function::new(divide), Value::new(10_i32)).unwrap();

    assert_eq!(ten_over.call::<i32>(args![2_i32]), Ok(5));
}

#[rstest]
fn test_composed_callables_stay_valid_after_inputs_drop() {
    let composed = {
        let square = Function::new(square);
        let increment = Function::new(increment);
        compose(&square, &increment).unwrap()
    };
    let copy = composed.clone();
    drop(composed);

    assert_eq!(copy.call::<i32>(args![0_i32]), Ok(1));
}

// =============================================================================
// Error short-circuit
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
enum LookupError {
    Missing(String),
    Negative(i64),
}

#[fixture]
fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

fn lookup(key: &'static str) -> Result<i64, LookupError> {
    match key {
        "one" => Ok(1),
        "minus" => Ok(-1),
        other => Err(LookupError::Missing(other.to_string())),
    }
}

#[rstest]
fn test_failure_skips_outer(counter: Arc<AtomicUsize>) {
    init_tracing();
    let calls = Arc::clone(&counter);
    let validate = Function::fallible(move |value: i64| {
        calls.fetch_add(1, Ordering::SeqCst);
        if value < 0 {
            Err(LookupError::Negative(value))
        } else {
            Ok(value * 100)
        }
    });
    let pipeline = compose(&validate, &Function::fallible(lookup)).unwrap();
    assert!(pipeline.short_circuits());

    assert_eq!(
        pipeline.call_result::<i64, LookupError>(args!["one"]),
        Ok(Ok(100))
    );
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    assert_eq!(
        pipeline.call_result::<i64, LookupError>(args!["two"]),
        Ok(Err(LookupError::Missing("two".to_string())))
    );
    assert_eq!(counter.load(Ordering::SeqCst), 1);

    assert_eq!(
        pipeline.call_result::<i64, LookupError>(args!["minus"]),
        Ok(Err(LookupError::Negative(-1)))
    );
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[rstest]
fn test_fallible_into_plain_is_rejected() {
    let error = compose(
        &Function::new(|value: i64| value.to_string()),
        &Function::fallible(lookup),
    )
    .unwrap_err();

    assert!(matches!(error, ConstructionError::UnhandledFailure { .. }));
}

#[rstest]
fn test_explicit_recovery_makes_composition_plain() {
    let recover = Function::new(|attempt: Result<i64, LookupError>| attempt.unwrap_or_default());
    let safe_lookup = Function::new(|key: &'static str| lookup(key));
    let pipeline = compose(&recover, &safe_lookup).unwrap();

    assert!(!pipeline.short_circuits());
    assert_eq!(pipeline.call::<i64>(args!["one"]), Ok(1));
    assert_eq!(pipeline.call::<i64>(args!["nope"]), Ok(0));
}

#[rstest]
fn test_failure_types_must_agree() {
    let error = compose(
        &Function::fallible(|value: i64| -> Result<i64, String> { Ok(value) }),
        &Function::fallible(lookup),
    )
    .unwrap_err();

    assert_eq!(
        error,
        ConstructionError::FailureMismatch {
            inner: TypeInfo::of::<LookupError>(),
            outer: TypeInfo::of::<String>(),
        }
    );
}

// =============================================================================
// Bound methods
// =============================================================================

#[derive(Debug, Default)]
struct Ledger {
    entries: Vec<i64>,
}

impl Ledger {
    fn record(&mut self, amount: i64) -> usize {
        self.entries.push(amount);
        self.entries.len()
    }

    fn balance(&mut self) -> i64 {
        self.entries.iter().sum()
    }
}

#[rstest]
fn test_bound_method_fed_by_composition() {
    let ledger = ObjectRef::new(Ledger::default());
    let record = bind_method(Ledger::record, &ledger);
    let record_parsed = compose(
        &record,
        &compose(
            &Function::new(|attempt: Result<i64, LookupError>| attempt.unwrap_or(0)),
            &Function::new(|key: &'static str| lookup(key)),
        )
        .unwrap(),
    )
    .unwrap();

    assert_eq!(record_parsed.call::<usize>(args!["one"]), Ok(1));
    assert_eq!(record_parsed.call::<usize>(args!["minus"]), Ok(2));
    assert_eq!(ledger.borrow().entries, vec![1, -1]);

    let balance = bind_method(Ledger::balance, &ledger);
    assert_eq!(balance.call::<i64>(args![]), Ok(0));
}

#[rstest]
fn test_unbound_method_takes_target_first() {
    let first = ObjectRef::new(Ledger::default());
    let second = ObjectRef::new(Ledger::default());
    let record = Method::new(Ledger::record);

    assert_eq!(record.call::<usize>(args![first.clone(), 5_i64]), Ok(1));
    assert_eq!(record.call::<usize>(args![second.clone(), 6_i64]), Ok(1));
    assert_eq!(record.call::<usize>(args![first.clone(), 7_i64]), Ok(2));
    assert_eq!(first.borrow().entries, vec![5, 7]);
    assert_eq!(second.borrow().entries, vec![6]);
}

// =============================================================================
// Duplicate removal and shared context
// =============================================================================

#[derive(Clone, Debug)]
struct Locale {
    separator: char,
}

#[rstest]
fn test_duplicate_removal_after_composition() {
    let join = Function::new(|low: i32, high: i32| format!("{low}..{high}"));
    let offset = Function::new(|base: i32, delta: u8| base + i32::from(delta));

    // join(offset(base, delta), high): i32 twice, then u8
    let composed = compose(&join, &offset).unwrap();
    assert_eq!(composed.signature().params().to_string(), "(i32, u8, i32)");

    let merged = composed.remove_duplicate_param::<i32>().unwrap();
    assert_eq!(merged.signature().params().to_string(), "(i32, u8)");
    assert_eq!(
        merged.call::<String>(args![10_i32, 5_u8]),
        Ok("15..10".to_string())
    );
}

#[rstest]
fn test_shared_locale_supplied_once() {
    let render = Function::new(|locale: Locale, digits: String| {
        digits
            .as_bytes()
            .rchunks(3)
            .rev()
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join(&locale.separator.to_string())
    });
    let digits = Function::new(|_locale: Locale, value: u64| value.to_string());

    let formatted = render.compose_with_shared_param(&digits).unwrap();

    assert_eq!(formatted.signature().arity(), 2);
    assert_eq!(
        formatted.call::<String>(args![Locale { separator: ',' }, 1_234_567_u64]),
        Ok("1,234,567".to_string())
    );
    assert_eq!(
        formatted.call::<String>(args![Locale { separator: '.' }, 42_u64]),
        Ok("42".to_string())
    );
}

// =============================================================================
// Invocation errors
// =============================================================================

#[rstest]
#[case::too_few(args![], InvokeError::ArityMismatch { expected: 1, found: 0 })]
#[case::too_many(args![1_i32, 2_i32], InvokeError::ArityMismatch { expected: 1, found: 2 })]
#[case::wrong_type(
    args![1_u32],
    InvokeError::type_mismatch(0, TypeTag::of::<i32>(), TypeTag::of::<u32>())
)]
fn test_composed_invocation_checks_arguments(#[case] args: Args, #[case] expected: InvokeError) {
    let composed = compose(&Function::new(square), &Function::new(increment)).unwrap();

    assert_eq!(composed.invoke(args).unwrap_err(), expected);
}

#[rstest]
fn test_busy_target_is_reported() {
    let ledger = ObjectRef::new(Ledger::default());
    let record = bind_method(Ledger::record, &ledger);
    let _guard = ledger.borrow_mut();

    assert!(matches!(
        record.call::<usize>(args![3_i64]),
        Err(InvokeError::TargetBorrowed { .. })
    ));
}
