//! Sequence helpers driven by a callable.

use crate::callable::{Callable, CallableExt};
use crate::error::InvokeError;
use crate::value::{Args, Shareable, Value};

fn single<I: Clone + Shareable + 'static>(item: I) -> Args {
    Args::from_iter([Value::new(item)])
}

/// Invokes `function` on every item, in order, collecting the results.
///
/// # Errors
///
/// Returns the first [`InvokeError`], e.g. when `function` does not take
/// an `I` or does not return an `O`.
///
/// # Examples
///
/// ```rust
/// use callgraft::prelude::*;
/// use callgraft::traverse::map;
///
/// let double = Function::new(|value: i32| value * 2);
/// assert_eq!(map::<_, i32, _>(vec![1, 2, 3], &double), Ok(vec![2, 4, 6]));
/// ```
pub fn map<I, O, C>(items: impl IntoIterator<Item = I>, function: &C) -> Result<Vec<O>, InvokeError>
where
    I: Clone + Shareable + 'static,
    O: 'static,
    C: Callable + ?Sized,
{
    items
        .into_iter()
        .map(|item| function.call::<O>(single(item)))
        .collect()
}

/// Invokes `predicate` on every item and combines the results with AND.
///
/// With `break_on_failure`, stops at the first `false` and returns `false`
/// without visiting the remaining items. Otherwise every item is visited.
/// An empty sequence is `true`.
///
/// # Errors
///
/// Returns the first [`InvokeError`], e.g. when `predicate` does not
/// return `bool`.
///
/// # Examples
///
/// ```rust
/// use callgraft::prelude::*;
/// use callgraft::traverse::apply;
///
/// let positive = Function::new(|value: i32| value > 0);
/// assert_eq!(apply(vec![1, 2, 3], &positive, true), Ok(true));
/// assert_eq!(apply(vec![1, -2, 3], &positive, false), Ok(false));
/// ```
pub fn apply<I, C>(
    items: impl IntoIterator<Item = I>,
    predicate: &C,
    break_on_failure: bool,
) -> Result<bool, InvokeError>
where
    I: Clone + Shareable + 'static,
    C: Callable + ?Sized,
{
    let mut success = true;
    for item in items {
        success &= predicate.call::<bool>(single(item))?;
        if break_on_failure && !success {
            return Ok(false);
        }
    }
    Ok(success)
}

/// Left fold: `acc = reducer(acc, item)` for every item, starting at `initial`.
///
/// # Errors
///
/// Returns the first [`InvokeError`], e.g. when `reducer` is not of shape
/// `(O, I) -> O`.
///
/// # Examples
///
/// ```rust
/// use callgraft::traverse::{reduce, sum};
///
/// assert_eq!(reduce(vec![1, 2, 3, 4], &sum::<i32, i32>(), 0), Ok(10));
/// ```
pub fn reduce<I, O, C>(
    items: impl IntoIterator<Item = I>,
    reducer: &C,
    initial: O,
) -> Result<O, InvokeError>
where
    I: Clone + Shareable + 'static,
    O: Clone + Shareable + 'static,
    C: Callable + ?Sized,
{
    items.into_iter().try_fold(initial, |aggregate, item| {
        reducer.call::<O>(Args::from_iter([Value::new(aggregate), Value::new(item)]))
    })
}

/// [`reduce`] starting from `O::default()`.
///
/// # Errors
///
/// See [`reduce`].
pub fn reduce_default<I, O, C>(
    items: impl IntoIterator<Item = I>,
    reducer: &C,
) -> Result<O, InvokeError>
where
    I: Clone + Shareable + 'static,
    O: Clone + Default + Shareable + 'static,
    C: Callable + ?Sized,
{
    reduce(items, reducer, O::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callable::Function;
    use crate::signature::TypeTag;
    use rstest::rstest;

    #[rstest]
    fn map_of_empty_is_empty() {
        let double = Function::new(|value: i32| value * 2);
        assert_eq!(map::<i32, i32, _>(Vec::new(), &double), Ok(vec![]));
    }

    #[rstest]
    fn map_reports_wrong_item_type() {
        let double = Function::new(|value: i32| value * 2);
        assert_eq!(
            map::<u8, i32, _>(vec![1_u8], &double),
            Err(InvokeError::type_mismatch(0, TypeTag::of::<i32>(), TypeTag::of::<u8>()))
        );
    }

    #[rstest]
    fn apply_on_empty_is_true() {
        let never = Function::new(|_: i32| false);
        assert_eq!(apply(Vec::<i32>::new(), &never, true), Ok(true));
    }

    #[rstest]
    fn apply_needs_a_bool_result() {
        let not_bool = Function::new(|value: i32| value);
        assert!(matches!(
            apply(vec![1], &not_bool, false),
            Err(InvokeError::ResultMismatch { .. })
        ));
    }

    #[rstest]
    fn reduce_default_starts_from_default() {
        let concat = Function::new(|aggregate: String, next: char| {
            let mut aggregate = aggregate;
            aggregate.push(next);
            aggregate
        });
        assert_eq!(
            reduce_default::<_, String, _>("abc".chars(), &concat),
            Ok("abc".to_string())
        );
    }
}
