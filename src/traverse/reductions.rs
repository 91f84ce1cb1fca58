//! Reducer callables for [`reduce`](super::reduce).

use std::ops::Add;

use crate::callable::Function;
use crate::value::Shareable;

/// `(aggregate, next) -> aggregate + next`.
///
/// # Examples
///
/// ```rust
/// use callgraft::args;
/// use callgraft::prelude::*;
/// use callgraft::traverse::sum;
///
/// let total = sum::<f64, f64>();
/// assert_eq!(total.call::<f64>(args![1.5_f64, 2.0_f64]), Ok(3.5));
/// ```
#[must_use]
pub fn sum<Acc, Item>() -> Function
where
    Acc: Add<Item, Output = Acc> + Clone + Shareable + 'static,
    Item: 'static,
{
    Function::new(|aggregate: Acc, next: Item| aggregate + next)
}

/// `(aggregate, next) -> the larger of the two`; keeps `aggregate` on ties.
#[must_use]
pub fn max<T>() -> Function
where
    T: PartialOrd + Clone + Shareable + 'static,
{
    Function::new(|aggregate: T, next: T| if next > aggregate { next } else { aggregate })
}

/// `(aggregate, next) -> the smaller of the two`; keeps `aggregate` on ties.
#[must_use]
pub fn min<T>() -> Function
where
    T: PartialOrd + Clone + Shareable + 'static,
{
    Function::new(|aggregate: T, next: T| if next < aggregate { next } else { aggregate })
}
