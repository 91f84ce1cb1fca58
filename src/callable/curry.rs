//! Binding values into parameter slots.

use tracing::debug;

use super::native::Function;
use super::{BoxedCallable, Callable, ensure_arity};
use crate::error::{ConstructionError, InvokeError};
use crate::signature::Signature;
use crate::value::{Args, Shareable, Value};

/// A callable with one parameter slot filled by a bound value.
///
/// The exposed signature is the inner signature without that slot. On
/// invocation the bound value is inserted back at its slot and everything
/// else is forwarded in order.
#[derive(Clone, Debug)]
pub struct Curried {
    inner: BoxedCallable,
    slot: usize,
    value: Value,
    signature: Signature,
}

impl Curried {
    /// Binds `value` at `slot` of `inner`. The caller has checked the type.
    pub(crate) fn bind(inner: BoxedCallable, slot: usize, value: Value) -> Self {
        let signature = Signature::new(
            inner.signature().params().without(slot),
            *inner.signature().result(),
        );
        Self {
            inner,
            slot,
            value,
            signature,
        }
    }

    /// Position of the bound slot in the inner parameter list.
    #[must_use]
    pub const fn slot(&self) -> usize {
        self.slot
    }

    /// The bound value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }
}

impl Callable for Curried {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn apply(&self, mut args: Args) -> Result<Value, InvokeError> {
        ensure_arity(&args, &self.signature)?;
        args.insert(self.slot, self.value.clone());
        self.inner.apply(args)
    }

    fn clone_boxed(&self) -> BoxedCallable {
        Box::new(self.clone())
    }
}

fn curry_owned(inner: BoxedCallable, value: Value) -> Result<Curried, ConstructionError> {
    let split = inner.signature().params().split(&value.type_tag())?;
    let curried = Curried::bind(inner, split.index, value);
    debug!(
        slot = split.index,
        signature = %curried.signature,
        "bound value into callable"
    );
    Ok(curried)
}

/// Binds `value` into the leftmost parameter of the same type.
///
/// The result owns a clone of `callable` and has one parameter fewer.
///
/// # Errors
///
/// Returns [`ConstructionError::TypeNotFound`] if no parameter has the
/// value's type.
///
/// # Examples
///
/// ```rust
/// use callgraft::args;
/// use callgraft::prelude::*;
///
/// fn divide(numerator: i32, denominator: i32) -> i32 {
///     numerator / denominator
/// }
///
/// // Both parameters are i32; the leftmost one (the numerator) is bound.
/// let ten_over = curry(&Function::new(divide), Value::new(10_i32)).unwrap();
/// assert_eq!(ten_over.call::<i32>(args![2_i32]), Ok(5));
/// ```
pub fn curry<C>(callable: &C, value: Value) -> Result<Curried, ConstructionError>
where
    C: Callable + ?Sized,
{
    curry_owned(callable.clone_boxed(), value)
}

/// Binds several values, one at a time, left to right.
///
/// Each value goes into the leftmost matching slot of the parameter list
/// left over by the previous step. Binding no values returns a copy of
/// `callable`.
///
/// # Errors
///
/// Returns the [`ConstructionError`] of the first value that has no slot.
///
/// # Examples
///
/// ```rust
/// use callgraft::args;
/// use callgraft::prelude::*;
///
/// let describe = Function::new(|name: String, age: u32, city: String| {
///     format!("{name} ({age}) from {city}")
/// });
///
/// // The first String goes to `name`, the second to the next String: `city`.
/// let bound = curry_all(&describe, args!["Ada".to_string(), "London".to_string()]).unwrap();
///
/// assert_eq!(bound.call::<String>(args![36_u32]), Ok("Ada (36) from London".to_string()));
/// ```
pub fn curry_all<C>(callable: &C, values: Args) -> Result<BoxedCallable, ConstructionError>
where
    C: Callable + ?Sized,
{
    values
        .into_iter()
        .try_fold(callable.clone_boxed(), |current, value| {
            curry_owned(current, value).map(|curried| Box::new(curried) as BoxedCallable)
        })
}

/// Binds values with [`curry_all`], wrapping each with [`Value::new`].
///
/// # Examples
///
/// ```rust
/// use callgraft::{args, curry};
/// use callgraft::prelude::*;
///
/// let volume = Function::new(|width: u32, height: u32, depth: u32| width * height * depth);
/// let slab = curry!(volume, 2_u32, 3_u32).unwrap();
///
/// assert_eq!(slab.call::<u32>(args![4_u32]), Ok(24));
/// ```
#[macro_export]
macro_rules! curry {
    ($callable:expr $(,)?) => {
        $crate::callable::curry_all(&$callable, $crate::value::Args::new())
    };
    ($callable:expr, $($value:expr),+ $(,)?) => {
        $crate::callable::curry_all(&$callable, $crate::args![$($value),+])
    };
}

/// Returns its argument unchanged.
#[inline]
#[must_use]
pub const fn identity<T>(value: T) -> T {
    value
}

/// The identity function curried with `value`: a zero-argument callable
/// that always returns `value`.
///
/// # Examples
///
/// ```rust
/// use callgraft::args;
/// use callgraft::prelude::*;
///
/// let always = constant("fixed".to_string());
/// assert_eq!(always.signature().arity(), 0);
/// assert_eq!(always.call::<String>(args![]), Ok("fixed".to_string()));
/// ```
#[must_use]
pub fn constant<T: Clone + Shareable + 'static>(value: T) -> Curried {
    Curried::bind(Box::new(Function::new(identity::<T>)), 0, Value::new(value))
}
