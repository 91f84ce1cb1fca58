//! The callable abstraction and its transformations.
//!
//! A [`Callable`] has a fixed [`Signature`] and can be invoked with an
//! [`Args`] list. Callables come from native adapters and from
//! transformations of other callables:
//!
//! | Variant | Built by |
//! |---------|----------|
//! | [`Function`] | [`Function::new`], [`Function::fallible`] |
//! | [`Method`] | [`Method::new`], [`Method::fallible`] |
//! | [`Curried`] | [`curry`], [`curry_all`], [`constant`], [`bind_method`] |
//! | [`Composed`] | [`compose`] |
//! | [`DuplicateEliminating`] | [`remove_duplicate_param`], [`compose_with_shared_param`] |
//!
//! Transformations only build. Nothing wrapped runs until the result is
//! invoked, and every type mismatch is reported when building.
//!
//! # Ownership
//!
//! A transformation stores clones of its inputs, obtained through
//! [`Callable::clone_boxed`]. The original callables stay usable and
//! independent. The only shared state is the target object of a
//! [`Method`], reached through an [`ObjectRef`].
//!
//! # Examples
//!
//! ```rust
//! use callgraft::args;
//! use callgraft::prelude::*;
//!
//! fn square(value: i32) -> i32 { value * value }
//! fn increment(value: i32) -> i32 { value + 1 }
//!
//! let square = Function::new(square);
//! let increment = Function::new(increment);
//!
//! // square(increment(x))
//! let composed = compose(&square, &increment).unwrap();
//! assert_eq!(composed.call::<i32>(args![3_i32]), Ok(16));
//! ```

mod compose;
mod curry;
mod dedup;
mod method;
mod native;
mod shared;

pub use compose::{Composed, compose};
pub use curry::{Curried, constant, curry, curry_all, identity};
pub use dedup::{DuplicateEliminating, remove_duplicate_param, remove_duplicate_tag};
pub use method::{FallibleMethod, Method, NativeMethod, ObjectRef, bind_method};
pub use native::{FallibleFn, Function, NativeFn};
pub use shared::compose_with_shared_param;

use std::fmt::{self, Debug, Formatter};

use crate::error::{ConstructionError, InvokeError};
use crate::signature::{Signature, TypeTag};
use crate::value::{Args, Shareable, Value};

/// A boxed, owned callable.
pub type BoxedCallable = Box<dyn Callable>;

/// Something that can be invoked with a fixed, ordered argument list.
///
/// Implementors provide [`apply`](Callable::apply), which may assume the
/// arguments already match [`signature`](Callable::signature), and
/// [`clone_boxed`](Callable::clone_boxed), which must return an independent
/// copy. Callers use [`invoke`](Callable::invoke), which checks the
/// arguments first.
///
/// With the `arc` feature every callable is `Send + Sync`.
pub trait Callable: Shareable {
    /// Declared parameters and result. Never changes.
    fn signature(&self) -> &Signature;

    /// Runs the wrapped computation.
    ///
    /// # Errors
    ///
    /// Returns an [`InvokeError`] if the arguments do not fit.
    fn apply(&self, args: Args) -> Result<Value, InvokeError>;

    /// Returns an independently owned copy.
    fn clone_boxed(&self) -> BoxedCallable;

    /// Checks `args` against the signature, then runs the computation.
    ///
    /// Failures produced by the computation itself come back inside the
    /// returned [`Value`], not as an `Err`.
    ///
    /// # Errors
    ///
    /// Returns [`InvokeError::ArityMismatch`] or [`InvokeError::TypeMismatch`]
    /// without running anything if the arguments do not match.
    fn invoke(&self, args: Args) -> Result<Value, InvokeError> {
        args.check(self.signature().params())?;
        self.apply(args)
    }
}

static_assertions::assert_obj_safe!(Callable);

impl Callable for BoxedCallable {
    fn signature(&self) -> &Signature {
        (**self).signature()
    }

    fn apply(&self, args: Args) -> Result<Value, InvokeError> {
        (**self).apply(args)
    }

    fn clone_boxed(&self) -> BoxedCallable {
        (**self).clone_boxed()
    }
}

impl Clone for BoxedCallable {
    fn clone(&self) -> Self {
        (**self).clone_boxed()
    }
}

impl Debug for dyn Callable {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "Callable({})", self.signature())
    }
}

/// Guards `apply` of the composite callables against a short argument list.
pub(crate) fn ensure_arity(args: &Args, signature: &Signature) -> Result<(), InvokeError> {
    if args.len() == signature.arity() {
        Ok(())
    } else {
        Err(InvokeError::ArityMismatch {
            expected: signature.arity(),
            found: args.len(),
        })
    }
}

/// Method-style access to the transformations and typed invocation.
///
/// Implemented for every [`Callable`], including `dyn Callable`.
///
/// # Examples
///
/// ```rust
/// use callgraft::args;
/// use callgraft::prelude::*;
///
/// let divide = Function::new(|numerator: i32, denominator: i32| numerator / denominator);
/// let ten_over = divide.curry(Value::new(10_i32)).unwrap();
///
/// assert_eq!(ten_over.call::<i32>(args![2_i32]), Ok(5));
/// ```
pub trait CallableExt: Callable {
    /// Invokes and reads the result back as `R`.
    ///
    /// # Errors
    ///
    /// Returns the [`InvokeError`] of [`Callable::invoke`], or
    /// [`InvokeError::ResultMismatch`] if the result is not a plain `R`.
    fn call<R: 'static>(&self, args: Args) -> Result<R, InvokeError> {
        self.invoke(args)?
            .downcast::<R>()
            .map_err(|value| InvokeError::result_mismatch(TypeTag::of::<R>(), value.type_tag()))
    }

    /// Invokes a callable with a fallible result and reads it back as a [`Result`].
    ///
    /// # Errors
    ///
    /// Returns the [`InvokeError`] of [`Callable::invoke`], or
    /// [`InvokeError::ResultMismatch`] if the result is not `Fallible<T, E>`.
    fn call_result<T: 'static, E: 'static>(
        &self,
        args: Args,
    ) -> Result<Result<T, E>, InvokeError> {
        self.invoke(args)?.into_result::<T, E>().map_err(|value| {
            InvokeError::result_mismatch(TypeTag::fallible::<T, E>(), value.type_tag())
        })
    }

    /// See [`curry`].
    ///
    /// # Errors
    ///
    /// See [`curry`].
    fn curry(&self, value: Value) -> Result<Curried, ConstructionError> {
        curry(self, value)
    }

    /// See [`curry_all`].
    ///
    /// # Errors
    ///
    /// See [`curry_all`].
    fn curry_all(&self, values: Args) -> Result<BoxedCallable, ConstructionError> {
        curry_all(self, values)
    }

    /// See [`compose`]. `self` is the outer callable.
    ///
    /// # Errors
    ///
    /// See [`compose`].
    fn compose<C: Callable + ?Sized>(&self, inner: &C) -> Result<Composed, ConstructionError> {
        compose(self, inner)
    }

    /// See [`remove_duplicate_param`].
    ///
    /// # Errors
    ///
    /// See [`remove_duplicate_param`].
    fn remove_duplicate_param<T: 'static>(
        &self,
    ) -> Result<DuplicateEliminating, ConstructionError> {
        remove_duplicate_param::<T, _>(self)
    }

    /// See [`compose_with_shared_param`].
    ///
    /// # Errors
    ///
    /// See [`compose_with_shared_param`].
    fn compose_with_shared_param<C: Callable + ?Sized>(
        &self,
        second: &C,
    ) -> Result<DuplicateEliminating, ConstructionError> {
        compose_with_shared_param(self, second)
    }

    /// Boxes an independent copy.
    fn boxed(&self) -> BoxedCallable {
        self.clone_boxed()
    }
}

impl<C: Callable + ?Sized> CallableExt for C {}
