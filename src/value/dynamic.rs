//! Type-erased, clonable values.

use std::any::Any;
use std::fmt::{self, Debug, Formatter};
use std::ops::ControlFlow;

use super::Shareable;
use crate::signature::TypeTag;

/// Object-safe view of any `Clone + 'static` type.
trait AnyValue: Any + Shareable {
    fn clone_boxed(&self) -> Box<dyn AnyValue>;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any + Clone + Shareable> AnyValue for T {
    fn clone_boxed(&self) -> Box<dyn AnyValue> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Success or failure payload held by a value of a fallible type.
pub type Outcome = Result<Value, Value>;

/// An owned value whose type is known at runtime through its [`TypeTag`].
///
/// Values are what flow through callables: arguments, bound values, and
/// results. Cloning a `Value` clones the underlying data, so two values
/// never share state through this type.
///
/// A value tagged [`TypeTag::Fallible`] holds an [`Outcome`]. The
/// fallible-result operations ([`is_failure`](Self::is_failure),
/// [`unwrap_success`](Self::unwrap_success), [`propagate`](Self::propagate))
/// work on those.
///
/// # Examples
///
/// ```rust
/// use callgraft::value::Value;
///
/// let value = Value::new(42_i32);
/// assert!(value.is::<i32>());
/// assert_eq!(value.downcast_ref::<i32>(), Some(&42));
/// assert_eq!(value.downcast::<i32>().ok(), Some(42));
///
/// let failed = Value::from_result::<i32, String>(Err("boom".to_string()));
/// assert!(failed.is_failure());
/// ```
pub struct Value {
    tag: TypeTag,
    payload: Box<dyn AnyValue>,
}

impl Value {
    /// Wraps a plain value.
    #[must_use]
    pub fn new<T: Clone + Shareable + 'static>(value: T) -> Self {
        Self {
            tag: TypeTag::of::<T>(),
            payload: Box::new(value),
        }
    }

    /// Builds a successful outcome of the fallible type `Fallible<T, E>`.
    #[must_use]
    pub fn success<T: Clone + Shareable + 'static, E: 'static>(value: T) -> Self {
        Self::from_outcome(TypeTag::fallible::<T, E>(), Ok(Self::new(value)))
    }

    /// Builds a failed outcome of the fallible type `Fallible<T, E>`.
    #[must_use]
    pub fn failure<T: 'static, E: Clone + Shareable + 'static>(error: E) -> Self {
        Self::from_outcome(TypeTag::fallible::<T, E>(), Err(Self::new(error)))
    }

    /// Converts a [`Result`] into a value of the fallible type `Fallible<T, E>`.
    #[must_use]
    pub fn from_result<T, E>(result: Result<T, E>) -> Self
    where
        T: Clone + Shareable + 'static,
        E: Clone + Shareable + 'static,
    {
        match result {
            Ok(value) => Self::success::<T, E>(value),
            Err(error) => Self::failure::<T, E>(error),
        }
    }

    pub(crate) fn from_outcome(tag: TypeTag, outcome: Outcome) -> Self {
        debug_assert!(tag.is_fallible());
        Self {
            tag,
            payload: Box::new(outcome),
        }
    }

    /// The runtime type of this value.
    #[must_use]
    pub const fn type_tag(&self) -> TypeTag {
        self.tag
    }

    /// Returns `true` if this is a plain value of type `T`.
    #[must_use]
    pub fn is<T: 'static>(&self) -> bool {
        self.tag == TypeTag::of::<T>()
    }

    /// Borrows the value as `T` if it is a plain `T`.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        if self.is::<T>() {
            self.payload.as_any().downcast_ref::<T>()
        } else {
            None
        }
    }

    /// Takes the value out as `T`, handing `self` back on a type mismatch.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged if this is not a plain `T`.
    ///
    /// # Panics
    ///
    /// Panics if the payload is not a `T` although the tag says it is. The
    /// constructors keep tag and payload in step, so this does not happen.
    pub fn downcast<T: 'static>(self) -> Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }
        let boxed = self
            .payload
            .into_any()
            .downcast::<T>()
            .expect("value payload disagrees with its type tag");
        Ok(*boxed)
    }

    /// Borrows the outcome of a fallible value.
    #[must_use]
    pub fn outcome(&self) -> Option<&Outcome> {
        if self.tag.is_fallible() {
            self.payload.as_any().downcast_ref::<Outcome>()
        } else {
            None
        }
    }

    /// Takes the outcome out of a fallible value, handing `self` back if plain.
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged if the value is not fallible.
    ///
    /// # Panics
    ///
    /// Panics if a value tagged fallible does not hold an [`Outcome`].
    /// Fallible values are only built around outcomes, so this does not
    /// happen.
    pub fn into_outcome(self) -> Result<Outcome, Self> {
        if !self.tag.is_fallible() {
            return Err(self);
        }
        let boxed = self
            .payload
            .into_any()
            .downcast::<Outcome>()
            .expect("fallible value does not hold an outcome");
        Ok(*boxed)
    }

    /// Returns `true` for a fallible value holding a failure.
    ///
    /// Plain values are never failures.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.outcome().is_some_and(Result::is_err)
    }

    /// Returns the success payload, or the value itself if plain.
    ///
    /// # Panics
    ///
    /// Panics if the value holds a failure. Unwrapping a failure is a
    /// programming error, check [`is_failure`](Self::is_failure) or use
    /// [`propagate`](Self::propagate) instead.
    #[must_use]
    pub fn unwrap_success(self) -> Self {
        let tag = self.tag;
        match self.into_outcome() {
            Err(plain) => plain,
            Ok(Ok(success)) => success,
            Ok(Err(failure)) => {
                panic!("called `unwrap_success` on a failed `{tag}`: {failure:?}")
            }
        }
    }

    /// Splits a value for early-exit propagation.
    ///
    /// `Continue` carries the value to keep computing with: the success
    /// payload of a fallible value, or a plain value as is. `Break` carries
    /// the failure payload, to be returned from the enclosing computation
    /// without doing anything else.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::ops::ControlFlow;
    /// use callgraft::value::Value;
    ///
    /// let ok = Value::success::<i32, String>(4);
    /// assert!(matches!(ok.propagate(), ControlFlow::Continue(v) if v.is::<i32>()));
    ///
    /// let failed = Value::failure::<i32, String>("no".to_string());
    /// assert!(matches!(failed.propagate(), ControlFlow::Break(e) if e.is::<String>()));
    /// ```
    #[must_use = "a `Break` carries a failure that should be returned"]
    pub fn propagate(self) -> ControlFlow<Self, Self> {
        match self.into_outcome() {
            Err(plain) => ControlFlow::Continue(plain),
            Ok(Ok(success)) => ControlFlow::Continue(success),
            Ok(Err(failure)) => ControlFlow::Break(failure),
        }
    }

    /// Reads a fallible value back as a [`Result`].
    ///
    /// # Errors
    ///
    /// Returns `self` unchanged if the value is not of type `Fallible<T, E>`.
    pub fn into_result<T: 'static, E: 'static>(self) -> Result<Result<T, E>, Self> {
        if self.tag != TypeTag::fallible::<T, E>() {
            return Err(self);
        }
        let tag = self.tag;
        match self.into_outcome() {
            Ok(Ok(success)) => success
                .downcast::<T>()
                .map(Ok)
                .map_err(|success| Self::from_outcome(tag, Ok(success))),
            Ok(Err(failure)) => failure
                .downcast::<E>()
                .map(Err)
                .map_err(|failure| Self::from_outcome(tag, Err(failure))),
            Err(plain) => Err(plain),
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        Self {
            tag: self.tag,
            payload: (*self.payload).clone_boxed(),
        }
    }
}

impl Debug for Value {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self.outcome() {
            Some(Ok(success)) => write!(formatter, "Success({success:?})"),
            Some(Err(failure)) => write!(formatter, "Failure({failure:?})"),
            None => write!(formatter, "Value(<{}>)", self.tag),
        }
    }
}
