//! Error types.
//!
//! Two classes of error exist:
//!
//! - [`ConstructionError`]: a transformation was asked to build something
//!   that does not type-check. Raised when the transformation is built,
//!   before anything can be invoked.
//! - [`InvokeError`]: a call was made with arguments that do not match the
//!   declared signature, or a result could not be read back as the requested
//!   type.
//!
//! Failures produced by wrapped functions are neither. They are values of a
//! fallible result type and pass through composition untouched.

use thiserror::Error;

use crate::signature::{ParamList, TypeInfo, TypeTag};

/// A transformation could not be built.
///
/// # Examples
///
/// ```rust
/// use callgraft::error::ConstructionError;
/// use callgraft::prelude::*;
///
/// let square = Function::new(|value: i32| value * value);
/// let error = curry(&square, Value::new("text")).unwrap_err();
///
/// assert!(matches!(error, ConstructionError::TypeNotFound { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    /// The target type does not occur in the parameter list.
    #[error("no parameter of type `{target}` in {params}")]
    TypeNotFound {
        /// Type that was looked for.
        target: TypeTag,
        /// List that was searched.
        params: Box<ParamList>,
    },

    /// Duplicate elimination needs the type at least twice.
    #[error("parameter of type `{target}` occurs {found} time(s), two are required")]
    NotDuplicated {
        /// Type that should be duplicated.
        target: TypeTag,
        /// Number of occurrences found.
        found: usize,
    },

    /// The inner callable can fail but the outer result cannot carry that failure.
    #[error("inner result `{inner}` can fail but outer result `{outer}` cannot carry the failure")]
    UnhandledFailure {
        /// Result tag of the inner callable.
        inner: Box<TypeTag>,
        /// Result tag of the outer callable.
        outer: Box<TypeTag>,
    },

    /// Both sides are fallible but fail with different types.
    #[error("inner fails with `{inner}` but outer fails with `{outer}`")]
    FailureMismatch {
        /// Failure type of the inner callable.
        inner: TypeInfo,
        /// Failure type of the outer callable.
        outer: TypeInfo,
    },

    /// Shared-context composition needs the same leading parameter on both sides.
    #[error("leading parameters differ: `{first:?}` and `{second:?}`")]
    SharedParamMismatch {
        /// Leading parameter of the first callable.
        first: Option<Box<TypeTag>>,
        /// Leading parameter of the second callable.
        second: Option<Box<TypeTag>>,
    },
}

/// A call could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvokeError {
    /// Wrong number of arguments.
    #[error("expected {expected} argument(s), got {found}")]
    ArityMismatch {
        /// Declared arity.
        expected: usize,
        /// Number of arguments supplied.
        found: usize,
    },

    /// An argument has the wrong type.
    #[error("argument {position} should be `{expected}`, got `{found}`")]
    TypeMismatch {
        /// Zero-based argument position.
        position: usize,
        /// Declared type.
        expected: Box<TypeTag>,
        /// Supplied type.
        found: Box<TypeTag>,
    },

    /// The result cannot be read back as the requested type.
    #[error("result is `{found}`, requested `{expected}`")]
    ResultMismatch {
        /// Requested type.
        expected: Box<TypeTag>,
        /// Actual result type.
        found: Box<TypeTag>,
    },

    /// A method target is already borrowed by an enclosing call.
    #[error("target `{target}` is already borrowed")]
    TargetBorrowed {
        /// Type name of the target object.
        target: &'static str,
    },
}

impl ConstructionError {
    /// Builds [`ConstructionError::TypeNotFound`].
    #[must_use]
    pub fn type_not_found(target: TypeTag, params: ParamList) -> Self {
        Self::TypeNotFound {
            target,
            params: Box::new(params),
        }
    }

    /// Builds [`ConstructionError::UnhandledFailure`].
    #[must_use]
    pub fn unhandled_failure(inner: TypeTag, outer: TypeTag) -> Self {
        Self::UnhandledFailure {
            inner: Box::new(inner),
            outer: Box::new(outer),
        }
    }

    /// Builds [`ConstructionError::SharedParamMismatch`].
    #[must_use]
    pub fn shared_param_mismatch(first: Option<TypeTag>, second: Option<TypeTag>) -> Self {
        Self::SharedParamMismatch {
            first: first.map(Box::new),
            second: second.map(Box::new),
        }
    }
}

impl InvokeError {
    /// Builds [`InvokeError::TypeMismatch`].
    #[must_use]
    pub fn type_mismatch(position: usize, expected: TypeTag, found: TypeTag) -> Self {
        Self::TypeMismatch {
            position,
            expected: Box::new(expected),
            found: Box::new(found),
        }
    }

    /// Builds [`InvokeError::ResultMismatch`].
    #[must_use]
    pub fn result_mismatch(expected: TypeTag, found: TypeTag) -> Self {
        Self::ResultMismatch {
            expected: Box::new(expected),
            found: Box::new(found),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn type_not_found_display() {
        let error = ConstructionError::type_not_found(
            TypeTag::of::<bool>(),
            ParamList::from_iter([TypeTag::of::<i32>(), TypeTag::of::<u8>()]),
        );
        assert_eq!(
            error.to_string(),
            "no parameter of type `bool` in (i32, u8)"
        );
    }

    #[rstest]
    fn not_duplicated_display() {
        let error = ConstructionError::NotDuplicated {
            target: TypeTag::of::<u8>(),
            found: 1,
        };
        assert_eq!(
            error.to_string(),
            "parameter of type `u8` occurs 1 time(s), two are required"
        );
    }

    #[rstest]
    fn arity_mismatch_display() {
        let error = InvokeError::ArityMismatch {
            expected: 2,
            found: 3,
        };
        assert_eq!(error.to_string(), "expected 2 argument(s), got 3");
    }

    #[rstest]
    fn type_mismatch_display() {
        let error = InvokeError::type_mismatch(0, TypeTag::of::<i32>(), TypeTag::of::<u8>());
        assert_eq!(error.to_string(), "argument 0 should be `i32`, got `u8`");
    }

    #[rstest]
    fn shared_param_mismatch_display() {
        let error = ConstructionError::shared_param_mismatch(Some(TypeTag::of::<u8>()), None);
        assert_eq!(
            error.to_string(),
            "leading parameters differ: `Some(u8)` and `None`"
        );
    }

    #[rstest]
    fn errors_stay_small_enough_to_return_by_value() {
        assert!(std::mem::size_of::<InvokeError>() <= 32);
        assert!(std::mem::size_of::<ConstructionError>() < 128);
    }
}
