//! Ordered argument lists.

use std::ops::Range;

use smallvec::SmallVec;

use super::Value;
use crate::error::InvokeError;
use crate::signature::{ParamList, TypeTag};

/// Arguments held inline before spilling to the heap.
const INLINE_ARGS: usize = 6;

/// The arguments of one invocation, in call order.
///
/// Usually built with the [`args!`](crate::args) macro.
///
/// # Examples
///
/// ```rust
/// use callgraft::args;
///
/// let arguments = args![1_i32, "two".to_string(), 3.0_f64];
/// assert_eq!(arguments.len(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Args {
    values: SmallVec<[Value; INLINE_ARGS]>,
}

impl Args {
    /// Creates an empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Appends an argument.
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    /// Inserts an argument at `index`, shifting later arguments right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: Value) {
        self.values.insert(index, value);
    }

    /// Removes the arguments in `range` and returns them as a new list.
    ///
    /// # Panics
    ///
    /// Panics if `range` is out of bounds.
    #[must_use = "the removed arguments are only available through the returned list"]
    pub fn drain(&mut self, range: Range<usize>) -> Self {
        self.values.drain(range).collect()
    }

    /// Returns the argument at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Iterates over the arguments in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Checks arity and every argument's type against `params`.
    ///
    /// # Errors
    ///
    /// Returns [`InvokeError::ArityMismatch`] or the first
    /// [`InvokeError::TypeMismatch`] found, scanning left to right.
    pub fn check(&self, params: &ParamList) -> Result<(), InvokeError> {
        if self.len() != params.len() {
            return Err(InvokeError::ArityMismatch {
                expected: params.len(),
                found: self.len(),
            });
        }
        self.values
            .iter()
            .zip(params)
            .enumerate()
            .find(|(_, (value, expected))| value.type_tag() != **expected)
            .map_or(Ok(()), |(position, (value, expected))| {
                Err(InvokeError::type_mismatch(position, *expected, value.type_tag()))
            })
    }

    /// Consumes the list into a reader that hands out typed arguments.
    pub(crate) fn reader(self) -> ArgReader {
        let supplied = self.len();
        ArgReader {
            values: self.values.into_iter(),
            position: 0,
            supplied,
        }
    }
}

impl FromIterator<Value> for Args {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        values.into_iter().collect()
    }
}

impl IntoIterator for Args {
    type Item = Value;
    type IntoIter = smallvec::IntoIter<[Value; INLINE_ARGS]>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Args {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Hands out arguments one at a time as concrete types.
pub(crate) struct ArgReader {
    values: smallvec::IntoIter<[Value; INLINE_ARGS]>,
    position: usize,
    supplied: usize,
}

impl ArgReader {
    /// Takes the next argument as `T`.
    pub(crate) fn take<T: 'static>(&mut self) -> Result<T, InvokeError> {
        let position = self.position;
        let value = self.values.next().ok_or(InvokeError::ArityMismatch {
            expected: position + 1,
            found: self.supplied,
        })?;
        self.position += 1;
        value.downcast::<T>().map_err(|value| {
            InvokeError::type_mismatch(position, TypeTag::of::<T>(), value.type_tag())
        })
    }

    /// Fails if arguments are left over.
    pub(crate) fn finish(self) -> Result<(), InvokeError> {
        if self.position == self.supplied {
            Ok(())
        } else {
            Err(InvokeError::ArityMismatch {
                expected: self.position,
                found: self.supplied,
            })
        }
    }
}

/// Builds an [`Args`] list, wrapping each expression with [`Value::new`].
///
/// # Examples
///
/// ```rust
/// use callgraft::args;
///
/// let empty = args![];
/// assert!(empty.is_empty());
///
/// let pair = args![10_i32, 2_i32];
/// assert_eq!(pair.get(0).and_then(|value| value.downcast_ref::<i32>()), Some(&10));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::value::Args::new()
    };
    ($($value:expr),+ $(,)?) => {
        <$crate::value::Args as ::std::iter::FromIterator<$crate::value::Value>>::from_iter([
            $($crate::value::Value::new($value)),+
        ])
    };
}
