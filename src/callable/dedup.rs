//! Merging two parameters of the same type into one.

use tracing::debug;

use super::{BoxedCallable, Callable, ensure_arity};
use crate::error::{ConstructionError, InvokeError};
use crate::signature::{Signature, TypeTag};
use crate::value::{Args, Value};

/// A callable whose two same-typed parameters are fed from one argument.
///
/// The exposed signature drops the second occurrence. On invocation the
/// argument at the first occurrence is copied into the second.
#[derive(Clone, Debug)]
pub struct DuplicateEliminating {
    inner: BoxedCallable,
    first: usize,
    second: usize,
    signature: Signature,
}

impl DuplicateEliminating {
    /// Positions of the two merged slots in the inner parameter list.
    #[must_use]
    pub const fn slots(&self) -> (usize, usize) {
        (self.first, self.second)
    }
}

impl Callable for DuplicateEliminating {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn apply(&self, mut args: Args) -> Result<Value, InvokeError> {
        ensure_arity(&args, &self.signature)?;
        let shared = args
            .get(self.first)
            .cloned()
            .ok_or_else(|| InvokeError::ArityMismatch {
                expected: self.signature.arity(),
                found: args.len(),
            })?;
        args.insert(self.second, shared);
        self.inner.apply(args)
    }

    fn clone_boxed(&self) -> BoxedCallable {
        Box::new(self.clone())
    }
}

pub(crate) fn remove_duplicate_owned(
    inner: BoxedCallable,
    target: TypeTag,
) -> Result<DuplicateEliminating, ConstructionError> {
    let params = inner.signature().params();
    let not_duplicated = |_| ConstructionError::NotDuplicated {
        target,
        found: params.count(&target),
    };
    let first = params.split(&target).map_err(not_duplicated)?;
    let second = first.after.split(&target).map_err(not_duplicated)?;
    let second_index = first.index + 1 + second.index;

    let signature = Signature::new(params.without(second_index), *inner.signature().result());
    debug!(
        first = first.index,
        second = second_index,
        signature = %signature,
        "merged duplicate parameter"
    );

    Ok(DuplicateEliminating {
        inner,
        first: first.index,
        second: second_index,
        signature,
    })
}

/// Merges the first two parameters of type `T` into one.
///
/// The merged parameter sits where the first occurrence was. Parameters
/// before, between, and after the two occurrences keep their order.
///
/// # Errors
///
/// Returns [`ConstructionError::NotDuplicated`] if `T` occurs fewer than
/// two times.
///
/// # Examples
///
/// ```rust
/// use callgraft::args;
/// use callgraft::prelude::*;
///
/// let between = Function::new(|low: i32, label: char, value: i32| {
///     format!("{label}{}", low + value)
/// });
/// let merged = remove_duplicate_param::<i32, _>(&between).unwrap();
///
/// assert_eq!(merged.signature().params().to_string(), "(i32, char)");
/// assert_eq!(merged.call::<String>(args![4_i32, '#']), Ok("#8".to_string()));
/// ```
pub fn remove_duplicate_param<T, C>(callable: &C) -> Result<DuplicateEliminating, ConstructionError>
where
    T: 'static,
    C: Callable + ?Sized,
{
    remove_duplicate_tag(callable, TypeTag::of::<T>())
}

/// [`remove_duplicate_param`] with the type given as a [`TypeTag`].
///
/// # Errors
///
/// Returns [`ConstructionError::NotDuplicated`] if `target` occurs fewer
/// than two times.
pub fn remove_duplicate_tag<C>(
    callable: &C,
    target: TypeTag,
) -> Result<DuplicateEliminating, ConstructionError>
where
    C: Callable + ?Sized,
{
    remove_duplicate_owned(callable.clone_boxed(), target)
}
