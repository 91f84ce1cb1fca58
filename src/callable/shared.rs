//! Composition of two callables that share a leading context parameter.

use tracing::debug;

use super::compose::compose_owned;
use super::dedup::{DuplicateEliminating, remove_duplicate_owned};
use super::{BoxedCallable, Callable};
use crate::error::ConstructionError;

/// Composes `first` with `second` and merges their leading parameters.
///
/// Both callables must take the same "context" type as their first
/// parameter. `second`'s result goes into `first` as with [`compose`], and
/// the two context parameters are then merged, so that the result computes
/// `first(ctx, .., second(ctx, ..), ..)` from a single `ctx`.
///
/// If the shared parameter is not first on both sides, use [`compose`] and
/// [`remove_duplicate_param`] directly.
///
/// [`compose`]: fn@crate::callable::compose
/// [`remove_duplicate_param`]: fn@crate::callable::remove_duplicate_param
///
/// # Errors
///
/// - [`ConstructionError::SharedParamMismatch`]: either side has no
///   parameters or their first parameters differ.
/// - Any error of [`compose`] or [`remove_duplicate_param`].
///
/// # Examples
///
/// ```rust
/// use callgraft::args;
/// use callgraft::prelude::*;
///
/// #[derive(Clone)]
/// struct Scope { depth: usize }
///
/// let indent = Function::new(|scope: Scope, line: String| {
///     format!("{}{line}", "  ".repeat(scope.depth))
/// });
/// let render = Function::new(|scope: Scope, name: &'static str| {
///     format!("{name}@{}", scope.depth)
/// });
///
/// let rendered = compose_with_shared_param(&indent, &render).unwrap();
///
/// assert_eq!(rendered.signature().arity(), 2);
/// assert_eq!(
///     rendered.call::<String>(args![Scope { depth: 2 }, "node"]),
///     Ok("    node@2".to_string())
/// );
/// ```
pub fn compose_with_shared_param<A, B>(
    first: &A,
    second: &B,
) -> Result<DuplicateEliminating, ConstructionError>
where
    A: Callable + ?Sized,
    B: Callable + ?Sized,
{
    let shared = match (
        first.signature().params().first(),
        second.signature().params().first(),
    ) {
        (Some(left), Some(right)) if left == right => *left,
        (left, right) => {
            return Err(ConstructionError::shared_param_mismatch(left.copied(), right.copied()));
        }
    };

    let composed = compose_owned(first.clone_boxed(), second.clone_boxed())?;
    let merged = remove_duplicate_owned(Box::new(composed) as BoxedCallable, shared)?;
    debug!(shared = %shared, "merged shared context parameter");
    Ok(merged)
}
