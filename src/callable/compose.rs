//! Feeding one callable's result into a parameter slot of another.

use std::ops::ControlFlow;

use tracing::{debug, trace};

use super::{BoxedCallable, Callable, ensure_arity};
use crate::error::{ConstructionError, InvokeError};
use crate::signature::{Signature, TypeTag};
use crate::value::{Args, Value};

/// `outer` with one parameter slot replaced by a call to `inner`.
///
/// The exposed parameters are outer's parameters before the slot, then all
/// of inner's parameters, then outer's parameters after the slot.
///
/// When inner's result is fallible the composition short-circuits: a
/// failure from inner is returned as the composed result and outer is not
/// called.
#[derive(Clone, Debug)]
pub struct Composed {
    outer: BoxedCallable,
    inner: BoxedCallable,
    slot: usize,
    short_circuit: bool,
    signature: Signature,
}

impl Composed {
    /// Position of the replaced slot in outer's parameter list.
    #[must_use]
    pub const fn slot(&self) -> usize {
        self.slot
    }

    /// Returns `true` if an inner failure skips the outer call.
    #[must_use]
    pub const fn short_circuits(&self) -> bool {
        self.short_circuit
    }
}

impl Callable for Composed {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn apply(&self, mut args: Args) -> Result<Value, InvokeError> {
        ensure_arity(&args, &self.signature)?;
        let inner_arity = self.inner.signature().arity();
        let inner_args = args.drain(self.slot..self.slot + inner_arity);
        let produced = self.inner.apply(inner_args)?;

        let produced = if self.short_circuit {
            match produced.propagate() {
                ControlFlow::Continue(success) => success,
                ControlFlow::Break(failure) => {
                    trace!(signature = %self.signature, "inner failed, skipping outer call");
                    return Ok(Value::from_outcome(*self.signature.result(), Err(failure)));
                }
            }
        } else {
            produced
        };

        args.insert(self.slot, produced);
        self.outer.apply(args)
    }

    fn clone_boxed(&self) -> BoxedCallable {
        Box::new(self.clone())
    }
}

/// Decides whether a failure of `inner` can travel through `outer`.
fn short_circuit_for(inner: &TypeTag, outer: &TypeTag) -> Result<bool, ConstructionError> {
    match (inner, outer) {
        (TypeTag::Plain(_), _) => Ok(false),
        (
            TypeTag::Fallible {
                failure: inner_failure,
                ..
            },
            TypeTag::Fallible {
                failure: outer_failure,
                ..
            },
        ) => {
            if inner_failure == outer_failure {
                Ok(true)
            } else {
                Err(ConstructionError::FailureMismatch {
                    inner: *inner_failure,
                    outer: *outer_failure,
                })
            }
        }
        (TypeTag::Fallible { .. }, TypeTag::Plain(_)) => {
            Err(ConstructionError::unhandled_failure(*inner, *outer))
        }
    }
}

pub(crate) fn compose_owned(
    outer: BoxedCallable,
    inner: BoxedCallable,
) -> Result<Composed, ConstructionError> {
    let inner_result = *inner.signature().result();
    let outer_result = *outer.signature().result();

    let split = outer
        .signature()
        .params()
        .split(&TypeTag::Plain(inner_result.payload()))?;
    let short_circuit = short_circuit_for(&inner_result, &outer_result)?;

    let params = outer
        .signature()
        .params()
        .splice(split.index, inner.signature().params());
    let signature = Signature::new(params, outer_result);

    debug!(
        slot = split.index,
        short_circuit,
        signature = %signature,
        "composed callables"
    );

    Ok(Composed {
        outer,
        inner,
        slot: split.index,
        short_circuit,
        signature,
    })
}

/// Builds a callable computing `outer(.., inner(..), ..)`.
///
/// Inner's result goes into outer's leftmost parameter of the same type.
/// If inner's result is fallible, its success type is what is looked up,
/// and outer's result must be fallible with the same failure type; a
/// failure from inner is then returned without calling outer.
///
/// Both inputs are cloned; the originals stay usable.
///
/// # Errors
///
/// - [`ConstructionError::TypeNotFound`]: outer has no parameter of inner's
///   result type.
/// - [`ConstructionError::UnhandledFailure`]: inner can fail but outer's
///   result is not fallible.
/// - [`ConstructionError::FailureMismatch`]: both are fallible with
///   different failure types.
///
/// # Examples
///
/// ```rust
/// use callgraft::args;
/// use callgraft::prelude::*;
///
/// let parse = Function::fallible(|text: String| {
///     text.parse::<i32>().map_err(|error| error.to_string())
/// });
/// let halve = Function::fallible(|value: i32| {
///     if value % 2 == 0 { Ok(value / 2) } else { Err(format!("{value} is odd")) }
/// });
///
/// let parse_then_halve = compose(&halve, &parse).unwrap();
///
/// assert_eq!(parse_then_halve.call_result::<i32, String>(args!["8".to_string()]), Ok(Ok(4)));
/// assert_eq!(
///     parse_then_halve.call_result::<i32, String>(args!["x".to_string()]),
///     Ok(Err("invalid digit found in string".to_string()))
/// );
/// ```
pub fn compose<O, I>(outer: &O, inner: &I) -> Result<Composed, ConstructionError>
where
    O: Callable + ?Sized,
    I: Callable + ?Sized,
{
    compose_owned(outer.clone_boxed(), inner.clone_boxed())
}
