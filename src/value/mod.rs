//! Runtime values and argument lists.
//!
//! Callables exchange [`Value`]s: owned, clonable, type-erased data tagged
//! with a [`TypeTag`](crate::signature::TypeTag). An invocation takes its
//! inputs as an [`Args`] list.

mod args;
mod dynamic;

pub use args::Args;
pub use dynamic::{Outcome, Value};

/// Bound on everything a [`Value`] or a callable may hold.
///
/// With the `arc` feature this is `Send + Sync`, so values and callables
/// can cross threads. Without it every type qualifies.
#[cfg(feature = "arc")]
pub trait Shareable: Send + Sync {}

#[cfg(feature = "arc")]
impl<T: Send + Sync + ?Sized> Shareable for T {}

/// Bound on everything a [`Value`] or a callable may hold.
///
/// With the `arc` feature this is `Send + Sync`, so values and callables
/// can cross threads. Without it every type qualifies.
#[cfg(not(feature = "arc"))]
pub trait Shareable {}

#[cfg(not(feature = "arc"))]
impl<T: ?Sized> Shareable for T {}
