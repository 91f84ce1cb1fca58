//! Traversal helpers over sequences.
//!
//! These helpers only need the [`Callable`](crate::callable::Callable)
//! capability: they invoke a callable per item and read its result back.
//!
//! - [`map`]: one result per item
//! - [`apply`]: AND of boolean results, with optional early exit
//! - [`reduce`] / [`reduce_default`]: left fold
//! - [`sum`], [`max`], [`min`]: ready-made reducers
//!
//! # Examples
//!
//! ```rust
//! use callgraft::traverse::{max, reduce, sum};
//!
//! assert_eq!(reduce(vec![1, 2, 3, 4], &sum::<i32, i32>(), 0), Ok(10));
//! assert_eq!(reduce(Vec::<i32>::new(), &max::<i32>(), 5), Ok(5));
//! ```

mod fold;
mod reductions;

pub use fold::{apply, map, reduce, reduce_default};
pub use reductions::{max, min, sum};
