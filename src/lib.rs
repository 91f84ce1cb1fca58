//! # callgraft
//!
//! Type-directed transformations of callables.
//!
//! ## Overview
//!
//! Callables (plain functions, closures, and methods bound to an object)
//! are described by a [`Signature`](signature::Signature): an ordered list
//! of parameter types plus a result type. The transformations in this
//! crate locate parameters by *type* rather than by position:
//!
//! - **Currying**: bind a value to the leftmost parameter of its type
//! - **Composition**: feed one callable's result into the leftmost
//!   parameter of another that takes that type
//! - **Duplicate removal**: merge the first two parameters of one type
//! - **Shared context**: compose two callables that take the same leading
//!   context parameter, so the context is supplied once
//!
//! Results of type `Result<T, E>` are *fallible*. Composing a fallible
//! callable into one that returns the same failure type short-circuits:
//! the outer callable never runs when the inner one fails.
//!
//! Every shape mismatch is reported as a
//! [`ConstructionError`](error::ConstructionError) when the transformation
//! is built, never when it runs.
//!
//! ## Feature Flags
//!
//! - `traverse`: Traversal helpers (map, guarded fold, reduce) (default)
//! - `full`: Enable all features
//! - `arc`: Make values, callables and object handles `Send + Sync`
//!   (not included in `full`)
//!
//! ## Example
//!
//! ```rust
//! use callgraft::args;
//! use callgraft::prelude::*;
//!
//! fn parse(text: &'static str) -> Result<i32, String> {
//!     text.parse().map_err(|_| format!("not a number: {text}"))
//! }
//!
//! fn halve(value: i32) -> Result<i32, String> {
//!     if value % 2 == 0 { Ok(value / 2) } else { Err(format!("odd: {value}")) }
//! }
//!
//! let pipeline = compose(&Function::fallible(halve), &Function::fallible(parse)).unwrap();
//!
//! assert_eq!(pipeline.call_result::<i32, String>(args!["42"]), Ok(Ok(21)));
//! assert_eq!(
//!     pipeline.call_result::<i32, String>(args!["x"]),
//!     Ok(Err("not a number: x".to_string()))
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the callable abstraction, its transformations, and the
/// value and signature types they work with.
///
/// # Usage
///
/// ```rust
/// use callgraft::prelude::*;
/// ```
pub mod prelude {
    pub use crate::callable::*;
    pub use crate::error::*;
    pub use crate::signature::*;
    pub use crate::value::*;
}

pub mod callable;
pub mod error;
pub mod signature;
pub mod value;

#[cfg(feature = "traverse")]
pub mod traverse;
