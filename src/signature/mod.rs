//! Parameter-list algebra.
//!
//! Every transformation in this crate decides where a value or a
//! sub-callable goes by looking up a type in an ordered parameter list.
//! This module provides the descriptors and list operations for that:
//!
//! - [`TypeInfo`] / [`TypeTag`]: runtime stand-ins for Rust types
//! - [`ParamList`]: an ordered list of tags with [`ParamList::split`]
//! - [`Signature`]: parameters plus result of a callable
//!
//! # Leftmost match
//!
//! When a type occurs more than once, [`ParamList::split`] only ever
//! considers the first occurrence. There is no way to target a later
//! occurrence directly.

mod param_list;
mod type_tag;

pub use param_list::{ParamList, Signature, Split};
pub use type_tag::{TypeInfo, TypeTag};
