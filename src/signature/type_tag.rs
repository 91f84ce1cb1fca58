//! Runtime type descriptors for parameters and results.
//!
//! A [`TypeTag`] stands in for a Rust type when a callable is described
//! dynamically. Two tags are equal when they describe the same type, no
//! matter how the name was spelled when the tag was built.

use std::any::{TypeId, type_name};
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

/// Identity and display name of a single Rust type.
///
/// Equality and hashing use the [`TypeId`] only.
///
/// # Examples
///
/// ```rust
/// use callgraft::signature::TypeInfo;
///
/// assert_eq!(TypeInfo::of::<i32>(), TypeInfo::of::<i32>());
/// assert_ne!(TypeInfo::of::<i32>(), TypeInfo::of::<i64>());
/// assert_eq!(TypeInfo::of::<i32>().name(), "i32");
/// ```
#[derive(Clone, Copy)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
}

impl TypeInfo {
    /// Describes the type `T`.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Returns the [`TypeId`] of the described type.
    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the fully qualified name of the described type.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Debug for TypeInfo {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name)
    }
}

impl Display for TypeInfo {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name)
    }
}

/// Descriptor of a parameter or result type.
///
/// `Fallible` marks a result that is either a success carrying `success` or a
/// failure carrying `failure`. Composition treats it specially: the success
/// payload is what gets spliced into the outer callable, and a failure skips
/// the outer callable entirely.
///
/// # Examples
///
/// ```rust
/// use callgraft::signature::{TypeInfo, TypeTag};
///
/// let plain = TypeTag::of::<u8>();
/// assert!(!plain.is_fallible());
///
/// let fallible = TypeTag::fallible::<u8, String>();
/// assert!(fallible.is_fallible());
/// assert_eq!(fallible.payload(), TypeInfo::of::<u8>());
/// assert_eq!(fallible.to_string(), "Fallible<u8, alloc::string::String>");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// An ordinary value of one type.
    Plain(TypeInfo),
    /// A success-or-failure outcome.
    Fallible {
        /// Type carried on success.
        success: TypeInfo,
        /// Type carried on failure.
        failure: TypeInfo,
    },
}

impl TypeTag {
    /// Tag for the plain type `T`.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self::Plain(TypeInfo::of::<T>())
    }

    /// Tag for an outcome that succeeds with `T` or fails with `E`.
    #[must_use]
    pub fn fallible<T: 'static, E: 'static>() -> Self {
        Self::Fallible {
            success: TypeInfo::of::<T>(),
            failure: TypeInfo::of::<E>(),
        }
    }

    /// Returns `true` for a `Fallible` tag.
    #[must_use]
    pub const fn is_fallible(&self) -> bool {
        matches!(self, Self::Fallible { .. })
    }

    /// The type a value of this tag hands on when it is spliced into a
    /// parameter slot: the type itself, or the success type if fallible.
    #[must_use]
    pub const fn payload(&self) -> TypeInfo {
        match self {
            Self::Plain(info) => *info,
            Self::Fallible { success, .. } => *success,
        }
    }

    /// The failure type, if fallible.
    #[must_use]
    pub const fn failure(&self) -> Option<TypeInfo> {
        match self {
            Self::Plain(_) => None,
            Self::Fallible { failure, .. } => Some(*failure),
        }
    }
}

impl Debug for TypeTag {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, formatter)
    }
}

impl Display for TypeTag {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(info) => write!(formatter, "{info}"),
            Self::Fallible { success, failure } => {
                write!(formatter, "Fallible<{success}, {failure}>")
            }
        }
    }
}

impl From<TypeInfo> for TypeTag {
    fn from(info: TypeInfo) -> Self {
        Self::Plain(info)
    }
}
