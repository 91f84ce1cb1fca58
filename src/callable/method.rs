//! Adapter for methods called on an externally owned object.

use std::any::type_name;
use std::fmt::{self, Debug, Formatter};

#[cfg(feature = "arc")]
use parking_lot::{RwLock as Lock, RwLockReadGuard, RwLockWriteGuard};
#[cfg(not(feature = "arc"))]
use std::cell::{Ref, RefCell as Lock, RefMut};
#[cfg(not(feature = "arc"))]
use std::rc::Rc as ReferenceCounter;
#[cfg(feature = "arc")]
use std::sync::Arc as ReferenceCounter;

use super::curry::Curried;
use super::native::Body;
use super::{BoxedCallable, Callable, ensure_arity};
use crate::error::InvokeError;
use crate::signature::{ParamList, Signature, TypeTag};
use crate::value::{Args, Shareable, Value};

/// Handle to an object that method adapters call into.
///
/// The object is owned outside the callable graph. Cloning the handle
/// aliases the same object; the object itself is never cloned. Keep the
/// handle alive for as long as callables that refer to it are in use.
///
/// With the `arc` feature the object sits behind an `Arc` and a
/// `parking_lot::RwLock`, so the handle is `Send + Sync` when `T` is.
///
/// # Examples
///
/// ```rust
/// use callgraft::callable::ObjectRef;
///
/// let counter = ObjectRef::new(0_u32);
/// let alias = counter.clone();
///
/// *alias.borrow_mut() += 1;
/// assert_eq!(*counter.borrow(), 1);
/// assert!(counter.ptr_eq(&alias));
/// ```
pub struct ObjectRef<T> {
    object: ReferenceCounter<Lock<T>>,
}

impl<T> ObjectRef<T> {
    /// Wraps `object` in a new handle.
    #[must_use]
    pub fn new(object: T) -> Self {
        Self {
            object: ReferenceCounter::new(Lock::new(object)),
        }
    }

    /// Returns `true` if both handles refer to the same object.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.object, &other.object)
    }

    /// Takes the object back if this is the last handle.
    ///
    /// # Errors
    ///
    /// Returns the handle unchanged while other handles exist.
    pub fn into_inner(self) -> Result<T, Self> {
        ReferenceCounter::try_unwrap(self.object)
            .map(Lock::into_inner)
            .map_err(|object| Self { object })
    }

    fn busy() -> InvokeError {
        InvokeError::TargetBorrowed {
            target: type_name::<T>(),
        }
    }
}

#[cfg(not(feature = "arc"))]
impl<T> ObjectRef<T> {
    /// Borrows the object.
    ///
    /// # Panics
    ///
    /// Panics if the object is mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, T> {
        self.object.borrow()
    }

    /// Mutably borrows the object.
    ///
    /// # Panics
    ///
    /// Panics if the object is already borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.object.borrow_mut()
    }

    fn lock(&self) -> Result<RefMut<'_, T>, InvokeError> {
        self.object.try_borrow_mut().map_err(|_| Self::busy())
    }
}

#[cfg(feature = "arc")]
impl<T> ObjectRef<T> {
    /// Borrows the object, blocking while it is mutably borrowed.
    pub fn borrow(&self) -> RwLockReadGuard<'_, T> {
        self.object.read()
    }

    /// Mutably borrows the object, blocking while it is borrowed.
    pub fn borrow_mut(&self) -> RwLockWriteGuard<'_, T> {
        self.object.write()
    }

    fn lock(&self) -> Result<RwLockWriteGuard<'_, T>, InvokeError> {
        self.object.try_write().ok_or_else(Self::busy)
    }
}

impl<T> Clone for ObjectRef<T> {
    fn clone(&self) -> Self {
        Self {
            object: ReferenceCounter::clone(&self.object),
        }
    }
}

impl<T> Debug for ObjectRef<T> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "ObjectRef<{}>", type_name::<T>())
    }
}

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(ObjectRef<u8>: Send, Sync);

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(ObjectRef<u8>: Send, Sync);

/// A method wrapped as a [`Callable`].
///
/// The first parameter is always the [`ObjectRef`] of the target; the
/// method's own parameters follow. Use [`bind_method`] to fix the target.
///
/// # Examples
///
/// ```rust
/// use callgraft::args;
/// use callgraft::prelude::*;
///
/// struct Account { balance: i64 }
///
/// impl Account {
///     fn deposit(&mut self, amount: i64) -> i64 {
///         self.balance += amount;
///         self.balance
///     }
/// }
///
/// let account = ObjectRef::new(Account { balance: 10 });
/// let deposit = Method::new(Account::deposit);
///
/// assert_eq!(deposit.call::<i64>(args![account.clone(), 5_i64]), Ok(15));
/// assert_eq!(account.borrow().balance, 15);
/// ```
pub struct Method {
    signature: Signature,
    body: Box<dyn Body>,
}

impl Method {
    /// Wraps a method returning a plain value.
    #[must_use]
    pub fn new<T, F, Marker>(method: F) -> Self
    where
        F: NativeMethod<T, Marker>,
    {
        method.into_method()
    }

    /// Wraps a method returning `Result<R, E>`; the result tag is
    /// `Fallible<R, E>`.
    #[must_use]
    pub fn fallible<T, F, Marker>(method: F) -> Self
    where
        F: FallibleMethod<T, Marker>,
    {
        method.into_method()
    }

    fn from_body(signature: Signature, body: impl Body + 'static) -> Self {
        Self {
            signature,
            body: Box::new(body),
        }
    }
}

impl Clone for Method {
    fn clone(&self) -> Self {
        Self {
            signature: self.signature.clone(),
            body: self.body.clone_body(),
        }
    }
}

impl Debug for Method {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "Method({})", self.signature)
    }
}

impl Callable for Method {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn apply(&self, args: Args) -> Result<Value, InvokeError> {
        ensure_arity(&args, &self.signature)?;
        self.body.run(args)
    }

    fn clone_boxed(&self) -> BoxedCallable {
        Box::new(self.clone())
    }
}

/// Methods on `T` with up to five arguments that [`Method::new`] accepts.
pub trait NativeMethod<T, Marker>: Clone + Shareable + 'static {
    /// Builds the adapter.
    fn into_method(self) -> Method;
}

/// Methods on `T` with up to five arguments returning [`Result`] that
/// [`Method::fallible`] accepts.
pub trait FallibleMethod<T, Marker>: Clone + Shareable + 'static {
    /// Builds the adapter.
    fn into_method(self) -> Method;
}

macro_rules! native_method_impls {
    ($($arg:ident),*) => {
        paste::paste! {
            impl<T, F, R, $($arg,)*> NativeMethod<T, fn(&mut T, $($arg,)*) -> R> for F
            where
                T: 'static,
                F: Fn(&mut T, $($arg),*) -> R + Clone + Shareable + 'static,
                R: Clone + Shareable + 'static,
                $($arg: 'static,)*
            {
                fn into_method(self) -> Method {
                    let params = ParamList::from_iter([
                        TypeTag::of::<ObjectRef<T>>(),
                        $(TypeTag::of::<$arg>()),*
                    ]);
                    let signature = Signature::new(params, TypeTag::of::<R>());
                    let method = self;
                    Method::from_body(signature, move |args: Args| -> Result<Value, InvokeError> {
                        let mut reader = args.reader();
                        let target = reader.take::<ObjectRef<T>>()?;
                        $(let [<$arg:lower>] = reader.take::<$arg>()?;)*
                        reader.finish()?;
                        let mut object = target.lock()?;
                        Ok(Value::new(method(&mut *object, $([<$arg:lower>]),*)))
                    })
                }
            }

            impl<T, F, R, E, $($arg,)*> FallibleMethod<T, fn(&mut T, $($arg,)*) -> Result<R, E>>
                for F
            where
                T: 'static,
                F: Fn(&mut T, $($arg),*) -> Result<R, E> + Clone + Shareable + 'static,
                R: Clone + Shareable + 'static,
                E: Clone + Shareable + 'static,
                $($arg: 'static,)*
            {
                fn into_method(self) -> Method {
                    let params = ParamList::from_iter([
                        TypeTag::of::<ObjectRef<T>>(),
                        $(TypeTag::of::<$arg>()),*
                    ]);
                    let signature = Signature::new(params, TypeTag::fallible::<R, E>());
                    let method = self;
                    Method::from_body(signature, move |args: Args| -> Result<Value, InvokeError> {
                        let mut reader = args.reader();
                        let target = reader.take::<ObjectRef<T>>()?;
                        $(let [<$arg:lower>] = reader.take::<$arg>()?;)*
                        reader.finish()?;
                        let mut object = target.lock()?;
                        Ok(Value::from_result(method(&mut *object, $([<$arg:lower>]),*)))
                    })
                }
            }
        }
    };
}

native_method_impls!();
native_method_impls!(A0);
native_method_impls!(A0, A1);
native_method_impls!(A0, A1, A2);
native_method_impls!(A0, A1, A2, A3);
native_method_impls!(A0, A1, A2, A3, A4);

/// Wraps `method` and fixes its target to `target`.
///
/// The result takes only the method's own parameters. It refers to the
/// object through a clone of `target`, so calls see and make changes to
/// the same object.
///
/// # Examples
///
/// ```rust
/// use callgraft::args;
/// use callgraft::prelude::*;
///
/// #[derive(Default)]
/// struct Log { lines: Vec<String> }
///
/// impl Log {
///     fn write(&mut self, line: String) -> usize {
///         self.lines.push(line);
///         self.lines.len()
///     }
/// }
///
/// let log = ObjectRef::new(Log::default());
/// let write = bind_method(Log::write, &log);
///
/// assert_eq!(write.signature().arity(), 1);
/// assert_eq!(write.call::<usize>(args!["first".to_string()]), Ok(1));
/// assert_eq!(write.call::<usize>(args!["second".to_string()]), Ok(2));
/// assert_eq!(log.borrow().lines, vec!["first", "second"]);
/// ```
#[must_use]
pub fn bind_method<T, F, Marker>(method: F, target: &ObjectRef<T>) -> Curried
where
    T: Shareable + 'static,
    F: NativeMethod<T, Marker>,
{
    Curried::bind(Box::new(Method::new(method)), 0, Value::new(target.clone()))
}
