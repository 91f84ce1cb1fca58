//! Adapter for plain functions and closures.

use std::fmt::{self, Debug, Formatter};

use super::{BoxedCallable, Callable, ensure_arity};
use crate::error::InvokeError;
use crate::signature::{ParamList, Signature, TypeTag};
use crate::value::{Args, Shareable, Value};

/// Type-erased body of a native adapter.
pub(crate) trait Body: Shareable {
    fn run(&self, args: Args) -> Result<Value, InvokeError>;
    fn clone_body(&self) -> Box<dyn Body>;
}

impl<G> Body for G
where
    G: Fn(Args) -> Result<Value, InvokeError> + Clone + Shareable + 'static,
{
    fn run(&self, args: Args) -> Result<Value, InvokeError> {
        self(args)
    }

    fn clone_body(&self) -> Box<dyn Body> {
        Box::new(self.clone())
    }
}

/// A plain function or closure wrapped as a [`Callable`].
///
/// Arguments are forwarded verbatim. Cloning copies the wrapped function,
/// so closures must be [`Clone`].
///
/// # Examples
///
/// ```rust
/// use callgraft::args;
/// use callgraft::prelude::*;
///
/// fn divide(numerator: i32, denominator: i32) -> i32 {
///     numerator / denominator
/// }
///
/// let divide = Function::new(divide);
/// assert_eq!(divide.signature().to_string(), "(i32, i32) -> i32");
/// assert_eq!(divide.call::<i32>(args![10_i32, 2_i32]), Ok(5));
/// ```
///
/// A function returning [`Result`] is wrapped with [`Function::fallible`],
/// which marks its result as fallible for composition:
///
/// ```rust
/// use callgraft::args;
/// use callgraft::prelude::*;
///
/// let parse = Function::fallible(|text: String| {
///     text.parse::<i32>().map_err(|error| error.to_string())
/// });
///
/// assert_eq!(parse.call_result::<i32, String>(args!["12".to_string()]), Ok(Ok(12)));
/// assert!(parse.invoke(args!["x".to_string()]).unwrap().is_failure());
/// ```
pub struct Function {
    signature: Signature,
    body: Box<dyn Body>,
}

impl Function {
    /// Wraps a function returning a plain value.
    #[must_use]
    pub fn new<F, Marker>(function: F) -> Self
    where
        F: NativeFn<Marker>,
    {
        function.into_function()
    }

    /// Wraps a function returning `Result<T, E>`; the result tag is
    /// `Fallible<T, E>`.
    #[must_use]
    pub fn fallible<F, Marker>(function: F) -> Self
    where
        F: FallibleFn<Marker>,
    {
        function.into_function()
    }

    pub(crate) fn from_body(signature: Signature, body: impl Body + 'static) -> Self {
        Self {
            signature,
            body: Box::new(body),
        }
    }
}

impl Clone for Function {
    fn clone(&self) -> Self {
        Self {
            signature: self.signature.clone(),
            body: self.body.clone_body(),
        }
    }
}

impl Debug for Function {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "Function({})", self.signature)
    }
}

impl Callable for Function {
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

/// Functions of up to six arguments that [`Function::new`] accepts.
///
/// `Marker` is the function-pointer shape, e.g. `fn(i32, i32) -> i32`; it is
/// inferred.
pub trait NativeFn<Marker>: Clone + Shareable + 'static {
    /// Builds the adapter.
    fn into_function(self) -> Function;
}

/// Functions of up to six arguments returning [`Result`] that
/// [`Function::fallible`] accepts.
pub trait FallibleFn<Marker>: Clone + Shareable + 'static {
    /// Builds the adapter.
    fn into_function(self) -> Function;
}

macro_rules! native_fn_impls {
    ($($arg:ident),*) => {
        paste::paste! {
            impl<F, R, $($arg,)*> NativeFn<fn($($arg,)*) -> R> for F
            where
                F: Fn($($arg),*) -> R + Clone + Shareable + 'static,
                R: Clone + Shareable + 'static,
                $($arg: 'static,)*
            {
                fn into_function(self) -> Function {
                    let params = ParamList::from_iter([$(TypeTag::of::<$arg>()),*]);
                    let signature = Signature::new(params, TypeTag::of::<R>());
                    let function = self;
                    Function::from_body(signature, move |args: Args| -> Result<Value, InvokeError> {
                        #[allow(unused_mut)]
                        let mut reader = args.reader();
                        $(let [<$arg:lower>] = reader.take::<$arg>()?;)*
                        reader.finish()?;
                        Ok(Value::new(function($([<$arg:lower>]),*)))
                    })
                }
            }

            impl<F, T, E, $($arg,)*> FallibleFn<fn($($arg,)*) -> Result<T, E>> for F
            where
                F: Fn($($arg),*) -> Result<T, E> + Clone + Shareable + 'static,
                T: Clone + Shareable + 'static,
                E: Clone + Shareable + 'static,
                $($arg: 'static,)*
            {
                fn into_function(self) -> Function {
                    let params = ParamList::from_iter([$(TypeTag::of::<$arg>()),*]);
                    let signature = Signature::new(params, TypeTag::fallible::<T, E>());
                    let function = self;
                    Function::from_body(signature, move |args: Args| -> Result<Value, InvokeError> {
                        #[allow(unused_mut)]
                        let mut reader = args.reader();
                        $(let [<$arg:lower>] = reader.take::<$arg>()?;)*
                        reader.finish()?;
                        Ok(Value::from_result(function($([<$arg:lower>]),*)))
                    })
                }
            }
        }
    };
}

native_fn_impls!();
native_fn_impls!(A0);
native_fn_impls!(A0, A1);
native_fn_impls!(A0, A1, A2);
native_fn_impls!(A0, A1, A2, A3);
native_fn_impls!(A0, A1, A2, A3, A4);
native_fn_impls!(A0, A1, A2, A3, A4, A5);
