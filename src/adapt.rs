//! This module implements conversion of callback-style functions into
//! functions returning futures.
//!
//! A callback-style function receives a context, its arguments and, last, a
//! completion [`Callback`]. Rust has no implicit receiver, so the context is an
//! explicit first parameter, and the arguments are gathered into a single
//! value, usually a tuple.

use crate::{
    callback::Callback,
    pending::{shared, Pending},
};

macro_rules! invoke {
    ($function:expr, $context:expr, $args:expr) => {{
        let (notifier, listener) = shared::channel();
        let ret = ($function)($context, $args, Callback::new(notifier));
        (ret, Pending::new(listener))
    }};
}

/// Adapts a callback-style function which does not need a context. The
/// function receives `&()` as its context.
///
/// # Examples
///
/// ```
/// use std::{fs, io, path::PathBuf};
/// use waitforme::{adapt, Callback};
///
/// # fn main() {
/// let read = adapt(|_, (path,): (PathBuf,), callback: Callback<_, io::Error>| {
///     callback.settle(fs::read(path));
/// });
///
/// let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
/// let content: Vec<u8> = futures::executor::block_on(read.call((manifest,)))
///     .unwrap();
/// assert!(!content.is_empty());
/// # }
/// ```
pub fn adapt<F, A, T, E, R>(function: F) -> Adapted<F, ()>
where
    F: Fn(&(), A, Callback<T, E>) -> R,
{
    Adapted::new_ref(function, ())
}

/// Adapts a callback-style function, binding a context which the function
/// observes by reference in every invocation.
///
/// # Examples
///
/// ```
/// use waitforme::{adapt_with, Callback};
///
/// struct Counter {
///     value: u32,
/// }
///
/// # fn main() {
/// let get = adapt_with(
///     |this: &Counter, (): (), callback: Callback<u32, ()>| {
///         callback.resolve(this.value);
///     },
///     Counter { value: 7 },
/// );
///
/// assert_eq!(futures::executor::block_on(get.call(())), Ok(7));
/// # }
/// ```
pub fn adapt_with<F, C, A, T, E, R>(function: F, context: C) -> Adapted<F, C>
where
    F: Fn(&C, A, Callback<T, E>) -> R,
{
    Adapted::new_ref(function, context)
}

/// A callback-style function bound to its context. Calling it invokes the
/// wrapped function right away, with an injected completion callback, and
/// returns a [`Pending`] future for the outcome reported through the callback.
///
/// A panic raised by the wrapped function is not caught: it unwinds out of the
/// call, and it never becomes an error of the returned future.
#[derive(Debug, Clone, Copy)]
pub struct Adapted<F, C> {
    function: F,
    context: C,
}

impl<F, C> Adapted<F, C> {
    /// Creates an adapted function from a wrapped function that can be called
    /// only once.
    pub fn new<A, T, E, R>(function: F, context: C) -> Self
    where
        F: FnOnce(&C, A, Callback<T, E>) -> R,
    {
        Self { function, context }
    }

    /// Creates an adapted function from a wrapped function that can be called
    /// multiple times, requiring mutability, however.
    pub fn new_mut<A, T, E, R>(function: F, context: C) -> Self
    where
        F: FnMut(&C, A, Callback<T, E>) -> R,
    {
        Self { function, context }
    }

    /// Creates an adapted function from a wrapped function that can be called
    /// multiple times and immutably.
    pub fn new_ref<A, T, E, R>(function: F, context: C) -> Self
    where
        F: Fn(&C, A, Callback<T, E>) -> R,
    {
        Self { function, context }
    }

    /// The context bound to the wrapped function.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Separates the wrapped function from its context.
    pub fn into_parts(self) -> (F, C) {
        (self.function, self.context)
    }

    /// Invokes the wrapped function and returns a future for its outcome.
    ///
    /// This method consumes the adapted function.
    pub fn call_once<A, T, E, R>(self, args: A) -> Pending<T, E>
    where
        F: FnOnce(&C, A, Callback<T, E>) -> R,
    {
        let (_, pending) = self.call_once_returning(args);
        pending
    }

    /// Invokes the wrapped function and returns a future for its outcome.
    ///
    /// This method does not consume the adapted function, requiring
    /// mutability, however.
    pub fn call_mut<A, T, E, R>(&mut self, args: A) -> Pending<T, E>
    where
        F: FnMut(&C, A, Callback<T, E>) -> R,
    {
        let (_, pending) = self.call_mut_returning(args);
        pending
    }

    /// Invokes the wrapped function and returns a future for its outcome.
    ///
    /// This method does not consume the adapted function and does not require
    /// mutability.
    pub fn call<A, T, E, R>(&self, args: A) -> Pending<T, E>
    where
        F: Fn(&C, A, Callback<T, E>) -> R,
    {
        let (_, pending) = self.call_returning(args);
        pending
    }

    /// Invokes the wrapped function and returns both the value it returned
    /// and a future for the outcome reported through the callback. Wrapped
    /// functions can use the return value to report synchronous failures.
    ///
    /// This method consumes the adapted function.
    pub fn call_once_returning<A, T, E, R>(self, args: A) -> (R, Pending<T, E>)
    where
        F: FnOnce(&C, A, Callback<T, E>) -> R,
    {
        let Self { function, context } = self;
        invoke!(function, &context, args)
    }

    /// Invokes the wrapped function and returns both the value it returned
    /// and a future for the outcome reported through the callback.
    ///
    /// This method does not consume the adapted function, requiring
    /// mutability, however.
    pub fn call_mut_returning<A, T, E, R>(
        &mut self,
        args: A,
    ) -> (R, Pending<T, E>)
    where
        F: FnMut(&C, A, Callback<T, E>) -> R,
    {
        invoke!(self.function, &self.context, args)
    }

    /// Invokes the wrapped function and returns both the value it returned
    /// and a future for the outcome reported through the callback.
    ///
    /// This method does not consume the adapted function and does not require
    /// mutability.
    ///
    /// # Examples
    ///
    /// ```
    /// use waitforme::{adapt, Callback};
    ///
    /// # fn main() {
    /// let parse = adapt(
    ///     |_, (text,): (String,), callback: Callback<u8, String>| {
    ///         let number = text.parse::<u8>().map_err(|error| error.to_string())?;
    ///         callback.resolve(number);
    ///         Ok::<(), String>(())
    ///     },
    /// );
    ///
    /// let (ret, pending) = parse.call_returning((String::from("12"),));
    /// assert_eq!(ret, Ok(()));
    /// assert_eq!(futures::executor::block_on(pending), Ok(12));
    ///
    /// let (ret, pending) = parse.call_returning((String::from("x"),));
    /// assert!(ret.is_err());
    /// assert!(!pending.is_settled());
    /// # }
    /// ```
    pub fn call_returning<A, T, E, R>(&self, args: A) -> (R, Pending<T, E>)
    where
        F: Fn(&C, A, Callback<T, E>) -> R,
    {
        invoke!(self.function, &self.context, args)
    }
}
