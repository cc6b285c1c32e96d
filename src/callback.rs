//! This module defines the completion callback injected into callback-style
//! functions, i.e. functions that report completion by invoking their last
//! argument as `callback(error, results...)`.

use crate::pending::shared::Notifier;

/// Results passed to a completion callback. Only the first result becomes the
/// value an invocation resolves with, and any further result is dropped. This
/// is a known limitation: callers needing more than one value must aggregate
/// them into a single value before calling back.
///
/// Implemented for tuples of up to eight elements. The empty tuple resolves
/// with `()`.
pub trait Results<T> {
    /// Extracts the first result, dropping the rest.
    fn into_first(self) -> T;
}

impl Results<()> for () {
    fn into_first(self) {}
}

macro_rules! results_tuple {
    ($first:ident $(, $rest:ident)*) => {
        impl<$first $(, $rest)*> Results<$first> for ($first, $($rest,)*) {
            #[allow(non_snake_case, unused_variables)]
            fn into_first(self) -> $first {
                let ($first, $($rest,)*) = self;
                $first
            }
        }
    };
}

results_tuple!(A);
results_tuple!(A, B);
results_tuple!(A, B, C);
results_tuple!(A, B, C, D);
results_tuple!(A, B, C, D, F);
results_tuple!(A, B, C, D, F, G);
results_tuple!(A, B, C, D, F, G, H);
results_tuple!(A, B, C, D, F, G, H, I);

/// The completion callback handed to a wrapped function as its last argument.
///
/// The callback can be cloned and invoked any number of times, but an
/// invocation is settled only once: the first call through any clone decides
/// the outcome, and the remaining calls are ignored and return `false`.
///
/// Dropping every clone without calling any of them leaves the invocation
/// pending forever.
#[derive(Debug)]
pub struct Callback<T, E> {
    notifier: Notifier<T, E>,
}

impl<T, E> Callback<T, E> {
    pub(crate) fn new(notifier: Notifier<T, E>) -> Self {
        Self { notifier }
    }

    /// Invokes the callback with the conventional `(error, results...)` shape.
    /// With `Some(error)`, the invocation is rejected with `error` and the
    /// results are dropped. With `None`, the invocation is resolved with the
    /// first of `results`. Returns whether this call settled the invocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use waitforme::{adapt, Callback};
    ///
    /// # fn main() {
    /// type Check = Callback<bool, &'static str>;
    ///
    /// let check = adapt(|_, (n,): (i32,), callback: Check| {
    ///     let error = if n > 0 { Some("positive") } else { None };
    ///     callback.call(error, (n == 0, "dropped"));
    /// });
    ///
    /// assert_eq!(futures::executor::block_on(check.call((0,))), Ok(true));
    /// assert_eq!(futures::executor::block_on(check.call((2,))), Err("positive"));
    /// # }
    /// ```
    pub fn call<R>(&self, error: Option<E>, results: R) -> bool
    where
        R: Results<T>,
    {
        match error {
            Some(error) => self.reject(error),
            None => self.resolve(results.into_first()),
        }
    }

    /// Resolves the invocation with a value. Returns whether this call settled
    /// the invocation.
    pub fn resolve(&self, value: T) -> bool {
        self.settle(Ok(value))
    }

    /// Rejects the invocation with an error. Returns whether this call settled
    /// the invocation.
    pub fn reject(&self, error: E) -> bool {
        self.settle(Err(error))
    }

    /// Settles the invocation with a result. Returns whether this call settled
    /// the invocation.
    pub fn settle(&self, result: Result<T, E>) -> bool {
        self.notifier.settle(result)
    }

    /// Tests whether the invocation was already settled.
    pub fn is_settled(&self) -> bool {
        self.notifier.is_settled()
    }
}

impl<T, E> Clone for Callback<T, E> {
    fn clone(&self) -> Self {
        Self { notifier: self.notifier.clone() }
    }
}
