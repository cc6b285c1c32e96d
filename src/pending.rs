//! This module defines the future returned by adapted functions, which
//! completes once the injected completion callback settles it.

pub(crate) mod shared;

use std::{error::Error as StdError, fmt, future::Future, pin::Pin, task};

/// Settlement state of a pending invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// The completion callback has not fired yet.
    Pending,
    /// The completion callback fired without an error.
    Resolved,
    /// The completion callback fired with an error.
    Rejected,
}

impl State {
    /// Tests whether this is a terminal state.
    pub fn is_settled(self) -> bool {
        self != State::Pending
    }
}

/// Error yielded by [`Guarded`] when every handle to the completion callback
/// was dropped before any of them settled the invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Abandoned;

impl fmt::Display for Abandoned {
    fn fmt(&self, fmtr: &mut fmt::Formatter) -> fmt::Result {
        write!(fmtr, "completion callback dropped without being invoked")
    }
}

impl StdError for Abandoned {}

/// A handle to a single invocation of an adapted function. When awaited, it
/// completes with `Ok` if the completion callback got no error, and with `Err`
/// otherwise.
///
/// If the wrapped function never invokes the callback, this future never
/// completes. See [`Pending::or_abandoned`] to detect the case where the
/// callback can no longer be invoked at all.
#[derive(Debug)]
pub struct Pending<T, E> {
    listener: shared::Listener<T, E>,
    terminated: bool,
}

impl<T, E> Pending<T, E> {
    pub(crate) fn new(listener: shared::Listener<T, E>) -> Self {
        Self { listener, terminated: false }
    }

    /// Current settlement state. A settled state is final, even after the
    /// output has been taken by awaiting this future.
    pub fn state(&self) -> State {
        self.listener.state()
    }

    /// Tests whether the completion callback already settled this invocation.
    pub fn is_settled(&self) -> bool {
        self.state().is_settled()
    }

    /// Converts this future into one that also completes when every handle to
    /// the completion callback is dropped without settling.
    ///
    /// Invocations made through the `js` module are never reported as
    /// abandoned: their callback is owned by the JS garbage collector, which
    /// Rust cannot observe, so the guarded future waits just like the plain
    /// one.
    pub fn or_abandoned(self) -> Guarded<T, E> {
        Guarded { pending: self }
    }
}

impl<T, E> Future for Pending<T, E> {
    type Output = Result<T, E>;

    fn poll(
        mut self: Pin<&mut Self>,
        ctx: &mut task::Context<'_>,
    ) -> task::Poll<Self::Output> {
        match self.listener.receive() {
            Some(output) => {
                self.terminated = true;
                task::Poll::Ready(output)
            },
            None => {
                self.listener.subscribe(ctx.waker());
                task::Poll::Pending
            },
        }
    }
}

#[cfg(feature = "futures")]
impl<T, E> futures::future::FusedFuture for Pending<T, E> {
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}

/// A [`Pending`] invocation that fails with [`Abandoned`] instead of waiting
/// forever when the completion callback is gone.
#[derive(Debug)]
pub struct Guarded<T, E> {
    pending: Pending<T, E>,
}

impl<T, E> Guarded<T, E> {
    /// Gives back the unguarded future.
    pub fn into_inner(self) -> Pending<T, E> {
        self.pending
    }
}

impl<T, E> Future for Guarded<T, E> {
    type Output = Result<Result<T, E>, Abandoned>;

    fn poll(
        mut self: Pin<&mut Self>,
        ctx: &mut task::Context<'_>,
    ) -> task::Poll<Self::Output> {
        if self.pending.listener.is_abandoned() {
            self.pending.terminated = true;
            return task::Poll::Ready(Err(Abandoned));
        }
        Pin::new(&mut self.pending).poll(ctx).map(Ok)
    }
}
