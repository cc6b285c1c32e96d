use crate::pending::State;
use std::{cell::Cell, fmt, rc::Rc, task};

pub fn channel<T, E>() -> (Notifier<T, E>, Listener<T, E>) {
    let channel = Channel::init_connected();
    (Notifier::new(channel.clone()), Listener::new(channel))
}

struct ChannelInner<T, E> {
    notifiers: Cell<usize>,
    state: Cell<State>,
    waker: Cell<Option<task::Waker>>,
    data: Cell<Option<Result<T, E>>>,
}

impl<T, E> fmt::Debug for ChannelInner<T, E>
where
    T: fmt::Debug,
    E: fmt::Debug,
{
    fn fmt(&self, fmtr: &mut fmt::Formatter) -> fmt::Result {
        let waker = self.waker.take();
        let data = self.data.take();
        let result = fmtr
            .debug_struct("pending::Channel")
            .field("notifiers", &self.notifiers)
            .field("state", &self.state)
            .field("waker", &waker)
            .field("data", &data)
            .finish();
        self.waker.set(waker);
        self.data.set(data);
        result
    }
}

impl<T, E> ChannelInner<T, E> {
    fn init_connected() -> Self {
        Self {
            notifiers: Cell::new(1),
            state: Cell::new(State::Pending),
            waker: Cell::new(None),
            data: Cell::new(None),
        }
    }
}

#[derive(Debug)]
struct Channel<T, E> {
    inner: Rc<ChannelInner<T, E>>,
}

impl<T, E> Channel<T, E> {
    fn init_connected() -> Self {
        Self { inner: Rc::new(ChannelInner::init_connected()) }
    }

    fn is_connected(&self) -> bool {
        self.inner.notifiers.get() > 0
    }

    fn state(&self) -> State {
        self.inner.state.get()
    }

    fn wake(&self) {
        if let Some(waker) = self.inner.waker.take() {
            waker.wake();
        }
    }
}

impl<T, E> Clone for Channel<T, E> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

/// Settling side of the channel. Clones share the same settlement slot, and
/// only the first settlement through any of them is kept.
#[derive(Debug)]
pub struct Notifier<T, E> {
    channel: Channel<T, E>,
}

impl<T, E> Notifier<T, E> {
    fn new(channel: Channel<T, E>) -> Self {
        Self { channel }
    }

    pub fn settle(&self, result: Result<T, E>) -> bool {
        if self.is_settled() {
            trace!("completion callback invoked after settlement, ignored");
            return false;
        }
        let state = match &result {
            Ok(_) => State::Resolved,
            Err(_) => State::Rejected,
        };
        self.channel.inner.state.set(state);
        self.channel.inner.data.set(Some(result));
        self.channel.wake();
        true
    }

    pub fn is_settled(&self) -> bool {
        self.channel.state() != State::Pending
    }
}

impl<T, E> Clone for Notifier<T, E> {
    fn clone(&self) -> Self {
        let notifiers = &self.channel.inner.notifiers;
        notifiers.set(notifiers.get() + 1);
        Self { channel: self.channel.clone() }
    }
}

impl<T, E> Drop for Notifier<T, E> {
    fn drop(&mut self) {
        let notifiers = &self.channel.inner.notifiers;
        notifiers.set(notifiers.get() - 1);
        if !self.channel.is_connected() && !self.is_settled() {
            trace!("completion callback dropped without being invoked");
            self.channel.wake();
        }
    }
}

/// Receiving side of the channel.
#[derive(Debug)]
pub struct Listener<T, E> {
    channel: Channel<T, E>,
}

impl<T, E> Listener<T, E> {
    fn new(channel: Channel<T, E>) -> Self {
        Self { channel }
    }

    pub fn receive(&self) -> Option<Result<T, E>> {
        self.channel.inner.data.take()
    }

    pub fn state(&self) -> State {
        self.channel.state()
    }

    /// Every notifier is gone and none of them settled.
    pub fn is_abandoned(&self) -> bool {
        !self.channel.is_connected() && self.state() == State::Pending
    }

    pub fn subscribe(&self, waker: &task::Waker) {
        let stored = match self.channel.inner.waker.take() {
            Some(current) if current.will_wake(waker) => current,
            _ => waker.clone(),
        };
        self.channel.inner.waker.set(Some(stored));
    }
}
