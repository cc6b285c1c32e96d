use futures::{executor::block_on, future::FusedFuture, join, FutureExt};
use std::{
    cell::{Cell, RefCell},
    fs,
    io,
    path::PathBuf,
    rc::Rc,
};
use waitforme::{adapt, adapt_with, Abandoned, Adapted, Callback, State};

type Check = Callback<bool, &'static str>;

type Slot<T, E> = Rc<RefCell<Option<Callback<T, E>>>>;

fn check() -> Adapted<impl Fn(&(), (i32,), Check), ()> {
    adapt(|_, (n,): (i32,), callback: Check| {
        let error = if n > 0 { Some("positive") } else { None };
        callback.call(error, (n == 0,));
    })
}

fn read_file(
) -> Adapted<impl Fn(&(), (PathBuf,), Callback<Vec<u8>, io::Error>), ()> {
    adapt(|_, (path,): (PathBuf,), callback: Callback<Vec<u8>, io::Error>| {
        callback.settle(fs::read(path));
    })
}

fn manifest_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml")
}

#[test]
fn resolves_with_result_when_no_error() {
    assert_eq!(block_on(check().call((0,))), Ok(true));
    assert_eq!(block_on(check().call((-3,))), Ok(false));
}

#[test]
fn rejects_with_error() {
    assert_eq!(block_on(check().call((2,))), Err("positive"));
}

#[test]
fn reads_existing_file() {
    let read = read_file();
    let content = block_on(read.call((manifest_path(),))).unwrap();
    assert!(!content.is_empty());
    assert_eq!(content, fs::read(manifest_path()).unwrap());
}

#[test]
fn missing_file_rejects_with_io_error() {
    let read = read_file();
    let missing = manifest_path().with_file_name("no-such-file.toml");
    let error = block_on(read.call((missing,))).unwrap_err();
    assert_eq!(error.kind(), io::ErrorKind::NotFound);
}

#[derive(Debug)]
struct Context {
    value: String,
    seen: Cell<Option<*const Context>>,
}

#[test]
fn function_observes_bound_context() {
    let context =
        Context { value: String::from("ctx-value"), seen: Cell::new(None) };
    let adapted = adapt_with(
        |this: &Context, (): (), callback: Callback<String, ()>| {
            this.seen.set(Some(this as *const Context));
            callback.resolve(this.value.clone());
        },
        context,
    );

    let result = block_on(adapted.call(()));
    assert_eq!(result, Ok(String::from("ctx-value")));
    let bound = adapted.context() as *const Context;
    assert_eq!(adapted.context().seen.get(), Some(bound));
}

#[test]
fn extra_results_are_dropped() {
    let adapted = adapt(|_, (): (), callback: Callback<u8, ()>| {
        callback.call(None, (1, "two", 3.0));
    });
    assert_eq!(block_on(adapted.call(())), Ok(1));
}

#[test]
fn no_results_resolve_with_unit() {
    let adapted = adapt(|_, (): (), callback: Callback<(), &'static str>| {
        callback.call(None, ());
    });
    assert_eq!(block_on(adapted.call(())), Ok(()));
}

#[test]
fn error_drops_results() {
    let adapted = adapt(|_, (): (), callback: Callback<u8, &'static str>| {
        callback.call(Some("failed"), (9, 10));
    });
    assert_eq!(block_on(adapted.call(())), Err("failed"));
}

#[test]
fn first_settlement_wins() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let recorded = calls.clone();
    let adapted = adapt(move |_, (): (), callback: Callback<u8, &'static str>| {
        recorded.borrow_mut().push(callback.call(None, (1,)));
        recorded.borrow_mut().push(callback.call(Some("late"), (2,)));
        recorded.borrow_mut().push(callback.resolve(3));
    });

    assert_eq!(block_on(adapted.call(())), Ok(1));
    assert_eq!(*calls.borrow(), [true, false, false]);
}

#[test]
fn first_rejection_wins() {
    let adapted = adapt(|_, (): (), callback: Callback<u8, &'static str>| {
        callback.reject("first");
        callback.resolve(2);
    });
    let mut pending = adapted.call(());
    assert_eq!(pending.state(), State::Rejected);
    assert_eq!(block_on(&mut pending), Err("first"));
    assert_eq!(pending.state(), State::Rejected);
}

#[test]
fn clones_share_settlement() {
    let slot: Slot<u8, ()> = Rc::default();
    let stored = slot.clone();
    let adapted = adapt(move |_, (): (), callback: Callback<u8, ()>| {
        *stored.borrow_mut() = Some(callback.clone());
        callback.resolve(4);
    });

    let pending = adapted.call(());
    let clone = slot.borrow_mut().take().unwrap();
    assert!(clone.is_settled());
    assert!(!clone.resolve(5));
    assert_eq!(block_on(pending), Ok(4));
}

#[test]
fn wrapped_function_runs_before_call_returns() {
    let runs = Rc::new(Cell::new(0));
    let counter = runs.clone();
    let adapted = adapt(move |_, (): (), _callback: Callback<(), ()>| {
        counter.set(counter.get() + 1);
    });

    let _pending = adapted.call(());
    assert_eq!(runs.get(), 1);
}

#[test]
fn settles_when_callback_fires_later() {
    let slot: Slot<u32, &'static str> = Rc::default();
    let stored = slot.clone();
    let adapted = adapt(
        move |_, (): (), callback: Callback<u32, &'static str>| {
            *stored.borrow_mut() = Some(callback);
        },
    );

    let mut pending = adapted.call(());
    assert_eq!(pending.state(), State::Pending);
    assert!((&mut pending).now_or_never().is_none());

    let callback = slot.borrow_mut().take().unwrap();
    assert!(callback.call(None, (42,)));
    assert_eq!(pending.state(), State::Resolved);
    assert_eq!(block_on(pending), Ok(42));
}

#[test]
fn settlement_wakes_waiting_task() {
    let slot: Slot<u32, ()> = Rc::default();
    let stored = slot.clone();
    let adapted = adapt(move |_, (): (), callback: Callback<u32, ()>| {
        *stored.borrow_mut() = Some(callback);
    });

    let pending = adapted.call(());
    let callback = slot.borrow_mut().take().unwrap();
    let (result, ()) = block_on(async move {
        join!(pending, async move {
            callback.resolve(8);
        })
    });
    assert_eq!(result, Ok(8));
}

#[test]
fn concurrent_invocations_are_independent() {
    let slots = Rc::new(RefCell::new(Vec::new()));
    let stored = slots.clone();
    let adapted = adapt(
        move |_, (label,): (&'static str,), callback: Callback<String, ()>| {
            stored.borrow_mut().push((label, callback));
        },
    );

    let first = adapted.call(("first",));
    let second = adapted.call(("second",));
    let mut callbacks = slots.borrow_mut().drain(..).collect::<Vec<_>>();
    assert_eq!(callbacks.len(), 2);

    while let Some((label, callback)) = callbacks.pop() {
        callback.resolve(format!("{}-done", label));
    }

    let (first, second) = block_on(async { join!(first, second) });
    assert_eq!(first, Ok(String::from("first-done")));
    assert_eq!(second, Ok(String::from("second-done")));
}

#[test]
fn never_settles_without_callback() {
    let slot: Slot<(), ()> = Rc::default();
    let stored = slot.clone();
    let adapted = adapt(move |_, (): (), callback: Callback<(), ()>| {
        *stored.borrow_mut() = Some(callback);
    });

    let mut pending = adapted.call(());
    assert!((&mut pending).now_or_never().is_none());
    assert!((&mut pending).now_or_never().is_none());
    assert!(!pending.is_settled());

    let mut guarded = pending.or_abandoned();
    assert!((&mut guarded).now_or_never().is_none());
}

#[test]
fn dropped_callback_leaves_invocation_pending() {
    let adapted = adapt(|_, (): (), callback: Callback<(), ()>| {
        drop(callback);
    });

    let mut pending = adapted.call(());
    assert!((&mut pending).now_or_never().is_none());
    assert_eq!(pending.state(), State::Pending);
}

#[test]
fn guarded_reports_abandonment() {
    let adapted = adapt(|_, (): (), callback: Callback<(), ()>| {
        drop(callback);
    });
    let result = block_on(adapted.call(()).or_abandoned());
    assert_eq!(result, Err(Abandoned));
    assert_eq!(
        Abandoned.to_string(),
        "completion callback dropped without being invoked"
    );
}

#[test]
fn guarded_reports_abandonment_after_waiting() {
    let slot: Slot<u8, ()> = Rc::default();
    let stored = slot.clone();
    let adapted = adapt(move |_, (): (), callback: Callback<u8, ()>| {
        *stored.borrow_mut() = Some(callback);
    });

    let guarded = adapted.call(()).or_abandoned();
    let callback = slot.borrow_mut().take().unwrap();
    let (result, ()) = block_on(async move {
        join!(guarded, async move {
            drop(callback);
        })
    });
    assert_eq!(result, Err(Abandoned));
}

#[test]
fn guarded_passes_settlement_through() {
    let result = block_on(check().call((0,)).or_abandoned());
    assert_eq!(result, Ok(Ok(true)));
    let result = block_on(check().call((1,)).or_abandoned());
    assert_eq!(result, Ok(Err("positive")));
}

#[test]
#[should_panic(expected = "synchronous failure")]
fn synchronous_panic_propagates_out_of_call() {
    let adapted = adapt(|_, (): (), _callback: Callback<(), ()>| {
        panic!("synchronous failure");
    });
    let _pending = adapted.call(());
}

#[test]
fn synchronous_failure_is_returned_not_rejected() {
    let adapted = adapt(
        |_, (text,): (&'static str,), callback: Callback<u8, String>| {
            let number = text.parse::<u8>().map_err(|error| error.to_string())?;
            callback.resolve(number);
            Ok::<(), String>(())
        },
    );

    let (ret, pending) = adapted.call_returning(("12",));
    assert_eq!(ret, Ok(()));
    assert_eq!(block_on(pending), Ok(12));

    let (ret, mut pending) = adapted.call_returning(("twelve",));
    assert!(ret.is_err());
    assert!((&mut pending).now_or_never().is_none());
}

#[test]
fn mutable_function_keeps_state_between_calls() {
    let mut count = 0;
    let mut adapted = Adapted::new_mut(
        move |step: &u32, (): (), callback: Callback<u32, ()>| {
            count += step;
            callback.resolve(count);
        },
        5,
    );

    assert_eq!(block_on(adapted.call_mut(())), Ok(5));
    assert_eq!(block_on(adapted.call_mut(())), Ok(10));
    let (ret, pending) = adapted.call_mut_returning(());
    assert_eq!(ret, ());
    assert_eq!(block_on(pending), Ok(15));
}

#[test]
fn consuming_function_is_called_once() {
    let token = String::from("moved-token");
    let adapted = Adapted::new(
        move |_, (): (), callback: Callback<String, ()>| {
            callback.resolve(token);
            "returned"
        },
        (),
    );

    let (ret, pending) = adapted.call_once_returning(());
    assert_eq!(ret, "returned");
    assert_eq!(block_on(pending), Ok(String::from("moved-token")));
}

#[test]
fn fused_after_completion() {
    let mut pending = check().call((0,));
    assert!(!pending.is_terminated());
    assert_eq!(block_on(&mut pending), Ok(true));
    assert!(pending.is_terminated());
    assert_eq!(pending.state(), State::Resolved);
}

#[test]
fn into_parts_gives_back_context() {
    let adapted = adapt_with(
        |this: &u8, (): (), callback: Callback<u8, ()>| {
            callback.resolve(*this);
        },
        3u8,
    );
    let (function, context) = adapted.into_parts();
    assert_eq!(context, 3);
    let adapted = Adapted::new_ref(function, 11u8);
    assert_eq!(block_on(adapted.call(())), Ok(11));
}
