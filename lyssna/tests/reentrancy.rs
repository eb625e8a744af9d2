//! Registry mutation and re-dispatch from inside running callbacks.

use lyssna::testing::{CountingCallback, RecordingCallback};
use lyssna::{CallbackRef, Event, EventTarget, ListenerOptions};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

mod common;
use common::OrderCallback;

#[test]
fn test_listener_removes_a_later_listener() {
    let target = Arc::new(EventTarget::new());
    let order = Arc::new(Mutex::new(Vec::new()));

    let victim = CallbackRef::new(OrderCallback {
        id: 3,
        order: order.clone(),
    });

    let remover = {
        let target = target.clone();
        let victim = victim.clone();
        let order = order.clone();
        CallbackRef::from_fn(move |_| {
            order.lock().unwrap().push(1);
            target.remove_listener("test", &victim, false);
        })
    };

    target
        .add_listener("test", remover, ListenerOptions::new())
        .unwrap();
    target
        .add_listener(
            "test",
            CallbackRef::new(OrderCallback {
                id: 2,
                order: order.clone(),
            }),
            ListenerOptions::new(),
        )
        .unwrap();
    target
        .add_listener("test", victim, ListenerOptions::new())
        .unwrap();

    target.dispatch(&mut Event::new("test"));

    assert_eq!(
        *order.lock().unwrap(),
        vec![1, 2],
        "the removed listener must not fire in the same dispatch"
    );
}

#[test]
fn test_listener_removes_itself() {
    let target = Arc::new(EventTarget::new());
    let count = Arc::new(AtomicUsize::new(0));

    // The callback needs its own handle, so it is threaded through a slot
    // filled in after construction.
    let slot: Arc<Mutex<Option<CallbackRef>>> = Arc::new(Mutex::new(None));
    let callback = {
        let target = target.clone();
        let slot = slot.clone();
        let count = count.clone();
        CallbackRef::from_fn(move |_| {
            count.fetch_add(1, Ordering::SeqCst);
            let me = slot.lock().unwrap().clone().expect("slot filled");
            target.remove_listener("test", &me, false);
        })
    };
    *slot.lock().unwrap() = Some(callback.clone());

    target
        .add_listener("test", callback, ListenerOptions::new())
        .unwrap();

    target.dispatch(&mut Event::new("test"));
    target.dispatch(&mut Event::new("test"));

    assert_eq!(
        count.load(Ordering::SeqCst),
        1,
        "self-removal must not double-invoke"
    );
    assert_eq!(target.listener_count("test"), 0);
}

#[test]
fn test_listener_added_during_dispatch_waits_for_next_dispatch() {
    let target = Arc::new(EventTarget::new());
    let late = CountingCallback::new();

    let adder = {
        let target = target.clone();
        let late = late.clone();
        CallbackRef::from_fn(move |_| {
            let result = target.add_listener(
                "test",
                CallbackRef::new(late.clone()),
                ListenerOptions::new(),
            );
            assert!(result.is_ok());
        })
    };
    target
        .add_listener("test", adder, ListenerOptions::new().with_once(true))
        .unwrap();

    target.dispatch(&mut Event::new("test"));
    assert_eq!(late.count(), 0, "ordering is frozen at dispatch start");

    target.dispatch(&mut Event::new("test"));
    assert_eq!(late.count(), 1);
}

#[test]
fn test_reentrant_dispatch_of_another_type() {
    let target = Arc::new(EventTarget::new());
    let recorder = RecordingCallback::new();

    target
        .add_listener(
            "inner",
            CallbackRef::new(recorder.clone()),
            ListenerOptions::new(),
        )
        .unwrap();

    let outer = {
        let target = target.clone();
        CallbackRef::from_fn(move |_| {
            let mut inner = Event::new("inner");
            assert!(target.dispatch(&mut inner));
        })
    };
    target
        .add_listener("outer", outer, ListenerOptions::new())
        .unwrap();

    target.dispatch(&mut Event::new("outer"));
    assert_eq!(recorder.seen(), vec!["inner".to_owned()]);
}

#[test]
fn test_reentrant_dispatch_of_same_type() {
    let target = Arc::new(EventTarget::new());
    let counter = CountingCallback::new();

    // A once listener re-dispatches the same type; by then its own entry
    // is gone, so the nested pass only runs the counting listener.
    let redispatcher = {
        let target = target.clone();
        CallbackRef::from_fn(move |_| {
            target.dispatch(&mut Event::new("ping"));
        })
    };
    target
        .add_listener("ping", redispatcher, ListenerOptions::new().with_once(true))
        .unwrap();
    target
        .add_listener(
            "ping",
            CallbackRef::new(counter.clone()),
            ListenerOptions::new(),
        )
        .unwrap();

    target.dispatch(&mut Event::new("ping"));

    assert_eq!(
        counter.count(),
        2,
        "once for the nested pass, once for the outer pass"
    );
}

#[test]
fn test_concurrent_dispatch_from_two_threads() {
    let target = Arc::new(EventTarget::new());
    let counter = CountingCallback::new();
    target
        .add_listener(
            "test",
            CallbackRef::new(counter.clone()),
            ListenerOptions::new(),
        )
        .unwrap();

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let target = target.clone();
            std::thread::spawn(move || {
                for _ in 0..100 {
                    target.dispatch(&mut Event::new("test"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(counter.count(), 200);
}

#[test]
fn test_concurrent_once_fires_exactly_once() {
    let target = Arc::new(EventTarget::new());
    let counter = CountingCallback::new();
    target
        .add_listener(
            "test",
            CallbackRef::new(counter.clone()),
            ListenerOptions::new().with_once(true),
        )
        .unwrap();

    let barrier = Arc::new(std::sync::Barrier::new(2));
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let target = target.clone();
            let barrier = barrier.clone();
            std::thread::spawn(move || {
                barrier.wait();
                target.dispatch(&mut Event::new("test"));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(
        counter.count(),
        1,
        "the one-shot claim must be won by exactly one dispatch"
    );
}
