use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use log::trace;

pub type Callback<T> = Rc<dyn Fn(&T)>;
type SubscriptionId = u64;

/// Single-threaded typed pub/sub channel. Commands flow into the engine and
/// domain events flow out of it over these; no component ever calls another
/// directly.
pub struct Channel<T: std::fmt::Debug> {
    listeners: Rc<RefCell<HashMap<SubscriptionId, Callback<T>>>>,
    next_id: Rc<Cell<SubscriptionId>>,
}

impl<T: std::fmt::Debug> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
            next_id: Rc::clone(&self.next_id),
        }
    }
}

pub struct EventEmitter<T: std::fmt::Debug> {
    channel: Channel<T>,
}

impl<T: std::fmt::Debug> Clone for EventEmitter<T> {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel.clone(),
        }
    }
}

pub struct EventObserver<T: std::fmt::Debug> {
    channel: Channel<T>,
}

impl<T: std::fmt::Debug> Clone for EventObserver<T> {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel.clone(),
        }
    }
}

/// Handle returned by `subscribe`; consuming it detaches the listener.
pub struct Unsubscriber<T: std::fmt::Debug> {
    channel: Channel<T>,
    id: SubscriptionId,
}

impl<T: std::fmt::Debug> Unsubscriber<T> {
    pub fn unsubscribe(self) -> bool {
        self.channel.listeners.borrow_mut().remove(&self.id).is_some()
    }
}

impl<T: std::fmt::Debug> Channel<T> {
    pub fn new() -> (EventEmitter<T>, EventObserver<T>) {
        let channel = Channel {
            listeners: Rc::new(RefCell::new(HashMap::new())),
            next_id: Rc::new(Cell::new(0)),
        };
        (
            EventEmitter {
                channel: channel.clone(),
            },
            EventObserver { channel },
        )
    }

    fn subscribe<F>(&self, callback: F) -> Unsubscriber<T>
    where
        F: Fn(&T) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().insert(id, Rc::new(callback));
        Unsubscriber {
            channel: self.clone(),
            id,
        }
    }

    fn emit(&self, data: &T) {
        // Callbacks are cloned out first so a listener may subscribe or
        // unsubscribe while the event is being delivered.
        let callbacks: Vec<Callback<T>> = self.listeners.borrow().values().cloned().collect();
        trace!(target: "events", "Emitting event to {} listeners: {:?}", callbacks.len(), data);
        for callback in callbacks {
            callback(data);
        }
    }
}

impl<T: std::fmt::Debug> EventEmitter<T> {
    pub fn emit(&self, data: &T) {
        self.channel.emit(data);
    }
}

impl<T: std::fmt::Debug> EventObserver<T> {
    pub fn subscribe<F>(&self, callback: F) -> Unsubscriber<T>
    where
        F: Fn(&T) + 'static,
    {
        self.channel.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_receives_emitted_events() {
        let (emitter, observer) = Channel::<i32>::new();
        let counter = Rc::new(Cell::new(0));
        let counter_clone = counter.clone();

        let _sub = observer.subscribe(move |data: &i32| {
            counter_clone.set(counter_clone.get() + data);
        });

        emitter.emit(&42);
        assert_eq!(counter.get(), 42);
    }

    #[test]
    fn test_multiple_listeners_each_receive() {
        let (emitter, observer) = Channel::<i32>::new();
        let sum = Rc::new(Cell::new(0));
        let sum_clone1 = sum.clone();
        let sum_clone2 = sum.clone();

        let _sub1 = observer.subscribe(move |data: &i32| {
            sum_clone1.set(sum_clone1.get() + data);
        });
        let _sub2 = observer.subscribe(move |data: &i32| {
            sum_clone2.set(sum_clone2.get() + data);
        });

        emitter.emit(&5);
        assert_eq!(sum.get(), 10);
    }

    #[test]
    fn test_cloned_endpoints_share_the_channel() {
        let (emitter, observer) = Channel::<i32>::new();
        let emitter2 = emitter.clone();
        let counter = Rc::new(Cell::new(0));
        let counter_clone = counter.clone();

        let _sub = observer.subscribe(move |_data: &i32| {
            counter_clone.set(counter_clone.get() + 1);
        });

        emitter2.emit(&1);
        emitter.emit(&2);
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn test_unsubscribe_detaches_listener() {
        let (emitter, observer) = Channel::<i32>::new();
        let counter = Rc::new(Cell::new(0));
        let counter_clone = counter.clone();

        let sub = observer.subscribe(move |_data: &i32| {
            counter_clone.set(counter_clone.get() + 1);
        });

        emitter.emit(&42);
        assert_eq!(counter.get(), 1);

        assert!(sub.unsubscribe());
        emitter.emit(&42);
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn test_subscribe_during_emit_does_not_panic() {
        let (emitter, observer) = Channel::<i32>::new();
        let observer_clone = observer.clone();
        let late_subs = Rc::new(RefCell::new(Vec::new()));
        let late_subs_clone = late_subs.clone();

        let _sub = observer.subscribe(move |_data: &i32| {
            let sub = observer_clone.subscribe(|_| {});
            late_subs_clone.borrow_mut().push(sub);
        });

        emitter.emit(&1);
        assert_eq!(late_subs.borrow().len(), 1);
    }
}
