// ============================================================================
// reactive-mv - Observable / Observer
// The change-notification engine: a generic publish/subscribe cell
// ============================================================================

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::equality::{default_equals, EqualsFn};

// =============================================================================
// OBSERVER<T> - A named subscription handle
// =============================================================================

/// A subscription wrapping a single-argument callback.
///
/// An observer has no identity beyond its handle: two clones of one
/// observer are the same subscription, which is what makes registration
/// idempotent and removal exact. The callback receives the observable's
/// new value, never the observable itself.
pub struct Observer<T> {
    handler: Rc<dyn Fn(&T)>,
}

impl<T> Clone for Observer<T> {
    fn clone(&self) -> Self {
        Self {
            handler: self.handler.clone(),
        }
    }
}

impl<T> Observer<T> {
    pub fn new(handler: impl Fn(&T) + 'static) -> Self {
        Self {
            handler: Rc::new(handler),
        }
    }

    /// Deliver a value to the wrapped callback.
    pub fn update(&self, value: &T) {
        (self.handler)(value);
    }

    /// Handle identity: do both observers wrap the same callback?
    pub fn handle_eq(&self, other: &Observer<T>) -> bool {
        Rc::ptr_eq(&self.handler, &other.handler)
    }
}

impl<T> fmt::Debug for Observer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Observer({:p})", Rc::as_ptr(&self.handler))
    }
}

// =============================================================================
// OBSERVABLE<T> - One value plus its notification list
// =============================================================================

/// A single observable value.
///
/// Holds one value and a set of observers; `set` notifies every observer,
/// in registration order, whenever the new value is unequal to the old one
/// under the cell's equality function. An equal write is a complete no-op.
///
/// Notification is synchronous, depth-first and re-entrant: a callback may
/// call `set` again (on this or another observable) on the same call
/// stack. The observer list is snapshotted before callbacks run, so
/// callbacks may also subscribe and unsubscribe freely.
///
/// # Example
///
/// ```
/// use reactive_mv::{observable, Observer};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let count = observable(0);
/// let seen = Rc::new(Cell::new(0));
///
/// let o = Observer::new({
///     let seen = seen.clone();
///     move |v: &i32| seen.set(*v)
/// });
/// count.subscribe(&o);
///
/// count.set(5);
/// assert_eq!(seen.get(), 5);
///
/// count.set(5); // equal: no notification
/// ```
pub struct Observable<T> {
    state: RefCell<T>,
    observers: RefCell<Vec<Observer<T>>>,
    equals: EqualsFn<T>,
}

impl<T: 'static> Observable<T> {
    /// Create an observable using `PartialEq` for change detection.
    pub fn new(initial: T) -> Self
    where
        T: PartialEq,
    {
        Self::with_equals(initial, default_equals)
    }

    /// Create an observable with a custom equality function.
    pub fn with_equals(initial: T, equals: EqualsFn<T>) -> Self {
        Self {
            state: RefCell::new(initial),
            observers: RefCell::new(Vec::new()),
            equals,
        }
    }

    /// Current value (cloning).
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.state.borrow().clone()
    }

    /// Access the current value without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Store a new value and notify.
    ///
    /// If the value equals the current state, nothing happens and `false`
    /// is returned. Otherwise the value is stored *first*, then every
    /// observer registered at that moment runs, in registration order,
    /// with a reference to the value. Returns `true`.
    ///
    /// Observers triggered by a nested `set` see the nested value; the
    /// outer fan-out still delivers the value its own call stored.
    pub fn set(&self, value: T) -> bool
    where
        T: Clone,
    {
        let changed = {
            let current = self.state.borrow();
            !(self.equals)(&current, &value)
        };
        if !changed {
            return false;
        }

        *self.state.borrow_mut() = value.clone();

        // Snapshot the list and release every borrow before running
        // callbacks: a callback may re-enter set, subscribe or
        // unsubscribe on this same observable.
        let snapshot: Vec<Observer<T>> = self.observers.borrow().clone();
        for observer in &snapshot {
            observer.update(&value);
        }
        true
    }

    /// Idempotent registration: subscribing the same handle twice keeps a
    /// single subscription.
    pub fn subscribe(&self, observer: &Observer<T>) {
        let mut observers = self.observers.borrow_mut();
        if !observers.iter().any(|o| o.handle_eq(observer)) {
            observers.push(observer.clone());
        }
    }

    /// Remove a subscription. Unknown handles are ignored.
    pub fn unsubscribe(&self, observer: &Observer<T>) {
        self.observers
            .borrow_mut()
            .retain(|o| !o.handle_eq(observer));
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("state", &self.state.borrow())
            .field("observers", &self.observer_count())
            .finish()
    }
}

/// Create an observable. The primary constructor shorthand.
///
/// # Example
///
/// ```
/// use reactive_mv::observable;
///
/// let name = observable(String::from("hello"));
/// assert_eq!(name.get(), "hello");
/// ```
pub fn observable<T: PartialEq + 'static>(initial: T) -> Observable<T> {
    Observable::new(initial)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::equality::never_equals;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn set_and_get() {
        let cell = observable(1);
        assert_eq!(cell.get(), 1);
        assert!(cell.set(2));
        assert_eq!(cell.get(), 2);
    }

    #[test]
    fn equal_set_is_a_no_op() {
        let cell = observable(2);
        let hits = Rc::new(Cell::new(0));
        let o = Observer::new({
            let hits = hits.clone();
            move |_: &i32| hits.set(hits.get() + 1)
        });
        cell.subscribe(&o);

        assert!(!cell.set(2));
        assert_eq!(hits.get(), 0);

        assert!(cell.set(3));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn notification_order_is_registration_order() {
        let cell = observable(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let o = Observer::new({
                let seen = seen.clone();
                move |_: &i32| seen.borrow_mut().push(tag)
            });
            cell.subscribe(&o);
        }

        cell.set(1);
        assert_eq!(*seen.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn each_observer_runs_exactly_once_per_change() {
        let cell = observable(0);
        let hits = Rc::new(Cell::new(0));
        let o = Observer::new({
            let hits = hits.clone();
            move |_: &i32| hits.set(hits.get() + 1)
        });

        cell.subscribe(&o);
        cell.subscribe(&o); // idempotent
        cell.subscribe(&o.clone()); // same handle

        cell.set(1);
        assert_eq!(hits.get(), 1);
        assert_eq!(cell.observer_count(), 1);
    }

    #[test]
    fn unsubscribe_actually_removes() {
        let cell = observable(0);
        let hits = Rc::new(Cell::new(0));
        let o = Observer::new({
            let hits = hits.clone();
            move |_: &i32| hits.set(hits.get() + 1)
        });

        cell.subscribe(&o);
        cell.set(1);
        assert_eq!(hits.get(), 1);

        cell.unsubscribe(&o);
        cell.set(2);
        assert_eq!(hits.get(), 1);
        assert_eq!(cell.observer_count(), 0);

        // Removal of an unknown handle is harmless.
        cell.unsubscribe(&o);
    }

    #[test]
    fn reentrant_set_on_same_observable() {
        let cell = Rc::new(observable(0));

        // First write bumps the value once more from inside the callback.
        let o = Observer::new({
            let cell = cell.clone();
            move |v: &i32| {
                if *v == 1 {
                    cell.set(2);
                }
            }
        });
        cell.subscribe(&o);

        cell.set(1);
        assert_eq!(cell.get(), 2);
    }

    #[test]
    fn reentrant_set_across_observables() {
        let a = Rc::new(observable(0));
        let b = Rc::new(observable(0));

        let o = Observer::new({
            let b = b.clone();
            move |v: &i32| {
                b.set(*v * 10);
            }
        });
        a.subscribe(&o);

        a.set(3);
        assert_eq!(b.get(), 30);
    }

    #[test]
    fn subscribing_during_notification_does_not_panic() {
        let cell = Rc::new(observable(0));
        let late_hits = Rc::new(Cell::new(0));

        let o = Observer::new({
            let cell = cell.clone();
            let late_hits = late_hits.clone();
            move |_: &i32| {
                let late = Observer::new({
                    let late_hits = late_hits.clone();
                    move |_: &i32| late_hits.set(late_hits.get() + 1)
                });
                cell.subscribe(&late);
            }
        });
        cell.subscribe(&o);

        // The late observer misses the change that registered it.
        cell.set(1);
        assert_eq!(late_hits.get(), 0);
    }

    #[test]
    fn custom_equality() {
        let cell = Observable::with_equals(5, never_equals);
        let hits = Rc::new(Cell::new(0));
        let o = Observer::new({
            let hits = hits.clone();
            move |_: &i32| hits.set(hits.get() + 1)
        });
        cell.subscribe(&o);

        // never_equals: even the same value notifies.
        assert!(cell.set(5));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn with_avoids_cloning() {
        let cell = observable(vec![1, 2, 3]);
        let sum = cell.with(|v| v.iter().sum::<i32>());
        assert_eq!(sum, 6);
    }
}
