// ============================================================================
// reactive-mv - Model
// The reactive store: a registry of named observables
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::core::error::{Error, Result};
use crate::core::keys::UniqueKeys;
use crate::core::value::{coercive_equals, Value};
use crate::observe::observable::{Observable, Observer};

/// The application's reactive store: a mapping from key names to
/// observables. Every read, write, and watch of application state goes
/// through here.
///
/// Keys are added exactly once with `add_key` and live as long as the
/// model; there is no removal path. Every key uses the store's coercive
/// equality rule for change detection.
///
/// # Example
///
/// ```
/// use reactive_mv::{Model, Value};
///
/// let model = Model::new();
/// model.add_key("count", Value::from(1)).unwrap();
/// assert_eq!(model.get("count").unwrap(), Value::Number(1.0));
///
/// model.set("count", Value::from(2)).unwrap();
/// assert_eq!(model.get("count").unwrap(), Value::Number(2.0));
/// ```
pub struct Model {
    keys: RefCell<HashMap<String, Rc<Observable<Value>>>>,
    unique: UniqueKeys,
}

impl Model {
    pub fn new() -> Self {
        Self::with_unique_keys(UniqueKeys::new())
    }

    /// Build a model around an injected key allocator. Tests use a seeded
    /// allocator to get predictable content-switcher namespaces.
    pub fn with_unique_keys(unique: UniqueKeys) -> Self {
        Self {
            keys: RefCell::new(HashMap::new()),
            unique,
        }
    }

    fn entry(&self, name: &str) -> Result<Rc<Observable<Value>>> {
        self.keys
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::missing_key(name))
    }

    /// Register a new key seeded with `initial`.
    ///
    /// The observable starts in the `Null` unset state and the initial
    /// value goes through the normal write path; a fresh key cannot have
    /// observers yet, so seeding is never observable from outside.
    pub fn add_key(&self, name: &str, initial: Value) -> Result<()> {
        {
            let mut keys = self.keys.borrow_mut();
            if keys.contains_key(name) {
                return Err(Error::duplicate_key(name));
            }
            keys.insert(
                name.to_string(),
                Rc::new(Observable::with_equals(Value::Null, coercive_equals)),
            );
        }
        self.set(name, initial)?;
        Ok(())
    }

    /// Register a new key in the unset state.
    pub fn add_key_default(&self, name: &str) -> Result<()> {
        self.add_key(name, Value::Null)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.keys.borrow().contains_key(name)
    }

    /// Current value at `name`.
    pub fn get(&self, name: &str) -> Result<Value> {
        Ok(self.entry(name)?.get())
    }

    /// Write `value` to `name`, returning whether anything changed (an
    /// equal write is a no-op and notifies nobody).
    pub fn set(&self, name: &str, value: Value) -> Result<bool> {
        let observable = self.entry(name)?;
        log::trace!("model set [{name}] <- {}", value.kind());
        Ok(observable.set(value))
    }

    /// Watch a key: wraps `handler` in a new observer, registers it, and
    /// returns the handle so the subscription can later be removed with
    /// `unobserve`.
    pub fn observe(
        &self,
        name: &str,
        handler: impl Fn(&Value) + 'static,
    ) -> Result<Observer<Value>> {
        let observable = self.entry(name)?;
        let observer = Observer::new(handler);
        observable.subscribe(&observer);
        Ok(observer)
    }

    /// Remove a subscription previously returned by `observe`.
    pub fn unobserve(&self, name: &str, observer: &Observer<Value>) -> Result<()> {
        self.entry(name)?.unsubscribe(observer);
        Ok(())
    }

    /// Next unique namespace suffix. Used exclusively by
    /// `View::add_content_switcher` to keep derived-key families disjoint.
    pub fn next_unique_key(&self) -> u64 {
        self.unique.next()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================
