// ============================================================================
// reactive-mv - View Module
// Binds external widgets to model keys
// ============================================================================

use std::rc::{Rc, Weak};

use crate::cloned;
use crate::core::error::{Error, Result};
use crate::core::value::{coercive_equals, Value};
use crate::model::Model;
use crate::observe::observable::{Observable, Observer};

pub mod switcher;
pub mod widget;

// Re-export for convenience
pub use switcher::ContentSwitcher;
pub use widget::{CheckboxWidget, Clickable, InputWidget, TextWidget};

/// The binding layer: wires widgets to model keys through observer
/// adapters, one-way or two-way.
///
/// Each binding runs through an internal *endpoint* observable that
/// shields the store from widget echo: the endpoint's equality gate stops
/// a value that just left the store from being written straight back.
/// Binding closures hold the model weakly, so a dropped model simply
/// turns its bindings into no-ops.
pub struct View {
    model: Rc<Model>,
}

impl View {
    pub fn new(model: Rc<Model>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &Rc<Model> {
        &self.model
    }

    /// An observer forwarding every delivered value into `Model::set`.
    fn forward_to_key(model: &Rc<Model>, key: &str) -> Observer<Value> {
        let model: Weak<Model> = Rc::downgrade(model);
        let key = key.to_string();
        Observer::new(move |value: &Value| {
            let Some(model) = model.upgrade() else { return };
            if let Err(err) = model.set(&key, value.clone()) {
                log::warn!("binding write to [{key}] failed: {err}");
            }
        })
    }

    /// A fresh binding endpoint using the store's equality rule.
    fn endpoint() -> Rc<Observable<Value>> {
        Rc::new(Observable::with_equals(Value::Null, coercive_equals))
    }

    /// Two-way bind: widget changes flow into the key, key changes flow
    /// back onto the widget.
    ///
    /// At bind time the widget is the source of truth - the key takes the
    /// widget's current value, not the other way round. The key must
    /// already exist.
    pub fn add_input(&self, key: &str, widget: InputWidget) -> Result<()> {
        if !self.model.contains_key(key) {
            return Err(Error::missing_key(key));
        }

        let endpoint = Self::endpoint();
        endpoint.set(widget.current());

        // Widget events drive the endpoint.
        widget.hook(cloned!(endpoint => move |value| {
            endpoint.set(value);
        }));

        // The endpoint fans out into the store and back onto the widget.
        endpoint.subscribe(&Self::forward_to_key(&self.model, key));
        endpoint.subscribe(&Observer::new(cloned!(widget => move |value: &Value| {
            widget.apply(value);
        })));

        // Seed the key from the widget.
        self.model.set(key, endpoint.get())?;

        // Store-originated changes flow endpoint -> widget. The endpoint
        // keeps the subscription alive for the model's lifetime.
        self.model.observe(key, cloned!(endpoint => move |value: &Value| {
            endpoint.set(value.clone());
        }))?;

        Ok(())
    }

    /// One-way bind, store -> widget: applies the key's current value
    /// immediately, then again on every change.
    pub fn add_output(&self, key: &str, widget: InputWidget) -> Result<()> {
        widget.apply(&self.model.get(key)?);
        self.model.observe(key, cloned!(widget => move |value: &Value| {
            widget.apply(value);
        }))?;
        Ok(())
    }

    /// One-way bind, widgets -> store: clicking any widget in the group
    /// writes that widget's label (read at click time) to the key. Store
    /// state is never reflected back onto the widgets.
    ///
    /// The group shares one endpoint, so re-clicking the widget whose
    /// label the endpoint last latched does not re-propagate.
    pub fn add_grouped_clickable(&self, key: &str, clickables: &[Rc<dyn Clickable>]) -> Result<()> {
        if !self.model.contains_key(key) {
            return Err(Error::missing_key(key));
        }

        let endpoint = Self::endpoint();
        for clickable in clickables {
            let source = clickable.clone();
            clickable.on_click(Box::new(cloned!(endpoint => move || {
                endpoint.set(Value::Text(source.label()));
            })));
        }
        endpoint.subscribe(&Self::forward_to_key(&self.model, key));
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
