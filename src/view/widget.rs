// ============================================================================
// reactive-mv - Widget Capabilities
// Abstract bindable-widget traits; the host toolkit implements these
// ============================================================================

use std::rc::Rc;

use crate::core::value::Value;

// =============================================================================
// CAPABILITY TRAITS
// =============================================================================
//
// The core never constructs or renders widgets. It consumes three
// capabilities: read a value, write a value, subscribe to a user event.
// One contract applies to all implementations: event handlers fire on
// user-originated events only - a programmatic set_value / set_checked
// must not re-fire the change handler. (Real toolkits behave this way;
// the equality gate in Observable::set is the load-bearing cycle breaker
// regardless.)
// =============================================================================

/// A text-like widget: a text input, a label, anything with a string face.
pub trait TextWidget {
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
    fn on_change(&self, handler: Box<dyn Fn(String)>);
}

/// A checkbox-like widget holding a boolean.
pub trait CheckboxWidget {
    fn checked(&self) -> bool;
    fn set_checked(&self, checked: bool);
    fn on_toggle(&self, handler: Box<dyn Fn(bool)>);
}

/// A clickable widget carrying a label.
pub trait Clickable {
    fn label(&self) -> String;
    fn on_click(&self, handler: Box<dyn Fn()>);
}

// =============================================================================
// INPUT WIDGET - caller-selected variant
// =============================================================================

/// A value-bearing widget, with its kind chosen by the caller at bind
/// time. The view never inspects a widget to guess what it is.
#[derive(Clone)]
pub enum InputWidget {
    Text(Rc<dyn TextWidget>),
    Checkbox(Rc<dyn CheckboxWidget>),
}

impl InputWidget {
    pub fn text(widget: Rc<dyn TextWidget>) -> Self {
        Self::Text(widget)
    }

    pub fn checkbox(widget: Rc<dyn CheckboxWidget>) -> Self {
        Self::Checkbox(widget)
    }

    /// The widget's current value, lifted into the store's value space.
    pub fn current(&self) -> Value {
        match self {
            InputWidget::Text(w) => Value::Text(w.value()),
            InputWidget::Checkbox(w) => Value::Bool(w.checked()),
        }
    }

    /// Push a store value onto the widget's face.
    pub fn apply(&self, value: &Value) {
        match self {
            InputWidget::Text(w) => w.set_value(&value.to_text()),
            InputWidget::Checkbox(w) => w.set_checked(value.is_truthy()),
        }
    }

    /// Route the widget's user events into `handler`, lifted into the
    /// store's value space.
    pub fn hook(&self, handler: impl Fn(Value) + 'static) {
        match self {
            InputWidget::Text(w) => {
                w.on_change(Box::new(move |text| handler(Value::Text(text))));
            }
            InputWidget::Checkbox(w) => {
                w.on_toggle(Box::new(move |checked| handler(Value::Bool(checked))));
            }
        }
    }
}
