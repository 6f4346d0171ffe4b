// ============================================================================
// reactive-mv - A Reactive Model-View Data Binding Library for Rust
// ============================================================================
//
// An observable key-value store (Model) whose values are individually
// observable, a binding layer (View) wiring store keys to abstract widget
// capabilities, and the ContentSwitcher composition that multiplexes the
// selected branch of a content map into a family of synchronized derived
// keys.
// ============================================================================

pub mod core;
pub mod model;
pub mod observe;
pub mod view;

mod macros;

// Re-export the public surface at the crate root
pub use crate::core::error::{Error, Result};
pub use crate::core::keys::UniqueKeys;
pub use crate::core::value::{coercive_equals, ContentMap, Contents, FieldMap, Value};
pub use crate::model::Model;
pub use crate::observe::equality::{always_equals, default_equals, never_equals, EqualsFn};
pub use crate::observe::observable::{observable, Observable, Observer};
pub use crate::view::switcher::ContentSwitcher;
pub use crate::view::widget::{CheckboxWidget, Clickable, InputWidget, TextWidget};
pub use crate::view::View;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn store_roundtrip() {
        let model = Model::new();
        model.add_key("x", Value::from(1)).unwrap();
        assert_eq!(model.get("x").unwrap(), Value::Number(1.0));

        let seen = Rc::new(RefCell::new(Vec::new()));
        model
            .observe("x", {
                let seen = seen.clone();
                move |v: &Value| seen.borrow_mut().push(v.clone())
            })
            .unwrap();

        model.set("x", Value::from(2)).unwrap();
        model.set("x", Value::from(2)).unwrap();
        assert_eq!(*seen.borrow(), vec![Value::Number(2.0)]);
    }

    #[test]
    fn error_kinds() {
        let model = Model::new();
        model.add_key_default("x").unwrap();

        assert!(matches!(
            model.add_key_default("x"),
            Err(Error::DuplicateKey { .. })
        ));
        assert!(matches!(model.get("y"), Err(Error::MissingKey { .. })));
    }

    #[test]
    fn coercive_store_change_detection() {
        // The store considers 1 and "1" the same value: writing the text
        // form over the number form is a no-op.
        let model = Model::new();
        model.add_key("x", Value::from(1)).unwrap();
        assert!(!model.set("x", Value::text("1")).unwrap());
        assert!(model.set("x", Value::text("2")).unwrap());
    }

    #[test]
    fn observer_removal_via_handle() {
        let model = Model::new();
        model.add_key_default("x").unwrap();

        let hits = Rc::new(RefCell::new(0));
        let handle = model
            .observe("x", {
                let hits = hits.clone();
                move |_: &Value| *hits.borrow_mut() += 1
            })
            .unwrap();

        model.set("x", Value::from(1)).unwrap();
        model.unobserve("x", &handle).unwrap();
        model.set("x", Value::from(2)).unwrap();
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn nested_writes_complete_before_the_outer_call_returns() {
        let model = Rc::new(Model::new());
        model.add_key_default("a").unwrap();
        model.add_key_default("b").unwrap();

        model
            .observe("a", {
                let model = Rc::downgrade(&model);
                move |v: &Value| {
                    if let Some(model) = model.upgrade() {
                        model.set("b", v.clone()).unwrap();
                    }
                }
            })
            .unwrap();

        model.set("a", Value::text("ripple")).unwrap();
        assert_eq!(model.get("b").unwrap(), Value::text("ripple"));
    }
}
