// Shared in-memory fake widgets for the integration tests. They follow
// the widget contract: programmatic setters update the face without
// firing handlers; only the user-simulation helpers fire them.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use reactive_mv::{
    CheckboxWidget, Clickable, ContentMap, Contents, FieldMap, TextWidget, Value,
};

pub struct FakeText {
    value: RefCell<String>,
    handlers: RefCell<Vec<Box<dyn Fn(String)>>>,
}

impl FakeText {
    pub fn new(initial: &str) -> Rc<Self> {
        Rc::new(Self {
            value: RefCell::new(initial.to_string()),
            handlers: RefCell::new(Vec::new()),
        })
    }

    /// Simulate the user typing: update the face, then fire handlers.
    pub fn type_in(&self, text: &str) {
        *self.value.borrow_mut() = text.to_string();
        let handlers = self.handlers.borrow();
        for handler in handlers.iter() {
            handler(text.to_string());
        }
    }

    /// What the widget currently displays.
    pub fn shown(&self) -> String {
        self.value.borrow().clone()
    }
}

impl TextWidget for FakeText {
    fn value(&self) -> String {
        self.value.borrow().clone()
    }

    fn set_value(&self, value: &str) {
        *self.value.borrow_mut() = value.to_string();
    }

    fn on_change(&self, handler: Box<dyn Fn(String)>) {
        self.handlers.borrow_mut().push(handler);
    }
}

pub struct FakeCheckbox {
    checked: Cell<bool>,
    handlers: RefCell<Vec<Box<dyn Fn(bool)>>>,
}

impl FakeCheckbox {
    pub fn new(checked: bool) -> Rc<Self> {
        Rc::new(Self {
            checked: Cell::new(checked),
            handlers: RefCell::new(Vec::new()),
        })
    }

    /// Simulate the user toggling the box.
    pub fn toggle_to(&self, checked: bool) {
        self.checked.set(checked);
        let handlers = self.handlers.borrow();
        for handler in handlers.iter() {
            handler(checked);
        }
    }

    pub fn is_checked(&self) -> bool {
        self.checked.get()
    }
}

impl CheckboxWidget for FakeCheckbox {
    fn checked(&self) -> bool {
        self.checked.get()
    }

    fn set_checked(&self, checked: bool) {
        self.checked.set(checked);
    }

    fn on_toggle(&self, handler: Box<dyn Fn(bool)>) {
        self.handlers.borrow_mut().push(handler);
    }
}

pub struct FakeButton {
    label: String,
    handlers: RefCell<Vec<Box<dyn Fn()>>>,
}

impl FakeButton {
    pub fn new(label: &str) -> Rc<Self> {
        Rc::new(Self {
            label: label.to_string(),
            handlers: RefCell::new(Vec::new()),
        })
    }

    /// Simulate a user click.
    pub fn click(&self) {
        let handlers = self.handlers.borrow();
        for handler in handlers.iter() {
            handler();
        }
    }
}

impl Clickable for FakeButton {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn on_click(&self, handler: Box<dyn Fn()>) {
        self.handlers.borrow_mut().push(handler);
    }
}

/// `{a: {title: "A", text: "ta"}, b: {title: "B", text: "tb"}}`
pub fn sample_contents() -> Contents {
    let mut map = ContentMap::new();
    map.insert(
        "a".to_string(),
        field_map(&[("title", "A"), ("text", "ta")]),
    );
    map.insert(
        "b".to_string(),
        field_map(&[("title", "B"), ("text", "tb")]),
    );
    Contents::new(map)
}

pub fn field_map(fields: &[(&str, &str)]) -> FieldMap {
    fields
        .iter()
        .map(|(name, value)| (name.to_string(), Value::text(*value)))
        .collect()
}
