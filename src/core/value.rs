// ============================================================================
// reactive-mv - Store Values
// The dynamically-typed value held by every model key, plus the shared
// content-map handle used by the content switcher.
// ============================================================================

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use super::error::{Error, Result};

/// One branch of a content map: field name -> value.
pub type FieldMap = BTreeMap<String, Value>;

/// A full content map: branch id -> field map.
pub type ContentMap = BTreeMap<String, FieldMap>;

// =============================================================================
// VALUE
// =============================================================================

/// A dynamically-typed store value.
///
/// `Null` is the unset state every freshly added key starts in. `Contents`
/// holds a *shared* handle to a content map; cloning the value clones the
/// handle, not the map.
///
/// # Example
///
/// ```
/// use reactive_mv::Value;
///
/// let v = Value::from("1");
/// assert!(reactive_mv::coercive_equals(&v, &Value::Number(1.0)));
/// ```
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Contents(Contents),
}

impl Value {
    /// Build a text value from anything string-like.
    pub fn text(text: impl Into<String>) -> Self {
        Value::Text(text.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_contents(&self) -> Option<&Contents> {
        match self {
            Value::Contents(contents) => Some(contents),
            _ => None,
        }
    }

    /// Short kind name, used in error and log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Contents(_) => "contents",
        }
    }

    /// Truthiness, matching the comparison rules of the store: `Null`,
    /// `false`, `0`, NaN and the empty string are falsy. A `Contents`
    /// handle is always truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Text(text) => !text.is_empty(),
            Value::Contents(_) => true,
        }
    }

    /// Render the value the way a text widget displays it. `Null` renders
    /// empty; whole numbers render without a decimal point.
    pub fn to_text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.007_199_254_740_992e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            Value::Text(text) => text.clone(),
            Value::Contents(_) => String::from("[contents]"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<Contents> for Value {
    fn from(contents: Contents) -> Self {
        Value::Contents(contents)
    }
}

/// Strict equality for assertions: same variant, equal payload. `Contents`
/// compares by handle identity, never structurally.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Contents(a), Value::Contents(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

// =============================================================================
// COERCIVE EQUALITY
// =============================================================================

/// The store's change-detection rule: a deliberately loose, coercive
/// comparison. `Number(1.0)` equals `Text("1")`, `Bool(false)` equals
/// `Text("")`. Unusual, but load-bearing: every equality gate in the
/// notification engine uses this rule, and the content-switcher's cycle
/// termination depends on it.
///
/// Rules:
/// - `Null` equals only `Null`.
/// - `Text` vs `Text` is plain string equality.
/// - `Contents` compares by handle identity, and never equals other kinds.
/// - Any remaining mix of `Bool`/`Number`/`Text` compares numerically:
///   booleans coerce to 0/1, text coerces via trimmed parse (empty text
///   to 0, unparseable text to NaN).
/// - NaN equals NaN, so a NaN-valued key does not notify on every re-set.
pub fn coercive_equals(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Contents(x), Value::Contents(y)) => x.ptr_eq(y),
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Contents(_), _) | (_, Value::Contents(_)) => false,
        (Value::Text(x), Value::Text(y)) => x == y,
        _ => numbers_equal(to_number(a), to_number(b)),
    }
}

fn numbers_equal(a: f64, b: f64) -> bool {
    if a.is_nan() {
        return b.is_nan();
    }
    a == b
}

fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Number(n) => *n,
        Value::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse().unwrap_or(f64::NAN)
            }
        }
        Value::Contents(_) => f64::NAN,
    }
}

// =============================================================================
// CONTENTS
// =============================================================================

/// A shared handle to a content map (branch id -> field map).
///
/// Clones share one underlying map. This is the content switcher's
/// mutation side channel: backward links edit the map in place through
/// `set_field`, and nobody observing the model key that holds the handle
/// is notified of those edits.
#[derive(Clone)]
pub struct Contents {
    inner: Rc<RefCell<ContentMap>>,
}

impl Contents {
    pub fn new(map: ContentMap) -> Self {
        Self {
            inner: Rc::new(RefCell::new(map)),
        }
    }

    /// Handle identity: do both handles point at the same map?
    pub fn ptr_eq(&self, other: &Contents) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub fn branch_ids(&self) -> Vec<String> {
        self.inner.borrow().keys().cloned().collect()
    }

    /// Clone of one nested field value, `None` if the branch or field is
    /// absent.
    pub fn field(&self, branch: &str, field: &str) -> Option<Value> {
        self.inner
            .borrow()
            .get(branch)
            .and_then(|fields| fields.get(field))
            .cloned()
    }

    /// In-place write to an *existing* slot. Returns `false` without
    /// touching the map if the branch or field is absent; a write never
    /// creates slots and never notifies anyone.
    pub fn set_field(&self, branch: &str, field: &str, value: Value) -> bool {
        let mut map = self.inner.borrow_mut();
        match map.get_mut(branch).and_then(|fields| fields.get_mut(field)) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// The field set shared by every branch, in deterministic order.
    ///
    /// Fails fast if the map is empty or if any branch's field set differs
    /// from the first branch's. Heterogeneous content maps are invalid
    /// input to the content switcher, not a silent subset.
    pub fn uniform_fields(&self) -> Result<Vec<String>> {
        let map = self.inner.borrow();
        let mut branches = map.iter();
        let Some((first_id, first)) = branches.next() else {
            return Err(Error::invalid_contents("content map is empty"));
        };
        let fields: Vec<String> = first.keys().cloned().collect();
        for (id, branch) in branches {
            let same = branch.len() == fields.len()
                && branch.keys().zip(fields.iter()).all(|(a, b)| a == b);
            if !same {
                return Err(Error::invalid_contents(format!(
                    "branch [{id}] field set differs from branch [{first_id}]"
                )));
            }
        }
        Ok(fields)
    }

    /// Read access to the whole map without cloning it.
    pub fn with_map<R>(&self, f: impl FnOnce(&ContentMap) -> R) -> R {
        f(&self.inner.borrow())
    }
}

impl fmt::Debug for Contents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Contents")
            .field("branches", &self.branch_ids())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
