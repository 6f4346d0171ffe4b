// ============================================================================
// reactive-mv - Content Switcher
// Multiplexes the selected branch of a content map into a family of
// synchronized derived keys
// ============================================================================

use std::rc::Rc;

use crate::cloned;
use crate::core::error::{Error, Result};
use crate::core::value::Value;
use crate::view::widget::{Clickable, InputWidget};
use crate::view::View;

impl View {
    /// Build a content switcher over `contents_key`.
    ///
    /// `contents_key` must hold a `Value::Contents` map (branch id ->
    /// field map) whose branches all share one field set; anything else
    /// fails with `InvalidContents` before any derived key is registered.
    /// `clickables` select the active branch: clicking a widget writes its
    /// label to the switcher's active-branch key.
    ///
    /// For every field the switcher registers a derived key and two links:
    ///
    /// - forward: a change of the active branch copies that branch's
    ///   field value into the derived key;
    /// - backward: a change of the derived key is written in place into
    ///   the active branch of the *original* content map - a deliberate
    ///   side channel that never notifies observers of `contents_key`.
    ///
    /// Switching branches makes the forward link fire the backward link,
    /// which re-writes the value it just read into the already-updated
    /// active branch: a harmless self-write. The map write notifies
    /// nobody, and any echo into an observable dies at the equality gate
    /// in `Observable::set`, so propagation always terminates.
    ///
    /// The derived keys are namespaced with a suffix from the model's
    /// allocator; two switchers never share keys, even over the same
    /// contents key.
    pub fn add_content_switcher(
        &self,
        contents_key: &str,
        clickables: &[Rc<dyn Clickable>],
    ) -> Result<ContentSwitcher> {
        let unique = self.model().next_unique_key();
        let active_key = format!("contentSwitcher-{unique}-{contents_key}-active");

        let contents = match self.model().get(contents_key)? {
            Value::Contents(contents) => contents,
            other => {
                return Err(Error::invalid_contents(format!(
                    "key [{contents_key}] holds {} where a content map was expected",
                    other.kind()
                )));
            }
        };
        let fields = contents.uniform_fields()?;

        self.model().add_key_default(&active_key)?;
        self.add_grouped_clickable(&active_key, clickables)?;

        for field in &fields {
            let derived_key = format!("{active_key}{field}");
            self.model().add_key_default(&derived_key)?;

            // Forward link: active branch -> derived key.
            let model = Rc::downgrade(self.model());
            self.model().observe(
                &active_key,
                cloned!(contents, derived_key, field => move |branch: &Value| {
                    let Some(model) = model.upgrade() else { return };
                    let Some(id) = branch.as_str() else {
                        log::warn!("active key for [{derived_key}] holds {}, not a branch id", branch.kind());
                        return;
                    };
                    match contents.field(id, &field) {
                        Some(value) => {
                            if let Err(err) = model.set(&derived_key, value) {
                                log::warn!("forward link into [{derived_key}] failed: {err}");
                            }
                        }
                        None => log::warn!("branch [{id}] missing from contents behind [{derived_key}]"),
                    }
                }),
            )?;

            // Backward link: derived key -> in-place edit of the active
            // branch. With no branch selected this is a strict no-op.
            let model = Rc::downgrade(self.model());
            self.model().observe(
                &derived_key,
                cloned!(contents, active_key, field => move |value: &Value| {
                    let Some(model) = model.upgrade() else { return };
                    let Ok(active) = model.get(&active_key) else { return };
                    if !active.is_truthy() {
                        return;
                    }
                    let id = active.to_text();
                    if !contents.set_field(&id, &field, value.clone()) {
                        log::warn!("backward link dropped write: branch [{id}] has no field [{field}]");
                    }
                }),
            )?;
        }

        Ok(ContentSwitcher {
            view: View::new(self.model().clone()),
            active_key,
            fields,
        })
    }
}

// =============================================================================
// CONTENT SWITCHER HANDLE
// =============================================================================

/// Handle to one content switcher: binds widgets to the switcher's derived
/// keys and drives branch selection programmatically.
///
/// Field names here are the content map's field names; the handle maps
/// them onto the namespaced derived keys of its own switcher instance.
pub struct ContentSwitcher {
    view: View,
    active_key: String,
    fields: Vec<String>,
}

impl ContentSwitcher {
    /// Two-way bind a widget to a derived field key.
    pub fn add_input(&self, field: &str, widget: InputWidget) -> Result<()> {
        self.view.add_input(&self.derived_key(field), widget)
    }

    /// One-way bind a widget to a derived field key.
    pub fn add_output(&self, field: &str, widget: InputWidget) -> Result<()> {
        self.view.add_output(&self.derived_key(field), widget)
    }

    /// Select a branch, as if a clickable with this label were clicked.
    /// Returns whether the selection changed.
    pub fn switch_to(&self, branch: &str) -> Result<bool> {
        self.view.model().set(&self.active_key, Value::text(branch))
    }

    /// The model key holding the currently selected branch id.
    pub fn active_key(&self) -> &str {
        &self.active_key
    }

    /// The currently selected branch id (`Null` before any selection).
    pub fn active_branch(&self) -> Result<Value> {
        self.view.model().get(&self.active_key)
    }

    /// The field names sampled from the content map, in derived-key
    /// registration order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The namespaced model key backing `field`.
    pub fn derived_key(&self, field: &str) -> String {
        format!("{}{}", self.active_key, field)
    }
}
