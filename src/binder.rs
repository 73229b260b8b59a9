//! Form autosave binder
//!
//! Keeps each bound control in sync with its storage key:
//! - on start, stored values are loaded into the controls
//! - on every edit, the control's value is written back to its key

use std::rc::Rc;

use crate::persistence::KeyValueStore;
use crate::platform::{FormField, FormHost};
use crate::settings::{AutosaveConfig, FieldBinding};

/// Binder lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinderState {
    #[default]
    Uninitialized,
    /// Listeners attached; stays here until the page unloads
    Bound,
}

/// Binds form controls to a key-value store
pub struct FormAutosaveBinder {
    store: Rc<dyn KeyValueStore>,
    bindings: Vec<FieldBinding>,
    state: BinderState,
    /// Fields that got a listener on the Uninitialized -> Bound transition
    bound: usize,
}

impl FormAutosaveBinder {
    pub fn new(store: Rc<dyn KeyValueStore>, config: &AutosaveConfig) -> Self {
        Self {
            store,
            bindings: config.bindings.clone(),
            state: BinderState::Uninitialized,
            bound: 0,
        }
    }

    pub fn state(&self) -> BinderState {
        self.state
    }

    pub fn bindings(&self) -> &[FieldBinding] {
        &self.bindings
    }

    /// Load stored values into the controls, then attach edit listeners.
    ///
    /// Listeners are attached only on the first call; later calls just reload
    /// values. Returns the number of fields bound, which later calls leave unchanged.
    pub fn initialize<H: FormHost>(&mut self, host: &mut H) -> usize {
        self.restore(host);

        if self.state == BinderState::Bound {
            log::debug!("Autosave already bound, values reloaded");
            return self.bound;
        }

        let mut bound = 0;
        for binding in &self.bindings {
            let Some(field) = host.field(&binding.field_id) else {
                continue;
            };

            let store = Rc::clone(&self.store);
            let handler_binding = binding.clone();
            let event = binding.kind.edit_event();
            let result = host.subscribe(
                &binding.field_id,
                event,
                Box::new(move || persist(store.as_ref(), &handler_binding, field.as_ref())),
            );

            match result {
                Ok(()) => bound += 1,
                Err(e) => log::warn!("Autosave disabled for {}: {}", binding.field_id, e),
            }
        }

        self.state = BinderState::Bound;
        self.bound = bound;
        log::info!("Autosave bound {} of {} fields", bound, self.bindings.len());
        bound
    }

    /// Load stored values into the controls without attaching listeners.
    ///
    /// Missing controls are skipped. A failed read leaves the control as it is.
    /// Returns the number of controls found on the page.
    pub fn restore<H: FormHost>(&self, host: &H) -> usize {
        let mut found = 0;
        for binding in &self.bindings {
            let Some(field) = host.field(&binding.field_id) else {
                log::warn!("Autosave field #{} not found, skipping", binding.field_id);
                continue;
            };
            found += 1;

            match self.store.get(&binding.storage_key) {
                Ok(stored) => field.set_value(binding.display_value(stored.as_deref())),
                Err(e) => log::warn!("Could not restore {}: {}", binding.field_id, e),
            }
        }
        found
    }

    /// Write the control's current value to its storage key
    pub fn on_field_edited(&self, binding: &FieldBinding, field: &dyn FormField) {
        persist(self.store.as_ref(), binding, field);
    }
}

/// Store write shared by the binder and the listeners it registers
fn persist(store: &dyn KeyValueStore, binding: &FieldBinding, field: &dyn FormField) {
    let value = field.value();
    match store.set(&binding.storage_key, &value) {
        Ok(()) => log::trace!("Saved {} ({} bytes)", binding.storage_key, value.len()),
        Err(e) => log::warn!("Autosave write dropped: {}", e),
    }
}
