//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Form fields (read value, write value)
//! - Change notifications
//! - Storage (LocalStorage on web)

pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::rc::Rc;

use crate::error::Result;

pub use memory::{MemoryField, MemoryForm};

/// Change notification a field emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldEvent {
    /// Every keystroke-level edit of a text control
    Input,
    /// A committed selection change
    Change,
}

impl FieldEvent {
    /// DOM event type name
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldEvent::Input => "input",
            FieldEvent::Change => "change",
        }
    }
}

/// A single bound control
pub trait FormField {
    /// Current value as the user sees it
    fn value(&self) -> String;

    /// Display a value. `None` is the absent marker read from an unset key.
    fn set_value(&self, value: Option<&str>);
}

/// Callback run synchronously each time the subscribed event fires
pub type FieldHandler = Box<dyn FnMut()>;

/// The page hosting the form
pub trait FormHost {
    /// Look up a control by id
    fn field(&self, id: &str) -> Option<Rc<dyn FormField>>;

    /// Register `handler` for `event` on the control `id`. Lives until the page unloads.
    fn subscribe(&mut self, id: &str, event: FieldEvent, handler: FieldHandler) -> Result<()>;
}
