//! In-memory form used natively and in tests

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::{FieldEvent, FieldHandler, FormField, FormHost};
use crate::error::{AutosaveError, Result};

/// A control holding its displayed value
#[derive(Debug, Default)]
pub struct MemoryField {
    displayed: RefCell<Option<String>>,
}

impl MemoryField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Displayed value, keeping the absent marker distinct from `""`
    pub fn displayed(&self) -> Option<String> {
        self.displayed.borrow().clone()
    }
}

impl FormField for MemoryField {
    fn value(&self) -> String {
        self.displayed.borrow().clone().unwrap_or_default()
    }

    fn set_value(&self, value: Option<&str>) {
        *self.displayed.borrow_mut() = value.map(str::to_string);
    }
}

struct Listener {
    field_id: String,
    event: FieldEvent,
    handler: FieldHandler,
}

/// A form made of [`MemoryField`]s with synchronous event dispatch
#[derive(Default)]
pub struct MemoryForm {
    fields: HashMap<String, Rc<MemoryField>>,
    listeners: Vec<Listener>,
}

impl MemoryForm {
    /// Create a form with one empty control per id
    pub fn new(ids: &[&str]) -> Self {
        let fields = ids
            .iter()
            .map(|id| (id.to_string(), Rc::new(MemoryField::new())))
            .collect();
        Self {
            fields,
            listeners: Vec::new(),
        }
    }

    /// Concrete handle to a control, for inspecting the displayed value
    pub fn memory_field(&self, id: &str) -> Option<Rc<MemoryField>> {
        self.fields.get(id).cloned()
    }

    /// Displayed value of `id`; `None` if the field is missing or shows the absent marker
    pub fn displayed(&self, id: &str) -> Option<String> {
        self.fields.get(id).and_then(|f| f.displayed())
    }

    /// Number of registered listeners across all fields
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Simulate the user typing: replace the value, then fire `input`
    pub fn type_into(&mut self, id: &str, text: &str) -> Result<()> {
        self.edit(id, text, FieldEvent::Input)
    }

    /// Simulate the user picking an option: replace the value, then fire `change`
    pub fn select(&mut self, id: &str, option: &str) -> Result<()> {
        self.edit(id, option, FieldEvent::Change)
    }

    fn edit(&mut self, id: &str, value: &str, event: FieldEvent) -> Result<()> {
        let field = self
            .fields
            .get(id)
            .ok_or_else(|| AutosaveError::MissingField(id.to_string()))?;
        field.set_value(Some(value));
        self.dispatch(id, event);
        Ok(())
    }

    /// Fire `event` on `id` without touching its value
    pub fn dispatch(&mut self, id: &str, event: FieldEvent) {
        for listener in self
            .listeners
            .iter_mut()
            .filter(|l| l.field_id == id && l.event == event)
        {
            (listener.handler)();
        }
    }
}

impl FormHost for MemoryForm {
    fn field(&self, id: &str) -> Option<Rc<dyn FormField>> {
        self.fields
            .get(id)
            .map(|f| Rc::clone(f) as Rc<dyn FormField>)
    }

    fn subscribe(&mut self, id: &str, event: FieldEvent, handler: FieldHandler) -> Result<()> {
        if !self.fields.contains_key(id) {
            return Err(AutosaveError::Subscribe {
                field_id: id.to_string(),
                reason: "no such field".to_string(),
            });
        }
        self.listeners.push(Listener {
            field_id: id.to_string(),
            event,
            handler,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_absent_marker_differs_from_empty() {
        let field = MemoryField::new();
        assert_eq!(field.displayed(), None);
        assert_eq!(field.value(), "");

        field.set_value(Some(""));
        assert_eq!(field.displayed(), Some(String::new()));
    }

    #[test]
    fn test_dispatch_matches_field_and_event() {
        let mut form = MemoryForm::new(&["post_title", "background_video"]);
        let hits = Rc::new(Cell::new(0));

        let counter = Rc::clone(&hits);
        form.subscribe(
            "post_title",
            FieldEvent::Input,
            Box::new(move || counter.set(counter.get() + 1)),
        )
        .unwrap();

        form.type_into("post_title", "a").unwrap();
        form.dispatch("post_title", FieldEvent::Change);
        form.select("background_video", "ocean.mp4").unwrap();

        assert_eq!(hits.get(), 1);
        assert_eq!(form.displayed("post_title").as_deref(), Some("a"));
        assert_eq!(
            form.displayed("background_video").as_deref(),
            Some("ocean.mp4")
        );
    }

    #[test]
    fn test_unknown_field() {
        let mut form = MemoryForm::new(&["post_title"]);
        assert!(form.field("post_video").is_none());
        assert!(matches!(
            form.type_into("post_video", "x"),
            Err(AutosaveError::MissingField(_))
        ));
        assert!(form
            .subscribe("post_video", FieldEvent::Change, Box::new(|| {}))
            .is_err());
        assert_eq!(form.listener_count(), 0);
    }
}
