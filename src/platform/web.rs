//! Browser platform: LocalStorage and DOM form controls

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, DocumentReadyState, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    Storage,
};

use super::{FieldEvent, FieldHandler, FormField, FormHost};
use crate::error::{AutosaveError, Result};
use crate::persistence::KeyValueStore;

/// Render a JS exception for logs
fn js_reason(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

/// `window.localStorage`
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    /// Fails when there is no window or storage is disabled (e.g. blocked cookies)
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| AutosaveError::StoreUnavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| AutosaveError::StoreUnavailable(js_reason(&e)))?
            .ok_or_else(|| AutosaveError::StoreUnavailable("localStorage is null".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| AutosaveError::StoreRead {
                key: key.to_string(),
                reason: js_reason(&e),
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| AutosaveError::StoreWrite {
                key: key.to_string(),
                reason: js_reason(&e),
            })
    }
}

/// A form control found by id
pub enum DomField {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
    Select(HtmlSelectElement),
}

impl DomField {
    fn from_element(element: web_sys::Element) -> Option<Self> {
        let element = match element.dyn_into::<HtmlInputElement>() {
            Ok(input) => return Some(DomField::Input(input)),
            Err(element) => element,
        };
        let element = match element.dyn_into::<HtmlTextAreaElement>() {
            Ok(area) => return Some(DomField::TextArea(area)),
            Err(element) => element,
        };
        element.dyn_into::<HtmlSelectElement>().ok().map(DomField::Select)
    }

    fn target(&self) -> &web_sys::EventTarget {
        match self {
            DomField::Input(el) => el.as_ref(),
            DomField::TextArea(el) => el.as_ref(),
            DomField::Select(el) => el.as_ref(),
        }
    }
}

impl FormField for DomField {
    fn value(&self) -> String {
        match self {
            DomField::Input(el) => el.value(),
            DomField::TextArea(el) => el.value(),
            DomField::Select(el) => el.value(),
        }
    }

    // The DOM has no null value; assigning null to `.value` yields "" too
    fn set_value(&self, value: Option<&str>) {
        let value = value.unwrap_or_default();
        match self {
            DomField::Input(el) => el.set_value(value),
            DomField::TextArea(el) => el.set_value(value),
            DomField::Select(el) => el.set_value(value),
        }
    }
}

/// The page's document
pub struct DomForm {
    document: Document,
}

impl DomForm {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn dom_field(&self, id: &str) -> Option<DomField> {
        self.document
            .get_element_by_id(id)
            .and_then(DomField::from_element)
    }
}

impl FormHost for DomForm {
    fn field(&self, id: &str) -> Option<Rc<dyn FormField>> {
        self.dom_field(id).map(|f| Rc::new(f) as Rc<dyn FormField>)
    }

    fn subscribe(&mut self, id: &str, event: FieldEvent, mut handler: FieldHandler) -> Result<()> {
        let field = self
            .dom_field(id)
            .ok_or_else(|| AutosaveError::MissingField(id.to_string()))?;

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| handler());
        field
            .target()
            .add_event_listener_with_callback(event.as_str(), closure.as_ref().unchecked_ref())
            .map_err(|e| AutosaveError::Subscribe {
                field_id: id.to_string(),
                reason: js_reason(&e),
            })?;
        // Listener lives as long as the page
        closure.forget();
        Ok(())
    }
}

/// Resolve once the document is parsed (`DOMContentLoaded`)
pub async fn dom_ready(document: &Document) -> Result<()> {
    if document.ready_state() != DocumentReadyState::Loading {
        return Ok(());
    }
    once_event(document, "DOMContentLoaded").await
}

/// Resolve the first time `target` fires `event`.
///
/// The listener is attached before this returns, so events fired before the
/// future is first polled still count.
fn once_event(
    target: &web_sys::EventTarget,
    event: &'static str,
) -> impl std::future::Future<Output = Result<()>> {
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let closure = Closure::once(move |_event: web_sys::Event| {
            let _ = resolve.call0(&JsValue::NULL);
        });
        // Without a listener the promise would never settle
        if let Err(e) =
            target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            let _ = reject.call1(&JsValue::NULL, &e);
        }
        closure.forget();
    });

    async move {
        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| AutosaveError::Subscribe {
                field_id: event.to_string(),
                reason: js_reason(&e),
            })
    }
}
