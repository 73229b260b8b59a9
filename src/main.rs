//! Post Autosave entry point
//!
//! Handles platform-specific initialization and binds the form.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::rc::Rc;

    use post_autosave::platform::web::{DomForm, LocalStore, dom_ready};
    use post_autosave::{AutosaveConfig, FormAutosaveBinder};

    pub async fn run() {
        console_error_panic_hook::set_once();

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // Everything below touches fields, so wait for the parser first
        if let Err(e) = dom_ready(&document).await {
            web_sys::console::error_1(&format!("Autosave: {}", e).into());
            return;
        }

        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Autosave: logger already set".into());
        }
        log::info!("Post autosave starting...");

        let config = AutosaveConfig::load();
        log::set_max_level(config.log_level().to_level_filter());

        let store = match LocalStore::open() {
            Ok(store) => Rc::new(store),
            Err(e) => {
                log::warn!("Autosave off for this session: {}", e);
                return;
            }
        };

        let mut form = DomForm::new(document);
        let mut binder = FormAutosaveBinder::new(store, &config);
        binder.initialize(&mut form);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::rc::Rc;

    use post_autosave::consts::*;
    use post_autosave::platform::MemoryForm;
    use post_autosave::{AutosaveConfig, FormAutosaveBinder, KeyValueStore, MemoryStore};

    env_logger::init();
    log::info!("Post autosave (native) starting...");
    log::info!("Native mode uses an in-memory form - build for wasm32 and serve the page for the real one");

    let config = AutosaveConfig::load();
    let store: Rc<MemoryStore> = Rc::new(MemoryStore::new());
    let ids: Vec<&str> = config.bindings.iter().map(|b| b.field_id.as_str()).collect();

    // First visit: type a draft
    let mut form = MemoryForm::new(&ids);
    let mut binder = FormAutosaveBinder::new(Rc::clone(&store) as Rc<dyn KeyValueStore>, &config);
    binder.initialize(&mut form);
    if let Err(e) = form
        .type_into(POST_TITLE, "Hello World")
        .and_then(|()| form.select(BACKGROUND_VIDEO, "ocean.mp4"))
    {
        log::error!("Demo edit failed: {}", e);
        return;
    }

    // Reload: fresh form, same store
    let mut form = MemoryForm::new(&ids);
    let mut binder = FormAutosaveBinder::new(Rc::clone(&store) as Rc<dyn KeyValueStore>, &config);
    binder.initialize(&mut form);

    for id in &ids {
        match form.displayed(id) {
            Some(value) => println!("{id}: {value:?}"),
            None => println!("{id}: <absent>"),
        }
    }
}
