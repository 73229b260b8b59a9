//! Post Autosave - keeps the post generation form across page loads
//!
//! Core modules:
//! - `binder`: Loads stored values into the form and saves every edit
//! - `persistence`: Key-value store seam (LocalStorage on web, memory elsewhere)
//! - `platform`: Browser/native form abstraction
//! - `settings`: Field bindings and log level

pub mod binder;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod settings;

pub use binder::{BinderState, FormAutosaveBinder};
pub use error::AutosaveError;
pub use persistence::{KeyValueStore, MemoryStore};
pub use settings::{AutosaveConfig, FieldBinding, FieldKind};

/// Form and storage names used by the page
pub mod consts {
    /// Post title input, also its storage key
    pub const POST_TITLE: &str = "post_title";
    /// Post content textarea, also its storage key
    pub const POST_CONTENT: &str = "post_content";
    /// Background video select, also its storage key
    pub const BACKGROUND_VIDEO: &str = "background_video";

    /// Shown in the video select until a video has been picked once
    pub const VIDEO_FALLBACK_LABEL: &str = "Select a base background video";

    /// Element whose text content may hold a JSON `AutosaveConfig`
    pub const CONFIG_ELEMENT_ID: &str = "autosave-config";
}
