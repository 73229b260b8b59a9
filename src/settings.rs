//! Autosave configuration
//!
//! The defaults describe the post generation form. A page can override them by
//! embedding JSON in an element with id `autosave-config`.

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::error::{AutosaveError, Result};
use crate::platform::FieldEvent;

/// Kind of control a binding targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Single-line text input
    Text,
    /// Multi-line textarea
    TextArea,
    /// Select (dropdown)
    Select,
}

impl FieldKind {
    /// Event that signals an edit for this kind of control
    pub fn edit_event(&self) -> FieldEvent {
        match self {
            FieldKind::Text | FieldKind::TextArea => FieldEvent::Input,
            FieldKind::Select => FieldEvent::Change,
        }
    }
}

/// One (field, storage key) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBinding {
    /// DOM id of the control
    pub field_id: String,
    /// LocalStorage key
    pub storage_key: String,
    pub kind: FieldKind,
    /// Shown instead of the absent marker when the key was never written
    #[serde(default)]
    pub fallback: Option<String>,
}

impl FieldBinding {
    /// Binding whose field id doubles as its storage key
    pub fn new(id: &str, kind: FieldKind) -> Self {
        Self {
            field_id: id.to_string(),
            storage_key: id.to_string(),
            kind,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, label: &str) -> Self {
        self.fallback = Some(label.to_string());
        self
    }

    /// What to display for a value read from the store
    pub fn display_value<'a>(&'a self, stored: Option<&'a str>) -> Option<&'a str> {
        stored.or(self.fallback.as_deref())
    }
}

/// Autosave settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutosaveConfig {
    /// Fields to keep in storage
    pub bindings: Vec<FieldBinding>,
    /// `log` level name for the browser console (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            bindings: vec![
                FieldBinding::new(consts::POST_TITLE, FieldKind::Text),
                FieldBinding::new(consts::POST_CONTENT, FieldKind::TextArea),
                FieldBinding::new(consts::BACKGROUND_VIDEO, FieldKind::Select)
                    .with_fallback(consts::VIDEO_FALLBACK_LABEL),
            ],
            log_level: "info".to_string(),
        }
    }
}

impl AutosaveConfig {
    /// Parse config JSON; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| AutosaveError::ConfigParse(e.to_string()))
    }

    /// Configured log level, `Info` when unrecognised
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    /// Binding for a field id
    pub fn binding(&self, field_id: &str) -> Option<&FieldBinding> {
        self.bindings.iter().find(|b| b.field_id == field_id)
    }

    /// Read config from the `autosave-config` element (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(consts::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = json {
            match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded autosave config ({} fields)", config.bindings.len());
                    return config;
                }
                Err(e) => log::warn!("Ignoring autosave config: {}", e),
            }
        }

        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let config = AutosaveConfig::default();
        let ids: Vec<_> = config.bindings.iter().map(|b| b.field_id.as_str()).collect();
        assert_eq!(ids, ["post_title", "post_content", "background_video"]);

        let video = config.binding("background_video").unwrap();
        assert_eq!(video.storage_key, "background_video");
        assert_eq!(video.kind.edit_event(), FieldEvent::Change);
        assert_eq!(
            video.fallback.as_deref(),
            Some("Select a base background video")
        );
        assert_eq!(config.binding("post_title").unwrap().fallback, None);
        assert!(config.binding("post_video").is_none());
    }

    #[test]
    fn test_display_value() {
        let title = FieldBinding::new("post_title", FieldKind::Text);
        assert_eq!(title.display_value(None), None);
        assert_eq!(title.display_value(Some("Hi")), Some("Hi"));

        let video = FieldBinding::new("background_video", FieldKind::Select).with_fallback("pick");
        assert_eq!(video.display_value(None), Some("pick"));
        assert_eq!(video.display_value(Some("")), Some(""));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AutosaveConfig::from_json(r#"{"log_level": "debug"}"#).unwrap();
        assert_eq!(config.log_level(), log::Level::Debug);
        assert_eq!(config.bindings, AutosaveConfig::default().bindings);
    }

    #[test]
    fn test_custom_bindings() {
        let json = r#"{
            "bindings": [
                {"field_id": "title", "storage_key": "draft.title", "kind": "text"},
                {"field_id": "video", "storage_key": "draft.video", "kind": "select", "fallback": "None"}
            ]
        }"#;
        let config = AutosaveConfig::from_json(json).unwrap();
        assert_eq!(config.bindings.len(), 2);
        assert_eq!(config.bindings[0].storage_key, "draft.title");
        assert_eq!(config.bindings[0].fallback, None);
        assert_eq!(config.bindings[1].kind, FieldKind::Select);
        assert_eq!(config.log_level(), log::Level::Info);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            AutosaveConfig::from_json("{bindings"),
            Err(AutosaveError::ConfigParse(_))
        ));
        let config = AutosaveConfig::from_json(r#"{"log_level": "loud"}"#).unwrap();
        assert_eq!(config.log_level(), log::Level::Info);
    }
}
