//! Error type shared by the store, platform and config layers.

/// Errors produced while loading config, talking to the store, or wiring fields.
#[derive(Debug, thiserror::Error)]
pub enum AutosaveError {
    /// The persistence store cannot be reached at all (disabled by host policy, no window).
    #[error("storage unavailable: {0}")]
    StoreUnavailable(String),

    /// Reading a key failed.
    #[error("failed to read key {key}: {reason}")]
    StoreRead { key: String, reason: String },

    /// Writing a key failed (quota, private mode, ...).
    #[error("failed to write key {key}: {reason}")]
    StoreWrite { key: String, reason: String },

    /// No element with this id exists in the host form.
    #[error("form field not found: {0}")]
    MissingField(String),

    /// Attaching a change listener failed.
    #[error("failed to subscribe to {field_id}: {reason}")]
    Subscribe { field_id: String, reason: String },

    /// The autosave config JSON could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),
}

pub type Result<T> = std::result::Result<T, AutosaveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_key() {
        let err = AutosaveError::StoreWrite {
            key: "post_title".to_string(),
            reason: "QuotaExceededError".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to write key post_title: QuotaExceededError"
        );
        assert_eq!(
            AutosaveError::MissingField("background_video".into()).to_string(),
            "form field not found: background_video"
        );
    }
}
