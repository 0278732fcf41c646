use thiserror::Error;

/// Errors returned by the action gateway client.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway executed the action and reported it as unsuccessful.
    #[error("action {action} failed: {message}")]
    Api { action: String, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}
