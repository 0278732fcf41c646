//! HTTP client for the action gateway.
//!
//! Every integration call is `POST {base}/actions/{ACTION}/execute` with the
//! API key in `x-api-key` and a `{"entityId", "input"}` body. Calls are made
//! exactly once; there is no retry layer.

use std::time::Duration;

use adsync_core::config::DEFAULT_COMPOSIO_BASE_URL;
use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value;

use crate::error::ActionError;
use crate::types::{ActionResponse, ExecuteRequest};

const DEFAULT_ENTITY_ID: &str = "default";

/// Client for the action gateway.
///
/// Use [`ComposioClient::new`] for production or
/// [`ComposioClient::with_base_url`] to point at a mock server in tests.
pub struct ComposioClient {
    client: Client,
    api_key: String,
    base_url: Url,
    pub(crate) ads_entity_id: String,
    pub(crate) sheets_entity_id: String,
}

impl ComposioClient {
    /// Creates a client pointed at the production gateway.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, ActionError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_COMPOSIO_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ActionError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ActionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("adsync/0.1 (campaign-report)")
            .build()?;

        // Exactly one trailing slash so `Url::join` appends instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| ActionError::InvalidBaseUrl(format!("'{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            ads_entity_id: DEFAULT_ENTITY_ID.to_owned(),
            sheets_entity_id: DEFAULT_ENTITY_ID.to_owned(),
        })
    }

    /// Sets the connected-account entities used for ads and sheets actions.
    #[must_use]
    pub fn with_entity_ids(mut self, ads_entity_id: &str, sheets_entity_id: &str) -> Self {
        ads_entity_id.clone_into(&mut self.ads_entity_id);
        sheets_entity_id.clone_into(&mut self.sheets_entity_id);
        self
    }

    /// Executes `action` for `entity_id` and returns the envelope payload.
    ///
    /// # Errors
    ///
    /// - [`ActionError::Http`] on network failure or non-2xx HTTP status.
    /// - [`ActionError::Deserialize`] if the body is not a valid envelope.
    /// - [`ActionError::Api`] if the gateway reports the action as failed.
    pub(crate) async fn execute<I: Serialize>(
        &self,
        action: &str,
        entity_id: &str,
        input: &I,
    ) -> Result<Option<Value>, ActionError> {
        let url = self.action_url(action)?;
        tracing::debug!(action, entity_id, "executing action");

        let response = self
            .client
            .post(url)
            .header("x-api-key", &self.api_key)
            .json(&ExecuteRequest { entity_id, input })
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let envelope: ActionResponse =
            serde_json::from_str(&body).map_err(|e| ActionError::Deserialize {
                context: action.to_string(),
                source: e,
            })?;
        envelope.into_data(action)
    }

    fn action_url(&self, action: &str) -> Result<Url, ActionError> {
        self.base_url
            .join(&format!("actions/{action}/execute"))
            .map_err(|e| ActionError::InvalidBaseUrl(format!("{}: {e}", self.base_url)))
    }
}
