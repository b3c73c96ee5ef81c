use crate::calendar::RawCalendarEntry;
use crate::storage::config::GoogleConfig;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::Error as _;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Provider reported an error: {0}")]
    Provider(ProviderError),
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
}

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

/// Error descriptor found in the top-level `error` member of a provider response.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Error)]
#[error("{message} (code: {code:?}, status: {status:?})")]
pub struct ProviderError {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub errors: Vec<ProviderErrorItem>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ProviderErrorItem {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ProviderError {
    pub fn from_value(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(message) => Self {
                message: message.clone(),
                ..Self::default()
            },
            other => serde_json::from_value(other.clone()).unwrap_or_else(|_| Self {
                message: other.to_string(),
                ..Self::default()
            }),
        }
    }

    pub fn from_status(status: StatusCode) -> Self {
        Self {
            code: Some(status.as_u16()),
            message: status.canonical_reason().unwrap_or("Unknown status").to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Deserialize)]
struct EventListResponse {
    #[serde(default)]
    items: Option<Vec<RawCalendarEntry>>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalendarFeed: Send + Sync {
    async fn fetch_events(&self) -> Result<Vec<RawCalendarEntry>, FetchError>;
}

pub struct GoogleCalendarFeed {
    base_url: String,
    calendar_id: String,
    api_key: String,
    client: reqwest::Client,
}

impl GoogleCalendarFeed {
    pub fn new(api_key: String, calendar_id: String) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            calendar_id,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &GoogleConfig) -> Self {
        Self::new(config.api_key.clone(), config.calendar_id.clone())
            .with_base_url(config.base_url.clone())
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn events_url(&self) -> String {
        format!(
            "{}/calendars/{}/events",
            self.base_url,
            urlencoding::encode(&self.calendar_id)
        )
    }
}

#[async_trait]
impl CalendarFeed for GoogleCalendarFeed {
    async fn fetch_events(&self) -> Result<Vec<RawCalendarEntry>, FetchError> {
        let url = self.events_url();

        tracing::info!("Fetching events for calendar {}", self.calendar_id);

        let response = self.client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("orderBy", "startTime"),
                ("singleEvents", "true"),
            ])
            .send()
            .await
            .map_err(NetworkError::from)?;

        let status = response.status();
        tracing::info!("Fetch events response status: {}", status);

        let body = response.text().await.map_err(NetworkError::from)?;
        let entries = parse_event_list(status, &body)?;

        tracing::info!("Fetched {} events successfully", entries.len());
        Ok(entries)
    }
}

/// Decodes an events list body. A provider `error` member wins over everything
/// else; a body that is not JSON or does not match the expected shape is a
/// network-kind failure.
pub fn parse_event_list(status: StatusCode, body: &str) -> Result<Vec<RawCalendarEntry>, FetchError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        tracing::error!("Response body is not JSON. Status: {}, Error: {}", status, e);
        NetworkError::from(e)
    })?;

    if !value.is_object() {
        tracing::error!("Events response is not a JSON object. Status: {}", status);
        let error = serde_json::Error::custom("expected an events list object");
        return Err(NetworkError::from(error).into());
    }

    if let Some(error) = value.get("error").filter(|e| is_present(e)) {
        let provider_error = ProviderError::from_value(error);
        tracing::error!("Google Calendar API error: {:?}", provider_error);
        return Err(FetchError::Provider(provider_error));
    }

    if !status.is_success() {
        tracing::error!("Failed to fetch events. Status: {}, Body: {}", status, body);
        return Err(FetchError::Provider(ProviderError::from_status(status)));
    }

    let event_list: EventListResponse = serde_json::from_value(value).map_err(|e| {
        tracing::error!("Events response has unexpected shape: {}", e);
        NetworkError::from(e)
    })?;

    Ok(event_list.items.unwrap_or_default())
}

/// `null`, `false`, `0` and `""` mark an error member as absent.
fn is_present(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(flag) => *flag,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
