use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, SecondsFormat};
use log::{debug, info, warn};

use super::types::{AddLogRequest, JournalEnvelope, PutStatusRequest};
use crate::core::config::ResolvedConfig;
use crate::core::habit::{Habit, Status};

/// Errors that can occur talking to the habit service.
#[derive(Debug)]
pub enum RemoteError {
    /// Client misconfigured (bad URL, TLS setup). Fatal.
    Config(String),
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// The per-call deadline passed before a response arrived.
    Timeout,
    /// Service answered with something other than HTTP 200.
    Api { status: u16, message: String },
    /// Response body didn't match the expected shape.
    Parse(String),
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteError::Config(msg) => write!(f, "client error: {msg}"),
            RemoteError::Network(msg) => write!(f, "network error: {msg}"),
            RemoteError::Timeout => write!(f, "request timed out"),
            RemoteError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            RemoteError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for RemoteError {}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            RemoteError::Timeout
        } else if e.is_decode() {
            RemoteError::Parse(e.to_string())
        } else {
            RemoteError::Network(e.to_string())
        }
    }
}

/// The three calls the app makes against the journal service.
///
/// Every call either completes or fails as a whole; there is no partial
/// result. Write calls hand back the raw HTTP status so the caller decides
/// what counts as success.
#[async_trait]
pub trait HabitClient: Send + Sync {
    async fn fetch_journal(&self, date: DateTime<Local>) -> Result<Vec<Habit>, RemoteError>;

    async fn post_log(
        &self,
        habit_id: &str,
        unit_type: &str,
        value: f64,
        date: DateTime<Local>,
    ) -> Result<u16, RemoteError>;

    async fn put_status(
        &self,
        habit_id: &str,
        status: Status,
        date: DateTime<Local>,
    ) -> Result<u16, RemoteError>;
}

/// Formats a target date the way the service expects (RFC 3339, second precision).
pub fn target_date(date: DateTime<Local>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Habitify REST client.
pub struct HabitifyClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl HabitifyClient {
    /// Creates a client whose every request is bounded by `timeout`.
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Config(e.to_string()))?;
        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &ResolvedConfig) -> Result<Self, RemoteError> {
        Self::new(config.api_key.clone(), config.base_url.clone(), config.timeout)
    }
}

#[async_trait]
impl HabitClient for HabitifyClient {
    async fn fetch_journal(&self, date: DateTime<Local>) -> Result<Vec<Habit>, RemoteError> {
        let url = format!("{}/journal", self.base_url);
        info!("GET {} (target_date={})", url, target_date(date));

        let response = self
            .client
            .get(&url)
            .query(&[("target_date", target_date(date))])
            .header("Authorization", self.api_key.as_str())
            .send()
            .await?;

        let status = response.status().as_u16();
        debug!("Journal response status: {}", status);
        if status != 200 {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Journal fetch failed: {} - {}", status, message);
            return Err(RemoteError::Api { status, message });
        }

        let body = response.text().await?;
        let envelope: JournalEnvelope =
            serde_json::from_str(&body).map_err(|e| RemoteError::Parse(e.to_string()))?;

        if !envelope.status {
            warn!("Journal envelope reported failure: {}", envelope.message);
            return Err(RemoteError::Api {
                status,
                message: envelope.message,
            });
        }
        if !envelope.errors.is_empty() {
            debug!("Journal carried {} non-fatal errors", envelope.errors.len());
        }

        let habits: Vec<Habit> = envelope.data.into_iter().map(Habit::from).collect();
        info!("Fetched {} habits", habits.len());
        Ok(habits)
    }

    async fn post_log(
        &self,
        habit_id: &str,
        unit_type: &str,
        value: f64,
        date: DateTime<Local>,
    ) -> Result<u16, RemoteError> {
        let url = format!("{}/logs/{}", self.base_url, habit_id);
        let body = AddLogRequest {
            unit_type,
            value,
            target_date: target_date(date),
        };
        info!("POST {} value={}", url, value);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.api_key.as_str())
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let message = response.text().await.unwrap_or_default();
            warn!("Log for {} rejected: {} - {}", habit_id, status, message);
        } else {
            debug!("POST {} -> {}", url, status);
        }
        Ok(status)
    }

    async fn put_status(
        &self,
        habit_id: &str,
        status: Status,
        date: DateTime<Local>,
    ) -> Result<u16, RemoteError> {
        let url = format!("{}/status/{}", self.base_url, habit_id);
        let body = PutStatusRequest {
            status,
            target_date: target_date(date),
        };
        info!("PUT {} status={}", url, status);

        let response = self
            .client
            .put(&url)
            .header("Authorization", self.api_key.as_str())
            .json(&body)
            .send()
            .await?;

        let code = response.status().as_u16();
        if code != 200 {
            let message = response.text().await.unwrap_or_default();
            warn!("Status for {} rejected: {} - {}", habit_id, code, message);
        } else {
            debug!("PUT {} -> {}", url, code);
        }
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_date;

    #[test]
    fn test_target_date_is_rfc3339_seconds() {
        let formatted = target_date(test_date());
        assert!(formatted.starts_with("2024-03-05T00:00:00"));
        assert!(DateTime::parse_from_rfc3339(&formatted).is_ok());
    }

    #[test]
    fn test_error_display() {
        let err = RemoteError::Api {
            status: 401,
            message: "Unauthorized".into(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 401): Unauthorized");
        assert_eq!(RemoteError::Timeout.to_string(), "request timed out");
    }

    #[test]
    fn test_new_trims_base_url() {
        let client = HabitifyClient::new(
            "k".into(),
            "http://localhost:1234/".into(),
            Duration::from_secs(1),
        )
        .unwrap();
        assert_eq!(client.base_url, "http://localhost:1234");
    }
}
