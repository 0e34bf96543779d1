//! HTTP client for the school-management backend's calendar endpoints.

use async_trait::async_trait;
use log::info;
use reqwest::{Client, Response};
use shared::{CalendarEventDraft, MessageResponse, SaveEventRequest, SaveEventResponse};

use crate::api::{CalendarApi, EventsByDate};
use crate::error::{FetchError, WriteError};

/// API client for the `/calendar` resource.
#[derive(Debug, Clone)]
pub struct HttpCalendarApi {
    http: Client,
    base_url: String,
    /// Admin id stamped onto every write, per the backend's body shape.
    admin_id: i64,
}

impl HttpCalendarApi {
    /// Create a client for the given base URL and admin session.
    pub fn new(base_url: impl Into<String>, admin_id: i64) -> Self {
        Self::with_client(Client::new(), base_url, admin_id)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(http: Client, base_url: impl Into<String>, admin_id: i64) -> Self {
        let base_url: String = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            admin_id,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl CalendarApi for HttpCalendarApi {
    async fn fetch_events(&self) -> Result<EventsByDate, FetchError> {
        let response = self
            .http
            .get(self.url("/calendar"))
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = read_server_message(response).await;
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<EventsByDate>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }

    async fn create_event(&self, draft: &CalendarEventDraft) -> Result<(), WriteError> {
        let body = SaveEventRequest::from_draft(draft, self.admin_id);
        let response = self
            .http
            .post(self.url("/calendar"))
            .json(&body)
            .send()
            .await
            .map_err(|e| WriteError::Network(e.to_string()))?;

        let response = ensure_write_ok(response).await?;
        if let Ok(ack) = response.json::<SaveEventResponse>().await {
            info!("📅 CALENDAR API: create acknowledged: {}", ack.message);
        }
        Ok(())
    }

    async fn update_event(&self, id: i64, draft: &CalendarEventDraft) -> Result<(), WriteError> {
        let body = SaveEventRequest::from_draft(draft, self.admin_id);
        let response = self
            .http
            .put(self.url(&format!("/calendar/{}", id)))
            .json(&body)
            .send()
            .await
            .map_err(|e| WriteError::Network(e.to_string()))?;

        let response = ensure_write_ok(response).await?;
        if let Ok(ack) = response.json::<SaveEventResponse>().await {
            info!("📅 CALENDAR API: update acknowledged: {}", ack.message);
        }
        Ok(())
    }

    async fn delete_event(&self, id: i64) -> Result<(), WriteError> {
        let response = self
            .http
            .delete(self.url(&format!("/calendar/{}", id)))
            .send()
            .await
            .map_err(|e| WriteError::Network(e.to_string()))?;

        let response = ensure_write_ok(response).await?;
        if let Ok(ack) = response.json::<MessageResponse>().await {
            info!("📅 CALENDAR API: delete acknowledged: {}", ack.message);
        }
        Ok(())
    }
}

/// Map a non-success write response to a typed error carrying the
/// server's message.
async fn ensure_write_ok(response: Response) -> Result<Response, WriteError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(WriteError::Rejected {
            status: status.as_u16(),
            message: read_server_message(response).await,
        })
    }
}

/// Best-effort extraction of a `{"message": ...}` error body, falling back
/// to the raw body text.
async fn read_server_message(response: Response) -> String {
    match response.text().await {
        Ok(body) => match serde_json::from_str::<MessageResponse>(&body) {
            Ok(parsed) => parsed.message,
            Err(_) if !body.is_empty() => body,
            Err(_) => "no error detail provided".to_string(),
        },
        Err(_) => "no error detail provided".to_string(),
    }
}
