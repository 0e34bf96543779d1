//! Collaborator contract between the engine and the remote event store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use shared::{CalendarEvent, CalendarEventDraft};

use crate::error::{FetchError, WriteError};

/// Events grouped by their canonical date key.
pub type EventsByDate = HashMap<String, Vec<CalendarEvent>>;

/// The remote event collection as seen by the engine.
///
/// The production implementation is [`crate::client::HttpCalendarApi`];
/// tests substitute an in-memory double. These four calls are the engine's
/// only suspension points, and none of them touch local state.
#[async_trait]
pub trait CalendarApi: Send + Sync {
    /// Fetch the full event collection, grouped by date key server-side.
    async fn fetch_events(&self) -> Result<EventsByDate, FetchError>;

    async fn create_event(&self, draft: &CalendarEventDraft) -> Result<(), WriteError>;

    async fn update_event(&self, id: i64, draft: &CalendarEventDraft) -> Result<(), WriteError>;

    async fn delete_event(&self, id: i64) -> Result<(), WriteError>;
}

/// Lets one shared client back several screens.
#[async_trait]
impl<A: CalendarApi> CalendarApi for Arc<A> {
    async fn fetch_events(&self) -> Result<EventsByDate, FetchError> {
        (**self).fetch_events().await
    }

    async fn create_event(&self, draft: &CalendarEventDraft) -> Result<(), WriteError> {
        (**self).create_event(draft).await
    }

    async fn update_event(&self, id: i64, draft: &CalendarEventDraft) -> Result<(), WriteError> {
        (**self).update_event(id, draft).await
    }

    async fn delete_event(&self, id: i64) -> Result<(), WriteError> {
        (**self).delete_event(id).await
    }
}
