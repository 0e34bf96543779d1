//! In-memory calendar API double for store and workflow tests.

use std::sync::Mutex;

use async_trait::async_trait;
use shared::{CalendarEvent, CalendarEventDraft, EventCategory};

use crate::api::{CalendarApi, EventsByDate};
use crate::error::{FetchError, WriteError};

pub fn test_event(id: i64, event_date: &str, name: &str) -> CalendarEvent {
    CalendarEvent {
        id,
        name: name.to_string(),
        category: EventCategory::Event,
        time: None,
        description: None,
        event_date: event_date.to_string(),
    }
}

/// Backend double holding a flat event list, with switchable failure modes.
pub struct StubApi {
    state: Mutex<StubState>,
}

#[derive(Default)]
struct StubState {
    events: Vec<CalendarEvent>,
    next_id: i64,
    fail_writes: bool,
    fail_fetch: bool,
    grouped_response: Option<EventsByDate>,
    fetch_calls: usize,
    write_calls: usize,
}

impl StubApi {
    pub fn new() -> Self {
        Self::with_events(Vec::new())
    }

    pub fn with_events(events: Vec<CalendarEvent>) -> Self {
        let next_id = events.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(StubState {
                events,
                next_id,
                ..StubState::default()
            }),
        }
    }

    /// Make every write answer like a 500 until switched back off.
    pub fn fail_writes(&self, fail: bool) {
        self.state.lock().unwrap().fail_writes = fail;
    }

    pub fn fail_fetch(&self, fail: bool) {
        self.state.lock().unwrap().fail_fetch = fail;
    }

    /// Override the next fetches with a fixed grouped payload, e.g. to
    /// simulate a server that grouped events under the wrong key.
    pub fn set_grouped_response(&self, grouped: EventsByDate) {
        self.state.lock().unwrap().grouped_response = Some(grouped);
    }

    pub fn fetch_calls(&self) -> usize {
        self.state.lock().unwrap().fetch_calls
    }

    pub fn write_calls(&self) -> usize {
        self.state.lock().unwrap().write_calls
    }

    pub fn events(&self) -> Vec<CalendarEvent> {
        self.state.lock().unwrap().events.clone()
    }
}

#[async_trait]
impl CalendarApi for StubApi {
    async fn fetch_events(&self) -> Result<EventsByDate, FetchError> {
        let mut state = self.state.lock().unwrap();
        state.fetch_calls += 1;

        if state.fail_fetch {
            return Err(FetchError::Status {
                status: 500,
                message: "stub fetch failure".to_string(),
            });
        }
        if let Some(grouped) = &state.grouped_response {
            return Ok(grouped.clone());
        }

        // Pre-group by date like the real backend does.
        let mut grouped = EventsByDate::new();
        for event in &state.events {
            grouped
                .entry(event.event_date.clone())
                .or_default()
                .push(event.clone());
        }
        Ok(grouped)
    }

    async fn create_event(&self, draft: &CalendarEventDraft) -> Result<(), WriteError> {
        let mut state = self.state.lock().unwrap();
        state.write_calls += 1;

        if state.fail_writes {
            return Err(WriteError::Rejected {
                status: 500,
                message: "stub write failure".to_string(),
            });
        }

        let id = state.next_id;
        state.next_id += 1;
        state.events.push(CalendarEvent {
            id,
            name: draft.name.clone(),
            category: draft.category,
            time: draft.time.clone(),
            description: draft.description.clone(),
            event_date: draft.event_date.clone(),
        });
        Ok(())
    }

    async fn update_event(&self, id: i64, draft: &CalendarEventDraft) -> Result<(), WriteError> {
        let mut state = self.state.lock().unwrap();
        state.write_calls += 1;

        if state.fail_writes {
            return Err(WriteError::Rejected {
                status: 500,
                message: "stub write failure".to_string(),
            });
        }

        let event = state
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| WriteError::Rejected {
                status: 404,
                message: format!("no event with id {}", id),
            })?;
        event.name = draft.name.clone();
        event.category = draft.category;
        event.time = draft.time.clone();
        event.description = draft.description.clone();
        event.event_date = draft.event_date.clone();
        Ok(())
    }

    async fn delete_event(&self, id: i64) -> Result<(), WriteError> {
        let mut state = self.state.lock().unwrap();
        state.write_calls += 1;

        if state.fail_writes {
            return Err(WriteError::Rejected {
                status: 500,
                message: "stub write failure".to_string(),
            });
        }
        if !state.events.iter().any(|e| e.id == id) {
            return Err(WriteError::Rejected {
                status: 404,
                message: format!("no event with id {}", id),
            });
        }

        state.events.retain(|e| e.id != id);
        Ok(())
    }
}
