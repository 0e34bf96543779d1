//! # Event Store
//!
//! In-memory index from date key to the events on that date, built from
//! the backend's full collection and kept consistent by refetch-after-write:
//! mutations never patch the index, callers reload it after every
//! successful write. The index is always replaced wholesale under a single
//! assignment, never partially patched, so a failed reload can never leave
//! it half-updated.

use log::{info, warn};
use shared::{CalendarEvent, CalendarEventDraft};

use crate::api::{CalendarApi, EventsByDate};
use crate::date_key::parse_date_key;
use crate::error::{FetchError, WriteError};

/// Date-keyed event index plus its fetch/mutate collaborator.
pub struct EventStore<A> {
    api: A,
    index: EventsByDate,
}

impl<A: CalendarApi> EventStore<A> {
    /// Create an empty store; call [`EventStore::load`] to populate it.
    pub fn new(api: A) -> Self {
        Self {
            api,
            index: EventsByDate::new(),
        }
    }

    /// The current index. Derived state only: discarded and rebuilt on
    /// every load.
    pub fn index(&self) -> &EventsByDate {
        &self.index
    }

    /// Events on a date key, in the order the server returned them.
    pub fn events_on(&self, key: &str) -> &[CalendarEvent] {
        self.index.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any date holds an event with this id.
    pub fn contains_event(&self, id: i64) -> bool {
        self.index.values().flatten().any(|event| event.id == id)
    }

    /// Discard the index and rebuild it from a fresh full fetch.
    ///
    /// On failure the prior index is left untouched, so a transient
    /// refresh error never makes previously visible events disappear.
    pub async fn load(&mut self) -> Result<(), FetchError> {
        let grouped = self.api.fetch_events().await?;
        let index = regroup(grouped);

        let total: usize = index.values().map(Vec::len).sum();
        info!(
            "🗓️ EVENTS: index rebuilt, {} events across {} dates",
            total,
            index.len()
        );

        self.index = index;
        Ok(())
    }

    /// Send a creation request. The index is not touched on success;
    /// call [`EventStore::load`] to observe the new event.
    pub async fn create(&self, draft: &CalendarEventDraft) -> Result<(), WriteError> {
        self.api.create_event(draft).await
    }

    /// Send an update for an existing event. Same reload contract as
    /// [`EventStore::create`].
    pub async fn update(&self, id: i64, draft: &CalendarEventDraft) -> Result<(), WriteError> {
        self.api.update_event(id, draft).await
    }

    /// Send a delete. Irreversible; callers are expected to confirm with
    /// the user first. Same reload contract as [`EventStore::create`].
    pub async fn delete(&self, id: i64) -> Result<(), WriteError> {
        self.api.delete_event(id).await
    }
}

/// Partition events by their own `event_date` field, whatever key the
/// server grouped them under. Events with a malformed date are skipped,
/// never fatal.
fn regroup(grouped: EventsByDate) -> EventsByDate {
    let mut index = EventsByDate::new();

    for events in grouped.into_values() {
        for event in events {
            if parse_date_key(&event.event_date).is_none() {
                warn!(
                    "🗓️ EVENTS: skipping event {} with malformed date {:?}",
                    event.id, event.event_date
                );
                continue;
            }
            index
                .entry(event.event_date.clone())
                .or_default()
                .push(event);
        }
    }

    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_api::{test_event, StubApi};

    #[tokio::test]
    async fn test_events_group_under_their_own_date() {
        let api = StubApi::with_events(vec![
            test_event(1, "2025-05-02", "Exam"),
            test_event(2, "2025-05-02", "PTM"),
            test_event(3, "2025-05-10", "Sports Meet"),
        ]);
        let mut store = EventStore::new(api);
        store.load().await.unwrap();

        let day = store.events_on("2025-05-02");
        assert_eq!(day.len(), 2);
        assert_eq!(day[0].name, "Exam");
        assert_eq!(day[1].name, "PTM");

        assert_eq!(store.events_on("2025-05-10").len(), 1);
        assert_eq!(store.events_on("2025-05-03").len(), 0);
    }

    #[tokio::test]
    async fn test_event_is_reachable_only_under_its_own_date() {
        // Server grouped event 1 under the wrong key; its own event_date wins.
        let api = StubApi::new();
        let mut grouped = EventsByDate::new();
        grouped.insert(
            "2025-05-09".to_string(),
            vec![test_event(1, "2025-05-02", "Exam")],
        );
        api.set_grouped_response(grouped);

        let mut store = EventStore::new(api);
        store.load().await.unwrap();

        assert_eq!(store.events_on("2025-05-02").len(), 1);
        assert_eq!(store.events_on("2025-05-09").len(), 0);
    }

    #[tokio::test]
    async fn test_malformed_dates_are_skipped_not_fatal() {
        let api = StubApi::with_events(vec![
            test_event(1, "2025-05-02", "Exam"),
            test_event(2, "2025-5-2", "Bad padding"),
            test_event(3, "someday", "No date at all"),
        ]);
        let mut store = EventStore::new(api);
        store.load().await.unwrap();

        assert!(store.contains_event(1));
        assert!(!store.contains_event(2));
        assert!(!store.contains_event(3));
    }

    #[tokio::test]
    async fn test_reload_grouping_is_deterministic() {
        let api = StubApi::with_events(vec![
            test_event(1, "2025-05-02", "Exam"),
            test_event(2, "2025-05-02", "PTM"),
            test_event(3, "2025-06-01", "Results"),
        ]);
        let mut store = EventStore::new(api);

        store.load().await.unwrap();
        let first = store.index().clone();
        store.load().await.unwrap();

        assert_eq!(store.index(), &first);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_prior_index() {
        let api = StubApi::with_events(vec![test_event(1, "2025-05-02", "Exam")]);
        let mut store = EventStore::new(api);
        store.load().await.unwrap();

        store.api.fail_fetch(true);
        assert!(store.load().await.is_err());

        // Previously visible events must not disappear on a transient failure.
        assert_eq!(store.events_on("2025-05-02").len(), 1);
    }

    #[tokio::test]
    async fn test_create_round_trip_lands_under_its_date_key() {
        let api = StubApi::new();
        let mut store = EventStore::new(api);
        store.load().await.unwrap();

        let draft = CalendarEventDraft {
            name: "Annual Day".to_string(),
            category: shared::EventCategory::Festival,
            time: None,
            description: None,
            event_date: "2025-05-02".to_string(),
        };
        store.create(&draft).await.unwrap();

        // Writes never patch the index directly.
        assert!(store.events_on("2025-05-02").is_empty());

        store.load().await.unwrap();
        assert_eq!(store.events_on("2025-05-02").len(), 1);
        assert_eq!(store.events_on("2025-05-02")[0].name, "Annual Day");
        let elsewhere: usize = store
            .index()
            .iter()
            .filter(|(key, _)| key.as_str() != "2025-05-02")
            .map(|(_, events)| events.len())
            .sum();
        assert_eq!(elsewhere, 0);
    }

    #[tokio::test]
    async fn test_delete_then_reload_removes_the_event() {
        let api = StubApi::with_events(vec![
            test_event(1, "2025-05-02", "Exam"),
            test_event(2, "2025-05-10", "PTM"),
        ]);
        let mut store = EventStore::new(api);
        store.load().await.unwrap();

        store.delete(1).await.unwrap();
        store.load().await.unwrap();

        assert!(!store.contains_event(1));
        assert!(store.contains_event(2));
    }
}
