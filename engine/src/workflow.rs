//! # Mutation Workflow
//!
//! One explicit state struct per calendar screen, transitioned only through
//! named actions. The editor moves `Viewing -> Editing -> Submitting` and
//! back; a failed write re-opens the editor with the user's input intact,
//! and every successful write is followed by a full index reload. Deletion
//! is a side path from `Viewing` behind an explicit confirmation step.
//!
//! The engine assumes a single-threaded, event-driven host: submit is a
//! no-op unless the editor is open, which is what serializes mutations.

use std::mem;

use chrono::Datelike;
use log::{info, warn};
use shared::{CalendarEvent, CalendarEventDraft, EventCategory};

use crate::api::CalendarApi;
use crate::date_key::{date_key, parse_date_key};
use crate::error::{InvalidMonth, ValidationError};
use crate::grid::{self, MonthGrid};
use crate::store::EventStore;

/// Form contents while an event is being created or edited.
#[derive(Debug, Clone, PartialEq)]
pub struct EventForm {
    pub name: String,
    pub category: EventCategory,
    /// Free text, passed to the backend as-is.
    pub time: String,
    pub description: String,
    /// Date key the event will be attached to.
    pub selected_date: Option<String>,
    /// Validation or write error to surface next to the form.
    pub error: Option<String>,
}

impl EventForm {
    fn blank(date: String) -> Self {
        Self {
            name: String::new(),
            category: EventCategory::default(),
            time: String::new(),
            description: String::new(),
            selected_date: Some(date),
            error: None,
        }
    }

    fn from_event(event: &CalendarEvent) -> Self {
        Self {
            name: event.name.clone(),
            category: event.category,
            time: event.time.clone().unwrap_or_default(),
            description: event.description.clone().unwrap_or_default(),
            selected_date: Some(event.event_date.clone()),
            error: None,
        }
    }

    /// Required-field guard: non-empty name and a selected date. Failing
    /// it blocks submission before any network traffic.
    pub fn validate(&self) -> Result<CalendarEventDraft, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let event_date = self
            .selected_date
            .clone()
            .ok_or(ValidationError::MissingDate)?;

        let time = self.time.trim();
        let description = self.description.trim();
        Ok(CalendarEventDraft {
            name: self.name.trim().to_string(),
            category: self.category,
            time: (!time.is_empty()).then(|| time.to_string()),
            description: (!description.is_empty()).then(|| description.to_string()),
            event_date,
        })
    }
}

/// Editor position in the mutation workflow.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorMode {
    /// Browsing the grid; no form open.
    Viewing,
    /// Form open for a new event (`existing == None`) or an existing one.
    Editing {
        existing: Option<i64>,
        form: EventForm,
    },
    /// Write request in flight; submit must stay disabled.
    Submitting {
        existing: Option<i64>,
        form: EventForm,
    },
    /// Waiting for the user to confirm an irreversible delete.
    ConfirmingDelete { id: i64 },
}

/// State for one academic-calendar screen: the displayed month, the event
/// index, and the editor machine.
pub struct CalendarScreen<A> {
    store: EventStore<A>,
    mode: EditorMode,
    year: i32,
    /// Zero-based month index of the displayed month.
    month: u32,
    admin: bool,
    /// Load/delete failures, surfaced outside the edit form.
    pub error_message: Option<String>,
}

impl<A: CalendarApi> CalendarScreen<A> {
    /// Screen focused on the current local month.
    pub fn new(api: A, admin: bool) -> Self {
        let now = chrono::Local::now();
        // This cannot fail since chrono's month0 is always in range
        Self::with_month(api, admin, now.year(), now.month0()).unwrap()
    }

    /// Screen focused on a specific month (zero-based index).
    pub fn with_month(api: A, admin: bool, year: i32, month: u32) -> Result<Self, InvalidMonth> {
        if month > 11 {
            return Err(InvalidMonth(month));
        }
        Ok(Self {
            store: EventStore::new(api),
            mode: EditorMode::Viewing,
            year,
            month,
            admin,
            error_message: None,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month index of the displayed month.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn store(&self) -> &EventStore<A> {
        &self.store
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    /// Cell sequence for the displayed month.
    pub fn grid(&self) -> MonthGrid {
        // Month is kept in 0..=11 by construction and navigation
        grid::build_month_grid(self.year, self.month).unwrap()
    }

    /// Title line for the screen header, e.g. "May 2025".
    pub fn title(&self) -> String {
        format!("{} {}", grid::month_name(self.month), self.year)
    }

    pub fn navigate_to_previous_month(&mut self) {
        let (year, month) = grid::previous_month(self.year, self.month);
        self.year = year;
        self.month = month;
        info!("📅 Navigated to previous month: {}", self.title());
    }

    pub fn navigate_to_next_month(&mut self) {
        let (year, month) = grid::next_month(self.year, self.month);
        self.year = year;
        self.month = month;
        info!("📅 Navigated to next month: {}", self.title());
    }

    /// Events on a day of the displayed month: the grid-cell-to-index join.
    pub fn events_on_day(&self, day: u32) -> &[CalendarEvent] {
        self.store.events_on(&date_key(self.year, self.month, day))
    }

    /// Events of the displayed month sorted by day, for the list below the
    /// grid. Events dated outside the displayed month are dropped here on
    /// purpose, matching the screen's month-at-a-time presentation.
    pub fn events_this_month(&self) -> Vec<&CalendarEvent> {
        let mut events: Vec<(u32, &CalendarEvent)> = Vec::new();
        for list in self.store.index().values() {
            for event in list {
                if let Some((year, month, day)) = parse_date_key(&event.event_date) {
                    if year == self.year && month == self.month {
                        events.push((day, event));
                    }
                }
            }
        }
        events.sort_by_key(|(day, event)| (*day, event.id));
        events.into_iter().map(|(_, event)| event).collect()
    }

    /// Reload the event index. On failure the prior index stays visible and
    /// the error is surfaced on the screen.
    pub async fn refresh(&mut self) {
        match self.store.load().await {
            Ok(()) => self.error_message = None,
            Err(e) => {
                warn!("📅 CALENDAR: failed to load events: {}", e);
                self.error_message = Some(e.to_string());
            }
        }
    }

    /// Open a blank form for a date cell. Admin-only, from `Viewing`.
    pub fn begin_create(&mut self, date: impl Into<String>) {
        if !self.admin || !matches!(self.mode, EditorMode::Viewing) {
            return;
        }
        self.mode = EditorMode::Editing {
            existing: None,
            form: EventForm::blank(date.into()),
        };
    }

    /// Open the form pre-filled from an existing event. Admin-only.
    pub fn begin_edit(&mut self, event: &CalendarEvent) {
        if !self.admin || !matches!(self.mode, EditorMode::Viewing) {
            return;
        }
        self.mode = EditorMode::Editing {
            existing: Some(event.id),
            form: EventForm::from_event(event),
        };
    }

    /// Close the form without saving.
    pub fn cancel_edit(&mut self) {
        if matches!(self.mode, EditorMode::Editing { .. }) {
            self.mode = EditorMode::Viewing;
        }
    }

    /// Mutable access to the open form, for field edits.
    pub fn form_mut(&mut self) -> Option<&mut EventForm> {
        match &mut self.mode {
            EditorMode::Editing { form, .. } => Some(form),
            _ => None,
        }
    }

    /// Submit the open form.
    ///
    /// Validation failures keep the editor open and never reach the
    /// network. Write failures re-open the editor with the user's input
    /// and the server's message. A successful write moves back to
    /// `Viewing` and reloads the index. No-op outside `Editing`, which is
    /// what makes a double submit harmless.
    pub async fn save(&mut self) {
        let (existing, mut form) = match mem::replace(&mut self.mode, EditorMode::Viewing) {
            EditorMode::Editing { existing, form } => (existing, form),
            other => {
                self.mode = other;
                return;
            }
        };

        let draft = match form.validate() {
            Ok(draft) => draft,
            Err(e) => {
                form.error = Some(e.to_string());
                self.mode = EditorMode::Editing { existing, form };
                return;
            }
        };

        form.error = None;
        self.mode = EditorMode::Submitting {
            existing,
            form: form.clone(),
        };

        let result = match existing {
            Some(id) => self.store.update(id, &draft).await,
            None => self.store.create(&draft).await,
        };

        match result {
            Ok(()) => {
                info!("📅 CALENDAR: event saved, reloading index");
                self.mode = EditorMode::Viewing;
                self.refresh().await;
            }
            Err(e) => {
                warn!("📅 CALENDAR: save failed: {}", e);
                form.error = Some(e.to_string());
                self.mode = EditorMode::Editing { existing, form };
            }
        }
    }

    /// Ask for confirmation before deleting. Admin-only, from `Viewing`.
    pub fn request_delete(&mut self, id: i64) {
        if !self.admin || !matches!(self.mode, EditorMode::Viewing) {
            return;
        }
        self.mode = EditorMode::ConfirmingDelete { id };
    }

    /// Back out of a pending delete.
    pub fn cancel_delete(&mut self) {
        if matches!(self.mode, EditorMode::ConfirmingDelete { .. }) {
            self.mode = EditorMode::Viewing;
        }
    }

    /// Issue the delete the user confirmed, then reload the index.
    pub async fn confirm_delete(&mut self) {
        let id = match self.mode {
            EditorMode::ConfirmingDelete { id } => id,
            _ => return,
        };
        self.mode = EditorMode::Viewing;

        match self.store.delete(id).await {
            Ok(()) => {
                info!("📅 CALENDAR: event {} deleted, reloading index", id);
                self.refresh().await;
            }
            Err(e) => {
                warn!("📅 CALENDAR: delete of event {} failed: {}", id, e);
                self.error_message = Some(e.to_string());
            }
        }
    }
}
