use serde::{Deserialize, Deserializer, Serialize};

/// Category of a calendar event for rendering and grouping.
///
/// The set is fixed by the backend; each category carries an immutable
/// display color resolved by `match` rather than a runtime lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum EventCategory {
    Meeting,
    /// Generic school event; the default when the backend omits the field.
    #[default]
    Event,
    Festival,
    #[serde(rename = "Holiday-General")]
    HolidayGeneral,
    #[serde(rename = "Holiday-Optional")]
    HolidayOptional,
    Exam,
    /// Catch-all, also used for category values this client does not know.
    Other,
}

impl<'de> Deserialize<'de> for EventCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(EventCategory::from_wire(&label))
    }
}

impl EventCategory {
    /// All categories, in display order.
    pub const ALL: [EventCategory; 7] = [
        EventCategory::Meeting,
        EventCategory::Event,
        EventCategory::Festival,
        EventCategory::HolidayGeneral,
        EventCategory::HolidayOptional,
        EventCategory::Exam,
        EventCategory::Other,
    ];

    /// Parse a backend category string. Unknown values map to `Other` so
    /// one new server-side category cannot poison a whole load.
    pub fn from_wire(label: &str) -> Self {
        match label {
            "Meeting" => EventCategory::Meeting,
            "Event" => EventCategory::Event,
            "Festival" => EventCategory::Festival,
            "Holiday-General" => EventCategory::HolidayGeneral,
            "Holiday-Optional" => EventCategory::HolidayOptional,
            "Exam" => EventCategory::Exam,
            _ => EventCategory::Other,
        }
    }

    /// Human-readable label for pickers and chips.
    pub fn label(&self) -> &'static str {
        match self {
            EventCategory::Meeting => "Meeting",
            EventCategory::Event => "Event",
            EventCategory::Festival => "Festival",
            EventCategory::HolidayGeneral => "Holiday (General)",
            EventCategory::HolidayOptional => "Holiday (Optional)",
            EventCategory::Exam => "Exam",
            EventCategory::Other => "Other",
        }
    }

    /// Display color as a CSS-style hex string.
    pub fn display_color(&self) -> &'static str {
        match self {
            EventCategory::Meeting => "#3b82f6",
            EventCategory::Event => "#10b981",
            EventCategory::Festival => "#f59e0b",
            EventCategory::HolidayGeneral => "#ef4444",
            EventCategory::HolidayOptional => "#f97316",
            EventCategory::Exam => "#8b5cf6",
            EventCategory::Other => "#6b7280",
        }
    }
}

/// One scheduled calendar item as held by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Backend-assigned identifier.
    pub id: i64,
    /// Display title (non-empty).
    pub name: String,
    #[serde(rename = "type", default)]
    pub category: EventCategory,
    /// Free-text time of day, e.g. "10:30 AM". Never parsed or validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO date (`YYYY-MM-DD`) the event is attached to. This is the join
    /// key between the event index and the month grid.
    pub event_date: String,
}

/// Fields of an event as edited locally, before the backend has assigned
/// (or re-confirmed) an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEventDraft {
    pub name: String,
    pub category: EventCategory,
    pub time: Option<String>,
    pub description: Option<String>,
    pub event_date: String,
}

/// Body for `POST /calendar` and `PUT /calendar/{id}`.
///
/// Field names match the wire exactly, including the backend's mixed
/// `event_date` / `adminId` convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveEventRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub category: EventCategory,
    pub event_date: String,
    #[serde(rename = "adminId")]
    pub admin_id: i64,
}

impl SaveEventRequest {
    /// Build a request body from a locally edited draft plus the session's
    /// admin id.
    pub fn from_draft(draft: &CalendarEventDraft, admin_id: i64) -> Self {
        Self {
            name: draft.name.clone(),
            time: draft.time.clone(),
            description: draft.description.clone(),
            category: draft.category,
            event_date: draft.event_date.clone(),
            admin_id,
        }
    }
}

/// Response from a successful create or update call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveEventResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<CalendarEvent>,
    pub message: String,
}

/// Generic message-only response (delete confirmations, error bodies).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
