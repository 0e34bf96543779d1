//! Calendar engine for the campus dashboard.
//!
//! Month-grid generation, the date-keyed event index, and the admin
//! mutation workflow that keeps the rendered grid consistent with the
//! remote event store by reloading after every write. Rendering and
//! routing live elsewhere; this crate only holds state and protocol.

pub mod api;
pub mod client;
pub mod date_key;
pub mod error;
pub mod grid;
pub mod store;
pub mod workflow;

#[cfg(test)]
pub(crate) mod test_api;

pub use api::{CalendarApi, EventsByDate};
pub use client::HttpCalendarApi;
pub use error::{FetchError, InvalidMonth, ValidationError, WriteError};
pub use grid::{build_month_grid, GridCell, MonthGrid};
pub use store::EventStore;
pub use workflow::{CalendarScreen, EditorMode, EventForm};
