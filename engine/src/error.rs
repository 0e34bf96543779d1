//! Error taxonomy for the calendar engine.
//!
//! Local validation failures never reach the network; write and fetch
//! failures are typed separately because they recover differently (the
//! editor re-opens on a failed write, the prior index is kept on a
//! failed fetch).

use thiserror::Error;

/// Month index outside `0..=11`. Passing one is a caller programming
/// error; month arithmetic across year boundaries belongs to navigation,
/// not to the grid builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("month index {0} is out of range (expected 0..=11)")]
pub struct InvalidMonth(pub u32);

/// Pre-submission form check failures. These block submission entirely.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("event name must not be empty")]
    EmptyName,
    #[error("no date selected for the event")]
    MissingDate,
}

/// The backend rejected or never received a create/update/delete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WriteError {
    /// Non-success status; carries the server's message when it sent one.
    #[error("server rejected the write (status {status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
}

/// The backend was unreachable or answered badly during a full load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("server returned status {status} while loading events: {message}")]
    Status { status: u16, message: String },
    #[error("failed to decode calendar response: {0}")]
    Decode(String),
    #[error("network error: {0}")]
    Network(String),
}
