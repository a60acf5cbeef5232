//! Squad Game domain core.
//!
//! Pure domain logic shared by the repository layer, the job engines, and the
//! HTTP surface: the event-kind catalog, the daily-event status state machine,
//! scoring rules, crown/headline/rivalry validation, and the timezone-aware
//! scheduling window. Zero internal deps so the db and api crates can both
//! build on it.

pub mod crown;
pub mod error;
pub mod event;
pub mod headline;
pub mod rivalry;
pub mod schedule;
pub mod scoring;
pub mod types;
