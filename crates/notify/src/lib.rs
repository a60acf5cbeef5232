//! Push notification delivery for squad events.
//!
//! [`PushClient`] handles batched, best-effort HTTP delivery to the push
//! gateway; [`compose`] builds localized notification copy per event kind
//! and squad locale.

pub mod compose;
pub mod push;

pub use compose::{Locale, NotificationCopy};
pub use push::{DispatchOutcome, DispatchReport, PushClient, PushError, PushMessage};
