//! Crown grant rules and the ledger's distinct failure conditions.

use chrono::Duration;

use crate::types::Timestamp;

/// How long a crown stays valid after it is granted.
pub const CROWN_TTL_HOURS: i64 = 24;

/// Expiry instant for a crown granted at `granted_at`.
pub fn expiry_from(granted_at: Timestamp) -> Timestamp {
    granted_at + Duration::hours(CROWN_TTL_HOURS)
}

/// Whether a crown with the given expiry is still active at `now`.
pub fn is_active(expires_at: Timestamp, now: Timestamp) -> bool {
    expires_at > now
}

/// Precondition failures for crown-gated actions (headline, rivalry).
///
/// Each variant is a separately named condition so the client can show a
/// specific message; the HTTP layer maps them to distinct `code` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CrownError {
    #[error("Crown not found")]
    NotFound,

    #[error("Only the crown holder may perform this action")]
    NotOwner,

    #[error("The crown has expired")]
    Expired,
}

/// Validate that `caller` may act through the crown described by
/// `(owner, expires_at)` at instant `now`.
///
/// Check order matters: ownership is reported before expiry so a non-owner
/// probing an expired crown learns nothing about its state.
pub fn authorize_holder(
    owner: crate::types::DbId,
    caller: crate::types::DbId,
    expires_at: Timestamp,
    now: Timestamp,
) -> Result<(), CrownError> {
    if owner != caller {
        return Err(CrownError::NotOwner);
    }
    if !is_active(expires_at, now) {
        return Err(CrownError::Expired);
    }
    Ok(())
}
