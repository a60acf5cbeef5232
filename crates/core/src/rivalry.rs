//! Rivalry declaration rules.
//!
//! A crown holder may declare two *other* squad members rivals. The pair
//! checks live here; squad-membership of both rivals needs the database and
//! is checked by the service layer, which raises [`RivalryError::NotSquadMember`].

use crate::types::DbId;

/// Declaration failures, one variant per distinct client-facing condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RivalryError {
    #[error("Rivals must be two different members")]
    IdenticalRivals,

    #[error("The crown holder cannot be one of the rivals")]
    DeclarerAmongRivals,

    #[error("Both rivals must be members of the squad")]
    NotSquadMember,
}

/// Validate the declared pair against the declaring crown holder.
///
/// Checks run in the documented order: identical rivals first, then declarer
/// involvement. Membership is a separate, database-backed check.
pub fn validate_rival_pair(
    declarer: DbId,
    rival1: DbId,
    rival2: DbId,
) -> Result<(), RivalryError> {
    if rival1 == rival2 {
        return Err(RivalryError::IdenticalRivals);
    }
    if declarer == rival1 || declarer == rival2 {
        return Err(RivalryError::DeclarerAmongRivals);
    }
    Ok(())
}
