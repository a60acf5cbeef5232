//! Point rules applied when an event closes.

/// Points every submission earns for participating.
pub const BASE_POINTS: i32 = 10;

/// Extra points for the rank-1 submission.
pub const RANK1_BONUS: i32 = 10;

/// Extra points for the rank-2 submission.
pub const RANK2_BONUS: i32 = 5;

/// Points deducted from each squad member who never submitted.
pub const MISSED_PENALTY: i32 = 5;

/// Bonus points for a given rank. Unranked submissions (polls) earn none.
pub fn rank_bonus(rank: Option<i32>) -> i32 {
    match rank {
        Some(1) => RANK1_BONUS,
        Some(2) => RANK2_BONUS,
        _ => 0,
    }
}

/// Total points a submission earns: participation plus rank bonus.
pub fn points_for_rank(rank: Option<i32>) -> i32 {
    BASE_POINTS + rank_bonus(rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winner_earns_twenty() {
        assert_eq!(points_for_rank(Some(1)), 20);
    }

    #[test]
    fn runner_up_earns_fifteen() {
        assert_eq!(points_for_rank(Some(2)), 15);
    }

    #[test]
    fn third_place_earns_base_only() {
        assert_eq!(points_for_rank(Some(3)), 10);
    }

    #[test]
    fn unranked_submission_earns_base_only() {
        assert_eq!(points_for_rank(None), 10);
    }

    #[test]
    fn bonus_is_zero_beyond_second() {
        assert_eq!(rank_bonus(Some(3)), 0);
        assert_eq!(rank_bonus(Some(99)), 0);
        assert_eq!(rank_bonus(None), 0);
    }
}
