//! Participation progress

use crate::deals::Deal;

/// Share of the group threshold reached, clamped to `[0, 1]`.
///
/// Upstream counts may exceed the target, and a zero target reports no progress.
#[must_use]
pub fn progress_ratio(current: u32, required: u32) -> f64 {
    if required == 0 {
        return 0.0;
    }

    (f64::from(current) / f64::from(required)).clamp(0.0, 1.0)
}

/// Participants still needed to reach the threshold.
#[must_use]
pub fn remaining_participants(deal: &Deal) -> u32 {
    deal.participants
        .required
        .saturating_sub(deal.participants.current)
}

/// Participants still needed once the current user's join is counted.
///
/// Pass the deal as it was *before* joining. The extra `- 1` stands for the joining user;
/// only the join confirmation screen phrases the count this way.
#[must_use]
pub fn remaining_after_join(deal: &Deal) -> u32 {
    remaining_participants(deal).saturating_sub(1)
}
