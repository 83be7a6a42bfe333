//! Reset and PK-clear policy: eligibility rules and cost math.
//!
//! A reset sends a character back to level 1 in exchange for a permanent
//! reset counter increment and a stat-point grant. The game server never
//! performs resets itself on private servers; the portal is the only
//! writer, so the rules live here rather than in SQL.

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Reset policy
// ---------------------------------------------------------------------------

/// Tunable reset rules, loaded from server configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ResetPolicy {
    /// Minimum character level required to reset.
    pub required_level: i32,
    /// Maximum lifetime resets per character.
    pub max_resets: i32,
    /// Stat points granted per reset performed.
    pub points_per_reset: i32,
    /// Base zen cost of the first reset.
    pub zen_base: i64,
    /// Additional zen cost per reset already performed.
    pub zen_step: i64,
}

impl Default for ResetPolicy {
    fn default() -> Self {
        Self {
            required_level: 400,
            max_resets: 100,
            points_per_reset: 500,
            zen_base: 10_000_000,
            zen_step: 5_000_000,
        }
    }
}

impl ResetPolicy {
    /// Zen cost of the next reset for a character with `resets` performed.
    ///
    /// Saturating so absurd configured steps cannot overflow.
    pub fn zen_cost(&self, resets: i32) -> i64 {
        self.zen_base
            .saturating_add(self.zen_step.saturating_mul(resets.max(0) as i64))
    }

    /// Check reset eligibility for a character's current level, reset count,
    /// and zen. Returns the zen cost to charge on success.
    pub fn check(&self, level: i32, resets: i32, zen: i64) -> Result<i64, CoreError> {
        if resets >= self.max_resets {
            return Err(CoreError::Validation(format!(
                "Reset limit reached ({} of {})",
                resets, self.max_resets
            )));
        }
        if level < self.required_level {
            return Err(CoreError::Validation(format!(
                "Level {} is below the required reset level {}",
                level, self.required_level
            )));
        }
        let cost = self.zen_cost(resets);
        if zen < cost {
            return Err(CoreError::Validation(format!(
                "Not enough zen: reset costs {cost}, character has {zen}"
            )));
        }
        Ok(cost)
    }

    /// Stat points granted by a reset.
    pub fn point_grant(&self) -> i32 {
        self.points_per_reset
    }
}

// ---------------------------------------------------------------------------
// PK clear
// ---------------------------------------------------------------------------

/// Check PK-clear eligibility: the character must actually be flagged as a
/// player killer and have enough zen for the fee.
pub fn check_pk_clear(pk_level: i32, pk_kills: i32, zen: i64, fee: i64) -> Result<(), CoreError> {
    // PK level 3 is the neutral "commoner" status.
    if pk_level <= 3 && pk_kills == 0 {
        return Err(CoreError::Validation(
            "Character has no PK status to clear".to_string(),
        ));
    }
    if zen < fee {
        return Err(CoreError::Validation(format!(
            "Not enough zen: PK clear costs {fee}, character has {zen}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Stat point distribution
// ---------------------------------------------------------------------------

/// A requested distribution of unspent level-up points.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointDistribution {
    pub strength: i32,
    pub agility: i32,
    pub vitality: i32,
    pub energy: i32,
}

impl PointDistribution {
    /// Total points this distribution spends.
    pub fn total(&self) -> i64 {
        self.strength as i64 + self.agility as i64 + self.vitality as i64 + self.energy as i64
    }

    /// Validate the distribution against the character's unspent points.
    ///
    /// Negative values are rejected outright -- allowing them would let a
    /// player move points out of a stat and bank them.
    pub fn check(&self, available_points: i32) -> Result<(), CoreError> {
        if self.strength < 0 || self.agility < 0 || self.vitality < 0 || self.energy < 0 {
            return Err(CoreError::Validation(
                "Point values must not be negative".to_string(),
            ));
        }
        let total = self.total();
        if total == 0 {
            return Err(CoreError::Validation(
                "At least one point must be distributed".to_string(),
            ));
        }
        if total > available_points as i64 {
            return Err(CoreError::Validation(format!(
                "Distribution spends {total} points but only {available_points} are available"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn zen_cost_scales_with_resets() {
        let policy = ResetPolicy::default();
        assert_eq!(policy.zen_cost(0), 10_000_000);
        assert_eq!(policy.zen_cost(3), 25_000_000);
    }

    #[test]
    fn reset_below_required_level_rejected() {
        let policy = ResetPolicy::default();
        let err = policy.check(399, 0, i64::MAX).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("below the required"));
    }

    #[test]
    fn reset_at_cap_rejected() {
        let policy = ResetPolicy::default();
        let err = policy.check(400, 100, i64::MAX).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("limit reached"));
    }

    #[test]
    fn reset_without_zen_rejected() {
        let policy = ResetPolicy::default();
        let err = policy.check(400, 2, 1_000).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("Not enough zen"));
    }

    #[test]
    fn eligible_reset_returns_cost() {
        let policy = ResetPolicy::default();
        let cost = policy.check(400, 2, 50_000_000).unwrap();
        assert_eq!(cost, 20_000_000);
    }

    #[test]
    fn pk_clear_requires_pk_status() {
        let err = check_pk_clear(3, 0, 100_000_000, 5_000_000).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("no PK status"));

        assert!(check_pk_clear(5, 2, 100_000_000, 5_000_000).is_ok());
    }

    #[test]
    fn negative_points_rejected() {
        let dist = PointDistribution {
            strength: 10,
            agility: -1,
            ..Default::default()
        };
        let err = dist.check(100).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("negative"));
    }

    #[test]
    fn overspend_rejected() {
        let dist = PointDistribution {
            strength: 60,
            agility: 50,
            ..Default::default()
        };
        let err = dist.check(100).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("available"));
    }

    #[test]
    fn empty_distribution_rejected() {
        let dist = PointDistribution::default();
        assert!(dist.check(100).is_err());
    }

    #[test]
    fn valid_distribution_accepted() {
        let dist = PointDistribution {
            strength: 50,
            agility: 25,
            vitality: 15,
            energy: 10,
        };
        assert!(dist.check(100).is_ok());
    }
}
