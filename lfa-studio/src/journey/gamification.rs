//! Gamification ledger: points, badges, streaks
//!
//! Operations over a project's progression record. Point totals only ever
//! grow; badge awards are idempotent; streak accounting is calendar-day
//! based (see `lfa_common::time`).

use crate::journey::progress::ProjectProgress;
use chrono::{DateTime, Utc};
use lfa_common::time::calendar_days_between;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Bonus granted once per badge on first award
pub const BADGE_BONUS_POINTS: u64 = 100;

/// Streak bonuses keyed by the streak length that triggers them
pub const STREAK_BONUS: [(u32, u64); 4] = [(3, 25), (7, 100), (14, 250), (30, 1000)];

/// Badge definition in the fixed catalog
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Fixed badge catalog (one per journey level)
pub const BADGES: [Badge; 5] = [
    Badge {
        id: "problem-explorer",
        name: "Problem Explorer",
        description: "Grounded the problem in evidence",
    },
    Badge {
        id: "vision-architect",
        name: "Vision Architect",
        description: "Articulated the impact vision",
    },
    Badge {
        id: "change-strategist",
        name: "Change Strategist",
        description: "Built a coherent theory of change",
    },
    Badge {
        id: "system-designer",
        name: "System Designer",
        description: "Mapped stakeholders and implementation",
    },
    Badge {
        id: "evidence-champion",
        name: "Evidence Champion",
        description: "Designed the measurement framework",
    },
];

/// Look up a badge definition by id
pub fn badge(badge_id: &str) -> Option<&'static Badge> {
    BADGES.iter().find(|b| b.id == badge_id)
}

/// A badge held by a project, with its earned timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarnedBadge {
    pub badge_id: String,
    pub earned_at: DateTime<Utc>,
}

/// Add points to the ledger (monotonic accumulator)
///
/// Negative amounts are not a defined input in this domain; the parameter
/// type enforces that.
pub fn add_points(progress: &mut ProjectProgress, amount: u64) {
    progress.total_points_earned = progress.total_points_earned.saturating_add(amount);
}

/// Award a badge by id; idempotent
///
/// Unknown badge ids are ignored with a warning. The first award appends
/// an entry with the earned timestamp and grants [`BADGE_BONUS_POINTS`];
/// re-awarding is a no-op. Returns whether the badge was newly awarded.
pub fn award_badge(progress: &mut ProjectProgress, badge_id: &str, now: DateTime<Utc>) -> bool {
    let Some(definition) = badge(badge_id) else {
        warn!(badge_id, "Ignoring award for unknown badge");
        return false;
    };

    if progress.earned_badges.iter().any(|b| b.badge_id == definition.id) {
        return false;
    }

    progress.earned_badges.push(EarnedBadge {
        badge_id: definition.id.to_string(),
        earned_at: now,
    });
    add_points(progress, BADGE_BONUS_POINTS);
    debug!(badge_id, "Badge awarded");
    true
}

/// Update the activity streak and grant any streak bonus
///
/// Exactly one calendar day since the last activity increments the streak;
/// a longer gap resets it to 1; a same-day call leaves it unchanged (the
/// very first activity bootstraps a streak of 1). `last_activity_at` is
/// set to `now` on every call. Returns the bonus granted, if the new
/// streak length has an entry in [`STREAK_BONUS`].
pub fn update_streak(progress: &mut ProjectProgress, now: DateTime<Utc>) -> u64 {
    let days = calendar_days_between(progress.last_activity_at, now);
    progress.last_activity_at = now;

    let changed = if days == 0 {
        if progress.streak_days == 0 {
            progress.streak_days = 1;
            true
        } else {
            false
        }
    } else if days == 1 {
        progress.streak_days += 1;
        true
    } else {
        progress.streak_days = 1;
        true
    };

    if !changed {
        return 0;
    }

    let bonus = STREAK_BONUS
        .iter()
        .find(|(length, _)| *length == progress.streak_days)
        .map(|(_, bonus)| *bonus)
        .unwrap_or(0);

    if bonus > 0 {
        add_points(progress, bonus);
        debug!(streak = progress.streak_days, bonus, "Streak bonus granted");
    }

    bonus
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, h, 0, 0).unwrap()
    }

    fn fresh() -> ProjectProgress {
        ProjectProgress::new(ts(1, 9))
    }

    #[test]
    fn test_add_points_accumulates() {
        let mut p = fresh();
        add_points(&mut p, 50);
        add_points(&mut p, 0);
        add_points(&mut p, 25);
        assert_eq!(p.total_points_earned, 75);
    }

    #[test]
    fn test_award_badge_first_time_grants_bonus() {
        let mut p = fresh();
        assert!(award_badge(&mut p, "problem-explorer", ts(1, 10)));
        assert_eq!(p.earned_badges.len(), 1);
        assert_eq!(p.earned_badges[0].badge_id, "problem-explorer");
        assert_eq!(p.earned_badges[0].earned_at, ts(1, 10));
        assert_eq!(p.total_points_earned, BADGE_BONUS_POINTS);
    }

    #[test]
    fn test_award_badge_is_idempotent() {
        let mut p = fresh();
        award_badge(&mut p, "problem-explorer", ts(1, 10));
        assert!(!award_badge(&mut p, "problem-explorer", ts(2, 10)));
        assert_eq!(p.earned_badges.len(), 1);
        // No duplicate bonus
        assert_eq!(p.total_points_earned, BADGE_BONUS_POINTS);
        // Original earned timestamp preserved
        assert_eq!(p.earned_badges[0].earned_at, ts(1, 10));
    }

    #[test]
    fn test_award_unknown_badge_is_noop() {
        let mut p = fresh();
        assert!(!award_badge(&mut p, "no-such-badge", ts(1, 10)));
        assert!(p.earned_badges.is_empty());
        assert_eq!(p.total_points_earned, 0);
    }

    #[test]
    fn test_streak_same_day_calls_increment_at_most_once() {
        let mut p = fresh();
        update_streak(&mut p, ts(1, 10));
        update_streak(&mut p, ts(1, 18));
        assert_eq!(p.streak_days, 1);
    }

    #[test]
    fn test_streak_one_day_gap_increments() {
        let mut p = fresh();
        update_streak(&mut p, ts(1, 10));
        update_streak(&mut p, ts(2, 10));
        assert_eq!(p.streak_days, 2);
    }

    #[test]
    fn test_streak_multi_day_gap_resets() {
        let mut p = fresh();
        update_streak(&mut p, ts(1, 10));
        update_streak(&mut p, ts(2, 10));
        update_streak(&mut p, ts(5, 10));
        assert_eq!(p.streak_days, 1);
    }

    #[test]
    fn test_streak_bonus_granted_at_threshold() {
        let mut p = fresh();
        update_streak(&mut p, ts(1, 10));
        update_streak(&mut p, ts(2, 10));
        let bonus = update_streak(&mut p, ts(3, 10));
        assert_eq!(p.streak_days, 3);
        assert_eq!(bonus, 25);
        assert_eq!(p.total_points_earned, 25);

        // Same-day repeat must not re-grant the threshold bonus
        let repeat = update_streak(&mut p, ts(3, 20));
        assert_eq!(repeat, 0);
        assert_eq!(p.total_points_earned, 25);
    }

    #[test]
    fn test_badge_catalog_matches_journey_levels() {
        use crate::journey::catalog::JourneyCatalog;
        let catalog = JourneyCatalog::standard();
        for level in &catalog.levels {
            assert!(badge(level.badge_id).is_some(), "missing badge {}", level.badge_id);
        }
    }
}
