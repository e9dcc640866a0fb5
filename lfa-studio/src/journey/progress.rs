//! Quest-completion state machine
//!
//! A project's position in the journey is fully determined by the
//! `(current_level, current_quest)` pointer plus the completed-quest set.
//! The pointer only ever moves forward; completing the last quest of level
//! 5 leaves the pointer in place and the project is terminal (no quest at
//! pointer).

use crate::journey::catalog::{JourneyCatalog, Quest, MAX_LEVEL};
use crate::journey::gamification::{self, EarnedBadge};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

/// Progression precondition violations
///
/// Fatal to the single operation; no state is mutated on error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProgressError {
    /// Level ordinal not present in the journey catalog
    #[error("Unknown level: {0}")]
    UnknownLevel(u32),

    /// Quest id not present in the given level
    #[error("Unknown quest in level {level}: {quest_id}")]
    UnknownQuest { level: u32, quest_id: String },

    /// Quest exists but is not the one at the current pointer
    #[error("Quest {quest_id} (level {level}) is not at the current pointer")]
    OutOfOrderQuest { level: u32, quest_id: String },
}

/// Per-project mutable progression record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProgress {
    /// Current level ordinal (1..5); never decreases
    pub current_level: u32,
    /// 1-based position of the quest at the pointer within the level
    pub current_quest: u32,
    /// Set of completed quest ids; membership is idempotent
    pub completed_quests: BTreeSet<String>,
    /// Badges earned so far (appended by the gamification ledger)
    pub earned_badges: Vec<EarnedBadge>,
    /// Monotonically non-decreasing point total
    pub total_points_earned: u64,
    pub streak_days: u32,
    pub last_activity_at: DateTime<Utc>,
}

impl ProjectProgress {
    /// Fresh progress record for a newly created project
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            current_level: 1,
            current_quest: 1,
            completed_quests: BTreeSet::new(),
            earned_badges: Vec::new(),
            total_points_earned: 0,
            streak_days: 0,
            last_activity_at: now,
        }
    }
}

/// Outcome of one quest-completion call
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestCompletion {
    /// Points granted by this call (0 on re-completion)
    pub points_awarded: u64,
    /// Streak bonus granted by this call, if any
    pub streak_bonus: u64,
    /// Level that was finished by this completion, if any
    pub level_completed: Option<u32>,
    /// Badge earned by finishing a level, if any
    pub badge_earned: Option<String>,
    /// Whether the quest was already in the completed set
    pub already_completed: bool,
    /// Whether the whole journey is now complete
    pub terminal: bool,
}

/// Quest at the current pointer, or `None` when the journey is terminal
pub fn quest_at_pointer<'a>(
    catalog: &'a JourneyCatalog,
    progress: &ProjectProgress,
) -> Option<&'a Quest> {
    if is_terminal(catalog, progress) {
        return None;
    }
    catalog.quest_at(progress.current_level, progress.current_quest)
}

/// Terminal state: every quest of the final level is completed
pub fn is_terminal(catalog: &JourneyCatalog, progress: &ProjectProgress) -> bool {
    if progress.current_level != MAX_LEVEL {
        return false;
    }
    match catalog.level(MAX_LEVEL) {
        Some(level) => level
            .quests
            .iter()
            .all(|q| progress.completed_quests.contains(q.id)),
        None => false,
    }
}

/// Complete a quest and advance the pointer
///
/// Preconditions (validated defensively even though the UI only offers the
/// quest at the pointer):
/// - `quest_id` must belong to `level_id` in the catalog
/// - the quest must be the one at the current pointer, unless it is already
///   in the completed set (re-completion is an idempotent no-op for the set
///   and grants no further points)
///
/// On success the quest enters the completed set, its point reward is
/// credited through the ledger, the pointer advances (next position, or
/// next level, or terminal at the end of level 5), and the streak is
/// updated. `last_activity_at` is set to `now` on every accepted call.
pub fn complete_quest(
    catalog: &JourneyCatalog,
    progress: &mut ProjectProgress,
    level_id: u32,
    quest_id: &str,
    now: DateTime<Utc>,
) -> Result<QuestCompletion, ProgressError> {
    let level = catalog
        .level(level_id)
        .ok_or(ProgressError::UnknownLevel(level_id))?;
    let quest = level.quest(quest_id).ok_or_else(|| ProgressError::UnknownQuest {
        level: level_id,
        quest_id: quest_id.to_string(),
    })?;

    if progress.completed_quests.contains(quest_id) {
        // Idempotent re-completion: set unchanged, no points re-granted
        let streak_bonus = gamification::update_streak(progress, now);
        debug!(quest_id, "Quest already completed; no-op");
        return Ok(QuestCompletion {
            points_awarded: 0,
            streak_bonus,
            level_completed: None,
            badge_earned: None,
            already_completed: true,
            terminal: is_terminal(catalog, progress),
        });
    }

    if level_id != progress.current_level || quest.position != progress.current_quest {
        return Err(ProgressError::OutOfOrderQuest {
            level: level_id,
            quest_id: quest_id.to_string(),
        });
    }

    progress.completed_quests.insert(quest_id.to_string());
    gamification::add_points(progress, quest.points_reward);
    let streak_bonus = gamification::update_streak(progress, now);

    let mut level_completed = None;
    let mut badge_earned = None;

    if quest.position < level.last_position() {
        progress.current_quest = quest.position + 1;
    } else {
        level_completed = Some(level_id);
        if gamification::award_badge(progress, level.badge_id, now) {
            badge_earned = Some(level.badge_id.to_string());
        }
        if level_id < MAX_LEVEL {
            progress.current_level = level_id + 1;
            progress.current_quest = 1;
        }
        // Last quest of the final level: pointer left unchanged, the
        // journey is terminal and quest_at_pointer yields None.
    }

    debug!(
        quest_id,
        level = progress.current_level,
        quest = progress.current_quest,
        points = progress.total_points_earned,
        "Quest completed"
    );

    Ok(QuestCompletion {
        points_awarded: quest.points_reward,
        streak_bonus,
        level_completed,
        badge_earned,
        already_completed: false,
        terminal: is_terminal(catalog, progress),
    })
}

/// Mark every quest before a pointer as completed
///
/// Used by manual pointer repositioning: the completed set must stay a
/// superset of all quests in levels below the pointer, so skipping
/// forward marks the skipped quests (all lower levels plus earlier
/// positions within the target level) as done. Backfilled quests grant
/// no points and no badges; repositioning is administrative, not an
/// earning path.
pub fn backfill_completed(
    catalog: &JourneyCatalog,
    progress: &mut ProjectProgress,
    level_id: u32,
    quest_position: u32,
) {
    for level in &catalog.levels {
        for quest in &level.quests {
            let skipped = level.level < level_id
                || (level.level == level_id && quest.position < quest_position);
            if skipped {
                progress.completed_quests.insert(quest.id.to_string());
            }
        }
    }
}
