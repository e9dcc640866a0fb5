//! Journey catalog: the static level/quest map
//!
//! Immutable configuration loaded once at process start and read without
//! locking by any number of concurrent callers. Levels are ordered 1..5;
//! quest positions are 1-based within their level.

use crate::model::ComponentType;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Process-wide journey catalog
pub static JOURNEY: Lazy<JourneyCatalog> = Lazy::new(JourneyCatalog::standard);

/// One quest in the journey map
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    /// Globally unique quest identifier (slug)
    pub id: &'static str,
    /// 1-based position within the level
    pub position: u32,
    pub title: &'static str,
    /// Component the quest's form writes into
    pub component_type: ComponentType,
    pub points_reward: u64,
    pub estimated_minutes: u32,
}

/// One level of the journey map
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JourneyLevel {
    /// Ordinal 1..5
    pub level: u32,
    pub name: &'static str,
    pub description: &'static str,
    /// Badge awarded when the last quest of the level completes
    pub badge_id: &'static str,
    pub quests: Vec<Quest>,
}

impl JourneyLevel {
    /// Find a quest of this level by id
    pub fn quest(&self, quest_id: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == quest_id)
    }

    /// Position of the last quest in this level
    pub fn last_position(&self) -> u32 {
        self.quests.len() as u32
    }
}

/// The full ordered journey definition
#[derive(Debug, Clone, Serialize)]
pub struct JourneyCatalog {
    pub levels: Vec<JourneyLevel>,
}

/// Highest level ordinal in the journey
pub const MAX_LEVEL: u32 = 5;

impl JourneyCatalog {
    /// Find a level by ordinal
    pub fn level(&self, level_id: u32) -> Option<&JourneyLevel> {
        self.levels.iter().find(|l| l.level == level_id)
    }

    /// Find a quest by level ordinal and quest id
    pub fn quest(&self, level_id: u32, quest_id: &str) -> Option<&Quest> {
        self.level(level_id)?.quest(quest_id)
    }

    /// Quest at a (level, position) pointer
    pub fn quest_at(&self, level_id: u32, position: u32) -> Option<&Quest> {
        self.level(level_id)?
            .quests
            .iter()
            .find(|q| q.position == position)
    }

    /// Total quest count across all levels
    pub fn total_quests(&self) -> usize {
        self.levels.iter().map(|l| l.quests.len()).sum()
    }

    /// The standard five-level journey
    pub fn standard() -> JourneyCatalog {
        fn quest(
            id: &'static str,
            position: u32,
            title: &'static str,
            component_type: ComponentType,
            points_reward: u64,
            estimated_minutes: u32,
        ) -> Quest {
            Quest {
                id,
                position,
                title,
                component_type,
                points_reward,
                estimated_minutes,
            }
        }

        JourneyCatalog {
            levels: vec![
                JourneyLevel {
                    level: 1,
                    name: "Problem Explorer",
                    description: "Define the problem and ground it in evidence",
                    badge_id: "problem-explorer",
                    quests: vec![
                        quest(
                            "l1-problem-statement",
                            1,
                            "Write the problem statement",
                            ComponentType::ProblemDefinition,
                            50,
                            20,
                        ),
                        quest(
                            "l1-evidence-baseline",
                            2,
                            "Collect evidence and baseline data",
                            ComponentType::ProblemDefinition,
                            50,
                            30,
                        ),
                    ],
                },
                JourneyLevel {
                    level: 2,
                    name: "Vision Architect",
                    description: "Articulate the long-term impact",
                    badge_id: "vision-architect",
                    quests: vec![
                        quest(
                            "l2-impact-statement",
                            1,
                            "Draft the impact statement",
                            ComponentType::ImpactVision,
                            75,
                            25,
                        ),
                        quest(
                            "l2-vision-narrative",
                            2,
                            "Describe the vision of change",
                            ComponentType::ImpactVision,
                            75,
                            30,
                        ),
                    ],
                },
                JourneyLevel {
                    level: 3,
                    name: "Change Strategist",
                    description: "Build the activity-to-outcome logic chain",
                    badge_id: "change-strategist",
                    quests: vec![
                        quest(
                            "l3-activity-mapping",
                            1,
                            "Map activities and outputs",
                            ComponentType::TheoryOfChange,
                            100,
                            45,
                        ),
                        quest(
                            "l3-outcome-chain",
                            2,
                            "Chain outputs to outcomes",
                            ComponentType::TheoryOfChange,
                            100,
                            45,
                        ),
                        quest(
                            "l3-assumptions",
                            3,
                            "Surface the assumptions",
                            ComponentType::TheoryOfChange,
                            75,
                            20,
                        ),
                    ],
                },
                JourneyLevel {
                    level: 4,
                    name: "System Designer",
                    description: "Map stakeholders and design the rollout",
                    badge_id: "system-designer",
                    quests: vec![
                        quest(
                            "l4-stakeholder-mapping",
                            1,
                            "Map the stakeholder system",
                            ComponentType::StakeholderFramework,
                            100,
                            40,
                        ),
                        quest(
                            "l4-practice-change",
                            2,
                            "Define practice changes per stakeholder",
                            ComponentType::StakeholderFramework,
                            100,
                            40,
                        ),
                        quest(
                            "l4-geography-timeline",
                            3,
                            "Set geography and timeline",
                            ComponentType::ImplementationDesign,
                            75,
                            20,
                        ),
                        quest(
                            "l4-implementation-phases",
                            4,
                            "Phase the implementation",
                            ComponentType::ImplementationDesign,
                            100,
                            35,
                        ),
                    ],
                },
                JourneyLevel {
                    level: 5,
                    name: "Evidence Champion",
                    description: "Design measurement and get review-ready",
                    badge_id: "evidence-champion",
                    quests: vec![
                        quest(
                            "l5-indicator-design",
                            1,
                            "Design lead and lag indicators",
                            ComponentType::MonitoringEvaluation,
                            125,
                            45,
                        ),
                        quest(
                            "l5-measurement-plan",
                            2,
                            "Plan measurement methods and frequency",
                            ComponentType::MonitoringEvaluation,
                            125,
                            40,
                        ),
                        quest(
                            "l5-review-readiness",
                            3,
                            "Run the readiness review",
                            ComponentType::MonitoringEvaluation,
                            150,
                            30,
                        ),
                    ],
                },
            ],
        }
    }
}
