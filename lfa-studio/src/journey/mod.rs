//! Journey progression: catalog, quest state machine, gamification

pub mod catalog;
pub mod gamification;
pub mod progress;

pub use catalog::{JourneyCatalog, JourneyLevel, Quest, JOURNEY};
pub use progress::{
    backfill_completed, complete_quest, ProgressError, ProjectProgress, QuestCompletion,
};
