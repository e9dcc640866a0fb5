//! Completion calculator
//!
//! Pure derivation of a project's completion percentage and status from
//! its component set. The stored percentage is a materialized view:
//! callers recompute it transactionally with every component write so a
//! stale read can never win a race.

use crate::model::{LfaComponent, ProjectStatus};

/// Percentage of components flagged complete, rounded to the nearest
/// integer; 0 for an empty slice
pub fn completion_percentage(components: &[LfaComponent]) -> u8 {
    let complete = components.iter().filter(|c| c.is_complete).count();
    percentage_of(complete, components.len())
}

/// Rounded percentage from raw counts; 0 when `total` is 0
///
/// The transactional recompute works from count queries, so the formula
/// lives here in one place.
pub fn percentage_of(complete: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((100.0 * complete as f64) / total as f64).round() as u8
}

/// Status tier derived from the percentage; Complete iff 100
pub fn status_for(percentage: u8) -> ProjectStatus {
    if percentage == 100 {
        ProjectStatus::Complete
    } else {
        ProjectStatus::InProgress
    }
}
