//! Content extraction for validation
//!
//! Builds the assessor input from the typed component set. Missing pieces
//! degrade to empty strings/lists; the checks themselves report on thin
//! content, extraction never fails.

use super::assessor::ProjectContent;
use crate::model::{ComponentContent, Geography, LfaComponent, LfaProject};

/// Default impact used while the vision component is still empty
const DEFAULT_IMPACT: &str = "Improved student learning outcomes";

/// Default timeline when implementation design has not set one
const DEFAULT_TIMELINE_MONTHS: u32 = 12;

/// Extract assessor input from a project and its components
pub fn extract_content(project: &LfaProject, components: &[LfaComponent]) -> ProjectContent {
    let mut content = ProjectContent {
        theme: project.theme.clone(),
        geography: project
            .geography
            .as_ref()
            .map(geography_summary)
            .unwrap_or_default(),
        timeline: format!("{} months", DEFAULT_TIMELINE_MONTHS),
        impact: DEFAULT_IMPACT.to_string(),
        ..ProjectContent::default()
    };

    for component in components {
        match &component.content {
            ComponentContent::ProblemDefinition { problem_statement, .. } => {
                content.problem_statement = problem_statement.clone();
            }
            ComponentContent::ImpactVision { impact_statement, .. } => {
                if !impact_statement.is_empty() {
                    content.impact = impact_statement.clone();
                }
            }
            ComponentContent::TheoryOfChange {
                activities,
                outcomes,
                ..
            } => {
                content.activities = activities.iter().map(|a| a.description.clone()).collect();
                content.outputs = activities.iter().map(|a| a.expected_output.clone()).collect();
                content.outcomes = outcomes.iter().map(|o| o.statement.clone()).collect();
            }
            ComponentContent::StakeholderFramework { stakeholders } => {
                content.stakeholder_types = stakeholders
                    .iter()
                    .map(|s| s.stakeholder_type.clone())
                    .collect();
                content.stakeholder_count = stakeholders.len();
            }
            ComponentContent::ImplementationDesign {
                geography,
                timeline_months,
                ..
            } => {
                if let Some(geo) = geography {
                    content.geography = geography_summary(geo);
                }
                if let Some(months) = timeline_months {
                    content.timeline = format!("{} months", months);
                }
            }
            ComponentContent::MonitoringEvaluation { indicators } => {
                content.indicator_count = indicators.len();
            }
        }
    }

    content
}

fn geography_summary(geography: &Geography) -> String {
    if geography.districts.is_empty() {
        geography.state.clone()
    } else {
        format!("{} ({})", geography.state, geography.districts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Activity, ComponentType, Outcome, ProjectStatus, StakeholderEntry, StakeholderLevel,
    };
    use chrono::Utc;
    use uuid::Uuid;

    fn project(geography: Option<Geography>) -> LfaProject {
        LfaProject {
            id: Uuid::new_v4(),
            title: "FLN pilot".to_string(),
            theme: "FLN".to_string(),
            status: ProjectStatus::InProgress,
            completion_percentage: 0,
            geography,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn component(project_id: Uuid, content: ComponentContent) -> LfaComponent {
        LfaComponent {
            id: Uuid::new_v4(),
            project_id,
            component_type: content.component_type(),
            content,
            is_complete: true,
            version: 1,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_extracts_chain_from_theory_of_change() {
        let p = project(None);
        let components = vec![component(
            p.id,
            ComponentContent::TheoryOfChange {
                activities: vec![Activity {
                    description: "Teacher training on TaRL".to_string(),
                    expected_output: "400 teachers trained".to_string(),
                }],
                outcomes: vec![Outcome {
                    statement: "Reading fluency improves".to_string(),
                    timeline: None,
                }],
                assumptions: vec![],
            },
        )];

        let content = extract_content(&p, &components);
        assert_eq!(content.activities, vec!["Teacher training on TaRL"]);
        assert_eq!(content.outputs, vec!["400 teachers trained"]);
        assert_eq!(content.outcomes, vec!["Reading fluency improves"]);
    }

    #[test]
    fn test_defaults_when_components_empty() {
        let p = project(None);
        let components: Vec<LfaComponent> = ComponentType::ALL
            .into_iter()
            .map(|t| component(p.id, ComponentContent::empty_for(t)))
            .collect();

        let content = extract_content(&p, &components);
        assert_eq!(content.impact, DEFAULT_IMPACT);
        assert_eq!(content.timeline, "12 months");
        assert!(content.problem_statement.is_empty());
        assert_eq!(content.stakeholder_count, 0);
    }

    #[test]
    fn test_implementation_design_overrides_geography_and_timeline() {
        let p = project(Some(Geography {
            state: "Bihar".to_string(),
            districts: vec![],
            blocks: vec![],
        }));
        let components = vec![component(
            p.id,
            ComponentContent::ImplementationDesign {
                geography: Some(Geography {
                    state: "Bihar".to_string(),
                    districts: vec!["Gaya".to_string(), "Nalanda".to_string()],
                    blocks: vec![],
                }),
                timeline_months: Some(24),
                phases: vec![],
            },
        )];

        let content = extract_content(&p, &components);
        assert_eq!(content.geography, "Bihar (Gaya, Nalanda)");
        assert_eq!(content.timeline, "24 months");
    }

    #[test]
    fn test_stakeholder_names_and_counts() {
        let p = project(None);
        let components = vec![component(
            p.id,
            ComponentContent::StakeholderFramework {
                stakeholders: vec![
                    StakeholderEntry {
                        stakeholder_type: "TEACHER".to_string(),
                        level: StakeholderLevel::School,
                        current_practice: None,
                        desired_practice: None,
                    },
                    StakeholderEntry {
                        stakeholder_type: "CRP".to_string(),
                        level: StakeholderLevel::Cluster,
                        current_practice: None,
                        desired_practice: None,
                    },
                ],
            },
        )];

        let content = extract_content(&p, &components);
        assert_eq!(content.stakeholder_types, vec!["TEACHER", "CRP"]);
        assert_eq!(content.stakeholder_count, 2);
    }
}
