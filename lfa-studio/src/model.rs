//! Domain model for LFA projects
//!
//! An LFA (Logical Framework Analysis) project is built from exactly six
//! structured components, one per [`ComponentType`]. Component content is a
//! tagged union with a schema per type, so malformed content is rejected at
//! the API boundary instead of surfacing deep inside validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The six fixed LFA component types
///
/// One component per type is created at project inception; the set never
/// grows or shrinks afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentType {
    ProblemDefinition,
    ImpactVision,
    TheoryOfChange,
    StakeholderFramework,
    ImplementationDesign,
    MonitoringEvaluation,
}

impl ComponentType {
    /// All component types in canonical order
    pub const ALL: [ComponentType; 6] = [
        ComponentType::ProblemDefinition,
        ComponentType::ImpactVision,
        ComponentType::TheoryOfChange,
        ComponentType::StakeholderFramework,
        ComponentType::ImplementationDesign,
        ComponentType::MonitoringEvaluation,
    ];

    /// Database / wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::ProblemDefinition => "PROBLEM_DEFINITION",
            ComponentType::ImpactVision => "IMPACT_VISION",
            ComponentType::TheoryOfChange => "THEORY_OF_CHANGE",
            ComponentType::StakeholderFramework => "STAKEHOLDER_FRAMEWORK",
            ComponentType::ImplementationDesign => "IMPLEMENTATION_DESIGN",
            ComponentType::MonitoringEvaluation => "MONITORING_EVALUATION",
        }
    }

    /// Parse the database representation
    pub fn parse(s: &str) -> Option<ComponentType> {
        ComponentType::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// Geographic scope of a project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geography {
    pub state: String,
    #[serde(default)]
    pub districts: Vec<String>,
    #[serde(default)]
    pub blocks: Vec<String>,
}

/// One program activity with its expected output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub description: String,
    #[serde(default)]
    pub expected_output: String,
}

/// One outcome statement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub statement: String,
    #[serde(default)]
    pub timeline: Option<String>,
}

/// Administrative level a stakeholder operates at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StakeholderLevel {
    School,
    Cluster,
    Block,
    District,
    State,
}

/// One stakeholder mapping entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeholderEntry {
    pub stakeholder_type: String,
    pub level: StakeholderLevel,
    #[serde(default)]
    pub current_practice: Option<String>,
    #[serde(default)]
    pub desired_practice: Option<String>,
}

/// Kind of measurement an indicator tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndicatorType {
    Outcome,
    Output,
    Process,
}

/// One indicator definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorEntry {
    pub name: String,
    pub indicator_type: IndicatorType,
    #[serde(default)]
    pub measurement_method: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
}

/// Structured content of one component, keyed by component type
///
/// The serde tag matches [`ComponentType::as_str`]; a payload whose tag
/// disagrees with the component's declared type is rejected before any
/// write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentContent {
    #[serde(rename_all = "camelCase")]
    ProblemDefinition {
        problem_statement: String,
        #[serde(default)]
        evidence: Vec<String>,
        #[serde(default)]
        affected_groups: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    ImpactVision {
        impact_statement: String,
        #[serde(default)]
        vision_narrative: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    TheoryOfChange {
        #[serde(default)]
        activities: Vec<Activity>,
        #[serde(default)]
        outcomes: Vec<Outcome>,
        #[serde(default)]
        assumptions: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    StakeholderFramework {
        #[serde(default)]
        stakeholders: Vec<StakeholderEntry>,
    },
    #[serde(rename_all = "camelCase")]
    ImplementationDesign {
        #[serde(default)]
        geography: Option<Geography>,
        #[serde(default)]
        timeline_months: Option<u32>,
        #[serde(default)]
        phases: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    MonitoringEvaluation {
        #[serde(default)]
        indicators: Vec<IndicatorEntry>,
    },
}

impl ComponentContent {
    /// Component type this content variant belongs to
    pub fn component_type(&self) -> ComponentType {
        match self {
            ComponentContent::ProblemDefinition { .. } => ComponentType::ProblemDefinition,
            ComponentContent::ImpactVision { .. } => ComponentType::ImpactVision,
            ComponentContent::TheoryOfChange { .. } => ComponentType::TheoryOfChange,
            ComponentContent::StakeholderFramework { .. } => ComponentType::StakeholderFramework,
            ComponentContent::ImplementationDesign { .. } => ComponentType::ImplementationDesign,
            ComponentContent::MonitoringEvaluation { .. } => ComponentType::MonitoringEvaluation,
        }
    }

    /// Empty content for a freshly created component
    pub fn empty_for(component_type: ComponentType) -> ComponentContent {
        match component_type {
            ComponentType::ProblemDefinition => ComponentContent::ProblemDefinition {
                problem_statement: String::new(),
                evidence: Vec::new(),
                affected_groups: Vec::new(),
            },
            ComponentType::ImpactVision => ComponentContent::ImpactVision {
                impact_statement: String::new(),
                vision_narrative: None,
            },
            ComponentType::TheoryOfChange => ComponentContent::TheoryOfChange {
                activities: Vec::new(),
                outcomes: Vec::new(),
                assumptions: Vec::new(),
            },
            ComponentType::StakeholderFramework => ComponentContent::StakeholderFramework {
                stakeholders: Vec::new(),
            },
            ComponentType::ImplementationDesign => ComponentContent::ImplementationDesign {
                geography: None,
                timeline_months: None,
                phases: Vec::new(),
            },
            ComponentType::MonitoringEvaluation => ComponentContent::MonitoringEvaluation {
                indicators: Vec::new(),
            },
        }
    }
}

/// One structured content block of a project
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LfaComponent {
    pub id: Uuid,
    pub project_id: Uuid,
    pub component_type: ComponentType,
    pub content: ComponentContent,
    pub is_complete: bool,
    /// Incremented on every content update, paired with a history entry
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Immutable audit-log entry for one component update
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionEntry {
    pub id: Uuid,
    pub project_id: Uuid,
    pub component_id: Uuid,
    /// Identity of the editor (opaque to the engine)
    pub changed_by: Option<String>,
    pub previous_content: ComponentContent,
    pub new_content: ComponentContent,
    pub change_summary: String,
    pub created_at: DateTime<Utc>,
}

/// Project status, a total function of completion percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    InProgress,
    Complete,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::InProgress => "IN_PROGRESS",
            ProjectStatus::Complete => "COMPLETE",
        }
    }

    pub fn parse(s: &str) -> Option<ProjectStatus> {
        match s {
            "IN_PROGRESS" => Some(ProjectStatus::InProgress),
            "COMPLETE" => Some(ProjectStatus::Complete),
            _ => None,
        }
    }
}

/// An LFA project record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LfaProject {
    pub id: Uuid,
    pub title: String,
    /// Program theme (e.g. "FLN", "CAREER_READINESS")
    pub theme: String,
    pub status: ProjectStatus,
    /// Materialized view over the component set; recomputed on every
    /// component write, never on read
    pub completion_percentage: u8,
    pub geography: Option<Geography>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_type_roundtrip() {
        for t in ComponentType::ALL {
            assert_eq!(ComponentType::parse(t.as_str()), Some(t));
        }
        assert_eq!(ComponentType::parse("NOT_A_TYPE"), None);
    }

    #[test]
    fn test_content_tag_matches_component_type() {
        for t in ComponentType::ALL {
            assert_eq!(ComponentContent::empty_for(t).component_type(), t);
        }
    }

    #[test]
    fn test_content_serde_tag() {
        let content = ComponentContent::ProblemDefinition {
            problem_statement: "Low FLN outcomes in grade 3".to_string(),
            evidence: vec!["ASER 2024".to_string()],
            affected_groups: vec!["students".to_string()],
        };
        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json["kind"], "PROBLEM_DEFINITION");
        assert_eq!(json["problemStatement"], "Low FLN outcomes in grade 3");

        let back: ComponentContent = serde_json::from_value(json).unwrap();
        assert_eq!(back, content);
    }

    #[test]
    fn test_mismatched_tag_fails_deserialization() {
        // TheoryOfChange payload under an unknown tag must not parse
        let json = serde_json::json!({
            "kind": "SOMETHING_ELSE",
            "activities": [],
        });
        assert!(serde_json::from_value::<ComponentContent>(json).is_err());
    }

    #[test]
    fn test_status_derivation_strings() {
        assert_eq!(ProjectStatus::parse("COMPLETE"), Some(ProjectStatus::Complete));
        assert_eq!(ProjectStatus::parse("IN_PROGRESS"), Some(ProjectStatus::InProgress));
        assert_eq!(ProjectStatus::parse("DRAFT"), None);
    }
}
