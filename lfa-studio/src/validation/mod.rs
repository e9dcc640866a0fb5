//! Multi-check design validation
//!
//! Four independent assessment checks (logic chain, SMART, contextual
//! suggestions, quality score) run concurrently against a project's
//! extracted content and are merged into one verdict. Each check degrades
//! to a deterministic fallback when the external assessor fails; a raw
//! assessor fault never escapes the aggregator.

pub mod aggregator;
pub mod assessor;
pub mod extract;
pub mod groq;

pub use aggregator::ValidationAggregator;
pub use assessor::{AssessError, Assessor, ProjectContent, SmartContext};
pub use groq::GroqAssessor;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Issue severity reported by the logic-chain check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

/// Causal link an issue is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CausalLink {
    ActivityOutput,
    OutputOutcome,
    OutcomeImpact,
}

/// One issue found in the logic chain
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicIssue {
    pub severity: Severity,
    pub component: CausalLink,
    pub message: String,
    pub suggestion: String,
}

/// Result of the logic-chain check
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogicChainResult {
    pub is_valid: bool,
    /// 0-100
    pub score: f32,
    pub issues: Vec<LogicIssue>,
    pub strengths: Vec<String>,
}

impl LogicChainResult {
    /// Deterministic result when the underlying check could not run
    pub fn fallback() -> Self {
        Self {
            is_valid: false,
            score: 0.0,
            issues: vec![LogicIssue {
                severity: Severity::Critical,
                component: CausalLink::ActivityOutput,
                message: "Logic validation could not run. Please review manually.".to_string(),
                suggestion: "Check assessor configuration or try again.".to_string(),
            }],
            strengths: Vec::new(),
        }
    }
}

/// Score and feedback for one SMART dimension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionScore {
    /// 0-100
    pub score: f32,
    pub feedback: String,
}

impl DimensionScore {
    fn failed() -> Self {
        Self {
            score: 0.0,
            feedback: "Validation failed".to_string(),
        }
    }
}

/// The five SMART dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartDimensions {
    pub specific: DimensionScore,
    pub measurable: DimensionScore,
    pub achievable: DimensionScore,
    pub relevant: DimensionScore,
    pub time_bound: DimensionScore,
}

/// Result of the SMART check for one outcome statement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartResult {
    /// 0-100, arithmetic mean of the five dimensions (assessor contract)
    pub score: f32,
    pub dimensions: SmartDimensions,
    /// SMART-compliant rewrite of the statement
    pub improved_version: String,
    /// Assessor confidence, 0-100
    pub confidence: f32,
}

impl SmartResult {
    /// Fallback for one outcome: all dimensions zero, statement unchanged
    pub fn fallback(statement: &str) -> Self {
        Self {
            score: 0.0,
            dimensions: SmartDimensions {
                specific: DimensionScore::failed(),
                measurable: DimensionScore::failed(),
                achievable: DimensionScore::failed(),
                relevant: DimensionScore::failed(),
                time_bound: DimensionScore::failed(),
            },
            improved_version: statement.to_string(),
            confidence: 0.0,
        }
    }
}

/// Category of a contextual suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionCategory {
    Indicator,
    Stakeholder,
    Activity,
    PracticeChange,
}

/// One contextual suggestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: SuggestionCategory,
    pub title: String,
    pub description: String,
    pub rationale: String,
    pub examples: Vec<String>,
}

/// Result of the contextual-suggestions check
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextSuggestions {
    pub suggestions: Vec<Suggestion>,
    pub relevant_patterns: Vec<String>,
    pub warnings: Vec<String>,
}

impl ContextSuggestions {
    /// Fallback: empty lists plus a single availability warning
    pub fn fallback() -> Self {
        Self {
            suggestions: Vec::new(),
            relevant_patterns: Vec::new(),
            warnings: vec!["Suggestions unavailable. Please proceed manually.".to_string()],
        }
    }
}

/// Submission readiness tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Readiness {
    Draft,
    NeedsWork,
    ReviewReady,
    FunderReady,
}

/// The five quality dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityDimensions {
    pub problem_clarity: f32,
    pub logic_coherence: f32,
    pub stakeholder_coverage: f32,
    pub measurement_quality: f32,
    pub feasibility: f32,
}

/// Result of the overall quality check
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityAssessment {
    /// 0-100
    pub overall_score: f32,
    pub readiness: Readiness,
    pub dimension_scores: QualityDimensions,
    pub top_strengths: Vec<String>,
    pub critical_gaps: Vec<String>,
    pub next_steps: Vec<String>,
    pub estimated_review_time: String,
}

impl QualityAssessment {
    /// Fallback: zero scores, draft readiness, a single critical gap
    pub fn fallback() -> Self {
        Self {
            overall_score: 0.0,
            readiness: Readiness::Draft,
            dimension_scores: QualityDimensions {
                problem_clarity: 0.0,
                logic_coherence: 0.0,
                stakeholder_coverage: 0.0,
                measurement_quality: 0.0,
                feasibility: 0.0,
            },
            top_strengths: Vec::new(),
            critical_gaps: vec!["Assessment failed. Please review manually.".to_string()],
            next_steps: vec!["Retry validation or proceed with manual review.".to_string()],
            estimated_review_time: "Unknown".to_string(),
        }
    }
}

/// Merged result of a full validation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensiveValidation {
    pub timestamp: DateTime<Utc>,
    pub logic_chain: LogicChainResult,
    pub smart_validation: Vec<SmartResult>,
    pub contextual_advice: ContextSuggestions,
    pub quality_assessment: QualityAssessment,
    /// Mean of per-outcome SMART scores; 0 when there are no outcomes
    pub avg_smart_score: f32,
    pub overall_recommendation: String,
}

/// Selector for running one check in isolation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationType {
    Full,
    Logic,
    Smart,
    Suggestions,
    Quality,
}

/// Result of a single-check run
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SingleValidation {
    Logic(LogicChainResult),
    Smart(Vec<SmartResult>),
    Suggestions(ContextSuggestions),
    Quality(QualityAssessment),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_wire_representations() {
        assert_eq!(serde_json::to_value(Severity::Critical).unwrap(), "critical");
        assert_eq!(
            serde_json::to_value(CausalLink::OutputOutcome).unwrap(),
            "output-outcome"
        );
        assert_eq!(
            serde_json::to_value(Readiness::FunderReady).unwrap(),
            "funder-ready"
        );
        assert_eq!(
            serde_json::to_value(SuggestionCategory::PracticeChange).unwrap(),
            "practice-change"
        );
        assert_eq!(
            serde_json::from_value::<ValidationType>(serde_json::json!("smart")).unwrap(),
            ValidationType::Smart
        );
    }

    #[test]
    fn test_logic_fallback_shape() {
        let fallback = LogicChainResult::fallback();
        assert!(!fallback.is_valid);
        assert_eq!(fallback.score, 0.0);
        assert_eq!(fallback.issues.len(), 1);
        assert_eq!(fallback.issues[0].severity, Severity::Critical);
        assert!(fallback.strengths.is_empty());
    }

    #[test]
    fn test_smart_fallback_preserves_statement() {
        let fallback = SmartResult::fallback("80% of grade 3 students read fluently by 2027");
        assert_eq!(fallback.score, 0.0);
        assert_eq!(fallback.confidence, 0.0);
        assert_eq!(
            fallback.improved_version,
            "80% of grade 3 students read fluently by 2027"
        );
        assert_eq!(fallback.dimensions.time_bound.score, 0.0);
    }

    #[test]
    fn test_quality_fallback_is_draft() {
        let fallback = QualityAssessment::fallback();
        assert_eq!(fallback.overall_score, 0.0);
        assert_eq!(fallback.readiness, Readiness::Draft);
        assert_eq!(fallback.critical_gaps.len(), 1);
    }

    #[test]
    fn test_smart_result_parses_assessor_payload() {
        // Shape the assessor is contracted to return
        let json = serde_json::json!({
            "score": 72.0,
            "dimensions": {
                "specific": { "score": 80.0, "feedback": "Clear target group" },
                "measurable": { "score": 70.0, "feedback": "Metric implied" },
                "achievable": { "score": 75.0, "feedback": "Plausible" },
                "relevant": { "score": 85.0, "feedback": "Aligned" },
                "timeBound": { "score": 50.0, "feedback": "No deadline" }
            },
            "improvedVersion": "By March 2027, ...",
            "confidence": 88.0
        });
        let result: SmartResult = serde_json::from_value(json).unwrap();
        assert_eq!(result.dimensions.time_bound.score, 50.0);
        assert_eq!(result.confidence, 88.0);
    }
}
