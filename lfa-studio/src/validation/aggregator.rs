//! Validation aggregator
//!
//! Runs the four checks concurrently, applies per-check fallbacks, and
//! merges the results into one verdict. The aggregator is infallible by
//! construction: an assessor fault downgrades that check to its fallback
//! and the run still completes.

use super::assessor::{Assessor, ProjectContent};
use super::{
    ComprehensiveValidation, ContextSuggestions, LogicChainResult, QualityAssessment,
    SingleValidation, SmartResult, ValidationType,
};
use futures::future::join_all;
use std::sync::Arc;
use tracing::warn;

/// Runs assessment checks and merges their results
#[derive(Clone)]
pub struct ValidationAggregator {
    assessor: Arc<dyn Assessor>,
}

impl ValidationAggregator {
    pub fn new(assessor: Arc<dyn Assessor>) -> Self {
        Self { assessor }
    }

    /// Run all four checks concurrently and merge
    pub async fn run_full(&self, content: &ProjectContent) -> ComprehensiveValidation {
        let (logic_chain, smart_validation, contextual_advice, quality_assessment) = tokio::join!(
            self.logic_with_fallback(content),
            self.smart_all(content),
            self.suggestions_with_fallback(content),
            self.quality_with_fallback(content),
        );

        let avg_smart_score = avg_smart_score(&smart_validation);
        let overall_recommendation = recommendation_for(quality_assessment.overall_score);

        ComprehensiveValidation {
            timestamp: lfa_common::time::now(),
            logic_chain,
            smart_validation,
            contextual_advice,
            quality_assessment,
            avg_smart_score,
            overall_recommendation,
        }
    }

    /// Run one check in isolation; `Full` delegates to [`run_full`](Self::run_full)
    pub async fn run_single(
        &self,
        validation_type: ValidationType,
        content: &ProjectContent,
    ) -> SingleValidation {
        match validation_type {
            ValidationType::Full => {
                // Callers route Full to run_full; keep this total anyway
                SingleValidation::Quality(self.quality_with_fallback(content).await)
            }
            ValidationType::Logic => {
                SingleValidation::Logic(self.logic_with_fallback(content).await)
            }
            ValidationType::Smart => SingleValidation::Smart(self.smart_all(content).await),
            ValidationType::Suggestions => {
                SingleValidation::Suggestions(self.suggestions_with_fallback(content).await)
            }
            ValidationType::Quality => {
                SingleValidation::Quality(self.quality_with_fallback(content).await)
            }
        }
    }

    async fn logic_with_fallback(&self, content: &ProjectContent) -> LogicChainResult {
        match self.assessor.logic_chain(content).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Logic chain check failed, using fallback: {}", e);
                LogicChainResult::fallback()
            }
        }
    }

    /// Fan out the SMART check over every outcome statement
    async fn smart_all(&self, content: &ProjectContent) -> Vec<SmartResult> {
        let context = content.smart_context();
        let checks = content.outcomes.iter().map(|statement| {
            let context = context.clone();
            async move {
                match self.assessor.smart(statement, &context).await {
                    Ok(result) => result,
                    Err(e) => {
                        warn!("SMART check failed for one outcome, using fallback: {}", e);
                        SmartResult::fallback(statement)
                    }
                }
            }
        });
        join_all(checks).await
    }

    async fn suggestions_with_fallback(&self, content: &ProjectContent) -> ContextSuggestions {
        match self.assessor.contextual_suggestions(content).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Contextual suggestions check failed, using fallback: {}", e);
                ContextSuggestions::fallback()
            }
        }
    }

    async fn quality_with_fallback(&self, content: &ProjectContent) -> QualityAssessment {
        match self.assessor.quality(content).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Quality check failed, using fallback: {}", e);
                QualityAssessment::fallback()
            }
        }
    }
}

/// Mean of per-outcome SMART scores; 0 when no outcomes were checked
fn avg_smart_score(results: &[SmartResult]) -> f32 {
    if results.is_empty() {
        return 0.0;
    }
    results.iter().map(|r| r.score).sum::<f32>() / results.len() as f32
}

/// Recommendation text keyed off the quality overall score
fn recommendation_for(overall_score: f32) -> String {
    let text = if overall_score >= 85.0 {
        "Funder-ready: this design is strong and ready for submission."
    } else if overall_score >= 70.0 {
        "Review-ready: good foundation, but address critical gaps before submitting."
    } else if overall_score >= 50.0 {
        "Needs work: core elements are present but require significant refinement."
    } else {
        "Draft stage: continue working through the journey to strengthen the design."
    };
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::assessor::{AssessError, SmartContext};
    use crate::validation::{
        DimensionScore, QualityDimensions, Readiness, SmartDimensions,
    };
    use async_trait::async_trait;

    /// Scripted assessor: each check either succeeds with a canned result
    /// or fails, per the flags
    struct MockAssessor {
        logic_ok: bool,
        smart_ok: bool,
        suggestions_ok: bool,
        quality_ok: bool,
        quality_score: f32,
        smart_scores: Vec<f32>,
    }

    impl Default for MockAssessor {
        fn default() -> Self {
            Self {
                logic_ok: true,
                smart_ok: true,
                suggestions_ok: true,
                quality_ok: true,
                quality_score: 75.0,
                smart_scores: vec![70.0],
            }
        }
    }

    fn smart_result(score: f32) -> SmartResult {
        let dim = || DimensionScore {
            score,
            feedback: "ok".to_string(),
        };
        SmartResult {
            score,
            dimensions: SmartDimensions {
                specific: dim(),
                measurable: dim(),
                achievable: dim(),
                relevant: dim(),
                time_bound: dim(),
            },
            improved_version: "improved".to_string(),
            confidence: 90.0,
        }
    }

    #[async_trait]
    impl Assessor for MockAssessor {
        async fn logic_chain(
            &self,
            _content: &ProjectContent,
        ) -> Result<LogicChainResult, AssessError> {
            if self.logic_ok {
                Ok(LogicChainResult {
                    is_valid: true,
                    score: 80.0,
                    issues: vec![],
                    strengths: vec!["Coherent chain".to_string()],
                })
            } else {
                Err(AssessError::Network("connection refused".to_string()))
            }
        }

        async fn smart(
            &self,
            statement: &str,
            _context: &SmartContext,
        ) -> Result<SmartResult, AssessError> {
            if self.smart_ok {
                // Pick the scripted score by statement index suffix
                let index: usize = statement
                    .rsplit(' ')
                    .next()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0);
                Ok(smart_result(
                    self.smart_scores.get(index).copied().unwrap_or(70.0),
                ))
            } else {
                Err(AssessError::Api(500, "upstream error".to_string()))
            }
        }

        async fn contextual_suggestions(
            &self,
            _content: &ProjectContent,
        ) -> Result<ContextSuggestions, AssessError> {
            if self.suggestions_ok {
                Ok(ContextSuggestions {
                    suggestions: vec![],
                    relevant_patterns: vec!["TaRL grouping".to_string()],
                    warnings: vec![],
                })
            } else {
                Err(AssessError::Parse("bad json".to_string()))
            }
        }

        async fn quality(
            &self,
            _content: &ProjectContent,
        ) -> Result<QualityAssessment, AssessError> {
            if self.quality_ok {
                Ok(QualityAssessment {
                    overall_score: self.quality_score,
                    readiness: Readiness::ReviewReady,
                    dimension_scores: QualityDimensions {
                        problem_clarity: self.quality_score,
                        logic_coherence: self.quality_score,
                        stakeholder_coverage: self.quality_score,
                        measurement_quality: self.quality_score,
                        feasibility: self.quality_score,
                    },
                    top_strengths: vec![],
                    critical_gaps: vec![],
                    next_steps: vec![],
                    estimated_review_time: "2 hours".to_string(),
                })
            } else {
                Err(AssessError::NotConfigured("no key".to_string()))
            }
        }
    }

    fn content_with_outcomes(count: usize) -> ProjectContent {
        ProjectContent {
            outcomes: (0..count).map(|i| format!("outcome {}", i)).collect(),
            ..ProjectContent::default()
        }
    }

    fn aggregator(mock: MockAssessor) -> ValidationAggregator {
        ValidationAggregator::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_full_run_merges_all_checks() {
        let agg = aggregator(MockAssessor::default());
        let result = agg.run_full(&content_with_outcomes(1)).await;

        assert!(result.logic_chain.is_valid);
        assert_eq!(result.smart_validation.len(), 1);
        assert_eq!(result.quality_assessment.overall_score, 75.0);
        assert_eq!(
            result.overall_recommendation,
            "Review-ready: good foundation, but address critical gaps before submitting."
        );
    }

    #[tokio::test]
    async fn test_avg_smart_score_is_mean() {
        let agg = aggregator(MockAssessor {
            smart_scores: vec![80.0, 60.0],
            ..MockAssessor::default()
        });
        let result = agg.run_full(&content_with_outcomes(2)).await;
        assert_eq!(result.avg_smart_score, 70.0);
    }

    #[tokio::test]
    async fn test_no_outcomes_yields_zero_smart_score() {
        let agg = aggregator(MockAssessor::default());
        let result = agg.run_full(&content_with_outcomes(0)).await;
        assert!(result.smart_validation.is_empty());
        assert_eq!(result.avg_smart_score, 0.0);
    }

    #[tokio::test]
    async fn test_every_check_failing_still_completes() {
        let agg = aggregator(MockAssessor {
            logic_ok: false,
            smart_ok: false,
            suggestions_ok: false,
            quality_ok: false,
            ..MockAssessor::default()
        });
        let result = agg.run_full(&content_with_outcomes(2)).await;

        assert!(!result.logic_chain.is_valid);
        assert_eq!(result.smart_validation.len(), 2);
        assert_eq!(result.smart_validation[0].score, 0.0);
        assert_eq!(result.smart_validation[0].improved_version, "outcome 0");
        assert_eq!(result.quality_assessment.readiness, Readiness::Draft);
        assert_eq!(result.avg_smart_score, 0.0);
        assert_eq!(
            result.overall_recommendation,
            "Draft stage: continue working through the journey to strengthen the design."
        );
    }

    #[tokio::test]
    async fn test_quality_failure_forces_draft_recommendation() {
        // Quality fallback scores 0, so recommendation lands at draft even
        // when every other check succeeds
        let agg = aggregator(MockAssessor {
            quality_ok: false,
            ..MockAssessor::default()
        });
        let result = agg.run_full(&content_with_outcomes(1)).await;
        assert!(result.logic_chain.is_valid);
        assert!(result.overall_recommendation.starts_with("Draft stage"));
    }

    #[tokio::test]
    async fn test_single_check_runs_only_that_check() {
        let agg = aggregator(MockAssessor::default());
        let result = agg
            .run_single(ValidationType::Logic, &content_with_outcomes(1))
            .await;
        assert!(matches!(result, SingleValidation::Logic(_)));

        let result = agg
            .run_single(ValidationType::Smart, &content_with_outcomes(3))
            .await;
        match result {
            SingleValidation::Smart(results) => assert_eq!(results.len(), 3),
            _ => panic!("expected smart results"),
        }
    }

    #[test]
    fn test_recommendation_thresholds() {
        assert!(recommendation_for(85.0).starts_with("Funder-ready"));
        assert!(recommendation_for(84.9).starts_with("Review-ready"));
        assert!(recommendation_for(70.0).starts_with("Review-ready"));
        assert!(recommendation_for(69.9).starts_with("Needs work"));
        assert!(recommendation_for(50.0).starts_with("Needs work"));
        assert!(recommendation_for(49.9).starts_with("Draft stage"));
        assert!(recommendation_for(0.0).starts_with("Draft stage"));
    }
}
