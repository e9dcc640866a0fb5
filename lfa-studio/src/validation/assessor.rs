//! Assessor contract
//!
//! The aggregator talks to the external text-assessment service through
//! this trait. Implementations are constructed explicitly and injected
//! into application state so tests can substitute fakes.

use super::{ContextSuggestions, LogicChainResult, QualityAssessment, SmartResult};
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Assessor call failures
///
/// Always recovered locally by the aggregator's fallbacks; never
/// propagated to its callers.
#[derive(Debug, Error)]
pub enum AssessError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Assessor not configured: {0}")]
    NotConfigured(String),
}

/// Project content extracted for assessment
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContent {
    pub problem_statement: String,
    pub activities: Vec<String>,
    pub outputs: Vec<String>,
    pub outcomes: Vec<String>,
    pub impact: String,
    pub stakeholder_types: Vec<String>,
    pub stakeholder_count: usize,
    pub indicator_count: usize,
    pub theme: String,
    pub geography: String,
    pub timeline: String,
}

impl ProjectContent {
    /// Context slice passed to the per-outcome SMART check
    pub fn smart_context(&self) -> SmartContext {
        SmartContext {
            theme: self.theme.clone(),
            geography: self.geography.clone(),
            timeline: self.timeline.clone(),
        }
    }
}

/// Context for SMART evaluation of one statement
#[derive(Debug, Clone, Serialize)]
pub struct SmartContext {
    pub theme: String,
    pub geography: String,
    pub timeline: String,
}

/// External text-assessment service
///
/// The four checks are independent and order-insensitive; each call either
/// returns a result or an error, never hangs by contract of the client
/// (the HTTP implementation carries its own request timeout).
#[async_trait]
pub trait Assessor: Send + Sync {
    /// Check the activity -> output -> outcome -> impact chain
    async fn logic_chain(&self, content: &ProjectContent) -> Result<LogicChainResult, AssessError>;

    /// Evaluate one outcome statement against SMART criteria
    async fn smart(&self, statement: &str, context: &SmartContext)
        -> Result<SmartResult, AssessError>;

    /// Produce sector-specific suggestions for the program context
    async fn contextual_suggestions(
        &self,
        content: &ProjectContent,
    ) -> Result<ContextSuggestions, AssessError>;

    /// Assess overall design quality and readiness
    async fn quality(&self, content: &ProjectContent) -> Result<QualityAssessment, AssessError>;
}
