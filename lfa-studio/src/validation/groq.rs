//! Groq chat-completions assessor
//!
//! Implements the [`Assessor`] contract against Groq's OpenAI-compatible
//! API. Each check is one chat completion with `response_format =
//! json_object` and a prompt naming the exact JSON schema of its result
//! type; the model's payload deserializes directly into that type.

use super::assessor::{AssessError, Assessor, ProjectContent, SmartContext};
use super::{ContextSuggestions, LogicChainResult, QualityAssessment, SmartResult};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
/// Default model: best balance of quality and inference speed
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Chat completion response envelope
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Groq API client implementing the assessor contract
pub struct GroqAssessor {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GroqAssessor {
    pub fn new(api_key: String, model: Option<String>) -> Result<Self, AssessError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AssessError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }

    /// Issue one JSON-mode chat completion and deserialize its payload
    async fn complete<T: DeserializeOwned>(
        &self,
        system: &str,
        prompt: String,
        temperature: f32,
    ) -> Result<T, AssessError> {
        if self.api_key.trim().is_empty() {
            return Err(AssessError::NotConfigured(
                "Groq API key is not set".to_string(),
            ));
        }

        let url = format!("{}/chat/completions", GROQ_BASE_URL);
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": prompt },
            ],
            "temperature": temperature,
            "response_format": { "type": "json_object" },
        });

        debug!(model = %self.model, temperature, "Issuing assessment completion");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AssessError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AssessError::Api(status.as_u16(), error_text));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AssessError::Parse(e.to_string()))?;

        let content = chat
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| AssessError::Parse("Empty completion choices".to_string()))?;

        serde_json::from_str(content).map_err(|e| AssessError::Parse(e.to_string()))
    }
}

fn numbered(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl Assessor for GroqAssessor {
    async fn logic_chain(&self, content: &ProjectContent) -> Result<LogicChainResult, AssessError> {
        let prompt = format!(
            "Analyze this education program's logic chain for coherence and validity.\n\n\
             Activities:\n{activities}\n\nOutputs:\n{outputs}\n\nOutcomes:\n{outcomes}\n\n\
             Impact:\n{impact}\n\n\
             Check whether activities lead to outputs, outputs to outcomes, and outcomes \
             to the impact; flag missing links and logical leaps.\n\n\
             Respond in JSON:\n\
             {{\"isValid\": boolean, \"score\": number (0-100), \"issues\": [{{\"severity\": \
             \"critical\"|\"high\"|\"medium\"|\"low\", \"component\": \"activity-output\"|\
             \"output-outcome\"|\"outcome-impact\", \"message\": string, \"suggestion\": \
             string}}], \"strengths\": [string]}}",
            activities = numbered(&content.activities),
            outputs = numbered(&content.outputs),
            outcomes = numbered(&content.outcomes),
            impact = content.impact,
        );

        self.complete(
            "You are an expert education program design consultant specializing in \
             Logical Framework Approach and Theory of Change validation.",
            prompt,
            0.3,
        )
        .await
    }

    async fn smart(
        &self,
        statement: &str,
        context: &SmartContext,
    ) -> Result<SmartResult, AssessError> {
        let prompt = format!(
            "Evaluate this outcome statement against SMART criteria (specific, measurable, \
             achievable, relevant, time-bound).\n\n\
             Statement: {statement}\n\n\
             Context: theme {theme}; geography {geography}; timeline {timeline}\n\n\
             Respond in JSON:\n\
             {{\"score\": number (0-100, average across dimensions), \"dimensions\": \
             {{\"specific\": {{\"score\": 0-100, \"feedback\": string}}, \"measurable\": {{...}}, \
             \"achievable\": {{...}}, \"relevant\": {{...}}, \"timeBound\": {{...}}}}, \
             \"improvedVersion\": string, \"confidence\": number (0-100)}}",
            statement = statement,
            theme = context.theme,
            geography = context.geography,
            timeline = context.timeline,
        );

        self.complete(
            "You are a monitoring-and-evaluation expert with deep knowledge of education \
             programs in India, NIPUN Bharat, and TaRL approaches.",
            prompt,
            0.4,
        )
        .await
    }

    async fn contextual_suggestions(
        &self,
        content: &ProjectContent,
    ) -> Result<ContextSuggestions, AssessError> {
        let prompt = format!(
            "Provide contextual suggestions for this education program.\n\n\
             Theme: {theme}\nProblem: {problem}\nGeography: {geography}\n\
             Stakeholders: {stakeholders}\n\n\
             Based on proven programs in similar contexts, suggest indicators to track, \
             missing stakeholders, effective activities, and expected practice changes.\n\n\
             Respond in JSON:\n\
             {{\"suggestions\": [{{\"category\": \"indicator\"|\"stakeholder\"|\"activity\"|\
             \"practice-change\", \"title\": string, \"description\": string, \"rationale\": \
             string, \"examples\": [string]}}], \"relevantPatterns\": [string], \
             \"warnings\": [string]}}",
            theme = content.theme,
            problem = content.problem_statement,
            geography = content.geography,
            stakeholders = content.stakeholder_types.join(", "),
        );

        self.complete(
            "You are an expert on education programs in India, with deep knowledge of FLN, \
             NIPUN Bharat, TaRL, ASER, and successful NGO interventions.",
            prompt,
            0.7,
        )
        .await
    }

    async fn quality(&self, content: &ProjectContent) -> Result<QualityAssessment, AssessError> {
        let prompt = format!(
            "Assess this program design's quality and readiness for funder review.\n\n\
             Problem: {problem}\nOutcomes: {outcomes}\nStakeholders mapped: {stakeholders}\n\
             Indicators defined: {indicators}\nActivities: {activities}\n\
             Geography: {geography}\nTimeline: {timeline}\n\n\
             Rate problem clarity, logic coherence, stakeholder coverage, measurement \
             quality, and feasibility, each 0-100.\n\n\
             Respond in JSON:\n\
             {{\"overallScore\": number (0-100), \"readiness\": \"draft\"|\"needs-work\"|\
             \"review-ready\"|\"funder-ready\", \"dimensionScores\": {{\"problemClarity\": \
             0-100, \"logicCoherence\": 0-100, \"stakeholderCoverage\": 0-100, \
             \"measurementQuality\": 0-100, \"feasibility\": 0-100}}, \"topStrengths\": \
             [string], \"criticalGaps\": [string], \"nextSteps\": [string], \
             \"estimatedReviewTime\": string}}",
            problem = content.problem_statement,
            outcomes = content.outcomes.join("; "),
            stakeholders = content.stakeholder_count,
            indicators = content.indicator_count,
            activities = content.activities.join("; "),
            geography = content.geography,
            timeline = content.timeline,
        );

        self.complete(
            "You are a senior program officer at a major education foundation, reviewing \
             grant proposals with expertise in LFA and Theory of Change.",
            prompt,
            0.3,
        )
        .await
    }
}
