//! Enrichment Gateway: every model-backed operation of the API.
//!
//! Each method builds one [`ChatRequest`], makes exactly one call and validates the
//! reply. Malformed replies surface as `UpstreamFormat`; an unreachable or unconfigured
//! provider as `UpstreamUnavailable` (see `From<LlmError> for AppError`).

pub mod prompts;
pub mod schema;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::{call_json, ChatModel, ChatRequest, Message};
use prompts::{
    analysis_prompt, course_constraints, course_prompt, summary_prompt, COURSE_SYSTEM_PROMPT,
    HR_SYSTEM_PROMPT, SUMMARY_SYSTEM_PROMPT,
};
use schema::{AnalysisResult, CourseList, LearningResource};

const DEFAULT_TEMPERATURE: f32 = 0.7;
const COURSE_TEMPERATURE: f32 = 0.4;
const SUMMARY_MAX_TOKENS: u32 = 200;
const CHAT_MAX_TOKENS: u32 = 800;
const MIN_COURSES: u32 = 1;
const MAX_COURSES: u32 = 20;

fn default_course_count() -> u32 {
    5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseQuery {
    pub target_role: Option<String>,
    pub skills: Option<Vec<String>>,
    pub level: Option<String>,
    #[serde(default = "default_course_count")]
    pub count: u32,
}

impl Default for CourseQuery {
    fn default() -> Self {
        Self {
            target_role: None,
            skills: None,
            level: None,
            count: default_course_count(),
        }
    }
}

#[derive(Clone)]
pub struct EnrichmentGateway {
    model: Arc<dyn ChatModel>,
}

impl EnrichmentGateway {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Scores a resume against a job description.
    pub async fn analyze(
        &self,
        resume_text: &str,
        posting_text: &str,
    ) -> Result<AnalysisResult, AppError> {
        let request = ChatRequest {
            messages: vec![
                Message::system(HR_SYSTEM_PROMPT),
                Message::user(analysis_prompt(resume_text, posting_text)),
            ],
            temperature: DEFAULT_TEMPERATURE,
            json_mode: true,
            max_tokens: None,
        };

        let result: AnalysisResult = call_json(self.model.as_ref(), &request).await?;
        result.validate().map_err(AppError::UpstreamFormat)?;

        info!(
            "Analysis complete: match score {}",
            result.analysis_results.match_score.value
        );
        Ok(result)
    }

    /// Two-to-three sentence professional summary of a candidate.
    pub async fn summarize(&self, summary_context: &str) -> Result<String, AppError> {
        let request = ChatRequest {
            messages: vec![
                Message::system(SUMMARY_SYSTEM_PROMPT),
                Message::user(summary_prompt(summary_context)),
            ],
            temperature: DEFAULT_TEMPERATURE,
            json_mode: false,
            max_tokens: Some(SUMMARY_MAX_TOKENS),
        };
        Ok(self.model.complete(&request).await?)
    }

    pub async fn recommend_courses(
        &self,
        query: &CourseQuery,
    ) -> Result<Vec<LearningResource>, AppError> {
        let count = query.count.clamp(MIN_COURSES, MAX_COURSES);
        let constraints = course_constraints(query);
        let request = ChatRequest {
            messages: vec![
                Message::system(COURSE_SYSTEM_PROMPT),
                Message::user(course_prompt(count, &constraints)),
            ],
            temperature: COURSE_TEMPERATURE,
            json_mode: true,
            max_tokens: None,
        };

        let list: CourseList = call_json(self.model.as_ref(), &request).await?;
        info!(
            "Generated {} course recommendations for {constraints}",
            list.courses.len()
        );
        Ok(list.courses)
    }

    /// Answers an employer's question in the candidate's voice.
    pub async fn chat(&self, chat_context: &str, question: &str) -> Result<String, AppError> {
        let request = ChatRequest {
            messages: vec![Message::system(chat_context), Message::user(question)],
            temperature: DEFAULT_TEMPERATURE,
            json_mode: false,
            max_tokens: Some(CHAT_MAX_TOKENS),
        };
        Ok(self.model.complete(&request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::fake::FakeChatModel;
    use crate::llm_client::Role;

    const VALID_ANALYSIS: &str = r#"{
        "analysis_results": {
            "match_score": {"value": 82, "unit": "percentage"},
            "target_role": "Platform Engineer",
            "strong_skills": ["Rust", "Tokio"],
            "strong_skills_comment": "Lead with the async work.",
            "skills_to_develop": ["Terraform"],
            "skills_to_develop_comment": "Automate one service end to end."
        },
        "suggested_learning_resources": [
            {"title": "Terraform Basics", "category": "DevOps", "tags": ["iac"], "link": "https://example.com/tf"}
        ]
    }"#;

    fn gateway(model: &Arc<FakeChatModel>) -> EnrichmentGateway {
        EnrichmentGateway::new(model.clone())
    }

    #[tokio::test]
    async fn analyze_parses_and_validates_reply() {
        let model = Arc::new(FakeChatModel::replying(format!("```json\n{VALID_ANALYSIS}\n```")));
        let result = gateway(&model).analyze("cv", "job").await.unwrap();

        assert_eq!(result.analysis_results.match_score.value, 82);
        assert_eq!(result.suggested_learning_resources.len(), 1);

        let request = &model.requests()[0];
        assert!(request.json_mode);
        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[0].content, HR_SYSTEM_PROMPT);
    }

    #[tokio::test]
    async fn analyze_rejects_malformed_reply_as_format_error() {
        let model = Arc::new(FakeChatModel::replying("Sorry, I can't help with that."));
        assert!(matches!(
            gateway(&model).analyze("cv", "job").await,
            Err(AppError::UpstreamFormat(_))
        ));
    }

    #[tokio::test]
    async fn analyze_rejects_score_without_unit() {
        let model = Arc::new(FakeChatModel::replying(
            VALID_ANALYSIS.replace(r#""value": 82, "unit": "percentage""#, r#""value": 82"#),
        ));
        assert!(matches!(
            gateway(&model).analyze("cv", "job").await,
            Err(AppError::UpstreamFormat(_))
        ));
    }

    #[tokio::test]
    async fn analyze_rejects_out_of_range_score() {
        let model = Arc::new(FakeChatModel::replying(
            VALID_ANALYSIS.replace("\"value\": 82", "\"value\": 140"),
        ));
        assert!(matches!(
            gateway(&model).analyze("cv", "job").await,
            Err(AppError::UpstreamFormat(_))
        ));
    }

    #[tokio::test]
    async fn unavailable_model_surfaces_as_upstream_unavailable() {
        let model = Arc::new(FakeChatModel::unavailable());
        assert!(matches!(
            gateway(&model).summarize("ctx").await,
            Err(AppError::UpstreamUnavailable(_))
        ));
        assert_eq!(model.requests().len(), 1);
    }

    #[tokio::test]
    async fn summarize_uses_bounded_free_text_call() {
        let model = Arc::new(FakeChatModel::replying("A seasoned Rust engineer."));
        let summary = gateway(&model).summarize("CV Content:\nstuff").await.unwrap();

        assert_eq!(summary, "A seasoned Rust engineer.");
        let request = &model.requests()[0];
        assert_eq!(request.max_tokens, Some(200));
        assert!(!request.json_mode);
        assert!(request.messages[1].content.contains("CV Content:\nstuff"));
    }

    #[tokio::test]
    async fn empty_summary_is_a_format_error() {
        let model = Arc::new(FakeChatModel::replying("   "));
        assert!(matches!(
            gateway(&model).summarize("ctx").await,
            Err(AppError::UpstreamFormat(_))
        ));
    }

    #[tokio::test]
    async fn recommend_courses_clamps_count() {
        let model = Arc::new(FakeChatModel::replying(r#"{"courses": []}"#));
        let query = CourseQuery {
            count: 50,
            ..CourseQuery::default()
        };
        let courses = gateway(&model).recommend_courses(&query).await.unwrap();

        assert!(courses.is_empty());
        let request = &model.requests()[0];
        assert_eq!(request.temperature, 0.4);
        assert!(request.messages[1]
            .content
            .starts_with("Provide 20 course recommendations for general upskilling."));
    }

    #[tokio::test]
    async fn recommend_courses_raises_count_of_zero_to_one() {
        let model = Arc::new(FakeChatModel::replying(r#"{"courses": []}"#));
        let query = CourseQuery {
            count: 0,
            ..CourseQuery::default()
        };
        gateway(&model).recommend_courses(&query).await.unwrap();
        assert!(model.requests()[0].messages[1]
            .content
            .starts_with("Provide 1 course recommendations"));
    }

    #[tokio::test]
    async fn chat_sends_context_as_system_message() {
        let model = Arc::new(FakeChatModel::replying("I have five years of Rust."));
        let answer = gateway(&model)
            .chat("candidate context", "How much Rust?")
            .await
            .unwrap();

        assert_eq!(answer, "I have five years of Rust.");
        let request = &model.requests()[0];
        assert_eq!(request.max_tokens, Some(800));
        assert_eq!(request.messages[0].content, "candidate context");
        assert_eq!(request.messages[1].content, "How much Rust?");
    }
}
