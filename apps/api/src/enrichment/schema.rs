//! Structured reply shapes the model must produce, plus the JSON schema embedded in
//! the analysis prompt.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    /// 0..=100; anything else is rejected by [`AnalysisResult::validate`].
    pub value: i64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResults {
    pub match_score: MatchScore,
    pub target_role: String,
    pub strong_skills: Vec<String>,
    pub strong_skills_comment: String,
    pub skills_to_develop: Vec<String>,
    pub skills_to_develop_comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningResource {
    pub title: String,
    pub category: String,
    pub tags: Vec<String>,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub analysis_results: AnalysisResults,
    pub suggested_learning_resources: Vec<LearningResource>,
}

impl AnalysisResult {
    /// Range checks serde can't express.
    pub fn validate(&self) -> Result<(), String> {
        let score = self.analysis_results.match_score.value;
        if !(0..=100).contains(&score) {
            return Err(format!("match_score.value {score} is outside 0..=100"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseList {
    pub courses: Vec<LearningResource>,
}

/// JSON schema for [`AnalysisResult`], shown to the model verbatim.
pub fn analysis_schema() -> Value {
    let string_list = json!({ "type": "array", "items": { "type": "string" } });
    json!({
        "type": "object",
        "properties": {
            "analysis_results": {
                "type": "object",
                "properties": {
                    "match_score": {
                        "type": "object",
                        "properties": {
                            "value": { "type": "integer", "minimum": 0, "maximum": 100 },
                            "unit": { "type": "string" }
                        },
                        "required": ["value", "unit"]
                    },
                    "target_role": { "type": "string" },
                    "strong_skills": string_list.clone(),
                    "strong_skills_comment": { "type": "string" },
                    "skills_to_develop": string_list.clone(),
                    "skills_to_develop_comment": { "type": "string" }
                },
                "required": [
                    "match_score", "target_role", "strong_skills",
                    "strong_skills_comment", "skills_to_develop",
                    "skills_to_develop_comment"
                ]
            },
            "suggested_learning_resources": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "category": { "type": "string" },
                        "tags": string_list,
                        "link": { "type": "string" }
                    },
                    "required": ["title", "category", "tags", "link"]
                }
            }
        },
        "required": ["analysis_results", "suggested_learning_resources"]
    })
}
