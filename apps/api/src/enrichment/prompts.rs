// Prompts for the Enrichment Gateway.

use super::schema::analysis_schema;
use super::CourseQuery;
use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, STRICT_JSON_INSTRUCTION};

pub const HR_SYSTEM_PROMPT: &str = "You are an expert HR consultant specializing in AI and tech roles. \
    Your task is to analyze CVs against job postings and provide structured, insightful feedback. \
    Be thorough, professional, and provide actionable advice in the specified JSON format. \
    Focus on accurate skill matching, realistic recommendations, and constructive comments.";

pub const SUMMARY_SYSTEM_PROMPT: &str = "You are an expert recruiter creating candidate summaries.";

pub const COURSE_SYSTEM_PROMPT: &str = "You are a career coach. Recommend real, popular online courses \
    with direct URLs. Prefer reputable platforms (Coursera, edX, Udemy, DeepLearning.AI, Fast.ai, \
    Datacamp, Khan Academy). Return strictly valid JSON matching the provided schema. \
    Ensure links are accessible and public.";

pub fn analysis_prompt(resume_text: &str, posting_text: &str) -> String {
    let schema = serde_json::to_string_pretty(&analysis_schema()).unwrap_or_default();
    format!(
        "Compare the user's CV with the job posting. For strong_skills_comment and \
         skills_to_develop_comment, provide detailed advice including specific recommendations \
         for improvement or how to leverage the skills.\n\
         Provide a response in the following JSON schema:\n\n{schema}\n\n\
         CV:\n{resume_text}\n\nJob Posting:\n{posting_text}\n\n{JSON_ONLY_INSTRUCTION}"
    )
}

pub fn summary_prompt(summary_context: &str) -> String {
    format!(
        "Analyze this candidate's profile and create a concise professional summary \
         (2-3 sentences).\n\n{summary_context}\n\n\
         Provide a professional summary highlighting key strengths, experience, and technical skills."
    )
}

/// Present filters joined by `" | "`, or `general upskilling` when there are none.
pub fn course_constraints(query: &CourseQuery) -> String {
    let mut constraints = Vec::new();
    if let Some(role) = query.target_role.as_deref().filter(|r| !r.trim().is_empty()) {
        constraints.push(format!("target role: {role}"));
    }
    if let Some(skills) = query.skills.as_ref().filter(|s| !s.is_empty()) {
        constraints.push(format!("focus skills: {}", skills.join(", ")));
    }
    if let Some(level) = query.level.as_deref().filter(|l| !l.trim().is_empty()) {
        constraints.push(format!("level: {level}"));
    }

    if constraints.is_empty() {
        "general upskilling".to_string()
    } else {
        constraints.join(" | ")
    }
}

pub fn course_prompt(count: u32, constraints: &str) -> String {
    format!(
        r#"Provide {count} course recommendations for {constraints}.

Return your response as a JSON object with this exact structure:
{{
  "courses": [
    {{
      "title": "Course Name",
      "category": "Category",
      "tags": ["tag1", "tag2"],
      "link": "https://..."
    }}
  ]
}}

{STRICT_JSON_INSTRUCTION}"#
    )
}
