// Shared prompt fragments.
// Each service that talks to the model keeps its own prompts.rs alongside it;
// this file only holds the cross-cutting pieces.

/// Closing line for every prompt that expects a JSON object back.
pub const JSON_ONLY_INSTRUCTION: &str = "Provide only the JSON response.";

/// Closing line for prompts whose JSON must come back without markdown.
pub const STRICT_JSON_INSTRUCTION: &str = "Only return valid JSON, no markdown or explanations.";
