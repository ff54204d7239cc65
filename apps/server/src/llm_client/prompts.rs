// Shared prompt fragments.
// Each feature that needs LLM calls defines its own prompts.rs alongside it.

/// Closing instruction for prompts whose completion is parsed as a JSON object.
pub const JSON_ONLY_INSTRUCTION: &str =
    "Return ONLY the JSON object, no markdown formatting or extra text.";

/// Instruction that keeps tailored content faithful to its source material.
pub const TRUTHFULNESS_INSTRUCTION: &str = "Keep all content truthful. You may rephrase, \
    reorder, and emphasize, but never invent experience, skills, or accomplishments.";
