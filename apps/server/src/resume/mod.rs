// Resume tailoring: one job description in, one tailored resume object out.
// All LLM calls go through llm_client.

pub mod handlers;
pub mod prompts;
