// Document generation engine.
// Implements: brief assembly, the drafting call, response validation.
// All LLM calls go through llm_client; no direct Gemini calls here.

pub mod drafter;
pub mod generator;
pub mod handlers;
pub mod prompts;
