// Job fit analyzer: compares a pasted job description with the résumé.
// All completion calls go through llm_client.

pub mod analyzer;
pub mod handlers;
pub mod prompts;
pub mod score;
