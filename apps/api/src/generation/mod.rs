// Generation Orchestrator: drafts, skill suggestions, summary suggestions.
// All model calls go through llm_client::CompletionService, never a concrete client.

pub mod generator;
pub mod handlers;
pub mod prompts;
