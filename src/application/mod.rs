pub mod orchestrator;
pub mod prompts;
