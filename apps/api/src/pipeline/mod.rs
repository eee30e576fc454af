//! The generation pipeline: unit declarations, prompt texts, the sequential
//! orchestrator, and the HTTP handlers that drive a run end to end.

pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod units;
