pub mod cli;
pub mod gemini_client;
