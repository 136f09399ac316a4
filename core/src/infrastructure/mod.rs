pub mod detector;
pub mod llm;
pub mod session;
