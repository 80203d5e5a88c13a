// Chat assistant: answers questions about the résumé, one session at a time.

pub mod controller;
pub mod handlers;
pub mod prompts;
