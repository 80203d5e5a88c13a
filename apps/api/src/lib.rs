//! Portfolio assistant API: résumé-grounded chat and job fit analysis backed by
//! a generative-text service, plus the static showcase data of the portfolio page.

pub mod analysis;
pub mod chat;
pub mod config;
pub mod context;
pub mod errors;
pub mod llm_client;
pub mod models;
pub mod render;
pub mod routes;
pub mod sessions;
pub mod showcase;
pub mod state;
