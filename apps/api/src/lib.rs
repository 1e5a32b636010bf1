//! SkillSync API: service bootstrap, diagnostics and schema initialization.

pub mod config;
pub mod db;
pub mod errors;
pub mod lifecycle;
pub mod llm_service;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod validation;
