//! Core domain types
//!
//! These types describe a video generation job as the client sees it. They are
//! shared between the HTTP client (which decodes them) and the engine (which
//! tracks them over time).

pub mod history;
pub mod job;
pub mod submission;
