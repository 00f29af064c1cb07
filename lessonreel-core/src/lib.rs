//! LessonReel Core
//!
//! Core types shared by the LessonReel client and engine.
//!
//! This crate contains:
//! - Domain types: jobs, their progress, history entries and submission input
//! - DTOs: request/response bodies of the video generation API

pub mod domain;
pub mod dto;
