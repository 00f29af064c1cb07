//! Data Transfer Objects for the video generation API
//!
//! Bodies exchanged with the remote service, kept separate from the domain
//! types so wire quirks stay at the edge.

pub mod video;
