//! vibe-funnel - submit vibe-coded apps and watch them go live
//!
//! The library drives the deployment submission workflow:
//! quality check, upload target request, artifact upload, and readiness
//! polling. Interfaces (the `vibe` CLI, a web server, tests) observe progress
//! through [`submit::SubmissionHooks`] or the status watch channel.

pub mod catalog;
pub mod config;
pub mod deploy;
pub mod error;
pub mod quality;
pub mod submit;
pub mod types;
