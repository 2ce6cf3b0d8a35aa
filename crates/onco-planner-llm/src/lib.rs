//! Generative treatment-planning collaborator.
//!
//! This crate wraps the hosted generative-language API behind one
//! [`client::TreatmentAdvisor`] interface with a single error taxonomy,
//! builds the clinical prompts and response schemas, tolerantly extracts
//! the JSON payloads, and exposes a workflow facade that applies results
//! to patient records only on success.

pub mod assistant;
pub mod client;
pub mod extraction;
pub mod prompts;

pub use assistant::*;
pub use client::*;
pub use extraction::*;
pub use prompts::*;
