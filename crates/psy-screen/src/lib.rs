//! Questionnaire scoring and interpretation for psychological self-assessment.
//!
//! The crate is organised leaf-first: [`catalog`] holds questionnaire
//! definitions, [`scoring`] turns an answer set into a [`scoring::TestResult`],
//! and [`interpretation`] produces readable text for a result through a
//! provider cascade that always ends in a local fallback.

pub mod catalog;
pub mod config;
pub mod error;
pub mod interpretation;
pub mod scoring;
pub mod telemetry;
