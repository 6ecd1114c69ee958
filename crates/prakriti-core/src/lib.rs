//! prakriti-core — Questionnaire model, scoring engine, and classification.
//!
//! This crate defines the question catalog, answer sets, and the scoring
//! logic that turns a completed questionnaire into a constitution result.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod model;
pub mod profile;
pub mod recommendation;
pub mod report;
pub mod session;
