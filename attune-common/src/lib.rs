//! # Attune Common Library
//!
//! Shared code for the Attune meditation personalization tools:
//! - Questionnaire answer types
//! - Profile analysis (answers → attachment profile)
//! - Recommendation rules (profile → meditation session)
//! - Profile storage (SQLite)
//! - Configuration loading
//! - Utility functions

pub mod analysis;
pub mod answers;
pub mod config;
pub mod db;
pub mod error;
pub mod recommendation;
pub mod time;

pub use analysis::{analyze, analyze_at, AttachmentProfile, AttachmentStyle};
pub use answers::QuestionnaireAnswers;
pub use error::{Error, Result};
pub use recommendation::{recommend, MeditationRecommendation};
