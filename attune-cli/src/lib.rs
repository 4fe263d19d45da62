//! attune-cli library - command-line front end for profile analysis
//!
//! Collects questionnaire answers, runs them through the analyzer and the
//! recommendation rules, and optionally persists the result per user.

use attune_common::db::ProfileStore;

pub mod cli;
pub mod commands;
pub mod logging;

/// State shared by every command
///
/// Built once in `main` and passed by reference.
#[derive(Clone)]
pub struct AppContext {
    /// Profile storage over the database pool
    pub store: ProfileStore,
}

impl AppContext {
    pub fn new(store: ProfileStore) -> Self {
        Self { store }
    }
}
