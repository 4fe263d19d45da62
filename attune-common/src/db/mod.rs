//! Database initialization, models and profile storage

pub mod init;
pub mod models;
pub mod store;

pub use init::*;
pub use models::*;
pub use store::ProfileStore;
