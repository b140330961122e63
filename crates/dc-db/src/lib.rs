//! dc-db - Database client layer for damaged-captain
//!
//! This crate provides the `SqlClient` trait (the contract for running SQL
//! through an external command-line client), the subprocess implementation
//! `CommandClient`, and the `VersionStore` that persists the applied
//! migration version inside the target database.

pub mod command;
pub mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;
pub mod version_store;

pub use command::CommandClient;
pub use error::{DbError, DbResult};
pub use traits::SqlClient;
pub use version_store::{VersionStore, VERSION_TABLE};
