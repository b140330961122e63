//! dc-core - Core library for damaged-captain
//!
//! This crate provides configuration discovery, the environment map used
//! for placeholder substitution, migration versions, and the on-disk
//! migration catalog shared by the engine and the CLI.

pub mod catalog;
pub mod config;
pub mod env;
pub mod error;
pub mod template;
pub mod version;

pub use catalog::{Catalog, Direction, MigrationEntry};
pub use config::{Config, Project};
pub use env::{Credential, Environment};
pub use error::{CoreError, CoreResult};
pub use version::Version;
