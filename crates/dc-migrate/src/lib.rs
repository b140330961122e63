//! dc-migrate - Migration engine for damaged-captain
//!
//! Computes pending migrations relative to the version recorded in the
//! target database, applies them in order with a compensating rollback on
//! failure, and reverts the latest migration on request.

pub mod error;
pub mod migrator;
pub mod session;

pub use error::{MigrateError, MigrateResult};
pub use migrator::{MigrateOutcome, Migrator, RedoOutcome, RollbackOutcome};
pub use session::Session;
