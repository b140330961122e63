//! Migration engine: apply, rollback and redo.
//!
//! Every step is sequential. A migration's version is recorded only after
//! its up-script has succeeded, so the marker always names the newest
//! migration known to have run to completion.

use crate::error::{MigrateError, MigrateResult};
use dc_core::{Catalog, Direction, Environment, MigrationEntry, Version};
use dc_db::{SqlClient, VersionStore};
use std::path::Path;

/// Result of [`Migrator::migrate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrateOutcome {
    /// No migration newer than the current version
    UpToDate { current: Version },
    /// Migrations applied in order, starting after `from`
    Applied { from: Version, applied: Vec<Version> },
}

/// Result of [`Migrator::rollback`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollbackOutcome {
    /// The current version matches no known migration
    NothingToRollback { current: Version },
    /// The migration `name` was reverted, moving the marker `from` -> `to`
    RolledBack {
        name: String,
        from: Version,
        to: Version,
    },
}

/// Result of [`Migrator::redo`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedoOutcome {
    pub rollback: RollbackOutcome,
    pub migrate: MigrateOutcome,
}

/// Drives migrations in `migration_dir` through a SQL client
pub struct Migrator<'a> {
    client: &'a dyn SqlClient,
    migration_dir: &'a Path,
    env: &'a Environment,
}

impl<'a> Migrator<'a> {
    /// Create a migrator
    pub fn new(client: &'a dyn SqlClient, migration_dir: &'a Path, env: &'a Environment) -> Self {
        Self {
            client,
            migration_dir,
            env,
        }
    }

    fn store(&self) -> VersionStore<'a> {
        VersionStore::new(self.client)
    }

    fn catalog(&self) -> MigrateResult<Catalog> {
        Catalog::load(self.migration_dir).map_err(MigrateError::Catalog)
    }

    async fn current_version(&self) -> MigrateResult<Version> {
        self.store()
            .current_version()
            .await
            .map_err(MigrateError::VersionLookup)
    }

    /// Apply every migration newer than the current version.
    pub async fn migrate(&self) -> MigrateResult<MigrateOutcome> {
        let from = self.current_version().await?;
        let catalog = self.catalog()?;
        let pending = catalog.pending_after(&from);

        if pending.is_empty() {
            log::info!("no migrations to run");
            return Ok(MigrateOutcome::UpToDate { current: from });
        }

        log::info!("run migrations since version {from}");
        let store = self.store();
        let mut last_good = from.clone();
        let mut applied = Vec::with_capacity(pending.len());

        for entry in pending {
            let script_path = entry.script_path(Direction::Up).display().to_string();
            let script = entry
                .load_script(Direction::Up, self.env)
                .map_err(MigrateError::Script)?;

            log::info!("migrate {script_path}");
            if let Err(source) = self.client.execute(&script).await {
                log::warn!("rolling back partial application of failed migration {script_path}");
                return match self.revert(entry, &last_good).await {
                    Ok(()) => Err(MigrateError::MigrationFailed {
                        script: script_path,
                        source,
                    }),
                    Err(rollback) => Err(MigrateError::MigrationAndRollbackFailed {
                        script: script_path,
                        source,
                        rollback: Box::new(rollback),
                    }),
                };
            }

            store
                .record_version(&entry.version)
                .await
                .map_err(|source| MigrateError::RecordFailed {
                    script: script_path,
                    version: entry.version.to_string(),
                    source,
                })?;

            last_good = entry.version.clone();
            applied.push(entry.version.clone());
        }

        Ok(MigrateOutcome::Applied { from, applied })
    }

    /// Revert the migration matching the current version.
    pub async fn rollback(&self) -> MigrateResult<RollbackOutcome> {
        let current = self.current_version().await?;
        let catalog = self.catalog()?;

        let Some(index) = catalog.position_of(&current) else {
            log::info!("nothing to rollback");
            return Ok(RollbackOutcome::NothingToRollback { current });
        };

        let entry = &catalog.entries()[index];
        let target = catalog.version_before(index);
        self.revert(entry, &target).await?;

        Ok(RollbackOutcome::RolledBack {
            name: entry.name.clone(),
            from: current,
            to: target,
        })
    }

    /// Roll back the latest migration, then apply everything pending.
    pub async fn redo(&self) -> MigrateResult<RedoOutcome> {
        let rollback = self.rollback().await?;
        let migrate = self.migrate().await?;
        Ok(RedoOutcome { rollback, migrate })
    }

    /// Run `entry`'s down-script and record `target` as the current version.
    async fn revert(&self, entry: &MigrationEntry, target: &Version) -> MigrateResult<()> {
        let script_path = entry.script_path(Direction::Down).display().to_string();
        let script = entry
            .load_script(Direction::Down, self.env)
            .map_err(MigrateError::Script)?;

        log::info!("rollback {script_path}");
        self.client
            .execute(&script)
            .await
            .map_err(|source| MigrateError::RollbackFailed {
                script: script_path.clone(),
                source,
            })?;

        self.store()
            .record_version(target)
            .await
            .map_err(|source| MigrateError::RecordFailed {
                script: script_path,
                version: target.to_string(),
                source,
            })
    }
}

#[cfg(test)]
#[path = "migrator_test.rs"]
mod tests;
