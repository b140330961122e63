//! Resolved runtime context for one invocation.

use crate::error::{MigrateError, MigrateResult};
use crate::migrator::Migrator;
use dc_core::{Environment, Project};
use dc_db::{CommandClient, SqlClient};
use std::path::{Path, PathBuf};

/// Everything a command needs to talk to the target database
pub struct Session {
    migration_dir: PathBuf,
    env: Environment,
    client: Box<dyn SqlClient>,
}

impl Session {
    /// Build a session from a loaded project.
    ///
    /// Fails before anything is executed when the database is not set, the
    /// env file cannot be read, or the credential keys are inconsistent.
    pub fn open(project: &Project) -> MigrateResult<Self> {
        let config = &project.config;
        let database = config.database().map_err(MigrateError::Configuration)?;
        let env = project.environment().map_err(MigrateError::Configuration)?;
        let credential = project
            .credential(&env)
            .map_err(MigrateError::Configuration)?;

        let client = CommandClient::new(&config.command, database)
            .with_args(config.args.clone())
            .with_credential(credential);
        log::debug!("Using client: {}", client.describe());

        Ok(Self {
            migration_dir: project.migration_dir(),
            env,
            client: Box::new(client),
        })
    }

    /// Build a session around an existing client
    pub fn with_client(
        migration_dir: impl Into<PathBuf>,
        env: Environment,
        client: Box<dyn SqlClient>,
    ) -> Self {
        Self {
            migration_dir: migration_dir.into(),
            env,
            client,
        }
    }

    pub fn migration_dir(&self) -> &Path {
        &self.migration_dir
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// The SQL client used for every statement
    pub fn client(&self) -> &dyn SqlClient {
        self.client.as_ref()
    }

    /// A migrator bound to this session
    pub fn migrator(&self) -> Migrator<'_> {
        Migrator::new(self.client.as_ref(), &self.migration_dir, &self.env)
    }
}
