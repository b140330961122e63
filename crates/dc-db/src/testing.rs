//! In-memory `SqlClient` for tests.
//!
//! Records every script it receives, keeps the `db_version` marker in
//! memory, and fails any script containing a configured substring.

use crate::error::{DbError, DbResult};
use crate::traits::SqlClient;
use crate::version_store::{SELECT_VERSION_SQL, VERSION_TABLE};
use async_trait::async_trait;
use std::sync::Mutex;

const MISSING_TABLE_STDERR: &str = "ERROR 1146 (42S02): Table 'test.db_version' doesn't exist";

#[derive(Debug, Default)]
struct State {
    /// `None` while the bookkeeping table does not exist
    marker: Option<String>,
    history: Vec<String>,
    failures: Vec<(String, String)>,
    responses: Vec<(String, String)>,
}

/// Scripted stand-in for a database client
#[derive(Debug, Default)]
pub struct ScriptedClient {
    state: Mutex<State>,
}

impl ScriptedClient {
    /// A client for a fresh database (no bookkeeping table)
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose bookkeeping table already holds `marker`
    pub fn with_marker(marker: &str) -> Self {
        let client = Self::new();
        client.lock().marker = Some(marker.to_string());
        client
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Fail every script containing `pattern`
    pub fn fail_on(&self, pattern: &str) {
        self.fail_on_with(pattern, "ERROR: scripted failure");
    }

    /// Fail every script containing `pattern` with the given stderr
    pub fn fail_on_with(&self, pattern: &str, stderr: &str) {
        self.lock()
            .failures
            .push((pattern.to_string(), stderr.to_string()));
    }

    /// Stop failing any script
    pub fn clear_failures(&self) {
        self.lock().failures.clear();
    }

    /// Return `output` for scripts containing `pattern`
    pub fn respond(&self, pattern: &str, output: &str) {
        self.lock()
            .responses
            .push((pattern.to_string(), output.to_string()));
    }

    /// Current marker (`None` when the table was never created)
    pub fn marker(&self) -> Option<String> {
        self.lock().marker.clone()
    }

    /// Every script received, in order
    pub fn history(&self) -> Vec<String> {
        self.lock().history.clone()
    }

    /// Received scripts that do not touch the bookkeeping table
    pub fn migration_scripts(&self) -> Vec<String> {
        self.history()
            .into_iter()
            .filter(|sql| !sql.contains(VERSION_TABLE))
            .collect()
    }

    /// Markers written, in order
    pub fn recorded_versions(&self) -> Vec<String> {
        self.history()
            .iter()
            .filter_map(|sql| inserted_version(sql))
            .collect()
    }

    fn run(&self, sql: &str) -> DbResult<String> {
        let mut state = self.lock();
        state.history.push(sql.to_string());

        if let Some((_, stderr)) = state.failures.iter().find(|(p, _)| sql.contains(p.as_str())) {
            return Err(failure(stderr));
        }

        if sql.trim_start().starts_with(SELECT_VERSION_SQL.trim_end_matches(';')) {
            return match &state.marker {
                Some(marker) => Ok(format!("version\n{marker}\n")),
                None => Err(failure(MISSING_TABLE_STDERR)),
            };
        }

        if let Some(version) = inserted_version(sql) {
            state.marker = Some(version);
            return Ok(String::new());
        }

        Ok(state
            .responses
            .iter()
            .find(|(p, _)| sql.contains(p.as_str()))
            .map(|(_, out)| out.clone())
            .unwrap_or_default())
    }
}

fn failure(stderr: &str) -> DbError {
    DbError::ExecutionFailed {
        command: "scripted".to_string(),
        status: "status 1".to_string(),
        stderr: stderr.to_string(),
    }
}

fn inserted_version(sql: &str) -> Option<String> {
    let marker = format!("insert into {VERSION_TABLE} values('");
    let start = sql.find(&marker)? + marker.len();
    let end = sql[start..].find('\'')? + start;
    Some(sql[start..end].to_string())
}

#[async_trait]
impl SqlClient for ScriptedClient {
    async fn execute(&self, sql: &str) -> DbResult<()> {
        self.run(sql).map(|_| ())
    }

    async fn query(&self, sql: &str) -> DbResult<String> {
        self.run(sql)
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}
