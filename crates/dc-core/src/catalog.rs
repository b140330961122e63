//! Migration catalog: one directory per migration under the migration root.
//!
//! ```text
//! migrations/
//!   20230101-0000-init/
//!     up.sql
//!     down.sql
//!   20230215-0000-addcol/
//!     up.sql
//!     down.sql
//! ```
//!
//! Directory names sort chronologically by construction, so the catalog
//! order is the application order.

use crate::env::Environment;
use crate::error::{CoreError, CoreResult};
use crate::template;
use crate::version::Version;
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File name of the forward script inside an entry directory
pub const UP_SCRIPT_NAME: &str = "up.sql";

/// File name of the reverse script inside an entry directory
pub const DOWN_SCRIPT_NAME: &str = "down.sql";

/// Which script of an entry to load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Script file name for this direction
    pub fn file_name(self) -> &'static str {
        match self {
            Direction::Up => UP_SCRIPT_NAME,
            Direction::Down => DOWN_SCRIPT_NAME,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// One migration unit on disk. Script bodies are read on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationEntry {
    /// Canonical version derived from the directory name
    pub version: Version,
    /// Free-text label following the timestamp
    pub label: String,
    /// Directory name as found on disk
    pub name: String,
    /// Absolute path to the entry directory
    pub dir: PathBuf,
}

impl MigrationEntry {
    /// Path to the script for `direction`
    pub fn script_path(&self, direction: Direction) -> PathBuf {
        self.dir.join(direction.file_name())
    }

    /// Read a script and substitute its `${name}` placeholders from `env`.
    pub fn load_script(&self, direction: Direction, env: &Environment) -> CoreResult<String> {
        let path = self.script_path(direction);
        if !path.is_file() {
            return Err(CoreError::MissingScript {
                path: path.display().to_string(),
            });
        }
        let raw = fs::read_to_string(&path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        template::substitute(&raw, env).map_err(|names| CoreError::UnresolvedPlaceholders {
            path: path.display().to_string(),
            names,
        })
    }
}

/// Sorted view over the migration root.
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
    entries: Vec<MigrationEntry>,
}

impl Catalog {
    /// Scan `root` and build the catalog.
    pub fn load(root: &Path) -> CoreResult<Self> {
        Ok(Self {
            root: root.to_path_buf(),
            entries: list_entries(root)?,
        })
    }

    /// Migration root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All entries in ascending order
    pub fn entries(&self) -> &[MigrationEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries strictly newer than `current`, in ascending order.
    pub fn pending_after(&self, current: &Version) -> &[MigrationEntry] {
        let start = self
            .entries
            .iter()
            .position(|e| e.version > *current)
            .unwrap_or(self.entries.len());
        &self.entries[start..]
    }

    /// Index of the entry whose version equals `version` exactly.
    pub fn position_of(&self, version: &Version) -> Option<usize> {
        self.entries.iter().position(|e| e.version == *version)
    }

    /// Version of the entry preceding `index`, or the sentinel for the first.
    pub fn version_before(&self, index: usize) -> Version {
        index
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .map(|e| e.version.clone())
            .unwrap_or_else(Version::initial)
    }
}

/// List the immediate subdirectories of `root` as migration entries, sorted
/// by directory name.
///
/// Hidden directories and plain files are ignored. Script files are not read.
pub fn list_entries(root: &Path) -> CoreResult<Vec<MigrationEntry>> {
    if !root.is_dir() {
        return Err(CoreError::MigrationDirNotFound {
            path: root.display().to_string(),
        });
    }

    let mut entries = Vec::new();
    for item in WalkDir::new(root).min_depth(1).max_depth(1) {
        let item = item.map_err(|e| CoreError::IoWithPath {
            path: root.display().to_string(),
            source: e.into(),
        })?;
        let path = item.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            log::warn!("Skipping non UTF-8 entry in {}", root.display());
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        if !item.file_type().is_dir() {
            log::debug!("Skipping non-directory {}", path.display());
            continue;
        }

        let parsed = Version::from_dir_name(name)?;
        entries.push(MigrationEntry {
            version: parsed.version,
            label: parsed.label,
            name: name.to_string(),
            dir: path.to_path_buf(),
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    for pair in entries.windows(2) {
        if pair[0].version == pair[1].version {
            log::warn!(
                "Migrations '{}' and '{}' share version {}; their relative order is not guaranteed",
                pair[0].name,
                pair[1].name,
                pair[0].version
            );
        }
    }

    Ok(entries)
}

/// Create a new, empty migration named `<timestamp>-<name>` under `root`.
///
/// Returns the created directory.
pub fn create_entry(root: &Path, name: &str, now: NaiveDateTime) -> CoreResult<PathBuf> {
    let name = name.trim();
    if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
        return Err(CoreError::InvalidMigrationName {
            name: name.to_string(),
            reason: "migration name must be non-empty and must not contain path separators"
                .to_string(),
        });
    }

    let dir = root.join(format!("{}-{}", now.format("%Y%m%d-%H%M%S"), name));
    if dir.exists() {
        return Err(CoreError::MigrationExists {
            path: dir.display().to_string(),
        });
    }

    let io_err = |path: &Path, e: std::io::Error| CoreError::IoWithPath {
        path: path.display().to_string(),
        source: e,
    };
    fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
    for direction in [Direction::Up, Direction::Down] {
        let script = dir.join(direction.file_name());
        fs::File::create(&script).map_err(|e| io_err(&script, e))?;
    }

    log::debug!("Created migration {}", dir.display());
    Ok(dir)
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
