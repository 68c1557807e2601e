//! Sources of "default" status variables.
//!
//! Default variables live in an external store (the global status table)
//! rather than in a registered provider. A collection pass only reserves
//! their names; callers read the actual values from the store.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::Deserialize;
use thiserror::Error;

use super::provider::BoxError;
use super::scope::ScopeFlag;
use super::value::{StatusValue, VarValue};

/// Supplier of default status variables.
pub trait DefaultStatusSource: Send + Sync {
    fn default_status_vars(&self) -> Result<HashMap<String, StatusValue>, BoxError>;
}

/// Source that reports nothing.
///
/// Used when no status table is configured. Always succeeds with an empty
/// map, so a collection pass reserves no default names.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefaultStatus;

impl DefaultStatusSource for NoDefaultStatus {
    fn default_status_vars(&self) -> Result<HashMap<String, StatusValue>, BoxError> {
        Ok(HashMap::new())
    }
}

/// In-memory status table.
#[derive(Debug, Default)]
pub struct TableDefaultStatus {
    rows: RwLock<HashMap<String, StatusValue>>,
}

impl TableDefaultStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a row.
    pub fn put(&self, name: impl Into<String>, value: StatusValue) {
        self.rows.write().insert(name.into(), value);
    }

    pub fn remove(&self, name: &str) -> Option<StatusValue> {
        self.rows.write().remove(name)
    }

    pub fn len(&self) -> usize {
        self.rows.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().is_empty()
    }
}

impl DefaultStatusSource for TableDefaultStatus {
    fn default_status_vars(&self) -> Result<HashMap<String, StatusValue>, BoxError> {
        Ok(self.rows.read().clone())
    }
}

/// Errors reading a status table file.
#[derive(Debug, Error)]
pub enum DefaultSourceError {
    #[error("Failed to read status table {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid status table {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unsupported value for '{name}': {reason}")]
    Value { name: String, reason: String },
}

#[derive(Debug, Deserialize)]
struct StatusTableFile {
    #[serde(default)]
    status: BTreeMap<String, toml::Value>,
}

/// Status table persisted as a TOML file.
///
/// ```toml
/// [status]
/// Com_select = 0
/// Last_query_cost = 0.0
/// Ssl_version = ""
/// ```
///
/// The file is re-read on every call.
#[derive(Debug, Clone)]
pub struct FileDefaultStatus {
    path: PathBuf,
}

impl FileDefaultStatus {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file.
    pub fn load(&self) -> Result<HashMap<String, StatusValue>, DefaultSourceError> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| DefaultSourceError::Read {
            path: self.path.clone(),
            source,
        })?;
        let file: StatusTableFile =
            toml::from_str(&text).map_err(|source| DefaultSourceError::Parse {
                path: self.path.clone(),
                source,
            })?;

        file.status
            .into_iter()
            .map(|(name, raw)| -> Result<_, DefaultSourceError> {
                let value = toml_to_var(&name, raw)?;
                Ok((name, StatusValue::new(value, ScopeFlag::DEFAULT)))
            })
            .collect()
    }
}

impl DefaultStatusSource for FileDefaultStatus {
    fn default_status_vars(&self) -> Result<HashMap<String, StatusValue>, BoxError> {
        Ok(self.load()?)
    }
}

fn toml_to_var(name: &str, raw: toml::Value) -> Result<VarValue, DefaultSourceError> {
    let value = match raw {
        toml::Value::String(s) => VarValue::Text(s),
        toml::Value::Integer(i) => VarValue::Int(i),
        toml::Value::Float(f) => VarValue::Float(f),
        toml::Value::Boolean(b) => VarValue::Bool(b),
        toml::Value::Datetime(dt) => VarValue::Text(dt.to_string()),
        nested @ (toml::Value::Array(_) | toml::Value::Table(_)) => {
            let json = serde_json::to_value(&nested).map_err(|e| DefaultSourceError::Value {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
            VarValue::Structured(json)
        }
    };
    Ok(value)
}
