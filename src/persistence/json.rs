//! JSON file repository
//!
//! Each collection is a JSON array in its own file.

use super::{FactRepository, RepositoryError, RepositoryResult};
use crate::model::{Equipment, Fact, Threshold};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct JsonRepository {
    facts_path: PathBuf,
    thresholds_path: PathBuf,
    equipment_path: Option<PathBuf>,
}

impl JsonRepository {
    pub fn new(facts_path: impl Into<PathBuf>, thresholds_path: impl Into<PathBuf>) -> Self {
        Self {
            facts_path: facts_path.into(),
            thresholds_path: thresholds_path.into(),
            equipment_path: None,
        }
    }

    pub fn with_equipment(mut self, equipment_path: impl Into<PathBuf>) -> Self {
        self.equipment_path = Some(equipment_path.into());
        self
    }
}

fn read_array<T: DeserializeOwned>(path: &Path) -> RepositoryResult<Vec<T>> {
    let text = std::fs::read_to_string(path).map_err(|source| RepositoryError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let records: Vec<T> = serde_json::from_str(&text).map_err(|source| RepositoryError::Json {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), records = records.len(), "Loaded records");
    Ok(records)
}

impl FactRepository for JsonRepository {
    fn load_facts(&self) -> RepositoryResult<Vec<Fact>> {
        read_array(&self.facts_path)
    }

    fn load_thresholds(&self) -> RepositoryResult<Vec<Threshold>> {
        read_array(&self.thresholds_path)
    }

    fn load_equipment(&self) -> RepositoryResult<Vec<Equipment>> {
        match &self.equipment_path {
            Some(path) => read_array(path),
            None => Ok(Vec::new()),
        }
    }
}
