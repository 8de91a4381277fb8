//! Input boundary of the engine
//!
//! Facts, thresholds and the equipment registry are owned by an external
//! store. The engine reads each collection once, synchronously, at the start
//! of a run through [`FactRepository`].

pub mod json;

pub use json::JsonRepository;

use crate::model::{Equipment, Fact, Threshold};

/// Repository errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Read-only snapshot source for one engine run
pub trait FactRepository {
    fn load_facts(&self) -> RepositoryResult<Vec<Fact>>;

    fn load_thresholds(&self) -> RepositoryResult<Vec<Threshold>>;

    /// Equipment registry; optional for sources that do not track it
    fn load_equipment(&self) -> RepositoryResult<Vec<Equipment>> {
        Ok(Vec::new())
    }
}

/// Repository over records already held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    pub facts: Vec<Fact>,
    pub thresholds: Vec<Threshold>,
    pub equipment: Vec<Equipment>,
}

impl InMemoryRepository {
    pub fn new(facts: Vec<Fact>, thresholds: Vec<Threshold>) -> Self {
        Self {
            facts,
            thresholds,
            equipment: Vec::new(),
        }
    }

    pub fn with_equipment(mut self, equipment: Vec<Equipment>) -> Self {
        self.equipment = equipment;
        self
    }
}

impl FactRepository for InMemoryRepository {
    fn load_facts(&self) -> RepositoryResult<Vec<Fact>> {
        Ok(self.facts.clone())
    }

    fn load_thresholds(&self) -> RepositoryResult<Vec<Threshold>> {
        Ok(self.thresholds.clone())
    }

    fn load_equipment(&self) -> RepositoryResult<Vec<Equipment>> {
        Ok(self.equipment.clone())
    }
}
