pub mod types;

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

use types::{ExerciseRecord, ExerciseTable, RawExercise};

/// Header every dataset must carry; lookups match against it.
const TITLE_COLUMN: &str = "Title";

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("exercise dataset unavailable at {}: {reason}", .path.display())]
    DataUnavailable { path: PathBuf, reason: String },
    #[error("need at least {needed} exercises for prompt context, dataset has {available}")]
    InsufficientData { needed: usize, available: usize },
}

/// Normalize a raw CSV header: trim, spaces become underscores, periods are dropped.
pub fn normalize_column(raw: &str) -> String {
    raw.trim().replace(' ', "_").replace('.', "")
}

impl ExerciseTable {
    pub fn new(columns: Vec<String>, records: Vec<ExerciseRecord>) -> Self {
        Self { columns, records }
    }

    /// Parse a CSV file into a table. Blocking.
    pub fn from_csv(path: &Path) -> Result<Self, DatasetError> {
        let unavailable = |reason: String| DatasetError::DataUnavailable {
            path: path.to_path_buf(),
            reason,
        };

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|e| unavailable(e.to_string()))?;

        let headers: csv::StringRecord = reader
            .headers()
            .map_err(|e| unavailable(e.to_string()))?
            .iter()
            .map(normalize_column)
            .collect();
        let columns: Vec<String> = headers.iter().map(str::to_string).collect();

        if !columns.iter().any(|c| c == TITLE_COLUMN) {
            return Err(unavailable(format!("no {TITLE_COLUMN} column")));
        }
        reader.set_headers(headers);

        let records = reader
            .deserialize::<RawExercise>()
            .map(|row| row.map(RawExercise::into_record))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| unavailable(e.to_string()))?;

        Ok(Self::new(columns, records))
    }

    /// Case-insensitive exact title match. First row in table order wins.
    /// Rows with a blank title never match.
    pub fn lookup(&self, name: &str) -> Option<&ExerciseRecord> {
        let wanted = name.to_lowercase();
        self.records
            .iter()
            .filter(|r| !r.title.is_empty())
            .find(|r| r.title.to_lowercase() == wanted)
    }

    /// Draw `count` distinct rows uniformly at random and return their titles.
    pub fn sample_titles<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<&str>, DatasetError> {
        if self.records.len() < count {
            return Err(DatasetError::InsufficientData {
                needed: count,
                available: self.records.len(),
            });
        }
        Ok(self
            .records
            .choose_multiple(rng, count)
            .map(|r| r.title.as_str())
            .collect())
    }

    /// Exercise counts grouped by type. Rows without a type are counted under "Unknown".
    pub fn type_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for record in self.records() {
            let kind = if record.kind.is_empty() {
                "Unknown"
            } else {
                record.kind.as_str()
            };
            *counts.entry(kind).or_insert(0) += 1;
        }
        counts
    }
}

/// Loads exercise tables and keeps them for the life of the process.
pub struct DatasetStore {
    tables: RwLock<HashMap<PathBuf, Arc<ExerciseTable>>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// Load a table, reading the file only on the first call for a given path.
    pub async fn load(&self, path: &Path) -> Result<Arc<ExerciseTable>, DatasetError> {
        {
            let tables = self.tables.read().await;
            if let Some(table) = tables.get(path) {
                debug!(path = %path.display(), "dataset cache hit");
                return Ok(table.clone());
            }
        }

        let owned = path.to_path_buf();
        let table = tokio::task::spawn_blocking(move || ExerciseTable::from_csv(&owned))
            .await
            .map_err(|e| DatasetError::DataUnavailable {
                path: path.to_path_buf(),
                reason: format!("loader task failed: {e}"),
            })??;

        info!(
            path = %path.display(),
            rows = table.len(),
            columns = ?table.columns(),
            "exercise dataset loaded"
        );

        let mut tables = self.tables.write().await;
        let table = tables
            .entry(path.to_path_buf())
            .or_insert_with(|| Arc::new(table))
            .clone();
        Ok(table)
    }
}

impl Default for DatasetStore {
    fn default() -> Self {
        Self::new()
    }
}
