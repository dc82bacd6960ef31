use serde::Deserialize;

/// One exercise row from the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseRecord {
    pub title: String,
    pub description: String,
    /// e.g. "Strength", "Cardio"
    pub kind: String,
    pub body_part: String,
    pub equipment: String,
    pub level: String,
    /// 0.0 means no rating was recorded.
    pub rating: f64,
}

impl ExerciseRecord {
    pub fn has_rating(&self) -> bool {
        self.rating != 0.0
    }
}

/// Row shape as it appears in the CSV after header normalization.
#[derive(Debug, Deserialize)]
pub(super) struct RawExercise {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Desc", default)]
    pub desc: String,
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(rename = "BodyPart", default)]
    pub body_part: String,
    #[serde(rename = "Equipment", default)]
    pub equipment: String,
    #[serde(rename = "Level", default)]
    pub level: String,
    #[serde(rename = "Rating", default, deserialize_with = "csv::invalid_option")]
    pub rating: Option<f64>,
}

impl RawExercise {
    pub(super) fn into_record(self) -> ExerciseRecord {
        ExerciseRecord {
            title: self.title,
            description: self.desc,
            kind: self.kind,
            body_part: self.body_part,
            equipment: self.equipment,
            level: self.level,
            rating: self.rating.unwrap_or(0.0),
        }
    }
}

/// Immutable in-memory exercise table.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseTable {
    pub(super) columns: Vec<String>,
    pub(super) records: Vec<ExerciseRecord>,
}

impl ExerciseTable {
    /// Normalized header names, in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[ExerciseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}
