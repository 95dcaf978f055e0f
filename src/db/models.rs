//! Row types read from the module database

use sqlx::FromRow;

/// A study program
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Program {
    pub id: i64,
    pub title: String,
    pub degree: String,
}

impl Program {
    pub fn new(id: i64, title: impl Into<String>, degree: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            degree: degree.into(),
        }
    }
}

/// Database representation of a catalogue row, before label rendering.
///
/// Titles aren't constrained in the exported schema; NULL renders as empty.
#[derive(Debug, Clone, FromRow)]
pub struct DbModuleRow {
    pub study_area_title: Option<String>,
    pub parent_area_title: Option<String>,
    pub module_title: Option<String>,
    pub module_id: i64,
    pub module_version: i64,
    pub ects: Option<f64>,
    pub exam_type: Option<String>,
    pub part_types: Option<String>,
}
