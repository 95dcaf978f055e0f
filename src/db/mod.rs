//! Read access to the module transfer database
//!
//! The database is produced elsewhere; this module only opens it read-only and
//! runs the two queries the catalogue needs.

pub mod models;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::Path;

use crate::catalogue::ModuleRow;
use crate::catalogue::formula;
use models::{DbModuleRow, Program};

/// Modules of one program, one row per (module version, study area).
///
/// Parts are optional, so `group_concat` yields NULL for modules without any.
/// Every nullable text column is mapped to an empty string when read.
pub const MODULE_CATALOGUE_QUERY: &str = r#"
    SELECT
        sa.title AS study_area_title,
        sap.title AS parent_area_title,
        m.title AS module_title,
        m.id AS module_id,
        m.version AS module_version,
        CAST(m.ects AS REAL) AS ects,
        m.exam_type AS exam_type,
        group_concat(DISTINCT mp.type) AS part_types
    FROM programs p
    JOIN study_areas sa ON sa.program_id = p.id
    JOIN modules_study_areas msa ON msa.study_area_id = sa.id
    JOIN modules m ON m.id = msa.module_id AND m.version = msa.module_version
    LEFT JOIN module_parts mp ON mp.module_id = m.id AND mp.module_version = m.version
    JOIN study_areas sap ON sap.id = sa.parent_id
    WHERE p.id = ?
    GROUP BY m.id, m.version, sa.id
    ORDER BY sa.id, m.id, m.version
"#;

pub const LIST_PROGRAMS_QUERY: &str =
    "SELECT id, title, degree FROM programs ORDER BY title DESC, degree DESC";

/// How module labels are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// `=HYPERLINK(...)` formula pointing at the module's detail page
    Hyperlink,
    /// The bare module title
    Plain,
}

/// Row source backed by a SQLite module database
pub struct ModuleSource {
    pool: SqlitePool,
    module_base_url: String,
}

impl ModuleSource {
    pub fn new(pool: SqlitePool, module_base_url: impl Into<String>) -> Self {
        Self {
            pool,
            module_base_url: module_base_url.into(),
        }
    }

    /// Open the database file read-only
    pub async fn open(db_path: &Path, module_base_url: impl Into<String>) -> Result<Self> {
        let pool = connect(db_path).await?;
        Ok(Self::new(pool, module_base_url))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// All study programs, in publishing order
    pub async fn list_programs(&self) -> Result<Vec<Program>> {
        let programs: Vec<Program> = sqlx::query_as(LIST_PROGRAMS_QUERY)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list study programs")?;

        log::debug!("Found {} study programs", programs.len());
        Ok(programs)
    }

    /// Ordered module rows of one program
    pub async fn module_rows(&self, program_id: i64, style: LabelStyle) -> Result<Vec<ModuleRow>> {
        let rows: Vec<DbModuleRow> = sqlx::query_as(MODULE_CATALOGUE_QUERY)
            .bind(program_id)
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to query modules of program {}", program_id))?;

        log::debug!("Program {}: {} module rows", program_id, rows.len());

        Ok(rows
            .into_iter()
            .map(|row| self.to_module_row(row, style))
            .collect())
    }

    fn to_module_row(&self, row: DbModuleRow, style: LabelStyle) -> ModuleRow {
        let module_title = row.module_title.unwrap_or_default();
        let module_label = match style {
            LabelStyle::Hyperlink => formula::module_link(
                &self.module_base_url,
                row.module_id,
                row.module_version,
                &module_title,
            ),
            LabelStyle::Plain => module_title,
        };

        ModuleRow {
            study_area_title: row.study_area_title.unwrap_or_default(),
            parent_area_title: row.parent_area_title.unwrap_or_default(),
            module_label,
            module_id: row.module_id,
            module_version: row.module_version,
            ects: row.ects.unwrap_or_default(),
            exam_type: row.exam_type.unwrap_or_default(),
            part_types: row.part_types.unwrap_or_default(),
        }
    }
}

/// Connect to an existing SQLite database without write access
pub async fn connect(db_path: &Path) -> Result<SqlitePool> {
    if !db_path.exists() {
        anyhow::bail!("Database not found: {}", db_path.display());
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .read_only(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to connect to database: {}", db_path.display()))?;

    log::debug!("Connected to SQLite database: {}", db_path.display());
    Ok(pool)
}

/// Connect to an in-memory database, used by tests to seed fixtures
pub async fn connect_memory() -> Result<SqlitePool> {
    // Every connection to `:memory:` is a separate database, so keep just one
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .context("Failed to connect to in-memory database")?;

    log::debug!("Connected to in-memory SQLite database");
    Ok(pool)
}
