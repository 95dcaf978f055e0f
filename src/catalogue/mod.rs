//! Module catalogue construction
//!
//! Turns the flat, ordered rows of a study program into the divider-annotated
//! list that is written into a program's sheet. Grouping is driven by the
//! (study area, parent area) pair of *adjacent* rows: the same pair showing up
//! again after a different one starts a new group.

pub mod formula;

use serde_json::Value;

/// One module as assigned to a study area of a program
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleRow {
    pub study_area_title: String,
    pub parent_area_title: String,
    pub module_label: String,
    pub module_id: i64,
    pub module_version: i64,
    pub ects: f64,
    pub exam_type: String,
    /// Comma-joined, deduplicated module part types
    pub part_types: String,
}

impl ModuleRow {
    fn group_key(&self) -> (&str, &str) {
        (&self.study_area_title, &self.parent_area_title)
    }
}

/// A single spreadsheet row of the catalogue
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogueEntry {
    /// Heading row opening a new study area group
    Divider(String),
    /// A module inside the current group
    ModuleLine {
        group: u32,
        label: String,
        module_id: i64,
        module_version: i64,
        ects: f64,
        exam_type: String,
        part_types: String,
    },
}

impl CatalogueEntry {
    fn divider(group: u32, study_area: &str, parent_area: &str) -> Self {
        CatalogueEntry::Divider(format!("{}: {}\n[aus {}]", group, study_area, parent_area))
    }

    fn module_line(group: u32, row: &ModuleRow) -> Self {
        CatalogueEntry::ModuleLine {
            group,
            label: row.module_label.clone(),
            module_id: row.module_id,
            module_version: row.module_version,
            ects: row.ects,
            exam_type: row.exam_type.clone(),
            part_types: row.part_types.clone(),
        }
    }

    /// Group index this entry belongs to, `None` for dividers
    pub fn group(&self) -> Option<u32> {
        match self {
            CatalogueEntry::Divider(_) => None,
            CatalogueEntry::ModuleLine { group, .. } => Some(*group),
        }
    }

    pub fn is_divider(&self) -> bool {
        matches!(self, CatalogueEntry::Divider(_))
    }

    /// Cell values as the Sheets API expects them.
    ///
    /// Dividers occupy a single cell; module lines leave the first column
    /// empty and put the group index in the second.
    pub fn to_cells(&self) -> Vec<Value> {
        match self {
            CatalogueEntry::Divider(title) => vec![Value::from(title.as_str())],
            CatalogueEntry::ModuleLine {
                group,
                label,
                module_id,
                module_version,
                ects,
                exam_type,
                part_types,
            } => vec![
                Value::from(""),
                Value::from(*group),
                Value::from(label.as_str()),
                Value::from(*module_id),
                Value::from(*module_version),
                Value::from(*ects),
                Value::from(exam_type.as_str()),
                Value::from(part_types.as_str()),
            ],
        }
    }
}

/// Ordered catalogue for one study program
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogue {
    entries: Vec<CatalogueEntry>,
}

impl Catalogue {
    pub fn entries(&self) -> &[CatalogueEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of groups, i.e. number of dividers
    pub fn group_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_divider()).count()
    }

    /// Row-major values for a `values:append` request
    pub fn to_values(&self) -> Vec<Vec<Value>> {
        self.entries.iter().map(CatalogueEntry::to_cells).collect()
    }
}

impl IntoIterator for Catalogue {
    type Item = CatalogueEntry;
    type IntoIter = std::vec::IntoIter<CatalogueEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Build the catalogue for a program's rows, in the order given
pub fn build_catalogue(rows: &[ModuleRow]) -> Catalogue {
    let mut entries = Vec::with_capacity(rows.len() * 2);
    let mut group = 0u32;
    let mut last_key: Option<(&str, &str)> = None;

    for row in rows {
        let key = row.group_key();
        if last_key != Some(key) {
            group += 1;
            last_key = Some(key);
            entries.push(CatalogueEntry::divider(group, key.0, key.1));
        }
        entries.push(CatalogueEntry::module_line(group, row));
    }

    Catalogue { entries }
}

/// Indices of the rows that open a new group
pub fn group_boundaries(rows: &[ModuleRow]) -> Vec<usize> {
    let mut last_key: Option<(&str, &str)> = None;
    let mut boundaries = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let key = row.group_key();
        if last_key != Some(key) {
            last_key = Some(key);
            boundaries.push(i);
        }
    }

    boundaries
}
