//! Catalogue builder properties

use module_catalogue::catalogue::{CatalogueEntry, ModuleRow, build_catalogue, group_boundaries};

#[allow(clippy::too_many_arguments)]
fn row(
    area: &str,
    parent: &str,
    label: &str,
    id: i64,
    version: i64,
    ects: f64,
    exam: &str,
    parts: &str,
) -> ModuleRow {
    ModuleRow {
        study_area_title: area.to_string(),
        parent_area_title: parent.to_string(),
        module_label: label.to_string(),
        module_id: id,
        module_version: version,
        ects,
        exam_type: exam.to_string(),
        part_types: parts.to_string(),
    }
}

fn keyed(area: &str, parent: &str, id: i64) -> ModuleRow {
    row(area, parent, &format!("m{}", id), id, 1, 6.0, "oral", "")
}

fn line(
    group: u32,
    label: &str,
    id: i64,
    version: i64,
    ects: f64,
    exam: &str,
    parts: &str,
) -> CatalogueEntry {
    CatalogueEntry::ModuleLine {
        group,
        label: label.to_string(),
        module_id: id,
        module_version: version,
        ects,
        exam_type: exam.to_string(),
        part_types: parts.to_string(),
    }
}

/// Deterministic inputs with varying group structure
fn sample_inputs() -> Vec<Vec<ModuleRow>> {
    let keys = [("A", "X"), ("B", "X"), ("A", "Y"), ("B", "Y")];
    let mut inputs = Vec::new();
    let mut seed: u64 = 42;

    for len in 1..=24 {
        let mut rows = Vec::with_capacity(len);
        for i in 0..len {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let (area, parent) = keys[((seed >> 33) % keys.len() as u64) as usize];
            rows.push(keyed(area, parent, i as i64));
        }
        inputs.push(rows);
    }
    inputs
}

#[test]
fn test_worked_example() {
    let rows = vec![
        row("A", "X", "m1", 1, 1, 6.0, "oral", "written"),
        row("A", "X", "m2", 1, 2, 6.0, "oral", "written"),
        row("B", "Y", "m3", 2, 1, 9.0, "written", ""),
    ];

    let catalogue = build_catalogue(&rows);
    assert_eq!(
        catalogue.entries(),
        &[
            CatalogueEntry::Divider("1: A\n[aus X]".to_string()),
            line(1, "m1", 1, 1, 6.0, "oral", "written"),
            line(1, "m2", 1, 2, 6.0, "oral", "written"),
            CatalogueEntry::Divider("2: B\n[aus Y]".to_string()),
            line(2, "m3", 2, 1, 9.0, "written", ""),
        ]
    );
}

#[test]
fn test_grouping_is_by_adjacency() {
    let rows = vec![
        keyed("A", "X", 1),
        keyed("A", "X", 2),
        keyed("B", "Y", 3),
        keyed("A", "X", 4),
    ];

    let catalogue = build_catalogue(&rows);
    let dividers: Vec<&CatalogueEntry> = catalogue
        .entries()
        .iter()
        .filter(|e| e.is_divider())
        .collect();
    assert_eq!(
        dividers,
        vec![
            &CatalogueEntry::Divider("1: A\n[aus X]".to_string()),
            &CatalogueEntry::Divider("2: B\n[aus Y]".to_string()),
            &CatalogueEntry::Divider("3: A\n[aus X]".to_string()),
        ]
    );
    assert_eq!(catalogue.entries().last().unwrap().group(), Some(3));
}

#[test]
fn test_empty_input() {
    assert!(build_catalogue(&[]).is_empty());
}

#[test]
fn test_length_is_rows_plus_groups() {
    for rows in sample_inputs() {
        let catalogue = build_catalogue(&rows);
        let groups = group_boundaries(&rows).len();
        assert_eq!(catalogue.len(), rows.len() + groups);
        assert_eq!(catalogue.group_count(), groups);
    }
}

#[test]
fn test_group_index_steps_by_one() {
    for rows in sample_inputs() {
        let catalogue = build_catalogue(&rows);
        let groups: Vec<u32> = catalogue.entries().iter().filter_map(|e| e.group()).collect();

        assert_eq!(groups[0], 1);
        for pair in groups.windows(2) {
            assert!(pair[1] == pair[0] || pair[1] == pair[0] + 1);
        }
        assert_eq!(*groups.last().unwrap() as usize, catalogue.group_count());
    }
}

#[test]
fn test_every_divider_is_followed_by_a_module() {
    for rows in sample_inputs() {
        let catalogue = build_catalogue(&rows);
        let entries = catalogue.entries();

        assert!(entries[0].is_divider());
        for pair in entries.windows(2) {
            assert!(!(pair[0].is_divider() && pair[1].is_divider()));
        }
        assert!(!entries.last().unwrap().is_divider());
    }
}

#[test]
fn test_builder_is_repeatable() {
    for rows in sample_inputs() {
        assert_eq!(build_catalogue(&rows), build_catalogue(&rows));
    }
}
