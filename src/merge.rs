//! Deduplicating merge of course-participant tables
//!
//! Students enrolled in more than one course appear once per input file. The
//! merge concatenates all tables, keeps single-occurrence rows as they are,
//! and collapses each group of rows sharing a merge-key value into one row
//! whose `course_id` carries the sorted list of all the group's course IDs.
//!
//! Pure function of its inputs, no I/O. The caller loads the tables and
//! writes the result.

use std::collections::{HashMap, HashSet};

use crate::error::{MergeError, Result};
use crate::table::{Cell, Row, Table, COURSE_ID_COL};

/// Merge tagged participant tables into one deduplicated, sorted table
///
/// `merge_cols` decides row identity across tables (typically the
/// matriculation number), `sort_cols` decides output order. Both must name
/// columns present in the inputs.
///
/// Within a duplicate group, the first row in concatenation order supplies
/// every column except `course_id`; the remaining rows are assumed to differ
/// only in their course ID and are not checked against the representative.
pub fn merge(tables: Vec<Table>, merge_cols: &[String], sort_cols: &[String]) -> Result<Table> {
    let Some(first) = tables.first() else {
        return Err(MergeError::NoInputTables);
    };

    let columns = first.columns.clone();
    check_schemas(&tables, &columns)?;

    let merge_idx = first.column_indices(merge_cols, "merge")?;
    let sort_idx = first.column_indices(sort_cols, "sort")?;
    let course_idx = first
        .column_index(COURSE_ID_COL)
        .ok_or_else(|| MergeError::MissingColumn {
            column: COURSE_ID_COL.to_string(),
            role: "course ID".to_string(),
        })?;

    let all_rows: Vec<Row> = tables.into_iter().flat_map(|t| t.rows).collect();
    let total = all_rows.len();

    let mut occurrences: HashMap<Vec<String>, usize> = HashMap::new();
    for row in &all_rows {
        *occurrences.entry(key_of(row, &merge_idx)).or_insert(0) += 1;
    }

    // Partition into singles and duplicate groups, both in first-encounter order
    let mut singles: Vec<Row> = Vec::new();
    let mut groups: HashMap<Vec<String>, Vec<Row>> = HashMap::new();
    let mut group_order: Vec<Vec<String>> = Vec::new();
    for row in all_rows {
        let key = key_of(&row, &merge_idx);
        if occurrences[&key] == 1 {
            singles.push(row);
        } else {
            let group = groups.entry(key.clone()).or_default();
            if group.is_empty() {
                group_order.push(key);
            }
            group.push(row);
        }
    }
    let grouped: usize = groups.values().map(Vec::len).sum();
    debug_assert_eq!(singles.len() + grouped, total);

    // Collapse each group into its representative row with sorted course IDs
    let mut merged: Vec<Row> = singles;
    for key in group_order {
        let Some(group) = groups.remove(&key) else {
            continue;
        };
        let mut course_ids: Vec<String> = group
            .iter()
            .map(|row| row[course_idx].to_field())
            .collect();
        course_ids.sort();

        let Some(mut row) = group.into_iter().next() else {
            continue;
        };
        row[course_idx] = Cell::List(course_ids);
        merged.push(row);
    }

    // Post-merge uniqueness, fatal if violated
    let mut seen: HashSet<Vec<String>> = HashSet::with_capacity(merged.len());
    for row in &merged {
        let key = key_of(row, &merge_idx);
        if !seen.insert(key.clone()) {
            return Err(MergeError::DuplicateAfterMerge {
                key: key.join(", "),
            });
        }
    }

    merged.sort_by_cached_key(|row| key_of(row, &sort_idx));

    let mut result = Table::new("merged", columns);
    result.rows = merged;
    Ok(result)
}

fn key_of(row: &Row, indices: &[usize]) -> Vec<String> {
    indices.iter().map(|&i| row[i].to_field()).collect()
}

fn check_schemas(tables: &[Table], expected: &[String]) -> Result<()> {
    for table in tables {
        if table.columns != expected {
            return Err(MergeError::SchemaMismatch {
                file: table.source.clone(),
                expected: expected.join(", "),
                found: table.columns.join(", "),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn table(source: &str, course_id: &str, rows: &[&[&str]]) -> Table {
        let mut t = Table::new(source, cols(&["Matrikelnummer", "Name"]));
        for row in rows {
            t.rows
                .push(row.iter().map(|v| Cell::Scalar(v.to_string())).collect());
        }
        t.set_course_id(course_id);
        t
    }

    fn merge_key() -> Vec<String> {
        cols(&["Matrikelnummer"])
    }

    #[test]
    fn test_student_in_three_courses_collapses_to_one_row() {
        let tables = vec![
            table("a.csv", "365.101", &[&["12345", "Ada"], &["67890", "Grace"]]),
            table("b.csv", "365.102", &[&["12345", "Ada"]]),
            table("c.csv", "365.103", &[&["12345", "Ada"]]),
        ];

        let merged = merge(tables, &merge_key(), &merge_key()).unwrap();

        assert_eq!(merged.rows.len(), 2);
        // "12345" sorts before "67890"
        assert_eq!(merged.rows[0][0], Cell::Scalar("12345".to_string()));
        assert_eq!(
            merged.rows[0][2],
            Cell::List(vec![
                "365.101".to_string(),
                "365.102".to_string(),
                "365.103".to_string()
            ])
        );
        assert_eq!(merged.rows[1][0], Cell::Scalar("67890".to_string()));
        assert_eq!(merged.rows[1][2], Cell::Scalar("365.101".to_string()));
    }

    #[test]
    fn test_course_ids_sorted_regardless_of_input_order() {
        let tables = vec![
            table("c.csv", "365.103", &[&["12345", "Ada"]]),
            table("a.csv", "365.101", &[&["12345", "Ada"]]),
            table("b.csv", "365.102", &[&["12345", "Ada"]]),
        ];

        let merged = merge(tables, &merge_key(), &merge_key()).unwrap();

        assert_eq!(
            merged.rows[0][2],
            Cell::List(vec![
                "365.101".to_string(),
                "365.102".to_string(),
                "365.103".to_string()
            ])
        );
    }

    #[test]
    fn test_singles_pass_through_unchanged() {
        let tables = vec![
            table("a.csv", "365.101", &[&["11111", "Ada"]]),
            table("b.csv", "365.102", &[&["22222", "Grace"]]),
        ];

        let merged = merge(tables, &merge_key(), &merge_key()).unwrap();

        assert_eq!(merged.rows.len(), 2);
        assert_eq!(
            merged.rows[0],
            vec![
                Cell::Scalar("11111".to_string()),
                Cell::Scalar("Ada".to_string()),
                Cell::Scalar("365.101".to_string()),
            ]
        );
        assert_eq!(merged.rows[1][2], Cell::Scalar("365.102".to_string()));
    }

    #[test]
    fn test_row_conservation() {
        // 5 input rows: 3 collapse into 1 group, 2 stay single
        let tables = vec![
            table("a.csv", "101", &[&["1", "A"], &["2", "B"]]),
            table("b.csv", "102", &[&["1", "A"], &["3", "C"]]),
            table("c.csv", "103", &[&["1", "A"]]),
        ];

        let merged = merge(tables, &merge_key(), &merge_key()).unwrap();

        assert_eq!(merged.rows.len(), 3);
        let collapsed: Vec<_> = merged
            .rows
            .iter()
            .filter(|r| matches!(r[2], Cell::List(_)))
            .collect();
        assert_eq!(collapsed.len(), 1);
        assert_eq!(
            collapsed[0][2],
            Cell::List(vec!["101".to_string(), "102".to_string(), "103".to_string()])
        );
    }

    #[test]
    fn test_representative_is_first_encountered_row() {
        let tables = vec![
            table("a.csv", "101", &[&["1", "Ada K."]]),
            table("b.csv", "102", &[&["1", "Ada"]]),
        ];

        let merged = merge(tables, &merge_key(), &merge_key()).unwrap();

        // Non-course-ID columns come from the first row of the group
        assert_eq!(merged.rows[0][1], Cell::Scalar("Ada K.".to_string()));
    }

    #[test]
    fn test_sort_is_stable_on_equal_keys() {
        let tables = vec![table(
            "a.csv",
            "101",
            &[&["3", "same"], &["1", "same"], &["2", "same"]],
        )];

        // Sorting by Name only: all equal, original order must survive
        let merged = merge(tables, &merge_key(), &cols(&["Name"])).unwrap();

        let ids: Vec<String> = merged.rows.iter().map(|r| r[0].to_field()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_multi_column_sort_leftmost_primary() {
        let mut t = Table::new("a.csv", cols(&["Group", "Matrikelnummer"]));
        for (g, m) in [("2", "1"), ("1", "9"), ("1", "2"), ("2", "0")] {
            t.rows
                .push(vec![Cell::Scalar(g.to_string()), Cell::Scalar(m.to_string())]);
        }
        t.set_course_id("101");

        let merged = merge(
            vec![t],
            &cols(&["Matrikelnummer"]),
            &cols(&["Group", "Matrikelnummer"]),
        )
        .unwrap();

        let order: Vec<(String, String)> = merged
            .rows
            .iter()
            .map(|r| (r[0].to_field(), r[1].to_field()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("1".to_string(), "2".to_string()),
                ("1".to_string(), "9".to_string()),
                ("2".to_string(), "0".to_string()),
                ("2".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_multi_column_merge_key() {
        // Same Matrikelnummer but different Name: distinct under a two-column key
        let tables = vec![
            table("a.csv", "101", &[&["1", "Ada"]]),
            table("b.csv", "102", &[&["1", "Grace"]]),
        ];

        let merged = merge(
            tables,
            &cols(&["Matrikelnummer", "Name"]),
            &merge_key(),
        )
        .unwrap();

        assert_eq!(merged.rows.len(), 2);
        assert!(merged
            .rows
            .iter()
            .all(|r| matches!(r[2], Cell::Scalar(_))));
    }

    #[test]
    fn test_missing_merge_column_fails() {
        let tables = vec![table("a.csv", "101", &[&["1", "Ada"]])];
        let err = merge(tables, &cols(&["Nope"]), &merge_key()).unwrap_err();
        assert!(matches!(err, MergeError::MissingColumn { .. }));
    }

    #[test]
    fn test_missing_sort_column_fails() {
        let tables = vec![table("a.csv", "101", &[&["1", "Ada"]])];
        let err = merge(tables, &merge_key(), &cols(&["Nope"])).unwrap_err();
        assert!(matches!(err, MergeError::MissingColumn { .. }));
    }

    #[test]
    fn test_schema_mismatch_fails_and_names_the_file() {
        let mut odd = Table::new("odd.csv", cols(&["Matrikelnummer", "Email"]));
        odd.rows.push(vec![
            Cell::Scalar("1".to_string()),
            Cell::Scalar("a@b".to_string()),
        ]);
        odd.set_course_id("102");

        let tables = vec![table("a.csv", "101", &[&["1", "Ada"]]), odd];
        let err = merge(tables, &merge_key(), &merge_key()).unwrap_err();

        match err {
            MergeError::SchemaMismatch { file, .. } => assert_eq!(file, "odd.csv"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_no_input_tables_fails() {
        let err = merge(Vec::new(), &merge_key(), &merge_key()).unwrap_err();
        assert!(matches!(err, MergeError::NoInputTables));
    }

    #[test]
    fn test_duplicates_within_one_file_also_collapse() {
        // Same student listed twice in the same export still forms a group
        let tables = vec![table("a.csv", "101", &[&["1", "Ada"], &["1", "Ada"]])];

        let merged = merge(tables, &merge_key(), &merge_key()).unwrap();

        assert_eq!(merged.rows.len(), 1);
        assert_eq!(
            merged.rows[0][2],
            Cell::List(vec!["101".to_string(), "101".to_string()])
        );
    }
}
