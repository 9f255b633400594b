//! Keyed merges over flat rows.
//!
//! The source tables are keyed by unique team name, so the right side of
//! every merge is indexed first-seen-wins. Overlapping non-key columns
//! get the caller's suffixes, matching how the two category tables share
//! column names (`Conference` becomes `Conference_M` / `Conference_W`).

use std::collections::{BTreeMap, BTreeSet, HashMap};

#[cfg(test)]
mod tests;

/// One flat row: column name to text value. Link columns appear as
/// `<column>_link` alongside their text column.
pub type Row = BTreeMap<String, String>;

enum MergeKind {
    Outer,
    Left,
    Inner,
}

/// Outer merge: unmatched rows from both sides survive.
pub fn merge_outer(left: &[Row], right: &[Row], on: &str, suffixes: (&str, &str)) -> Vec<Row> {
    merge(left, right, on, MergeKind::Outer, suffixes)
}

/// Left merge: every left row survives, matched or not. No suffixing;
/// the callers' tables only share the key column.
pub fn merge_left(left: &[Row], right: &[Row], on: &str) -> Vec<Row> {
    merge(left, right, on, MergeKind::Left, ("", ""))
}

/// Inner merge: only rows whose key appears on both sides survive.
pub fn merge_inner(left: &[Row], right: &[Row], on: &str, suffixes: (&str, &str)) -> Vec<Row> {
    merge(left, right, on, MergeKind::Inner, suffixes)
}

/// Stable sort by a text column, ascending; rows without the column sort
/// first (empty key).
pub fn sort_by_text(rows: &mut [Row], column: &str) {
    rows.sort_by(|a, b| {
        let a = a.get(column).map(String::as_str).unwrap_or("");
        let b = b.get(column).map(String::as_str).unwrap_or("");
        a.cmp(b)
    });
}

fn merge(left: &[Row], right: &[Row], on: &str, how: MergeKind, suffixes: (&str, &str)) -> Vec<Row> {
    let overlap = overlapping_columns(left, right, on);

    // Index the right side by key; first occurrence wins.
    let mut right_index: HashMap<&str, &Row> = HashMap::new();
    for row in right {
        if let Some(key) = row.get(on) {
            right_index.entry(key).or_insert(row);
        }
    }

    let mut merged = Vec::new();
    let mut matched_keys: BTreeSet<&str> = BTreeSet::new();

    for row in left {
        let matched = row.get(on).and_then(|key| {
            right_index.get(key.as_str()).map(|other| {
                matched_keys.insert(key.as_str());
                *other
            })
        });

        if matched.is_none() && matches!(how, MergeKind::Inner) {
            continue;
        }

        let mut out = suffixed(row, on, &overlap, suffixes.0);
        if let Some(other) = matched {
            for (column, value) in suffixed(other, on, &overlap, suffixes.1) {
                out.entry(column).or_insert(value);
            }
        }
        merged.push(out);
    }

    if matches!(how, MergeKind::Outer) {
        for row in right {
            let unmatched = row
                .get(on)
                .map(|key| !matched_keys.contains(key.as_str()))
                .unwrap_or(true);
            if unmatched {
                merged.push(suffixed(row, on, &overlap, suffixes.1));
            }
        }
    }

    merged
}

/// Columns present in both tables, other than the key.
fn overlapping_columns(left: &[Row], right: &[Row], on: &str) -> BTreeSet<String> {
    let left_columns: BTreeSet<&String> = left.iter().flat_map(|row| row.keys()).collect();
    right
        .iter()
        .flat_map(|row| row.keys())
        .filter(|column| column.as_str() != on && left_columns.contains(column))
        .cloned()
        .collect()
}

fn suffixed(row: &Row, on: &str, overlap: &BTreeSet<String>, suffix: &str) -> Row {
    row.iter()
        .map(|(column, value)| {
            let column = if column != on && overlap.contains(column) {
                format!("{column}{suffix}")
            } else {
                column.clone()
            };
            (column, value.clone())
        })
        .collect()
}
