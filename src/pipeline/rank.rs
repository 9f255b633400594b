//! Ranking transformer: sort a table by a statistic and assign dense
//! 1-based ranks.

use std::cmp::Ordering;

use super::table::Row;


/// Sort direction for a statistic. Points scored ranks descending
/// (higher is better); opponent points ranks ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Stable-sort `rows` by the numeric value of `stat` and write the
/// 1-based position into `rank_column`.
///
/// Rows whose stat is missing, unparseable, or NaN sort after every
/// ranked row regardless of direction; ties keep first-seen order.
pub fn rank_by(
    mut rows: Vec<Row>,
    stat: &str,
    direction: SortDirection,
    rank_column: &str,
) -> Vec<Row> {
    rows.sort_by(|a, b| compare_stat(stat_value(a, stat), stat_value(b, stat), direction));

    for (index, row) in rows.iter_mut().enumerate() {
        row.insert(rank_column.to_string(), (index + 1).to_string());
    }
    rows
}

/// Numeric value of a stat column, `None` when absent or not a number.
pub fn stat_value(row: &Row, stat: &str) -> Option<f64> {
    row.get(stat)
        .and_then(|text| text.trim().parse::<f64>().ok())
        .filter(|value| !value.is_nan())
}

fn compare_stat(a: Option<f64>, b: Option<f64>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ordering = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
