//! Tabular transforms over flat extraction rows.
//!
//! - `table`: keyed merges (outer/left/inner) in the shape the source
//!   tables need, joining categories by team name
//! - `rank`: stable sort by a numeric statistic plus dense 1-based ranks

pub mod rank;
pub mod table;

pub use rank::{rank_by, SortDirection};
pub use table::{merge_inner, merge_left, merge_outer, sort_by_text, Row};
