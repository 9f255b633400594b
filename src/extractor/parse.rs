//! Flattens nested extraction records into flat rows.

use serde_json::Value;

use crate::pipeline::table::Row;


/// Flatten extraction-run documents into one `Row` per source row.
///
/// Each document is shaped
/// `{"result": {"extractorData": {"data": [{"group": [row, ...]}, ...]}}}`
/// where a row maps column names to a one-element list of
/// `{"text": value, "src"?: link}`. The text value lands under the
/// column name; when a `src` is present it lands under `<column>_link`.
/// Row order is the concatenation across documents and groups in input
/// order. Documents or groups without the expected shape contribute no
/// rows.
pub fn parse_records(documents: &[Value]) -> Vec<Row> {
    let mut rows = Vec::new();

    for document in documents {
        let Some(groups) = document
            .pointer("/result/extractorData/data")
            .and_then(Value::as_array)
        else {
            continue;
        };

        for group in groups {
            let Some(group_rows) = group.get("group").and_then(Value::as_array) else {
                continue;
            };

            for source_row in group_rows {
                let Some(columns) = source_row.as_object() else {
                    continue;
                };

                let mut row = Row::new();
                for (column, values) in columns {
                    let Some(value) = values.as_array().and_then(|v| v.first()) else {
                        continue;
                    };
                    if let Some(text) = value.get("text") {
                        row.insert(column.clone(), text_value(text));
                    }
                    if let Some(src) = value.get("src").and_then(Value::as_str) {
                        row.insert(format!("{column}_link"), src.to_string());
                    }
                }
                rows.push(row);
            }
        }
    }

    rows
}

/// Text values are usually strings, but the extraction service emits
/// bare numbers for some columns.
fn text_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
