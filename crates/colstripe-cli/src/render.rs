//! Plain-text rendering of column stripes, one table per leaf column.

use std::fmt::Write;

use colstripe_split::ColumnMap;

/// Render every stripe of `columns` as an aligned `value | r | d` table,
/// in schema order.
pub fn render_column_map(columns: &ColumnMap) -> String {
    let mut out = String::new();
    for stripe in columns.iter() {
        let values: Vec<String> = stripe
            .records
            .iter()
            .map(|r| match &r.value {
                Some(scalar) => scalar.to_string(),
                None => "null".to_string(),
            })
            .collect();
        let width = values
            .iter()
            .map(|v| v.len())
            .chain(std::iter::once("value".len()))
            .max()
            .unwrap_or(0);

        // write! to a String cannot fail.
        let _ = writeln!(out, "{}", stripe.path);
        let _ = writeln!(out, "| {:<width$} | r | d |", "value");
        let _ = writeln!(out, "|{:-<w$}|---|---|", "", w = width + 2);
        for (value, record) in values.iter().zip(&stripe.records) {
            let _ = writeln!(
                out,
                "| {:<width$} | {} | {} |",
                value, record.repetition_level, record.definition_level
            );
        }
        out.push('\n');
    }
    out
}
