//! CSV rendering of the collected rows.

use crate::stats::ReportRow;
use std::io::{self, Write};

pub const HEADER: &str = "ID,Title,Likes,Views,Comments,PublishedDate";

/// Writes the header followed by one line per row, in the order given.
///
/// Every field is wrapped in double quotes, numbers included. Double quotes inside a field are
/// doubled, so titles containing them still produce well-formed CSV.
pub fn write_csv<W: Write>(rows: &[ReportRow], mut out: W) -> io::Result<()> {
    writeln!(out, "{HEADER}")?;
    for row in rows {
        let stats = &row.stats;
        let fields = [
            row.url.clone(),
            stats.title.clone(),
            stats.like_count.to_string(),
            stats.view_count.to_string(),
            stats.comment_count.to_string(),
            stats.published_at.to_string(),
        ];
        let line = fields
            .iter()
            .map(|f| quote(f))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(out, "{line}")?;
    }
    out.flush()
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
