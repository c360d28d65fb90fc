//! Output sinks: delimited files, JSON lines, and an HTML table.
//!
//! The CSV layout (column names included) is a published contract — the
//! tweet cron and anything else downstream read these files back — so the
//! legacy header spelling stays.

use crate::record::GameRecord;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// One line of the published ranking.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RankedRow {
    #[serde(rename = "Visitor")]
    pub visitor: String,
    #[serde(rename = "Host")]
    pub host: String,
    #[serde(rename = "SCORE: 0 - 100")]
    pub score: u8,
}

/// Project assembled records (already score-descending) onto output rows.
pub fn ranked_rows(records: &[GameRecord]) -> Vec<RankedRow> {
    records
        .iter()
        .map(|r| RankedRow {
            visitor: r.game.visitor.short_name.clone(),
            host: r.game.host.short_name.clone(),
            score: r.score.unwrap_or(0),
        })
        .collect()
}

pub fn write_csv<W: Write>(rows: &[RankedRow], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the two delimited files of a run: a timestamped one that
/// accumulates per cron execution, and a canonical one per date that each
/// run overwrites.
pub fn write_csv_files(
    rows: &[RankedRow],
    dir: &Path,
    date: NaiveDate,
    playoff_mode: bool,
    now: DateTime<Utc>,
) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    let suffix = if playoff_mode { "-po" } else { "" };
    let stamped = dir.join(format!("scoring-{date} {}{suffix}.csv", now.format("%H%M")));
    let canonical = dir.join(format!("scoring-{date}{suffix}.csv"));

    for path in [&stamped, &canonical] {
        let file =
            File::create(path).with_context(|| format!("writing {}", path.display()))?;
        write_csv(rows, file)?;
    }
    Ok((stamped, canonical))
}

/// One JSON object per line, same columns as the CSV.
pub fn write_json_lines<W: Write>(rows: &[RankedRow], mut writer: W) -> Result<()> {
    for row in rows {
        serde_json::to_writer(&mut writer, row)?;
        writeln!(writer)?;
    }
    Ok(())
}

/// A single styled table, handy for pointing a browser at the output dir.
pub fn write_html<W: Write>(rows: &[RankedRow], mut writer: W, date: NaiveDate) -> Result<()> {
    writeln!(
        writer,
        "<html>\n<head><title>Games Scoring {date}</title>\n\
         <link rel=\"stylesheet\" type=\"text/css\" href=\"greenTable.css\"/></head>\n<body>"
    )?;
    writeln!(
        writer,
        "<table class=\"greenTable\"><thead><tr>\
         <th>Visitor</th><th>Host</th><th>SCORE: 0 - 100</th></tr></thead><tbody>"
    )?;
    for row in rows {
        writeln!(
            writer,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            row.visitor, row.host, row.score
        )?;
    }
    writeln!(writer, "</tbody></table>\n</body>\n</html>")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<RankedRow> {
        vec![
            RankedRow { visitor: "DAL".into(), host: "SAS".into(), score: 74 },
            RankedRow { visitor: "MIA".into(), host: "BOS".into(), score: 31 },
        ]
    }

    #[test]
    fn csv_keeps_the_legacy_header_and_order() {
        let mut buf = Vec::new();
        write_csv(&rows(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "Visitor,Host,SCORE: 0 - 100\nDAL,SAS,74\nMIA,BOS,31\n"
        );
    }

    #[test]
    fn json_lines_hold_one_object_per_row() {
        let mut buf = Vec::new();
        write_json_lines(&rows(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["Visitor"], "DAL");
        assert_eq!(first["SCORE: 0 - 100"], 74);
    }

    #[test]
    fn html_table_contains_every_row() {
        let mut buf = Vec::new();
        let date = NaiveDate::from_ymd_opt(2019, 12, 3).unwrap();
        write_html(&rows(), &mut buf, date).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("<td>DAL</td><td>SAS</td><td>74</td>"));
        assert!(text.contains("greenTable"));
    }
}
