use super::super::scoring::AssessmentResult;
use super::views::ResultRow;
use chrono::NaiveDate;
use std::io::Write;

pub const CSV_HEADER: [&str; 5] = ["Factor", "Sub-factor", "Score", "Level", "Comments"];
pub const UNANSWERED_TOKEN: &str = "N/A";
pub const OVERALL_ROW_LABEL: &str = "Overall Score";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV export: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV export is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// `repair-readiness-<YYYY-MM-DD>.csv`
pub fn export_filename(date: NaiveDate) -> String {
    format!("repair-readiness-{}.csv", date.format("%Y-%m-%d"))
}

/// Writes one row per subfactor followed by the overall summary row.
///
/// Every field is quoted and embedded quotes are doubled, so free-text comments always
/// arrive as one quoted field. The summary row has three columns, so the writer runs in
/// flexible mode.
pub fn write_csv<W: Write>(
    writer: W,
    rows: &[ResultRow],
    result: &AssessmentResult,
) -> Result<(), ExportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(true)
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;
    for row in rows {
        let score = row
            .score
            .map(|value| value.to_string())
            .unwrap_or_else(|| UNANSWERED_TOKEN.to_string());
        csv_writer.write_record([
            row.factor.as_str(),
            row.subfactor.as_str(),
            score.as_str(),
            row.level.as_deref().unwrap_or(UNANSWERED_TOKEN),
            row.comment.as_deref().unwrap_or(""),
        ])?;
    }

    let overall = format!("{:.1}", result.overall_score);
    csv_writer.write_record([OVERALL_ROW_LABEL, overall.as_str(), result.level().label()])?;
    csv_writer.flush()?;
    Ok(())
}

pub fn to_csv_string(rows: &[ResultRow], result: &AssessmentResult) -> Result<String, ExportError> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, rows, result)?;
    Ok(String::from_utf8(buffer)?)
}
