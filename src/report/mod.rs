//! Batch report aggregation and CSV output.
//!
//! [`BatchReport`] collects one [`ResultRecord`] per discovered audio file
//! and writes the whole batch as a single CSV artifact: header plus one
//! row per record, overwriting any previous report at the same path.

use std::borrow::Cow;
use std::io;
use std::path::Path;

use crate::pipeline::record::ResultRecord;

/// Fixed column order of the report.
pub const CSV_HEADER: &str = "audio_file,transcript,label,confidence,reason";

// ---------------------------------------------------------------------------
// BatchReport
// ---------------------------------------------------------------------------

/// The aggregate outcome of one batch run.
///
/// Row order is completion order; no ordering between files is guaranteed.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    records: Vec<ResultRecord>,
}

impl BatchReport {
    /// Build a report from collected records.
    pub fn new(records: Vec<ResultRecord>) -> Self {
        Self { records }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when the batch discovered no files.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in collection order.
    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    /// Render the report as CSV text.
    pub fn to_csv(&self) -> String {
        let mut out = String::with_capacity(64 + self.records.len() * 128);
        out.push_str(CSV_HEADER);
        out.push('\n');
        for r in &self.records {
            out.push_str(&csv_field(&r.audio_file));
            out.push(',');
            out.push_str(&csv_field(&r.transcript));
            out.push(',');
            out.push_str(&csv_field(&r.label));
            out.push(',');
            out.push_str(&r.confidence.to_string());
            out.push(',');
            out.push_str(&csv_field(&r.reason));
            out.push('\n');
        }
        out
    }

    /// Write the report to `path`, replacing any existing file.
    pub fn write_csv(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.to_csv())
    }
}

// ---------------------------------------------------------------------------
// CSV quoting
// ---------------------------------------------------------------------------

/// Quote a field when it contains a delimiter, quote, or line break;
/// embedded quotes are doubled.
fn csv_field(field: &str) -> Cow<'_, str> {
    if field.contains(['"', ',', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Verdict;

    fn record(file: &str, transcript: &str) -> ResultRecord {
        ResultRecord::classified(
            file,
            transcript,
            Verdict {
                label: Verdict::GENUINE.into(),
                confidence: 0.8,
                reason: "normal conversation".into(),
            },
        )
    }

    // ---- quoting -----------------------------------------------------------

    #[test]
    fn plain_fields_are_unquoted() {
        assert_eq!(csv_field("call.wav"), "call.wav");
    }

    #[test]
    fn commas_force_quoting() {
        assert_eq!(csv_field("hello, world"), "\"hello, world\"");
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        assert_eq!(csv_field("say \"yes\""), "\"say \"\"yes\"\"\"");
    }

    #[test]
    fn newlines_force_quoting() {
        assert_eq!(csv_field("a\nb"), "\"a\nb\"");
    }

    // ---- rendering ---------------------------------------------------------

    #[test]
    fn empty_report_is_header_only() {
        let report = BatchReport::default();
        assert_eq!(report.to_csv(), format!("{CSV_HEADER}\n"));
        assert!(report.is_empty());
    }

    #[test]
    fn one_row_per_record() {
        let report = BatchReport::new(vec![
            record("a.wav", "hello there"),
            record("b.mp3", "transfer, now"),
        ]);
        let csv = report.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "a.wav,hello there,Genuine,0.8,normal conversation");
        assert_eq!(lines[2], "b.mp3,\"transfer, now\",Genuine,0.8,normal conversation");
    }

    #[test]
    fn error_record_renders_sentinel_fields() {
        let report = BatchReport::new(vec![ResultRecord::failed("bad.wav", "corrupt file")]);
        let csv = report.to_csv();
        assert!(csv.lines().nth(1).unwrap().contains("bad.wav,,Error,0,corrupt file"));
    }

    // ---- writing -----------------------------------------------------------

    #[test]
    fn write_overwrites_previous_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.csv");

        BatchReport::new(vec![record("a.wav", "x"), record("b.wav", "y")])
            .write_csv(&path)
            .unwrap();
        BatchReport::new(vec![record("c.wav", "z")])
            .write_csv(&path)
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.contains("c.wav"));
        assert!(!contents.contains("a.wav"));
    }
}
