//! CSV and JSON rendering of flattened lead records.
//!
//! The CSV header is always written, even for an empty record set, so that
//! downstream spreadsheets see a stable column layout.

use std::io::Write;
use std::path::Path;

use crate::error::ExportError;
use crate::leads::FlatLeadRecord;

/// Column order of the CSV export.
pub const CSV_HEADERS: [&str; 7] = [
    "Website URL",
    "Username",
    "Bio",
    "Post Type",
    "Timestamp",
    "Upvotes",
    "Links",
];

fn write_csv<W: Write>(
    writer: &mut csv::Writer<W>,
    records: &[FlatLeadRecord],
) -> Result<(), csv::Error> {
    writer.write_record(CSV_HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn csv_writer<W: Write>(inner: W) -> csv::Writer<W> {
    csv::WriterBuilder::new().has_headers(false).from_writer(inner)
}

/// Renders records as CSV text.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] if a record cannot be encoded.
pub fn render_csv(records: &[FlatLeadRecord]) -> Result<String, ExportError> {
    let mut writer = csv_writer(Vec::new());
    write_csv(&mut writer, records)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| ExportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Renders records as a pretty-printed JSON array (2-space indent).
///
/// # Errors
///
/// Returns [`ExportError::Json`] if serialization fails.
pub fn render_json(records: &[FlatLeadRecord]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Writes records as CSV to `path`, truncating any existing file.
///
/// # Errors
///
/// Returns [`ExportError::Write`] if the file cannot be created or written.
pub fn save_csv(path: &Path, records: &[FlatLeadRecord]) -> Result<(), ExportError> {
    let to_write_error = |source: csv::Error| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::create(path).map_err(|e| to_write_error(e.into()))?;
    let mut writer = csv_writer(file);
    write_csv(&mut writer, records).map_err(to_write_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str, username: &str, upvotes: u64, links: &str) -> FlatLeadRecord {
        FlatLeadRecord {
            website_url: url.to_owned(),
            username: username.to_owned(),
            bio: "Founder, builds \"AI\" tools".to_owned(),
            post_type: "answer".to_owned(),
            timestamp: "Updated Mar 3".to_owned(),
            upvotes,
            links: links.to_owned(),
        }
    }

    fn sample() -> Vec<FlatLeadRecord> {
        vec![
            record("https://www.quora.com/a", "alice", 12, "https://x.example, https://y.example"),
            record("https://www.quora.com/b", "bob", 0, ""),
        ]
    }

    #[test]
    fn render_csv_writes_header_first() {
        let csv_text = render_csv(&sample()).unwrap();
        let first_line = csv_text.lines().next().unwrap();
        assert_eq!(
            first_line,
            "Website URL,Username,Bio,Post Type,Timestamp,Upvotes,Links"
        );
    }

    #[test]
    fn render_csv_of_no_records_is_header_only() {
        let csv_text = render_csv(&[]).unwrap();
        assert_eq!(csv_text.lines().count(), 1);
    }

    #[test]
    fn csv_round_trip_preserves_rows() {
        let records = sample();
        let csv_text = render_csv(&records).unwrap();

        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
        let parsed: Vec<FlatLeadRecord> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .expect("rendered CSV should parse back");

        assert_eq!(parsed, records);
    }

    #[test]
    fn render_json_uses_two_space_indent_and_export_keys() {
        let json_text = render_json(&sample()[..1]).unwrap();
        assert!(json_text.starts_with("[\n  {\n    \"Website URL\""));

        let parsed: Vec<FlatLeadRecord> = serde_json::from_str(&json_text).unwrap();
        assert_eq!(parsed.as_slice(), &sample()[..1]);
    }

    #[test]
    fn save_csv_writes_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.csv");

        save_csv(&path, &sample()).unwrap();

        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk, render_csv(&sample()).unwrap());
    }

    #[test]
    fn save_csv_reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("leads.csv");

        let err = save_csv(&path, &sample()).unwrap_err();

        assert!(
            matches!(err, ExportError::Write { path: ref p, .. } if p.ends_with("leads.csv")),
            "expected Write error, got: {err:?}"
        );
    }
}
