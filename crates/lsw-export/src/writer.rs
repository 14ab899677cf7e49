//! CSV and JSON output writers.
//!
//! The CSV exporter streams batches (one per query window) through a single
//! open writer. The schema is locked in by the first non-empty batch; its
//! header is written exactly once. Later batches whose first record disagrees
//! with the locked schema log a drift warning and are still flattened against
//! the locked schema, trading column fidelity for partial output.

use std::io::Write;

use tracing::warn;

use lsw_common::Result;

use crate::flatten::flatten_record;
use crate::schema::Schema;
use crate::Record;

/// Streaming CSV exporter with a header-once policy.
pub struct CsvExporter<W: Write> {
    writer: csv::Writer<W>,
    schema: Option<Schema>,
}

impl<W: Write> CsvExporter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
            schema: None,
        }
    }

    /// Write one batch of records. Returns the number of rows written.
    ///
    /// An empty batch writes nothing, not even the header.
    pub fn write_batch(&mut self, records: &[Record]) -> Result<usize> {
        let Some(first) = records.first() else {
            return Ok(0);
        };

        match &self.schema {
            None => {
                let schema = Schema::derive(first);
                self.writer.write_record(schema.columns())?;
                self.schema = Some(schema);
            }
            Some(locked) => check_drift(locked, first),
        }

        let schema = self
            .schema
            .as_ref()
            .expect("schema locked for every non-empty batch");
        for record in records {
            self.writer.write_record(flatten_record(record, schema))?;
        }
        self.writer.flush()?;
        Ok(records.len())
    }

    /// The schema locked in by the first non-empty batch, if any.
    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }
}

fn check_drift(locked: &Schema, first: &Record) {
    let candidate = Schema::derive(first);
    if candidate != *locked {
        warn!(
            missing = ?locked.missing_from(&candidate),
            unexpected = ?candidate.missing_from(locked),
            "schema drift between windows; keeping the established header"
        );
    }
}

/// Pretty-print a batch of raw nested records as a single JSON array.
///
/// Flushes before returning so buffered writers surface I/O failures here
/// instead of swallowing them in a drop-time flush.
pub fn write_json_pretty<W: Write>(records: &[Record], mut out: W) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    out.write_all(json.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(json: &str) -> Record {
        serde_json::from_str(json).unwrap()
    }

    fn export(batches: &[Vec<Record>]) -> String {
        let mut buf = Vec::new();
        {
            let mut exporter = CsvExporter::new(&mut buf);
            for batch in batches {
                exporter.write_batch(batch).unwrap();
            }
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_then_rows() {
        let out = export(&[vec![
            record(r#"{"a":1,"b":{"c":2,"d":3}}"#),
            record(r#"{"a":4,"b":{"c":5,"d":6}}"#),
        ]]);
        assert_eq!(out, "a,b.c,b.d\n1,2,3\n4,5,6\n");
    }

    #[test]
    fn empty_batch_writes_nothing() {
        let out = export(&[vec![]]);
        assert!(out.is_empty());
    }

    #[test]
    fn header_written_once_across_batches() {
        let out = export(&[
            vec![record(r#"{"a":1}"#)],
            vec![],
            vec![record(r#"{"a":2}"#)],
        ]);
        assert_eq!(out, "a\n1\n2\n");
    }

    #[test]
    fn embedded_delimiters_roundtrip() {
        let original = r#"say "hi", twice"#;
        let rec = record(&serde_json::json!({ "msg": original, "n": 1 }).to_string());
        let out = export(&[vec![rec]]);

        let mut reader = csv::Reader::from_reader(out.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), ["msg", "n"]);
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[0], original);
        assert_eq!(&row[1], "1");
    }

    #[test]
    fn embedded_newline_roundtrips() {
        let original = "line one\nline two";
        let rec = record(&serde_json::json!({ "msg": original }).to_string());
        let out = export(&[vec![rec]]);

        let mut reader = csv::Reader::from_reader(out.as_bytes());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[0], original);
    }

    #[test]
    fn drifted_batch_flattened_against_locked_schema() {
        let out = export(&[
            vec![record(r#"{"a":1,"b":2}"#)],
            vec![record(r#"{"b":3,"z":4}"#)],
        ]);
        // "z" dropped, "a" empty for the drifted record.
        assert_eq!(out, "a,b\n1,2\n,3\n");
    }

    #[test]
    fn json_batch_roundtrips_unflattened() {
        let records: Vec<Record> = vec![
            record(r#"{"a":1,"b":{"c":2}}"#),
            record(r#"{"a":3,"b":{"c":4}}"#),
        ];
        let mut buf = Vec::new();
        write_json_pretty(&records, &mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        // Pretty-printed: two-space indent.
        assert!(text.starts_with("[\n  {"));
        let back: Vec<Record> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn json_empty_batch_is_empty_array() {
        let mut buf = Vec::new();
        write_json_pretty(&[], &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[]\n");
    }

    /// Sink whose every write and flush fails.
    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("sink is broken"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::other("sink is broken"))
        }
    }

    #[test]
    fn json_write_failure_surfaces_through_buffered_writer() {
        // A small payload fits entirely in the BufWriter; without the final
        // flush the failure would only hit the drop-time flush and be lost.
        let records = vec![record(r#"{"a":1}"#)];
        let result = write_json_pretty(&records, std::io::BufWriter::new(BrokenSink));
        assert!(result.is_err());
    }
}
