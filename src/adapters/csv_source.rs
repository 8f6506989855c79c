use crate::domain::ports::RecordSource;
use crate::utils::error::{PlannerError, Result};
use std::fs::File;
use std::io::Read;

pub const DEFAULT_DELIMITER: u8 = b',';

/// Reads course records from delimited text files.
///
/// Quoting is disabled: a quote character is ordinary text and a delimiter inside a title
/// splits the field. Fields are trimmed and blank lines dropped. A line ending in the
/// delimiter does not produce a trailing empty field, so `CSCI100,` has one field.
#[derive(Debug, Clone)]
pub struct CsvRecordSource {
    delimiter: u8,
}

impl CsvRecordSource {
    pub fn new() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Splits every non-blank line of `reader` into trimmed fields.
    pub fn parse_reader<R: Read>(&self, reader: R) -> Result<Vec<Vec<String>>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .delimiter(self.delimiter)
            .from_reader(reader);

        let mut records = Vec::new();
        let mut skipped = 0usize;

        for result in csv_reader.records() {
            let record = result?;

            if is_blank(&record) {
                skipped += 1;
                continue;
            }

            records.push(split_fields(&record));
        }

        if skipped > 0 {
            tracing::debug!("Skipped {} blank line(s)", skipped);
        }

        Ok(records)
    }
}

impl Default for CsvRecordSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordSource for CsvRecordSource {
    fn read_records(&self, name: &str) -> Result<Vec<Vec<String>>> {
        tracing::debug!("Opening course file: {}", name);

        let file = File::open(name).map_err(|source| PlannerError::SourceUnavailable {
            path: name.to_string(),
            source,
        })?;

        // The file handle is dropped with the reader on every return path.
        let records = self.parse_reader(file)?;
        tracing::debug!("Read {} record(s) from {}", records.len(), name);

        Ok(records)
    }
}

fn is_blank(record: &csv::StringRecord) -> bool {
    record.len() <= 1 && record.iter().all(|field| field.trim().is_empty())
}

/// Trimmed fields of a raw record, minus the empty field left behind by a trailing delimiter.
fn split_fields(record: &csv::StringRecord) -> Vec<String> {
    let mut raw: Vec<&str> = record.iter().collect();
    if raw.len() > 1 && raw.last() == Some(&"") {
        raw.pop();
    }

    raw.into_iter().map(|field| field.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(content: &str) -> Vec<Vec<String>> {
        CsvRecordSource::new()
            .parse_reader(content.as_bytes())
            .unwrap()
    }

    #[test]
    fn test_fields_are_trimmed() {
        let records = parse("CSCI300 ,  Introduction to Algorithms , CSCI200,MATH201\n");
        assert_eq!(
            records,
            vec![vec![
                "CSCI300",
                "Introduction to Algorithms",
                "CSCI200",
                "MATH201"
            ]]
        );
    }

    #[test]
    fn test_blank_lines_are_dropped() {
        let records = parse("CSCI100,Intro\n\n   \nCSCI200,Data Structures\n\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1][0], "CSCI200");
    }

    #[test]
    fn test_records_may_have_different_lengths() {
        let records = parse("CSCI100\nCSCI200,Data Structures,CSCI100\nCSCI300,Algorithms,,\n");
        assert_eq!(records[0], vec!["CSCI100"]);
        assert_eq!(records[1].len(), 3);
        assert_eq!(records[2], vec!["CSCI300", "Algorithms", ""]);
    }

    #[test]
    fn test_trailing_delimiter_adds_no_field() {
        let records = parse("CSCI100,\n,\nCSCI200,Data Structures,\r\nCSCI300 , \n");
        assert_eq!(
            records,
            vec![
                vec!["CSCI100"],
                vec![""],
                vec!["CSCI200", "Data Structures"],
                vec!["CSCI300", ""],
            ]
        );
    }

    #[test]
    fn test_quotes_are_not_special() {
        let records = parse("CSCI100,\"Intro, Part 1\"\n");
        assert_eq!(records[0], vec!["CSCI100", "\"Intro", "Part 1\""]);
    }

    #[test]
    fn test_windows_line_endings() {
        let records = parse("CSCI100,Intro\r\nCSCI200,Data Structures\r\n");
        assert_eq!(records[0], vec!["CSCI100", "Intro"]);
        assert_eq!(records[1], vec!["CSCI200", "Data Structures"]);
    }

    #[test]
    fn test_custom_delimiter() {
        let records = CsvRecordSource::with_delimiter(b';')
            .parse_reader("CSCI200;Data Structures, Part 2;CSCI100".as_bytes())
            .unwrap();
        assert_eq!(
            records,
            vec![vec!["CSCI200", "Data Structures, Part 2", "CSCI100"]]
        );
    }

    #[test]
    fn test_read_records_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "CSCI100,Introduction to Computer Science").unwrap();
        writeln!(temp_file).unwrap();
        writeln!(temp_file, "CSCI101,Introduction to Programming in C,CSCI100").unwrap();

        let source = CsvRecordSource::new();
        let records = source
            .read_records(temp_file.path().to_str().unwrap())
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1][2], "CSCI100");
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let source = CsvRecordSource::new();
        let err = source
            .read_records("/definitely/not/here/courses.csv")
            .unwrap_err();

        assert!(matches!(err, PlannerError::SourceUnavailable { .. }));
        assert_eq!(
            err.to_string(),
            "Error: could not open file '/definitely/not/here/courses.csv'."
        );
    }

    #[test]
    fn test_invalid_utf8_is_csv_error() {
        let bytes: &[u8] = b"CSCI100,Intro\nCSCI200,\xff\xfe\n";
        let err = CsvRecordSource::new().parse_reader(bytes).unwrap_err();
        assert!(matches!(err, PlannerError::CsvError(_)));
    }
}
