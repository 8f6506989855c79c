use crate::utils::error::Result;

/// Supplies tokenized records for a named source.
///
/// Implementations return the trimmed fields of every non-blank line, in source order, and
/// report `PlannerError::SourceUnavailable` when the source cannot be opened. Any handle they
/// acquire must be released before returning.
pub trait RecordSource {
    fn read_records(&self, name: &str) -> Result<Vec<Vec<String>>>;
}

impl<T: RecordSource + ?Sized> RecordSource for &T {
    fn read_records(&self, name: &str) -> Result<Vec<Vec<String>>> {
        (**self).read_records(name)
    }
}
