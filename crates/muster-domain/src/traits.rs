//! Trait definitions for external interactions
//!
//! The parser hands back structured rows and never pre-joined strings;
//! serializing them is left to implementations of these traits.

use crate::FieldRecord;

/// Trait for writing an ordered sequence of records
///
/// Implemented by output writers (e.g. the CLI's delimited writer).
pub trait RecordSink {
    /// Error type for write operations
    type Error;

    /// Write the column header row
    fn write_header(&mut self) -> Result<(), Self::Error>;

    /// Write one record
    fn write_record(&mut self, record: &FieldRecord) -> Result<(), Self::Error>;

    /// Write records in order, returning how many were written
    fn write_all(&mut self, records: &[FieldRecord]) -> Result<usize, Self::Error> {
        for record in records {
            self.write_record(record)?;
        }
        Ok(records.len())
    }

    /// Flush buffered output
    fn finish(&mut self) -> Result<(), Self::Error>;
}
