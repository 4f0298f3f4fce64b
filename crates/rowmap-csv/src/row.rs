//! Row sources and sinks
//!
//! The sessions only see rows as ordered string fields. Tokenizing and
//! quoting are left to the `csv` crate (or whatever implements these traits).

use std::collections::VecDeque;
use std::io::{Read, Write};

use crate::error::CsvResult;

/// Something rows can be read from
pub trait RowSource {
    /// Read the next row; `None` at end of data
    fn next_row(&mut self) -> CsvResult<Option<Vec<String>>>;
}

/// Something rows can be written to
pub trait RowSink {
    /// Write one row
    fn write_row(&mut self, row: &[String]) -> CsvResult<()>;

    /// Flush buffered rows
    fn flush(&mut self) -> CsvResult<()> {
        Ok(())
    }
}

impl<R: Read> RowSource for csv::Reader<R> {
    fn next_row(&mut self) -> CsvResult<Option<Vec<String>>> {
        let mut record = csv::StringRecord::new();
        if !self.read_record(&mut record)? {
            return Ok(None);
        }
        Ok(Some(record.iter().map(str::to_string).collect()))
    }
}

impl RowSource for VecDeque<Vec<String>> {
    fn next_row(&mut self) -> CsvResult<Option<Vec<String>>> {
        Ok(self.pop_front())
    }
}

impl<S: RowSource + ?Sized> RowSource for &mut S {
    fn next_row(&mut self) -> CsvResult<Option<Vec<String>>> {
        (**self).next_row()
    }
}

impl<W: Write> RowSink for csv::Writer<W> {
    fn write_row(&mut self, row: &[String]) -> CsvResult<()> {
        self.write_record(row)?;
        Ok(())
    }

    fn flush(&mut self) -> CsvResult<()> {
        csv::Writer::flush(self)?;
        Ok(())
    }
}

impl RowSink for Vec<Vec<String>> {
    fn write_row(&mut self, row: &[String]) -> CsvResult<()> {
        self.push(row.to_vec());
        Ok(())
    }
}

impl<S: RowSink + ?Sized> RowSink for &mut S {
    fn write_row(&mut self, row: &[String]) -> CsvResult<()> {
        (**self).write_row(row)
    }

    fn flush(&mut self) -> CsvResult<()> {
        (**self).flush()
    }
}
