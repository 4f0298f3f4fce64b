//! CSV options

use std::io::{Read, Write};

/// Options for decoding CSV input
#[derive(Debug, Clone)]
pub struct CsvReadOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Trim whitespace around fields and header names
    pub trim: bool,
    /// Fail when the header lacks a column for any field
    pub disallow_missing_columns: bool,
}

impl Default for CsvReadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            trim: false,
            disallow_missing_columns: false,
        }
    }
}

impl CsvReadOptions {
    /// Build a `csv::Reader` that hands every row, header included, to the decoder
    pub fn reader<R: Read>(&self, reader: R) -> csv::Reader<R> {
        csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .quote(self.quote)
            .trim(if self.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            // The decoder consumes the header row itself and reports short
            // or long rows as malformed
            .has_headers(false)
            .flexible(true)
            .from_reader(reader)
    }
}

/// Options for encoding CSV output
#[derive(Debug, Clone)]
pub struct CsvWriteOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
    /// Write the header row before the first record
    pub write_header: bool,
    /// Line terminator
    pub line_terminator: LineTerminator,
}

impl Default for CsvWriteOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            write_header: true,
            line_terminator: LineTerminator::LF,
        }
    }
}

impl CsvWriteOptions {
    /// Build a `csv::Writer` with these options
    pub fn writer<W: Write>(&self, writer: W) -> csv::Writer<W> {
        let terminator = match self.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
            LineTerminator::CR => csv::Terminator::Any(b'\r'),
        };

        csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote(self.quote)
            .terminator(terminator)
            .flexible(true)
            .from_writer(writer)
    }
}

/// Line terminator type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminator {
    /// Unix-style (LF)
    LF,
    /// Windows-style (CRLF)
    CRLF,
    /// Mac classic (CR)
    CR,
}
