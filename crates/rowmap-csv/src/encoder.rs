//! Record encoder

use std::any::{type_name, TypeId};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use rowmap_core::{cell_at, format, DescriptorCache, Error, FieldMap, Record};

use crate::error::CsvResult;
use crate::options::CsvWriteOptions;
use crate::row::RowSink;

/// Lifecycle of an encoding session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderState {
    /// No record type bound yet
    Uninitialized,
    /// Header written, no data row yet
    HeaderWritten,
    /// At least one data row written
    Writing,
}

/// Encodes records as rows into a [`RowSink`]
pub struct Encoder<W> {
    sink: W,
    cache: Arc<DescriptorCache>,
    state: EncoderState,
    map: Option<Arc<FieldMap>>,
    write_header: bool,
    row: Vec<String>,
    rows_written: usize,
}

impl<W: Write> Encoder<csv::Writer<W>> {
    /// Encode CSV into a writer
    pub fn from_writer(writer: W, options: &CsvWriteOptions) -> Self {
        Encoder::new(options.writer(writer)).write_header(options.write_header)
    }
}

impl Encoder<csv::Writer<File>> {
    /// Encode into a new CSV file
    pub fn to_path<P: AsRef<Path>>(path: P, options: &CsvWriteOptions) -> CsvResult<Self> {
        let file = File::create(path)?;
        Ok(Self::from_writer(file, options))
    }
}

impl<W: RowSink> Encoder<W> {
    /// Create an encoder using the process-wide descriptor cache
    pub fn new(sink: W) -> Self {
        Self::with_cache(sink, DescriptorCache::global())
    }

    /// Create an encoder using the given descriptor cache
    pub fn with_cache(sink: W, cache: Arc<DescriptorCache>) -> Self {
        Self {
            sink,
            cache,
            state: EncoderState::Uninitialized,
            map: None,
            write_header: true,
            row: Vec::new(),
            rows_written: 0,
        }
    }

    /// Whether the first `encode` writes the header row (default: true)
    pub fn write_header(mut self, write_header: bool) -> Self {
        self.write_header = write_header;
        self
    }

    /// Current session state
    pub fn state(&self) -> EncoderState {
        self.state
    }

    /// Number of data rows written so far
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Encode one record as a row, writing the header first if needed
    pub fn encode<T: Record>(&mut self, record: &T) -> CsvResult<()> {
        let map = self.ensure_map::<T>()?;
        if self.write_header && self.state == EncoderState::Uninitialized {
            self.emit_header(&map)?;
        }

        // A record without columns has no rows either
        if map.is_empty() {
            return Ok(());
        }

        self.row.clear();
        for entry in map.entries() {
            let cell = cell_at(record, &entry.path).ok_or_else(|| {
                Error::invalid_type(
                    type_name::<T>(),
                    format!("field '{}' is not reachable", entry.field),
                )
            })?;
            self.row
                .push(format(&cell.to_value(), entry.field_type, entry.omitempty));
        }

        self.sink.write_row(&self.row)?;
        self.rows_written += 1;
        self.state = EncoderState::Writing;
        log::trace!("Encoded row {}", self.rows_written);
        Ok(())
    }

    /// Encode every record in order
    pub fn encode_all<'r, T, I>(&mut self, records: I) -> CsvResult<()>
    where
        T: Record,
        I: IntoIterator<Item = &'r T>,
    {
        for record in records {
            self.encode(record)?;
        }
        Ok(())
    }

    /// Write the header row for `T` without a record.
    ///
    /// Binds `T` like `encode` does. Nothing is written once the session has
    /// written a header or a data row.
    pub fn encode_header<T: Record>(&mut self) -> CsvResult<()> {
        let map = self.ensure_map::<T>()?;
        if self.state == EncoderState::Uninitialized {
            self.emit_header(&map)?;
        }
        Ok(())
    }

    /// Forget the bound record type; the next encode starts a new header
    pub fn reset(&mut self) {
        self.map = None;
        self.state = EncoderState::Uninitialized;
    }

    /// Flush the sink
    pub fn flush(&mut self) -> CsvResult<()> {
        self.sink.flush()
    }

    /// Get a reference to the sink
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Flush and return the sink
    pub fn into_inner(mut self) -> CsvResult<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }

    fn ensure_map<T: Record>(&mut self) -> CsvResult<Arc<FieldMap>> {
        if let Some(map) = &self.map {
            if map.type_id() != TypeId::of::<T>() {
                return Err(Error::TypeMismatch {
                    bound: map.type_name(),
                    requested: type_name::<T>(),
                }
                .into());
            }
            return Ok(Arc::clone(map));
        }

        let map = self.cache.field_map::<T>()?;
        log::debug!("Encoding {} with {} columns", map.type_name(), map.len());
        self.map = Some(Arc::clone(&map));
        Ok(map)
    }

    fn emit_header(&mut self, map: &FieldMap) -> CsvResult<()> {
        if !map.is_empty() {
            let header: Vec<String> = map.names().map(str::to_string).collect();
            self.sink.write_row(&header)?;
        }
        self.state = EncoderState::HeaderWritten;
        Ok(())
    }
}
