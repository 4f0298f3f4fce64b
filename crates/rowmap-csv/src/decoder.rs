//! Record decoder
//!
//! A [`Decoder`] reads the first row of its source as the header, binds it to
//! the record type of the first decode call, and converts each following row
//! into a record.

use std::any::{type_name, TypeId};
use std::fs::File;
use std::io::Read;
use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;

use rowmap_core::{
    bind, cell_at_mut, convert, DescriptorCache, Error, FieldMap, HeaderBinding, Record,
};

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use crate::row::RowSource;

/// Lifecycle of a decoding session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// No row read yet
    Uninitialized,
    /// Header known, no data row read yet
    HeaderBound,
    /// At least one data row read
    Decoding,
    /// The source has no more rows
    Exhausted,
    /// The header row had no columns; every read fails until `set_header`
    Failed,
}

/// Decodes rows from a [`RowSource`] into records
pub struct Decoder<S> {
    source: S,
    cache: Arc<DescriptorCache>,
    state: DecoderState,
    header: Vec<String>,
    record: Vec<String>,
    binding: Option<Arc<HeaderBinding>>,
    unused: Vec<usize>,
    rows_read: usize,
    disallow_missing_columns: bool,
}

impl<R: Read> Decoder<csv::Reader<R>> {
    /// Decode CSV from a reader
    pub fn from_reader(reader: R, options: &CsvReadOptions) -> Self {
        Decoder::new(options.reader(reader))
            .disallow_missing_columns(options.disallow_missing_columns)
    }
}

impl Decoder<csv::Reader<File>> {
    /// Decode a CSV file
    pub fn from_path<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(file, options))
    }
}

impl<S: RowSource> Decoder<S> {
    /// Create a decoder using the process-wide descriptor cache
    pub fn new(source: S) -> Self {
        Self::with_cache(source, DescriptorCache::global())
    }

    /// Create a decoder using the given descriptor cache
    pub fn with_cache(source: S, cache: Arc<DescriptorCache>) -> Self {
        Self {
            source,
            cache,
            state: DecoderState::Uninitialized,
            header: Vec::new(),
            record: Vec::new(),
            binding: None,
            unused: Vec::new(),
            rows_read: 0,
            disallow_missing_columns: false,
        }
    }

    /// Create a decoder with a known header; every source row is data
    pub fn with_header(source: S, header: Vec<String>) -> CsvResult<Self> {
        let mut decoder = Self::new(source);
        decoder.set_header(header)?;
        Ok(decoder)
    }

    /// Fail binding when the header lacks a column for any field
    pub fn disallow_missing_columns(mut self, disallow: bool) -> Self {
        self.disallow_missing_columns = disallow;
        self
    }

    /// Current session state
    pub fn state(&self) -> DecoderState {
        self.state
    }

    /// The header, reading it from the source if needed.
    ///
    /// Empty when the source had no rows at all.
    pub fn header(&mut self) -> CsvResult<&[String]> {
        self.ensure_header()?;
        Ok(&self.header)
    }

    /// Replace the header. A bound record type is re-bound to the new columns.
    ///
    /// This also recovers a session whose header row was empty.
    pub fn set_header(&mut self, header: Vec<String>) -> CsvResult<()> {
        if header.is_empty() {
            return Err(Error::EmptyHeader.into());
        }

        if let Some(binding) = &self.binding {
            let map = Arc::clone(binding.field_map());
            self.binding = Some(Arc::new(self.bind_header(&header, map)?));
        }

        self.header = header;
        if matches!(
            self.state,
            DecoderState::Uninitialized | DecoderState::Failed
        ) {
            self.state = DecoderState::HeaderBound;
        }
        Ok(())
    }

    /// Raw cells of the last row read
    pub fn record(&self) -> &[String] {
        &self.record
    }

    /// Header positions of the last decoded row that no field consumed
    pub fn unused(&self) -> &[usize] {
        &self.unused
    }

    /// Columns of the bound record type that the header lacks
    pub fn missing_columns(&self) -> Vec<String> {
        self.binding
            .as_ref()
            .map(|b| b.missing_names())
            .unwrap_or_default()
    }

    /// Number of data rows read so far
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// Forget the bound record type so the next decode may use another
    pub fn rebind(&mut self) {
        self.binding = None;
    }

    /// Decode the next row into a fresh record.
    ///
    /// Returns `Ok(None)` once the source is exhausted.
    pub fn decode<T: Record>(&mut self) -> CsvResult<Option<T>> {
        let mut record = T::default();
        if self.decode_into(&mut record)? {
            Ok(Some(record))
        } else {
            Ok(None)
        }
    }

    /// Decode the next row into an existing record.
    ///
    /// Fields without a header column keep their values. Returns `false` once
    /// the source is exhausted. On a conversion error the fields before the
    /// failing column have already been written.
    pub fn decode_into<T: Record>(&mut self, target: &mut T) -> CsvResult<bool> {
        if !self.ensure_header()? || self.state == DecoderState::Exhausted {
            return Ok(false);
        }

        let binding = self.ensure_binding::<T>()?;

        let row = match self.source.next_row()? {
            Some(row) => row,
            None => {
                log::trace!("End of data after {} rows", self.rows_read);
                self.state = DecoderState::Exhausted;
                return Ok(false);
            }
        };
        self.rows_read += 1;
        self.state = DecoderState::Decoding;
        self.record = row;
        self.unused.clear();

        if self.record.len() != self.header.len() {
            return Err(Error::MalformedRow {
                row: self.rows_read,
                expected: self.header.len(),
                found: self.record.len(),
            }
            .into());
        }
        self.unused.extend_from_slice(binding.unused());

        // Header order, so a repeated column overwrites the earlier one
        for (column, entry) in binding.bound() {
            let raw = &self.record[column];
            // An empty omitempty cell is never written
            if entry.omitempty && raw.is_empty() {
                continue;
            }
            let value = convert(raw, entry.field_type, entry.omitempty, &entry.name)
                .map_err(|e| e.at(self.rows_read, column))?;

            let cell = cell_at_mut(&mut *target, &entry.path).ok_or_else(|| {
                Error::invalid_type(
                    type_name::<T>(),
                    format!("field '{}' is not reachable", entry.field),
                )
            })?;
            cell.set_value(value).map_err(|v| {
                Error::invalid_type(
                    type_name::<T>(),
                    format!("field '{}' cannot hold a {} value", entry.field, v.type_name()),
                )
            })?;
        }

        log::trace!("Decoded row {}", self.rows_read);
        Ok(true)
    }

    /// Iterate over the remaining rows as records.
    ///
    /// Row errors are yielded and iteration continues; any other error ends it.
    pub fn records<T: Record>(&mut self) -> Records<'_, S, T> {
        Records {
            decoder: self,
            done: false,
            _marker: PhantomData,
        }
    }

    /// Get the underlying source
    pub fn into_inner(self) -> S {
        self.source
    }

    fn ensure_header(&mut self) -> CsvResult<bool> {
        if self.state == DecoderState::Failed {
            return Err(Error::EmptyHeader.into());
        }
        if self.state != DecoderState::Uninitialized {
            return Ok(!self.header.is_empty());
        }

        match self.source.next_row()? {
            Some(header) => {
                if header.is_empty() {
                    self.state = DecoderState::Failed;
                    return Err(Error::EmptyHeader.into());
                }
                log::debug!("Read header with {} columns", header.len());
                self.header = header;
                self.state = DecoderState::HeaderBound;
                Ok(true)
            }
            None => {
                self.state = DecoderState::Exhausted;
                Ok(false)
            }
        }
    }

    fn ensure_binding<T: Record>(&mut self) -> CsvResult<Arc<HeaderBinding>> {
        if let Some(binding) = &self.binding {
            let map = binding.field_map();
            if map.type_id() != TypeId::of::<T>() {
                return Err(Error::TypeMismatch {
                    bound: map.type_name(),
                    requested: type_name::<T>(),
                }
                .into());
            }
            return Ok(Arc::clone(binding));
        }

        let map = self.cache.field_map::<T>()?;
        let binding = Arc::new(self.bind_header(&self.header, map)?);
        self.binding = Some(Arc::clone(&binding));
        Ok(binding)
    }

    fn bind_header(&self, header: &[String], map: Arc<FieldMap>) -> CsvResult<HeaderBinding> {
        let binding = bind(header, map)?;

        if self.disallow_missing_columns {
            let missing = binding.missing_names();
            if !missing.is_empty() {
                return Err(Error::MissingColumns { columns: missing }.into());
            }
        }

        log::debug!(
            "Bound {} of {} header columns to {}",
            binding.len() - binding.unused().len(),
            binding.len(),
            binding.field_map().type_name()
        );
        Ok(binding)
    }
}

/// Iterator over decoded records, see [`Decoder::records`]
pub struct Records<'d, S, T> {
    decoder: &'d mut Decoder<S>,
    done: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<'d, S: RowSource, T: Record> Iterator for Records<'d, S, T> {
    type Item = CsvResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.decoder.decode::<T>() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                if !e.is_row_error() {
                    self.done = true;
                }
                Some(Err(e))
            }
        }
    }
}
