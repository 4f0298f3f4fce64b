//! # rowmap-csv
//!
//! CSV decoding and encoding sessions for rowmap records.

mod decoder;
mod encoder;
mod error;
mod marshal;
mod options;
mod row;

pub use decoder::{Decoder, DecoderState, Records};
pub use encoder::{Encoder, EncoderState};
pub use error::{CsvError, CsvResult};
pub use marshal::{marshal, marshal_with, unmarshal, unmarshal_with};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use row::{RowSink, RowSource};
