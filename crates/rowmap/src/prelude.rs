//! Prelude module - common imports for rowmap users
//!
//! ```rust
//! use rowmap::prelude::*;
//! ```

pub use crate::{
    marshal, unmarshal, CsvError, CsvReadOptions, CsvResult, CsvWriteOptions, Decoder, Encoder,
    Record,
};
