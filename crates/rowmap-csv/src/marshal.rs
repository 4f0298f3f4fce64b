//! One-shot helpers

use rowmap_core::Record;

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::CsvResult;
use crate::options::{CsvReadOptions, CsvWriteOptions};

/// Encode records to CSV bytes with default options
pub fn marshal<T: Record>(records: &[T]) -> CsvResult<Vec<u8>> {
    marshal_with(records, &CsvWriteOptions::default())
}

/// Encode records to CSV bytes.
///
/// The header is written even when `records` is empty, unless the options
/// turn it off.
pub fn marshal_with<T: Record>(records: &[T], options: &CsvWriteOptions) -> CsvResult<Vec<u8>> {
    let mut buf = Vec::new();
    {
        let mut encoder = Encoder::from_writer(&mut buf, options);
        if options.write_header {
            encoder.encode_header::<T>()?;
        }
        encoder.encode_all(records)?;
        encoder.flush()?;
    }
    Ok(buf)
}

/// Decode every row of CSV bytes with default options
pub fn unmarshal<T: Record>(data: &[u8]) -> CsvResult<Vec<T>> {
    unmarshal_with(data, &CsvReadOptions::default())
}

/// Decode every row of CSV bytes, stopping at the first error
pub fn unmarshal_with<T: Record>(data: &[u8], options: &CsvReadOptions) -> CsvResult<Vec<T>> {
    let mut decoder = Decoder::from_reader(data, options);
    let records: CsvResult<Vec<T>> = decoder.records().collect();
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CsvError;
    use pretty_assertions::assert_eq;
    use rowmap_core::{Cell, Error, FieldDescriptor, FieldMut, FieldRef, Fields, TypeDescriptor};

    #[derive(Debug, Default, PartialEq)]
    struct Reading {
        sensor: String,
        value: f64,
    }

    impl Fields for Reading {
        fn field(&self, index: usize) -> Option<FieldRef<'_>> {
            match index {
                0 => Some(FieldRef::Cell(&self.sensor)),
                1 => Some(FieldRef::Cell(&self.value)),
                _ => None,
            }
        }

        fn field_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
            match index {
                0 => Some(FieldMut::Cell(&mut self.sensor)),
                1 => Some(FieldMut::Cell(&mut self.value)),
                _ => None,
            }
        }
    }

    impl Record for Reading {
        fn descriptor() -> TypeDescriptor {
            TypeDescriptor::record::<Self>(vec![
                FieldDescriptor::cell("sensor", None, <String as Cell>::FIELD_TYPE),
                FieldDescriptor::cell("value", None, <f64 as Cell>::FIELD_TYPE),
            ])
        }
    }

    #[test]
    fn test_marshal_then_unmarshal() {
        let readings = vec![
            Reading {
                sensor: "t1".into(),
                value: 21.5,
            },
            Reading {
                sensor: "t2, north".into(),
                value: -3.0,
            },
        ];

        let bytes = marshal(&readings).unwrap();
        assert_eq!(
            String::from_utf8(bytes.clone()).unwrap(),
            "sensor,value\nt1,21.5\n\"t2, north\",-3\n"
        );
        assert_eq!(unmarshal::<Reading>(&bytes).unwrap(), readings);
    }

    #[test]
    fn test_marshal_empty_slice_writes_header() {
        let bytes = marshal::<Reading>(&[]).unwrap();
        assert_eq!(bytes, b"sensor,value\n");
        assert!(unmarshal::<Reading>(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_marshal_without_header() {
        let options = CsvWriteOptions {
            write_header: false,
            delimiter: b';',
            ..Default::default()
        };
        let bytes = marshal_with(
            &[Reading {
                sensor: "x".into(),
                value: 1.5,
            }],
            &options,
        )
        .unwrap();
        assert_eq!(bytes, b"x;1.5\n");
    }

    #[test]
    fn test_unmarshal_stops_at_bad_row() {
        let err = unmarshal::<Reading>(b"sensor,value\nt1,1\nt2,warm\nt3,3\n").unwrap_err();
        match err {
            CsvError::Core(Error::Conversion { row, .. }) => assert_eq!(row, Some(2)),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
