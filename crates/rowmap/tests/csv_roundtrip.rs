//! Encode/decode roundtrip tests, in memory and through files

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rowmap::prelude::*;

#[derive(Debug, Default, Clone, PartialEq, Record)]
struct Origin {
    #[csv(tag = "country")]
    country: String,
    #[csv(tag = "port,omitempty")]
    port: Option<u16>,
}

#[derive(Debug, Default, Clone, PartialEq, Record)]
struct Shipment {
    #[csv(tag = "id")]
    id: i64,
    #[csv(tag = "label")]
    label: String,
    #[csv(tag = "weight")]
    weight: f64,
    #[csv(tag = "fragile")]
    fragile: bool,
    #[csv(tag = "priority,omitempty")]
    priority: Option<i8>,
    #[csv(flatten)]
    origin: Origin,
}

fn shipment() -> impl Strategy<Value = Shipment> {
    (
        any::<i64>(),
        any::<String>(),
        -1.0e12f64..1.0e12f64,
        any::<bool>(),
        proptest::option::of(any::<i8>()),
        "[a-zA-Z ,\"]{0,12}",
        proptest::option::of(any::<u16>()),
    )
        .prop_map(
            |(id, label, weight, fragile, priority, country, port)| Shipment {
                id,
                label,
                weight,
                fragile,
                priority,
                origin: Origin { country, port },
            },
        )
}

proptest! {
    #[test]
    fn prop_roundtrip(shipments in proptest::collection::vec(shipment(), 0..8)) {
        let bytes = marshal(&shipments).unwrap();
        let decoded: Vec<Shipment> = unmarshal(&bytes).unwrap();
        prop_assert_eq!(decoded, shipments);
    }
}

#[test]
fn test_roundtrip_through_file() {
    let shipments = vec![
        Shipment {
            id: 1,
            label: "books, used".into(),
            weight: 12.5,
            fragile: false,
            priority: Some(0),
            origin: Origin {
                country: "NO".into(),
                port: Some(8080),
            },
        },
        Shipment {
            id: 2,
            label: "glass\nvase".into(),
            weight: 0.75,
            fragile: true,
            priority: None,
            origin: Origin::default(),
        },
    ];

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shipments.csv");

    let mut encoder = Encoder::to_path(&path, &CsvWriteOptions::default()).unwrap();
    encoder.encode_all(&shipments).unwrap();
    encoder.into_inner().unwrap();

    let mut decoder = Decoder::from_path(&path, &CsvReadOptions::default()).unwrap();
    assert_eq!(
        decoder.header().unwrap(),
        &["id", "label", "weight", "fragile", "priority", "country", "port"]
    );
    let decoded: Vec<Shipment> = decoder.records().collect::<CsvResult<_>>().unwrap();
    assert_eq!(decoded, shipments);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = match Decoder::from_path(dir.path().join("absent.csv"), &CsvReadOptions::default()) {
        Ok(_) => panic!("expected an error"),
        Err(e) => e,
    };
    assert!(matches!(err, CsvError::Io(_)));
}
