//! End-to-end tests for decoding CSV into derived records

use pretty_assertions::assert_eq;
use rowmap::prelude::*;
use rowmap::{DecoderState, Error, Kind};

#[derive(Debug, Default, PartialEq, Record)]
struct Person {
    #[csv(tag = "id,omitempty")]
    id: Option<i32>,
    #[csv(tag = "name")]
    name: String,
    #[csv(tag = "city")]
    city: String,
    #[csv(tag = "age")]
    age: i32,
}

fn person(name: &str, city: &str, age: i32) -> Person {
    Person {
        id: None,
        name: name.into(),
        city: city.into(),
        age,
    }
}

/// Header columns bind by name, not by position
#[test]
fn test_decode_by_column_name() {
    let data = "id,name,age,city\n,alice,25,la\n,bob,30,ny\n";
    let mut decoder = Decoder::from_reader(data.as_bytes(), &CsvReadOptions::default());
    assert_eq!(decoder.state(), DecoderState::Uninitialized);

    let first: Person = decoder.decode().unwrap().unwrap();
    assert_eq!(first, person("alice", "la", 25));
    assert_eq!(decoder.state(), DecoderState::Decoding);
    assert_eq!(decoder.record(), &["", "alice", "25", "la"]);

    let second: Person = decoder.decode().unwrap().unwrap();
    assert_eq!(second, person("bob", "ny", 30));

    assert_eq!(decoder.decode::<Person>().unwrap(), None);
    assert_eq!(decoder.state(), DecoderState::Exhausted);
    assert_eq!(decoder.decode::<Person>().unwrap(), None);
    assert_eq!(decoder.rows_read(), 2);
}

#[derive(Debug, Default, PartialEq, Record)]
struct Address {
    #[csv(tag = "id")]
    id: i32,
    #[csv(tag = "city")]
    city: String,
    #[csv(tag = "state")]
    state: String,
}

#[derive(Debug, Default, PartialEq, Record)]
struct Resident {
    #[csv(flatten)]
    address: Address,
    #[csv(tag = "id")]
    id: i32,
    #[csv(tag = "name")]
    name: String,
    #[csv(tag = "age")]
    age: i32,
}

/// A flattened record fills its columns, except those the parent claims
#[test]
fn test_decode_flattened_record() {
    let data = "id,name,age,city,state\n1,alice,25,la,ca\n";
    let residents: Vec<Resident> = unmarshal(data.as_bytes()).unwrap();

    assert_eq!(
        residents,
        vec![Resident {
            address: Address {
                id: 0,
                city: "la".into(),
                state: "ca".into(),
            },
            id: 1,
            name: "alice".into(),
            age: 25,
        }]
    );
}

#[test]
fn test_unused_columns() {
    let data = "name,zip,age,notes\nalice,90001,25,x\n";
    let mut decoder = Decoder::from_reader(data.as_bytes(), &CsvReadOptions::default());

    assert_eq!(decoder.header().unwrap(), &["name", "zip", "age", "notes"]);
    let p: Person = decoder.decode().unwrap().unwrap();
    assert_eq!(p, person("alice", "", 25));
    assert_eq!(decoder.unused(), &[1, 3]);
    assert_eq!(decoder.missing_columns(), vec!["id", "city"]);
}

#[test]
fn test_optional_field_present_and_absent() {
    let data = "id,name\n7,alice\n,bob\n0,carol\n";
    let people: Vec<Person> = unmarshal(data.as_bytes()).unwrap();

    assert_eq!(people[0].id, Some(7));
    assert_eq!(people[1].id, None);
    assert_eq!(people[2].id, Some(0));
}

#[test]
fn test_empty_cell_is_zero_for_required_field() {
    let data = "name,age\nalice,\n";
    let people: Vec<Person> = unmarshal(data.as_bytes()).unwrap();
    assert_eq!(people, vec![person("alice", "", 0)]);
}

#[test]
fn test_row_errors_do_not_end_the_session() {
    let data = "name,age\nalice,25\nbob\ncarol,old\ndave,40\n";
    let mut decoder = Decoder::from_reader(data.as_bytes(), &CsvReadOptions::default());
    let results: Vec<CsvResult<Person>> = decoder.records().collect();
    assert_eq!(results.len(), 4);

    assert_eq!(results[0].as_ref().unwrap(), &person("alice", "", 25));
    match &results[1] {
        Err(CsvError::Core(Error::MalformedRow {
            row,
            expected,
            found,
        })) => {
            assert_eq!((*row, *expected, *found), (2, 2, 1));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    match &results[2] {
        Err(CsvError::Core(Error::Conversion {
            field,
            value,
            kind,
            row,
            column,
        })) => {
            assert_eq!(field, "age");
            assert_eq!(value, "old");
            assert_eq!(*kind, Kind::I32);
            assert_eq!((*row, *column), (Some(3), Some(1)));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(results[3].as_ref().unwrap(), &person("dave", "", 40));
}

#[test]
fn test_out_of_range_integer() {
    #[derive(Debug, Default, PartialEq, Record)]
    struct Small {
        level: u8,
        flag: bool,
    }

    let err = unmarshal::<Small>(b"level,flag\n256,true\n").unwrap_err();
    assert!(err.is_row_error());

    let err = unmarshal::<Small>(b"level,flag\n1,yes\n").unwrap_err();
    assert!(err.is_row_error());

    let ok = unmarshal::<Small>(b"level,flag\n255,false\n").unwrap();
    assert_eq!(ok, vec![Small { level: 255, flag: false }]);
}

#[test]
fn test_switching_types_needs_rebind() {
    #[derive(Debug, Default, PartialEq, Record)]
    struct NameOnly {
        #[csv(tag = "name")]
        name: String,
    }

    let data = "name,age\nalice,25\nbob,30\n";
    let mut decoder = Decoder::from_reader(data.as_bytes(), &CsvReadOptions::default());
    let _: Person = decoder.decode().unwrap().unwrap();

    match decoder.decode::<NameOnly>() {
        Err(CsvError::Core(Error::TypeMismatch { .. })) => {}
        other => panic!("unexpected result: {other:?}"),
    }

    decoder.rebind();
    let bob: NameOnly = decoder.decode().unwrap().unwrap();
    assert_eq!(bob.name, "bob");
    assert_eq!(decoder.unused(), &[1]);
}

#[test]
fn test_strict_missing_columns() {
    let options = CsvReadOptions {
        disallow_missing_columns: true,
        ..Default::default()
    };
    let err = rowmap::unmarshal_with::<Person>(b"name,age\nalice,25\n", &options).unwrap_err();
    match err {
        CsvError::Core(Error::MissingColumns { columns }) => {
            assert_eq!(columns, vec!["id", "city"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let ok = rowmap::unmarshal_with::<Person>(b"id,name,city,age\n,a,b,1\n", &options).unwrap();
    assert_eq!(ok, vec![person("a", "b", 1)]);
}

#[test]
fn test_empty_input() {
    let people: Vec<Person> = unmarshal(b"").unwrap();
    assert!(people.is_empty());

    let people: Vec<Person> = unmarshal(b"name,age\n").unwrap();
    assert!(people.is_empty());
}

#[test]
fn test_options() {
    let options = CsvReadOptions {
        delimiter: b';',
        trim: true,
        ..Default::default()
    };
    let data = " name ; age \n alice ; 25 \n";
    let people: Vec<Person> = rowmap::unmarshal_with(data.as_bytes(), &options).unwrap();
    assert_eq!(people, vec![person("alice", "", 25)]);
}

#[test]
fn test_supplied_header() {
    let mut decoder = Decoder::from_reader(&b"alice,25\nbob,30\n"[..], &CsvReadOptions::default());
    decoder
        .set_header(vec!["name".to_string(), "age".to_string()])
        .unwrap();

    let people: Vec<Person> = decoder.records().collect::<CsvResult<_>>().unwrap();
    assert_eq!(people, vec![person("alice", "", 25), person("bob", "", 30)]);
}

/// Only `omitempty` turns an empty cell into an absent optional value
#[test]
fn test_optional_without_omitempty_is_zero() {
    #[derive(Debug, Default, PartialEq, Record)]
    struct Score {
        name: String,
        points: Option<i32>,
        #[csv(tag = "bonus,omitempty")]
        bonus: Option<i32>,
    }

    let scores: Vec<Score> = unmarshal(b"name,points,bonus\nann,,\n").unwrap();
    assert_eq!(
        scores,
        vec![Score {
            name: "ann".into(),
            points: Some(0),
            bonus: None,
        }]
    );
}

#[test]
fn test_repeated_header_column() {
    #[derive(Debug, Default, PartialEq, Record)]
    struct Stop {
        name: String,
        city: String,
        #[csv(tag = "age,omitempty")]
        age: u8,
    }

    let stops: Vec<Stop> = unmarshal(b"city,name,city\nla,ann,ny\n").unwrap();
    assert_eq!(stops[0].city, "ny");
    assert_eq!(stops[0].name, "ann");

    // The empty second `age` is never written, so the first one stands
    let stops: Vec<Stop> = unmarshal(b"name,age,age\nann,5,\n").unwrap();
    assert_eq!(stops[0].age, 5);
}
