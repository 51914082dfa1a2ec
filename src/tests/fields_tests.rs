// src/tests/fields_tests.rs

//! tests for `fields.rs`

#![allow(non_snake_case)]

use ::kinded::Kinded;
use ::test_case::test_case;

use crate::data::fields::{
    FieldProjection,
    FIELDS_MAX,
    KEY_MESSAGE,
    KEY_PRIORITY,
};
use crate::errors::SessionErrorKind;

const NAMES_10: [&str; 10] = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"];
const NAMES_11: [&str; 11] = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K"];

#[test_case(&[]; "empty")]
#[test_case(&[KEY_MESSAGE]; "one")]
#[test_case(&[KEY_MESSAGE, KEY_PRIORITY]; "two")]
#[test_case(&[KEY_MESSAGE, KEY_MESSAGE]; "duplicates kept")]
#[test_case(&NAMES_10; "ten")]
fn test_FieldProjection_new_ok(names: &[&str]) {
    let projection = FieldProjection::new(names.iter()).unwrap();
    assert_eq!(projection.len(), names.len());
    assert_eq!(projection.is_empty(), names.is_empty());
    for (index, name) in names.iter().enumerate() {
        assert_eq!(projection.name(index), Some(*name));
        assert_eq!(projection.names()[index].as_str(), *name);
        assert_eq!(projection.name_cstr(index).to_str().unwrap(), *name);
    }
    assert_eq!(projection.name(names.len()), None);
}

#[test_case(&NAMES_11; "eleven")]
#[test_case(&[""]; "empty name")]
#[test_case(&["MESSAGE", ""]; "second name empty")]
#[test_case(&["MESSAGE=x"]; "has equals")]
#[test_case(&["MES\0SAGE"]; "has NUL")]
fn test_FieldProjection_new_config_err(names: &[&str]) {
    match FieldProjection::new(names.iter()) {
        Ok(p) => panic!("expected Config error, got {:?}", p),
        Err(err) => assert_eq!(err.kind(), SessionErrorKind::Config, "{}", err),
    }
}

#[test]
fn test_FieldProjection_max_is_10() {
    assert_eq!(FIELDS_MAX, 10);
}

#[test]
fn test_FieldProjection_position() {
    let projection = FieldProjection::new(["A", "B", "A"]).unwrap();
    assert_eq!(projection.position("A"), Some(0));
    assert_eq!(projection.position("B"), Some(1));
    assert_eq!(projection.position("C"), None);
}

#[test]
fn test_FieldProjection_owned_strings() {
    let names: Vec<String> = vec![String::from("MESSAGE"), String::from("_PID")];
    let projection = FieldProjection::new(&names).unwrap();
    assert_eq!(projection.names(), names.as_slice());
    assert_eq!(format!("{:?}", projection), r#"["MESSAGE", "_PID"]"#);
}
