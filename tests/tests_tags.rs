#![allow(clippy::unwrap_used)]

use flatfields::{Extractor, Record, Value};
use rstest::rstest;

#[rstest]
#[case(r#"flat:"primary",json:"secondary""#, "primary")]
#[case(r#"json:"secondary",flat:"primary""#, "primary")]
#[case(r#"json:"secondary""#, "secondary")]
#[case(r#"flat:"json",json:"secondary""#, "secondary")]
#[case("", "Declared")]
#[case(r#"db:"users""#, "Declared")]
fn test_name_precedence(#[case] tag: &str, #[case] expected: &str) {
    let rec = Record::new().tagged("Declared", tag, "v");
    let fields = Extractor::new().extract_fields(&Value::Record(rec)).unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[expected], Value::from("v"));
}

#[rstest]
#[case(r#"flat:primary"#)] // unquoted value
#[case(r#"flat:"unterminated"#)] // missing closing quote
#[case(r#"json:x"#)]
#[case(r#"flat:"json""#)] // deferral with no json key to defer to
#[case(r#"other:"flat:x""#)] // prefix seen inside another attribute
fn test_malformed_tags_abort_the_whole_call(#[case] tag: &str) {
    // well-formed sibling fields do not survive: no partial result
    let rec = Record::new()
        .field("Ok", 1i64)
        .tagged("Bad", tag, 2i64)
        .field("AlsoOk", 3i64);
    let result = Extractor::new().extract_fields(&Value::Record(rec));
    assert!(result.is_err());
}

#[test]
fn test_exclusion_marker_short_circuits_parsing() {
    // the marker is a substring check, so a tag that would otherwise fail
    // to parse still excludes cleanly
    let rec = Record::new().tagged("Bad", r#"flat:"-",json:oops"#, 1i64);
    let fields = Extractor::new().extract_fields(&Value::Record(rec)).unwrap();
    assert!(fields.is_empty());
}

#[test]
fn test_tag_error_in_nested_record_aborts_extraction() {
    let inner = Record::new().tagged("Bad", r#"flat:broken"#, 1i64);
    let outer = Record::new().field("Inner", inner).field("Ok", 2i64);
    let result = Extractor::new().extract_fields(&Value::Record(outer));
    assert!(result.is_err());
}
