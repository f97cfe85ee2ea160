//! Label file loader tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io::Write;

use labelgate_core::labels::{load_from_file, load_from_str};
use labelgate_core::LabelSet;
use tempfile::NamedTempFile;

#[test]
fn strings_and_numbers_are_accepted() {
    let set = load_from_str(r#"{"env": "prod", "rack": 7, "weight": 1.5}"#).unwrap();
    assert_eq!(set.len(), 3);
    assert_eq!(set.get("env"), Some("prod"));
    assert_eq!(set.get("rack"), Some("7"));
    assert_eq!(set.get("weight"), Some("1.5"));
}

#[test]
fn numbers_keep_their_json_form() {
    let set = load_from_str(r#"{"a": 1.0, "b": 100000000, "c": 1e21, "d": 2.5, "e": -3}"#).unwrap();
    let pairs: Vec<(&str, &str)> = set.iter().collect();
    assert_eq!(
        pairs,
        [("a", "1.0"), ("b", "100000000"), ("c", "1e+21"), ("d", "2.5"), ("e", "-3")]
    );
}

#[test]
fn fragment_has_each_pair_once_and_no_trailing_comma() {
    let set = load_from_str(r#"{"b": "2", "a": 1, "c": "x"}"#).unwrap();
    let frag = set.fragment();

    assert_eq!(frag, r#"a="1",b="2",c="x""#);
    assert!(!frag.ends_with(','));
    for pair in [r#"a="1""#, r#"b="2""#, r#"c="x""#] {
        assert_eq!(frag.matches(pair).count(), 1, "pair={pair}");
    }
}

#[test]
fn empty_object_renders_empty_fragment() {
    let set = load_from_str("{}").unwrap();
    assert!(set.is_empty());
    assert_eq!(set.fragment(), "");
}

#[test]
fn fragment_escapes_values() {
    let set = LabelSet::from_pairs([("path", "C:\\tmp \"x\"\nend")]).unwrap();
    assert_eq!(set.fragment(), r#"path="C:\\tmp \"x\"\nend""#);
}

#[test]
fn unsupported_value_shapes_fail_whole_load() {
    for (body, kind) in [
        (r#"{"ok": "1", "bad": ["x"]}"#, "array"),
        (r#"{"ok": "1", "bad": {"x": 1}}"#, "object"),
        (r#"{"ok": "1", "bad": true}"#, "boolean"),
        (r#"{"ok": "1", "bad": null}"#, "null"),
    ] {
        let err = load_from_str(body).expect_err("must fail");
        assert_eq!(err.code(), "UNSUPPORTED_VALUE", "body={body}");
        assert!(err.to_string().contains("bad"));
        assert!(err.to_string().contains(kind));
    }
}

#[test]
fn malformed_json_fails() {
    let err = load_from_str(r#"{"env": "prod""#).expect_err("must fail");
    assert_eq!(err.code(), "INVALID_JSON");
}

#[test]
fn non_object_root_fails() {
    let err = load_from_str(r#"["env", "prod"]"#).expect_err("must fail");
    assert_eq!(err.code(), "NOT_AN_OBJECT");
}

#[test]
fn empty_label_name_fails() {
    let err = load_from_str(r#"{"": "x"}"#).expect_err("must fail");
    assert_eq!(err.code(), "EMPTY_LABEL_NAME");
    assert!(LabelSet::from_pairs([("", "x")]).is_err());
}

#[test]
fn load_from_file_reads_json() {
    let mut f = NamedTempFile::new().unwrap();
    write!(f, r#"{{"env": "staging", "shard": 12}}"#).unwrap();

    let set = load_from_file(f.path()).unwrap();
    assert_eq!(set.fragment(), r#"env="staging",shard="12""#);
}

#[test]
fn missing_file_fails_with_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_from_file(dir.path().join("nope.json")).expect_err("must fail");
    assert_eq!(err.code(), "READ_FAILED");
    assert!(err.to_string().contains("nope.json"));
}
