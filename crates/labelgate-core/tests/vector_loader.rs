//! JSON test vector loader shared by transform tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TransformVector {
    pub description: String,
    pub line: String,
    pub fragment: String,
    pub expect: String,
}

pub fn load(name: &str) -> Vec<TransformVector> {
    let s = fs::read_to_string(format!("tests/vectors/{name}"))
        .unwrap_or_else(|e| panic!("missing vector file {name}: {e}"));
    serde_json::from_str(&s).expect("invalid vector json")
}
