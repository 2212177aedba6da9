use std::collections::BTreeMap;

use quill::prelude::*;
use quill::serde_json::json;
use serde::Serialize;

#[derive(Serialize)]
struct Settings {
    theme: &'static str,
    beta: bool,
}

#[test]
fn test_json_map_binds_encoded_text() {
    let map = JsonMap::new().with("a", 1).with("b", "two");
    let q = Query::new("INSERT INTO t (doc) VALUES (?)", (map,));
    let (sql, params) = q.to_pgsql().unwrap();
    assert_eq!(sql, "INSERT INTO t (doc) VALUES ($1)");
    assert_eq!(params, vec![Value::from(r#"{"a":1,"b":"two"}"#)]);
}

#[test]
fn test_json_list_binds_encoded_text() {
    let list: JsonList = [json!(1), json!("x"), json!(null)].into_iter().collect();
    let q = Query::new("tags = ?", (list,));
    let (_, params) = q.to_sql().unwrap();
    assert_eq!(params, vec![Value::from(r#"[1,"x",null]"#)]);
}

#[test]
fn test_serializable_values() {
    let settings = Settings {
        theme: "dark",
        beta: true,
    };
    let q = Query::new("settings = ? AND extra = ?", (Json(settings), json!({"k": [1, 2]})));
    let (_, params) = q.to_sql().unwrap();
    assert_eq!(
        params,
        vec![
            Value::from(r#"{"theme":"dark","beta":true}"#),
            Value::from(r#"{"k":[1,2]}"#)
        ]
    );
}

#[test]
fn test_json_renders_raw_as_quoted_text() {
    let q = Query::new("doc = ?", (JsonMap::new().with("a", 1),));
    assert_eq!(q.to_raw().unwrap(), r#"doc = '{"a":1}'"#);
}

#[test]
fn test_json_encoding_failure() {
    // Maps with non-string keys cannot be encoded as JSON objects.
    let mut bad = BTreeMap::new();
    bad.insert((1, 2), "pair");

    let q = Query::new("a = ? AND b = ?", (Arg::json(&bad), 3));
    assert_eq!(q.fragments()[0].params(), &[Value::Null, Value::I32(3)]);

    let err = q.to_sql().unwrap_err();
    assert!(matches!(err, QueryError::Json(_)));
    assert!(err.to_string().starts_with("cannot jsonify value: "));
}
