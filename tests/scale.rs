use quill::prelude::*;

const DEPTH: i32 = 500;

#[test]
fn test_deep_nesting() {
    let mut q = Query::new("x = ?", (0,));
    for level in 1..DEPTH {
        q = Query::new("(?) AND y = ?", (q, level));
    }

    let (sql, params) = q.to_pgsql().unwrap();
    assert_eq!(params.len(), DEPTH as usize);
    for (i, param) in params.iter().enumerate() {
        assert_eq!(param, &Value::I32(i as i32));
    }
    assert!(sql.starts_with(&format!("{}x = $1) AND y = $2)", "(".repeat(499))));
    assert!(sql.ends_with(&format!("AND y = ${DEPTH}")));
    assert_eq!(sql.matches('$').count(), DEPTH as usize);
}

#[test]
fn test_wide_query() {
    let ids: Vec<i64> = (0..10_000).collect();
    let mut q = Query::optional("WHERE");
    for chunk in ids.chunks(100) {
        q = q.or("id IN (?)", (chunk,));
    }

    let (sql, params) = q.to_pgsql().unwrap();
    assert_eq!(params.len(), ids.len());
    assert!(sql.starts_with("WHERE id IN ($1,$2,"));
    assert!(sql.ends_with("$9999,$10000)"));
    assert_eq!(q.len(), 100);
}
