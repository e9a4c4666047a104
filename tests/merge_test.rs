use ndframe::{merge, DataFrame, Error, FrameData, FrameOptions, JoinType, MergeOptions, Value};

fn frame(columns: Vec<(&str, Vec<Value>)>) -> DataFrame {
    DataFrame::new(FrameData::from_columns(columns), FrameOptions::new()).unwrap()
}

fn left() -> DataFrame {
    frame(vec![
        ("key", vec![Value::from("K0"), Value::from("K1")]),
        ("A", vec![Value::Int(1), Value::Int(2)]),
    ])
}

fn right() -> DataFrame {
    frame(vec![
        ("key", vec![Value::from("K0"), Value::from("K2")]),
        ("B", vec![Value::Int(3), Value::Int(4)]),
    ])
}

#[test]
fn test_outer_merge() {
    let merged = left().merge(&right(), &["key"], JoinType::Outer).unwrap();
    assert_eq!(merged.columns(), &["key", "A", "B"]);
    assert_eq!(
        merged.values(),
        vec![
            vec![Value::from("K0"), Value::Int(1), Value::Int(3)],
            vec![Value::from("K1"), Value::Int(2), Value::NA],
            vec![Value::from("K2"), Value::NA, Value::Int(4)],
        ]
    );
}

#[test]
fn test_inner_left_right() {
    let inner = left().merge(&right(), &["key"], JoinType::Inner).unwrap();
    assert_eq!(
        inner.values(),
        vec![vec![Value::from("K0"), Value::Int(1), Value::Int(3)]]
    );

    let left_join = left().merge(&right(), &["key"], JoinType::Left).unwrap();
    assert_eq!(left_join.row_count(), 2);
    assert_eq!(left_join.column_values("B").unwrap(), &[Value::Int(3), Value::NA]);

    let right_join = left().merge(&right(), &["key"], JoinType::Right).unwrap();
    assert_eq!(
        right_join.column_values("key").unwrap(),
        &[Value::from("K0"), Value::from("K2")]
    );
    assert_eq!(right_join.column_values("A").unwrap(), &[Value::Int(1), Value::NA]);
}

#[test]
fn test_inner_cardinality_is_product_of_key_counts() {
    let l = frame(vec![
        ("k", vec![Value::Int(1), Value::Int(1), Value::Int(2), Value::Int(3)]),
        ("x", vec![Value::Int(0), Value::Int(1), Value::Int(2), Value::Int(3)]),
    ]);
    let r = frame(vec![
        ("k", vec![Value::Int(1), Value::Int(2), Value::Int(2), Value::Int(1), Value::Int(4)]),
        ("y", vec![Value::Int(5), Value::Int(6), Value::Int(7), Value::Int(8), Value::Int(9)]),
    ]);
    // key 1: 2 x 2, key 2: 1 x 2
    let merged = merge(&l, &r, &MergeOptions::new(["k"], JoinType::Inner)).unwrap();
    assert_eq!(merged.row_count(), 6);
}

#[test]
fn test_multi_column_keys() {
    let l = frame(vec![
        ("a", vec![Value::from("x"), Value::from("x")]),
        ("b", vec![Value::Int(1), Value::Int(2)]),
        ("v", vec![Value::Float(0.5), Value::Float(1.5)]),
    ]);
    let r = frame(vec![
        ("b", vec![Value::Int(2)]),
        ("a", vec![Value::from("x")]),
        ("w", vec![Value::from("hit")]),
    ]);
    let merged = l.merge(&r, &["a", "b"], JoinType::Left).unwrap();
    assert_eq!(merged.columns(), &["a", "b", "v", "w"]);
    assert_eq!(merged.column_values("w").unwrap(), &[Value::NA, Value::from("hit")]);
}

#[test]
fn test_key_errors() {
    let err = merge(&left(), &right(), &MergeOptions::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    let err = left().merge(&right(), &["A"], JoinType::Inner).unwrap_err();
    assert!(matches!(err, Error::KeyNotFound(ref msg) if msg.contains("right")));
}

#[test]
fn test_join_type_from_str() {
    let how: JoinType = "left".parse().unwrap();
    assert_eq!(how, JoinType::Left);
    assert!("full".parse::<JoinType>().is_err());
}
