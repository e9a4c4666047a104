//! Property tests for frame invariants.

use std::collections::HashSet;

use proptest::prelude::*;

use ndframe::{concat, Axis, DataFrame, Error, FrameData, FrameOptions, JoinType, Value};

/// Small integer keys so groups and joins actually overlap.
fn arb_key() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => (0i64..5).prop_map(Value::Int),
        1 => Just(Value::NA),
    ]
}

fn arb_cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        3 => (-1000i64..1000).prop_map(Value::Int),
        3 => (-1e3_f64..1e3_f64).prop_map(Value::Float),
        1 => "[a-z]{1,4}".prop_map(Value::Str),
        1 => any::<bool>().prop_map(Value::Bool),
        1 => Just(Value::NA),
    ]
}

/// Frame with a key column `k` and a numeric column `v`.
fn arb_keyed_frame(max_rows: usize) -> impl Strategy<Value = DataFrame> {
    proptest::collection::vec((arb_key(), -100i64..100), 0..max_rows).prop_map(|rows| {
        let (keys, values): (Vec<Value>, Vec<Value>) = rows
            .into_iter()
            .map(|(k, v)| (k, Value::Int(v)))
            .unzip();
        DataFrame::new(
            FrameData::from_columns(vec![("k", keys), ("v", values)]),
            FrameOptions::new(),
        )
        .expect("keyed frame must build")
    })
}

proptest! {
    #[test]
    fn prop_shape_invariant(rows in proptest::collection::vec(proptest::collection::vec(arb_cell(), 3), 0..20)) {
        let n = rows.len();
        let df = DataFrame::new(FrameData::Rows(rows), FrameOptions::new().columns(["a", "b", "c"])).unwrap();
        prop_assert_eq!(df.index().len(), n);
        prop_assert_eq!(df.values().len(), n);
        for row in df.values() {
            prop_assert_eq!(row.len(), df.columns().len());
        }
        prop_assert_eq!(df.dtypes().len(), 3);
    }

    #[test]
    fn prop_duplicate_index_rejected(labels in proptest::collection::vec(0i64..4, 5)) {
        // five labels drawn from four values always repeat one
        let cells: Vec<Value> = (0..5).map(Value::from).collect();
        let result = DataFrame::new(FrameData::Scalars(cells), FrameOptions::new().index(labels));
        prop_assert!(matches!(result, Err(Error::DuplicateIndex(_))));
    }

    #[test]
    fn prop_groupby_rows_match_distinct_keys(df in arb_keyed_frame(30)) {
        let distinct: HashSet<String> = df
            .column_values("k")
            .unwrap()
            .iter()
            .map(|v| v.to_string())
            .collect();
        let summed = df.groupby(&["k"]).unwrap().sum().unwrap();
        prop_assert_eq!(summed.row_count(), distinct.len());
    }

    #[test]
    fn prop_inner_merge_cardinality(left in arb_keyed_frame(15), right in arb_keyed_frame(15)) {
        let keys = |df: &DataFrame| -> Vec<String> {
            df.column_values("k").unwrap().iter().map(|v| v.to_string()).collect()
        };
        let (lk, rk) = (keys(&left), keys(&right));
        let expected: usize = lk
            .iter()
            .collect::<HashSet<_>>()
            .into_iter()
            .map(|k| lk.iter().filter(|x| *x == k).count() * rk.iter().filter(|x| *x == k).count())
            .sum();
        let merged = left.merge(&right, &["k"], JoinType::Inner).unwrap();
        prop_assert_eq!(merged.row_count(), expected);
    }

    #[test]
    fn prop_concat_rows_doubles(df in arb_keyed_frame(20)) {
        let out = concat(&[&df, &df], Axis::Rows).unwrap();
        prop_assert_eq!(out.row_count(), df.row_count() * 2);
        prop_assert_eq!(out.columns(), df.columns());
    }

    #[test]
    fn prop_inference_ignores_cells_past_the_limit(
        cells in proptest::collection::vec(arb_cell(), 1..40),
        tail in proptest::collection::vec(arb_cell(), 0..20),
    ) {
        let limit = cells.len();
        let mut extended = cells.clone();
        extended.extend(tail);
        prop_assert_eq!(
            ndframe::infer_dtype(&cells, limit),
            ndframe::infer_dtype(&extended, limit)
        );
    }
}
