use ndframe::{infer_dtype, infer_dtypes, DType, DataFrame, FrameConfig, FrameData, FrameOptions, Value};

#[test]
fn test_inference_precedence() {
    assert_eq!(
        infer_dtype(&[Value::Int(1), Value::from("x")], 500),
        DType::String
    );
    assert_eq!(
        infer_dtype(&[Value::from("true"), Value::Bool(false)], 500),
        DType::Boolean
    );
    assert_eq!(
        infer_dtype(&[Value::Int(1), Value::Float(0.25)], 500),
        DType::Float32
    );
    assert_eq!(infer_dtype(&[Value::Int(1), Value::NA], 500), DType::Float32);
    assert_eq!(infer_dtype(&[Value::from("12"), Value::Int(3)], 500), DType::Int32);
}

#[test]
fn test_all_missing_column_is_string() {
    let df = DataFrame::new(
        FrameData::from_columns(vec![("gap", vec![Value::NA, Value::NA])]),
        FrameOptions::new(),
    )
    .unwrap();
    assert_eq!(df.dtypes(), &[DType::String]);
}

#[test]
fn test_zero_rows_are_undefined() {
    let df = DataFrame::new(
        FrameData::Rows(Vec::new()),
        FrameOptions::new().columns(["a", "b"]),
    )
    .unwrap();
    assert_eq!(df.shape(), (0, 2));
    assert_eq!(df.dtypes(), &[DType::Undefined, DType::Undefined]);
}

#[test]
fn test_sample_limit_comes_from_config() {
    let mut cells: Vec<Value> = (0..20).map(Value::from).collect();
    cells.push(Value::from("tail"));
    let narrow = FrameConfig::default().with_dtype_sample_limit(20);
    let df = DataFrame::new(
        FrameData::from_columns(vec![("n", cells.clone())]),
        FrameOptions::new().config(narrow),
    )
    .unwrap();
    assert_eq!(df.dtypes(), &[DType::Int32]);

    let df = DataFrame::new(FrameData::from_columns(vec![("n", cells)]), FrameOptions::new()).unwrap();
    assert_eq!(df.dtypes(), &[DType::String]);
}

#[test]
fn test_inference_is_deterministic() {
    let columns = vec![
        vec![Value::Int(1), Value::Float(2.5)],
        vec![Value::Bool(true), Value::NA],
    ];
    assert_eq!(infer_dtypes(&columns, 10), infer_dtypes(&columns, 10));
}
