// Core cell, label and dtype types for ndframe
pub mod data_value;
pub mod dtype;

// Re-exports for convenience
pub use data_value::{Label, Value};
pub use dtype::{infer_dtype, infer_dtypes, DType};
