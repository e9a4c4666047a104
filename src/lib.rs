//! ndframe: labeled, typed, column-major data frames
//!
//! Frames are built from rows, scalars, records or named columns, get
//! their column dtypes inferred from a bounded sample, and compose through
//! group-by, merge and concat, each of which returns a new frame.

pub mod config;
pub mod core;
pub mod dataframe;
pub mod error;
pub mod index;
pub mod series;

// Re-export commonly used types
pub use config::FrameConfig;
pub use self::core::{infer_dtype, infer_dtypes, DType, Label, Value};
pub use dataframe::{
    concat, merge, AggFunc, AggSpec, Axis, DataFrame, FrameData, FrameOptions, GroupBy, JoinType,
    MergeOptions,
};
pub use error::{Error, FrameError, Result};
pub use index::Index;
pub use series::Series;

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
