// DataFrame implementations module
mod aggregations;
pub mod base;
pub mod concat;
mod display;
pub mod groupby;
pub mod input;
pub mod key;
pub mod merge;
mod naming;

// Re-exports for convenience
pub use base::DataFrame;
pub use concat::{concat, Axis};
pub use groupby::{AggFunc, AggSpec, AggregatedGroup, Aggregation, GroupBy};
pub use input::{FrameData, FrameOptions};
pub use key::CompositeKey;
pub use merge::{merge, JoinType, MergeOptions};
