pub mod agg;
pub mod record;
pub mod stats;

pub use agg::{LoadMetrics, MetricsAggregator, calculate_metrics};
pub use record::{FieldError, RawRecord, RequestRecord};
pub use stats::{EndpointStats, nearest_rank, percentage};
