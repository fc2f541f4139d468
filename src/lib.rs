//! Field-sales analytics aggregation and presentation bucketing.
//!
//! Backend analytics endpoints already aggregate CRM data server-side; this
//! crate derives the presentation-ready values the dashboards need
//! (percentages, color-bucket assignments, totals, chart-scale maxima) as
//! pure, stateless transforms over the raw JSON payloads. Malformed input
//! degrades to empty view-models instead of failing; the display layer has
//! no error boundary of its own for derived values.

// Export modules for library usage
pub mod aggregate;
pub mod assemble;
pub mod buckets;
pub mod cli;
pub mod config;
pub mod errors;
pub mod formatting;
pub mod locale;
pub mod model;
pub mod output;

// Re-export commonly used types
pub use crate::aggregate::{group_sum_by, max_by, percent_of, ratio, sum_by};
pub use crate::assemble::{assemble, AggregateTotals, AssembledRow, MetricKind, ReportSpec, ViewModel};
pub use crate::buckets::{bucket, BucketScale, BucketThreshold};
pub use crate::locale::Locale;
pub use crate::model::{normalize_rows, section, ReportRow};
pub use crate::output::{create_writer, OutputWriter, ReportView};
