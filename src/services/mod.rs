pub mod aggregator;
pub mod allowance;
pub mod partition;
pub mod window;

pub use aggregator::StatsAggregator;
pub use allowance::{compute_allowance, compute_reset_info, AllowanceBreakdown, ResetInfo};
pub use partition::{partition, Attribution, PartitionCounts};
pub use window::{is_in_window, is_qualifying};
