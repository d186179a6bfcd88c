//! Core business logic modules

pub mod allocation;
pub mod comparison;
pub mod join;
pub mod tiers;
pub mod timeline;

// Re-export commonly used types
pub use allocation::{allocation_breakdown, AllocationBreakdown, CategorySlice};
pub use comparison::{ComparisonRow, ComparisonView, Rating, Scope, SortOrder, SpendingTable};
pub use join::{build_tiered_roster, join_payroll, PayrollIndex, PerformanceIndex};
pub use tiers::{assign_tiers, legend, state_shade, state_shades, StateShade, Tier};
pub use timeline::{team_timeline, TeamTimeline, TimelinePoint, TimelineSummary};
