//! MLB payroll atlas - payroll and performance data core
//!
//! This library provides:
//! - Loading the payroll snapshot (CSV) and the yearly export (UTF-16LE TSV)
//! - Joining both onto the static 30-team roster
//! - Payroll tiers, state shading and spending efficiency
//! - Allocation breakdowns and division/league spending comparisons
//! - View state for the map and detail pages (filters, links, intro flag)
//!
//! # Example
//!
//! ```no_run
//! use mlbpay::core::comparison::{Scope, SortOrder};
//! use mlbpay::data::DataSource;
//! use mlbpay::view::Dashboard;
//!
//! # async fn run() {
//! let dashboard = Dashboard::load(
//!     &DataSource::parse("data/winspay.csv"),
//!     &DataSource::parse("data/Spend vs Wins_data.csv"),
//! )
//! .await;
//!
//! if let Some(map) = dashboard.map().ready() {
//!     for team in map.teams() {
//!         println!("{} tier {}", team.team().name, team.tier.value());
//!     }
//! }
//!
//! let comparison = dashboard.comparison("ATL", Scope::Division, SortOrder::SpendingDesc);
//! println!("{:?}", comparison.message());
//! # }
//! ```

pub mod config;
pub mod core;
pub mod data;
pub mod error;
pub mod models;
pub mod view;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, LoadError};
pub use models::{Division, Efficiency, League, Team, TeamCard, TeamStats, TieredTeam};
pub use view::{Dashboard, MapView, Panel};
