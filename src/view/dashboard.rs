//! Both source tables loaded once, and the views built from them
//!
//! The two tables are fetched concurrently. Each failure is confined to the
//! regions that need that table: a broken payroll file blanks the map and
//! the allocation pie but leaves the timeline and comparison working, and
//! the other way round.

use serde::Serialize;
use tracing::{info, warn};

use crate::core::allocation::{allocation_breakdown, AllocationBreakdown};
use crate::core::comparison::{ComparisonView, Scope, SortOrder, SpendingTable};
use crate::core::join::PerformanceIndex;
use crate::core::timeline::{team_timeline, TeamTimeline};
use crate::data::csv_loader::{load_payroll, load_performance, PayrollRow, PerformanceRow};
use crate::data::source::DataSource;
use crate::error::LoadError;
use crate::view::map::MapView;
use crate::view::navigation::{TeamDetailHeader, TeamQuery};

pub const MAP_LOAD_ERROR: &str = "Error loading data";
pub const NO_TEAM_DATA: &str = "No data available for this team.";
pub const TIMELINE_LOAD_ERROR: &str = "Error loading data: check path, encoding, and delimiter.";
pub const ALLOCATION_LOAD_ERROR: &str = "Error loading payroll allocation data.";
pub const COMPARISON_LOAD_ERROR: &str = "Error loading data for comparison chart.";

/// A view region: its data, or the message shown in its place
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Panel<T> {
    Ready(T),
    Unavailable(String),
}

impl<T> Panel<T> {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Panel::Unavailable(message.into())
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(value) => Some(value),
            Panel::Unavailable(_) => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Panel::Ready(_) => None,
            Panel::Unavailable(message) => Some(message),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Panel::Ready(_))
    }

    pub fn as_ref(&self) -> Panel<&T> {
        match self {
            Panel::Ready(value) => Panel::Ready(value),
            Panel::Unavailable(message) => Panel::Unavailable(message.clone()),
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Panel<U>) -> Panel<U> {
        match self {
            Panel::Ready(value) => f(value),
            Panel::Unavailable(message) => Panel::Unavailable(message),
        }
    }

    /// Replace a load failure with the region's message, logging the cause
    fn from_load<U>(
        result: &Result<U, LoadError>,
        build: impl FnOnce(&U) -> T,
        message: &str,
    ) -> Self {
        match result {
            Ok(value) => Panel::Ready(build(value)),
            Err(e) => {
                warn!("{}: {}", message, e);
                Panel::unavailable(message)
            }
        }
    }
}

/// Everything the detail page shows for one team
#[derive(Debug, Clone, Serialize)]
pub struct TeamDetail {
    pub header: TeamDetailHeader,
    pub timeline: Panel<TeamTimeline>,
    pub allocation: Panel<AllocationBreakdown>,
    pub comparison: Panel<ComparisonView>,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    map: Panel<MapView>,
    payroll: Panel<Vec<PayrollRow>>,
    performance: Panel<PerformanceIndex>,
    spending: Panel<SpendingTable>,
}

impl Dashboard {
    /// Fetch both tables concurrently and build every view
    pub async fn load(payroll: &DataSource, performance: &DataSource) -> Self {
        let (payroll_rows, performance_rows) =
            tokio::join!(load_payroll(payroll), load_performance(performance));
        Self::from_results(payroll_rows, performance_rows)
    }

    pub fn from_results(
        payroll: Result<Vec<PayrollRow>, LoadError>,
        performance: Result<Vec<PerformanceRow>, LoadError>,
    ) -> Self {
        let dashboard = Self {
            map: Panel::from_load(&payroll, |rows| MapView::from_payroll(rows), MAP_LOAD_ERROR),
            payroll: Panel::from_load(&payroll, |rows| rows.clone(), ALLOCATION_LOAD_ERROR),
            performance: Panel::from_load(
                &performance,
                |rows| PerformanceIndex::build(rows),
                TIMELINE_LOAD_ERROR,
            ),
            spending: Panel::from_load(
                &performance,
                |rows| SpendingTable::from_rows(rows),
                COMPARISON_LOAD_ERROR,
            ),
        };

        info!(
            "Dashboard ready (payroll: {}, performance: {})",
            dashboard.payroll_loaded(),
            dashboard.performance_loaded()
        );
        dashboard
    }

    pub fn payroll_loaded(&self) -> bool {
        self.payroll.is_ready()
    }

    pub fn performance_loaded(&self) -> bool {
        self.performance.is_ready()
    }

    pub fn map(&self) -> Panel<&MapView> {
        self.map.as_ref()
    }

    pub fn timeline(&self, abbr: &str, name: &str) -> Panel<TeamTimeline> {
        self.performance.as_ref().and_then(|index| {
            team_timeline(index, abbr, name)
                .map_or_else(|| Panel::unavailable(NO_TEAM_DATA), Panel::Ready)
        })
    }

    pub fn allocation(&self, abbr: &str) -> Panel<AllocationBreakdown> {
        self.payroll.as_ref().and_then(|rows| {
            allocation_breakdown(rows, abbr).map_or_else(
                || Panel::unavailable(format!("No data available for {}", abbr.trim())),
                Panel::Ready,
            )
        })
    }

    pub fn comparison(&self, abbr: &str, scope: Scope, sort: SortOrder) -> Panel<ComparisonView> {
        self.spending
            .as_ref()
            .and_then(|table| Panel::Ready(table.view(abbr, scope, sort)))
    }

    /// Resolve a navigation query and build every region of the detail page
    pub fn team_detail(&self, query: TeamQuery, scope: Scope, sort: SortOrder) -> TeamDetail {
        let header = query.resolve();
        TeamDetail {
            timeline: self.timeline(&header.abbr, &header.name),
            allocation: self.allocation(&header.abbr),
            comparison: self.comparison(&header.abbr, scope, sort),
            header,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn payroll_rows() -> Vec<PayrollRow> {
        vec![
            PayrollRow {
                team: "ATL".to_string(),
                avg_wins: Some(95.0),
                avg_total_payroll: Some(180_000_000.0),
                payroll_type: Some("Active 26-Man Roster".to_string()),
                class_amount: Some(150_000_000.0),
            },
            PayrollRow {
                team: "ATL".to_string(),
                avg_wins: Some(95.0),
                avg_total_payroll: Some(180_000_000.0),
                payroll_type: Some("Injured List".to_string()),
                class_amount: Some(30_000_000.0),
            },
        ]
    }

    fn performance_rows() -> Vec<PerformanceRow> {
        vec![
            PerformanceRow {
                team: "ATL".to_string(),
                team_name: "Atlanta Braves".to_string(),
                year: Some(2022),
                wins: Some(101.0),
                spending: Some(180_000_000.0),
                postseason: true,
            },
            PerformanceRow {
                team: "PHI".to_string(),
                team_name: "Philadelphia Phillies".to_string(),
                year: Some(2022),
                wins: Some(87.0),
                spending: Some(250_000_000.0),
                postseason: true,
            },
        ]
    }

    fn fetch_error() -> LoadError {
        LoadError::FileFetch {
            path: PathBuf::from("missing.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        }
    }

    #[test]
    fn test_default_query_shows_braves() {
        let dashboard = Dashboard::from_results(Ok(payroll_rows()), Ok(performance_rows()));
        let detail = dashboard.team_detail(TeamQuery::default(), Scope::Division, SortOrder::default());

        assert_eq!(detail.header.abbr, "ATL");
        assert!(detail.timeline.is_ready());
        assert_eq!(detail.allocation.ready().unwrap().alerts().len(), 0);

        let comparison = detail.comparison.ready().unwrap();
        assert_eq!(comparison.rows.len(), 2);
        assert_eq!(comparison.rows[0].abbr, "PHI");
    }

    #[test]
    fn test_payroll_failure_is_confined() {
        let dashboard = Dashboard::from_results(Err(fetch_error()), Ok(performance_rows()));

        assert!(!dashboard.payroll_loaded());
        assert_eq!(dashboard.map().message(), Some(MAP_LOAD_ERROR));
        assert_eq!(dashboard.allocation("ATL").message(), Some(ALLOCATION_LOAD_ERROR));
        assert!(dashboard.timeline("ATL", "Atlanta Braves").is_ready());
        assert!(dashboard
            .comparison("ATL", Scope::Global, SortOrder::SpendingAsc)
            .is_ready());
    }

    #[test]
    fn test_performance_failure_is_confined() {
        let dashboard = Dashboard::from_results(Ok(payroll_rows()), Err(fetch_error()));

        assert!(dashboard.map().is_ready());
        assert_eq!(dashboard.timeline("ATL", "").message(), Some(TIMELINE_LOAD_ERROR));
        assert_eq!(
            dashboard.comparison("ATL", Scope::Division, SortOrder::SpendingDesc).message(),
            Some(COMPARISON_LOAD_ERROR)
        );
    }

    #[test]
    fn test_team_without_rows() {
        let dashboard = Dashboard::from_results(Ok(payroll_rows()), Ok(performance_rows()));
        assert_eq!(dashboard.timeline("SEA", "Seattle Mariners").message(), Some(NO_TEAM_DATA));
        assert_eq!(
            dashboard.allocation("SEA").message(),
            Some("No data available for SEA")
        );
    }

    #[tokio::test]
    async fn test_load_from_files() {
        let mut payroll = NamedTempFile::new().unwrap();
        writeln!(
            payroll,
            "Team,Avg. Wins,Avg. Total Payroll Allocation,Payroll Type,Avg. Amount of this Payroll Classification"
        )
        .unwrap();
        writeln!(payroll, "ATL,95.04,\"$180,000,000\",Active 26-Man Roster,150000000").unwrap();

        let dashboard = Dashboard::load(
            &DataSource::File(payroll.path().to_path_buf()),
            &DataSource::File(PathBuf::from("/nonexistent/performance.tsv")),
        )
        .await;

        assert!(dashboard.payroll_loaded());
        assert!(!dashboard.performance_loaded());
        let map = dashboard.map();
        let braves = map.ready().unwrap().find("ATL").unwrap();
        assert_eq!(braves.stats.wins_display(), "95.0");
        assert_eq!(braves.tier.value(), 1);
    }
}
