//! Per-team wins-vs-spending series for the detail view

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::join::PerformanceIndex;
use crate::models::{format_dollars, Efficiency};

/// One season of a team
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelinePoint {
    pub year: i32,
    pub wins: f64,
    pub spending_millions: f64,
    pub postseason: bool,
    pub efficiency: Efficiency,
}

/// Averages over the seasons shown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineSummary {
    pub seasons: usize,
    pub postseason_appearances: usize,
    pub avg_wins: f64,
    pub avg_spending_millions: f64,
    /// Mean of the per-season spending per win; seasons with no wins are left out
    pub avg_spending_per_win_millions: Option<f64>,
}

impl TimelineSummary {
    pub fn avg_payroll_display(&self) -> String {
        format_dollars((self.avg_spending_millions * 1e6).round())
    }

    pub fn spending_per_win_display(&self) -> Option<String> {
        self.avg_spending_per_win_millions.map(|m| {
            let cents = (m * 1e6 * 100.0).round() / 100.0;
            let text = format_dollars(cents);
            // always two decimals
            match text.split_once('.') {
                Some((whole, frac)) => format!("{}.{:0<2}", whole, frac),
                None => format!("{}.00", text),
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamTimeline {
    pub points: Vec<TimelinePoint>,
    pub summary: TimelineSummary,
}

impl TeamTimeline {
    pub fn postseason_points(&self) -> impl Iterator<Item = &TimelinePoint> {
        self.points.iter().filter(|p| p.postseason)
    }
}

/// Build the yearly series for a team matched by abbreviation or name.
///
/// When a year appears more than once the first row in file order is used.
/// Returns `None` when nothing matches.
pub fn team_timeline(index: &PerformanceIndex, abbr: &str, name: &str) -> Option<TeamTimeline> {
    let mut by_year = BTreeMap::new();
    for row in index.rows_for(abbr, name) {
        if let (Some(year), Some(wins), Some(spending)) = (row.year, row.wins, row.spending_millions())
        {
            by_year.entry(year).or_insert(TimelinePoint {
                year,
                wins,
                spending_millions: spending,
                postseason: row.postseason,
                efficiency: Efficiency::from_millions(wins, spending),
            });
        }
    }

    if by_year.is_empty() {
        return None;
    }

    let points: Vec<TimelinePoint> = by_year.into_values().collect();
    let summary = summarize(&points);
    Some(TeamTimeline { points, summary })
}

fn summarize(points: &[TimelinePoint]) -> TimelineSummary {
    let n = points.len() as f64;
    let per_win: Vec<f64> = points
        .iter()
        .filter(|p| p.wins > 0.0)
        .map(|p| p.spending_millions / p.wins)
        .collect();

    TimelineSummary {
        seasons: points.len(),
        postseason_appearances: points.iter().filter(|p| p.postseason).count(),
        avg_wins: points.iter().map(|p| p.wins).sum::<f64>() / n,
        avg_spending_millions: points.iter().map(|p| p.spending_millions).sum::<f64>() / n,
        avg_spending_per_win_millions: if per_win.is_empty() {
            None
        } else {
            Some(per_win.iter().sum::<f64>() / per_win.len() as f64)
        },
    }
}
