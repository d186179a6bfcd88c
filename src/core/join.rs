//! Joining source rows onto the roster
//!
//! The payroll snapshot is keyed by abbreviation only. The yearly export uses
//! abbreviations that do not always match the roster, so it is indexed twice,
//! by abbreviation and by full team name, and a lookup consults both.

use std::collections::HashMap;
use tracing::debug;

use crate::core::tiers::assign_tiers;
use crate::data::csv_loader::{PayrollRow, PerformanceRow};
use crate::models::{Team, TeamStats, TieredTeam};

/// Lookup key: trimmed and lower-cased
fn normalize(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Averages for one team from the payroll snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayrollSnapshot {
    pub avg_wins: f64,
    pub avg_payroll: f64,
}

/// Payroll snapshot keyed by trimmed abbreviation
#[derive(Debug, Clone, Default)]
pub struct PayrollIndex {
    by_abbr: HashMap<String, PayrollSnapshot>,
}

impl PayrollIndex {
    /// Index rows that carry both averages; a later row for the same team
    /// replaces an earlier one.
    pub fn build(rows: &[PayrollRow]) -> Self {
        let mut by_abbr = HashMap::new();
        for row in rows {
            if let (Some(avg_wins), Some(avg_payroll)) = (row.avg_wins, row.avg_total_payroll) {
                by_abbr.insert(
                    row.team.trim().to_string(),
                    PayrollSnapshot {
                        avg_wins,
                        avg_payroll,
                    },
                );
            }
        }
        Self { by_abbr }
    }

    /// Exact match on the trimmed abbreviation
    pub fn get(&self, abbr: &str) -> Option<PayrollSnapshot> {
        self.by_abbr.get(abbr.trim()).copied()
    }

    pub fn len(&self) -> usize {
        self.by_abbr.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_abbr.is_empty()
    }
}

/// Join the payroll snapshot onto the roster, keeping roster order.
///
/// A team without a snapshot is kept with both averages set to `None`.
pub fn join_payroll(roster: &[Team], rows: &[PayrollRow]) -> Vec<TeamStats> {
    let index = PayrollIndex::build(rows);
    roster
        .iter()
        .map(|team| {
            let snapshot = index.get(team.abbreviation);
            if snapshot.is_none() {
                debug!("No payroll row for {}", team.abbreviation);
            }
            TeamStats {
                team: *team,
                avg_wins: snapshot.map(|s| s.avg_wins),
                avg_payroll: snapshot.map(|s| s.avg_payroll),
            }
        })
        .collect()
}

/// Roster → joined → tiered, in rank order
pub fn build_tiered_roster(roster: &[Team], rows: &[PayrollRow]) -> Vec<TieredTeam> {
    assign_tiers(&join_payroll(roster, rows))
}

/// Complete yearly rows indexed by abbreviation and by team name
#[derive(Debug, Clone, Default)]
pub struct PerformanceIndex {
    rows: Vec<PerformanceRow>,
    by_abbr: HashMap<String, Vec<usize>>,
    by_name: HashMap<String, Vec<usize>>,
}

impl PerformanceIndex {
    /// Index the rows that have every required field; the rest are dropped
    pub fn build(rows: &[PerformanceRow]) -> Self {
        let rows: Vec<PerformanceRow> = rows.iter().filter(|r| r.is_complete()).cloned().collect();

        let mut by_abbr: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, row) in rows.iter().enumerate() {
            by_abbr.entry(normalize(&row.team)).or_default().push(i);
            by_name.entry(normalize(&row.team_name)).or_default().push(i);
        }

        Self {
            rows,
            by_abbr,
            by_name,
        }
    }

    /// Rows matching the abbreviation or the full name, in source order
    pub fn rows_for(&self, abbr: &str, name: &str) -> Vec<&PerformanceRow> {
        let mut hits: Vec<usize> = self
            .by_abbr
            .get(&normalize(abbr))
            .into_iter()
            .chain(self.by_name.get(&normalize(name)))
            .flatten()
            .copied()
            .collect();
        hits.sort_unstable();
        hits.dedup();

        hits.into_iter().map(|i| &self.rows[i]).collect()
    }

    /// Every complete row
    pub fn rows(&self) -> &[PerformanceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::roster::roster;

    fn payroll_row(team: &str, wins: f64, payroll: f64) -> PayrollRow {
        PayrollRow {
            team: team.to_string(),
            avg_wins: Some(wins),
            avg_total_payroll: Some(payroll),
            payroll_type: Some("Active 26-Man Roster".to_string()),
            class_amount: Some(payroll * 0.8),
        }
    }

    fn performance_row(team: &str, name: &str, year: i32) -> PerformanceRow {
        PerformanceRow {
            team: team.to_string(),
            team_name: name.to_string(),
            year: Some(year),
            wins: Some(81.0),
            spending: Some(100_000_000.0),
            postseason: false,
        }
    }

    #[test]
    fn test_join_keeps_roster_order() {
        let rows = vec![payroll_row("NYY", 92.0, 245_000_000.0)];
        let joined = join_payroll(roster(), &rows);

        assert_eq!(joined.len(), 30);
        assert_eq!(joined[0].team.abbreviation, "ARI");
        let nyy = joined.iter().find(|s| s.team.abbreviation == "NYY").unwrap();
        assert_eq!(nyy.avg_payroll, Some(245_000_000.0));
    }

    #[test]
    fn test_join_miss_is_sentinel() {
        let rows = vec![payroll_row("XYZ", 90.0, 300_000_000.0)];
        let joined = join_payroll(roster(), &rows);

        assert!(joined.iter().all(|s| !s.has_data()));
        assert!(joined.iter().all(|s| s.wins_display() == "Data Missing"));
    }

    #[test]
    fn test_join_trims_abbreviation() {
        let rows = vec![payroll_row(" BOS ", 88.0, 190_000_000.0)];
        let index = PayrollIndex::build(&rows);
        assert!(index.get("BOS").is_some());
        // case matters for the payroll join
        assert!(index.get("bos").is_none());
    }

    #[test]
    fn test_last_row_wins() {
        let rows = vec![
            payroll_row("SEA", 85.0, 100_000_000.0),
            payroll_row("SEA", 86.0, 110_000_000.0),
        ];
        let index = PayrollIndex::build(&rows);
        assert_eq!(index.get("SEA").unwrap().avg_payroll, 110_000_000.0);
    }

    #[test]
    fn test_rows_without_averages_skipped() {
        let mut row = payroll_row("MIA", 60.0, 70_000_000.0);
        row.avg_total_payroll = None;
        assert!(PayrollIndex::build(&[row]).is_empty());
    }

    #[test]
    fn test_tiered_roster_missing_team_sorts_last() {
        // every team but ATL has data; ATL falls to the bottom band
        let rows: Vec<PayrollRow> = roster()
            .iter()
            .filter(|t| t.abbreviation != "ATL")
            .enumerate()
            .map(|(i, t)| payroll_row(t.abbreviation, 80.0, 60_000_000.0 + i as f64 * 1e6))
            .collect();

        let tiered = build_tiered_roster(roster(), &rows);
        let last = tiered.last().unwrap();
        assert_eq!(last.team().abbreviation, "ATL");
        assert_eq!(last.tier.value(), 6);
        assert_eq!(last.stats.payroll_display(), "Data Missing");
    }

    #[test]
    fn test_performance_lookup_by_abbr_or_name() {
        let rows = vec![
            performance_row("WSN", "Washington Nationals", 2019),
            performance_row("WSH", "Nationals", 2020),
            performance_row("NYM", "New York Mets", 2019),
        ];
        let index = PerformanceIndex::build(&rows);

        let hits = index.rows_for("WSH", " washington nationals ");
        let years: Vec<i32> = hits.iter().filter_map(|r| r.year).collect();
        assert_eq!(years, vec![2019, 2020]);
    }

    #[test]
    fn test_performance_lookup_no_duplicates() {
        let rows = vec![performance_row("NYM", "New York Mets", 2019)];
        let index = PerformanceIndex::build(&rows);
        assert_eq!(index.rows_for("nym", "New York Mets").len(), 1);
        assert!(index.rows_for("XYZ", "Nowhere").is_empty());
    }

    #[test]
    fn test_incomplete_rows_not_indexed() {
        let mut row = performance_row("NYM", "New York Mets", 2019);
        row.wins = None;
        assert!(PerformanceIndex::build(&[row]).is_empty());
    }
}
