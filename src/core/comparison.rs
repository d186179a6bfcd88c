//! Career spending-per-win comparison across teams
//!
//! The base aggregate is computed once from the yearly export. Scope and sort
//! are independent selections applied to it; changing either only re-filters
//! and re-sorts, it never recomputes the sums.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::data::csv_loader::PerformanceRow;
use crate::data::roster::{division_members, find_by_abbreviation, find_by_name, league_members};

/// Which teams the comparison shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    #[default]
    Division,
    League,
    #[serde(alias = "mlb")]
    Global,
}

impl Scope {
    pub fn label(&self) -> &'static str {
        match self {
            Scope::Division => "Division",
            Scope::League => "League",
            Scope::Global => "MLB",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "division" => Ok(Scope::Division),
            "league" => Ok(Scope::League),
            "mlb" | "global" => Ok(Scope::Global),
            other => Err(format!("unknown scope {:?} (division, league, mlb)", other)),
        }
    }
}

/// Bar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    SpendingDesc,
    SpendingAsc,
    Alphabetical,
}

impl SortOrder {
    pub fn key(&self) -> &'static str {
        match self {
            SortOrder::SpendingDesc => "spending-desc",
            SortOrder::SpendingAsc => "spending-asc",
            SortOrder::Alphabetical => "alphabetical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::SpendingDesc => "Spending Desc",
            SortOrder::SpendingAsc => "Spending Asc",
            SortOrder::Alphabetical => "Alphabetical",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spending-desc" | "desc" => Ok(SortOrder::SpendingDesc),
            "spending-asc" | "asc" => Ok(SortOrder::SpendingAsc),
            "alphabetical" | "name" => Ok(SortOrder::Alphabetical),
            other => Err(format!(
                "unknown sort {:?} (spending-desc, spending-asc, alphabetical)",
                other
            )),
        }
    }
}

/// Qualitative label for spending per win (in $M)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rating {
    Excellent,
    Good,
    Poor,
}

impl Rating {
    pub fn from_spending_per_win(millions: f64) -> Self {
        if millions < 2.0 {
            Rating::Excellent
        } else if millions < 3.0 {
            Rating::Good
        } else {
            Rating::Poor
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Poor => "Poor",
        };
        f.write_str(text)
    }
}

/// Career totals for one team
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSpending {
    pub abbr: String,
    pub name: String,
    pub total_spending_millions: f64,
    pub total_wins: f64,
    pub spending_per_win: f64,
}

/// Base aggregate shared by every scope and sort
#[derive(Debug, Clone, Default)]
pub struct SpendingTable {
    teams: Vec<TeamSpending>,
}

impl SpendingTable {
    /// Sum spending and wins per team over complete rows with at least one
    /// win. Teams keep first-appearance order; the name comes from a team's
    /// first row.
    ///
    /// Rows are matched to the roster by abbreviation, then by full name, and
    /// keyed by the roster abbreviation. Only clubs missing from the roster
    /// keep the export's own code.
    pub fn from_rows(rows: &[PerformanceRow]) -> Self {
        let mut teams: Vec<TeamSpending> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for row in rows.iter().filter(|r| r.is_complete()) {
            let (Some(wins), Some(spending)) = (row.wins, row.spending_millions()) else {
                continue;
            };
            if wins <= 0.0 {
                continue;
            }

            let abbr = roster_key(row);
            let pos = *positions.entry(abbr.clone()).or_insert_with(|| {
                teams.push(TeamSpending {
                    abbr,
                    name: row.team_name.trim().to_string(),
                    total_spending_millions: 0.0,
                    total_wins: 0.0,
                    spending_per_win: 0.0,
                });
                teams.len() - 1
            });

            let team = &mut teams[pos];
            team.total_spending_millions += spending;
            team.total_wins += wins;
        }

        for team in &mut teams {
            team.spending_per_win = team.total_spending_millions / team.total_wins;
        }

        Self { teams }
    }

    pub fn teams(&self) -> &[TeamSpending] {
        &self.teams
    }

    pub fn get(&self, abbr: &str) -> Option<&TeamSpending> {
        self.teams.iter().find(|t| t.abbr == abbr.trim())
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Rows for the selected team's scope in the requested order.
    ///
    /// Division and league come from the roster; a team not on the roster
    /// only has a global view. The selection is matched case-insensitively.
    pub fn view(&self, selected: &str, scope: Scope, sort: SortOrder) -> ComparisonView {
        let team = find_by_abbreviation(selected);
        let selected = team.map_or(selected.trim(), |t| t.abbreviation);
        let members: Option<Vec<&str>> = match scope {
            Scope::Global => None,
            Scope::Division => Some(team.map(|t| division_members(t.division)).unwrap_or_default()),
            Scope::League => Some(team.map(|t| league_members(t.league)).unwrap_or_default()),
        };

        let mut picked: Vec<&TeamSpending> = self
            .teams
            .iter()
            .filter(|t| members.as_ref().map_or(true, |m| m.contains(&t.abbr.as_str())))
            .collect();

        match sort {
            SortOrder::SpendingDesc => {
                picked.sort_by(|a, b| b.spending_per_win.total_cmp(&a.spending_per_win))
            }
            SortOrder::SpendingAsc => {
                picked.sort_by(|a, b| a.spending_per_win.total_cmp(&b.spending_per_win))
            }
            SortOrder::Alphabetical => picked.sort_by(|a, b| {
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then_with(|| a.name.cmp(&b.name))
            }),
        }

        let selected_spend = picked
            .iter()
            .find(|t| t.abbr == selected)
            .map(|t| t.spending_per_win);

        let rows = picked
            .into_iter()
            .enumerate()
            .map(|(i, t)| {
                let is_selected = t.abbr == selected;
                ComparisonRow {
                    rank: i + 1,
                    abbr: t.abbr.clone(),
                    name: t.name.clone(),
                    spending_per_win: t.spending_per_win,
                    is_selected,
                    delta_vs_selected: if is_selected {
                        None
                    } else {
                        selected_spend.map(|s| t.spending_per_win - s)
                    },
                    rating: Rating::from_spending_per_win(t.spending_per_win),
                }
            })
            .collect();

        ComparisonView {
            scope,
            sort,
            title: format!("{} Comparison - {}", scope.label(), sort.label()),
            rows,
        }
    }
}

fn roster_key(row: &PerformanceRow) -> String {
    find_by_abbreviation(&row.team)
        .or_else(|| find_by_name(&row.team_name))
        .map_or_else(|| row.team.trim().to_string(), |t| t.abbreviation.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// 1-based position in this view
    pub rank: usize,
    pub abbr: String,
    pub name: String,
    /// $M per win
    pub spending_per_win: f64,
    pub is_selected: bool,
    /// Positive when this team pays more per win than the selected one
    pub delta_vs_selected: Option<f64>,
    pub rating: Rating,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonView {
    pub scope: Scope,
    pub sort: SortOrder,
    pub title: String,
    pub rows: Vec<ComparisonRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(team: &str, name: &str, year: i32, wins: f64, spending: f64) -> PerformanceRow {
        PerformanceRow {
            team: team.to_string(),
            team_name: name.to_string(),
            year: Some(year),
            wins: Some(wins),
            spending: Some(spending),
            postseason: false,
        }
    }

    fn sample() -> Vec<PerformanceRow> {
        vec![
            row("NYY", "New York Yankees", 2019, 100.0, 200e6),
            row("NYY", "New York Yankees", 2020, 50.0, 100e6),
            row("BOS", "Boston Red Sox", 2019, 90.0, 270e6),
            row("TB", "Tampa Bay Rays", 2019, 100.0, 60e6),
            row("TB", "Tampa Bay Rays", 2020, 0.0, 30e6),
            row("LAD", "Los Angeles Dodgers", 2019, 100.0, 250e6),
        ]
    }

    #[test]
    fn test_career_spending_per_win() {
        let table = SpendingTable::from_rows(&sample());

        // (200 + 100) / (100 + 50)
        assert_eq!(table.get("NYY").unwrap().spending_per_win, 2.0);
        assert_eq!(table.get("BOS").unwrap().spending_per_win, 3.0);
        // the zero-win season is ignored
        assert_eq!(table.get("TB").unwrap().total_spending_millions, 60.0);
        assert_eq!(table.get("TB").unwrap().spending_per_win, 0.6);
    }

    #[test]
    fn test_division_scope_and_sorts() {
        let table = SpendingTable::from_rows(&sample());

        let desc = table.view("NYY", Scope::Division, SortOrder::SpendingDesc);
        let abbrs: Vec<&str> = desc.rows.iter().map(|r| r.abbr.as_str()).collect();
        assert_eq!(abbrs, vec!["BOS", "NYY", "TB"]);

        let asc = table.view("NYY", Scope::Division, SortOrder::SpendingAsc);
        let abbrs: Vec<&str> = asc.rows.iter().map(|r| r.abbr.as_str()).collect();
        assert_eq!(abbrs, vec!["TB", "NYY", "BOS"]);

        let alpha = table.view("NYY", Scope::Division, SortOrder::Alphabetical);
        let names: Vec<&str> = alpha.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Boston Red Sox", "New York Yankees", "Tampa Bay Rays"]);
    }

    #[test]
    fn test_scope_does_not_change_base_aggregate() {
        let table = SpendingTable::from_rows(&sample());
        let division = table.view("NYY", Scope::Division, SortOrder::SpendingDesc);
        let global = table.view("NYY", Scope::Global, SortOrder::SpendingDesc);

        assert_eq!(global.rows.len(), 4);
        for row in &division.rows {
            let same = global.rows.iter().find(|g| g.abbr == row.abbr).unwrap();
            assert_eq!(same.spending_per_win, row.spending_per_win);
        }
    }

    #[test]
    fn test_league_scope() {
        let table = SpendingTable::from_rows(&sample());
        let league = table.view("LAD", Scope::League, SortOrder::SpendingDesc);
        let abbrs: Vec<&str> = league.rows.iter().map(|r| r.abbr.as_str()).collect();
        assert_eq!(abbrs, vec!["LAD"]);
    }

    #[test]
    fn test_rank_delta_and_rating() {
        let table = SpendingTable::from_rows(&sample());
        let view = table.view("NYY", Scope::Division, SortOrder::SpendingDesc);

        let bos = &view.rows[0];
        assert_eq!(bos.rank, 1);
        assert_eq!(bos.delta_vs_selected, Some(1.0));
        assert_eq!(bos.rating, Rating::Poor);

        let nyy = &view.rows[1];
        assert!(nyy.is_selected);
        assert_eq!(nyy.delta_vs_selected, None);
        assert_eq!(nyy.rating, Rating::Good);

        assert_eq!(view.rows[2].rating, Rating::Excellent);
        assert_eq!(view.title, "Division Comparison - Spending Desc");
    }

    #[test]
    fn test_unknown_team_has_only_global_rows() {
        let table = SpendingTable::from_rows(&sample());
        assert!(table.view("XYZ", Scope::Division, SortOrder::SpendingDesc).rows.is_empty());
        assert_eq!(table.view("XYZ", Scope::Global, SortOrder::SpendingDesc).rows.len(), 4);
    }

    #[test]
    fn test_selection_ignores_case() {
        let table = SpendingTable::from_rows(&sample());
        let view = table.view("nyy", Scope::Division, SortOrder::SpendingDesc);
        assert_eq!(view.rows.len(), 3);
        assert!(view.rows.iter().any(|r| r.abbr == "NYY" && r.is_selected));
    }

    #[test]
    fn test_export_code_matched_by_name() {
        let rows = vec![
            row("WSN", "Washington Nationals", 2019, 93.0, 186e6),
            row("ATL", "Atlanta Braves", 2019, 97.0, 97e6),
            row("nyy", "New York Yankees", 2019, 103.0, 206e6),
        ];
        let table = SpendingTable::from_rows(&rows);
        assert_eq!(table.get("WSH").unwrap().spending_per_win, 2.0);
        assert!(table.get("WSN").is_none());
        assert!(table.get("NYY").is_some());

        let view = table.view("WSH", Scope::Division, SortOrder::SpendingDesc);
        let abbrs: Vec<&str> = view.rows.iter().map(|r| r.abbr.as_str()).collect();
        assert_eq!(abbrs, vec!["WSH", "ATL"]);
        assert!(view.rows[0].is_selected);
        assert_eq!(view.rows[1].delta_vs_selected, Some(-1.0));
    }

    #[test]
    fn test_parse_selections() {
        assert_eq!("MLB".parse::<Scope>().unwrap(), Scope::Global);
        assert_eq!("spending-asc".parse::<SortOrder>().unwrap(), SortOrder::SpendingAsc);
        assert!("sideways".parse::<SortOrder>().is_err());
        let scope: Scope = serde_json::from_str("\"mlb\"").unwrap();
        assert_eq!(scope, Scope::Global);
    }
}
