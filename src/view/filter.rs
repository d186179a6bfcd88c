//! Map filters
//!
//! Three checkbox groups: league, division and tier. A team is visible when
//! its league, its division and its tier are all checked. Filtering only
//! produces visibility flags; the tiered records themselves never change.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::tiers::Tier;
use crate::models::{Division, League, TieredTeam};

/// Checkbox group on the filter panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterGroup {
    League,
    Division,
    Tier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapFilter {
    leagues: BTreeSet<String>,
    divisions: BTreeSet<String>,
    tiers: BTreeSet<u8>,
}

impl Default for MapFilter {
    /// Everything checked
    fn default() -> Self {
        let mut filter = Self {
            leagues: BTreeSet::new(),
            divisions: BTreeSet::new(),
            tiers: BTreeSet::new(),
        };
        filter.check_all(FilterGroup::League);
        filter.check_all(FilterGroup::Division);
        filter.check_all(FilterGroup::Tier);
        filter
    }
}

impl MapFilter {
    pub fn set_league(&mut self, league: League, checked: bool) {
        toggle(&mut self.leagues, league.code().to_string(), checked);
    }

    pub fn set_division(&mut self, division: Division, checked: bool) {
        toggle(&mut self.divisions, division.name().to_string(), checked);
    }

    pub fn set_tier(&mut self, tier: Tier, checked: bool) {
        toggle(&mut self.tiers, tier.value(), checked);
    }

    pub fn is_checked_league(&self, league: League) -> bool {
        self.leagues.contains(league.code())
    }

    pub fn is_checked_division(&self, division: Division) -> bool {
        self.divisions.contains(division.name())
    }

    pub fn is_checked_tier(&self, tier: Tier) -> bool {
        self.tiers.contains(&tier.value())
    }

    /// "Select all": checks the whole group unless it is already fully
    /// checked, in which case the group is cleared.
    pub fn toggle_all(&mut self, group: FilterGroup) {
        if self.is_group_full(group) {
            match group {
                FilterGroup::League => self.leagues.clear(),
                FilterGroup::Division => self.divisions.clear(),
                FilterGroup::Tier => self.tiers.clear(),
            }
        } else {
            self.check_all(group);
        }
    }

    fn check_all(&mut self, group: FilterGroup) {
        match group {
            FilterGroup::League => {
                self.leagues = League::ALL.iter().map(|l| l.code().to_string()).collect()
            }
            FilterGroup::Division => {
                self.divisions = Division::ALL.iter().map(|d| d.name().to_string()).collect()
            }
            FilterGroup::Tier => self.tiers = Tier::ALL.iter().map(|t| t.value()).collect(),
        }
    }

    fn is_group_full(&self, group: FilterGroup) -> bool {
        match group {
            FilterGroup::League => League::ALL.iter().all(|l| self.is_checked_league(*l)),
            FilterGroup::Division => Division::ALL.iter().all(|d| self.is_checked_division(*d)),
            FilterGroup::Tier => Tier::ALL.iter().all(|t| self.is_checked_tier(*t)),
        }
    }

    pub fn is_visible(&self, team: &TieredTeam) -> bool {
        let t = team.team();
        self.is_checked_league(t.league)
            && self.is_checked_division(t.division)
            && self.is_checked_tier(team.tier)
    }

    /// One flag per team, in the order given
    pub fn visibility(&self, teams: &[TieredTeam]) -> Vec<Visibility> {
        teams
            .iter()
            .map(|team| Visibility {
                abbreviation: team.team().abbreviation.to_string(),
                visible: self.is_visible(team),
            })
            .collect()
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T, checked: bool) {
    if checked {
        set.insert(value);
    } else {
        set.remove(&value);
    }
}

/// Display flag for one marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Visibility {
    pub abbreviation: String,
    pub visible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::join::build_tiered_roster;
    use crate::data::csv_loader::PayrollRow;
    use crate::data::roster::roster;

    fn tiered() -> Vec<TieredTeam> {
        let rows: Vec<PayrollRow> = roster()
            .iter()
            .enumerate()
            .map(|(i, t)| PayrollRow {
                team: t.abbreviation.to_string(),
                avg_wins: Some(80.0),
                avg_total_payroll: Some(300_000_000.0 - i as f64 * 5_000_000.0),
                payroll_type: None,
                class_amount: None,
            })
            .collect();
        build_tiered_roster(roster(), &rows)
    }

    #[test]
    fn test_default_shows_everything() {
        let teams = tiered();
        let filter = MapFilter::default();
        assert!(filter.visibility(&teams).iter().all(|v| v.visible));
    }

    #[test]
    fn test_all_three_groups_must_match() {
        let teams = tiered();
        let mut filter = MapFilter::default();
        filter.set_league(League::American, false);

        let visible: Vec<&TieredTeam> = teams.iter().filter(|t| filter.is_visible(t)).collect();
        assert_eq!(visible.len(), 15);
        assert!(visible.iter().all(|t| t.team().league == League::National));

        filter.set_tier(Tier::new(1).unwrap(), false);
        assert!(teams
            .iter()
            .filter(|t| filter.is_visible(t))
            .all(|t| t.tier.value() != 1));
    }

    #[test]
    fn test_toggle_all_checks_when_any_unchecked() {
        let mut filter = MapFilter::default();
        filter.set_division(Division::NlWest, false);

        filter.toggle_all(FilterGroup::Division);
        assert!(filter.is_checked_division(Division::NlWest));

        filter.toggle_all(FilterGroup::Division);
        assert!(Division::ALL.iter().all(|d| !filter.is_checked_division(*d)));
    }

    #[test]
    fn test_filtering_does_not_touch_records() {
        let teams = tiered();
        let before = teams.clone();
        let mut filter = MapFilter::default();
        filter.toggle_all(FilterGroup::Tier);

        assert!(filter.visibility(&teams).iter().all(|v| !v.visible));
        assert_eq!(teams, before);
    }
}
