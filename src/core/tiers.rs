//! Payroll tiers
//!
//! Teams are ranked by descending payroll over the whole roster and cut into
//! bands of five: rank 0-4 is tier 1, 5-9 tier 2 and so on. Tier 6 takes
//! everything from rank 25 down, so it grows when the roster is larger than
//! thirty.
//!
//! Tiers also shade the map: a state's color is the rounded mean tier of the
//! teams located in it.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{TeamStats, TieredTeam};

/// Teams per tier band
pub const TIER_BAND: usize = 5;

/// Number of tiers; the last absorbs the remainder
pub const TIER_COUNT: u8 = 6;

/// Fill for states without a team
pub const NO_TEAM_COLOR: &str = "#f8f9fa";

/// Payroll tier, 1 (top spenders) to 6 (bottom)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Tier(u8);

impl Tier {
    pub const ALL: [Tier; 6] = [Tier(1), Tier(2), Tier(3), Tier(4), Tier(5), Tier(6)];

    pub fn new(value: u8) -> Option<Self> {
        (1..=TIER_COUNT).contains(&value).then_some(Tier(value))
    }

    /// Tier for a zero-based rank in descending payroll order
    pub fn from_rank(rank: usize) -> Self {
        let tier = (rank / TIER_BAND + 1).min(TIER_COUNT as usize);
        Tier(tier as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn color(&self) -> &'static str {
        match self.0 {
            1 => "#d62728",
            2 => "#ff7f0e",
            3 => "#ffbb78",
            4 => "#98df8a",
            5 => "#2ca02c",
            _ => "#1f77b4",
        }
    }

    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "Tier 1: Top 5 Spenders ($200M+)",
            2 => "Tier 2: High Spenders ($150-200M)",
            3 => "Tier 3: Above Average ($120-150M)",
            4 => "Tier 4: Below Average ($90-120M)",
            5 => "Tier 5: Low Spenders ($70-90M)",
            _ => "Tier 6: Bottom 5 (<$70M)",
        }
    }
}

/// Color for a tier number; anything outside 1-6 gets the empty fill
pub fn tier_color(value: u8) -> &'static str {
    Tier::new(value).map_or(NO_TEAM_COLOR, |t| t.color())
}

/// Rank the whole roster by payroll and assign tiers.
///
/// Returns a new vector in rank order and leaves the input untouched. Missing
/// payroll ranks as zero, so those teams land at the bottom; equal payrolls
/// keep their input order.
pub fn assign_tiers(teams: &[TeamStats]) -> Vec<TieredTeam> {
    let mut ranked: Vec<&TeamStats> = teams.iter().collect();
    ranked.sort_by(|a, b| b.raw_payroll().total_cmp(&a.raw_payroll()));

    ranked
        .into_iter()
        .enumerate()
        .map(|(rank, stats)| TieredTeam {
            stats: stats.clone(),
            tier: Tier::from_rank(rank),
        })
        .collect()
}

/// How a state is filled on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StateShade {
    Teams {
        teams: Vec<String>,
        mean_tier: f64,
        tier: Tier,
    },
    NoTeam,
}

impl StateShade {
    pub fn color(&self) -> &'static str {
        match self {
            StateShade::Teams { tier, .. } => tier.color(),
            StateShade::NoTeam => NO_TEAM_COLOR,
        }
    }
}

/// Shade for one state: the rounded mean tier of its teams
pub fn state_shade(state: &str, teams: &[TieredTeam]) -> StateShade {
    let in_state: Vec<&TieredTeam> = teams.iter().filter(|t| t.team().state == state).collect();
    if in_state.is_empty() {
        return StateShade::NoTeam;
    }

    let mean_tier =
        in_state.iter().map(|t| t.tier.value() as f64).sum::<f64>() / in_state.len() as f64;

    match Tier::new(mean_tier.round() as u8) {
        Some(tier) => StateShade::Teams {
            teams: in_state
                .iter()
                .map(|t| t.team().abbreviation.to_string())
                .collect(),
            mean_tier,
            tier,
        },
        None => StateShade::NoTeam,
    }
}

/// Shades for every state that hosts at least one team
pub fn state_shades(teams: &[TieredTeam]) -> BTreeMap<&'static str, StateShade> {
    teams
        .iter()
        .map(|t| t.team().state)
        .map(|state| (state, state_shade(state, teams)))
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct LegendEntry {
    pub tier: Tier,
    pub color: &'static str,
    pub label: &'static str,
}

/// Fixed map legend
pub fn legend() -> Vec<LegendEntry> {
    Tier::ALL
        .iter()
        .map(|tier| LegendEntry {
            tier: *tier,
            color: tier.color(),
            label: tier.label(),
        })
        .collect()
}
