use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::core::tiers::Tier;

/// Display value for a team whose payroll row never joined
pub const DATA_MISSING: &str = "Data Missing";

/// Display value for an undefined ratio
pub const NOT_AVAILABLE: &str = "N/A";

/// Major league
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum League {
    #[serde(rename = "AL")]
    American,
    #[serde(rename = "NL")]
    National,
}

impl League {
    pub const ALL: [League; 2] = [League::American, League::National];

    pub fn code(&self) -> &'static str {
        match self {
            League::American => "AL",
            League::National => "NL",
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for League {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AL" => Ok(League::American),
            "NL" => Ok(League::National),
            other => Err(format!("unknown league {:?}", other)),
        }
    }
}

/// One of the six divisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Division {
    #[serde(rename = "AL East")]
    AlEast,
    #[serde(rename = "AL Central")]
    AlCentral,
    #[serde(rename = "AL West")]
    AlWest,
    #[serde(rename = "NL East")]
    NlEast,
    #[serde(rename = "NL Central")]
    NlCentral,
    #[serde(rename = "NL West")]
    NlWest,
}

impl Division {
    pub const ALL: [Division; 6] = [
        Division::AlEast,
        Division::AlCentral,
        Division::AlWest,
        Division::NlEast,
        Division::NlCentral,
        Division::NlWest,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Division::AlEast => "AL East",
            Division::AlCentral => "AL Central",
            Division::AlWest => "AL West",
            Division::NlEast => "NL East",
            Division::NlCentral => "NL Central",
            Division::NlWest => "NL West",
        }
    }

    pub fn league(&self) -> League {
        match self {
            Division::AlEast | Division::AlCentral | Division::AlWest => League::American,
            Division::NlEast | Division::NlCentral | Division::NlWest => League::National,
        }
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Division {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Division::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown division {:?}", wanted))
    }
}

/// Static roster entry
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Team {
    pub name: &'static str,
    pub abbreviation: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub logo: &'static str,
    pub division: Division,
    pub league: League,
    pub state: &'static str,
}

/// Wins per million dollars of payroll
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Efficiency {
    WinsPerMillion(f64),
    NotAvailable,
}

impl Efficiency {
    /// `wins / (payroll / 1_000_000)`; zero or missing payroll has no ratio
    pub fn from_payroll(wins: f64, payroll_dollars: Option<f64>) -> Self {
        match payroll_dollars {
            Some(payroll) => Self::from_millions(wins, payroll / 1_000_000.0),
            None => Efficiency::NotAvailable,
        }
    }

    pub fn from_millions(wins: f64, payroll_millions: f64) -> Self {
        if payroll_millions > 0.0 && wins.is_finite() {
            Efficiency::WinsPerMillion(wins / payroll_millions)
        } else {
            Efficiency::NotAvailable
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Efficiency::WinsPerMillion(v) => Some(*v),
            Efficiency::NotAvailable => None,
        }
    }

    /// Coarse band used to color the map hover card
    pub fn band(&self) -> EfficiencyBand {
        match self {
            Efficiency::WinsPerMillion(v) if *v > 0.8 => EfficiencyBand::Strong,
            Efficiency::WinsPerMillion(v) if *v > 0.5 => EfficiencyBand::Fair,
            Efficiency::WinsPerMillion(_) => EfficiencyBand::Weak,
            Efficiency::NotAvailable => EfficiencyBand::Unknown,
        }
    }
}

impl fmt::Display for Efficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Efficiency::WinsPerMillion(v) => write!(f, "{:.2}", v),
            Efficiency::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for Efficiency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Efficiency::WinsPerMillion(v) => serializer.serialize_f64(*v),
            Efficiency::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EfficiencyBand {
    Strong,
    Fair,
    Weak,
    Unknown,
}

impl EfficiencyBand {
    pub fn color(&self) -> &'static str {
        match self {
            EfficiencyBand::Strong => "#22c55e",
            EfficiencyBand::Fair => "#f59e0b",
            EfficiencyBand::Weak => "#ef4444",
            EfficiencyBand::Unknown => "#9ca3af",
        }
    }
}

/// Roster team joined with its payroll snapshot.
///
/// `None` means the payroll table had no usable row for the team. That is a
/// distinct state from a zero payroll and displays as "Data Missing".
#[derive(Debug, Clone, PartialEq)]
pub struct TeamStats {
    pub team: Team,
    pub avg_wins: Option<f64>,
    pub avg_payroll: Option<f64>,
}

impl TeamStats {
    pub fn has_data(&self) -> bool {
        self.avg_wins.is_some() && self.avg_payroll.is_some()
    }

    /// Payroll used for ranking; missing teams rank as zero
    pub fn raw_payroll(&self) -> f64 {
        self.avg_payroll.unwrap_or(0.0)
    }

    pub fn wins_display(&self) -> String {
        match self.avg_wins {
            Some(wins) => format!("{:.1}", wins),
            None => DATA_MISSING.to_string(),
        }
    }

    pub fn payroll_display(&self) -> String {
        match self.avg_payroll {
            Some(payroll) => format_dollars(payroll),
            None => DATA_MISSING.to_string(),
        }
    }

    pub fn efficiency(&self) -> Efficiency {
        match self.avg_wins {
            Some(wins) => Efficiency::from_payroll(wins, self.avg_payroll),
            None => Efficiency::NotAvailable,
        }
    }
}

/// Team with its payroll tier assigned over the whole roster
#[derive(Debug, Clone, PartialEq)]
pub struct TieredTeam {
    pub stats: TeamStats,
    pub tier: Tier,
}

impl TieredTeam {
    pub fn team(&self) -> &Team {
        &self.stats.team
    }

    pub fn card(&self) -> TeamCard {
        let team = self.team();
        let efficiency = self.stats.efficiency();
        TeamCard {
            name: team.name.to_string(),
            abbreviation: team.abbreviation.to_string(),
            league: team.league,
            division: team.division,
            state: team.state.to_string(),
            latitude: team.latitude,
            longitude: team.longitude,
            logo: team.logo.to_string(),
            tier: self.tier.value(),
            tier_color: self.tier.color().to_string(),
            avg_wins: self.stats.wins_display(),
            avg_payroll: self.stats.payroll_display(),
            raw_payroll: self.stats.raw_payroll(),
            has_data: self.stats.has_data(),
            efficiency,
            efficiency_band: efficiency.band(),
        }
    }
}

/// Everything the map marker and its hover card show for one team
#[derive(Debug, Clone, Serialize)]
pub struct TeamCard {
    pub name: String,
    pub abbreviation: String,
    pub league: League,
    pub division: Division,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    pub logo: String,
    pub tier: u8,
    pub tier_color: String,
    pub avg_wins: String,
    pub avg_payroll: String,
    pub raw_payroll: f64,
    pub has_data: bool,
    pub efficiency: Efficiency,
    pub efficiency_band: EfficiencyBand,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub payroll_loaded: bool,
    pub performance_loaded: bool,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Format a dollar amount the way the en-US locale does: `$1,234,567.5`
pub fn format_dollars(amount: f64) -> String {
    let text = format!("{:.3}", amount.abs());
    let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac = frac.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    if frac.is_empty() {
        format!("{}${}", sign, grouped)
    } else {
        format!("{}${}.{}", sign, grouped, frac)
    }
}
