//! Map → detail navigation
//!
//! Clicking a marker opens the detail page with the team's card encoded in
//! the query string. Every parameter is optional on the way back in; absent
//! ones resolve to fixed defaults.

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::models::{TieredTeam, DATA_MISSING};

pub const DEFAULT_TEAM_NAME: &str = "Atlanta Braves";
pub const DEFAULT_TEAM_ABBR: &str = "ATL";
pub const DEFAULT_LEAGUE: &str = "NL";
pub const DEFAULT_DIVISION: &str = "NL East";

/// Query parameters carried by a team link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamLink {
    pub name: String,
    pub abbr: String,
    pub league: String,
    pub division: String,
    pub tier: String,
    pub wins: String,
    pub payroll: String,
    pub logo: String,
}

impl TeamLink {
    /// Link for a marker; wins and payroll carry their display strings
    pub fn for_team(team: &TieredTeam) -> Self {
        let t = team.team();
        Self {
            name: t.name.to_string(),
            abbr: t.abbreviation.to_string(),
            league: t.league.code().to_string(),
            division: t.division.name().to_string(),
            tier: team.tier.value().to_string(),
            wins: team.stats.wins_display(),
            payroll: team.stats.payroll_display(),
            logo: t.logo.to_string(),
        }
    }

    fn pairs(&self) -> [(&'static str, &str); 8] {
        [
            ("name", self.name.as_str()),
            ("abbr", self.abbr.as_str()),
            ("league", self.league.as_str()),
            ("division", self.division.as_str()),
            ("tier", self.tier.as_str()),
            ("wins", self.wins.as_str()),
            ("payroll", self.payroll.as_str()),
            ("logo", self.logo.as_str()),
        ]
    }

    /// Detail page URL with the link's parameters appended
    pub fn url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.query_pairs_mut().clear().extend_pairs(self.pairs());
        url
    }
}

/// Navigation query as received by the detail page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamQuery {
    pub name: Option<String>,
    pub abbr: Option<String>,
    pub league: Option<String>,
    pub division: Option<String>,
    pub tier: Option<String>,
    pub wins: Option<String>,
    pub payroll: Option<String>,
    pub logo: Option<String>,
}

impl TeamQuery {
    pub fn from_url(url: &Url) -> Self {
        let mut query = Self::default();
        for (key, value) in url.query_pairs() {
            let value = Some(value.into_owned());
            match key.as_ref() {
                "name" => query.name = value,
                "abbr" => query.abbr = value,
                "league" => query.league = value,
                "division" => query.division = value,
                "tier" => query.tier = value,
                "wins" => query.wins = value,
                "payroll" => query.payroll = value,
                "logo" => query.logo = value,
                _ => {}
            }
        }
        query
    }

    /// Fill absent or blank parameters with the defaults
    pub fn resolve(self) -> TeamDetailHeader {
        TeamDetailHeader {
            name: present(self.name).unwrap_or_else(|| DEFAULT_TEAM_NAME.to_string()),
            abbr: present(self.abbr).unwrap_or_else(|| DEFAULT_TEAM_ABBR.to_string()),
            league: present(self.league).unwrap_or_else(|| DEFAULT_LEAGUE.to_string()),
            division: present(self.division).unwrap_or_else(|| DEFAULT_DIVISION.to_string()),
            tier: self.tier.and_then(|t| t.trim().parse().ok()),
            wins: present(self.wins).unwrap_or_else(|| DATA_MISSING.to_string()),
            payroll: present(self.payroll).unwrap_or_else(|| DATA_MISSING.to_string()),
            logo: present(self.logo).unwrap_or_default(),
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<TeamLink> for TeamQuery {
    fn from(link: TeamLink) -> Self {
        Self {
            name: Some(link.name),
            abbr: Some(link.abbr),
            league: Some(link.league),
            division: Some(link.division),
            tier: Some(link.tier),
            wins: Some(link.wins),
            payroll: Some(link.payroll),
            logo: Some(link.logo),
        }
    }
}

/// Header of the detail view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamDetailHeader {
    pub name: String,
    pub abbr: String,
    pub league: String,
    pub division: String,
    /// `None` when the link carried no usable tier
    pub tier: Option<u8>,
    pub wins: String,
    pub payroll: String,
    pub logo: String,
}
