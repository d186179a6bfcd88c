//! Static roster of the 30 clubs
//!
//! Coordinates place the marker on the map (some are nudged off the real
//! ballpark so neighbouring logos do not overlap). `state` drives the state
//! shading and is hand-maintained: Toronto maps to "Ontario", which is not a
//! US state, so its tier never colors the map.

use crate::models::{Division, League, Team};

const fn team(
    name: &'static str,
    abbreviation: &'static str,
    latitude: f64,
    longitude: f64,
    logo: &'static str,
    division: Division,
    state: &'static str,
) -> Team {
    let league = match division {
        Division::AlEast | Division::AlCentral | Division::AlWest => League::American,
        Division::NlEast | Division::NlCentral | Division::NlWest => League::National,
    };
    Team {
        name,
        abbreviation,
        latitude,
        longitude,
        logo,
        division,
        league,
        state,
    }
}

/// Every club, in alphabetical order of name
pub static ROSTER: [Team; 30] = [
    team("Arizona Diamondbacks", "ARI", 33.4453, -112.0667, "logos/dbacks.png", Division::NlWest, "Arizona"),
    team("Atlanta Braves", "ATL", 33.7348, -84.3898, "logos/braves.png", Division::NlEast, "Georgia"),
    team("Baltimore Orioles", "BAL", 39.2839, -77.9217, "logos/orioles.png", Division::AlEast, "Maryland"),
    team("Boston Red Sox", "BOS", 42.3467, -70.0972, "logos/bosox.png", Division::AlEast, "Massachusetts"),
    team("Chicago Cubs", "CHC", 41.9484, -87.6553, "logos/cubs.png", Division::NlCentral, "Illinois"),
    team("Chicago White Sox", "CHW", 39.43, -88.6338, "logos/sox.png", Division::AlCentral, "Illinois"),
    team("Cincinnati Reds", "CIN", 39.0975, -84.5066, "logos/reds.png", Division::NlCentral, "Ohio"),
    team("Cleveland Guardians", "CLE", 41.4962, -82.6852, "logos/guardians.png", Division::AlCentral, "Ohio"),
    team("Colorado Rockies", "COL", 39.7561, -104.9941, "logos/rockies.png", Division::NlWest, "Colorado"),
    team("Detroit Tigers", "DET", 43.3391, -84.5486, "logos/tigers.png", Division::AlCentral, "Michigan"),
    team("Houston Astros", "HOU", 29.7572, -95.3556, "logos/cheaters.png", Division::AlWest, "Texas"),
    team("Kansas City Royals", "KC", 39.0516, -94.9906, "logos/royals.png", Division::AlCentral, "Missouri"),
    team("Los Angeles Angels", "LAA", 34.9003, -116.8827, "logos/angels.png", Division::AlWest, "California"),
    team("Los Angeles Dodgers", "LAD", 34.9739, -119.94, "logos/dodgers.png", Division::NlWest, "California"),
    team("Miami Marlins", "MIA", 25.7781, -80.2196, "logos/marlins.png", Division::NlEast, "Florida"),
    team("Milwaukee Brewers", "MIL", 44.0281, -88.9713, "logos/brewers.png", Division::NlCentral, "Wisconsin"),
    team("Minnesota Twins", "MIN", 44.9817, -94.2774, "logos/twins.png", Division::AlCentral, "Minnesota"),
    team("New York Mets", "NYM", 42.7571, -75.2458, "logos/mets.png", Division::NlEast, "New York"),
    team("New York Yankees", "NYY", 41.2296, -72.9262, "logos/yankees.png", Division::AlEast, "New York"),
    team("Oakland Athletics", "OAK", 39.7516, -122.005, "logos/athletics.png", Division::AlWest, "California"),
    team("Philadelphia Phillies", "PHI", 39.9059, -75.1665, "logos/phillies.png", Division::NlEast, "Pennsylvania"),
    team("Pittsburgh Pirates", "PIT", 40.4469, -80.0058, "logos/pirates.png", Division::NlCentral, "Pennsylvania"),
    team("San Diego Padres", "SD", 32.7076, -117.1569, "logos/padres.png", Division::NlWest, "California"),
    team("San Francisco Giants", "SF", 37.2786, -122.4093, "logos/giants.png", Division::NlWest, "California"),
    team("Seattle Mariners", "SEA", 47.5913, -122.3325, "logos/mariners.png", Division::AlWest, "Washington"),
    team("St. Louis Cardinals", "STL", 38.6226, -91.1928, "logos/cards.png", Division::NlCentral, "Missouri"),
    team("Tampa Bay Rays", "TB", 27.7682, -82.6534, "logos/rays.png", Division::AlEast, "Florida"),
    team("Texas Rangers", "TEX", 32.7511, -97.0824, "logos/rangers.png", Division::AlWest, "Texas"),
    team("Toronto Blue Jays", "TOR", 47.6415, -79.3891, "logos/jays.png", Division::AlEast, "Ontario"),
    team("Washington Nationals", "WSH", 36.873, -77.0074, "logos/nats.png", Division::NlEast, "Virginia"),
];

/// The full roster
pub fn roster() -> &'static [Team] {
    &ROSTER
}

/// Look up a team by abbreviation (trimmed, case-insensitive)
pub fn find_by_abbreviation(abbr: &str) -> Option<&'static Team> {
    let wanted = abbr.trim();
    ROSTER
        .iter()
        .find(|t| t.abbreviation.eq_ignore_ascii_case(wanted))
}

/// Look up a team by full name (trimmed, case-insensitive)
pub fn find_by_name(name: &str) -> Option<&'static Team> {
    let wanted = name.trim().to_lowercase();
    ROSTER.iter().find(|t| t.name.to_lowercase() == wanted)
}

/// Abbreviations of the clubs in a division
pub fn division_members(division: Division) -> Vec<&'static str> {
    ROSTER
        .iter()
        .filter(|t| t.division == division)
        .map(|t| t.abbreviation)
        .collect()
}

/// Abbreviations of the clubs in a league
pub fn league_members(league: League) -> Vec<&'static str> {
    ROSTER
        .iter()
        .filter(|t| t.league == league)
        .map(|t| t.abbreviation)
        .collect()
}
