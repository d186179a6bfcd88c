//! National map view
//!
//! Holds the tiered roster once it is built and answers everything the map
//! asks for: marker cards, navigation links, marker visibility and state
//! shading.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::join::build_tiered_roster;
use crate::core::tiers::{state_shade, state_shades, StateShade};
use crate::data::csv_loader::PayrollRow;
use crate::data::roster::roster;
use crate::models::{TeamCard, TieredTeam};
use crate::view::filter::{FilterGroup, MapFilter, Visibility};
use crate::view::interaction::InteractionSurface;
use crate::view::navigation::TeamLink;

#[derive(Debug, Clone)]
pub struct MapView {
    teams: Arc<Vec<TieredTeam>>,
}

impl MapView {
    pub fn new(teams: Vec<TieredTeam>) -> Self {
        Self {
            teams: Arc::new(teams),
        }
    }

    /// Join the payroll snapshot onto the static roster and tier it
    pub fn from_payroll(rows: &[PayrollRow]) -> Self {
        Self::new(build_tiered_roster(roster(), rows))
    }

    /// Teams in rank order
    pub fn teams(&self) -> &[TieredTeam] {
        &self.teams
    }

    pub fn find(&self, abbr: &str) -> Option<&TieredTeam> {
        find_in(&self.teams, abbr)
    }

    pub fn cards(&self) -> Vec<TeamCard> {
        self.teams.iter().map(|t| t.card()).collect()
    }

    pub fn hover(&self, abbr: &str) -> Option<TeamCard> {
        self.find(abbr).map(|t| t.card())
    }

    pub fn click(&self, abbr: &str) -> Option<TeamLink> {
        self.find(abbr).map(TeamLink::for_team)
    }

    pub fn filter(&self, filter: &MapFilter) -> Vec<Visibility> {
        filter.visibility(&self.teams)
    }

    /// Apply a group's "select all" box and return the new visibility
    pub fn select_all(&self, filter: &mut MapFilter, group: FilterGroup) -> Vec<Visibility> {
        filter.toggle_all(group);
        self.filter(filter)
    }

    pub fn state_shade(&self, state: &str) -> StateShade {
        state_shade(state, &self.teams)
    }

    pub fn state_shades(&self) -> BTreeMap<&'static str, StateShade> {
        state_shades(&self.teams)
    }

    /// Register the map's handlers on the rendering surface
    pub fn bind<S: InteractionSurface + ?Sized>(&self, surface: &mut S) {
        let teams = Arc::clone(&self.teams);
        surface.on_hover(Box::new(move |abbr: &str| find_in(&teams, abbr).map(|t| t.card())));

        let teams = Arc::clone(&self.teams);
        surface.on_click(Box::new(move |abbr: &str| find_in(&teams, abbr).map(TeamLink::for_team)));

        let teams = Arc::clone(&self.teams);
        surface.on_filter_change(Box::new(move |filter: &MapFilter| filter.visibility(&teams)));
    }
}

fn find_in<'a>(teams: &'a [TieredTeam], abbr: &str) -> Option<&'a TieredTeam> {
    let wanted = abbr.trim();
    teams
        .iter()
        .find(|t| t.team().abbreviation.eq_ignore_ascii_case(wanted))
}
