use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::AppState;
use mlbpay::core::tiers::legend;
use mlbpay::error::AppError;
use mlbpay::view::{FilterGroup, MapFilter, MapView, Panel, TeamLink, Visibility};

#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub link: TeamLink,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectAllRequest {
    pub filter: MapFilter,
    pub group: FilterGroup,
}

#[derive(Debug, Serialize)]
pub struct SelectAllResponse {
    pub filter: MapFilter,
    pub visibility: Vec<Visibility>,
}

fn map_view(state: &AppState) -> Result<&MapView, AppError> {
    match state.dashboard.map() {
        Panel::Ready(map) => Ok(map),
        Panel::Unavailable(message) => Err(AppError::DataUnavailable(message)),
    }
}

/// Marker cards for every team, in rank order
pub async fn list_teams(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let map = map_view(&state)?;
    Ok(HttpResponse::Ok().json(map.cards()))
}

/// Navigation link for a clicked marker
pub async fn team_link(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let abbr = path.into_inner();
    let link = map_view(&state)?
        .click(&abbr)
        .ok_or_else(|| AppError::NotFound(format!("team {}", abbr)))?;

    let url = link.url(&state.detail_page).to_string();
    debug!("Link for {}: {}", abbr, url);
    Ok(HttpResponse::Ok().json(LinkResponse { link, url }))
}

/// Marker visibility under a filter selection
pub async fn visibility(
    state: web::Data<Arc<AppState>>,
    filter: web::Json<MapFilter>,
) -> Result<HttpResponse, AppError> {
    let map = map_view(&state)?;
    Ok(HttpResponse::Ok().json(map.filter(&filter)))
}

/// "Select all" on one filter group
pub async fn select_all(
    state: web::Data<Arc<AppState>>,
    request: web::Json<SelectAllRequest>,
) -> Result<HttpResponse, AppError> {
    let map = map_view(&state)?;
    let SelectAllRequest { mut filter, group } = request.into_inner();
    let visibility = map.select_all(&mut filter, group);
    Ok(HttpResponse::Ok().json(SelectAllResponse { filter, visibility }))
}

/// Shades for every state with a team
pub async fn list_states(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let map = map_view(&state)?;
    Ok(HttpResponse::Ok().json(map.state_shades()))
}

/// Shade for one state; states without a team get the empty fill
pub async fn state_shade(
    state: web::Data<Arc<AppState>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let map = map_view(&state)?;
    Ok(HttpResponse::Ok().json(map.state_shade(path.trim())))
}

/// Tier legend
pub async fn tier_legend() -> HttpResponse {
    HttpResponse::Ok().json(legend())
}
