use actix_web::{web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use crate::AppState;
use mlbpay::core::comparison::{Scope, SortOrder};
use mlbpay::data::roster::find_by_abbreviation;
use mlbpay::error::AppError;
use mlbpay::view::TeamQuery;

/// Comparison selections; both default when absent
#[derive(Debug, Default, Deserialize)]
pub struct ComparisonParams {
    pub scope: Option<Scope>,
    pub sort: Option<SortOrder>,
}

/// A single team, by abbreviation and optionally by full name
#[derive(Debug, Deserialize)]
pub struct TeamParams {
    pub abbr: String,
    pub name: Option<String>,
}

impl TeamParams {
    fn validate(&self) -> Result<&str, AppError> {
        let abbr = self.abbr.trim();
        if abbr.is_empty() {
            return Err(AppError::ValidationError("abbr must not be empty".to_string()));
        }
        Ok(abbr)
    }

    /// Explicit name, else the roster name, else nothing
    fn name(&self) -> String {
        self.name
            .clone()
            .or_else(|| find_by_abbreviation(&self.abbr).map(|t| t.name.to_string()))
            .unwrap_or_default()
    }
}

/// Detail page: header plus every chart, each ready or with its message
pub async fn team_detail(
    state: web::Data<Arc<AppState>>,
    query: web::Query<TeamQuery>,
    params: web::Query<ComparisonParams>,
) -> HttpResponse {
    let detail = state.dashboard.team_detail(
        query.into_inner(),
        params.scope.unwrap_or_default(),
        params.sort.unwrap_or_default(),
    );
    HttpResponse::Ok().json(detail)
}

/// Wins vs spending series
pub async fn timeline(
    state: web::Data<Arc<AppState>>,
    params: web::Query<TeamParams>,
) -> Result<HttpResponse, AppError> {
    let abbr = params.validate()?;
    Ok(HttpResponse::Ok().json(state.dashboard.timeline(abbr, &params.name())))
}

/// Payroll allocation pie
pub async fn allocation(
    state: web::Data<Arc<AppState>>,
    params: web::Query<TeamParams>,
) -> Result<HttpResponse, AppError> {
    let abbr = params.validate()?;
    Ok(HttpResponse::Ok().json(state.dashboard.allocation(abbr)))
}

/// Spending-per-win comparison bars
pub async fn comparison(
    state: web::Data<Arc<AppState>>,
    params: web::Query<TeamParams>,
    selection: web::Query<ComparisonParams>,
) -> Result<HttpResponse, AppError> {
    let abbr = params.validate()?;
    let view = state.dashboard.comparison(
        abbr,
        selection.scope.unwrap_or_default(),
        selection.sort.unwrap_or_default(),
    );
    Ok(HttpResponse::Ok().json(view))
}
