use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::AppState;
use mlbpay::models::HealthResponse;

/// Health check endpoint; reports which tables loaded
pub async fn health_check(state: web::Data<Arc<AppState>>) -> impl Responder {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        payroll_loaded: state.dashboard.payroll_loaded(),
        performance_loaded: state.dashboard.performance_loaded(),
    };

    HttpResponse::Ok().json(response)
}
