use actix_web::{web, HttpResponse};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;
use mlbpay::error::AppError;
use mlbpay::view::IntroState;

#[derive(Debug, Serialize)]
pub struct IntroResponse {
    pub play_intro: bool,
}

/// Whether the intro slideshow should play
pub async fn intro_status(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let store = state
        .session
        .lock()
        .map_err(|_| AppError::DataUnavailable("session store unavailable".to_string()))?;
    let intro = IntroState::read(&*store);
    Ok(HttpResponse::Ok().json(IntroResponse {
        play_intro: intro.should_play(),
    }))
}

/// Mark the intro as seen for the rest of the session
pub async fn dismiss_intro(state: web::Data<Arc<AppState>>) -> Result<HttpResponse, AppError> {
    let mut store = state
        .session
        .lock()
        .map_err(|_| AppError::DataUnavailable("session store unavailable".to_string()))?;
    let mut intro = IntroState::read(&*store);
    intro.dismiss(&mut *store);
    Ok(HttpResponse::Ok().json(IntroResponse {
        play_intro: intro.should_play(),
    }))
}
