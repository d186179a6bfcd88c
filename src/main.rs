use actix_web::{middleware, web, App, HttpServer};
use reqwest::Url;
use std::sync::{Arc, Mutex};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

mod handlers;

use handlers::{health, session, team, teams};
use mlbpay::view::{Dashboard, MemoryStore};
use mlbpay::AppConfig;

/// Application state shared across handlers
pub struct AppState {
    pub dashboard: Dashboard,
    pub detail_page: Url,
    pub session: Mutex<MemoryStore>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };
    let detail_page = config
        .detail_page()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    info!(
        "Loading payroll from {} and performance from {}",
        config.payroll_source, config.performance_source
    );
    let dashboard = Dashboard::load(&config.payroll(), &config.performance()).await;

    let app_state = Arc::new(AppState {
        dashboard,
        detail_page,
        session: Mutex::new(MemoryStore::default()),
    });

    let addr = config.bind_addr();
    info!("Starting payroll atlas API server at http://{}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(middleware::Logger::default())
            .route("/health", web::get().to(health::health_check))
            .route("/teams", web::get().to(teams::list_teams))
            .route("/teams/visibility", web::post().to(teams::visibility))
            .route("/teams/visibility/all", web::post().to(teams::select_all))
            .route("/teams/{abbr}/link", web::get().to(teams::team_link))
            .route("/states", web::get().to(teams::list_states))
            .route("/states/{state}", web::get().to(teams::state_shade))
            .route("/legend", web::get().to(teams::tier_legend))
            .route("/team", web::get().to(team::team_detail))
            .route("/team/timeline", web::get().to(team::timeline))
            .route("/team/allocation", web::get().to(team::allocation))
            .route("/team/comparison", web::get().to(team::comparison))
            .route("/session/intro", web::get().to(session::intro_status))
            .route("/session/intro/dismiss", web::post().to(session::dismiss_intro))
    })
    .bind(&addr)?
    .run()
    .await
}
