use axum::{
    http::{header, Method},
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

pub use config::Config;
pub use services::AppState;

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let mut router = Router::new().route("/health", get(handlers::health_check));

    if app_state.config.metrics_enabled {
        router = router.route("/metrics", get(handlers::metrics_handler));
    }

    let mut router = router
        .nest("/api", api_routes())
        .with_state(app_state.clone())
        .layer(middleware::from_fn(
            middlewares::metrics::metrics_middleware,
        ))
        .layer(middleware::from_fn(
            middlewares::trace::trace_context_middleware,
        ));

    if app_state.config.cors_allow_any {
        let cors = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
            .allow_origin(tower_http::cors::Any);
        router = router.layer(cors);
    }

    router.layer(TraceLayer::new_for_http())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/problems",
            get(handlers::problems::list_problems).post(handlers::problems::create_problem),
        )
        .route(
            "/problems/{id}",
            get(handlers::problems::get_problem)
                .put(handlers::problems::update_problem)
                .delete(handlers::problems::delete_problem),
        )
        .route(
            "/problems/{id}/solutions",
            get(handlers::problems::list_solutions).post(handlers::problems::add_solution),
        )
        .route(
            "/sessions",
            get(handlers::sessions::list_sessions).post(handlers::sessions::create_session),
        )
        .route(
            "/sessions/{id}",
            delete(handlers::sessions::delete_session),
        )
        .route("/stats", get(handlers::stats::get_stats))
        .route("/export", get(handlers::transfer::export_data))
        .route("/import", post(handlers::transfer::import_data))
        .route("/leetcode/analyze", post(handlers::leetcode::analyze_problem))
        .route("/leetcode/profile", post(handlers::leetcode::analyze_profile))
}
