use axum::{
    Router,
    http::{HeaderValue, Method},
};
use chrono::NaiveDate;
use serde::Deserialize;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::AppState;

pub mod biorhythm;
pub mod daily;
pub mod dreams;
pub mod health;
pub mod moon;
pub mod numerology;

/// `?date=YYYY-MM-DD`, defaulting to today
#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<NaiveDate>,
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let allow_origin = match origin.map(HeaderValue::from_str) {
        Some(Ok(value)) => AllowOrigin::exact(value),
        Some(Err(_)) => {
            warn!(origin = ?origin, "Invalid SPIRITHUB_CORS_ORIGIN, allowing any origin");
            AllowOrigin::from(Any)
        }
        None => AllowOrigin::from(Any),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET])
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(health::router())
        .merge(numerology::router())
        .merge(biorhythm::router())
        .merge(moon::router())
        .merge(dreams::router())
        .merge(daily::router());

    Router::new()
        .nest("/api", api)
        .layer(cors_layer(state.config().cors_origin.as_deref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
