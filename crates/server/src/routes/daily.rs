//! Daily widgets. Selection depends only on the date, so every visitor sees
//! the same content on a given day.

use axum::{
    Router,
    extract::State,
    response::Json as ResponseJson,
    routing::get,
};
use services::services::daily_content::{DailyDream, DailyEnergy, DailyOracle};
use utils::response::ApiResponse;

use super::DateQuery;
use crate::{AppState, error::ApiError, extract::Query};

pub async fn get_daily_dream(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<ResponseJson<ApiResponse<DailyDream>>, ApiError> {
    let dream = state
        .daily()
        .daily_dream(state.date_or_today(query.date))
        .await?;
    Ok(ResponseJson(ApiResponse::success(dream)))
}

pub async fn get_daily_energy(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<ResponseJson<ApiResponse<DailyEnergy>>, ApiError> {
    let energy = state
        .daily()
        .daily_energy(state.date_or_today(query.date))
        .await?;
    Ok(ResponseJson(ApiResponse::success(energy)))
}

pub async fn get_daily_oracle(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<ResponseJson<ApiResponse<DailyOracle>>, ApiError> {
    let oracle = state
        .daily()
        .daily_oracle(state.date_or_today(query.date))
        .await?;
    Ok(ResponseJson(ApiResponse::success(oracle)))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/daily",
        Router::new()
            .route("/dream", get(get_daily_dream))
            .route("/energy", get(get_daily_energy))
            .route("/oracle", get(get_daily_oracle)),
    )
}
