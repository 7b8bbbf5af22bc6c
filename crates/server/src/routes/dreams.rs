use axum::{
    Router,
    extract::State,
    response::Json as ResponseJson,
    routing::get,
};
use db::models::dream_symbol::DreamSymbol;
use serde::Deserialize;
use utils::response::ApiResponse;

use crate::{
    AppState,
    error::ApiError,
    extract::{Path, Query},
};

#[derive(Debug, Default, Deserialize)]
pub struct DreamListQuery {
    pub letter: Option<String>,
    pub q: Option<String>,
    pub limit: Option<i64>,
}

/// GET /api/dreams?q=...&limit=20 or /api/dreams?letter=S
pub async fn list_dreams(
    State(state): State<AppState>,
    Query(query): Query<DreamListQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<DreamSymbol>>>, ApiError> {
    let symbols = match (query.q.as_deref(), query.letter.as_deref()) {
        (Some(q), _) => state.dreams().search(q, query.limit).await?,
        (None, Some(letter)) => state.dreams().by_letter(letter).await?,
        (None, None) => {
            return Err(ApiError::BadRequest(
                "either `q` or `letter` is required".to_string(),
            ));
        }
    };
    Ok(ResponseJson(ApiResponse::success(symbols)))
}

/// GET /api/dreams/{slug}
pub async fn get_dream(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ResponseJson<ApiResponse<DreamSymbol>>, ApiError> {
    let symbol = state.dreams().get(&slug).await?;
    Ok(ResponseJson(ApiResponse::success(symbol)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dreams", get(list_dreams))
        .route("/dreams/{slug}", get(get_dream))
}
