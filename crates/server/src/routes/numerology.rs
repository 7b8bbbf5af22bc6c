//! Numerology calculators: Life Path, name numbers, compatibility and day numbers.

use std::str::FromStr;

use axum::{
    Router,
    extract::State,
    response::Json as ResponseJson,
    routing::get,
};
use chrono::NaiveDate;
use db::models::interpretation::{InterpretationCategory, NumberInterpretation};
use serde::{Deserialize, Serialize};
use services::services::{
    compatibility::{Compatibility, calculate_compatibility},
    daily_content::PersonalDayReport,
    interpretations::{DailyNumberReport, LifePathReport, NameReport},
    numerology::{LifePath, calculate_destiny_number, calculate_life_path, validate_birth_date},
};
use ts_rs::TS;
use utils::response::ApiResponse;

use super::DateQuery;
use crate::{
    AppState,
    error::ApiError,
    extract::{Path, Query},
};

#[derive(Debug, Deserialize)]
pub struct BirthDateQuery {
    pub birth_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CompatibilityQuery {
    pub first: NaiveDate,
    pub second: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct PersonalDayQuery {
    pub birth_date: NaiveDate,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct DestinyResponse {
    pub name: String,
    pub destiny: u32,
    pub interpretation: Option<NumberInterpretation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct CompatibilityResponse {
    pub first: LifePath,
    pub second: LifePath,
    pub compatibility: Compatibility,
}

/// GET /api/numerology/life-path?birth_date=YYYY-MM-DD
pub async fn get_life_path(
    State(state): State<AppState>,
    Query(query): Query<BirthDateQuery>,
) -> Result<ResponseJson<ApiResponse<LifePathReport>>, ApiError> {
    let report = state
        .interpretations()
        .life_path_report(query.birth_date, state.today())
        .await?;
    Ok(ResponseJson(ApiResponse::success(report)))
}

/// GET /api/numerology/destiny?name=...
pub async fn get_destiny(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<ResponseJson<ApiResponse<DestinyResponse>>, ApiError> {
    let destiny = calculate_destiny_number(&query.name)?;
    let interpretation = state
        .interpretations()
        .get(InterpretationCategory::Destiny, destiny)
        .await?;

    Ok(ResponseJson(ApiResponse::success(DestinyResponse {
        name: query.name.trim().to_string(),
        destiny,
        interpretation,
    })))
}

/// GET /api/numerology/name?name=...
/// Destiny, Soul Urge and Personality together
pub async fn get_name_report(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<ResponseJson<ApiResponse<NameReport>>, ApiError> {
    let report = state.interpretations().name_report(&query.name).await?;
    Ok(ResponseJson(ApiResponse::success(report)))
}

/// GET /api/numerology/compatibility?first=YYYY-MM-DD&second=YYYY-MM-DD
pub async fn get_compatibility(
    State(state): State<AppState>,
    Query(query): Query<CompatibilityQuery>,
) -> Result<ResponseJson<ApiResponse<CompatibilityResponse>>, ApiError> {
    let today = state.today();
    validate_birth_date(query.first, today)?;
    validate_birth_date(query.second, today)?;

    let first = calculate_life_path(query.first);
    let second = calculate_life_path(query.second);
    let compatibility = calculate_compatibility(first.number, second.number)?;

    Ok(ResponseJson(ApiResponse::success(CompatibilityResponse {
        first,
        second,
        compatibility,
    })))
}

/// GET /api/numerology/daily?date=YYYY-MM-DD
pub async fn get_daily_number(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<ResponseJson<ApiResponse<DailyNumberReport>>, ApiError> {
    let date = state.date_or_today(query.date);
    let report = state.interpretations().daily_report(date).await?;
    Ok(ResponseJson(ApiResponse::success(report)))
}

/// GET /api/numerology/personal-day?birth_date=YYYY-MM-DD&date=YYYY-MM-DD
pub async fn get_personal_day(
    State(state): State<AppState>,
    Query(query): Query<PersonalDayQuery>,
) -> Result<ResponseJson<ApiResponse<PersonalDayReport>>, ApiError> {
    let date = state.date_or_today(query.date);
    let report = state.daily().personal_day(query.birth_date, date).await?;
    Ok(ResponseJson(ApiResponse::success(report)))
}

fn parse_category(category: &str) -> Result<InterpretationCategory, ApiError> {
    InterpretationCategory::from_str(category)
        .map_err(|_| ApiError::BadRequest(format!("unknown interpretation category: {category}")))
}

/// GET /api/numerology/interpretations/{category}
pub async fn list_interpretations(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<ResponseJson<ApiResponse<Vec<NumberInterpretation>>>, ApiError> {
    let category = parse_category(&category)?;
    let interpretations = state.interpretations().list(category).await?;
    Ok(ResponseJson(ApiResponse::success(interpretations)))
}

/// GET /api/numerology/interpretations/{category}/{number}
pub async fn get_interpretation(
    State(state): State<AppState>,
    Path((category, number)): Path<(String, u32)>,
) -> Result<ResponseJson<ApiResponse<NumberInterpretation>>, ApiError> {
    let category = parse_category(&category)?;
    let interpretation = state.interpretations().require(category, number).await?;
    Ok(ResponseJson(ApiResponse::success(interpretation)))
}

pub fn router() -> Router<AppState> {
    Router::new().nest(
        "/numerology",
        Router::new()
            .route("/life-path", get(get_life_path))
            .route("/destiny", get(get_destiny))
            .route("/name", get(get_name_report))
            .route("/compatibility", get(get_compatibility))
            .route("/daily", get(get_daily_number))
            .route("/personal-day", get(get_personal_day))
            .route("/interpretations/{category}", get(list_interpretations))
            .route("/interpretations/{category}/{number}", get(get_interpretation)),
    )
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;
    use crate::state::test_support;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_life_path_handler() {
        let state = test_support::state().await;
        let response = get_life_path(
            State(state),
            Query(BirthDateQuery {
                birth_date: date(1990, 5, 15),
            }),
        )
        .await
        .unwrap();

        let report = response.0.into_data().unwrap();
        assert_eq!(report.life_path.number, 3);
        assert_eq!(report.interpretation.unwrap().title, "Comunicatorul");
    }

    #[tokio::test]
    async fn test_life_path_rejects_future_birth_date() {
        let state = test_support::state().await;
        let err = get_life_path(
            State(state),
            Query(BirthDateQuery {
                birth_date: date(2999, 1, 1),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_destiny_handler() {
        let state = test_support::state().await;
        let response = get_destiny(
            State(state),
            Query(NameQuery {
                name: " Ștefan ".to_string(),
            }),
        )
        .await
        .unwrap();

        let destiny = response.0.into_data().unwrap();
        assert_eq!(destiny.name, "Ștefan");
        assert_eq!(destiny.destiny, 2);
        assert_eq!(destiny.interpretation.unwrap().title, "Mediatorul");
    }

    #[tokio::test]
    async fn test_destiny_rejects_digits() {
        let state = test_support::state().await;
        let err = get_destiny(
            State(state),
            Query(NameQuery {
                name: "R2D2".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_compatibility_handler() {
        let state = test_support::state().await;
        let response = get_compatibility(
            State(state),
            Query(CompatibilityQuery {
                first: date(1990, 5, 15),
                second: date(1987, 11, 29),
            }),
        )
        .await
        .unwrap();

        let result = response.0.into_data().unwrap();
        assert_eq!(result.first.number, 3);
        assert_eq!(result.second.number, 11);
        assert_eq!(result.compatibility.percentage, 70);
    }

    #[tokio::test]
    async fn test_daily_number_for_given_date() {
        let state = test_support::state().await;
        let response = get_daily_number(
            State(state),
            Query(DateQuery {
                date: Some(date(2026, 10, 19)),
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.0.into_data().unwrap().number, 3);
    }

    #[tokio::test]
    async fn test_interpretation_lookup() {
        let state = test_support::state().await;

        let found = get_interpretation(
            State(state.clone()),
            Path(("life_path".to_string(), 22)),
        )
        .await
        .unwrap();
        assert_eq!(found.0.into_data().unwrap().title, "Maestrul Constructor");

        let missing = get_interpretation(State(state.clone()), Path(("life_path".to_string(), 10)))
            .await
            .unwrap_err();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let unknown = get_interpretation(State(state), Path(("zodiac".to_string(), 1)))
            .await
            .unwrap_err();
        assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_interpretations() {
        let state = test_support::state().await;
        let response = list_interpretations(State(state), Path("destiny".to_string()))
            .await
            .unwrap();
        assert_eq!(response.0.into_data().unwrap().len(), 12);
    }
}
