use axum::{
    Router,
    extract::State,
    response::Json as ResponseJson,
    routing::get,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use services::services::{
    biorhythm::{BiorhythmReading, CriticalDay, calculate_biorhythm, critical_days, forecast},
    numerology::validate_birth_date,
};
use ts_rs::TS;
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError, extract::Query};

/// Chart length when `days` is not given
pub const DEFAULT_CHART_DAYS: u32 = 30;

#[derive(Debug, Deserialize)]
pub struct BiorhythmQuery {
    pub birth_date: NaiveDate,
    pub date: Option<NaiveDate>,
    pub days: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct CriticalDaysQuery {
    pub birth_date: NaiveDate,
    pub from: Option<NaiveDate>,
    pub horizon: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct BiorhythmChart {
    pub reading: BiorhythmReading,
    pub forecast: Vec<BiorhythmReading>,
}

/// GET /api/biorhythm?birth_date=YYYY-MM-DD&date=YYYY-MM-DD&days=30
pub async fn get_biorhythm(
    State(state): State<AppState>,
    Query(query): Query<BiorhythmQuery>,
) -> Result<ResponseJson<ApiResponse<BiorhythmChart>>, ApiError> {
    validate_birth_date(query.birth_date, state.today())?;
    let date = state.date_or_today(query.date);
    let threshold = state.config().critical_threshold;

    let reading = calculate_biorhythm(query.birth_date, date, threshold)?;
    let forecast = forecast(
        query.birth_date,
        date,
        query.days.unwrap_or(DEFAULT_CHART_DAYS),
        threshold,
    )?;

    Ok(ResponseJson(ApiResponse::success(BiorhythmChart {
        reading,
        forecast,
    })))
}

/// GET /api/biorhythm/critical-days?birth_date=YYYY-MM-DD&from=YYYY-MM-DD&horizon=30
pub async fn get_critical_days(
    State(state): State<AppState>,
    Query(query): Query<CriticalDaysQuery>,
) -> Result<ResponseJson<ApiResponse<Vec<CriticalDay>>>, ApiError> {
    validate_birth_date(query.birth_date, state.today())?;
    let from = state.date_or_today(query.from);

    let days = critical_days(
        query.birth_date,
        from,
        query.horizon.unwrap_or(DEFAULT_CHART_DAYS),
        state.config().critical_threshold,
    )?;

    Ok(ResponseJson(ApiResponse::success(days)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/biorhythm", get(get_biorhythm))
        .route("/biorhythm/critical-days", get(get_critical_days))
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
    async fn test_chart_defaults_to_thirty_days() {
        let state = test_support::state().await;
        let response = get_biorhythm(
            State(state),
            Query(BiorhythmQuery {
                birth_date: date(1990, 5, 15),
                date: Some(date(2026, 10, 19)),
                days: None,
            }),
        )
        .await
        .unwrap();

        let chart = response.0.into_data().unwrap();
        assert_eq!(chart.forecast.len(), DEFAULT_CHART_DAYS as usize);
        assert_eq!(chart.forecast[0], chart.reading);
    }

    #[tokio::test]
    async fn test_chart_rejects_oversized_range() {
        let state = test_support::state().await;
        let err = get_biorhythm(
            State(state),
            Query(BiorhythmQuery {
                birth_date: date(1990, 5, 15),
                date: Some(date(2026, 10, 19)),
                days: Some(365),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_date_before_birth_is_bad_request() {
        let state = test_support::state().await;
        let err = get_biorhythm(
            State(state),
            Query(BiorhythmQuery {
                birth_date: date(1990, 5, 15),
                date: Some(date(1980, 1, 1)),
                days: None,
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_critical_days_include_birth_day() {
        let state = test_support::state().await;
        let birth = date(2000, 1, 1);
        let response = get_critical_days(
            State(state),
            Query(CriticalDaysQuery {
                birth_date: birth,
                from: Some(birth),
                horizon: Some(10),
            }),
        )
        .await
        .unwrap();

        let days = response.0.into_data().unwrap();
        assert_eq!(days[0].date, birth);
        assert_eq!(days[0].cycles.len(), 3);
    }
}
