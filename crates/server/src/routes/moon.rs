use axum::{
    Router,
    response::Json as ResponseJson,
    routing::get,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use services::services::moon_phase::{MoonInfo, get_moon_phase, moon_phase_for_date};
use utils::response::ApiResponse;

use crate::{AppState, error::ApiError, extract::Query};

#[derive(Debug, Default, Deserialize)]
pub struct MoonQuery {
    /// RFC 3339 instant; takes precedence over `date`
    pub at: Option<DateTime<Utc>>,
    pub date: Option<NaiveDate>,
}

/// GET /api/moon?at=2026-10-19T20:00:00Z or ?date=2026-10-19
pub async fn get_moon(
    Query(query): Query<MoonQuery>,
) -> Result<ResponseJson<ApiResponse<MoonInfo>>, ApiError> {
    let info = match (query.at, query.date) {
        (Some(at), _) => get_moon_phase(at)?,
        (None, Some(date)) => moon_phase_for_date(date)?,
        (None, None) => get_moon_phase(Utc::now())?,
    };
    Ok(ResponseJson(ApiResponse::success(info)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/moon", get(get_moon))
}

#[cfg(test)]
mod tests {
    use services::services::moon_phase::MoonPhase;

    use super::*;

    #[tokio::test]
    async fn test_instant_takes_precedence_over_date() {
        let at = DateTime::parse_from_rfc3339("2024-01-25T17:54:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let response = get_moon(Query(MoonQuery {
            at: Some(at),
            date: NaiveDate::from_ymd_opt(2024, 1, 11),
        }))
        .await
        .unwrap();

        let info = response.0.into_data().unwrap();
        assert_eq!(info.at, at);
        assert_eq!(info.phase, MoonPhase::FullMoon);
    }

    #[tokio::test]
    async fn test_end_of_calendar_is_bad_request() {
        let err = get_moon(Query(MoonQuery {
            at: None,
            date: Some(NaiveDate::MAX),
        }))
        .await
        .unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_defaults_to_now() {
        let before = Utc::now();
        let response = get_moon(Query(MoonQuery::default())).await.unwrap();
        assert!(response.0.into_data().unwrap().at >= before);
    }
}
