//! `Query` and `Path` extractors whose rejections go through [`ApiError`],
//! so malformed parameters get the same `ApiResponse` body as every other
//! error.

use axum::extract::FromRequestParts;

use crate::error::ApiError;

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

#[cfg(test)]
mod tests {
    use axum::{
        body::to_bytes,
        http::{Request, StatusCode, header},
        response::IntoResponse,
    };
    use chrono::NaiveDate;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct BirthQuery {
        birth_date: NaiveDate,
    }

    async fn extract_query(uri: &str) -> Result<Query<BirthQuery>, ApiError> {
        let (mut parts, _) = Request::get(uri).body(()).unwrap().into_parts();
        Query::<BirthQuery>::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_valid_query_is_extracted() {
        let Query(query) = extract_query("/api/numerology/life-path?birth_date=1990-05-15")
            .await
            .unwrap();
        assert_eq!(query.birth_date, NaiveDate::from_ymd_opt(1990, 5, 15).unwrap());
    }

    #[tokio::test]
    async fn test_malformed_query_gets_json_envelope() {
        let err = extract_query("/api/numerology/life-path?birth_date=15-05-1990")
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["data"].is_null());
        assert!(
            json["message"]
                .as_str()
                .unwrap()
                .contains("Failed to deserialize query string")
        );
    }

    #[tokio::test]
    async fn test_missing_query_parameter_is_bad_request() {
        let err = extract_query("/api/numerology/life-path").await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
