use axum::{
    Json,
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::services::{
    biorhythm::BiorhythmError, compatibility::CompatibilityError,
    daily_content::DailyContentError, dream_dictionary::DreamDictionaryError,
    interpretations::InterpretationError, moon_phase::MoonPhaseError,
    numerology::NumerologyError,
};
use thiserror::Error;
use tracing::error;
use utils::response::ApiResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Numerology(#[from] NumerologyError),
    #[error(transparent)]
    Compatibility(#[from] CompatibilityError),
    #[error(transparent)]
    Biorhythm(#[from] BiorhythmError),
    #[error(transparent)]
    MoonPhase(#[from] MoonPhaseError),
    #[error(transparent)]
    Interpretation(#[from] InterpretationError),
    #[error(transparent)]
    DreamDictionary(#[from] DreamDictionaryError),
    #[error(transparent)]
    DailyContent(#[from] DailyContentError),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("{}", .0.body_text())]
    Query(#[from] QueryRejection),
    #[error("{}", .0.body_text())]
    Path(#[from] PathRejection),
    #[error("{0}")]
    BadRequest(String),
}

fn interpretation_status(err: &InterpretationError) -> StatusCode {
    match err {
        InterpretationError::Numerology(_) => StatusCode::BAD_REQUEST,
        InterpretationError::NotFound { .. } => StatusCode::NOT_FOUND,
        InterpretationError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Numerology(_)
            | ApiError::Compatibility(_)
            | ApiError::Biorhythm(_)
            | ApiError::MoonPhase(_)
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Query(rejection) => rejection.status(),
            ApiError::Path(rejection) => rejection.status(),
            ApiError::Interpretation(err) => interpretation_status(err),
            ApiError::DreamDictionary(err) => match err {
                DreamDictionaryError::NotFound(_) => StatusCode::NOT_FOUND,
                DreamDictionaryError::InvalidLetter(_) | DreamDictionaryError::QueryTooShort => {
                    StatusCode::BAD_REQUEST
                }
                DreamDictionaryError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::DailyContent(err) => match err {
                DailyContentError::Numerology(_) | DailyContentError::MoonPhase(_) => {
                    StatusCode::BAD_REQUEST
                }
                DailyContentError::NoContent(_) => StatusCode::NOT_FOUND,
                DailyContentError::Interpretation(inner) => interpretation_status(inner),
                DailyContentError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = if status.is_server_error() {
            error!(error = %self, "Request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ApiResponse::<()>::error(&message))).into_response()
    }
}
