//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::pricing::responses::PricingErrorResponse;
use crate::pricing::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn pricing_error_type(err: &PricingError) -> &'static str {
    match err {
        PricingError::PeriodNotFound { .. } => "period_not_found",
        PricingError::RoomTypeRateNotFound { .. } => "room_type_rate_not_found",
        PricingError::InvalidOfferConfiguration { .. } => "invalid_offer_configuration",
        PricingError::InvalidStayRange { .. } => "invalid_stay_range",
        PricingError::InvalidOccupancy => "invalid_occupancy",
        PricingError::IncompletePricing { .. } => "incomplete_pricing",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Pricing(err) => {
                tracing::warn!("Pricing error: {}", err);
                let status = match &err {
                    PricingError::InvalidStayRange { .. } | PricingError::InvalidOccupancy => {
                        StatusCode::BAD_REQUEST
                    }
                    _ => StatusCode::UNPROCESSABLE_ENTITY,
                };
                let details = match &err {
                    PricingError::IncompletePricing { errors } => Some(serde_json::json!({
                        "errors": errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
                    })),
                    _ => None,
                };
                let body = PricingErrorResponse {
                    error_type: pricing_error_type(&err).to_string(),
                    message: err.to_string(),
                    details,
                };
                (status, Json(body)).into_response()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                let body = PricingErrorResponse {
                    error_type: "internal".to_string(),
                    message: "Internal error".to_string(),
                    details: None,
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
