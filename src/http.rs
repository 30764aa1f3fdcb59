//! HTTP API over the weather service.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt;
use tower_http::trace::TraceLayer;

use crate::classifier::classify;
use crate::error::WeatherError;
use crate::models::{
    ChartSeries, CityForecast, CityForecastRequest, ClassifyRequest, ClassifyResponse,
    MultipleForecastRequest, RouteForecast, RouteForecastRequest,
};
use crate::service::WeatherService;

/// JSON error body returned by every failing handler
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
    pub error_code: &'static str,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::BAD_REQUEST,
            error_code: "BAD_REQUEST",
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::NOT_FOUND,
            error_code: "NOT_FOUND",
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::BAD_GATEWAY,
            error_code: "UPSTREAM_ERROR",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<WeatherError> for ApiError {
    fn from(e: WeatherError) -> Self {
        match e {
            WeatherError::CityNotFound(_) => Self::not_found(e.to_string()),
            WeatherError::InvalidDayCount(_) | WeatherError::NoCities | WeatherError::EmptyCityName => {
                Self::bad_request(e.to_string())
            }
            WeatherError::UpstreamRequestFailed { .. } => {
                tracing::error!("{}", e);
                Self::upstream(e.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": true,
            "message": self.message,
            "status": self.status_code.as_u16(),
            "error_code": self.error_code,
        });
        (self.status_code, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Builds the router with all API routes
pub fn create_router(service: WeatherService) -> Router {
    let api_router = Router::new()
        .route("/weather", post(city_weather))
        .route("/weather/multiple", post(multiple_weather))
        .route("/route", post(route_weather))
        .route("/classify", post(classify_weather));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn city_weather(
    State(service): State<WeatherService>,
    payload: Result<Json<CityForecastRequest>, JsonRejection>,
) -> ApiResult<Json<CityForecast>> {
    let Json(request) = payload?;
    let forecast = service.city_forecast(&request.city, request.days).await?;
    Ok(Json(forecast))
}

async fn route_weather(
    State(service): State<WeatherService>,
    payload: Result<Json<RouteForecastRequest>, JsonRejection>,
) -> ApiResult<Json<RouteForecast>> {
    let Json(request) = payload?;
    let route = service
        .route_forecast(&request.start_city, &request.end_city, request.days)
        .await?;
    Ok(Json(route))
}

async fn multiple_weather(
    State(service): State<WeatherService>,
    payload: Result<Json<MultipleForecastRequest>, JsonRejection>,
) -> ApiResult<Json<BTreeMap<String, ChartSeries>>> {
    let Json(request) = payload?;
    let series = service.multiple_forecast(&request.cities, request.days).await?;
    Ok(Json(series))
}

async fn classify_weather(
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> ApiResult<Json<ClassifyResponse>> {
    let Json(request) = payload?;
    Ok(Json(ClassifyResponse {
        verdict: classify(
            request.temperature_max,
            request.temperature_min,
            request.humidity,
            request.wind_speed,
            request.rain_probability,
        ),
    }))
}
