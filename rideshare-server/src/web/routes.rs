//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::Value;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{error, warn};

use crate::oracle::TimeOracle;
use crate::planner::{PlanError, Planner, PlannerConfig};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
///
/// `cors_origins` lists the browser origins allowed to call the API; an
/// entry of `*` allows any origin.
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/get-data", post(get_data))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn root() -> Json<GreetingResponse> {
    Json(GreetingResponse {
        message: "Hello from backend",
    })
}

/// Plan routes for the drivers and passengers in the body.
async fn get_data(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RoutesResponse>, AppError> {
    let response = handle_routes_request(state.oracle.as_ref(), &state.config, &body).await?;
    Ok(Json(response))
}

/// Parse a raw routing request body and plan it against `oracle`.
pub async fn handle_routes_request<O: TimeOracle>(
    oracle: &O,
    config: &PlannerConfig,
    body: &[u8],
) -> Result<RoutesResponse, AppError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| AppError::BadRequest {
        message: format!("Invalid JSON body: {e}"),
    })?;

    let request = RoutesRequest::from_json(&value);
    let result = Planner::new(oracle, config)
        .plan_request(&request.passengers, &request.drivers)
        .await?;

    Ok(RoutesResponse::from_routes(&result.routes))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    /// `detail` is logged only; clients get [`UPSTREAM_MESSAGE`].
    Upstream { detail: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::InvalidRequest(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            PlanError::Lookup(_) => AppError::Upstream {
                detail: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => {
                warn!(status = %StatusCode::BAD_REQUEST, "{message}");
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Upstream { detail } => {
                error!(status = %StatusCode::BAD_GATEWAY, "{detail}");
                (StatusCode::BAD_GATEWAY, UPSTREAM_MESSAGE.to_string())
            }
        };

        let body = Json(ErrorResponse {
            success: false,
            message,
        });
        (status, body).into_response()
    }
}
