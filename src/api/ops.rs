use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sea_orm::DatabaseConnection;

use crate::models::log_entry::ApiResponse;
use crate::services::{ops_service, ServiceError};

// Send a ticket to the OPS system. A simulated failure still returns 200
// with success=false in the payload; transport status and business
// outcome are decoupled on this path.
#[utoipa::path(
    post,
    path = "/api/ops/{id}",
    params(("id" = String, Path, description = "Ticket id")),
    responses(
        (status = 200, description = "Send attempt result"),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn send_to_ops(
    State(db): State<DatabaseConnection>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let mut rng = StdRng::from_entropy();
    match ops_service::send_to_ops(&db, &id, &mut rng).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => error_response(err),
    }
}

// Query a ticket's status in the OPS system
#[utoipa::path(
    get,
    path = "/api/status/{id}",
    params(("id" = String, Path, description = "Ticket id")),
    responses(
        (status = 200, description = "Query attempt result"),
        (status = 400, description = "Ticket is not in a queryable state"),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn query_status(
    State(db): State<DatabaseConnection>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let mut rng = StdRng::from_entropy();
    match ops_service::query_ops_status(&db, &id, &mut rng).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ServiceError) -> Response {
    let (code, message) = match err {
        ServiceError::NotFound => (StatusCode::NOT_FOUND, "Ticket not found".to_owned()),
        ServiceError::InvalidState(msg) => (StatusCode::BAD_REQUEST, msg),
        ServiceError::Database(msg) => {
            tracing::error!("OPS persistence failure: {}", msg);
            (StatusCode::INTERNAL_SERVER_ERROR, msg)
        }
        ServiceError::Internal(msg) => {
            tracing::error!("{}", msg);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error creating log entry".to_owned(),
            )
        }
    };

    (
        code,
        Json(ApiResponse {
            success: false,
            message,
            data: None,
            timestamp: Utc::now(),
        }),
    )
        .into_response()
}
