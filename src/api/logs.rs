use crate::models::log_entry::{self as log_model, Entity as LogEntry, LogEntryDto};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

// List all audit log entries, newest first
#[utoipa::path(
    get,
    path = "/api/logs",
    responses(
        (status = 200, description = "All OPS interaction log entries")
    )
)]
pub async fn list_logs(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match LogEntry::find()
        .order_by_desc(log_model::Column::Timestamp)
        .all(&db)
        .await
    {
        Ok(entries) => {
            let log_dtos: Vec<LogEntryDto> = entries.into_iter().map(LogEntryDto::from).collect();
            Json(serde_json::json!({
                "logs": log_dtos,
                "total": log_dtos.len()
            }))
            .into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": format!("Database error: {}", e)})),
        )
            .into_response(),
    }
}

// List audit log entries for one ticket, newest first
#[utoipa::path(
    get,
    path = "/api/tickets/{id}/logs",
    params(("id" = String, Path, description = "Ticket id")),
    responses(
        (status = 200, description = "Log entries for the ticket")
    )
)]
pub async fn ticket_logs(
    State(db): State<DatabaseConnection>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match LogEntry::find()
        .filter(log_model::Column::TicketId.eq(id))
        .order_by_desc(log_model::Column::Timestamp)
        .all(&db)
        .await
    {
        Ok(entries) => {
            let log_dtos: Vec<LogEntryDto> = entries.into_iter().map(LogEntryDto::from).collect();
            Json(serde_json::json!({
                "logs": log_dtos,
                "total": log_dtos.len()
            }))
            .into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": format!("Database error: {}", e)})),
        )
            .into_response(),
    }
}
