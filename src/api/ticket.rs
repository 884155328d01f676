use crate::models::ticket::{self as ticket_model, Entity as Ticket, TicketDto, TicketStatus};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

// List all tickets
#[utoipa::path(
    get,
    path = "/api/tickets",
    responses(
        (status = 200, description = "All tickets")
    )
)]
pub async fn list_tickets(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match Ticket::find().all(&db).await {
        Ok(tickets) => {
            let ticket_dtos: Vec<TicketDto> = tickets.into_iter().map(TicketDto::from).collect();
            Json(ticket_dtos).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": format!("Database error: {}", e)})),
        )
            .into_response(),
    }
}

// Get single ticket
#[utoipa::path(
    get,
    path = "/api/tickets/{id}",
    params(("id" = String, Path, description = "Ticket id")),
    responses(
        (status = 200, description = "The ticket"),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn get_ticket(
    State(db): State<DatabaseConnection>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match Ticket::find_by_id(id).one(&db).await {
        Ok(Some(ticket)) => Json(TicketDto::from(ticket)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Ticket not found"})),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": format!("Database error: {}", e)})),
        )
            .into_response(),
    }
}

// Create ticket
#[utoipa::path(
    post,
    path = "/api/tickets",
    responses(
        (status = 201, description = "Ticket created")
    )
)]
pub async fn create_ticket(
    State(db): State<DatabaseConnection>,
    Json(ticket_dto): Json<TicketDto>,
) -> impl IntoResponse {
    let id = ticket_dto
        .id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let created_at = ticket_dto
        .created_at
        .filter(|ts| !ts.is_empty())
        .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());
    let status = ticket_dto.status.unwrap_or_default();

    let new_ticket = ticket_model::ActiveModel {
        id: Set(id),
        subject: Set(ticket_dto.subject),
        description: Set(ticket_dto.description),
        status: Set(status.as_str().to_owned()),
        customer_name: Set(ticket_dto.customer.name),
        customer_email: Set(ticket_dto.customer.email),
        customer_phone: Set(ticket_dto.customer.phone),
        assigned_to: Set(ticket_dto.assigned_to),
        priority: Set(ticket_dto.priority),
        category: Set(ticket_dto.category),
        metadata: Set(ticket_dto.metadata.map(|m| m.to_string())),
        created_at: Set(created_at),
    };

    match new_ticket.insert(&db).await {
        Ok(model) => (StatusCode::CREATED, Json(TicketDto::from(model))).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": format!("Failed to create ticket: {}", e)})),
        )
            .into_response(),
    }
}

// Update ticket
#[utoipa::path(
    put,
    path = "/api/tickets/{id}",
    params(("id" = String, Path, description = "Ticket id")),
    responses(
        (status = 200, description = "Ticket updated"),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn update_ticket(
    State(db): State<DatabaseConnection>,
    Path(id): Path<String>,
    Json(ticket_dto): Json<TicketDto>,
) -> impl IntoResponse {
    let ticket = Ticket::find_by_id(id).one(&db).await.unwrap_or(None);

    if let Some(ticket) = ticket {
        let mut active_model: ticket_model::ActiveModel = ticket.into();

        active_model.subject = Set(ticket_dto.subject);
        active_model.description = Set(ticket_dto.description);
        if let Some(status) = ticket_dto.status {
            active_model.status = Set(status.as_str().to_owned());
        }
        active_model.customer_name = Set(ticket_dto.customer.name);
        active_model.customer_email = Set(ticket_dto.customer.email);
        active_model.customer_phone = Set(ticket_dto.customer.phone);
        active_model.assigned_to = Set(ticket_dto.assigned_to);
        active_model.priority = Set(ticket_dto.priority);
        active_model.category = Set(ticket_dto.category);
        if let Some(metadata) = ticket_dto.metadata {
            active_model.metadata = Set(Some(metadata.to_string()));
        }

        match active_model.update(&db).await {
            Ok(model) => Json(TicketDto::from(model)).into_response(),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": format!("Failed to update ticket: {}", e)})),
            )
                .into_response(),
        }
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Ticket not found"})),
        )
            .into_response()
    }
}

// Delete ticket (hard delete, log entries are kept)
#[utoipa::path(
    delete,
    path = "/api/tickets/{id}",
    params(("id" = String, Path, description = "Ticket id")),
    responses(
        (status = 204, description = "Ticket deleted"),
        (status = 404, description = "Ticket not found")
    )
)]
pub async fn delete_ticket(
    State(db): State<DatabaseConnection>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match Ticket::delete_by_id(id).exec(&db).await {
        Ok(result) if result.rows_affected == 0 => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "Ticket not found"})),
        )
            .into_response(),
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": format!("Failed to delete ticket: {}", e)})),
        )
            .into_response(),
    }
}

// Ticket counts by status
#[utoipa::path(
    get,
    path = "/api/tickets/stats",
    responses(
        (status = 200, description = "Ticket counts by status")
    )
)]
pub async fn ticket_stats(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match Ticket::find().all(&db).await {
        Ok(tickets) => {
            let mut stats = serde_json::Map::new();
            stats.insert("total".to_owned(), tickets.len().into());
            for status in TicketStatus::ALL {
                let count = tickets.iter().filter(|t| t.status == status.as_str()).count();
                stats.insert(status.as_str().to_owned(), count.into());
            }
            Json(serde_json::Value::Object(stats)).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({"error": format!("Database error: {}", e)})),
        )
            .into_response(),
    }
}
