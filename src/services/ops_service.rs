//! OPS interaction service - runs the transition simulator against a
//! stored ticket and records one audit log entry per invocation.

use chrono::Utc;
use rand::Rng;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde_json::json;
use uuid::Uuid;

use super::ops_simulator::{self, QueryOutcome, SendOutcome};
use super::ServiceError;
use crate::models::log_entry::{self, ActionKind, ApiResponse};
use crate::models::ticket::{self, Entity as Ticket, TicketStatus};

/// Send a ticket to OPS. On success the ticket moves to 'sent'; either
/// way exactly one log entry is appended. A send on a ticket already in
/// 'failed' state is recorded as a retry.
pub async fn send_to_ops<R: Rng + Send>(
    db: &DatabaseConnection,
    id: &str,
    rng: &mut R,
) -> Result<ApiResponse, ServiceError> {
    let ticket = Ticket::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let action = match TicketStatus::parse(&ticket.status) {
        Some(TicketStatus::Failed) => ActionKind::Retry,
        _ => ActionKind::Send,
    };

    let SendOutcome {
        success,
        ops_id,
        new_status,
        message,
    } = ops_simulator::attempt_send(id, rng);

    let timestamp = Utc::now();
    let response = ApiResponse {
        success,
        message,
        data: success.then(|| {
            json!({
                "ticketId": id,
                "opsId": ops_id,
                "timestamp": timestamp,
            })
        }),
        timestamp,
    };

    if let Some(new_status) = new_status {
        let mut active: ticket::ActiveModel = ticket.into();
        active.status = Set(new_status.as_str().to_owned());
        active.update(db).await?;
    }

    record_interaction(db, action, id, &response).await?;

    Ok(response)
}

/// Query a ticket's status in OPS. Only tickets in a queryable state are
/// accepted; a changed status is persisted before the log entry is
/// appended. Exactly one log entry per accepted invocation.
pub async fn query_ops_status<R: Rng + Send>(
    db: &DatabaseConnection,
    id: &str,
    rng: &mut R,
) -> Result<ApiResponse, ServiceError> {
    let ticket = Ticket::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let current = TicketStatus::parse(&ticket.status).ok_or_else(|| {
        ServiceError::InvalidState(format!(
            "Cannot query status for ticket in '{}' state",
            ticket.status
        ))
    })?;

    let QueryOutcome {
        success,
        status,
        updated,
        details,
        message,
    } = ops_simulator::attempt_status_query(id, current, rng)?;

    let timestamp = Utc::now();
    let response = ApiResponse {
        success,
        message,
        data: success.then(|| {
            json!({
                "ticketId": id,
                "status": status,
                "updated": updated,
                "details": details,
            })
        }),
        timestamp,
    };

    if updated {
        let mut active: ticket::ActiveModel = ticket.into();
        active.status = Set(status.as_str().to_owned());
        active.update(db).await?;
    }

    record_interaction(db, ActionKind::Query, id, &response).await?;

    Ok(response)
}

/// Append one audit log entry for a simulator invocation. The outcome
/// kind mirrors the response's success flag; the full response is stored
/// serialized. Not wrapped in a transaction with the ticket update, so a
/// failure here leaves an already persisted status change in place.
pub async fn record_interaction(
    db: &DatabaseConnection,
    action: ActionKind,
    ticket_id: &str,
    response: &ApiResponse,
) -> Result<log_entry::Model, ServiceError> {
    let payload = serde_json::to_string(response)
        .map_err(|e| ServiceError::Internal(format!("Failed to serialize response: {}", e)))?;

    let outcome = if response.success { "success" } else { "failed" };

    let entry = log_entry::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        ticket_id: Set(ticket_id.to_owned()),
        action: Set(action.as_str().to_owned()),
        status: Set(outcome.to_owned()),
        timestamp: Set(response.timestamp.to_rfc3339()),
        response: Set(payload),
    };

    Ok(entry.insert(db).await?)
}
