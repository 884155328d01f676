pub mod health;
pub mod logs;
pub mod ops;
pub mod ticket;

use axum::{
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;

pub fn api_router(db: DatabaseConnection) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Tickets
        .route(
            "/tickets",
            get(ticket::list_tickets).post(ticket::create_ticket),
        )
        .route("/tickets/stats", get(ticket::ticket_stats))
        .route(
            "/tickets/:id",
            get(ticket::get_ticket)
                .put(ticket::update_ticket)
                .delete(ticket::delete_ticket),
        )
        .route("/tickets/:id/logs", get(logs::ticket_logs))
        // OPS system
        .route("/ops/:id", post(ops::send_to_ops))
        .route("/status/:id", get(ops::query_status))
        // Audit log
        .route("/logs", get(logs::list_logs))
        .with_state(db)
}
