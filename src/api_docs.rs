use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::ticket::list_tickets,
        api::ticket::create_ticket,
        api::ticket::get_ticket,
        api::ticket::update_ticket,
        api::ticket::delete_ticket,
        api::ticket::ticket_stats,
        api::ops::send_to_ops,
        api::ops::query_status,
        api::logs::list_logs,
        api::logs::ticket_logs,
    ),
    tags(
        (name = "opsdesk", description = "OpsDesk ticket API")
    )
)]
pub struct ApiDoc;
