use opsdesk::db;
use opsdesk::models::log_entry::{self, Entity as LogEntry};
use opsdesk::models::ticket::{self, Entity as Ticket};
use opsdesk::services::{ops_service, ServiceError};
use rand::rngs::mock::StepRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    // In-memory SQLite for testing
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

// Helper to create a test ticket in a given status
async fn create_test_ticket(db: &DatabaseConnection, id: &str, status: &str) {
    let now = chrono::Utc::now().to_rfc3339();
    let new_ticket = ticket::ActiveModel {
        id: Set(id.to_string()),
        subject: Set("Payment Problem - Maria Garcia".to_string()),
        description: Set("Test ticket description".to_string()),
        status: Set(status.to_string()),
        customer_name: Set("Maria Garcia".to_string()),
        customer_email: Set("maria.garcia@example.com".to_string()),
        customer_phone: Set(None),
        assigned_to: Set(None),
        priority: Set("medium".to_string()),
        category: Set("Payment Problem".to_string()),
        metadata: Set(None),
        created_at: Set(now),
    };
    new_ticket
        .insert(db)
        .await
        .expect("Failed to create ticket");
}

async fn ticket_status(db: &DatabaseConnection, id: &str) -> String {
    Ticket::find_by_id(id)
        .one(db)
        .await
        .expect("DB error")
        .expect("Ticket missing")
        .status
}

async fn logs_for(db: &DatabaseConnection, id: &str) -> Vec<log_entry::Model> {
    LogEntry::find()
        .filter(log_entry::Column::TicketId.eq(id))
        .all(db)
        .await
        .expect("DB error")
}

// StepRng with all-zero output makes every uniform draw 0.0 (forced
// success); all-ones output draws just under 1.0 (forced failure).
fn always_succeed() -> StepRng {
    StepRng::new(0, 0)
}

fn always_fail() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

#[tokio::test]
async fn test_send_success_moves_ticket_to_sent_and_logs_once() {
    let db = setup_test_db().await;
    create_test_ticket(&db, "TKT-1", "new").await;

    let response = ops_service::send_to_ops(&db, "TKT-1", &mut always_succeed())
        .await
        .expect("send failed");

    assert!(response.success);
    assert!(response.message.contains("TKT-1"));
    assert_eq!(ticket_status(&db, "TKT-1").await, "sent");

    let data = response.data.expect("missing response data");
    assert_eq!(data["ticketId"], "TKT-1");
    assert!(data["opsId"].as_str().unwrap().starts_with("OPS-"));

    let logs = logs_for(&db, "TKT-1").await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, "send");
    assert_eq!(logs[0].status, "success");
    assert_eq!(logs[0].ticket_id, "TKT-1");
}

#[tokio::test]
async fn test_send_failure_keeps_status_and_logs_failed_outcome() {
    let db = setup_test_db().await;
    create_test_ticket(&db, "TKT-2", "new").await;

    let response = ops_service::send_to_ops(&db, "TKT-2", &mut always_fail())
        .await
        .expect("send failed");

    assert!(!response.success);
    assert!(response.message.contains("TKT-2"));
    assert!(response.message.contains("connection timeout"));
    assert!(response.data.is_none());
    assert_eq!(ticket_status(&db, "TKT-2").await, "new");

    let logs = logs_for(&db, "TKT-2").await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, "send");
    assert_eq!(logs[0].status, "failed");

    // The failure response is stored verbatim in the log entry
    let stored: serde_json::Value =
        serde_json::from_str(&logs[0].response).expect("unparsable log payload");
    assert_eq!(stored["success"], false);
}

#[tokio::test]
async fn test_resend_of_failed_ticket_is_logged_as_retry() {
    let db = setup_test_db().await;
    create_test_ticket(&db, "TKT-3", "failed").await;

    ops_service::send_to_ops(&db, "TKT-3", &mut always_fail())
        .await
        .expect("send failed");

    let logs = logs_for(&db, "TKT-3").await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, "retry");
}

#[tokio::test]
async fn test_query_rejects_unsent_ticket_without_logging() {
    let db = setup_test_db().await;
    create_test_ticket(&db, "TKT-4", "new").await;

    let result = ops_service::query_ops_status(&db, "TKT-4", &mut always_succeed()).await;

    match result {
        Err(ServiceError::InvalidState(msg)) => {
            assert_eq!(msg, "Cannot query status for ticket in 'new' state")
        }
        other => panic!("expected InvalidState, got {:?}", other),
    }

    assert_eq!(ticket_status(&db, "TKT-4").await, "new");
    assert!(logs_for(&db, "TKT-4").await.is_empty());
}

#[tokio::test]
async fn test_missing_ticket_is_not_found_and_not_logged() {
    let db = setup_test_db().await;

    let send = ops_service::send_to_ops(&db, "TKT-404", &mut always_succeed()).await;
    assert!(matches!(send, Err(ServiceError::NotFound)));

    let query = ops_service::query_ops_status(&db, "TKT-404", &mut always_succeed()).await;
    assert!(matches!(query, Err(ServiceError::NotFound)));

    let total = LogEntry::find().count(&db).await.expect("DB error");
    assert_eq!(total, 0);
}

#[tokio::test]
async fn test_query_closed_ticket_is_idempotent() {
    let db = setup_test_db().await;
    create_test_ticket(&db, "TKT-5", "closed").await;

    for _ in 0..3 {
        let response = ops_service::query_ops_status(&db, "TKT-5", &mut always_succeed())
            .await
            .expect("query failed");

        assert!(response.success);
        let data = response.data.expect("missing response data");
        assert_eq!(data["status"], "closed");
        assert_eq!(data["updated"], false);
        assert_eq!(ticket_status(&db, "TKT-5").await, "closed");
    }

    // Each invocation still appends its own audit entry
    let logs = logs_for(&db, "TKT-5").await;
    assert_eq!(logs.len(), 3);
    assert!(logs.iter().all(|l| l.action == "query" && l.status == "success"));
}

#[tokio::test]
async fn test_query_sent_ticket_with_forced_rolls_moves_to_in_progress() {
    let db = setup_test_db().await;
    create_test_ticket(&db, "TKT-6", "sent").await;

    // Success roll 0.0 and transition roll 0.0 land in the in_progress bucket
    let response = ops_service::query_ops_status(&db, "TKT-6", &mut always_succeed())
        .await
        .expect("query failed");

    assert!(response.success);
    let data = response.data.expect("missing response data");
    assert_eq!(data["status"], "in_progress");
    assert_eq!(data["updated"], true);
    assert_eq!(data["details"], "Ticket is being processed by OPS");
    assert_eq!(ticket_status(&db, "TKT-6").await, "in_progress");

    let logs = logs_for(&db, "TKT-6").await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, "query");
    assert_eq!(logs[0].status, "success");
}

#[tokio::test]
async fn test_query_failure_is_logged_but_changes_nothing() {
    let db = setup_test_db().await;
    create_test_ticket(&db, "TKT-7", "sent").await;

    let response = ops_service::query_ops_status(&db, "TKT-7", &mut always_fail())
        .await
        .expect("query failed");

    assert!(!response.success);
    assert!(response.message.contains("OPS system unavailable"));
    assert!(response.data.is_none());
    assert_eq!(ticket_status(&db, "TKT-7").await, "sent");

    let logs = logs_for(&db, "TKT-7").await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, "query");
    assert_eq!(logs[0].status, "failed");
}
