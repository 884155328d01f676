use crate::models::ticket;
use sea_orm::*;

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = chrono::Utc::now().to_rfc3339();

    // (id, subject, category, status, priority, customer name, customer email)
    let demo_tickets = vec![
        (
            "TKT-1000",
            "Account Issue - Alex Johnson",
            "Account Issue",
            "new",
            "high",
            "Alex Johnson",
            "alex.johnson@example.com",
        ),
        (
            "TKT-1001",
            "Payment Problem - Maria Garcia",
            "Payment Problem",
            "pending",
            "medium",
            "Maria Garcia",
            "maria.garcia@example.com",
        ),
        (
            "TKT-1002",
            "Technical Support - Wei Zhang",
            "Technical Support",
            "sent",
            "high",
            "Wei Zhang",
            "wei.zhang@example.com",
        ),
        (
            "TKT-1003",
            "Feature Request - Aisha Patel",
            "Feature Request",
            "sent",
            "low",
            "Aisha Patel",
            "aisha.patel@example.com",
        ),
        (
            "TKT-1004",
            "Billing Question - John Smith",
            "Billing Question",
            "failed",
            "medium",
            "John Smith",
            "john.smith@example.com",
        ),
    ];

    for (id, subject, category, status, priority, name, email) in demo_tickets {
        let new_ticket = ticket::ActiveModel {
            id: Set(id.to_owned()),
            subject: Set(subject.to_owned()),
            description: Set(format!(
                "This is a sample ticket description for {}. The customer needs assistance with their issue.",
                category.to_lowercase()
            )),
            status: Set(status.to_owned()),
            customer_name: Set(name.to_owned()),
            customer_email: Set(email.to_owned()),
            customer_phone: Set(None),
            assigned_to: Set(None),
            priority: Set(priority.to_owned()),
            category: Set(category.to_owned()),
            metadata: Set(None),
            created_at: Set(now.clone()),
        };

        let result = ticket::Entity::insert(new_ticket)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(ticket::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(db)
            .await;

        match result {
            Ok(_) => {}
            // Already seeded
            Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
