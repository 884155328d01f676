use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub subject: String,
    pub description: String,
    pub status: String, // 'new', 'pending', 'sent', 'in_progress', 'closed', 'delayed', 'failed'
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub assigned_to: Option<String>,
    pub priority: String, // 'low', 'medium', 'high'
    pub category: String,
    pub metadata: Option<String>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Ticket lifecycle state. Also the state the OPS simulator transitions on;
/// the queryable subset is validated at the simulator boundary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    New,
    Pending,
    Sent,
    InProgress,
    Closed,
    Delayed,
    Failed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 7] = [
        TicketStatus::New,
        TicketStatus::Pending,
        TicketStatus::Sent,
        TicketStatus::InProgress,
        TicketStatus::Closed,
        TicketStatus::Delayed,
        TicketStatus::Failed,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::New => "new",
            TicketStatus::Pending => "pending",
            TicketStatus::Sent => "sent",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Closed => "closed",
            TicketStatus::Delayed => "delayed",
            TicketStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<TicketStatus> {
        match s {
            "new" => Some(TicketStatus::New),
            "pending" => Some(TicketStatus::Pending),
            "sent" => Some(TicketStatus::Sent),
            "in_progress" => Some(TicketStatus::InProgress),
            "closed" => Some(TicketStatus::Closed),
            "delayed" => Some(TicketStatus::Delayed),
            "failed" => Some(TicketStatus::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerDto {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDto {
    #[serde(default)]
    pub id: Option<String>,
    pub subject: String,
    pub description: String,
    #[serde(default)]
    pub status: Option<TicketStatus>,
    #[serde(default)]
    pub created_at: Option<String>,
    pub customer: CustomerDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    pub priority: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl From<Model> for TicketDto {
    fn from(model: Model) -> Self {
        Self {
            id: Some(model.id),
            subject: model.subject,
            description: model.description,
            status: TicketStatus::parse(&model.status),
            created_at: Some(model.created_at),
            customer: CustomerDto {
                name: model.customer_name,
                email: model.customer_email,
                phone: model.customer_phone,
            },
            assigned_to: model.assigned_to,
            priority: model.priority,
            category: model.category,
            metadata: model
                .metadata
                .as_deref()
                .and_then(|s| serde_json::from_str(s).ok()),
        }
    }
}
