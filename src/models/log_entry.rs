use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "log_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub ticket_id: String,
    pub action: String, // 'send', 'query', 'retry'
    pub status: String, // 'success', 'failed'
    pub timestamp: String,
    pub response: String, // serialized ApiResponse
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Kind of OPS interaction recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Send,
    Query,
    Retry,
}

impl ActionKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Send => "send",
            ActionKind::Query => "query",
            ActionKind::Retry => "retry",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response returned by the OPS endpoints and embedded verbatim in each
/// audit log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntryDto {
    pub id: String,
    pub ticket_id: String,
    pub action: String,
    pub status: String,
    pub timestamp: String,
    pub response: serde_json::Value,
}

impl From<Model> for LogEntryDto {
    fn from(model: Model) -> Self {
        let response =
            serde_json::from_str(&model.response).unwrap_or(serde_json::Value::Null);
        Self {
            id: model.id,
            ticket_id: model.ticket_id,
            action: model.action,
            status: model.status,
            timestamp: model.timestamp,
            response,
        }
    }
}
