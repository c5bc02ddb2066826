use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Designation {
    #[schema(example = 1)]
    pub desig_id: u64,
    #[schema(example = "Software Engineer")]
    pub title: String,
    #[schema(example = "Builds and maintains services", nullable = true)]
    pub description: Option<String>,
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: Option<DateTime<Utc>>,
}
