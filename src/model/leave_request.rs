use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A leave row joined with the requesting employee's name.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LeaveRequest {
    #[schema(example = 1)]
    pub leave_id: u64,
    #[schema(example = 1000)]
    pub emp_id: u64,
    /// `None` when the employee row no longer exists
    #[schema(example = "John Doe", nullable = true)]
    pub emp_name: Option<String>,
    #[schema(example = "sick", nullable = true)]
    pub leave_type: Option<String>,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2026-01-03", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "Flu", nullable = true)]
    pub reason: Option<String>,
    #[schema(example = "pending", nullable = true)]
    pub status: Option<String>,
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub applied_at: Option<DateTime<Utc>>,
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub updated_at: Option<DateTime<Utc>>,
}
