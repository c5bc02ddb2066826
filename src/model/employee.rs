use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "emp_id": 1,
        "emp_name": "John Doe",
        "emp_email": "john.doe@company.com",
        "emp_phone": "+8801712345678",
        "emp_designation": "Software Engineer",
        "created_at": "2026-01-01T00:00:00Z"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub emp_id: u64,

    #[schema(example = "John Doe", nullable = true)]
    pub emp_name: Option<String>,

    #[schema(example = "john.doe@company.com", nullable = true)]
    pub emp_email: Option<String>,

    #[schema(example = "+8801712345678", nullable = true)]
    pub emp_phone: Option<String>,

    /// Free text; not tied to the designation master.
    #[schema(example = "Software Engineer", nullable = true)]
    pub emp_designation: Option<String>,

    #[schema(
        example = "2026-01-01T00:00:00Z",
        value_type = String,
        format = "date-time"
    )]
    pub created_at: Option<DateTime<Utc>>,
}
