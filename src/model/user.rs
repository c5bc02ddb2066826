use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Profile view of a `users` row; the password hash never leaves the database layer.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct User {
    #[schema(example = "admin")]
    pub username: String,
    #[schema(example = "Jane Doe", nullable = true)]
    pub full_name: Option<String>,
    #[schema(example = "jane@company.com", nullable = true)]
    pub email: Option<String>,
    #[schema(example = "+8801712345678", nullable = true)]
    pub phone: Option<String>,
}
