use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "admin")]
    pub username: String,
    #[schema(example = "secret")]
    pub password: String,
}

#[derive(FromRow)]
pub struct UserSql {
    pub username: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct ProfileUpdateDto {
    #[schema(example = "Jane Doe", nullable = true)]
    pub full_name: Option<String>,
    #[schema(example = "jane@company.com", nullable = true)]
    pub email: Option<String>,
    #[schema(example = "+8801712345678", nullable = true)]
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
    pub jti: String,
}
