use crate::{
    auth::{
        auth::{AuthUser, issue_token},
        password::verify_password,
    },
    config::Config,
    error::ApiError,
    model::user::User,
    models::{LoginReqDto, ProfileUpdateDto, UserSql},
};
use actix_web::{HttpResponse, web};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, info, instrument};

/// User login
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Authenticated", body = Object, example = json!({
            "status": "success",
            "token": "admin"
        })),
        (status = 400, description = "Username or password missing"),
        (status = 401, description = "Invalid credentials", body = Object, example = json!({
            "status": "fail"
        }))
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(pool, config, user),
    fields(username = %user.username)
)]
pub async fn login(
    user: web::Json<LoginReqDto>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> Result<HttpResponse, ApiError> {
    info!("Login request received");

    // 1️⃣ Basic validation
    if user.username.trim().is_empty() || user.password.is_empty() {
        info!("Validation failed: empty username or password");
        return Err(ApiError::BadRequest("Username or password required".into()));
    }

    // 2️⃣ Fetch user
    let db_user = sqlx::query_as::<_, UserSql>(
        r#"
        SELECT username, password
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(&user.username)
    .fetch_optional(pool.get_ref())
    .await?;

    let Some(db_user) = db_user else {
        info!("Invalid credentials: user not found");
        return Ok(HttpResponse::Unauthorized().json(json!({ "status": "fail" })));
    };

    // 3️⃣ Verify password
    if let Err(e) = verify_password(&user.password, &db_user.password) {
        info!(error = %e, "Invalid credentials: password mismatch");
        return Ok(HttpResponse::Unauthorized().json(json!({ "status": "fail" })));
    }

    debug!(mode = %config.token_mode, "Password verified, issuing token");

    // 4️⃣ Issue token
    let token = issue_token(&config, &db_user.username)?;

    info!("Login successful");

    Ok(login_success(&token))
}

fn login_success(token: &str) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "success",
        "token": token
    }))
}

/// Current user's profile
#[utoipa::path(
    get,
    path = "/me",
    responses(
        (status = 200, description = "Profile of the token's user", body = Object, example = json!({
            "status": "success",
            "user": {
                "username": "admin",
                "full_name": "Jane Doe",
                "email": "jane@company.com",
                "phone": "+8801712345678"
            }
        })),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Auth"
)]
pub async fn me(auth: AuthUser, pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT username, full_name, email, phone
        FROM users
        WHERE username = ?
        "#,
    )
    .bind(&auth.username)
    .fetch_optional(pool.get_ref())
    .await?;

    match user {
        Some(user) => Ok(HttpResponse::Ok().json(json!({
            "status": "success",
            "user": user
        }))),
        None => Ok(HttpResponse::NotFound().json(json!({
            "status": "fail",
            "message": "User not found"
        }))),
    }
}

/// Update the current user's profile
#[utoipa::path(
    put,
    path = "/profile/update",
    request_body = ProfileUpdateDto,
    responses(
        (status = 200, description = "Profile updated", body = Object, example = json!({
            "status": "success",
            "message": "Profile updated successfully"
        })),
        (status = 401, description = "Missing or invalid token")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Auth"
)]
pub async fn update_profile(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<ProfileUpdateDto>,
) -> Result<HttpResponse, ApiError> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET full_name = ?, email = ?, phone = ?
        WHERE username = ?
        "#,
    )
    .bind(&payload.full_name)
    .bind(&payload.email)
    .bind(&payload.phone)
    .bind(&auth.username)
    .execute(pool.get_ref())
    .await?;

    debug!(username = %auth.username, affected = result.rows_affected(), "Profile updated");

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Profile updated successfully"
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::lazy_pool;
    use actix_web::{App, body::to_bytes, http::StatusCode, test};

    fn config() -> Config {
        Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("mysql://hrms@localhost/hrms".into()),
            _ => None,
        })
        .unwrap()
    }

    #[actix_web::test]
    async fn login_rejects_blank_credentials() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(lazy_pool()))
                .app_data(web::Data::new(config()))
                .route("/login", web::post().to(login)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({ "username": "  ", "password": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn me_requires_bearer_token() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(lazy_pool()))
                .app_data(web::Data::new(config()))
                .route("/me", web::get().to(me))
                .route("/profile/update", web::put().to(update_profile)),
        )
        .await;

        let req = test::TestRequest::get().uri("/me").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "fail");
        assert_eq!(body["message"], "Missing token");

        let req = test::TestRequest::put()
            .uri("/profile/update")
            .insert_header(("Authorization", "Token admin"))
            .set_json(json!({ "full_name": "x" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn successful_login_returns_the_username_as_token() {
        let token = issue_token(&config(), "admin").unwrap();
        let resp = login_success(&token);
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "status": "success", "token": "admin" }));
    }
}
