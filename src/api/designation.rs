use crate::{
    api::{begin_write, deleted, required_text, rollback_with_error},
    error::ApiError,
    model::designation::Designation,
};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::debug;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct DesignationPayload {
    #[schema(example = "Software Engineer")]
    pub title: Option<String>,
    #[schema(example = "Builds and maintains services", nullable = true)]
    pub description: Option<String>,
}

impl DesignationPayload {
    fn title(&self) -> Result<&str, ApiError> {
        required_text(&self.title).ok_or_else(|| ApiError::BadRequest("Title is required".into()))
    }
}

#[utoipa::path(
    get,
    path = "/designations",
    responses(
        (status = 200, description = "All designations, newest first", body = [Designation])
    ),
    tag = "Designation"
)]
pub async fn list_designations(pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let designations = sqlx::query_as::<_, Designation>(
        r#"
        SELECT desig_id, title, description, created_at
        FROM designations
        ORDER BY desig_id DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(designations))
}

#[utoipa::path(
    get,
    path = "/designations/{desig_id}",
    params(
        ("desig_id" = u64, Path, description = "Designation ID")
    ),
    responses(
        (status = 200, description = "Designation found", body = Designation),
        (status = 404, description = "Designation not found")
    ),
    tag = "Designation"
)]
pub async fn get_designation(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let desig_id = path.into_inner();

    sqlx::query_as::<_, Designation>(
        "SELECT desig_id, title, description, created_at FROM designations WHERE desig_id = ?",
    )
    .bind(desig_id)
    .fetch_optional(pool.get_ref())
    .await?
    .map(|d| HttpResponse::Ok().json(d))
    .ok_or_else(|| ApiError::NotFound("Designation not found".into()))
}

#[utoipa::path(
    post,
    path = "/designations",
    request_body = DesignationPayload,
    responses(
        (status = 201, description = "Designation created", body = Object, example = json!({
            "message": "Designation created",
            "desig_id": 1
        })),
        (status = 400, description = "Missing title or database rejection", body = Object, example = json!({
            "error": "Title is required"
        }))
    ),
    tag = "Designation"
)]
pub async fn create_designation(
    pool: web::Data<MySqlPool>,
    payload: web::Json<DesignationPayload>,
) -> Result<HttpResponse, ApiError> {
    let title = payload.title()?;

    let mut tx = begin_write(pool.get_ref(), "create_designation").await?;

    let result = sqlx::query(
        "INSERT INTO designations (title, description, created_at) VALUES (?, ?, NOW())",
    )
    .bind(title)
    .bind(&payload.description)
    .execute(&mut *tx)
    .await;

    let inserted = match result {
        Ok(res) => res,
        Err(e) => return Ok(rollback_with_error(tx, e, "create_designation").await),
    };

    if let Err(e) = tx.commit().await {
        return Err(ApiError::BadRequest(e.to_string()));
    }

    debug!(desig_id = inserted.last_insert_id(), "Designation created");

    Ok(HttpResponse::Created().json(json!({
        "message": "Designation created",
        "desig_id": inserted.last_insert_id()
    })))
}

#[utoipa::path(
    put,
    path = "/designations/{desig_id}",
    params(
        ("desig_id" = u64, Path, description = "Designation ID")
    ),
    request_body = DesignationPayload,
    responses(
        (status = 200, description = "Designation updated", body = Object, example = json!({
            "message": "Designation updated"
        })),
        (status = 400, description = "Missing title or database rejection")
    ),
    tag = "Designation"
)]
pub async fn update_designation(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<DesignationPayload>,
) -> Result<HttpResponse, ApiError> {
    let desig_id = path.into_inner();
    let title = payload.title()?;

    let mut tx = begin_write(pool.get_ref(), "update_designation").await?;

    let result = sqlx::query("UPDATE designations SET title = ?, description = ? WHERE desig_id = ?")
        .bind(title)
        .bind(&payload.description)
        .bind(desig_id)
        .execute(&mut *tx)
        .await;

    if let Err(e) = result {
        return Ok(rollback_with_error(tx, e, "update_designation").await);
    }

    if let Err(e) = tx.commit().await {
        return Err(ApiError::BadRequest(e.to_string()));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Designation updated"
    })))
}

#[utoipa::path(
    delete,
    path = "/designations/{desig_id}",
    params(
        ("desig_id" = u64, Path, description = "Designation ID")
    ),
    responses(
        (status = 200, description = "Deleted (or never existed)", body = Object, example = json!({
            "message": "Designation deleted"
        }))
    ),
    tag = "Designation"
)]
pub async fn delete_designation(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let desig_id = path.into_inner();

    let result = sqlx::query("DELETE FROM designations WHERE desig_id = ?")
        .bind(desig_id)
        .execute(pool.get_ref())
        .await?;

    Ok(deleted("Designation deleted", result.rows_affected()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::lazy_pool;
    use actix_web::{App, http::StatusCode, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn blank_title_is_rejected_without_touching_the_database() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(lazy_pool()))
                .route("/designations", web::post().to(create_designation))
                .route("/designations/{id}", web::put().to(update_designation)),
        )
        .await;

        for (req, label) in [
            (
                test::TestRequest::post()
                    .uri("/designations")
                    .set_json(json!({ "title": "   ", "description": "x" })),
                "create",
            ),
            (
                test::TestRequest::put()
                    .uri("/designations/4")
                    .set_json(json!({ "description": "no title" })),
                "update",
            ),
        ] {
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", label);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], "Title is required", "{}", label);
        }
    }

    #[actix_web::test]
    async fn unreachable_database_is_a_bad_request_with_its_text() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(lazy_pool()))
                .route("/designations", web::post().to(create_designation)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/designations")
            .set_json(json!({ "title": "Ops" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        let error = body["error"].as_str().unwrap();
        assert!(!error.is_empty());
        assert_ne!(error, "Internal Server Error");
    }
}
