use crate::{
    api::{begin_write, deleted, required_text, rollback_with_error},
    error::ApiError,
    model::department::Department,
};
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::debug;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct DepartmentPayload {
    #[schema(example = "Engineering")]
    pub dept_name: Option<String>,
    #[schema(example = "Product and platform teams", nullable = true)]
    pub description: Option<String>,
}

impl DepartmentPayload {
    fn dept_name(&self) -> Result<&str, ApiError> {
        required_text(&self.dept_name)
            .ok_or_else(|| ApiError::BadRequest("Department name is required".into()))
    }
}

#[utoipa::path(
    get,
    path = "/departments",
    responses(
        (status = 200, description = "All departments, newest first", body = [Department])
    ),
    tag = "Department"
)]
pub async fn list_departments(pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let departments = sqlx::query_as::<_, Department>(
        r#"
        SELECT dept_id, dept_name, description, created_at
        FROM departments
        ORDER BY dept_id DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(departments))
}

#[utoipa::path(
    get,
    path = "/departments/{dept_id}",
    params(
        ("dept_id" = u64, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Department found", body = Department),
        (status = 404, description = "Department not found")
    ),
    tag = "Department"
)]
pub async fn get_department(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let dept_id = path.into_inner();

    sqlx::query_as::<_, Department>(
        "SELECT dept_id, dept_name, description, created_at FROM departments WHERE dept_id = ?",
    )
    .bind(dept_id)
    .fetch_optional(pool.get_ref())
    .await?
    .map(|d| HttpResponse::Ok().json(d))
    .ok_or_else(|| ApiError::NotFound("Department not found".into()))
}

#[utoipa::path(
    post,
    path = "/departments",
    request_body = DepartmentPayload,
    responses(
        (status = 201, description = "Department created", body = Object, example = json!({
            "message": "Department created",
            "dept_id": 1
        })),
        (status = 400, description = "Missing name or database rejection", body = Object, example = json!({
            "error": "Department name is required"
        }))
    ),
    tag = "Department"
)]
pub async fn create_department(
    pool: web::Data<MySqlPool>,
    payload: web::Json<DepartmentPayload>,
) -> Result<HttpResponse, ApiError> {
    let dept_name = payload.dept_name()?;

    let mut tx = begin_write(pool.get_ref(), "create_department").await?;

    let result = sqlx::query(
        "INSERT INTO departments (dept_name, description, created_at) VALUES (?, ?, NOW())",
    )
    .bind(dept_name)
    .bind(&payload.description)
    .execute(&mut *tx)
    .await;

    let inserted = match result {
        Ok(res) => res,
        Err(e) => return Ok(rollback_with_error(tx, e, "create_department").await),
    };

    if let Err(e) = tx.commit().await {
        return Err(ApiError::BadRequest(e.to_string()));
    }

    debug!(dept_id = inserted.last_insert_id(), "Department created");

    Ok(HttpResponse::Created().json(json!({
        "message": "Department created",
        "dept_id": inserted.last_insert_id()
    })))
}

#[utoipa::path(
    put,
    path = "/departments/{dept_id}",
    params(
        ("dept_id" = u64, Path, description = "Department ID")
    ),
    request_body = DepartmentPayload,
    responses(
        (status = 200, description = "Department updated", body = Object, example = json!({
            "message": "Department updated"
        })),
        (status = 400, description = "Missing name or database rejection")
    ),
    tag = "Department"
)]
pub async fn update_department(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<DepartmentPayload>,
) -> Result<HttpResponse, ApiError> {
    let dept_id = path.into_inner();
    let dept_name = payload.dept_name()?;

    let mut tx = begin_write(pool.get_ref(), "update_department").await?;

    let result = sqlx::query("UPDATE departments SET dept_name = ?, description = ? WHERE dept_id = ?")
        .bind(dept_name)
        .bind(&payload.description)
        .bind(dept_id)
        .execute(&mut *tx)
        .await;

    if let Err(e) = result {
        return Ok(rollback_with_error(tx, e, "update_department").await);
    }

    if let Err(e) = tx.commit().await {
        return Err(ApiError::BadRequest(e.to_string()));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Department updated"
    })))
}

#[utoipa::path(
    delete,
    path = "/departments/{dept_id}",
    params(
        ("dept_id" = u64, Path, description = "Department ID")
    ),
    responses(
        (status = 200, description = "Deleted (or never existed)", body = Object, example = json!({
            "message": "Department deleted"
        }))
    ),
    tag = "Department"
)]
pub async fn delete_department(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let dept_id = path.into_inner();

    let result = sqlx::query("DELETE FROM departments WHERE dept_id = ?")
        .bind(dept_id)
        .execute(pool.get_ref())
        .await?;

    Ok(deleted("Department deleted", result.rows_affected()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::lazy_pool;
    use actix_web::{App, http::StatusCode, test};
    use serde_json::Value;

    #[actix_web::test]
    async fn blank_name_is_rejected_without_touching_the_database() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(lazy_pool()))
                .route("/departments", web::post().to(create_department))
                .route("/departments/{id}", web::put().to(update_department)),
        )
        .await;

        for (req, label) in [
            (
                test::TestRequest::post()
                    .uri("/departments")
                    .set_json(json!({ "dept_name": "   ", "description": "x" })),
                "create",
            ),
            (
                test::TestRequest::put()
                    .uri("/departments/4")
                    .set_json(json!({ "description": "no name" })),
                "update",
            ),
        ] {
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", label);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], "Department name is required", "{}", label);
        }
    }

    #[actix_web::test]
    async fn unreachable_database_is_a_bad_request_with_its_text() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(lazy_pool()))
                .route("/departments", web::post().to(create_department)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/departments")
            .set_json(json!({ "dept_name": "Ops" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        let error = body["error"].as_str().unwrap();
        assert!(!error.is_empty());
        assert_ne!(error, "Internal Server Error");
    }
}
