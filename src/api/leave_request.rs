use crate::{
    api::deleted, error::ApiError, model::leave_request::LeaveRequest,
    utils::date_utils::parse_iso_date,
};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Deserializer};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::debug;
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct CreateLeave {
    #[schema(example = 1000, value_type = u64)]
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub emp_id: u64,
    #[schema(example = "sick")]
    pub leave_type: Option<String>,
    /// ISO-8601 date or timestamp; only the date part is stored
    #[schema(example = "2026-01-01T00:00:00.000Z")]
    pub start_date: Option<String>,
    /// ISO-8601 date or timestamp; only the date part is stored
    #[schema(example = "2026-01-03T00:00:00.000Z")]
    pub end_date: Option<String>,
    #[schema(example = "Flu")]
    pub reason: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateLeaveStatus {
    #[schema(example = "approved")]
    pub status: String,
}

// Form inputs post the employee id as a string.
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(u64),
        Text(String),
    }

    match Id::deserialize(deserializer)? {
        Id::Number(n) => Ok(n),
        Id::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/* =========================
List leave requests
========================= */
#[utoipa::path(
    get,
    path = "/leaves",
    responses(
        (status = 200, description = "Every leave request with its employee's name", body = [LeaveRequest])
    ),
    tag = "Leave"
)]
pub async fn leave_list(pool: web::Data<MySqlPool>) -> Result<HttpResponse, ApiError> {
    let leaves = sqlx::query_as::<_, LeaveRequest>(
        r#"
        SELECT
            l.leave_id,
            l.emp_id,
            e.emp_name,
            l.leave_type,
            l.start_date,
            l.end_date,
            l.reason,
            l.status,
            l.applied_at,
            l.updated_at
        FROM leave_requests l
        LEFT JOIN employees e ON e.emp_id = l.emp_id
        ORDER BY l.applied_at DESC, l.leave_id DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(leaves))
}

/* =========================
Create leave request
========================= */
#[utoipa::path(
    post,
    path = "/leaves",
    request_body(
        content = CreateLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 201, description = "Leave request submitted",
         body = Object,
         example = json!({
            "message": "Leave request submitted",
            "leave_id": 1
         })
        ),
        (status = 400, description = "Invalid date format", body = Object, example = json!({
            "error": "Invalid date format"
        }))
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateLeave>,
) -> Result<HttpResponse, ApiError> {
    // 1️⃣ parse dates, keeping only the calendar day
    let (start_date, end_date) = match (
        payload.start_date.as_deref().and_then(parse_iso_date),
        payload.end_date.as_deref().and_then(parse_iso_date),
    ) {
        (Some(start), Some(end)) => (start, end),
        _ => return Err(ApiError::BadRequest("Invalid date format".into())),
    };

    // 2️⃣ insert request
    let result = sqlx::query(
        r#"
        INSERT INTO leave_requests
            (emp_id, leave_type, start_date, end_date, reason, status, applied_at, updated_at)
        VALUES (?, ?, ?, ?, ?, 'pending', NOW(), NOW())
        "#,
    )
    .bind(payload.emp_id)
    .bind(&payload.leave_type)
    .bind(start_date)
    .bind(end_date)
    .bind(&payload.reason)
    .execute(pool.get_ref())
    .await?;

    debug!(emp_id = payload.emp_id, %start_date, %end_date, "Leave request submitted");

    Ok(HttpResponse::Created().json(json!({
        "message": "Leave request submitted",
        "leave_id": result.last_insert_id()
    })))
}

/* =========================
Update leave status
========================= */
/// Overwrites the status with whatever the caller sends; there are no transition rules.
#[utoipa::path(
    put,
    path = "/leaves/{leave_id}",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request")
    ),
    request_body = UpdateLeaveStatus,
    responses(
        (status = 200, description = "Status updated", body = Object, example = json!({
            "message": "Leave status updated"
        }))
    ),
    tag = "Leave"
)]
pub async fn update_leave_status(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<UpdateLeaveStatus>,
) -> Result<HttpResponse, ApiError> {
    let leave_id = path.into_inner();

    sqlx::query(
        r#"
        UPDATE leave_requests
        SET status = ?, updated_at = NOW()
        WHERE leave_id = ?
        "#,
    )
    .bind(&payload.status)
    .bind(leave_id)
    .execute(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Leave status updated"
    })))
}

/* =========================
Delete leave request
========================= */
#[utoipa::path(
    delete,
    path = "/leaves/{leave_id}",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request")
    ),
    responses(
        (status = 200, description = "Deleted (or never existed)", body = Object, example = json!({
            "message": "Leave request deleted"
        }))
    ),
    tag = "Leave"
)]
pub async fn delete_leave(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let leave_id = path.into_inner();

    let result = sqlx::query("DELETE FROM leave_requests WHERE leave_id = ?")
        .bind(leave_id)
        .execute(pool.get_ref())
        .await?;

    Ok(deleted("Leave request deleted", result.rows_affected()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::lazy_pool;
    use actix_web::App;
    use actix_web::http::StatusCode;
    use actix_web::test::{TestRequest, call_service, init_service, read_body_json};
    use serde_json::Value;

    #[test]
    fn emp_id_accepts_number_or_string() {
        let from_number: CreateLeave =
            serde_json::from_value(json!({ "emp_id": 7, "start_date": "2026-01-01" })).unwrap();
        let from_text: CreateLeave =
            serde_json::from_value(json!({ "emp_id": " 7 ", "start_date": "2026-01-01" })).unwrap();

        assert_eq!(from_number.emp_id, 7);
        assert_eq!(from_text.emp_id, 7);

        assert!(serde_json::from_value::<CreateLeave>(json!({ "emp_id": "seven" })).is_err());
    }

    #[actix_web::test]
    async fn unparsable_dates_are_rejected_before_insert() {
        let app = init_service(
            App::new()
                .app_data(web::Data::new(lazy_pool()))
                .route("/leaves", web::post().to(create_leave)),
        )
        .await;

        for body in [
            json!({ "emp_id": 1, "leave_type": "sick", "start_date": "next monday", "end_date": "2026-01-03" }),
            json!({ "emp_id": 1, "leave_type": "sick", "start_date": "2026-01-01T00:00:00Z" }),
            json!({ "emp_id": "1", "leave_type": "sick", "start_date": "2026-01-01", "end_date": "03/01/2026" }),
        ] {
            let req = TestRequest::post()
                .uri("/leaves")
                .set_json(&body)
                .to_request();
            let resp = call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", body);

            let json: Value = read_body_json(resp).await;
            assert_eq!(json["error"], "Invalid date format");
        }
    }
}
