pub mod dashboard;
pub mod department;
pub mod designation;
pub mod employee;
pub mod leave_request;

use actix_web::HttpResponse;
use serde_json::json;
use sqlx::{MySql, MySqlPool, Transaction};
use tracing::{debug, warn};

use crate::error::ApiError;

/// Opens the transaction for a master-table write. Failing to get one is a
/// write failure like any other: 400 with the database text.
pub(crate) async fn begin_write(
    pool: &MySqlPool,
    action: &str,
) -> Result<Transaction<'static, MySql>, ApiError> {
    pool.begin().await.map_err(|e| {
        warn!(error = %e, action, "Could not start transaction");
        ApiError::BadRequest(e.to_string())
    })
}

/// Master-table writes surface the raw database error to the client after
/// rolling the transaction back.
pub(crate) async fn rollback_with_error(
    tx: Transaction<'_, MySql>,
    e: sqlx::Error,
    action: &str,
) -> HttpResponse {
    if let Err(rollback_err) = tx.rollback().await {
        warn!(error = %rollback_err, action, "Rollback failed");
    }
    warn!(error = %e, action, "Write rolled back");

    HttpResponse::BadRequest().json(json!({
        "error": e.to_string()
    }))
}

/// Trimmed value of a required text field, or `None` when blank.
pub(crate) fn required_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Deletes succeed whether or not a row matched.
pub(crate) fn deleted(message: &str, affected: u64) -> HttpResponse {
    debug!(affected, "{}", message);

    HttpResponse::Ok().json(json!({
        "message": message
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, http::StatusCode};
    use serde_json::Value;

    #[test]
    fn required_text_rejects_blank() {
        assert_eq!(required_text(&None), None);
        assert_eq!(required_text(&Some("   ".into())), None);
        assert_eq!(required_text(&Some(" HR ".into())), Some("HR"));
    }

    #[actix_web::test]
    async fn delete_of_missing_row_still_succeeds() {
        let resp = deleted("Leave request deleted", 0);
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "message": "Leave request deleted" }));
    }
}
