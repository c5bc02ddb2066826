use serde_json::Value;
use sqlx::MySqlPool;

use crate::error::ApiError;

/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug, PartialEq)]
pub enum SqlValue {
    String(String),
    U64(u64),
    Null,
}

/// ===============================
/// SQL update container
/// ===============================
#[derive(Debug)]
pub struct SqlUpdate {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

/// ===============================
/// Build dynamic UPDATE SQL
/// ===============================
///
/// Only keys listed in `columns` are written, in that order; anything else in
/// the payload (ids, timestamps echoed back by a client) is ignored.
pub fn build_update_sql(
    table: &str,
    payload: &Value,
    columns: &[&str],
    id_column: &str,
    id_value: u64,
) -> Result<SqlUpdate, ApiError> {
    let obj = payload
        .as_object()
        .ok_or_else(|| ApiError::BadRequest("Payload must be a JSON object".into()))?;

    let mut assignments = Vec::new();
    let mut values = Vec::with_capacity(columns.len() + 1);

    for column in columns {
        let Some(value) = obj.get(*column) else {
            continue;
        };

        let value = match value {
            Value::String(s) => SqlValue::String(s.clone()),
            // phone numbers typed into a numeric field
            Value::Number(n) => SqlValue::String(n.to_string()),
            Value::Null => SqlValue::Null,
            _ => {
                return Err(ApiError::BadRequest(format!(
                    "Unsupported value for {}",
                    column
                )));
            }
        };

        assignments.push(format!("{} = ?", column));
        values.push(value);
    }

    if assignments.is_empty() {
        return Err(ApiError::BadRequest("No fields provided for update".into()));
    }

    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        table,
        assignments.join(", "),
        id_column
    );

    // WHERE id = ?
    values.push(SqlValue::U64(id_value));

    Ok(SqlUpdate { sql, values })
}

/// ===============================
/// Execute the update
/// ===============================
pub async fn execute_update(pool: &MySqlPool, update: SqlUpdate) -> Result<u64, sqlx::Error> {
    let mut query = sqlx::query(&update.sql);

    for value in update.values {
        query = match value {
            SqlValue::String(v) => query.bind(v),
            SqlValue::U64(v) => query.bind(v),
            SqlValue::Null => query.bind(None::<String>),
        };
    }

    let result = query.execute(pool).await?;
    Ok(result.rows_affected())
}

/// Wraps a search term for a substring `LIKE`, escaping MySQL wildcards so
/// `%` and `_` in user input match literally.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
