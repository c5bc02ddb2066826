use crate::{
    api::deleted,
    error::ApiError,
    model::employee::Employee,
    utils::db_utils::{build_update_sql, execute_update, like_pattern},
};
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use sqlx::MySqlPool;
use strum_macros::{AsRefStr, EnumString};
use tracing::{debug, error};
use utoipa::{IntoParams, ToSchema};

/// Columns a client may write through create/update.
const EDITABLE_COLUMNS: &[&str] = &["emp_name", "emp_email", "emp_phone", "emp_designation"];

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

#[derive(Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "John Doe")]
    pub emp_name: Option<String>,
    #[schema(example = "john@email.com", format = "email")]
    pub emp_email: Option<String>,
    #[schema(example = "+8801712345678")]
    pub emp_phone: Option<String>,
    #[schema(example = "Software Engineer")]
    pub emp_designation: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EmployeeQuery {
    /// Page number, starting at 1
    pub page: Option<i64>,
    /// Items per page (1-100)
    pub limit: Option<i64>,
    /// Free-text search across name, email and designation
    pub q: Option<String>,
    /// Name filter, ignored when `q` is given
    pub name: Option<String>,
    /// Email filter, ignored when `q` is given
    pub email: Option<String>,
    /// Designation filter, ignored when `q` is given
    pub designation: Option<String>,
    /// One of emp_id, emp_name, emp_email, emp_phone, emp_designation, created_at
    pub sort_by: Option<String>,
    /// asc or desc
    pub order: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum SortColumn {
    EmpId,
    EmpName,
    EmpEmail,
    EmpPhone,
    EmpDesignation,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Resolves the requested ordering against the column whitelist.
///
/// A column outside the whitelist resets the whole ordering to `emp_id DESC`,
/// whatever `order` says.
pub fn resolve_sort(sort_by: Option<&str>, order: Option<&str>) -> (SortColumn, SortOrder) {
    let order = order
        .and_then(|o| o.parse::<SortOrder>().ok())
        .unwrap_or(SortOrder::Desc);

    match sort_by.map(str::trim).filter(|s| !s.is_empty()) {
        None => (SortColumn::EmpId, order),
        Some(col) => match col.parse::<SortColumn>() {
            Ok(col) => (col, order),
            Err(_) => (SortColumn::EmpId, SortOrder::Desc),
        },
    }
}

/// SQL for one page of the employee list plus its total count.
#[derive(Debug)]
pub struct EmployeeListSql {
    pub count_sql: String,
    pub data_sql: String,
    pub bindings: Vec<String>,
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl EmployeeQuery {
    pub fn to_sql(&self) -> EmployeeListSql {
        // capped so `(page - 1) * limit` stays inside i64
        let page = self.page.unwrap_or(1).clamp(1, i64::MAX / MAX_LIMIT);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = (page - 1) * limit;

        // ---------- build WHERE clause ----------
        // LIKE BINARY keeps the substring match case-sensitive
        let mut conditions = Vec::new();
        let mut bindings = Vec::new();

        if let Some(q) = non_empty(&self.q) {
            conditions.push(
                "(emp_name LIKE BINARY ? OR emp_email LIKE BINARY ? OR emp_designation LIKE BINARY ?)",
            );
            let like = like_pattern(q);
            bindings.push(like.clone());
            bindings.push(like.clone());
            bindings.push(like);
        } else {
            let filters = [
                ("emp_name LIKE BINARY ?", non_empty(&self.name)),
                ("emp_email LIKE BINARY ?", non_empty(&self.email)),
                ("emp_designation LIKE BINARY ?", non_empty(&self.designation)),
            ];
            for (condition, value) in filters {
                if let Some(value) = value {
                    conditions.push(condition);
                    bindings.push(like_pattern(value));
                }
            }
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let (column, order) = resolve_sort(self.sort_by.as_deref(), self.order.as_deref());

        EmployeeListSql {
            count_sql: format!("SELECT COUNT(*) FROM employees{}", where_clause),
            data_sql: format!(
                "SELECT emp_id, emp_name, emp_email, emp_phone, emp_designation, created_at \
                 FROM employees{} ORDER BY {} {} LIMIT ? OFFSET ?",
                where_clause,
                column.as_ref(),
                order.as_sql()
            ),
            bindings,
            page,
            limit,
            offset,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    #[schema(example = 10)]
    pub total: i64,
    #[schema(example = 1)]
    pub page: i64,
    #[schema(example = 10)]
    pub limit: i64,
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created successfully", body = Object, example = json!({
            "message": "Employee added successfully",
            "emp_id": 1
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, ApiError> {
    let result = sqlx::query(
        r#"
        INSERT INTO employees
        (emp_name, emp_email, emp_phone, emp_designation, created_at)
        VALUES (?, ?, ?, ?, NOW())
        "#,
    )
    .bind(&payload.emp_name)
    .bind(&payload.emp_email)
    .bind(&payload.emp_phone)
    .bind(&payload.emp_designation)
    .execute(pool.get_ref())
    .await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Employee added successfully",
        "emp_id": result.last_insert_id()
    })))
}

// -------------------- Handler --------------------

#[utoipa::path(
    get,
    path = "/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Paginated employee list", body = EmployeeListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    pool: web::Data<MySqlPool>,
    query: web::Query<EmployeeQuery>,
) -> HttpResponse {
    let list = query.to_sql();

    match fetch_page(pool.get_ref(), &list).await {
        Ok((data, total)) => HttpResponse::Ok().json(EmployeeListResponse {
            data,
            total,
            page: list.page,
            limit: list.limit,
        }),
        Err(e) => {
            error!(error = %e, sql = %list.data_sql, "Failed to list employees");
            HttpResponse::InternalServerError().json(json!({
                "error": "Internal Server Error"
            }))
        }
    }
}

async fn fetch_page(
    pool: &MySqlPool,
    list: &EmployeeListSql,
) -> Result<(Vec<Employee>, i64), sqlx::Error> {
    // ---------- total count ----------
    debug!(sql = %list.count_sql, bindings = ?list.bindings, "Counting employees");

    let mut count_query = sqlx::query_scalar::<_, i64>(&list.count_sql);
    for b in &list.bindings {
        count_query = count_query.bind(b);
    }
    let total = count_query.fetch_one(pool).await?;

    // ---------- data query ----------
    debug!(
        sql = %list.data_sql,
        page = list.page,
        limit = list.limit,
        offset = list.offset,
        "Fetching employees"
    );

    let mut data_query = sqlx::query_as::<_, Employee>(&list.data_sql);
    for b in &list.bindings {
        data_query = data_query.bind(b);
    }
    let employees = data_query
        .bind(list.limit)
        .bind(list.offset)
        .fetch_all(pool)
        .await?;

    Ok((employees, total))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/employees/{emp_id}",
    params(
        ("emp_id" = u64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let emp_id = path.into_inner();

    let employee = sqlx::query_as::<_, Employee>(
        r#"
        SELECT emp_id, emp_name, emp_email, emp_phone, emp_designation, created_at
        FROM employees
        WHERE emp_id = ?
        "#,
    )
    .bind(emp_id)
    .fetch_optional(pool.get_ref())
    .await?;

    employee
        .map(|emp| HttpResponse::Ok().json(emp))
        .ok_or_else(|| ApiError::NotFound("Employee not found".into()))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/employees/{emp_id}",
    params(
        ("emp_id" = u64, Path, description = "Employee ID")
    ),
    request_body = CreateEmployee,
    responses(
        (status = 200, description = "Employee updated successfully", body = Object, example = json!({
            "message": "Employee updated successfully"
        })),
        (status = 400, description = "No editable fields in payload")
    ),
    tag = "Employee"
)]
pub async fn update_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let emp_id = path.into_inner();

    let update = build_update_sql("employees", &body, EDITABLE_COLUMNS, "emp_id", emp_id)?;

    let affected = execute_update(pool.get_ref(), update).await?;
    debug!(emp_id, affected, "Employee updated");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee updated successfully"
    })))
}

/// Delete Employee
///
/// There is no existence check: deleting an unknown id still succeeds.
#[utoipa::path(
    delete,
    path = "/employees/{emp_id}",
    params(
        ("emp_id" = u64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Deleted (or never existed)", body = Object, example = json!({
            "message": "Employee deleted successfully"
        }))
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let emp_id = path.into_inner();

    let result = sqlx::query("DELETE FROM employees WHERE emp_id = ?")
        .bind(emp_id)
        .execute(pool.get_ref())
        .await?;

    Ok(deleted("Employee deleted successfully", result.rows_affected()))
}
