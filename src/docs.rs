use crate::api::dashboard::{DashboardStats, RevenueSlice};
use crate::api::department::DepartmentPayload;
use crate::api::designation::DesignationPayload;
use crate::api::employee::{CreateEmployee, EmployeeListResponse};
use crate::api::leave_request::{CreateLeave, UpdateLeaveStatus};
use crate::model::department::Department;
use crate::model::designation::Designation;
use crate::model::employee::Employee;
use crate::model::leave_request::LeaveRequest;
use crate::model::user::User;
use crate::models::{LoginReqDto, ProfileUpdateDto};
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Admin API",
        version = "1.0.0",
        description = r#"
## HR administration backend

- **Auth**: login, current profile, profile update
- **Employees**: CRUD with paginated, searchable, sortable listing
- **Designations / Departments**: master tables
- **Leave requests**: apply, change status, cancel
- **Dashboard**: static widget figures

Protected endpoints take `Authorization: Bearer <token>` where the token is
whatever `/login` returned.
"#,
    ),
    paths(
        crate::auth::handlers::login,
        crate::auth::handlers::me,
        crate::auth::handlers::update_profile,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::designation::list_designations,
        crate::api::designation::get_designation,
        crate::api::designation::create_designation,
        crate::api::designation::update_designation,
        crate::api::designation::delete_designation,

        crate::api::department::list_departments,
        crate::api::department::get_department,
        crate::api::department::create_department,
        crate::api::department::update_department,
        crate::api::department::delete_department,

        crate::api::leave_request::leave_list,
        crate::api::leave_request::create_leave,
        crate::api::leave_request::update_leave_status,
        crate::api::leave_request::delete_leave,

        crate::api::dashboard::dashboard_stats
    ),
    components(
        schemas(
            LoginReqDto,
            ProfileUpdateDto,
            User,
            Employee,
            CreateEmployee,
            EmployeeListResponse,
            Designation,
            DesignationPayload,
            Department,
            DepartmentPayload,
            LeaveRequest,
            CreateLeave,
            UpdateLeaveStatus,
            DashboardStats,
            RevenueSlice
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login and profile APIs"),
        (name = "Employee", description = "Employee directory APIs"),
        (name = "Designation", description = "Designation master APIs"),
        (name = "Department", description = "Department master APIs"),
        (name = "Leave", description = "Leave request APIs"),
        (name = "Dashboard", description = "Dashboard APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();

        for path in [
            "/login",
            "/me",
            "/profile/update",
            "/employees",
            "/employees/{emp_id}",
            "/designations",
            "/designations/{desig_id}",
            "/departments",
            "/departments/{dept_id}",
            "/leaves",
            "/leaves/{leave_id}",
            "/dashboard/stats",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{} not documented", path);
        }

        let schemes = &doc.components.as_ref().unwrap().security_schemes;
        assert!(schemes.contains_key("bearer_auth"));
    }
}
