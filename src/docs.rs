use crate::api::attendance::MarkAttendance;
use crate::api::employee::CreateEmployee;
use crate::model::attendance::AttendanceEntry;
use crate::model::dashboard::DashboardStats;
use crate::model::employee::EmployeeWithPresence;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS API",
        version = "0.1.0",
        description = r#"
## Employee & Attendance Records

- **Employees**: add, list (with present-day counts), delete. Deleting an
  employee removes its attendance history too.
- **Attendance**: one record per employee per date. Marking the same date
  again replaces the status.
- **Dashboard**: headcount plus global `Present` / `Absent` counts. Status
  matching is exact and case-sensitive.

Every error body is `{"error": "<message>"}`.
"#,
    ),
    paths(
        crate::api::dashboard::index,
        crate::api::dashboard::get_dashboard,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::delete_employee,

        crate::api::attendance::mark_attendance,
        crate::api::attendance::get_attendance,
    ),
    components(
        schemas(
            CreateEmployee,
            EmployeeWithPresence,
            MarkAttendance,
            AttendanceEntry,
            DashboardStats
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "Dashboard", description = "Service banner and aggregate counts"),
    )
)]
pub struct ApiDoc;
