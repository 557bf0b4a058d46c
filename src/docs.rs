use crate::model::attendance::{Attendance, AttendanceStatus};
use crate::model::employee::{Employee, EmployeeWithAttendance};
use crate::model::statistics::{AttendanceSummary, DashboardSummary};
use crate::models::{AttendanceCreate, AttendanceStatusUpdate, EmployeeCreate};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRMS Lite API",
        version = "1.0.0",
        description = r#"
## HRMS Lite

A lightweight **Human Resource Management** record keeper.

### 🔹 Key Features
- **Employee Management**
  - Create, list, view and delete employees
  - Employee ID and email are unique; emails are compared case-insensitively
- **Attendance Management**
  - Mark one Present/Absent record per employee per day
  - Browse by employee or by date, correct or delete a record
- **Statistics**
  - Per-employee present/absent totals
  - Dashboard counts with today's split

### 📦 Response Format
- JSON-based RESTful responses
- Errors are `{"detail": "..."}`: 422 invalid input, 400 already exists, 404 not found
- `skip`/`limit` offset pagination on list endpoints

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::health::index,
        crate::api::health::health,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::create_attendance,
        crate::api::attendance::list_attendance,
        crate::api::attendance::employee_attendance,
        crate::api::attendance::attendance_on_date,
        crate::api::attendance::update_attendance,
        crate::api::attendance::delete_attendance,

        crate::api::statistics::employee_statistics,
        crate::api::statistics::dashboard_statistics
    ),
    components(
        schemas(
            Employee,
            EmployeeWithAttendance,
            EmployeeCreate,
            Attendance,
            AttendanceStatus,
            AttendanceCreate,
            AttendanceStatusUpdate,
            AttendanceSummary,
            DashboardSummary
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
        (name = "Attendance", description = "Attendance management APIs"),
        (name = "Statistics", description = "Attendance statistics APIs"),
        (name = "Health", description = "Service and store status"),
    )
)]
pub struct ApiDoc;
