use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::attendance::Attendance;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": "E001",
        "full_name": "Jane Doe",
        "email": "jane@co.com",
        "department": "Engineering"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: i64,

    /// Externally assigned identifier, unique and case-sensitive.
    #[schema(example = "E001")]
    pub employee_id: String,

    #[schema(example = "Jane Doe")]
    pub full_name: String,

    /// Stored lowercase.
    #[schema(example = "jane@co.com", format = "email")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeWithAttendance {
    #[serde(flatten)]
    pub employee: Employee,

    /// Newest first.
    pub attendance_records: Vec<Attendance>,
}
