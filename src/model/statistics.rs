use serde::Serialize;
use utoipa::ToSchema;

/// Attendance totals for one employee. Computed per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AttendanceSummary {
    #[schema(example = 1)]
    pub employee_id: i64,
    #[schema(example = "Jane Doe")]
    pub employee_name: String,
    #[schema(example = 18)]
    pub total_present: i64,
    #[schema(example = 2)]
    pub total_absent: i64,
    /// Always `total_present + total_absent`.
    #[schema(example = 20)]
    pub total_days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DashboardSummary {
    #[schema(example = 12)]
    pub total_employees: i64,
    #[schema(example = 240)]
    pub total_attendance_records: i64,
    #[schema(example = 10)]
    pub today_present: i64,
    #[schema(example = 2)]
    pub today_absent: i64,
}
