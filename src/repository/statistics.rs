use chrono::{Local, NaiveDate};
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::model::attendance::AttendanceStatus;
use crate::model::statistics::{AttendanceSummary, DashboardSummary};
use crate::repository::employee;

async fn count_for_employee(
    pool: &SqlitePool,
    employee_id: i64,
    status: AttendanceStatus,
) -> Result<i64, AppError> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM attendance WHERE employee_id = ? AND status = ?",
    )
    .bind(employee_id)
    .bind(status)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

async fn count_on_date(
    pool: &SqlitePool,
    date: NaiveDate,
    status: AttendanceStatus,
) -> Result<i64, AppError> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM attendance WHERE date = ? AND status = ?",
    )
    .bind(date)
    .bind(status)
    .fetch_one(pool)
    .await?;

    Ok(count)
}

async fn count_rows(pool: &SqlitePool, table: &str) -> Result<i64, AppError> {
    let count = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Present/absent totals for one employee, counted fresh on every call.
pub async fn employee_summary(
    pool: &SqlitePool,
    employee_id: i64,
) -> Result<AttendanceSummary, AppError> {
    let employee = employee::get_employee(pool, employee_id)
        .await?
        .ok_or_else(|| AppError::employee_not_found(employee_id))?;

    let total_present = count_for_employee(pool, employee_id, AttendanceStatus::Present).await?;
    let total_absent = count_for_employee(pool, employee_id, AttendanceStatus::Absent).await?;

    Ok(AttendanceSummary {
        employee_id,
        employee_name: employee.full_name,
        total_present,
        total_absent,
        total_days: total_present + total_absent,
    })
}

/// Global counts, with today's split taken from the server's local date.
pub async fn dashboard_summary(pool: &SqlitePool) -> Result<DashboardSummary, AppError> {
    dashboard_summary_on(pool, Local::now().date_naive()).await
}

pub(crate) async fn dashboard_summary_on(
    pool: &SqlitePool,
    today: NaiveDate,
) -> Result<DashboardSummary, AppError> {
    Ok(DashboardSummary {
        total_employees: count_rows(pool, "employees").await?,
        total_attendance_records: count_rows(pool, "attendance").await?,
        today_present: count_on_date(pool, today, AttendanceStatus::Present).await?,
        today_absent: count_on_date(pool, today, AttendanceStatus::Absent).await?,
    })
}
