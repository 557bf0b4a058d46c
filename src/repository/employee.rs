use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::model::employee::{Employee, EmployeeWithAttendance};
use crate::models::{NewEmployee, normalize_email};
use crate::repository::attendance;
use crate::utils::db_utils::{touched_any, unique_violation};

pub async fn get_employee(pool: &SqlitePool, id: i64) -> Result<Option<Employee>, AppError> {
    let employee = sqlx::query_as::<_, Employee>(
        "SELECT id, employee_id, full_name, email, department FROM employees WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(employee)
}

pub async fn get_employee_by_external_id(
    pool: &SqlitePool,
    employee_id: &str,
) -> Result<Option<Employee>, AppError> {
    let employee = sqlx::query_as::<_, Employee>(
        "SELECT id, employee_id, full_name, email, department FROM employees WHERE employee_id = ?",
    )
    .bind(employee_id)
    .fetch_optional(pool)
    .await?;

    Ok(employee)
}

pub async fn get_employee_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<Employee>, AppError> {
    let employee = sqlx::query_as::<_, Employee>(
        "SELECT id, employee_id, full_name, email, department FROM employees WHERE email = ?",
    )
    .bind(normalize_email(email))
    .fetch_optional(pool)
    .await?;

    Ok(employee)
}

/// Page of employees in insertion order.
pub async fn list_employees(
    pool: &SqlitePool,
    skip: u32,
    limit: u32,
) -> Result<Vec<Employee>, AppError> {
    debug!(skip, limit, "Fetching employees");

    let employees = sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, employee_id, full_name, email, department
        FROM employees
        ORDER BY id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(i64::from(limit))
    .bind(i64::from(skip))
    .fetch_all(pool)
    .await?;

    Ok(employees)
}

fn employee_id_taken(new: &NewEmployee) -> AppError {
    AppError::Conflict(format!("Employee ID '{}' already exists", new.employee_id()))
}

fn email_taken(new: &NewEmployee) -> AppError {
    AppError::Conflict(format!("Email '{}' is already registered", new.email()))
}

/// Fails with `Conflict` when the external id or the email is already taken,
/// checking the external id first.
pub async fn create_employee(pool: &SqlitePool, new: &NewEmployee) -> Result<Employee, AppError> {
    if get_employee_by_external_id(pool, new.employee_id()).await?.is_some() {
        warn!(employee_id = new.employee_id(), "Duplicate employee id");
        return Err(employee_id_taken(new));
    }

    if get_employee_by_email(pool, new.email()).await?.is_some() {
        warn!(email = new.email(), "Duplicate employee email");
        return Err(email_taken(new));
    }

    insert_employee(pool, new).await
}

/// Plain insert. A UNIQUE violation here means a concurrent insert won the race
/// after the pre-checks passed.
async fn insert_employee(pool: &SqlitePool, new: &NewEmployee) -> Result<Employee, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO employees (employee_id, full_name, email, department)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(new.employee_id())
    .bind(new.full_name())
    .bind(new.email())
    .bind(new.department())
    .execute(pool)
    .await
    .map_err(|e| match unique_violation(&e) {
        Some(constraint) if constraint.contains("employees.email") => email_taken(new),
        Some(_) => employee_id_taken(new),
        None => AppError::from(e),
    })?;

    let id = result.last_insert_rowid();
    info!(id, employee_id = new.employee_id(), "Employee created");

    Ok(Employee {
        id,
        employee_id: new.employee_id().to_string(),
        full_name: new.full_name().to_string(),
        email: new.email().to_string(),
        department: new.department().to_string(),
    })
}

pub async fn get_employee_with_attendance(
    pool: &SqlitePool,
    id: i64,
) -> Result<EmployeeWithAttendance, AppError> {
    let employee = get_employee(pool, id)
        .await?
        .ok_or_else(|| AppError::employee_not_found(id))?;

    let attendance_records = attendance::get_attendance_by_employee(pool, id).await?;

    Ok(EmployeeWithAttendance {
        employee,
        attendance_records,
    })
}

/// Removes the employee and, through the foreign key, all of its attendance.
/// Returns whether the employee existed.
pub async fn delete_employee(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    let deleted = touched_any(&result);
    if deleted {
        info!(id, "Employee deleted");
    }
    Ok(deleted)
}
