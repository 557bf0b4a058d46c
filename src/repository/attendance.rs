use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::model::attendance::{Attendance, AttendanceStatus};
use crate::models::AttendanceCreate;
use crate::repository::employee;
use crate::utils::db_utils::{touched_any, unique_violation};

pub async fn get_attendance(pool: &SqlitePool, id: i64) -> Result<Option<Attendance>, AppError> {
    let record = sqlx::query_as::<_, Attendance>(
        "SELECT id, employee_id, date, status FROM attendance WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// All records of one employee, newest date first.
pub async fn get_attendance_by_employee(
    pool: &SqlitePool,
    employee_id: i64,
) -> Result<Vec<Attendance>, AppError> {
    let records = sqlx::query_as::<_, Attendance>(
        r#"
        SELECT id, employee_id, date, status
        FROM attendance
        WHERE employee_id = ?
        ORDER BY date DESC, id DESC
        "#,
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

pub async fn get_attendance_by_date(
    pool: &SqlitePool,
    date: NaiveDate,
) -> Result<Vec<Attendance>, AppError> {
    let records = sqlx::query_as::<_, Attendance>(
        "SELECT id, employee_id, date, status FROM attendance WHERE date = ?",
    )
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

pub async fn get_attendance_by_employee_and_date(
    pool: &SqlitePool,
    employee_id: i64,
    date: NaiveDate,
) -> Result<Option<Attendance>, AppError> {
    let record = sqlx::query_as::<_, Attendance>(
        "SELECT id, employee_id, date, status FROM attendance WHERE employee_id = ? AND date = ?",
    )
    .bind(employee_id)
    .bind(date)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

pub async fn list_all_attendance(
    pool: &SqlitePool,
    skip: u32,
    limit: u32,
) -> Result<Vec<Attendance>, AppError> {
    debug!(skip, limit, "Fetching attendance");

    let records = sqlx::query_as::<_, Attendance>(
        r#"
        SELECT id, employee_id, date, status
        FROM attendance
        ORDER BY date DESC, id DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(i64::from(limit))
    .bind(i64::from(skip))
    .fetch_all(pool)
    .await?;

    Ok(records)
}

fn already_marked(payload: &AttendanceCreate) -> AppError {
    AppError::Conflict(format!(
        "Attendance already marked for employee {} on {}",
        payload.employee_id, payload.date
    ))
}

/// Marks attendance for an existing employee. At most one record per employee per
/// day: the pre-check gives the friendly message, the table constraint settles
/// concurrent inserts.
pub async fn create_attendance(
    pool: &SqlitePool,
    payload: &AttendanceCreate,
) -> Result<Attendance, AppError> {
    let employee_id = payload.employee_id;

    if employee::get_employee(pool, employee_id).await?.is_none() {
        return Err(AppError::employee_not_found(employee_id));
    }

    if get_attendance_by_employee_and_date(pool, employee_id, payload.date)
        .await?
        .is_some()
    {
        warn!(employee_id, date = %payload.date, "Attendance already marked");
        return Err(already_marked(payload));
    }

    insert_attendance(pool, payload).await
}

async fn insert_attendance(
    pool: &SqlitePool,
    payload: &AttendanceCreate,
) -> Result<Attendance, AppError> {
    let result = sqlx::query("INSERT INTO attendance (employee_id, date, status) VALUES (?, ?, ?)")
        .bind(payload.employee_id)
        .bind(payload.date)
        .bind(payload.status)
        .execute(pool)
        .await
        .map_err(|e| match unique_violation(&e) {
            Some(_) => already_marked(payload),
            None => AppError::from(e),
        })?;

    let id = result.last_insert_rowid();
    info!(
        id,
        employee_id = payload.employee_id,
        date = %payload.date,
        status = %payload.status,
        "Attendance marked"
    );

    Ok(Attendance {
        id,
        employee_id: payload.employee_id,
        date: payload.date,
        status: payload.status,
    })
}

/// Overwrites the status in place. No history is kept.
pub async fn update_attendance_status(
    pool: &SqlitePool,
    id: i64,
    status: AttendanceStatus,
) -> Result<Attendance, AppError> {
    let result = sqlx::query("UPDATE attendance SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;

    if !touched_any(&result) {
        return Err(AppError::attendance_not_found(id));
    }

    info!(id, status = %status, "Attendance updated");

    get_attendance(pool, id)
        .await?
        .ok_or_else(|| AppError::attendance_not_found(id))
}

pub async fn delete_attendance(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM attendance WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(touched_any(&result))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::{file_test_pool, test_pool};
    use crate::repository::employee::{create_employee, delete_employee, tests::new_employee};

    pub(crate) fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub(crate) fn mark(employee_id: i64, date: NaiveDate, status: AttendanceStatus) -> AttendanceCreate {
        AttendanceCreate {
            employee_id,
            date,
            status,
        }
    }

    async fn pool_with_employee() -> (SqlitePool, i64) {
        let pool = test_pool().await;
        let employee = create_employee(&pool, &new_employee("E001", "jane@co.com"))
            .await
            .unwrap();
        (pool, employee.id)
    }

    #[actix_web::test]
    async fn create_and_read_back() {
        let (pool, emp) = pool_with_employee().await;

        let created = create_attendance(&pool, &mark(emp, day(2024, 1, 10), AttendanceStatus::Present))
            .await
            .unwrap();

        assert_eq!(created.employee_id, emp);
        assert_eq!(get_attendance(&pool, created.id).await.unwrap(), Some(created.clone()));
        assert_eq!(
            get_attendance_by_employee_and_date(&pool, emp, day(2024, 1, 10))
                .await
                .unwrap(),
            Some(created)
        );
        assert_eq!(get_attendance(&pool, 999).await.unwrap(), None);
    }

    #[actix_web::test]
    async fn unknown_employee_is_not_found() {
        let pool = test_pool().await;

        let err = create_attendance(&pool, &mark(77, day(2024, 1, 10), AttendanceStatus::Present))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Employee with ID 77 not found");
    }

    #[actix_web::test]
    async fn second_record_same_day_conflicts_whatever_the_status() {
        let (pool, emp) = pool_with_employee().await;
        create_attendance(&pool, &mark(emp, day(2024, 1, 10), AttendanceStatus::Present))
            .await
            .unwrap();

        let err = create_attendance(&pool, &mark(emp, day(2024, 1, 10), AttendanceStatus::Absent))
            .await
            .unwrap_err();
        match err {
            AppError::Conflict(message) => {
                assert!(message.contains("2024-01-10"), "{message}")
            }
            other => panic!("expected conflict, got {other:?}"),
        }

        // a different day is fine
        create_attendance(&pool, &mark(emp, day(2024, 1, 11), AttendanceStatus::Absent))
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn store_constraint_backs_the_one_per_day_rule() {
        let (pool, emp) = pool_with_employee().await;
        create_attendance(&pool, &mark(emp, day(2024, 1, 10), AttendanceStatus::Present))
            .await
            .unwrap();

        let err = sqlx::query("INSERT INTO attendance (employee_id, date, status) VALUES (?, ?, ?)")
            .bind(emp)
            .bind(day(2024, 1, 10))
            .bind(AttendanceStatus::Absent)
            .execute(&pool)
            .await
            .unwrap_err();
        assert!(unique_violation(&err).is_some());
    }

    #[actix_web::test]
    async fn insert_past_the_pre_check_still_conflicts() {
        let (pool, emp) = pool_with_employee().await;
        insert_attendance(&pool, &mark(emp, day(2024, 1, 10), AttendanceStatus::Present))
            .await
            .unwrap();

        let err = insert_attendance(&pool, &mark(emp, day(2024, 1, 10), AttendanceStatus::Absent))
            .await
            .unwrap_err();
        match err {
            AppError::Conflict(message) => assert_eq!(
                message,
                format!("Attendance already marked for employee {emp} on 2024-01-10")
            ),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[actix_web::test]
    async fn concurrent_marks_for_one_day_leave_a_single_record() {
        let dir = tempfile::tempdir().unwrap();
        let pool = file_test_pool(&dir.path().join("hrms.db")).await;
        let emp = create_employee(&pool, &new_employee("E001", "jane@co.com"))
            .await
            .unwrap()
            .id;

        for d in 1..=10 {
            let date = day(2024, 4, d);
            let handles: Vec<_> = [AttendanceStatus::Present, AttendanceStatus::Absent]
                .into_iter()
                .map(|status| {
                    let pool = pool.clone();
                    actix_web::rt::spawn(async move {
                        create_attendance(&pool, &mark(emp, date, status)).await
                    })
                })
                .collect();

            let mut created = 0;
            for handle in handles {
                match handle.await.unwrap() {
                    Ok(_) => created += 1,
                    Err(AppError::Conflict(_)) => {}
                    Err(other) => panic!("expected success or conflict, got {other:?}"),
                }
            }
            assert_eq!(created, 1, "day {date}");
            assert_eq!(get_attendance_by_date(&pool, date).await.unwrap().len(), 1);
        }
    }

    #[actix_web::test]
    async fn by_employee_is_newest_first() {
        let (pool, emp) = pool_with_employee().await;
        for d in [day(2024, 1, 9), day(2024, 1, 12), day(2024, 1, 10)] {
            create_attendance(&pool, &mark(emp, d, AttendanceStatus::Present))
                .await
                .unwrap();
        }

        let dates: Vec<_> = get_attendance_by_employee(&pool, emp)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.date)
            .collect();
        assert_eq!(dates, [day(2024, 1, 12), day(2024, 1, 10), day(2024, 1, 9)]);
    }

    #[actix_web::test]
    async fn by_date_spans_employees() {
        let (pool, first) = pool_with_employee().await;
        let second = create_employee(&pool, &new_employee("E002", "b@co.com"))
            .await
            .unwrap()
            .id;

        create_attendance(&pool, &mark(first, day(2024, 3, 1), AttendanceStatus::Present))
            .await
            .unwrap();
        create_attendance(&pool, &mark(second, day(2024, 3, 1), AttendanceStatus::Absent))
            .await
            .unwrap();
        create_attendance(&pool, &mark(second, day(2024, 3, 2), AttendanceStatus::Present))
            .await
            .unwrap();

        let mut owners: Vec<_> = get_attendance_by_date(&pool, day(2024, 3, 1))
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.employee_id)
            .collect();
        owners.sort();
        assert_eq!(owners, [first, second]);
        assert!(get_attendance_by_date(&pool, day(2023, 3, 1)).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn list_all_is_newest_first_and_paged() {
        let (pool, emp) = pool_with_employee().await;
        for d in 1..=4 {
            create_attendance(&pool, &mark(emp, day(2024, 2, d), AttendanceStatus::Present))
                .await
                .unwrap();
        }

        let page: Vec<_> = list_all_attendance(&pool, 1, 2)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.date)
            .collect();
        assert_eq!(page, [day(2024, 2, 3), day(2024, 2, 2)]);
    }

    #[actix_web::test]
    async fn status_update_round_trips() {
        let (pool, emp) = pool_with_employee().await;
        let created = create_attendance(&pool, &mark(emp, day(2024, 1, 10), AttendanceStatus::Present))
            .await
            .unwrap();

        let updated = update_attendance_status(&pool, created.id, AttendanceStatus::Absent)
            .await
            .unwrap();
        assert_eq!(updated.status, AttendanceStatus::Absent);

        let fetched = get_attendance(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, AttendanceStatus::Absent);
        assert_eq!(fetched.date, created.date);
    }

    #[actix_web::test]
    async fn status_update_of_missing_record_is_not_found() {
        let pool = test_pool().await;
        let err = update_attendance_status(&pool, 3, AttendanceStatus::Present)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[actix_web::test]
    async fn delete_reports_existence() {
        let (pool, emp) = pool_with_employee().await;
        let created = create_attendance(&pool, &mark(emp, day(2024, 1, 10), AttendanceStatus::Present))
            .await
            .unwrap();

        assert!(delete_attendance(&pool, created.id).await.unwrap());
        assert!(!delete_attendance(&pool, created.id).await.unwrap());
    }

    #[actix_web::test]
    async fn deleting_employee_cascades() {
        let (pool, emp) = pool_with_employee().await;
        let mut ids = Vec::new();
        for d in 1..=3 {
            let record = create_attendance(&pool, &mark(emp, day(2024, 1, d), AttendanceStatus::Present))
                .await
                .unwrap();
            ids.push(record.id);
        }

        assert!(delete_employee(&pool, emp).await.unwrap());

        for id in ids {
            assert_eq!(get_attendance(&pool, id).await.unwrap(), None);
        }
        assert!(get_attendance_by_employee(&pool, emp).await.unwrap().is_empty());
        assert!(list_all_attendance(&pool, 0, 1000).await.unwrap().is_empty());
    }
}
