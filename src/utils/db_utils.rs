use sqlx::sqlite::SqliteQueryResult;

/// ===============================
/// Unique constraint detection
/// ===============================
///
/// Returns the constraint message (which names the colliding columns) when `err`
/// is a UNIQUE violation raised by the store.
pub fn unique_violation(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            Some(db_err.message().to_string())
        }
        _ => None,
    }
}

/// ===============================
/// Affected row check
/// ===============================
pub fn touched_any(result: &SqliteQueryResult) -> bool {
    result.rows_affected() > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[actix_web::test]
    async fn detects_unique_violation() {
        let pool = test_pool().await;
        let insert = "INSERT INTO employees (employee_id, full_name, email, department) \
                      VALUES ('E001', 'Jane', ?, 'Eng')";

        sqlx::query(insert)
            .bind("jane@co.com")
            .execute(&pool)
            .await
            .unwrap();
        // same external id, different email
        let err = sqlx::query(insert)
            .bind("other@co.com")
            .execute(&pool)
            .await
            .unwrap_err();

        let message = unique_violation(&err).expect("unique violation");
        assert!(message.contains("employees.employee_id"), "{message}");
    }

    #[test]
    fn other_errors_are_not_unique_violations() {
        assert_eq!(unique_violation(&sqlx::Error::RowNotFound), None);
    }
}
