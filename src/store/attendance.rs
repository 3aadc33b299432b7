use crate::{
    error::{ApiError, ApiResult},
    model::attendance::{AttendanceEntry, MarkOutcome},
};
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Record `status` for (`employee_id`, `date`).
///
/// An existing row for that pair has its status replaced; otherwise a new row is
/// inserted. Each step is a single autocommit statement, so concurrent writers
/// queue on SQLite's write lock (bounded by the pool's busy timeout) instead of
/// deadlocking inside a read-then-write transaction. The insert defers to the
/// unique (employee_id, date) index: when another writer got there first, this
/// call falls through to the update, and the last writer's status wins.
///
/// `date` and `status` are stored exactly as given.
pub async fn mark_attendance(
    pool: &SqlitePool,
    employee_id: i64,
    date: &str,
    status: &str,
) -> ApiResult<MarkOutcome> {
    let employee = sqlx::query_scalar::<_, i64>("SELECT id FROM employees WHERE id = ?")
        .bind(employee_id)
        .fetch_optional(pool)
        .await?;
    if employee.is_none() {
        return Err(ApiError::not_found("Employee not found"));
    }

    let inserted = sqlx::query(
        r#"
        INSERT INTO attendance (employee_id, date, status)
        VALUES (?, ?, ?)
        ON CONFLICT (employee_id, date) DO NOTHING
        "#,
    )
    .bind(employee_id)
    .bind(date)
    .bind(status)
    .execute(pool)
    .await
    .map_err(not_found_on_missing_employee)?;

    let outcome = if inserted.rows_affected() == 1 {
        MarkOutcome::Created
    } else {
        let updated = sqlx::query(
            r#"
            UPDATE attendance
            SET status = ?
            WHERE employee_id = ? AND date = ?
            "#,
        )
        .bind(status)
        .bind(employee_id)
        .bind(date)
        .execute(pool)
        .await?;

        // the employee (and with it the row) was deleted in between
        if updated.rows_affected() == 0 {
            return Err(ApiError::not_found("Employee not found"));
        }
        debug!(employee_id, date, "Attendance status replaced");
        MarkOutcome::Updated
    };

    info!(employee_id, date, status, ?outcome, "Attendance marked");
    Ok(outcome)
}

fn not_found_on_missing_employee(e: sqlx::Error) -> ApiError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_foreign_key_violation() {
            return ApiError::not_found("Employee not found");
        }
    }
    ApiError::from(e)
}

/// Attendance rows for one employee in insertion order, optionally only `date`.
/// An unknown employee simply has no rows.
pub async fn attendance_for(
    pool: &SqlitePool,
    employee_id: i64,
    date: Option<&str>,
) -> ApiResult<Vec<AttendanceEntry>> {
    let entries = match date {
        Some(date) => {
            sqlx::query_as::<_, AttendanceEntry>(
                r#"
                SELECT date, status
                FROM attendance
                WHERE employee_id = ? AND date = ?
                ORDER BY id
                "#,
            )
            .bind(employee_id)
            .bind(date)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, AttendanceEntry>(
                r#"
                SELECT date, status
                FROM attendance
                WHERE employee_id = ?
                ORDER BY id
                "#,
            )
            .bind(employee_id)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(entries)
}

/// Global number of rows whose status is exactly `status` (case-sensitive).
pub async fn count_with_status(pool: &SqlitePool, status: &str) -> ApiResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM attendance WHERE status = ?")
        .bind(status)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
