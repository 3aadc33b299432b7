use crate::{
    error::{ApiError, ApiResult},
    model::{
        attendance::PRESENT,
        employee::{EmployeeWithPresence, NewEmployee},
    },
};
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Insert a validated employee. Duplicate `emp_id` is a conflict, whether it is
/// seen up front or only by the unique index.
pub async fn create_employee(pool: &SqlitePool, employee: &NewEmployee) -> ApiResult<i64> {
    let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM employees WHERE emp_id = ?")
        .bind(&employee.emp_id)
        .fetch_optional(pool)
        .await?;

    if existing.is_some() {
        return Err(ApiError::conflict("Employee ID already exists"));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO employees (emp_id, name, email, department)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&employee.emp_id)
    .bind(&employee.name)
    .bind(&employee.email)
    .bind(&employee.department)
    .execute(pool)
    .await
    .map_err(|e| match ApiError::from(e) {
        ApiError::Conflict(_) => ApiError::conflict("Employee ID already exists"),
        other => other,
    })?;

    let id = result.last_insert_rowid();
    info!(id, emp_id = %employee.emp_id, "Employee created");
    Ok(id)
}

/// Every employee, oldest first, with the count of `"Present"` attendance rows.
pub async fn list_employees(pool: &SqlitePool) -> ApiResult<Vec<EmployeeWithPresence>> {
    let sql = r#"
        SELECT
            e.id,
            e.emp_id,
            e.name,
            e.email,
            e.department,
            (SELECT COUNT(*)
               FROM attendance a
              WHERE a.employee_id = e.id
                AND a.status = ?) AS present_days
        FROM employees e
        ORDER BY e.id
    "#;
    debug!(sql = %sql, "Listing employees");

    let employees = sqlx::query_as::<_, EmployeeWithPresence>(sql)
        .bind(PRESENT)
        .fetch_all(pool)
        .await?;

    Ok(employees)
}

/// Delete an employee; the foreign key cascades to its attendance rows in the
/// same statement.
pub async fn delete_employee(pool: &SqlitePool, id: i64) -> ApiResult<()> {
    let res = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if res.rows_affected() == 0 {
        return Err(ApiError::not_found("Employee not found"));
    }

    info!(id, "Employee deleted");
    Ok(())
}

pub async fn count_employees(pool: &SqlitePool) -> ApiResult<i64> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees")
        .fetch_one(pool)
        .await?;
    Ok(total)
}
