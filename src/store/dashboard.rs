use crate::{
    error::ApiResult,
    model::{
        attendance::{ABSENT, PRESENT},
        dashboard::DashboardStats,
    },
    store::{attendance::count_with_status, employee::count_employees},
};
use sqlx::SqlitePool;

/// Headcount plus global `"Present"` / `"Absent"` row counts. Any other
/// spelling of a status counts toward neither.
pub async fn dashboard_stats(pool: &SqlitePool) -> ApiResult<DashboardStats> {
    Ok(DashboardStats {
        total_employees: count_employees(pool).await?,
        present: count_with_status(pool, PRESENT).await?,
        absent: count_with_status(pool, ABSENT).await?,
    })
}
