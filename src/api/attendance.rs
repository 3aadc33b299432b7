use crate::{
    error::ApiResult,
    model::attendance::MarkOutcome,
    store::attendance as store,
};
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MarkAttendance {
    #[schema(example = 1)]
    pub employee_id: i64,
    /// Stored as given, no format is enforced
    #[schema(example = "2024-01-01")]
    pub date: String,
    /// Stored as given; only "Present" and "Absent" are counted on the dashboard
    #[schema(example = "Present")]
    pub status: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceQuery {
    /// Only return the record for this date
    pub date: Option<String>,
}

/// Mark attendance
///
/// Replaces the status if the employee already has a record for that date,
/// otherwise creates one.
#[utoipa::path(
    post,
    path = "/attendance",
    request_body = MarkAttendance,
    responses(
        (status = 201, description = "New record created", body = Object, example = json!({
            "message": "Attendance marked"
        })),
        (status = 200, description = "Existing record updated", body = Object, example = json!({
            "message": "Attendance updated"
        })),
        (status = 400, description = "Malformed body, or a concurrent write won the race", body = Object),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Employee not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn mark_attendance(
    pool: web::Data<SqlitePool>,
    payload: web::Json<MarkAttendance>,
) -> ApiResult<impl Responder> {
    let outcome = store::mark_attendance(
        pool.get_ref(),
        payload.employee_id,
        &payload.date,
        &payload.status,
    )
    .await?;

    Ok(match outcome {
        MarkOutcome::Created => HttpResponse::Created().json(json!({
            "message": "Attendance marked"
        })),
        MarkOutcome::Updated => HttpResponse::Ok().json(json!({
            "message": "Attendance updated"
        })),
    })
}

/// Attendance history of one employee
#[utoipa::path(
    get,
    path = "/attendance/{employee_id}",
    params(
        ("employee_id", Path, description = "Employee surrogate id"),
        AttendanceQuery
    ),
    responses(
        (status = 200, description = "Records in insertion order, possibly empty", body = [crate::model::attendance::AttendanceEntry]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn get_attendance(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
    query: web::Query<AttendanceQuery>,
) -> ApiResult<impl Responder> {
    let employee_id = path.into_inner();
    let date = query.date.as_deref().filter(|d| !d.is_empty());

    let entries = store::attendance_for(pool.get_ref(), employee_id, date).await?;

    Ok(HttpResponse::Ok().json(entries))
}
