use crate::{config::Config, error::ApiResult, store::dashboard};
use actix_web::{HttpResponse, Responder, web};
use serde_json::json;
use sqlx::SqlitePool;

/// Service banner
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "API is up", body = Object, example = json!({
            "message": "HRMS API running",
            "developer": "Ujju"
        }))
    ),
    tag = "Dashboard"
)]
pub async fn index(config: web::Data<Config>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "HRMS API running",
        "developer": config.developer,
    }))
}

/// Headcount and global attendance counts
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Aggregate counts", body = crate::model::dashboard::DashboardStats),
        (status = 500, description = "Internal server error")
    ),
    tag = "Dashboard"
)]
pub async fn get_dashboard(pool: web::Data<SqlitePool>) -> ApiResult<impl Responder> {
    let stats = dashboard::dashboard_stats(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(stats))
}
