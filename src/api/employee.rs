use crate::{
    error::{ApiError, ApiResult},
    model::employee::NewEmployee,
    store::employee as store,
    utils::validation::{valid_email, valid_emp_id, valid_name},
};
use actix_web::{HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;
use tracing::debug;
use utoipa::ToSchema;

/// Wire shape of `POST /employees`. Every field is optional here so that a
/// missing, `null` or empty field all get the same answer; unknown fields are ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "E1", value_type = String)]
    #[serde(default)]
    pub emp_id: Option<String>,
    #[schema(example = "Ann", value_type = String)]
    #[serde(default)]
    pub name: Option<String>,
    #[schema(example = "a@b.com", format = "email", value_type = String)]
    #[serde(default)]
    pub email: Option<String>,
    #[schema(example = "IT", value_type = String)]
    #[serde(default)]
    pub department: Option<String>,
}

impl CreateEmployee {
    /// Required-fields check first, then the per-field shape checks.
    pub fn validate(self) -> ApiResult<NewEmployee> {
        fn present(field: Option<String>) -> Option<String> {
            field.filter(|v| !v.is_empty())
        }

        let (Some(emp_id), Some(name), Some(email), Some(department)) = (
            present(self.emp_id),
            present(self.name),
            present(self.email),
            present(self.department),
        ) else {
            return Err(ApiError::validation("All fields are required"));
        };

        if !valid_emp_id(&emp_id) {
            return Err(ApiError::validation("Employee ID must be alphanumeric"));
        }
        if !valid_name(&name) {
            return Err(ApiError::validation("Name must contain only letters"));
        }
        if !valid_email(&email) {
            return Err(ApiError::validation("Invalid email format"));
        }

        Ok(NewEmployee {
            emp_id,
            name,
            email,
            department,
        })
    }
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Object, example = json!({
            "message": "Employee created"
        })),
        (status = 400, description = "Missing/invalid field or duplicate emp_id", body = Object, example = json!({
            "error": "Employee ID already exists"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    pool: web::Data<SqlitePool>,
    payload: web::Json<CreateEmployee>,
) -> ApiResult<impl Responder> {
    let employee = payload.into_inner().validate()?;

    store::create_employee(pool.get_ref(), &employee).await?;

    Ok(HttpResponse::Created().json(json!({
        "message": "Employee created"
    })))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/employees",
    responses(
        (status = 200, description = "Every employee with its present-day count", body = [crate::model::employee::EmployeeWithPresence]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn list_employees(pool: web::Data<SqlitePool>) -> ApiResult<impl Responder> {
    let employees = store::list_employees(pool.get_ref()).await?;
    debug!(count = employees.len(), "Employees listed");

    Ok(HttpResponse::Ok().json(employees))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    params(
        ("id", Path, description = "Employee surrogate id")
    ),
    responses(
        (status = 200, description = "Employee and its attendance deleted", body = Object, example = json!({
            "message": "Deleted"
        })),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Employee not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    pool: web::Data<SqlitePool>,
    path: web::Path<i64>,
) -> ApiResult<impl Responder> {
    let id = path.into_inner();

    store::delete_employee(pool.get_ref(), id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Deleted"
    })))
}
