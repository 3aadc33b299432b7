use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Employee as listed, with the number of days marked `"Present"`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "emp_id": "E1",
        "name": "Ann",
        "email": "a@b.com",
        "department": "IT",
        "present_days": 12
    })
)]
pub struct EmployeeWithPresence {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "E1")]
    pub emp_id: String,
    #[schema(example = "Ann")]
    pub name: String,
    #[schema(example = "a@b.com")]
    pub email: String,
    #[schema(example = "IT")]
    pub department: String,
    #[schema(example = 12)]
    pub present_days: i64,
}

/// Employee fields that already passed validation, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    pub emp_id: String,
    pub name: String,
    pub email: String,
    pub department: String,
}
