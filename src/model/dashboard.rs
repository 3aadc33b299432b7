use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[schema(example = 10)]
    pub total_employees: i64,
    /// Attendance rows whose status is exactly `"Present"`
    #[schema(example = 7)]
    pub present: i64,
    /// Attendance rows whose status is exactly `"Absent"`
    #[schema(example = 3)]
    pub absent: i64,
}
