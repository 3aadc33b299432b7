use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The only status spellings the aggregates count. Matching is exact.
pub const PRESENT: &str = "Present";
pub const ABSENT: &str = "Absent";

/// One day of an employee's attendance history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AttendanceEntry {
    #[schema(example = "2024-01-01")]
    pub date: String,
    #[schema(example = "Present")]
    pub status: String,
}

/// What marking attendance did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    Created,
    Updated,
}
