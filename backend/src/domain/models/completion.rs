use chrono::{DateTime, NaiveDate, Utc};
use shared::TaskType;

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRecord {
    pub id: i64,
    pub kid_id: i64,
    pub task_type: TaskType,
    pub task_id: i64,
    pub date: NaiveDate,
    pub completed_at: DateTime<Utc>,
}
