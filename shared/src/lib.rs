use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which kind of task a completion refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// A chore from list A or B
    Chore,
    /// A per-kid extra task
    Extra,
}

impl TaskType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Chore => "chore",
            TaskType::Extra => "extra",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chore" => Ok(TaskType::Chore),
            "extra" => Ok(TaskType::Extra),
            other => Err(format!("Unknown task type: {}", other)),
        }
    }
}

/// The two rotating chore lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChoreListName {
    A,
    B,
}

impl ChoreListName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChoreListName::A => "A",
            ChoreListName::B => "B",
        }
    }
}

impl fmt::Display for ChoreListName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChoreListName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(ChoreListName::A),
            "B" => Ok(ChoreListName::B),
            other => Err(format!("Unknown chore list: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kid {
    pub id: i64,
    pub name: String,
    /// Display color as #RRGGBB
    pub color: String,
    /// Cumulative reward points (may be negative after manual corrections)
    pub points: i64,
    /// Chore list currently assigned to this kid
    pub current_list: ChoreListName,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoreDefinition {
    pub id: i64,
    pub list_name: ChoreListName,
    pub chore_name: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraTask {
    pub id: i64,
    /// Kid that owns this task
    pub kid_id: i64,
    pub task_name: String,
    pub active: bool,
}

/// One ledger row: `task_id` of `task_type` was done by `kid_id` on `date`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub id: i64,
    pub kid_id: i64,
    pub task_type: TaskType,
    pub task_id: i64,
    /// Calendar day (YYYY-MM-DD)
    pub date: String,
    /// When the record was written (RFC 3339)
    pub completed_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Derived completion state of one kid on one day. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub kid_id: i64,
    /// Calendar day (YYYY-MM-DD)
    pub date: String,
    pub chores_completed: bool,
    pub extra_tasks_completed: bool,
    /// 1 when every active extra task is done, otherwise 0
    pub points_earned_today: i64,
    pub chores_done: u32,
    pub chores_total: u32,
    pub extra_tasks_done: u32,
    pub extra_tasks_total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyProgress {
    pub kid_id: i64,
    pub start_date: String,
    pub end_date: String,
    pub days: Vec<DailyProgress>,
    pub days_all_chores_done: u32,
    pub days_all_extra_tasks_done: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoreStatus {
    pub chore: ChoreDefinition,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraTaskStatus {
    pub extra_task: ExtraTask,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KidChoresResponse {
    pub kid_id: i64,
    pub date: String,
    pub list_name: ChoreListName,
    pub chores: Vec<ChoreStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KidExtraTasksResponse {
    pub kid_id: i64,
    pub date: String,
    pub extra_tasks: Vec<ExtraTaskStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateKidRequest {
    pub name: String,
    /// Optional #RRGGBB color, defaults to #FF6B6B
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UpdateKidRequest {
    pub name: Option<String>,
    pub color: Option<String>,
    pub current_list: Option<ChoreListName>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KidResponse {
    pub kid: Kid,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KidListResponse {
    pub kids: Vec<Kid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateChoreRequest {
    pub list_name: ChoreListName,
    pub chore_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UpdateChoreRequest {
    pub list_name: Option<ChoreListName>,
    pub chore_name: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoreListResponse {
    pub chores: Vec<ChoreDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExtraTaskRequest {
    pub kid_id: i64,
    pub task_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UpdateExtraTaskRequest {
    pub task_name: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraTaskListResponse {
    pub extra_tasks: Vec<ExtraTask>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionListResponse {
    pub completions: Vec<CompletionRecord>,
}

/// Result of a mark, unmark or toggle on the completion ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskCompletionResponse {
    /// Whether the task is recorded as done after the operation
    pub completed: bool,
    /// The ledger row, when one exists after the operation
    pub record: Option<CompletionRecord>,
    /// Points applied by this operation (-1, 0 or +1)
    pub points_delta: i64,
    /// The kid's point total after the operation
    pub kid_points: i64,
    pub progress: DailyProgress,
}

/// Whether one task is recorded as done for a kid on a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionStatusResponse {
    pub kid_id: i64,
    pub task_type: TaskType,
    pub task_id: i64,
    pub date: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwardPointsRequest {
    pub kid_id: i64,
    /// Signed amount to add to the kid's points
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchListsResponse {
    pub kids: Vec<Kid>,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetSettingRequest {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingListResponse {
    pub settings: Vec<Setting>,
}

/// Error body returned by every endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
