//! Domain-level command and query types.
//!
//! Services consume these instead of the `shared` DTOs; the REST layer maps
//! request bodies and query strings onto them.

pub mod kid {
    use shared::ChoreListName;

    /// Input for creating a kid. Color falls back to the default when absent.
    #[derive(Debug, Clone)]
    pub struct CreateKidCommand {
        pub name: String,
        pub color: Option<String>,
    }

    /// Partial update of a kid. Points are deliberately absent.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateKidCommand {
        pub name: Option<String>,
        pub color: Option<String>,
        pub current_list: Option<ChoreListName>,
    }

    /// Manual signed adjustment of a kid's points
    #[derive(Debug, Clone)]
    pub struct AwardPointsCommand {
        pub kid_id: i64,
        pub points: i64,
    }
}

pub mod chore {
    use shared::ChoreListName;

    #[derive(Debug, Clone)]
    pub struct CreateChoreCommand {
        pub list_name: ChoreListName,
        pub chore_name: String,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateChoreCommand {
        pub list_name: Option<ChoreListName>,
        pub chore_name: Option<String>,
        pub active: Option<bool>,
    }
}

pub mod extra_task {
    #[derive(Debug, Clone)]
    pub struct CreateExtraTaskCommand {
        pub kid_id: i64,
        pub task_name: String,
    }

    #[derive(Debug, Clone, Default)]
    pub struct UpdateExtraTaskCommand {
        pub task_name: Option<String>,
        pub active: Option<bool>,
    }
}

pub mod completion {
    use chrono::NaiveDate;
    use shared::TaskType;

    use crate::domain::models::completion::CompletionRecord;
    use crate::domain::models::progress::{DailyProgress, ExtraTasksTransition};

    /// Identifies one ledger slot: a kid, a task and a day
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CompletionCommand {
        pub kid_id: i64,
        pub task_type: TaskType,
        pub task_id: i64,
        pub date: NaiveDate,
    }

    /// Filters for the task history; every field is optional
    #[derive(Debug, Clone, Default)]
    pub struct TaskHistoryQuery {
        pub kid_id: Option<i64>,
        pub start_date: Option<NaiveDate>,
        pub end_date: Option<NaiveDate>,
    }

    /// Outcome of one mark, unmark or toggle.
    #[derive(Debug, Clone)]
    pub struct CompletionResult {
        /// Ledger state of the slot after the operation
        pub completed: bool,
        pub record: Option<CompletionRecord>,
        pub transition: ExtraTasksTransition,
        /// Kid's points after any award
        pub kid_points: i64,
        pub progress: DailyProgress,
    }
}

pub mod progress {
    use chrono::NaiveDate;
    use shared::ChoreListName;

    use crate::domain::models::task::{ChoreDefinition, ExtraTask};

    /// A kid's active chores with the per-day completion flag
    #[derive(Debug, Clone)]
    pub struct KidChoresView {
        pub kid_id: i64,
        pub date: NaiveDate,
        pub list_name: ChoreListName,
        pub chores: Vec<(ChoreDefinition, bool)>,
    }

    #[derive(Debug, Clone)]
    pub struct KidExtraTasksView {
        pub kid_id: i64,
        pub date: NaiveDate,
        pub extra_tasks: Vec<(ExtraTask, bool)>,
    }
}
