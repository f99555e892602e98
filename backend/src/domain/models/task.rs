use shared::ChoreListName;

/// A chore on list A or B. Deactivated instead of deleted so ledger rows keep their meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoreDefinition {
    pub id: i64,
    pub list_name: ChoreListName,
    pub chore_name: String,
    pub active: bool,
}

/// A task assigned to exactly one kid
#[derive(Debug, Clone, PartialEq)]
pub struct ExtraTask {
    pub id: i64,
    pub kid_id: i64,
    pub task_name: String,
    pub active: bool,
}
