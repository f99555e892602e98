use shared::ChoreListName;

pub const DEFAULT_KID_COLOR: &str = "#FF6B6B";

#[derive(Debug, Clone, PartialEq)]
pub struct Kid {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub points: i64,
    pub current_list: ChoreListName,
    pub active: bool,
}
