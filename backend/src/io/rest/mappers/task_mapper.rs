use crate::domain::commands::progress::{KidChoresView, KidExtraTasksView};
use crate::domain::models::task::{ChoreDefinition as DomainChore, ExtraTask as DomainExtraTask};
use crate::storage::format_date;
use shared::{
    ChoreDefinition as SharedChore, ChoreListResponse, ChoreStatus, ExtraTask as SharedExtraTask,
    ExtraTaskListResponse, ExtraTaskStatus, KidChoresResponse, KidExtraTasksResponse,
};

/// Mapper for chore definitions, extra tasks and their per-day status views
pub struct TaskMapper;

impl TaskMapper {
    pub fn to_chore_dto(domain: DomainChore) -> SharedChore {
        SharedChore {
            id: domain.id,
            list_name: domain.list_name,
            chore_name: domain.chore_name,
            active: domain.active,
        }
    }

    pub fn to_extra_task_dto(domain: DomainExtraTask) -> SharedExtraTask {
        SharedExtraTask {
            id: domain.id,
            kid_id: domain.kid_id,
            task_name: domain.task_name,
            active: domain.active,
        }
    }

    pub fn to_chore_list_dto(chores: Vec<DomainChore>) -> ChoreListResponse {
        ChoreListResponse {
            chores: chores.into_iter().map(Self::to_chore_dto).collect(),
        }
    }

    pub fn to_extra_task_list_dto(tasks: Vec<DomainExtraTask>) -> ExtraTaskListResponse {
        ExtraTaskListResponse {
            extra_tasks: tasks.into_iter().map(Self::to_extra_task_dto).collect(),
        }
    }

    pub fn to_kid_chores_dto(view: KidChoresView) -> KidChoresResponse {
        KidChoresResponse {
            kid_id: view.kid_id,
            date: format_date(view.date),
            list_name: view.list_name,
            chores: view
                .chores
                .into_iter()
                .map(|(chore, completed)| ChoreStatus {
                    chore: Self::to_chore_dto(chore),
                    completed,
                })
                .collect(),
        }
    }

    pub fn to_kid_extra_tasks_dto(view: KidExtraTasksView) -> KidExtraTasksResponse {
        KidExtraTasksResponse {
            kid_id: view.kid_id,
            date: format_date(view.date),
            extra_tasks: view
                .extra_tasks
                .into_iter()
                .map(|(task, completed)| ExtraTaskStatus {
                    extra_task: Self::to_extra_task_dto(task),
                    completed,
                })
                .collect(),
        }
    }
}
