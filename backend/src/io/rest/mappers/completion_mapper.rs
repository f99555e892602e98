use crate::domain::commands::completion::{CompletionCommand, CompletionResult};
use crate::domain::models::completion::CompletionRecord as DomainRecord;
use crate::storage::{format_date, format_timestamp};
use shared::{
    CompletionListResponse, CompletionRecord as SharedRecord, CompletionStatusResponse, TaskCompletionResponse,
};

use super::ProgressMapper;

/// Mapper for ledger rows and mark/unmark/toggle outcomes
pub struct CompletionMapper;

impl CompletionMapper {
    pub fn to_dto(domain: DomainRecord) -> SharedRecord {
        SharedRecord {
            id: domain.id,
            kid_id: domain.kid_id,
            task_type: domain.task_type,
            task_id: domain.task_id,
            date: format_date(domain.date),
            completed_at: format_timestamp(domain.completed_at),
        }
    }

    pub fn to_completion_list_dto(records: Vec<DomainRecord>) -> CompletionListResponse {
        CompletionListResponse {
            completions: records.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_status_dto(command: CompletionCommand, completed: bool) -> CompletionStatusResponse {
        CompletionStatusResponse {
            kid_id: command.kid_id,
            task_type: command.task_type,
            task_id: command.task_id,
            date: format_date(command.date),
            completed,
        }
    }

    pub fn to_task_completion_dto(result: CompletionResult) -> TaskCompletionResponse {
        TaskCompletionResponse {
            completed: result.completed,
            record: result.record.map(Self::to_dto),
            points_delta: result.transition.points_delta(),
            kid_points: result.kid_points,
            progress: ProgressMapper::to_daily_dto(result.progress),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use shared::TaskType;

    #[test]
    fn test_record_dates_are_formatted() {
        let dto = CompletionMapper::to_dto(DomainRecord {
            id: 1,
            kid_id: 2,
            task_type: TaskType::Extra,
            task_id: 3,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            completed_at: Utc.with_ymd_and_hms(2024, 1, 1, 18, 0, 0).unwrap(),
        });
        assert_eq!(dto.date, "2024-01-01");
        assert_eq!(dto.completed_at, "2024-01-01T18:00:00.000000Z");
    }
}
