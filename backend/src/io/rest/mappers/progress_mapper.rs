use crate::domain::models::progress::{DailyProgress as DomainDaily, WeeklyProgress as DomainWeekly};
use crate::storage::format_date;
use shared::{DailyProgress as SharedDaily, WeeklyProgress as SharedWeekly};

pub struct ProgressMapper;

impl ProgressMapper {
    pub fn to_daily_dto(domain: DomainDaily) -> SharedDaily {
        SharedDaily {
            kid_id: domain.kid_id,
            date: format_date(domain.date),
            chores_completed: domain.chores_completed,
            extra_tasks_completed: domain.extra_tasks_completed,
            points_earned_today: domain.points_earned_today,
            chores_done: domain.chores_done,
            chores_total: domain.chores_total,
            extra_tasks_done: domain.extra_tasks_done,
            extra_tasks_total: domain.extra_tasks_total,
        }
    }

    pub fn to_weekly_dto(domain: DomainWeekly) -> SharedWeekly {
        SharedWeekly {
            kid_id: domain.kid_id,
            start_date: format_date(domain.start_date),
            end_date: format_date(domain.end_date),
            days: domain.days.into_iter().map(Self::to_daily_dto).collect(),
            days_all_chores_done: domain.days_all_chores_done,
            days_all_extra_tasks_done: domain.days_all_extra_tasks_done,
        }
    }
}
