//! Pure progress computation.
//!
//! Progress is never stored. It is derived from the kid's active task sets
//! and the ledger rows of one day.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use shared::TaskType;

use super::models::completion::CompletionRecord;
use super::models::progress::{DailyProgress, WeeklyProgress};
use super::models::task::{ChoreDefinition, ExtraTask};

pub const DAYS_PER_WEEK: i64 = 7;

/// Evaluate one kid's day.
///
/// A set counts as completed only when it is non-empty and every active
/// member has a record for `date`. Records for inactive or unknown tasks are
/// ignored.
pub fn evaluate(
    kid_id: i64,
    date: NaiveDate,
    active_chores: &[ChoreDefinition],
    active_extras: &[ExtraTask],
    completions: &[CompletionRecord],
) -> DailyProgress {
    let done: HashSet<(TaskType, i64)> = completions
        .iter()
        .filter(|r| r.kid_id == kid_id && r.date == date)
        .map(|r| (r.task_type, r.task_id))
        .collect();

    let chores_done = active_chores
        .iter()
        .filter(|c| done.contains(&(TaskType::Chore, c.id)))
        .count() as u32;
    let extra_tasks_done = active_extras
        .iter()
        .filter(|t| done.contains(&(TaskType::Extra, t.id)))
        .count() as u32;

    let chores_total = active_chores.len() as u32;
    let extra_tasks_total = active_extras.len() as u32;

    let chores_completed = chores_total > 0 && chores_done == chores_total;
    let extra_tasks_completed = extra_tasks_total > 0 && extra_tasks_done == extra_tasks_total;

    DailyProgress {
        kid_id,
        date,
        chores_completed,
        extra_tasks_completed,
        points_earned_today: if extra_tasks_completed { 1 } else { 0 },
        chores_done,
        chores_total,
        extra_tasks_done,
        extra_tasks_total,
    }
}

/// The seven consecutive days starting at `start`
pub fn week_days(start: NaiveDate) -> Vec<NaiveDate> {
    (0..DAYS_PER_WEEK).map(|offset| start + Duration::days(offset)).collect()
}

/// Evaluate seven days against the same active sets
pub fn evaluate_week(
    kid_id: i64,
    start: NaiveDate,
    active_chores: &[ChoreDefinition],
    active_extras: &[ExtraTask],
    completions: &[CompletionRecord],
) -> WeeklyProgress {
    let days: Vec<DailyProgress> = week_days(start)
        .into_iter()
        .map(|date| evaluate(kid_id, date, active_chores, active_extras, completions))
        .collect();

    let days_all_chores_done = days.iter().filter(|d| d.chores_completed).count() as u32;
    let days_all_extra_tasks_done = days.iter().filter(|d| d.extra_tasks_completed).count() as u32;
    let end_date = days.last().map(|d| d.date).unwrap_or(start);

    WeeklyProgress {
        kid_id,
        start_date: start,
        end_date,
        days,
        days_all_chores_done,
        days_all_extra_tasks_done,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::ChoreListName;

    const KID: i64 = 1;

    fn jan(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn chore(id: i64) -> ChoreDefinition {
        ChoreDefinition {
            id,
            list_name: ChoreListName::A,
            chore_name: format!("Chore {}", id),
            active: true,
        }
    }

    fn extra(id: i64) -> ExtraTask {
        ExtraTask {
            id,
            kid_id: KID,
            task_name: format!("Extra {}", id),
            active: true,
        }
    }

    fn done(task_type: TaskType, task_id: i64, date: NaiveDate) -> CompletionRecord {
        CompletionRecord {
            id: task_id,
            kid_id: KID,
            task_type,
            task_id,
            date,
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_sets_are_never_complete() {
        let progress = evaluate(KID, jan(1), &[], &[], &[]);
        assert!(!progress.chores_completed);
        assert!(!progress.extra_tasks_completed);
        assert_eq!(progress.points_earned_today, 0);
        assert_eq!(progress.chores_total, 0);
        assert_eq!(progress.extra_tasks_total, 0);
    }

    #[test]
    fn test_partial_and_full_extra_tasks() {
        let extras = [extra(10), extra(11)];

        let partial = evaluate(KID, jan(1), &[], &extras, &[done(TaskType::Extra, 10, jan(1))]);
        assert!(!partial.extra_tasks_completed);
        assert_eq!(partial.extra_tasks_done, 1);
        assert_eq!(partial.points_earned_today, 0);

        let full = evaluate(
            KID,
            jan(1),
            &[],
            &extras,
            &[done(TaskType::Extra, 10, jan(1)), done(TaskType::Extra, 11, jan(1))],
        );
        assert!(full.extra_tasks_completed);
        assert_eq!(full.points_earned_today, 1);
    }

    #[test]
    fn test_task_type_and_date_are_part_of_the_key() {
        let chores = [chore(5)];
        let extras = [extra(5)];

        // An extra record with the chore's id does not complete the chore
        let progress = evaluate(KID, jan(1), &chores, &extras, &[done(TaskType::Extra, 5, jan(1))]);
        assert!(!progress.chores_completed);
        assert!(progress.extra_tasks_completed);

        // Yesterday's record does not count today
        let progress = evaluate(KID, jan(2), &chores, &extras, &[done(TaskType::Chore, 5, jan(1))]);
        assert!(!progress.chores_completed);
        assert_eq!(progress.chores_done, 0);
    }

    #[test]
    fn test_records_for_inactive_tasks_are_ignored() {
        let chores = [chore(1)];
        let progress = evaluate(
            KID,
            jan(1),
            &chores,
            &[],
            &[done(TaskType::Chore, 1, jan(1)), done(TaskType::Chore, 99, jan(1))],
        );
        assert!(progress.chores_completed);
        assert_eq!(progress.chores_done, 1);
        assert_eq!(progress.chores_total, 1);
    }

    #[test]
    fn test_week_counts_completed_days() {
        let extras = [extra(10)];
        let completions = [
            done(TaskType::Extra, 10, jan(1)),
            done(TaskType::Extra, 10, jan(3)),
            done(TaskType::Extra, 10, jan(9)),
        ];

        let week = evaluate_week(KID, jan(1), &[chore(1)], &extras, &completions);
        assert_eq!(week.days.len(), 7);
        assert_eq!(week.start_date, jan(1));
        assert_eq!(week.end_date, jan(7));
        assert_eq!(week.days_all_extra_tasks_done, 2);
        assert_eq!(week.days_all_chores_done, 0);
        assert!(week.days[2].extra_tasks_completed);
    }

    #[test]
    fn test_week_days_cross_month_boundary() {
        let days = week_days(NaiveDate::from_ymd_opt(2024, 2, 27).unwrap());
        assert_eq!(days.last().copied(), NaiveDate::from_ymd_opt(2024, 3, 4));
    }
}
