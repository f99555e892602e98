use chrono::NaiveDate;

/// Completion state of one kid on one day, derived from the ledger on demand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyProgress {
    pub kid_id: i64,
    pub date: NaiveDate,
    pub chores_completed: bool,
    pub extra_tasks_completed: bool,
    pub points_earned_today: i64,
    pub chores_done: u32,
    pub chores_total: u32,
    pub extra_tasks_done: u32,
    pub extra_tasks_total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyProgress {
    pub kid_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: Vec<DailyProgress>,
    pub days_all_chores_done: u32,
    pub days_all_extra_tasks_done: u32,
}

/// Change of the "all extra tasks done" flag across one ledger mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraTasksTransition {
    Completed,
    Uncompleted,
    Unchanged,
}

impl ExtraTasksTransition {
    pub fn between(before: &DailyProgress, after: &DailyProgress) -> Self {
        match (before.extra_tasks_completed, after.extra_tasks_completed) {
            (false, true) => ExtraTasksTransition::Completed,
            (true, false) => ExtraTasksTransition::Uncompleted,
            _ => ExtraTasksTransition::Unchanged,
        }
    }

    pub fn points_delta(&self) -> i64 {
        match self {
            ExtraTasksTransition::Completed => 1,
            ExtraTasksTransition::Uncompleted => -1,
            ExtraTasksTransition::Unchanged => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(extra_done: bool) -> DailyProgress {
        DailyProgress {
            kid_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            chores_completed: false,
            extra_tasks_completed: extra_done,
            points_earned_today: if extra_done { 1 } else { 0 },
            chores_done: 0,
            chores_total: 0,
            extra_tasks_done: 0,
            extra_tasks_total: 0,
        }
    }

    #[test]
    fn test_transition_table() {
        let cases = [
            (false, false, ExtraTasksTransition::Unchanged, 0),
            (false, true, ExtraTasksTransition::Completed, 1),
            (true, false, ExtraTasksTransition::Uncompleted, -1),
            (true, true, ExtraTasksTransition::Unchanged, 0),
        ];

        for (before, after, expected, delta) in cases {
            let transition = ExtraTasksTransition::between(&progress(before), &progress(after));
            assert_eq!(transition, expected, "{} -> {}", before, after);
            assert_eq!(transition.points_delta(), delta);
        }
    }
}
