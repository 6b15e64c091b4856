//! Aggregate counters derived from a task snapshot.
//!
//! Every time-dependent function takes `now` explicitly. Calendar days are
//! evaluated in `now`'s time zone, so the same snapshot gives the same
//! answer for the same instant and zone.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeZone};
use serde::Serialize;

use crate::model::{Priority, Task};

/// How many days back the streak scan looks, today included.
pub const STREAK_WINDOW_DAYS: u64 = 30;

/// Length of the trailing week window, not counting today.
pub const WEEK_WINDOW_DAYS: u64 = 7;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OverallStats {
    pub today_completed: usize,
    pub today_total: usize,
    pub week_completed: usize,
    pub week_total: usize,
    pub current_streak: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub overdue_tasks: usize,
}

impl OverallStats {
    pub fn today_progress(&self) -> f64 {
        percent(self.today_completed, self.today_total)
    }

    pub fn week_progress(&self) -> f64 {
        percent(self.week_completed, self.week_total)
    }

    pub fn completion_rate(&self) -> f64 {
        percent(self.completed_tasks, self.total_tasks)
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PriorityBucket {
    pub total: usize,
    pub completed: usize,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PriorityStats {
    pub high: PriorityBucket,
    pub medium: PriorityBucket,
    pub low: PriorityBucket,
}

impl PriorityStats {
    pub fn bucket(&self, priority: Priority) -> &PriorityBucket {
        match priority {
            Priority::High => &self.high,
            Priority::Medium => &self.medium,
            Priority::Low => &self.low,
        }
    }

    fn bucket_mut(&mut self, priority: Priority) -> &mut PriorityBucket {
        match priority {
            Priority::High => &mut self.high,
            Priority::Medium => &mut self.medium,
            Priority::Low => &mut self.low,
        }
    }
}

fn created_day<Tz: TimeZone>(task: &Task, tz: &Tz) -> NaiveDate {
    task.created_at.with_timezone(tz).date_naive()
}

/// Open, dated, and the start of the due day lies strictly before `now`.
pub fn is_overdue<Tz: TimeZone>(task: &Task, now: &DateTime<Tz>) -> bool {
    if task.completed {
        return false;
    }
    task.due_date
        .is_some_and(|due| due.and_time(NaiveTime::MIN) < now.naive_local())
}

pub fn overdue_tasks<'a, Tz: TimeZone>(tasks: &'a [Task], now: &DateTime<Tz>) -> Vec<&'a Task> {
    tasks.iter().filter(|t| is_overdue(t, now)).collect()
}

pub fn overall_stats<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>) -> OverallStats {
    let tz = now.timezone();
    let today = now.date_naive();
    let week_start = today
        .checked_sub_days(Days::new(WEEK_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MIN);

    let mut stats = OverallStats {
        total_tasks: tasks.len(),
        ..OverallStats::default()
    };

    for task in tasks {
        let day = created_day(task, &tz);
        if task.completed {
            stats.completed_tasks += 1;
        }
        if day == today {
            stats.today_total += 1;
            if task.completed {
                stats.today_completed += 1;
            }
        }
        if day >= week_start {
            stats.week_total += 1;
            if task.completed {
                stats.week_completed += 1;
            }
        }
        if is_overdue(task, now) {
            stats.overdue_tasks += 1;
        }
    }

    stats.current_streak = current_streak(tasks, now);
    stats
}

/// Consecutive days, walking back from today, on which at least one task
/// created that day is completed. Today may be empty without ending the
/// streak; any earlier empty day ends it. Keyed on creation day, not on
/// when the task was completed.
pub fn current_streak<Tz: TimeZone>(tasks: &[Task], now: &DateTime<Tz>) -> usize {
    let tz = now.timezone();
    let today = now.date_naive();
    let mut streak = 0usize;

    for offset in 0..STREAK_WINDOW_DAYS {
        let Some(day) = today.checked_sub_days(Days::new(offset)) else {
            break;
        };
        let day_completed = tasks
            .iter()
            .filter(|t| t.completed && created_day(t, &tz) == day)
            .count();

        if day_completed > 0 {
            streak += 1;
        } else if offset > 0 {
            break;
        }
    }

    streak
}

pub fn category_stats(tasks: &[Task]) -> BTreeMap<String, CategoryStats> {
    let mut categories: BTreeMap<String, CategoryStats> = BTreeMap::new();
    for task in tasks {
        let entry = categories.entry(task.category.clone()).or_default();
        entry.total += 1;
        if task.completed {
            entry.completed += 1;
        } else {
            entry.pending += 1;
        }
    }
    categories
}

pub fn priority_stats(tasks: &[Task]) -> PriorityStats {
    let mut stats = PriorityStats::default();
    for task in tasks {
        let bucket = stats.bucket_mut(task.priority);
        bucket.total += 1;
        if task.completed {
            bucket.completed += 1;
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn task_created(id: u64, created_at: &str, completed: bool) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            category: "Work".into(),
            priority: Priority::Medium,
            due_date: None,
            completed,
            created_at: created_at.parse().unwrap(),
            notes: String::new(),
        }
    }

    fn noon(day: &str) -> DateTime<Utc> {
        format!("{day}T12:00:00Z").parse().unwrap()
    }

    #[test]
    fn empty_snapshot_is_all_zero() {
        let stats = overall_stats(&[], &noon("2024-03-10"));
        assert_eq!(stats, OverallStats::default());
        assert_eq!(stats.today_progress(), 0.0);
    }

    #[test]
    fn today_and_week_windows_follow_creation_day() {
        let tasks = vec![
            task_created(1, "2024-03-10T08:00:00Z", true),
            task_created(2, "2024-03-10T09:00:00Z", false),
            task_created(3, "2024-03-03T00:00:00Z", true),
            task_created(4, "2024-03-02T23:59:59Z", true),
        ];
        let stats = overall_stats(&tasks, &noon("2024-03-10"));
        assert_eq!(stats.today_total, 2);
        assert_eq!(stats.today_completed, 1);
        assert_eq!(stats.week_total, 3);
        assert_eq!(stats.week_completed, 2);
        assert_eq!(stats.total_tasks, 4);
        assert_eq!(stats.completed_tasks, 3);
        assert_eq!(stats.today_progress(), 50.0);
    }

    #[test]
    fn today_window_uses_the_zone_of_now() {
        let tasks = vec![task_created(1, "2024-03-09T23:30:00Z", true)];
        let utc_now = noon("2024-03-10");
        assert_eq!(overall_stats(&tasks, &utc_now).today_total, 0);

        let plus_one = FixedOffset::east_opt(3600).unwrap();
        let local_now = utc_now.with_timezone(&plus_one);
        assert_eq!(overall_stats(&tasks, &local_now).today_total, 1);
    }

    #[test]
    fn streak_skips_empty_today_but_breaks_on_earlier_gap() {
        let tasks = vec![
            task_created(1, "2024-03-09T10:00:00Z", true),
            task_created(2, "2024-03-08T10:00:00Z", true),
            task_created(3, "2024-03-06T10:00:00Z", true),
        ];
        assert_eq!(current_streak(&tasks, &noon("2024-03-10")), 2);
    }

    #[test]
    fn streak_counts_today_when_it_has_completions() {
        let tasks = vec![
            task_created(1, "2024-03-10T10:00:00Z", true),
            task_created(2, "2024-03-09T10:00:00Z", true),
        ];
        assert_eq!(current_streak(&tasks, &noon("2024-03-10")), 2);
    }

    #[test]
    fn streak_ignores_days_with_only_open_tasks() {
        let tasks = vec![
            task_created(1, "2024-03-10T10:00:00Z", true),
            task_created(2, "2024-03-09T10:00:00Z", false),
            task_created(3, "2024-03-08T10:00:00Z", true),
        ];
        assert_eq!(current_streak(&tasks, &noon("2024-03-10")), 1);
    }

    #[test]
    fn streak_is_capped_by_the_scan_window() {
        let now = noon("2024-03-31");
        let tasks: Vec<Task> = (0..40u64)
            .map(|offset| {
                let day = now.date_naive() - Days::new(offset);
                task_created(offset + 1, &format!("{day}T06:00:00Z"), true)
            })
            .collect();
        assert_eq!(current_streak(&tasks, &now), STREAK_WINDOW_DAYS as usize);
    }

    #[test]
    fn overdue_is_strictly_before_now() {
        let mut task = task_created(1, "2024-03-01T00:00:00Z", false);
        task.due_date = NaiveDate::from_ymd_opt(2024, 3, 10);

        let midnight: DateTime<Utc> = "2024-03-10T00:00:00Z".parse().unwrap();
        assert!(!is_overdue(&task, &midnight));

        let later: DateTime<Utc> = "2024-03-10T00:00:01Z".parse().unwrap();
        assert!(is_overdue(&task, &later));

        task.completed = true;
        assert!(!is_overdue(&task, &later));
    }

    #[test]
    fn category_stats_only_lists_present_categories() {
        let mut personal = task_created(2, "2024-03-01T00:00:00Z", false);
        personal.category = "Personal".into();
        let tasks = vec![task_created(1, "2024-03-01T00:00:00Z", true), personal];

        let stats = category_stats(&tasks);
        assert_eq!(stats.len(), 2);
        assert_eq!(
            stats["Work"],
            CategoryStats {
                total: 1,
                completed: 1,
                pending: 0
            }
        );
        assert_eq!(stats["Personal"].pending, 1);
    }

    #[test]
    fn priority_stats_always_has_three_buckets() {
        let stats = priority_stats(&[]);
        assert_eq!(stats.high, PriorityBucket::default());
        assert_eq!(stats.medium, PriorityBucket::default());
        assert_eq!(stats.low, PriorityBucket::default());

        let json = serde_json::to_value(stats).unwrap();
        assert!(json.get("high").is_some());
        assert!(json.get("medium").is_some());
        assert!(json.get("low").is_some());
    }
}
