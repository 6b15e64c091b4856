mod support;

use chrono::{Days, FixedOffset};
use taskflow::model::{Priority, Task};
use taskflow::stats::{
    CategoryStats, OverallStats, PriorityBucket, category_stats, current_streak, is_overdue,
    overall_stats, overdue_tasks, priority_stats,
};

use support::{date, instant, with};

#[test]
fn empty_collection_is_all_zero() {
    let stats = overall_stats(&[], &instant("2024-03-10T12:00:00Z"));
    assert_eq!(stats, OverallStats::default());
    assert_eq!(stats.current_streak, 0);
    assert_eq!(priority_stats(&[]), Default::default());
    assert!(category_stats(&[]).is_empty());
}

#[test]
fn priority_breakdown_scenario() {
    let tasks = vec![
        with(1, |t| t.priority = Priority::High),
        with(2, |t| {
            t.priority = Priority::High;
            t.completed = true;
        }),
        with(3, |t| t.priority = Priority::Low),
    ];
    let stats = priority_stats(&tasks);
    assert_eq!(stats.high, PriorityBucket { total: 2, completed: 1 });
    assert_eq!(stats.medium, PriorityBucket { total: 0, completed: 0 });
    assert_eq!(stats.low, PriorityBucket { total: 1, completed: 0 });
}

#[test]
fn priority_json_uses_lowercase_buckets() {
    let tasks = vec![with(1, |t| t.priority = Priority::High)];
    let json = serde_json::to_value(priority_stats(&tasks)).unwrap();
    assert_eq!(json["high"]["total"], 1);
    assert_eq!(json["medium"]["total"], 0);
    assert_eq!(json["low"]["completed"], 0);
}

#[test]
fn overdue_depends_on_completion() {
    let now = instant("2024-03-10T15:00:00Z");
    let open = with(1, |t| t.due_date = Some(date("2024-03-09")));
    let done = with(2, |t| {
        t.due_date = Some(date("2024-03-09"));
        t.completed = true;
    });
    let undated = with(3, |_| {});

    assert!(is_overdue(&open, &now));
    assert!(!is_overdue(&done, &now));
    assert!(!is_overdue(&undated, &now));

    let tasks = vec![open, done, undated];
    assert_eq!(overall_stats(&tasks, &now).overdue_tasks, 1);
    assert_eq!(overdue_tasks(&tasks, &now).len(), 1);
}

#[test]
fn due_date_equal_to_now_is_not_overdue() {
    let task = with(1, |t| t.due_date = Some(date("2024-03-10")));
    assert!(!is_overdue(&task, &instant("2024-03-10T00:00:00Z")));
}

#[test]
fn overdue_count_ignores_windows() {
    let now = instant("2024-03-10T12:00:00Z");
    let old = with(1, |t| {
        t.created_at = instant("2023-01-01T00:00:00Z");
        t.due_date = Some(date("2023-02-01"));
    });
    let stats = overall_stats(&[old], &now);
    assert_eq!(stats.week_total, 0);
    assert_eq!(stats.overdue_tasks, 1);
}

#[test]
fn category_breakdown_counts_pending() {
    let tasks = vec![
        with(1, |t| t.completed = true),
        with(2, |_| {}),
        with(3, |t| t.category = "Health".into()),
    ];
    let stats = category_stats(&tasks);
    assert_eq!(
        stats["Work"],
        CategoryStats {
            total: 2,
            completed: 1,
            pending: 1
        }
    );
    assert_eq!(
        stats["Health"],
        CategoryStats {
            total: 1,
            completed: 0,
            pending: 1
        }
    );
    assert_eq!(stats.len(), 2);
}

fn created_on(id: u64, day: &str, completed: bool) -> Task {
    with(id, |t| {
        t.created_at = instant(&format!("{day}T10:00:00Z"));
        t.completed = completed;
    })
}

#[test]
fn streak_keyed_on_creation_day() {
    let now = instant("2024-03-10T18:00:00Z");

    // Created yesterday, still open: yesterday does not qualify.
    let tasks = vec![created_on(1, "2024-03-10", true), created_on(2, "2024-03-09", false)];
    assert_eq!(current_streak(&tasks, &now), 1);

    // Empty today is skipped, the three days before count.
    let tasks = vec![
        created_on(1, "2024-03-09", true),
        created_on(2, "2024-03-08", true),
        created_on(3, "2024-03-07", true),
        created_on(4, "2024-03-05", true),
    ];
    assert_eq!(current_streak(&tasks, &now), 3);
    assert_eq!(overall_stats(&tasks, &now).current_streak, 3);
}

#[test]
fn streak_is_zero_when_yesterday_is_empty() {
    let now = instant("2024-03-10T18:00:00Z");
    let tasks = vec![created_on(1, "2024-03-08", true)];
    assert_eq!(current_streak(&tasks, &now), 0);
}

#[test]
fn week_window_spans_seven_days_before_today() {
    let now = instant("2024-03-10T18:00:00Z");
    let today = now.date_naive();
    let tasks: Vec<Task> = (0..10u64)
        .map(|offset| {
            let day = today - Days::new(offset);
            created_on(offset + 1, &day.to_string(), offset % 2 == 0)
        })
        .collect();

    let stats = overall_stats(&tasks, &now);
    assert_eq!(stats.today_total, 1);
    assert_eq!(stats.today_completed, 1);
    assert_eq!(stats.week_total, 8);
    assert_eq!(stats.week_completed, 4);
    assert_eq!(stats.total_tasks, 10);
    assert_eq!(stats.completed_tasks, 5);
}

#[test]
fn calendar_day_follows_the_zone_of_now() {
    let tasks = vec![with(1, |t| {
        t.created_at = instant("2024-03-10T02:00:00Z");
        t.completed = true;
    })];
    let utc_now = instant("2024-03-10T03:00:00Z");
    assert_eq!(overall_stats(&tasks, &utc_now).today_total, 1);

    let west = FixedOffset::west_opt(5 * 3600).unwrap();
    let local_now = utc_now.with_timezone(&west);
    let stats = overall_stats(&tasks, &local_now);
    assert_eq!(stats.today_total, 1);

    // At UTC-5 the task lands on the 9th, so a "now" late on the 8th misses it.
    let earlier = instant("2024-03-09T04:00:00Z").with_timezone(&west);
    assert_eq!(overall_stats(&tasks, &earlier).today_total, 0);
}
