#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use taskflow::model::{Priority, Task};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

pub fn instant(s: &str) -> DateTime<Utc> {
    s.parse().expect("valid rfc3339 instant")
}

/// Open, undated, medium priority "Work" task created 2024-03-01 09:00 UTC.
pub fn task(id: u64) -> Task {
    Task {
        id,
        title: format!("task {id}"),
        category: "Work".into(),
        priority: Priority::Medium,
        due_date: None,
        completed: false,
        created_at: instant("2024-03-01T09:00:00Z"),
        notes: String::new(),
    }
}

pub fn with(id: u64, f: impl FnOnce(&mut Task)) -> Task {
    let mut t = task(id);
    f(&mut t);
    t
}

pub fn ids(view: &[&Task]) -> Vec<u64> {
    view.iter().map(|t| t.id).collect()
}
