//! Filtering and grouping over a task snapshot.
//!
//! Everything here borrows the caller's slice and hands back views into it;
//! the input is never reordered or modified.

use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone};

use crate::model::{CategoryFilter, StatusFilter, Task};
use crate::sort::sort_tasks;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Criteria {
    /// Case-insensitive substring matched against title or notes.
    pub search: String,
    pub category: CategoryFilter,
    pub status: StatusFilter,
}

impl Criteria {
    pub fn matches(&self, task: &Task) -> bool {
        text_matches(task, &self.search.to_lowercase())
            && self.category.matches(task)
            && self.status.matches(task)
    }
}

/// `query` must already be lowercase. An empty query matches everything.
pub fn text_matches(task: &Task, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    task.title.to_lowercase().contains(query) || task.notes.to_lowercase().contains(query)
}

pub fn filter_and_sort<'a>(tasks: &'a [Task], criteria: &Criteria) -> Vec<&'a Task> {
    let query = criteria.search.to_lowercase();
    let mut view: Vec<&Task> = tasks
        .iter()
        .filter(|t| text_matches(t, &query))
        .filter(|t| criteria.category.matches(t))
        .filter(|t| criteria.status.matches(t))
        .collect();
    sort_tasks(&mut view);
    view
}

pub fn completed_archive(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|t| t.completed).collect()
}

/// Groups by the calendar day of `created_at` as seen in `tz`.
pub fn group_by_created_day<'a, Tz: TimeZone>(
    tasks: &[&'a Task],
    tz: &Tz,
) -> BTreeMap<NaiveDate, Vec<&'a Task>> {
    let mut groups: BTreeMap<NaiveDate, Vec<&Task>> = BTreeMap::new();
    for &task in tasks {
        let day = task.created_at.with_timezone(tz).date_naive();
        groups.entry(day).or_default().push(task);
    }
    groups
}

pub fn group_by_category<'a>(tasks: &[&'a Task]) -> BTreeMap<String, Vec<&'a Task>> {
    let mut groups: BTreeMap<String, Vec<&Task>> = BTreeMap::new();
    for &task in tasks {
        groups.entry(task.category.clone()).or_default().push(task);
    }
    groups
}
