use std::cmp::Ordering;

use crate::model::Task;

/// Display order: open tasks first, then dated before undated (earliest
/// first), then priority. `sort_by` is stable, so ties keep input order.
pub fn sort_tasks(view: &mut [&Task]) {
    view.sort_by(|a, b| compare_tasks(a, b));
}

pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    compare_completed(a, b)
        .then_with(|| compare_due(a, b))
        .then_with(|| compare_priority(a, b))
}

fn compare_completed(a: &Task, b: &Task) -> Ordering {
    a.completed.cmp(&b.completed)
}

fn compare_due(a: &Task, b: &Task) -> Ordering {
    match (a.due_date, b.due_date) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(ad), Some(bd)) => ad.cmp(&bd),
    }
}

fn compare_priority(a: &Task, b: &Task) -> Ordering {
    a.priority.rank().cmp(&b.priority.rank())
}
