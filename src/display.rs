use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDate};
use owo_colors::OwoColorize;

use crate::model::{Category, Priority, Task};
use crate::stats::{CategoryStats, OverallStats, PriorityStats};

pub fn print_task_list(view: &[&Task], today: NaiveDate, color: bool) {
    if view.is_empty() {
        println!("No tasks.");
        return;
    }

    for task in view {
        for line in task_lines(task, today, color) {
            println!("{line}");
        }
    }
}

/// `newest_first` prints the largest key first.
pub fn print_grouped<K: ToString>(
    groups: &BTreeMap<K, Vec<&Task>>,
    today: NaiveDate,
    color: bool,
    newest_first: bool,
) {
    if groups.is_empty() {
        println!("No completed tasks.");
        return;
    }

    let mut entries: Vec<(&K, &Vec<&Task>)> = groups.iter().collect();
    if newest_first {
        entries.reverse();
    }
    for (key, tasks) in entries {
        println!(
            "\n{}",
            format_header(&format!("{} ({})", key.to_string(), tasks.len()), color)
        );
        for task in tasks {
            for line in task_lines(task, today, color) {
                println!("{line}");
            }
        }
    }
}

pub fn task_lines_plain(task: &Task, today: NaiveDate) -> Vec<String> {
    task_lines(task, today, false)
}

fn task_lines(task: &Task, today: NaiveDate, color: bool) -> Vec<String> {
    let status = format_status(task.completed, color);
    let id = format_id(task.id, color);
    let title = format_title(&task.title, color);
    let mut lines = vec![format!("[{status}] {id}  {title}")];

    let mut meta_parts: Vec<String> = vec![
        format!("{} {}", format_label("category:", color), task.category),
        format!(
            "{} {}",
            format_label("priority:", color),
            format_priority(task.priority, color)
        ),
    ];
    if let Some(due) = task.due_date {
        let due_text = format_due(due, task.completed, today, color);
        meta_parts.push(format!("{} {due_text}", format_label("due:", color)));
    }
    if !task.notes.is_empty() {
        meta_parts.push(format!("{} {}", format_label("notes:", color), task.notes));
    }

    lines.push(format!("    {}", meta_parts.join(" | ")));
    lines
}

pub fn print_task_view(task: &Task, today: NaiveDate, color: bool) {
    println!(
        "{} {}",
        format_label("ID:", color),
        format_id(task.id, color)
    );
    println!(
        "{} {}",
        format_label("Title:", color),
        format_title(&task.title, color)
    );
    println!("{} {}", format_label("Category:", color), task.category);
    println!(
        "{} {}",
        format_label("Priority:", color),
        format_priority(task.priority, color)
    );
    if let Some(due) = task.due_date {
        println!(
            "{} {}",
            format_label("Due:", color),
            format_due(due, task.completed, today, color)
        );
    }
    if !task.notes.is_empty() {
        println!("{} {}", format_label("Notes:", color), task.notes);
    }
    println!(
        "{} {}",
        format_label("Status:", color),
        format_status(task.completed, color)
    );
    println!(
        "{} {}",
        format_label("Created:", color),
        format_created(&task.created_at, color)
    );
}

pub fn print_categories(categories: &[Category], color: bool) {
    if categories.is_empty() {
        println!("No categories.");
        return;
    }
    let width = categories.iter().map(|c| c.name.len()).max().unwrap_or(0);
    for category in categories {
        let name = format!("{:<width$}", category.name);
        println!(
            "{}  {:>3} tasks  {}",
            format_title(&name, color),
            category.task_count,
            format_label(&category.color, color)
        );
    }
}

pub fn print_overall(stats: &OverallStats, color: bool) {
    println!("{}", format_header("Progress", color));
    println!(
        "Today:    {}/{} ({:.0}%)",
        stats.today_completed,
        stats.today_total,
        stats.today_progress()
    );
    println!(
        "Week:     {}/{} ({:.0}%)",
        stats.week_completed,
        stats.week_total,
        stats.week_progress()
    );
    println!("Streak:   {} days", stats.current_streak);
    println!("Total:    {}", stats.total_tasks);
    println!(
        "Done:     {} ({:.0}%)",
        stats.completed_tasks,
        stats.completion_rate()
    );
    let overdue = stats.overdue_tasks.to_string();
    if color && stats.overdue_tasks > 0 {
        println!("Overdue:  {}", overdue.red());
    } else {
        println!("Overdue:  {overdue}");
    }
}

pub fn print_category_stats(stats: &BTreeMap<String, CategoryStats>, color: bool) {
    if stats.is_empty() {
        return;
    }
    println!("\n{}", format_header("By category", color));
    for (name, entry) in stats {
        println!(
            "  {name}: {}/{} done, {} pending",
            entry.completed, entry.total, entry.pending
        );
    }
}

pub fn print_priority_stats(stats: &PriorityStats, color: bool) {
    println!("\n{}", format_header("By priority", color));
    for priority in [Priority::High, Priority::Medium, Priority::Low] {
        let bucket = stats.bucket(priority);
        println!(
            "  {}: {}/{} done",
            format_priority(priority, color),
            bucket.completed,
            bucket.total
        );
    }
}

fn format_status(done: bool, color: bool) -> String {
    if done {
        if color {
            format!("{}", "done".green())
        } else {
            "done".to_string()
        }
    } else if color {
        format!("{}", "todo".yellow())
    } else {
        "todo".to_string()
    }
}

fn format_id(id: u64, color: bool) -> String {
    let value = format!("#{:>3}", id);
    if color {
        format!("{}", value.dimmed())
    } else {
        value
    }
}

fn format_title(title: &str, color: bool) -> String {
    if color {
        format!("{}", title.bold())
    } else {
        title.to_string()
    }
}

fn format_label(label: &str, color: bool) -> String {
    if color {
        format!("{}", label.dimmed())
    } else {
        label.to_string()
    }
}

fn format_due(due: NaiveDate, done: bool, today: NaiveDate, color: bool) -> String {
    let text = due.to_string();
    if !color {
        return text;
    }

    if done {
        return format!("{}", text.dimmed());
    }

    match due.cmp(&today) {
        Ordering::Less => format!("{}", text.red()),
        Ordering::Equal => format!("{}", text.yellow()),
        Ordering::Greater => format!("{}", text.cyan()),
    }
}

fn format_priority(priority: Priority, color: bool) -> String {
    let text = priority.to_string();
    if !color {
        return text;
    }

    match priority {
        Priority::High => format!("{}", text.red()),
        Priority::Medium => format!("{}", text.yellow()),
        Priority::Low => format!("{}", text.green()),
    }
}

fn format_created(value: &DateTime<chrono::Utc>, color: bool) -> String {
    let text = value
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string();
    if color {
        format!("{}", text.dimmed())
    } else {
        text
    }
}

fn format_header(text: &str, color: bool) -> String {
    let text = format!("== {text} ==");
    if color {
        format!("{}", text.bold())
    } else {
        text
    }
}
