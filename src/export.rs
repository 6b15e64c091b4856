use std::io::Write;

use serde::Serialize;

use crate::cli::ExportFormat;
use crate::model::Task;

#[derive(Serialize)]
struct CsvRow<'a> {
    id: u64,
    title: &'a str,
    category: &'a str,
    priority: &'a str,
    due_date: String,
    completed: bool,
    created_at: String,
    notes: &'a str,
}

impl<'a> From<&'a Task> for CsvRow<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            id: task.id,
            title: &task.title,
            category: &task.category,
            priority: task.priority.as_str(),
            due_date: task.due_date.map(|d| d.to_string()).unwrap_or_default(),
            completed: task.completed,
            created_at: task.created_at.to_rfc3339(),
            notes: &task.notes,
        }
    }
}

pub fn export_tasks<W: Write>(view: &[&Task], format: ExportFormat, out: W) -> anyhow::Result<()> {
    match format {
        ExportFormat::Json => export_json(view, out),
        ExportFormat::Csv => export_csv(view, out),
        ExportFormat::Markdown => export_markdown(view, out),
    }
}

fn export_json<W: Write>(view: &[&Task], mut out: W) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut out, view)?;
    writeln!(out)?;
    Ok(())
}

const CSV_HEADER: [&str; 8] = [
    "id",
    "title",
    "category",
    "priority",
    "due_date",
    "completed",
    "created_at",
    "notes",
];

fn export_csv<W: Write>(view: &[&Task], out: W) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    // Serialized rows carry their own header; an empty view still gets one.
    if view.is_empty() {
        writer.write_record(CSV_HEADER)?;
    }
    for task in view {
        writer.serialize(CsvRow::from(*task))?;
    }
    writer.flush()?;
    Ok(())
}

fn export_markdown<W: Write>(view: &[&Task], mut out: W) -> anyhow::Result<()> {
    for task in view {
        let status = if task.completed { "x" } else { " " };
        writeln!(out, "- [{status}] {} (#{})", task.title, task.id)?;
        writeln!(out, "  - category: {}", task.category)?;
        writeln!(out, "  - priority: {}", task.priority)?;
        if let Some(due) = task.due_date {
            writeln!(out, "  - due: {due}")?;
        }
        if !task.notes.is_empty() {
            writeln!(out, "  - notes: {}", task.notes)?;
        }
    }
    Ok(())
}
