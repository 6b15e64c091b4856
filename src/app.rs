use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, bail};
use chrono::Local;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing::{debug, warn};

use crate::cli::{CategoryCommands, Cli, Commands};
use crate::display::{
    print_categories, print_category_stats, print_grouped, print_overall, print_priority_stats,
    print_task_list, print_task_view,
};
use crate::error::StoreError;
use crate::export::export_tasks;
use crate::model::{
    AppConfig, AppState, ArchiveGroup, CategoryFilter, CategoryPatch, NewCategory, NewTask,
    StatusFilter, Task, TaskPatch,
};
use crate::query::{
    Criteria, completed_archive, filter_and_sort, group_by_category, group_by_created_day,
};
use crate::sort::sort_tasks;
use crate::stats::{category_stats, overall_stats, overdue_tasks, priority_stats};
use crate::storage::{default_data_dir, ensure_dir, load_state, save_state, state_path};
use crate::store::{CategoryStore, JsonStore, MemoryStore, TaskStore, Workspace};
use crate::util::{confirm, parse_due};

pub fn run() -> anyhow::Result<()> {
    run_with(Cli::parse())
}

pub fn run_with(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
    ensure_dir(&data_dir)
        .with_context(|| format!("cannot create data dir {}", data_dir.display()))?;
    let state_path = state_path(&data_dir);
    let mut state = load_state(&state_path)
        .with_context(|| format!("cannot read {}", state_path.display()))?;
    let color = resolve_color(&cli, &state.config);

    if cli.memory {
        debug!("using seeded in-memory store");
        let mut ws = Workspace::new(MemoryStore::seeded()?);
        execute(cli.command, &mut ws, &mut state, &state_path, color)
    } else {
        debug!(dir = %data_dir.display(), "using json store");
        let mut ws = Workspace::new(JsonStore::open(&data_dir)?);
        execute(cli.command, &mut ws, &mut state, &state_path, color)
    }
}

fn execute<S: TaskStore + CategoryStore>(
    command: Commands,
    ws: &mut Workspace<S>,
    state: &mut AppState,
    state_path: &Path,
    color: bool,
) -> anyhow::Result<()> {
    let now = Local::now();
    let today = now.date_naive();

    match command {
        Commands::Completions { .. } => {
            // Handled before opening the store.
        }

        Commands::Add {
            title,
            category,
            priority,
            due,
            notes,
        } => {
            let due_date = due.as_deref().map(parse_due).transpose().map_err(invalid)?;
            match ws.find_category_by_name(category.trim()) {
                Ok(Some(_)) => {}
                Ok(None) => {
                    warn!(category = %category, "task added to a category that does not exist")
                }
                Err(err) => warn!(error = %err, "could not load categories"),
            }
            let task = ws.store_mut().create_task(NewTask {
                title,
                category,
                priority,
                due_date,
                notes: notes.unwrap_or_default(),
            })?;
            println!("Created task #{}", task.id);
        }

        Commands::Edit {
            id,
            title,
            category,
            priority,
            due,
            clear_due,
            notes,
        } => {
            let due_date = if clear_due {
                Some(None)
            } else {
                due.as_deref()
                    .map(parse_due)
                    .transpose()
                    .map_err(invalid)?
                    .map(Some)
            };
            let patch = TaskPatch {
                title,
                category,
                priority,
                due_date,
                completed: None,
                notes,
            };
            if patch.is_empty() {
                bail!(StoreError::InvalidInput("nothing to change".into()));
            }
            ws.store_mut().update_task(id, &patch)?;
            println!("Updated #{id}");
        }

        Commands::Done { id } => {
            ws.store_mut().update_task(id, &TaskPatch::completed(true))?;
            println!("Marked #{id} as done");
        }

        Commands::Undone { id } => {
            ws.store_mut().update_task(id, &TaskPatch::completed(false))?;
            println!("Marked #{id} as not done");
        }

        Commands::Toggle { id } => {
            let task = ws
                .store()
                .get_task(id)?
                .ok_or_else(|| StoreError::task_not_found(id))?;
            let task = ws
                .store_mut()
                .update_task(id, &TaskPatch::completed(!task.completed))?;
            let status = if task.completed { "done" } else { "not done" };
            println!("Marked #{id} as {status}");
        }

        Commands::Delete { id } => {
            let task = ws.store_mut().delete_task(id)?;
            println!("Deleted #{id} ({})", task.title);
        }

        Commands::BulkDone { ids } => {
            let updated = ws
                .store_mut()
                .bulk_update(&ids, &TaskPatch::completed(true))?;
            report_skipped(&ids, updated.len());
            println!("Marked {} tasks as done", updated.len());
        }

        Commands::BulkUndone { ids } => {
            let updated = ws
                .store_mut()
                .bulk_update(&ids, &TaskPatch::completed(false))?;
            report_skipped(&ids, updated.len());
            println!("Marked {} tasks as not done", updated.len());
        }

        Commands::BulkDelete { ids } => {
            let deleted = ws.store_mut().bulk_delete(&ids)?;
            report_skipped(&ids, deleted.len());
            println!("Deleted {} tasks", deleted.len());
        }

        Commands::Clear { yes } => {
            let tasks = ws.store().list_tasks()?;
            let count = tasks.iter().filter(|t| t.completed).count();
            if count == 0 {
                println!("No completed tasks to clear");
                return Ok(());
            }
            if !yes && !confirm(&format!("Permanently delete {count} completed tasks?")) {
                println!("Aborted");
                return Ok(());
            }
            let cleared = ws.clear_completed()?;
            println!("Cleared {} completed tasks", cleared.len());
        }

        Commands::List {
            search,
            category,
            status,
            json,
        } => {
            let tasks = ws.store().list_tasks()?;
            let criteria = Criteria {
                search: search.unwrap_or_default(),
                category: CategoryFilter::from(category),
                status: status.unwrap_or(state.config.default_status),
            };
            let view = filter_and_sort(&tasks, &criteria);
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                print_task_list(&view, today, color);
            }
        }

        Commands::View { id } => {
            let task = ws
                .store()
                .get_task(id)?
                .ok_or_else(|| StoreError::task_not_found(id))?;
            print_task_view(&task, today, color);
        }

        Commands::Overdue => {
            let tasks = ws.store().list_tasks()?;
            let mut view = overdue_tasks(&tasks, &now);
            sort_tasks(&mut view);
            if view.is_empty() {
                println!("Nothing overdue.");
            } else {
                println!("Overdue ({})", view.len());
                print_task_list(&view, today, color);
            }
        }

        Commands::Archive { group_by } => {
            let tasks = ws.store().list_tasks()?;
            let archive = completed_archive(&tasks);
            println!("{} completed tasks", archive.len());
            match group_by.unwrap_or(state.config.archive_group) {
                ArchiveGroup::Date => {
                    let groups = group_by_created_day(&archive, &Local);
                    print_grouped(&groups, today, color, true);
                }
                ArchiveGroup::Category => {
                    let groups = group_by_category(&archive);
                    print_grouped(&groups, today, color, false);
                }
            }
        }

        Commands::Stats { json } => {
            let tasks = ws.store().list_tasks()?;
            print_stats(ws, &tasks, &now, json, color)?;
        }

        Commands::Category { command } => handle_category(command, ws, color)?,

        Commands::Export {
            format,
            status,
            category,
        } => {
            let tasks = ws.store().list_tasks()?;
            let criteria = Criteria {
                search: String::new(),
                category: CategoryFilter::from(category),
                status,
            };
            let view = filter_and_sort(&tasks, &criteria);
            export_tasks(&view, format, std::io::stdout().lock())?;
        }

        Commands::Config {
            color,
            default_status,
            archive_group,
        } => {
            let changed = update_config(&mut state.config, color, default_status, archive_group);
            if changed {
                save_state(state_path, state)?;
                println!("Config updated");
            }
            print_config(&state.config);
        }
    }

    Ok(())
}

fn handle_category<S: TaskStore + CategoryStore>(
    command: CategoryCommands,
    ws: &mut Workspace<S>,
    color: bool,
) -> anyhow::Result<()> {
    match command {
        CategoryCommands::List => {
            let categories = ws.categories()?;
            print_categories(&categories, color);
        }

        CategoryCommands::Add { name, color } => {
            let category = ws
                .store_mut()
                .create_category(NewCategory { name, color })?;
            println!("Created category '{}'", category.name);
        }

        CategoryCommands::Rename { name, new_name } => {
            let id = category_id(ws, &name)?;
            let (category, moved) = ws.rename_category(&id, &new_name)?;
            println!(
                "Renamed '{name}' to '{}' ({moved} tasks moved)",
                category.name
            );
        }

        CategoryCommands::Recolor { name, color } => {
            let id = category_id(ws, &name)?;
            ws.store_mut().update_category(
                &id,
                &CategoryPatch {
                    name: None,
                    color: Some(color),
                },
            )?;
            println!("Updated '{name}'");
        }

        CategoryCommands::Delete { name } => {
            let id = category_id(ws, &name)?;
            let removed = ws.delete_category(&id)?;
            if removed.task_count > 0 {
                println!(
                    "Deleted category '{name}' ({} tasks still reference it)",
                    removed.task_count
                );
            } else {
                println!("Deleted category '{name}'");
            }
        }
    }
    Ok(())
}

fn category_id<S: TaskStore + CategoryStore>(
    ws: &Workspace<S>,
    name: &str,
) -> Result<String, StoreError> {
    ws.find_category_by_name(name)?
        .map(|c| c.id)
        .ok_or_else(|| StoreError::NotFound {
            kind: "Category",
            id: name.to_string(),
        })
}

fn print_stats<S: TaskStore + CategoryStore>(
    ws: &Workspace<S>,
    tasks: &[Task],
    now: &chrono::DateTime<Local>,
    json: bool,
    color: bool,
) -> anyhow::Result<()> {
    let overall = overall_stats(tasks, now);
    let categories = category_stats(tasks);
    let priorities = priority_stats(tasks);

    if json {
        let value = serde_json::json!({
            "overall": overall,
            "categories": categories,
            "priorities": priorities,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print_overall(&overall, color);
    print_category_stats(&categories, color);
    print_priority_stats(&priorities, color);

    // The roster only adds the empty categories; losing it must not hide the numbers above.
    match ws.categories() {
        Ok(roster) => {
            let empty: Vec<String> = roster
                .into_iter()
                .filter(|c| c.task_count == 0)
                .map(|c| c.name)
                .collect();
            if !empty.is_empty() {
                println!("\nEmpty categories: {}", empty.join(", "));
            }
        }
        Err(err) => warn!(error = %err, "could not load categories"),
    }
    Ok(())
}

fn report_skipped(ids: &[u64], affected: usize) {
    let skipped = ids.len().saturating_sub(affected);
    if skipped > 0 {
        warn!(skipped, "some ids did not match any task");
    }
}

fn invalid(message: String) -> StoreError {
    StoreError::InvalidInput(format!("invalid due date: {message}"))
}

fn resolve_color(cli: &Cli, config: &AppConfig) -> bool {
    if cli.no_color {
        return false;
    }
    config.color && std::io::stdout().is_terminal()
}

fn update_config(
    config: &mut AppConfig,
    color: Option<bool>,
    default_status: Option<StatusFilter>,
    archive_group: Option<ArchiveGroup>,
) -> bool {
    let mut changed = false;
    if let Some(value) = color {
        config.color = value;
        changed = true;
    }
    if let Some(value) = default_status {
        config.default_status = value;
        changed = true;
    }
    if let Some(value) = archive_group {
        config.archive_group = value;
        changed = true;
    }
    changed
}

fn print_config(config: &AppConfig) {
    println!("color: {}", config.color);
    println!("default_status: {:?}", config.default_status);
    println!("archive_group: {:?}", config.archive_group);
}
