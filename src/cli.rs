use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::model::{ArchiveGroup, DEFAULT_CATEGORY, Priority, StatusFilter};

#[derive(Parser)]
#[command(name = "taskflow", version, about = "Personal task manager")]
pub struct Cli {
    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Directory holding tasks.json, categories.json and state.json
    #[arg(long = "data-dir", env = "TASKFLOW_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Use the seeded in-memory store (changes are not saved)
    #[arg(long = "memory", global = true)]
    pub memory: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new task
    #[command(aliases = ["a", "create"])]
    Add {
        /// Task title, e.g. "Go shopping"
        title: String,

        /// Category name
        #[arg(short = 'c', long = "category", default_value = DEFAULT_CATEGORY)]
        category: String,

        /// Priority
        #[arg(short = 'p', long = "priority", value_enum, default_value = "medium")]
        priority: Priority,

        /// Due date: "tomorrow", "today", "YYYY-MM-DD", or "DDMMYYYY" (e.g. 18022026)
        #[arg(short = 'd', long = "due")]
        due: Option<String>,

        /// Free-form notes
        #[arg(short = 'n', long = "notes")]
        notes: Option<String>,
    },

    /// Edit an existing task
    #[command(alias = "e")]
    Edit {
        id: u64,

        /// New title
        #[arg(long = "title")]
        title: Option<String>,

        /// New category
        #[arg(short = 'c', long = "category")]
        category: Option<String>,

        /// New priority
        #[arg(short = 'p', long = "priority", value_enum)]
        priority: Option<Priority>,

        /// New due date
        #[arg(short = 'd', long = "due")]
        due: Option<String>,

        /// Clear due date
        #[arg(long = "clear-due", conflicts_with = "due")]
        clear_due: bool,

        /// New notes
        #[arg(short = 'n', long = "notes")]
        notes: Option<String>,
    },

    /// Mark a task as done by id
    #[command(alias = "d")]
    Done { id: u64 },

    /// Mark a task as not done by id
    #[command(alias = "u")]
    Undone { id: u64 },

    /// Toggle a task's done status by id
    #[command(alias = "t")]
    Toggle { id: u64 },

    /// Delete a task by id
    #[command(aliases = ["x", "rm", "del"])]
    Delete { id: u64 },

    /// Mark several tasks as done (unknown ids are skipped)
    #[command(alias = "bd")]
    BulkDone {
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<u64>,
    },

    /// Mark several tasks as not done (unknown ids are skipped)
    #[command(alias = "bu")]
    BulkUndone {
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<u64>,
    },

    /// Delete several tasks (unknown ids are skipped)
    #[command(alias = "bx")]
    BulkDelete {
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<u64>,
    },

    /// Permanently delete all completed tasks
    #[command(alias = "clr")]
    Clear {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long = "yes")]
        yes: bool,
    },

    /// List tasks: open first, then by due date, then by priority
    #[command(aliases = ["l", "ls"])]
    List {
        /// Only tasks whose title or notes contain this text
        #[arg(short = 's', long = "search")]
        search: Option<String>,

        /// Only tasks in this category ("all" for every category)
        #[arg(short = 'c', long = "category")]
        category: Option<String>,

        /// Completion status
        #[arg(long = "status", value_enum)]
        status: Option<StatusFilter>,

        /// Print JSON instead of text
        #[arg(long = "json")]
        json: bool,
    },

    /// View a specific task by id
    #[command(alias = "v")]
    View { id: u64 },

    /// Show open tasks past their due date
    #[command(aliases = ["od", "late"])]
    Overdue,

    /// Browse completed tasks
    #[command(aliases = ["arc", "done-list"])]
    Archive {
        /// Group by creation date or by category
        #[arg(short = 'g', long = "group-by", value_enum)]
        group_by: Option<ArchiveGroup>,
    },

    /// Show completion statistics
    #[command(alias = "st")]
    Stats {
        /// Print JSON instead of text
        #[arg(long = "json")]
        json: bool,
    },

    /// Manage categories
    #[command(aliases = ["cat", "categories"])]
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },

    /// Export tasks
    #[command(aliases = ["ex", "out"])]
    Export {
        /// Export format
        #[arg(value_enum, default_value = "json")]
        format: ExportFormat,

        /// Completion status
        #[arg(long = "status", value_enum, default_value = "all")]
        status: StatusFilter,

        /// Only tasks in this category
        #[arg(short = 'c', long = "category")]
        category: Option<String>,
    },

    /// Show or update config defaults
    #[command(alias = "cfg")]
    Config {
        /// Default color output
        #[arg(long = "color")]
        color: Option<bool>,

        /// Status filter used by `list` when none is given
        #[arg(long = "default-status", value_enum)]
        default_status: Option<StatusFilter>,

        /// Default archive grouping
        #[arg(long = "archive-group", value_enum)]
        archive_group: Option<ArchiveGroup>,
    },

    /// Generate shell completions
    #[command(aliases = ["comp", "completion"])]
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories with their task counts
    #[command(alias = "ls")]
    List,

    /// Create a category
    Add {
        name: String,

        /// Display color, e.g. "#10b981"
        #[arg(long = "color", default_value = "")]
        color: String,
    },

    /// Rename a category and move its tasks along
    #[command(alias = "mv")]
    Rename { name: String, new_name: String },

    /// Change a category's color
    Recolor { name: String, color: String },

    /// Delete a category (its tasks keep the old name)
    #[command(aliases = ["rm", "del"])]
    Delete { name: String },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
    Markdown,
}
