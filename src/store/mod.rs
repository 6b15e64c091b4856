//! Storage seam for tasks and categories.
//!
//! The engines never see a store; callers list a snapshot here and pass it
//! on. Two backends ship: [`MemoryStore`] (optionally seeded from the bundled
//! fixtures) and [`JsonStore`] (files under the data directory).

mod file;
mod memory;
mod workspace;

pub use file::JsonStore;
pub use memory::MemoryStore;
pub use workspace::Workspace;

use crate::error::{Result, StoreError};
use crate::model::{Category, CategoryPatch, NewCategory, NewTask, Task, TaskPatch};

pub trait TaskStore {
    fn list_tasks(&self) -> Result<Vec<Task>>;

    fn get_task(&self, id: u64) -> Result<Option<Task>>;

    /// Assigns `id` and `created_at`; the new task starts incomplete.
    fn create_task(&mut self, fields: NewTask) -> Result<Task>;

    fn update_task(&mut self, id: u64, patch: &TaskPatch) -> Result<Task>;

    fn delete_task(&mut self, id: u64) -> Result<Task>;

    /// Applies `patch` to every id present; unknown ids are skipped.
    fn bulk_update(&mut self, ids: &[u64], patch: &TaskPatch) -> Result<Vec<Task>>;

    /// Removes every id present; unknown ids are skipped.
    fn bulk_delete(&mut self, ids: &[u64]) -> Result<Vec<Task>>;
}

/// Category records as stored. `task_count` is left at zero here; see
/// [`Workspace::categories`] for the joined listing.
pub trait CategoryStore {
    fn list_categories(&self) -> Result<Vec<Category>>;

    fn get_category(&self, id: &str) -> Result<Option<Category>>;

    fn create_category(&mut self, fields: NewCategory) -> Result<Category>;

    fn update_category(&mut self, id: &str, patch: &CategoryPatch) -> Result<Category>;

    fn delete_category(&mut self, id: &str) -> Result<Category>;
}

/// Fills `task_count` on each category by joining on the category name.
pub fn attach_task_counts(categories: &mut [Category], tasks: &[Task]) {
    for category in categories.iter_mut() {
        category.task_count = tasks.iter().filter(|t| t.category == category.name).count();
    }
}

pub fn next_task_id(tasks: &[Task]) -> Result<u64> {
    tasks
        .iter()
        .map(|t| t.id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| StoreError::InvalidInput("task ids exhausted".into()))
}
