use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::memory::fixture_categories;
use super::{CategoryStore, MemoryStore, TaskStore};
use crate::error::{Result, StoreError};
use crate::model::{Category, CategoryPatch, NewCategory, NewTask, Task, TaskPatch};
use crate::storage::{CATEGORIES_FILE, TASKS_FILE, ensure_dir, read_json, write_json};

/// JSON files under a data directory. Everything is loaded on open and the
/// affected file is rewritten after each successful mutation.
///
/// An unreadable `categories.json` does not prevent opening: tasks stay
/// usable and every category call reports the load error instead.
#[derive(Debug)]
pub struct JsonStore {
    dir: PathBuf,
    inner: MemoryStore,
    categories_error: Option<String>,
}

impl JsonStore {
    /// A first run starts with no tasks and the bundled default categories.
    pub fn open(dir: &Path) -> Result<Self> {
        ensure_dir(dir)?;
        let tasks: Vec<Task> = read_json(&dir.join(TASKS_FILE))?.unwrap_or_default();
        let (categories, categories_error) =
            match read_json::<Vec<Category>>(&dir.join(CATEGORIES_FILE)) {
                Ok(Some(categories)) => (categories, None),
                Ok(None) => {
                    info!(dir = %dir.display(), "no categories on disk, using defaults");
                    (fixture_categories()?, None)
                }
                Err(err) => {
                    debug!(error = %err, "categories file unreadable");
                    (Vec::new(), Some(err.to_string()))
                }
            };
        debug!(
            dir = %dir.display(),
            tasks = tasks.len(),
            categories = categories.len(),
            "opened json store"
        );
        Ok(Self {
            dir: dir.to_path_buf(),
            inner: MemoryStore::from_parts(tasks, categories),
            categories_error,
        })
    }

    fn categories_loaded(&self) -> Result<()> {
        match &self.categories_error {
            Some(message) => Err(StoreError::Unavailable(format!(
                "{CATEGORIES_FILE}: {message}"
            ))),
            None => Ok(()),
        }
    }

    fn save_tasks(&self) -> Result<()> {
        write_json(&self.dir.join(TASKS_FILE), self.inner.tasks())
    }

    fn save_categories(&self) -> Result<()> {
        write_json(&self.dir.join(CATEGORIES_FILE), self.inner.categories())
    }
}

impl TaskStore for JsonStore {
    fn list_tasks(&self) -> Result<Vec<Task>> {
        self.inner.list_tasks()
    }

    fn get_task(&self, id: u64) -> Result<Option<Task>> {
        self.inner.get_task(id)
    }

    fn create_task(&mut self, fields: NewTask) -> Result<Task> {
        let task = self.inner.create_task(fields)?;
        self.save_tasks()?;
        Ok(task)
    }

    fn update_task(&mut self, id: u64, patch: &TaskPatch) -> Result<Task> {
        let task = self.inner.update_task(id, patch)?;
        self.save_tasks()?;
        Ok(task)
    }

    fn delete_task(&mut self, id: u64) -> Result<Task> {
        let task = self.inner.delete_task(id)?;
        self.save_tasks()?;
        Ok(task)
    }

    fn bulk_update(&mut self, ids: &[u64], patch: &TaskPatch) -> Result<Vec<Task>> {
        let tasks = self.inner.bulk_update(ids, patch)?;
        if !tasks.is_empty() {
            self.save_tasks()?;
        }
        Ok(tasks)
    }

    fn bulk_delete(&mut self, ids: &[u64]) -> Result<Vec<Task>> {
        let tasks = self.inner.bulk_delete(ids)?;
        if !tasks.is_empty() {
            self.save_tasks()?;
        }
        Ok(tasks)
    }
}

impl CategoryStore for JsonStore {
    fn list_categories(&self) -> Result<Vec<Category>> {
        self.categories_loaded()?;
        self.inner.list_categories()
    }

    fn get_category(&self, id: &str) -> Result<Option<Category>> {
        self.categories_loaded()?;
        self.inner.get_category(id)
    }

    fn create_category(&mut self, fields: NewCategory) -> Result<Category> {
        self.categories_loaded()?;
        let category = self.inner.create_category(fields)?;
        self.save_categories()?;
        Ok(category)
    }

    fn update_category(&mut self, id: &str, patch: &CategoryPatch) -> Result<Category> {
        self.categories_loaded()?;
        let category = self.inner.update_category(id, patch)?;
        self.save_categories()?;
        Ok(category)
    }

    fn delete_category(&mut self, id: &str) -> Result<Category> {
        self.categories_loaded()?;
        let category = self.inner.delete_category(id)?;
        self.save_categories()?;
        Ok(category)
    }
}
