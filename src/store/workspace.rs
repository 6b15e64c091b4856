use tracing::info;

use super::{CategoryStore, TaskStore, attach_task_counts};
use crate::error::{Result, StoreError};
use crate::model::{Category, CategoryPatch, Task, TaskPatch};

/// Operations that span both stores: the task-count join, the rename
/// cascade, and clearing completed tasks.
pub struct Workspace<S> {
    store: S,
}

impl<S: TaskStore + CategoryStore> Workspace<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Category roster with `task_count` joined from the current task list.
    pub fn categories(&self) -> Result<Vec<Category>> {
        let tasks = self.store.list_tasks()?;
        let mut categories = self.store.list_categories()?;
        attach_task_counts(&mut categories, &tasks);
        Ok(categories)
    }

    pub fn find_category_by_name(&self, name: &str) -> Result<Option<Category>> {
        Ok(self
            .categories()?
            .into_iter()
            .find(|c| c.name == name))
    }

    /// Renames a category and moves every task that referenced the old name.
    /// Returns the updated category and the number of tasks moved.
    pub fn rename_category(&mut self, id: &str, new_name: &str) -> Result<(Category, usize)> {
        let Some(existing) = self.store.get_category(id)? else {
            return Err(StoreError::category_not_found(id));
        };
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(StoreError::InvalidInput(
                "category name must not be empty".into(),
            ));
        }
        let taken = self
            .store
            .list_categories()?
            .iter()
            .any(|c| c.name == new_name && c.id != id);
        if taken {
            return Err(StoreError::InvalidInput(format!(
                "category '{new_name}' already exists"
            )));
        }

        let ids: Vec<u64> = self
            .store
            .list_tasks()?
            .iter()
            .filter(|t| t.category == existing.name)
            .map(|t| t.id)
            .collect();
        let moved = if ids.is_empty() {
            Vec::new()
        } else {
            self.store.bulk_update(
                &ids,
                &TaskPatch {
                    category: Some(new_name.to_string()),
                    ..TaskPatch::default()
                },
            )?
        };
        let updated = self.store.update_category(
            id,
            &CategoryPatch {
                name: Some(new_name.to_string()),
                color: None,
            },
        )?;

        info!(
            from = %existing.name,
            to = %updated.name,
            moved = moved.len(),
            "renamed category"
        );
        let mut updated = updated;
        updated.task_count = moved.len();
        Ok((updated, moved.len()))
    }

    pub fn delete_category(&mut self, id: &str) -> Result<Category> {
        let removed = self.store.delete_category(id)?;
        let orphaned = self
            .store
            .list_tasks()?
            .iter()
            .filter(|t| t.category == removed.name)
            .count();
        Ok(Category {
            task_count: orphaned,
            ..removed
        })
    }

    /// Deletes every completed task.
    pub fn clear_completed(&mut self) -> Result<Vec<Task>> {
        let ids: Vec<u64> = self
            .store
            .list_tasks()?
            .iter()
            .filter(|t| t.completed)
            .map(|t| t.id)
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.store.bulk_delete(&ids)
    }
}
