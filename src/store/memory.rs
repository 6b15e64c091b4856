use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{CategoryStore, TaskStore, next_task_id};
use crate::error::{Result, StoreError};
use crate::model::{
    Category, CategoryPatch, DEFAULT_CATEGORY, DEFAULT_CATEGORY_COLOR, NewCategory, NewTask, Task,
    TaskPatch,
};

const FIXTURE_TASKS: &str = include_str!("../fixtures/tasks.json");
const FIXTURE_CATEGORIES: &str = include_str!("../fixtures/categories.json");

/// Tasks and categories held in plain vectors, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tasks: Vec<Task>,
    categories: Vec<Category>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(tasks: Vec<Task>, categories: Vec<Category>) -> Self {
        Self { tasks, categories }
    }

    /// Store preloaded with the bundled demo tasks and categories.
    pub fn seeded() -> Result<Self> {
        Ok(Self {
            tasks: fixture_tasks()?,
            categories: fixture_categories()?,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    fn category_position(&self, id: &str) -> Option<usize> {
        self.categories.iter().position(|c| c.id == id)
    }

    fn ensure_unique_name(&self, name: &str, except: Option<&str>) -> Result<()> {
        let taken = self
            .categories
            .iter()
            .any(|c| c.name == name && Some(c.id.as_str()) != except);
        if taken {
            return Err(StoreError::InvalidInput(format!(
                "category '{name}' already exists"
            )));
        }
        Ok(())
    }
}

pub fn fixture_tasks() -> Result<Vec<Task>> {
    Ok(serde_json::from_str(FIXTURE_TASKS)?)
}

pub fn fixture_categories() -> Result<Vec<Category>> {
    Ok(serde_json::from_str(FIXTURE_CATEGORIES)?)
}

fn normalize_title(title: &str) -> Result<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidInput("title must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

fn normalize_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidInput(
            "category name must not be empty".into(),
        ));
    }
    Ok(trimmed.to_string())
}

fn validate_patch(patch: &TaskPatch) -> Result<TaskPatch> {
    let mut patch = patch.clone();
    if let Some(title) = patch.title.as_deref() {
        patch.title = Some(normalize_title(title)?);
    }
    if let Some(category) = patch.category.as_deref() {
        patch.category = Some(normalize_name(category)?);
    }
    Ok(patch)
}

impl TaskStore for MemoryStore {
    fn list_tasks(&self) -> Result<Vec<Task>> {
        Ok(self.tasks.clone())
    }

    fn get_task(&self, id: u64) -> Result<Option<Task>> {
        Ok(self.tasks.iter().find(|t| t.id == id).cloned())
    }

    fn create_task(&mut self, fields: NewTask) -> Result<Task> {
        let title = normalize_title(&fields.title)?;
        let category = match fields.category.trim() {
            "" => DEFAULT_CATEGORY.to_string(),
            name => name.to_string(),
        };

        let task = Task {
            id: next_task_id(&self.tasks)?,
            title,
            category,
            priority: fields.priority,
            due_date: fields.due_date,
            completed: false,
            created_at: Utc::now(),
            notes: fields.notes.trim().to_string(),
        };
        debug!(id = task.id, category = %task.category, "created task");
        self.tasks.push(task.clone());
        Ok(task)
    }

    fn update_task(&mut self, id: u64, patch: &TaskPatch) -> Result<Task> {
        let patch = validate_patch(patch)?;
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::task_not_found(id))?;
        patch.apply(&mut self.tasks[index]);
        debug!(id, "updated task");
        Ok(self.tasks[index].clone())
    }

    fn delete_task(&mut self, id: u64) -> Result<Task> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::task_not_found(id))?;
        debug!(id, "deleted task");
        Ok(self.tasks.remove(index))
    }

    fn bulk_update(&mut self, ids: &[u64], patch: &TaskPatch) -> Result<Vec<Task>> {
        let patch = validate_patch(patch)?;
        let mut updated = Vec::new();
        for &id in ids {
            let Some(index) = self.position(id) else {
                debug!(id, "bulk update skipped unknown task");
                continue;
            };
            patch.apply(&mut self.tasks[index]);
            updated.push(self.tasks[index].clone());
        }
        Ok(updated)
    }

    fn bulk_delete(&mut self, ids: &[u64]) -> Result<Vec<Task>> {
        let mut deleted = Vec::new();
        for &id in ids {
            let Some(index) = self.position(id) else {
                debug!(id, "bulk delete skipped unknown task");
                continue;
            };
            deleted.push(self.tasks.remove(index));
        }
        Ok(deleted)
    }
}

impl CategoryStore for MemoryStore {
    fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.clone())
    }

    fn get_category(&self, id: &str) -> Result<Option<Category>> {
        Ok(self.categories.iter().find(|c| c.id == id).cloned())
    }

    fn create_category(&mut self, fields: NewCategory) -> Result<Category> {
        let name = normalize_name(&fields.name)?;
        self.ensure_unique_name(&name, None)?;
        let color = match fields.color.trim() {
            "" => DEFAULT_CATEGORY_COLOR.to_string(),
            color => color.to_string(),
        };

        let category = Category {
            id: Uuid::new_v4().to_string(),
            name,
            color,
            task_count: 0,
        };
        debug!(id = %category.id, name = %category.name, "created category");
        self.categories.push(category.clone());
        Ok(category)
    }

    fn update_category(&mut self, id: &str, patch: &CategoryPatch) -> Result<Category> {
        let index = self
            .category_position(id)
            .ok_or_else(|| StoreError::category_not_found(id))?;

        if let Some(name) = patch.name.as_deref() {
            let name = normalize_name(name)?;
            self.ensure_unique_name(&name, Some(id))?;
            let old = std::mem::replace(&mut self.categories[index].name, name);
            let orphaned = self.tasks.iter().filter(|t| t.category == old).count();
            if orphaned > 0 && old != self.categories[index].name {
                warn!(
                    category = %old,
                    orphaned,
                    "category renamed without updating its tasks"
                );
            }
        }
        if let Some(color) = patch.color.as_deref() {
            self.categories[index].color = color.trim().to_string();
        }
        Ok(self.categories[index].clone())
    }

    fn delete_category(&mut self, id: &str) -> Result<Category> {
        let index = self
            .category_position(id)
            .ok_or_else(|| StoreError::category_not_found(id))?;
        let removed = self.categories.remove(index);
        let orphaned = self
            .tasks
            .iter()
            .filter(|t| t.category == removed.name)
            .count();
        if orphaned > 0 {
            warn!(category = %removed.name, orphaned, "deleted category still has tasks");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.into(),
            category: "Work".into(),
            priority: Priority::High,
            ..NewTask::default()
        }
    }

    #[test]
    fn create_assigns_sequential_ids_and_starts_open() {
        let mut store = MemoryStore::new();
        let first = store.create_task(new_task("  first ")).unwrap();
        let second = store.create_task(new_task("second")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.title, "first");
        assert!(!first.completed);
    }

    #[test]
    fn create_rejects_blank_title_and_defaults_category() {
        let mut store = MemoryStore::new();
        let err = store.create_task(new_task("   ")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));

        let task = store
            .create_task(NewTask {
                title: "x".into(),
                ..NewTask::default()
            })
            .unwrap();
        assert_eq!(task.category, DEFAULT_CATEGORY);
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn create_refuses_when_ids_are_exhausted() {
        let mut store = MemoryStore::new();
        let mut last = store.create_task(new_task("last")).unwrap();
        last.id = u64::MAX;
        let mut store = MemoryStore::from_parts(vec![last], Vec::new());

        let err = store.create_task(new_task("one more")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn update_and_delete_report_missing_ids() {
        let mut store = MemoryStore::new();
        let err = store.update_task(42, &TaskPatch::completed(true)).unwrap_err();
        assert!(err.is_not_found());
        let err = store.delete_task(42).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn update_keeps_created_at() {
        let mut store = MemoryStore::new();
        let task = store.create_task(new_task("keep")).unwrap();
        let patch = TaskPatch {
            title: Some("renamed".into()),
            due_date: Some(None),
            completed: Some(true),
            ..TaskPatch::default()
        };
        let updated = store.update_task(task.id, &patch).unwrap();
        assert_eq!(updated.title, "renamed");
        assert!(updated.completed);
        assert_eq!(updated.created_at, task.created_at);
    }

    #[test]
    fn bulk_operations_skip_unknown_ids() {
        let mut store = MemoryStore::new();
        let a = store.create_task(new_task("a")).unwrap();
        let b = store.create_task(new_task("b")).unwrap();

        let updated = store
            .bulk_update(&[a.id, 99, b.id], &TaskPatch::completed(true))
            .unwrap();
        assert_eq!(updated.len(), 2);
        assert!(updated.iter().all(|t| t.completed));

        let deleted = store.bulk_delete(&[99, a.id]).unwrap();
        assert_eq!(deleted.len(), 1);
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].id, b.id);
    }

    #[test]
    fn category_names_are_unique() {
        let mut store = MemoryStore::new();
        store
            .create_category(NewCategory {
                name: "Work".into(),
                color: String::new(),
            })
            .unwrap();
        let err = store
            .create_category(NewCategory {
                name: "Work".into(),
                color: "#fff".into(),
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
    }

    #[test]
    fn seeded_store_loads_fixtures() {
        let store = MemoryStore::seeded().unwrap();
        assert!(!store.tasks().is_empty());
        assert!(!store.categories().is_empty());
        for task in store.tasks() {
            assert!(
                store.categories().iter().any(|c| c.name == task.category),
                "fixture task {} has unknown category {}",
                task.id,
                task.category
            );
        }
    }
}
