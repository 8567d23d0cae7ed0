use jiff::civil::{Date, Time};

use crate::models::task::{Category, Task};

/// The canonical ordered task collection.
///
/// Owns every task for the lifetime of the process and hands out fresh ids
/// from a monotonic counter seeded past the highest loaded id. Insertion
/// order is preserved by every operation; `delete` removes in place.
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::from_tasks(Vec::new())
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id).max().map_or(1, |max| max + 1);
        Self { tasks, next_id }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Appends a new pending task and returns it.
    ///
    /// Text that trims to empty is rejected as a no-op; accepted text is
    /// stored untrimmed.
    pub fn add(
        &mut self,
        text: String,
        category: Category,
        due_date: Option<Date>,
        due_time: Option<Time>,
    ) -> Option<&Task> {
        if text.trim().is_empty() {
            return None;
        }

        let task = Task {
            id: self.next_id,
            text,
            completed: false,
            category,
            due_date,
            due_time,
        };
        self.next_id += 1;
        self.tasks.push(task);
        self.tasks.last()
    }

    /// Flips `completed` on the matching task; no-op when `id` is absent.
    pub fn toggle(&mut self, id: u64) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    /// Replaces text and due date/time on the matching task.
    ///
    /// Category and completion state are left untouched. No-op when the text
    /// trims to empty or no task matches.
    pub fn update(
        &mut self,
        id: u64,
        text: String,
        due_date: Option<Date>,
        due_time: Option<Time>,
    ) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.text = text;
                task.due_date = due_date;
                task.due_time = due_time;
                true
            }
            None => false,
        }
    }

    /// Removes the matching task in place; no-op when `id` is absent.
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_appends_in_order_with_unique_ids() {
        let mut store = TaskStore::new();

        store.add(String::from("first"), Category::Personal, None, None);
        store.add(String::from("second"), Category::Work, None, None);
        store.add(String::from("third"), Category::Personal, None, None);

        let texts: Vec<_> = store.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["first", "second", "third"]);

        let mut ids: Vec<_> = store.tasks().iter().map(|t| t.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_add_rejects_whitespace_only_text() {
        let mut store = TaskStore::new();

        assert!(store.add(String::from("   "), Category::Personal, None, None).is_none());
        assert!(store.add(String::new(), Category::Personal, None, None).is_none());
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn test_add_stores_text_untrimmed() {
        let mut store = TaskStore::new();

        let task = store
            .add(String::from("  padded  "), Category::Personal, None, None)
            .unwrap();
        assert_eq!(task.text, "  padded  ");
    }

    #[test]
    fn test_toggle_is_an_involution() {
        let mut store = TaskStore::new();
        let id = store
            .add(String::from("flip me"), Category::Personal, None, None)
            .unwrap()
            .id;

        assert!(store.toggle(id));
        assert!(store.get(id).unwrap().completed);
        assert!(store.toggle(id));
        assert!(!store.get(id).unwrap().completed);
    }

    #[test]
    fn test_toggle_unknown_id_is_a_no_op() {
        let mut store = TaskStore::new();
        store.add(String::from("only task"), Category::Personal, None, None);

        assert!(!store.toggle(999));
        assert!(!store.tasks()[0].completed);
    }

    #[test]
    fn test_update_keeps_category_and_completion() {
        let mut store = TaskStore::new();
        let id = store
            .add(String::from("old text"), Category::Work, None, None)
            .unwrap()
            .id;
        store.toggle(id);

        let due = jiff::civil::date(2026, 1, 15);
        assert!(store.update(id, String::from("new text"), Some(due), None));

        let task = store.get(id).unwrap();
        assert_eq!(task.text, "new text");
        assert_eq!(task.due_date, Some(due));
        assert_eq!(task.category, Category::Work);
        assert!(task.completed);
    }

    #[test]
    fn test_update_rejects_empty_text_keeping_old_values() {
        let mut store = TaskStore::new();
        let id = store
            .add(String::from("keep me"), Category::Personal, None, None)
            .unwrap()
            .id;

        assert!(!store.update(id, String::from("  "), None, None));
        assert_eq!(store.get(id).unwrap().text, "keep me");
    }

    #[test]
    fn test_update_unknown_id_is_a_no_op() {
        let mut store = TaskStore::new();
        assert!(!store.update(42, String::from("ghost"), None, None));
    }

    #[test]
    fn test_delete_removes_in_place_preserving_order() {
        let mut store = TaskStore::new();
        let a = store.add(String::from("a"), Category::Personal, None, None).unwrap().id;
        let b = store.add(String::from("b"), Category::Personal, None, None).unwrap().id;
        let c = store.add(String::from("c"), Category::Personal, None, None).unwrap().id;

        assert!(store.delete(b));
        let remaining: Vec<_> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(remaining, [a, c]);

        assert!(!store.delete(b));
        assert!(!store.toggle(b));
        assert!(!store.update(b, String::from("back?"), None, None));
    }

    #[test]
    fn test_deleted_id_is_never_reissued() {
        let mut store = TaskStore::new();
        let id = store.add(String::from("short lived"), Category::Personal, None, None).unwrap().id;
        store.delete(id);

        let next = store.add(String::from("successor"), Category::Personal, None, None).unwrap().id;
        assert_ne!(next, id);
    }

    #[test]
    fn test_next_id_is_seeded_past_loaded_ids() {
        let loaded = vec![
            Task {
                id: 3,
                text: String::from("three"),
                completed: false,
                category: Category::Personal,
                due_date: None,
                due_time: None,
            },
            Task {
                id: 11,
                text: String::from("eleven"),
                completed: true,
                category: Category::Other,
                due_date: None,
                due_time: None,
            },
        ];
        let mut store = TaskStore::from_tasks(loaded);

        let id = store.add(String::from("fresh"), Category::Personal, None, None).unwrap().id;
        assert_eq!(id, 12);
    }

    #[test]
    fn test_full_task_lifecycle() {
        let mut store = TaskStore::new();

        let id = store
            .add(String::from("Buy milk"), Category::Shopping, None, None)
            .unwrap()
            .id;
        assert_eq!(store.tasks().len(), 1);
        assert!(!store.get(id).unwrap().completed);
        assert_eq!(store.get(id).unwrap().category, Category::Shopping);
        assert_eq!(store.get(id).unwrap().due_date, None);

        assert!(store.toggle(id));
        assert!(store.get(id).unwrap().completed);

        let due = jiff::civil::date(2025, 12, 1);
        let at = jiff::civil::time(9, 0, 0, 0);
        assert!(store.update(id, String::from("Buy oat milk"), Some(due), Some(at)));

        let task = store.get(id).unwrap();
        assert_eq!(task.text, "Buy oat milk");
        assert_eq!(task.due_date, Some(due));
        assert_eq!(task.due_time, Some(at));
        assert!(task.completed);
        assert_eq!(task.category, Category::Shopping);

        assert!(store.delete(id));
        assert!(store.tasks().is_empty());
    }
}
