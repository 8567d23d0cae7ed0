//! Pure, derived computations over the task collection. Nothing in here
//! mutates anything; callers recompute on every render.

use crate::models::task::{Category, Task};

/// What subset of the collection a view wants to see.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    All,
    Category(Category),
}

/// The tasks matching `selector`, in original insertion order.
pub fn filter<'a>(tasks: &'a [Task], selector: &Filter) -> Vec<&'a Task> {
    match selector {
        Filter::All => tasks.iter().collect(),
        Filter::Category(category) => tasks.iter().filter(|t| &t.category == category).collect(),
    }
}

pub fn count_by_category(tasks: &[Task], category: &Category) -> usize {
    tasks.iter().filter(|t| &t.category == category).count()
}

pub fn total_count(tasks: &[Task]) -> usize {
    tasks.len()
}

pub fn remaining_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| !t.completed).count()
}

pub fn completed_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| t.completed).count()
}
