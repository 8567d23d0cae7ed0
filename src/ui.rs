use colored::*;

use crate::models::task::{Category, Task};
use crate::views;

/// Get the terminal width, defaulting to 80 if unavailable
fn get_terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Get the appropriate status glyph for a task
pub fn get_status_glyph(task: &Task, is_overdue: bool) -> ColoredString {
    if task.completed {
        "✓".dimmed()
    } else if is_overdue {
        "●".red()
    } else {
        "○".normal()
    }
}

/// Category label in its display color; labels outside the built-in set get
/// the same muted styling as Other.
pub fn colored_category(category: &Category) -> ColoredString {
    match category {
        Category::Personal => category.label().blue(),
        Category::Work => category.label().yellow(),
        Category::Shopping => category.label().magenta(),
        Category::Health => category.label().green(),
        Category::Finance => category.label().cyan(),
        Category::Other | Category::Custom(_) => category.label().dimmed(),
    }
}

/// Check if a task's due day has passed
pub fn is_overdue(task: &Task) -> bool {
    if task.completed {
        return false;
    }

    match task.due_date {
        Some(date) => date < jiff::Zoned::now().date(),
        None => false,
    }
}

/// Format the due date (and time, when set) for display, e.g. "Dec 01 09:00"
pub fn format_due(task: &Task) -> Option<String> {
    let date = task.due_date?;
    let day = date.strftime("%b %d").to_string();

    match task.due_time {
        Some(time) => Some(format!("{} {:02}:{:02}", day, time.hour(), time.minute())),
        None => Some(day),
    }
}

/// Render a single task line with id, glyph, text, and right-aligned
/// due/category metadata
pub fn render_task_line(task: &Task) {
    let terminal_width = get_terminal_width();

    let id_str = format!("{:>3}", task.id);
    let glyph = get_status_glyph(task, is_overdue(task));

    let left_section = format!("  {}  {}  {}", id_str, glyph, task.text);
    let styled_left = if task.completed {
        left_section.dimmed()
    } else {
        left_section.bold()
    };

    let mut meta_parts = Vec::new();
    if let Some(due) = format_due(task) {
        meta_parts.push(due);
    }
    meta_parts.push(task.category.label().to_owned());
    let right_section = meta_parts.join("  ·  ");

    let left_visible_len = format!("  {}  {}  {}", id_str, " ", task.text).len();
    let right_visible_len = right_section.chars().count();
    let total_content = left_visible_len + right_visible_len;

    if total_content + 4 < terminal_width {
        let padding = terminal_width - total_content - 2;
        println!("{}{}{}", styled_left, " ".repeat(padding), right_section.dimmed());
    } else {
        // Not enough space for right alignment, just print normally
        println!("{}", styled_left);
    }
}

/// Render a view header with title and count
pub fn render_view_header(title: &str, count: usize) {
    let task_word = if count == 1 { "task" } else { "tasks" };
    println!("\n  {} ({} {})\n", title.cyan().bold(), count, task_word);
}

/// Render per-category counts, annotating the available filters
pub fn render_category_counts(tasks: &[Task]) {
    let parts: Vec<String> = Category::BUILTIN
        .iter()
        .map(|category| {
            format!(
                "{} {}",
                colored_category(category),
                views::count_by_category(tasks, category)
            )
        })
        .collect();

    println!("  {}\n", parts.join(&format!(" {} ", "·".dimmed())));
}

/// Render the remaining/done summary footer
pub fn render_summary(tasks: &[Task]) {
    println!(
        "\n  {}\n",
        format!(
            "{} of {} remaining · {} done",
            views::remaining_count(tasks),
            views::total_count(tasks),
            views::completed_count(tasks)
        )
        .dimmed()
    );
}
