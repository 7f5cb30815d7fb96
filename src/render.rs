// Terminal rendering of the task list

use crate::config::UserProfile;
use crate::models::TaskCollection;
use colored::Colorize;
use std::fmt;

/// Header, one line per task, and the total/completed counts
pub struct TaskListView<'a> {
    pub user: &'a UserProfile,
    pub tasks: &'a TaskCollection,
}

impl fmt::Display for TaskListView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", format!("{}'s Task Manager", self.user.name).bold())?;
        writeln!(f)?;

        if self.tasks.is_empty() {
            writeln!(f, "  {}", "No tasks yet".dimmed())?;
        }

        for task in self.tasks {
            if task.completed {
                writeln!(
                    f,
                    "  {} {:>13}  {}",
                    "[x]".green(),
                    task.id,
                    task.title.strikethrough().dimmed()
                )?;
            } else {
                writeln!(f, "  [ ] {:>13}  {}", task.id, task.title)?;
            }
        }

        writeln!(f)?;
        f.write_str(&render_counts(self.tasks))
    }
}

pub fn render_tasks(user: &UserProfile, tasks: &TaskCollection) -> String {
    TaskListView { user, tasks }.to_string()
}

pub fn render_counts(tasks: &TaskCollection) -> String {
    format!(
        "Total tasks: {}\nCompleted tasks: {}\n",
        tasks.total_count(),
        tasks.completed_count()
    )
}
