// Data models for the task list

use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Task identifier, unique within a collection and never reused
pub type TaskId = i64;

/// One to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
        }
    }
}

/// Ordered list of tasks; insertion order is significant
///
/// Serializes as a plain JSON array of tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskCollection(Vec<Task>);

impl TaskCollection {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.0.iter().find(|task| task.id == id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    pub fn last(&self) -> Option<&Task> {
        self.0.last()
    }

    /// Largest id in the collection, if any
    pub fn max_id(&self) -> Option<TaskId> {
        self.0.iter().map(|task| task.id).max()
    }

    /// Number of tasks
    pub fn total_count(&self) -> usize {
        self.0.len()
    }

    /// Number of tasks marked completed
    pub fn completed_count(&self) -> usize {
        self.0.iter().filter(|task| task.completed).count()
    }

    /// Check the collection invariants: unique ids and non-blank titles
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.0.len());
        for task in &self.0 {
            if !seen.insert(task.id) {
                return Err(eyre!("Duplicate task id: {}", task.id));
            }
            if task.title.trim().is_empty() {
                return Err(eyre!("Task {} has a blank title", task.id));
            }
        }
        Ok(())
    }
}

impl From<Vec<Task>> for TaskCollection {
    fn from(tasks: Vec<Task>) -> Self {
        Self(tasks)
    }
}

impl FromIterator<Task> for TaskCollection {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for TaskCollection {
    type Item = Task;
    type IntoIter = std::vec::IntoIter<Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a TaskCollection {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A request to change the task list
///
/// Wire form is `{"type": "Add_Task", "payload": "Buy milk"}`. Any type this
/// build doesn't recognise decodes to `Unknown`, which the reducer ignores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAction", into = "RawAction")]
pub enum Action {
    Add(String),
    Toggle(TaskId),
    Delete(TaskId),
    Unknown,
}

const ADD_TASK: &str = "Add_Task";
const TOGGLE_TASK: &str = "Toggle_Task";
const DELETE_TASK: &str = "Delete_Task";
const UNKNOWN: &str = "Unknown";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    payload: Option<Value>,
}

impl TryFrom<RawAction> for Action {
    type Error = String;

    fn try_from(raw: RawAction) -> std::result::Result<Self, Self::Error> {
        let kind = raw.kind.as_str();
        let action = match kind {
            ADD_TASK => match raw.payload {
                Some(Value::String(title)) => Action::Add(title),
                _ => return Err(format!("{} requires a string payload", kind)),
            },
            TOGGLE_TASK | DELETE_TASK => {
                let id = raw
                    .payload
                    .as_ref()
                    .and_then(Value::as_i64)
                    .ok_or_else(|| format!("{} requires an integer payload", kind))?;
                if kind == TOGGLE_TASK {
                    Action::Toggle(id)
                } else {
                    Action::Delete(id)
                }
            }
            _ => Action::Unknown,
        };
        Ok(action)
    }
}

impl From<Action> for RawAction {
    fn from(action: Action) -> Self {
        let (kind, payload) = match action {
            Action::Add(title) => (ADD_TASK, Some(Value::String(title))),
            Action::Toggle(id) => (TOGGLE_TASK, Some(Value::from(id))),
            Action::Delete(id) => (DELETE_TASK, Some(Value::from(id))),
            Action::Unknown => (UNKNOWN, None),
        };
        RawAction {
            kind: kind.to_string(),
            payload,
        }
    }
}
