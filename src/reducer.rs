// Task state transitions

use crate::models::{Action, Task, TaskCollection, TaskId};
use tracing::{debug, warn};

/// Issues strictly increasing task ids
///
/// Ids are wall-clock milliseconds. When the clock hasn't moved past the last
/// issued id (same tick, or the clock stepped backwards) the next id is
/// `last + 1`, so ids never repeat for the life of the generator. Once
/// `i64::MAX` has been issued or observed there are no ids left.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: Option<TaskId>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Never issue an id at or below `id`
    pub fn observe(&mut self, id: TaskId) {
        if self.last.is_none_or(|last| id > last) {
            self.last = Some(id);
        }
    }

    /// Next id, or `None` when the id space is exhausted
    pub fn next_id(&mut self) -> Option<TaskId> {
        self.next_after(chrono::Utc::now().timestamp_millis())
    }

    fn next_after(&mut self, now: TaskId) -> Option<TaskId> {
        let id = match self.last {
            Some(last) if now <= last => last.checked_add(1)?,
            _ => now,
        };
        self.last = Some(id);
        Some(id)
    }
}

/// Computes the next task collection from the current one and an action
///
/// Holds no collection itself; the caller keeps the current state and passes
/// it back in. The only state is the id generator used by `Add`.
#[derive(Debug, Default)]
pub struct TaskStore {
    ids: IdGenerator,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a starting collection
    ///
    /// Any sequence is accepted. Ids already in the seed are reserved so
    /// later adds never collide with them.
    pub fn initialize(&mut self, seed: TaskCollection) -> TaskCollection {
        if let Some(max) = seed.max_id() {
            self.ids.observe(max);
        }
        debug!(count = seed.len(), "initialize: seeded task store");
        seed
    }

    /// Apply `action` to `current`, returning the new collection
    ///
    /// `current` is never modified. Toggle and delete of an id that isn't
    /// present, unknown actions, and adds once ids are exhausted return an
    /// equal collection.
    pub fn transition(&mut self, current: &TaskCollection, action: &Action) -> TaskCollection {
        match action {
            Action::Add(title) => {
                let Some(id) = self.ids.next_id() else {
                    warn!("transition: no task ids left, ignoring add");
                    return current.clone();
                };
                debug!(id, "transition: add");
                current
                    .iter()
                    .cloned()
                    .chain(std::iter::once(Task::new(id, title.clone())))
                    .collect()
            }
            Action::Toggle(id) => current
                .iter()
                .map(|task| {
                    if task.id == *id {
                        Task {
                            completed: !task.completed,
                            ..task.clone()
                        }
                    } else {
                        task.clone()
                    }
                })
                .collect(),
            Action::Delete(id) => current.iter().filter(|task| task.id != *id).cloned().collect(),
            Action::Unknown => current.clone(),
        }
    }
}
