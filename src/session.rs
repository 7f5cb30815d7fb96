// Composition of reducer and persistence

use crate::models::{Action, Task, TaskCollection, TaskId};
use crate::persistence::PersistenceBridge;
use crate::reducer::TaskStore;
use crate::storage::KeyValueStore;
use tracing::{debug, info};

/// Holds the current task collection for one client
///
/// Loads once when opened; every dispatched action runs one transition and
/// then exactly one save of the result.
pub struct TaskSession<S: KeyValueStore> {
    key: String,
    reducer: TaskStore,
    bridge: PersistenceBridge<S>,
    tasks: TaskCollection,
}

impl<S: KeyValueStore> TaskSession<S> {
    pub fn open(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let bridge = PersistenceBridge::new(store);
        let mut reducer = TaskStore::new();
        let tasks = reducer.initialize(bridge.load(&key, TaskCollection::new()));
        info!(key = %key, count = tasks.len(), "Opened task session");

        Self {
            key,
            reducer,
            bridge,
            tasks,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn tasks(&self) -> &TaskCollection {
        &self.tasks
    }

    pub fn total_count(&self) -> usize {
        self.tasks.total_count()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.completed_count()
    }

    pub fn store(&self) -> &S {
        self.bridge.store()
    }

    pub fn store_mut(&mut self) -> &mut S {
        self.bridge.store_mut()
    }

    /// Add a task, unless the title is blank
    ///
    /// Returns the new task when one was added. The title is stored as given,
    /// untrimmed.
    pub fn add(&mut self, title: &str) -> Option<&Task> {
        let before = self.tasks.len();
        self.dispatch(Action::Add(title.to_string()));
        if self.tasks.len() > before {
            self.tasks.last()
        } else {
            None
        }
    }

    pub fn toggle(&mut self, id: TaskId) {
        self.dispatch(Action::Toggle(id));
    }

    pub fn delete(&mut self, id: TaskId) {
        self.dispatch(Action::Delete(id));
    }

    /// Run one transition and persist its result
    ///
    /// An add with a blank title is dropped here, before the reducer, with no
    /// transition and no save.
    pub fn dispatch(&mut self, action: Action) -> &TaskCollection {
        if matches!(&action, Action::Add(title) if title.trim().is_empty()) {
            debug!("dispatch: ignoring add with blank title");
            return &self.tasks;
        }
        debug!(?action, "dispatch");
        self.tasks = self.reducer.transition(&self.tasks, &action);
        self.bridge.save(&self.key, &self.tasks);
        &self.tasks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};
    use tempfile::TempDir;

    fn titles(session: &TaskSession<impl KeyValueStore>) -> Vec<String> {
        session.tasks().iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut session = TaskSession::open(MemoryStore::new(), "tasks");
        assert!(session.tasks().is_empty());

        let first = session.add("Buy milk").unwrap().clone();
        assert_eq!(first.title, "Buy milk");
        assert!(!first.completed);
        assert_eq!(session.tasks().as_slice(), &[first.clone()]);

        session.add("Walk dog").unwrap();
        assert_eq!(session.total_count(), 2);
        assert_eq!(session.completed_count(), 0);

        session.toggle(first.id);
        assert_eq!(session.completed_count(), 1);

        session.delete(first.id);
        assert_eq!(session.total_count(), 1);
        assert_eq!(titles(&session), vec!["Walk dog"]);
    }

    #[test]
    fn test_blank_title_rejected_without_save() {
        let mut session = TaskSession::open(MemoryStore::new(), "tasks");
        session.add("keep").unwrap();
        let before = session.tasks().clone();

        assert!(session.add("   ").is_none());
        assert!(session.add("").is_none());
        assert!(session.add("\t\n").is_none());

        assert_eq!(session.tasks(), &before);
        assert_eq!(session.store().write_count(), 1);
    }

    #[test]
    fn test_blank_add_dispatch_rejected_without_save() {
        let mut session = TaskSession::open(MemoryStore::new(), "tasks");
        session.add("keep me").unwrap();
        let before = session.tasks().clone();

        session.dispatch(Action::Add("   ".to_string()));
        let wire: Action = serde_json::from_str(r#"{"type":"Add_Task","payload":"  "}"#).unwrap();
        session.dispatch(wire);

        assert_eq!(session.tasks(), &before);
        assert_eq!(session.store().write_count(), 1);

        let reopened = TaskSession::open(session.bridge.into_inner(), "tasks");
        assert_eq!(reopened.tasks(), &before);
    }

    #[test]
    fn test_add_with_exhausted_ids_returns_none() {
        let mut store = MemoryStore::new();
        store.insert_raw("tasks", r#"[{"id":9223372036854775807,"title":"x"}]"#);
        let mut session = TaskSession::open(store, "tasks");

        assert!(session.add("next").is_none());
        assert_eq!(session.total_count(), 1);
        assert_eq!(session.tasks().get(TaskId::MAX).map(|t| t.title.as_str()), Some("x"));
    }

    #[test]
    fn test_each_dispatch_saves_once() {
        let mut session = TaskSession::open(MemoryStore::new(), "tasks");
        assert_eq!(session.store().write_count(), 0);

        let id = session.add("a").unwrap().id;
        session.toggle(id);
        session.toggle(999);
        session.dispatch(Action::Unknown);
        session.delete(id);

        assert_eq!(session.store().write_count(), 5);
    }

    #[test]
    fn test_persisted_state_matches_latest() {
        let mut session = TaskSession::open(MemoryStore::new(), "tasks");
        let id = session.add("a").unwrap().id;
        session.add("b").unwrap();
        session.toggle(id);

        let expected = session.tasks().clone();
        let bridge = PersistenceBridge::new(session.bridge.into_inner());
        assert_eq!(bridge.load("tasks", TaskCollection::new()), expected);
    }

    #[test]
    fn test_write_failure_keeps_session_going() {
        let mut session = TaskSession::open(MemoryStore::new(), "tasks");
        session.add("saved").unwrap();

        session.store_mut().fail_writes(true);
        session.add("unsaved").unwrap();
        assert_eq!(session.total_count(), 2);

        session.store_mut().fail_writes(false);
        session.add("saved again").unwrap();

        let expected = session.tasks().clone();
        let reopened = TaskSession::open(session.bridge.into_inner(), "tasks");
        assert_eq!(reopened.tasks(), &expected);
    }

    #[test]
    fn test_corrupt_storage_starts_empty() {
        let mut store = MemoryStore::new();
        store.insert_raw("tasks", "{{{");

        let session = TaskSession::open(store, "tasks");
        assert!(session.tasks().is_empty());
    }

    #[test]
    fn test_reopen_file_store_continues_ids() {
        let temp = TempDir::new().unwrap();

        let last_id = {
            let mut session = TaskSession::open(FileStore::open(temp.path()).unwrap(), "tasks");
            session.add("one").unwrap();
            session.add("two").unwrap().id
        };

        let mut session = TaskSession::open(FileStore::open(temp.path()).unwrap(), "tasks");
        assert_eq!(titles(&session), vec!["one", "two"]);

        let new_id = session.add("three").unwrap().id;
        assert!(new_id > last_id);
    }

    #[test]
    fn test_separate_keys_are_independent() {
        let temp = TempDir::new().unwrap();

        let mut work = TaskSession::open(FileStore::open(temp.path()).unwrap(), "work");
        work.add("report").unwrap();

        let home = TaskSession::open(FileStore::open(temp.path()).unwrap(), "home");
        assert!(home.tasks().is_empty());
        assert_eq!(home.key(), "home");
    }
}
