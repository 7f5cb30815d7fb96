// TaskList - Single-user task list with a pure reducer and key-value persistence

pub mod config;
pub mod models;
pub mod persistence;
pub mod reducer;
pub mod render;
pub mod session;
pub mod storage;

// Re-export main types for convenience
pub use config::{Config, UserProfile};
pub use models::{Action, Task, TaskCollection, TaskId};
pub use persistence::PersistenceBridge;
pub use reducer::{IdGenerator, TaskStore};
pub use session::TaskSession;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
