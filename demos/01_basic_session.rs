//! Demo 01: Basic Session
//!
//! Adds, toggles and deletes tasks, then reopens the store to show the list
//! survived.
//!
//! Run with: cargo run --example 01_basic_session

use eyre::Result;
use tasklist::render::render_tasks;
use tasklist::{FileStore, TaskSession, UserProfile};

fn main() -> Result<()> {
    // Create a temporary directory for this demo
    let temp_dir = tempfile::tempdir()?;
    let store_path = temp_dir.path().to_path_buf();
    let user = UserProfile {
        name: "Demo".to_string(),
    };

    println!("TaskList Basic Session Demo");
    println!("===========================\n");
    println!("Store path: {}\n", store_path.display());

    let mut session = TaskSession::open(FileStore::open(&store_path)?, "tasks");

    let milk = session.add("Buy milk").map(|task| task.id);
    session.add("Walk dog");
    println!("1. After adding two tasks:\n{}", render_tasks(&user, session.tasks()));

    // Blank titles never reach the reducer
    session.add("   ");

    if let Some(id) = milk {
        session.toggle(id);
        println!("2. After completing \"Buy milk\":\n{}", render_tasks(&user, session.tasks()));

        session.delete(id);
        println!("3. After deleting it:\n{}", render_tasks(&user, session.tasks()));
    }

    drop(session);

    let reopened = TaskSession::open(FileStore::open(&store_path)?, "tasks");
    println!("4. Reopened from disk:\n{}", render_tasks(&user, reopened.tasks()));

    Ok(())
}
