//! Terminal front end for the todos service.
//!
//! Each invocation loads the list, applies one action through the view-state
//! and prints the result. Failures show up in the log, not in the output.

use clap::{Parser, Subcommand};
use todos_client::{HttpTodoApi, TodoState};
use todos_shared::TaskId;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "todos", version, about = "List, add and delete tasks")]
struct Cli {
    /// List endpoint of the service.
    #[arg(long, env = "TODOS_URL", default_value = "http://127.0.0.1:5000/api/todos")]
    url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show every task.
    List,
    /// Add a task; the words are joined with spaces.
    Add { title: Vec<String> },
    /// Delete a task by id.
    Rm { id: TaskId },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut todos = TodoState::new(HttpTodoApi::new(cli.url));
    todos.load().await;

    match cli.command.unwrap_or(Command::List) {
        Command::List => {}
        Command::Add { title } => {
            todos.set_pending_title(title.join(" "));
            todos.submit().await;
        }
        Command::Rm { id } => todos.remove(&id).await,
    }

    print!("{todos}");
    Ok(())
}
