use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;
use teamtasks::{Config, Outcome, Session, Task, TaskId};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "teamtasks")]
#[command(about = "Team task list - add, edit, complete, filter and search tasks")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to a YAML config file (default: <config dir>/teamtasks/teamtasks.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start with an empty task list instead of the configured seed tasks
    #[arg(long)]
    no_seed: bool,

    /// Print task lists as JSON
    #[arg(long)]
    json: bool,
}

const HELP: &str = "\
Commands:
  add <text> | <author>     create a task
  toggle <id>               mark done / not done
  delete <id>               remove a task
  edit <id>                 start editing a task
  text <value>              set the edited text
  author <value>            set the edited author
  save | cancel             finish editing
  search [query]            search text and author (applied after typing settles)
  status <all|completed|pending>
  by <all|author>           show one author's tasks
  list | authors
  login <user> <pass> | logout | whoami
  help | quit";

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let mut session = Session::from_config(&config, !cli.no_seed)?;

    println!("{}", "Team task list".bold().purple());
    render(&session.execute(teamtasks::Command::List, Instant::now()), cli.json)?;

    let stdin = io::stdin();
    loop {
        print!("{} ", ">".purple());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("Failed to read input")? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        match session.handle_line(&line, Instant::now()) {
            Ok(Outcome::Quit) => break,
            Ok(outcome) => render(&outcome, cli.json)?,
            Err(e) => println!("{}", format!("{:#}", e).red()),
        }
    }

    info!("Session ended");
    Ok(())
}

fn render(outcome: &Outcome, json: bool) -> Result<()> {
    match outcome {
        Outcome::Tasks { tasks, editing } => {
            if json {
                println!("{}", serde_json::to_string_pretty(tasks)?);
            } else {
                render_tasks(tasks, *editing);
            }
        }
        Outcome::Authors(authors) => {
            if json {
                println!("{}", serde_json::to_string(authors)?);
            } else if authors.is_empty() {
                println!("{}", "No authors yet".dimmed());
            } else {
                println!("{}", authors.join(", "));
            }
        }
        Outcome::Created(task) => println!("{} {}", "Added".green(), format_task(task)),
        Outcome::Editing { id, text, author } => {
            println!("{} #{}: {} ({})", "Editing".yellow(), id, text, author.italic());
        }
        Outcome::Message(message) => println!("{}", message),
        Outcome::Rejected(message) => println!("{}", message.red()),
        Outcome::Navigate(route) => println!("{} {}", "->".cyan(), route),
        Outcome::Help => println!("{}", HELP),
        Outcome::Quit => {}
    }
    Ok(())
}

fn render_tasks(tasks: &[Task], editing: Option<TaskId>) {
    if tasks.is_empty() {
        println!("{}", "No tasks".dimmed());
        return;
    }
    for task in tasks {
        let marker = if editing == Some(task.id) { "*".yellow() } else { " ".normal() };
        println!("{}{}", marker, format_task(task));
    }
}

fn format_task(task: &Task) -> String {
    let check = if task.completed { "[x]" } else { "[ ]" };
    let text = if task.completed {
        task.text.strikethrough().dimmed().to_string()
    } else {
        task.text.clone()
    };
    format!("{:>4} {} {} ({})", task.id.to_string().dimmed(), check, text, task.author.italic())
}
