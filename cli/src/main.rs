//! cues CLI - manage tasks, projects, and docs from the terminal

mod terminal;

use std::io::{self, Write};
use std::path::PathBuf;

use chrono::{DateTime, Days, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use cues::{ApiClient, DocStore, NewTask, Priority, SessionStore, TaskPatch};

#[derive(Parser)]
#[command(name = "cues")]
#[command(version)]
#[command(about = "Manage cues tasks and projects from the terminal", long_about = None)]
struct Cli {
    /// Backend API base URL
    #[arg(
        long,
        env = "CUES_API_URL",
        default_value = "http://localhost:4000",
        global = true
    )]
    api_url: String,

    /// Docs directory for the `docs` commands
    #[arg(long, env = "CUES_DOCS_DIR", default_value = "docs", global = true)]
    docs_dir: PathBuf,

    /// Session file (defaults to ~/.cues/session.json)
    #[arg(long, env = "CUES_SESSION_FILE", global = true)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with a username or e-mail address
    Login {
        /// Username or e-mail
        identity: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account and log in
    Signup {
        /// Login name
        username: String,

        /// E-mail address
        email: String,

        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Log out and clear the session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Manage projects
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Add a task to the current project
    Add {
        /// Task title
        title: String,

        /// Longer description
        #[arg(long)]
        desc: Option<String>,

        /// Due date: RFC 3339, "YYYY-MM-DD [HH:MM]", "today HH:MM", or "tomorrow HH:MM"
        #[arg(long)]
        due: Option<String>,

        /// Task priority
        #[arg(long, value_enum)]
        priority: Option<PriorityArg>,

        /// Target project id (defaults to the current working project)
        #[arg(long)]
        project: Option<i64>,
    },

    /// List tasks of the current project
    List {
        /// Include tasks from every project
        #[arg(long)]
        all: bool,

        /// Only done tasks
        #[arg(long, conflicts_with = "todo")]
        done: bool,

        /// Only open tasks
        #[arg(long)]
        todo: bool,

        /// Filter by a query over title and description
        #[arg(long)]
        search: Option<String>,
    },

    /// Mark a task done
    Done {
        /// Task id
        id: i64,
    },

    /// Reopen a done task
    Reopen {
        /// Task id
        id: i64,
    },

    /// Edit a task
    Edit {
        /// Task id
        id: i64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long)]
        desc: Option<String>,

        /// New due date
        #[arg(long)]
        due: Option<String>,

        /// New priority
        #[arg(long, value_enum)]
        priority: Option<PriorityArg>,

        /// Clear the priority
        #[arg(long, conflicts_with = "priority")]
        no_priority: bool,
    },

    /// Delete a task
    Rm {
        /// Task id
        id: i64,
    },

    /// Browse the documentation
    Docs {
        #[command(subcommand)]
        command: DocsCommands,
    },
}

#[derive(Subcommand)]
enum ProjectCommands {
    /// List projects with task counts
    List,

    /// Create a project
    New {
        /// Project name
        name: String,
    },

    /// Rename a project
    Rename {
        /// Project id
        id: i64,

        /// New name
        name: String,
    },

    /// Delete a project and its tasks
    Delete {
        /// Project id
        id: i64,
    },

    /// Switch the current working project
    Use {
        /// Project id
        id: i64,
    },
}

#[derive(Subcommand)]
enum DocsCommands {
    /// List available documents
    List,

    /// Render a document
    Show {
        /// Document slug (e.g. "index" or "guide/setup")
        slug: String,

        /// Emit the block sequence as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PriorityArg {
    /// Low priority
    Low,
    /// Medium priority
    Medium,
    /// High priority
    High,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::High => Priority::High,
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> CliResult {
    // Docs commands are local; everything else talks to the backend.
    if let Commands::Docs { command } = &cli.command {
        let store = DocStore::new(&cli.docs_dir);
        return match command {
            DocsCommands::List => cmd_docs_list(&store),
            DocsCommands::Show { slug, json } => cmd_docs_show(&store, slug, *json),
        };
    }

    let sessions = SessionStore::new(session_path(cli.session_file)?);
    log::debug!("session file: {}", sessions.path().display());
    let client = ApiClient::new(&cli.api_url, sessions)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        match cli.command {
            Commands::Login { identity, password } => {
                cmd_login(&client, &identity, password).await
            }
            Commands::Signup {
                username,
                email,
                password,
            } => cmd_signup(&client, &username, &email, password).await,
            Commands::Logout => cmd_logout(&client).await,
            Commands::Whoami => cmd_whoami(&client).await,
            Commands::Project { command } => match command {
                ProjectCommands::List => cmd_project_list(&client).await,
                ProjectCommands::New { name } => cmd_project_new(&client, &name).await,
                ProjectCommands::Rename { id, name } => {
                    cmd_project_rename(&client, id, &name).await
                }
                ProjectCommands::Delete { id } => cmd_project_delete(&client, id).await,
                ProjectCommands::Use { id } => cmd_project_use(&client, id).await,
            },
            Commands::Add {
                title,
                desc,
                due,
                priority,
                project,
            } => cmd_add(&client, title, desc, due, priority, project).await,
            Commands::List {
                all,
                done,
                todo,
                search,
            } => cmd_list(&client, all, done, todo, search.as_deref()).await,
            Commands::Done { id } => cmd_set_done(&client, id, true).await,
            Commands::Reopen { id } => cmd_set_done(&client, id, false).await,
            Commands::Edit {
                id,
                title,
                desc,
                due,
                priority,
                no_priority,
            } => cmd_edit(&client, id, title, desc, due, priority, no_priority).await,
            Commands::Rm { id } => cmd_rm(&client, id).await,
            Commands::Docs { .. } => unreachable!("handled above"),
        }
    })
}

/// Default session file under the user's home directory.
fn session_path(explicit: Option<PathBuf>) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let home = dirs::home_dir().ok_or("cannot determine home directory; pass --session-file")?;
    Ok(home.join(".cues").join("session.json"))
}

// ---- auth commands ----

async fn cmd_login(client: &ApiClient, identity: &str, password: Option<String>) -> CliResult {
    let password = read_password(password)?;
    let session = client.login(identity, &password).await?;
    println!(
        "{} {} <{}>",
        "Logged in as".green(),
        session.user.username.bold(),
        session.user.email
    );
    Ok(())
}

async fn cmd_signup(
    client: &ApiClient,
    username: &str,
    email: &str,
    password: Option<String>,
) -> CliResult {
    let password = read_password(password)?;
    let session = client.signup(username, email, &password).await?;
    println!(
        "{} {} <{}>",
        "Account created, logged in as".green(),
        session.user.username.bold(),
        session.user.email
    );
    Ok(())
}

async fn cmd_logout(client: &ApiClient) -> CliResult {
    client.logout().await?;
    println!("{}", "Logged out".green());
    Ok(())
}

async fn cmd_whoami(client: &ApiClient) -> CliResult {
    let user = client.current_user().await?;
    println!("{} <{}>", user.username.bold(), user.email);
    if let Some(project_id) = client.session().and_then(|s| s.current_project_id) {
        println!("{} #{}", "Current project:".dimmed(), project_id);
    }
    Ok(())
}

// ---- project commands ----

async fn cmd_project_list(client: &ApiClient) -> CliResult {
    let projects = client.projects().await?;
    let tasks = client.tasks().await?;
    let current = client.session().and_then(|s| s.current_project_id);
    terminal::print_projects(&projects, &tasks, current);
    Ok(())
}

async fn cmd_project_new(client: &ApiClient, name: &str) -> CliResult {
    let project = client.create_project(name).await?;
    println!("{} {} (#{})", "Created project".green(), project.name.bold(), project.id);
    Ok(())
}

async fn cmd_project_rename(client: &ApiClient, id: i64, name: &str) -> CliResult {
    let project = client.rename_project(id, name).await?;
    println!("{} {} (#{})", "Renamed project".green(), project.name.bold(), project.id);
    Ok(())
}

async fn cmd_project_delete(client: &ApiClient, id: i64) -> CliResult {
    let project = client.delete_project(id).await?;
    if client.session().and_then(|s| s.current_project_id) == Some(project.id) {
        client.sessions().update(|s| s.current_project_id = None)?;
    }
    println!("{} {} (#{})", "Deleted project".green(), project.name, project.id);
    Ok(())
}

async fn cmd_project_use(client: &ApiClient, id: i64) -> CliResult {
    let projects = client.projects().await?;
    let Some(project) = projects.iter().find(|p| p.id == id) else {
        return Err(format!("no project with id {id}").into());
    };
    client.sessions().update(|s| s.current_project_id = Some(id))?;
    println!("{} {}", "Switched to".green(), project.name.bold());
    Ok(())
}

// ---- task commands ----

async fn cmd_add(
    client: &ApiClient,
    title: String,
    desc: Option<String>,
    due: Option<String>,
    priority: Option<PriorityArg>,
    project: Option<i64>,
) -> CliResult {
    let project_id = match project.or_else(|| client.session().and_then(|s| s.current_project_id)) {
        Some(id) => id,
        None => return Err("no current project; run `cues project use <id>` first".into()),
    };

    let due = due.as_deref().map(parse_due).transpose()?;
    let task = client
        .create_task(&NewTask {
            title,
            description: desc,
            priority: priority.map(Into::into),
            due,
            project_id,
        })
        .await?;

    println!("{}", "Task created".green());
    terminal::print_task(&task);
    Ok(())
}

async fn cmd_list(
    client: &ApiClient,
    all: bool,
    done: bool,
    todo: bool,
    search: Option<&str>,
) -> CliResult {
    let tasks = client.tasks().await?;
    let current = client.session().and_then(|s| s.current_project_id);

    let scoped: Vec<&cues::Task> = tasks
        .iter()
        .filter(|t| all || current.is_none() || Some(t.project_id) == current)
        .filter(|t| search.map_or(true, |q| t.matches(q)))
        .collect();

    let open: Vec<&cues::Task> = scoped.iter().copied().filter(|t| !t.is_done).collect();
    let closed: Vec<&cues::Task> = scoped.iter().copied().filter(|t| t.is_done).collect();

    if done {
        for task in closed {
            terminal::print_task(task);
        }
    } else if todo {
        for task in open {
            terminal::print_task(task);
        }
    } else {
        terminal::print_task_sections(&open, &closed);
    }
    Ok(())
}

async fn cmd_set_done(client: &ApiClient, id: i64, is_done: bool) -> CliResult {
    let task = client.update_task(id, &TaskPatch::done(is_done)).await?;
    println!(
        "{}",
        if is_done { "Task done".green() } else { "Task reopened".green() }
    );
    terminal::print_task(&task);
    Ok(())
}

async fn cmd_edit(
    client: &ApiClient,
    id: i64,
    title: Option<String>,
    desc: Option<String>,
    due: Option<String>,
    priority: Option<PriorityArg>,
    no_priority: bool,
) -> CliResult {
    let patch = TaskPatch {
        title,
        description: desc,
        priority: if no_priority {
            Some(None)
        } else {
            priority.map(|p| Some(p.into()))
        },
        due: due.as_deref().map(parse_due).transpose()?,
        is_done: None,
    };
    if patch.is_empty() {
        return Err("nothing to change; pass at least one --flag".into());
    }

    let task = client.update_task(id, &patch).await?;
    println!("{}", "Task updated".green());
    terminal::print_task(&task);
    Ok(())
}

async fn cmd_rm(client: &ApiClient, id: i64) -> CliResult {
    let task = client.delete_task(id).await?;
    println!("{} {}", "Deleted task".green(), task.title);
    Ok(())
}

// ---- docs commands ----

fn cmd_docs_list(store: &DocStore) -> CliResult {
    let metas = store.list()?;
    if metas.is_empty() {
        println!("{}", "No documents found".yellow());
        return Ok(());
    }
    terminal::print_doc_list(&metas);
    Ok(())
}

fn cmd_docs_show(store: &DocStore, slug: &str, json: bool) -> CliResult {
    let doc = store.get(slug)?;
    let blocks = doc.render();

    if json {
        println!("{}", serde_json::to_string_pretty(&blocks)?);
    } else {
        terminal::print_blocks(&blocks);
    }
    Ok(())
}

// ---- input helpers ----

fn read_password(provided: Option<String>) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(password) = provided {
        return Ok(password);
    }
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Parse a due-date argument.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DD HH:MM`, `YYYY-MM-DD`, and the
/// shorthand `today HH:MM` / `tomorrow HH:MM` in local time.
fn parse_due(input: &str) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Some((word, time)) = input.split_once(' ') {
        let offset = match word {
            "today" => Some(0),
            "tomorrow" => Some(1),
            _ => None,
        };
        if let Some(days) = offset {
            let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
                .map_err(|_| format!("unrecognized time in due date: {input}"))?;
            let date = Local::now()
                .date_naive()
                .checked_add_days(Days::new(days))
                .ok_or("due date out of range")?;
            return local_to_utc(date.and_time(time));
        }
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        return local_to_utc(dt);
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return local_to_utc(date.and_time(NaiveTime::MIN));
    }

    Err(format!("unrecognized due date: {input}").into())
}

fn local_to_utc(naive: NaiveDateTime) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Ok(dt.with_timezone(&Utc)),
        LocalResult::None => Err(format!("due date {naive} does not exist locally").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_due_rfc3339() {
        let due = parse_due("2025-08-01T18:00:00Z").unwrap();
        assert_eq!(due.to_rfc3339(), "2025-08-01T18:00:00+00:00");
    }

    #[test]
    fn test_parse_due_date_and_time() {
        assert!(parse_due("2025-08-01 18:00").is_ok());
        assert!(parse_due("2025-08-01").is_ok());
    }

    #[test]
    fn test_parse_due_shorthand() {
        assert!(parse_due("today 18:00").is_ok());
        assert!(parse_due("tomorrow 09:30").is_ok());
    }

    #[test]
    fn test_parse_due_rejects_junk() {
        assert!(parse_due("next tuesday").is_err());
        assert!(parse_due("today").is_err());
        assert!(parse_due("today 25:00").is_err());
    }
}
