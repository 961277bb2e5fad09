//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `todo_core` linkage with deterministic output.
//! - Own the logging and store lifecycle for quick local checks.
//!
//! Usage: `todo_cli [demo | <db_path>] [--log-dir <dir>]`
//! - no command prints ping/version.
//! - `demo` runs a short scenario against an in-memory store.
//! - `<db_path>` opens (and migrates) a database and prints counts.
//!
//! Logs go to `--log-dir`, else next to the database file, else to
//! `<temp>/todo_cli`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use todo_core::{CategoryRepository, ItemRepository, RepoError, TodoStore};

const FALLBACK_LOG_SUBDIR: &str = "todo_cli";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Ping,
    Demo,
    Summary(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliArgs {
    command: Command,
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    let log_dir = resolve_log_dir(&args, &current_dir());
    // A logging failure is reported but does not stop the command.
    let level = todo_core::default_log_level();
    if let Err(err) = todo_core::init_logging(level, &log_dir.to_string_lossy()) {
        eprintln!("warning: logging disabled: {err}");
    }

    println!("todo_core ping={}", todo_core::ping());
    println!("todo_core version={}", todo_core::core_version());

    let result: Result<(), Box<dyn std::error::Error>> = match &args.command {
        Command::Ping => Ok(()),
        Command::Demo => run_demo(),
        Command::Summary(path) => print_summary(path).map_err(Into::into),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut command = Command::Ping;
    let mut log_dir = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--log-dir" => {
                let value = args.next().ok_or("--log-dir requires a directory")?;
                log_dir = Some(PathBuf::from(value));
            }
            _ if command != Command::Ping => return Err(format!("unexpected argument `{arg}`")),
            "demo" => command = Command::Demo,
            _ => command = Command::Summary(PathBuf::from(arg)),
        }
    }

    Ok(CliArgs { command, log_dir })
}

fn resolve_log_dir(args: &CliArgs, cwd: &Path) -> PathBuf {
    let chosen = match (&args.log_dir, &args.command) {
        (Some(dir), _) => dir.clone(),
        (None, Command::Summary(db_path)) => db_path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
        (None, _) => std::env::temp_dir().join(FALLBACK_LOG_SUBDIR),
    };

    if chosen.is_absolute() {
        chosen
    } else {
        cwd.join(chosen)
    }
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| std::env::temp_dir())
}

fn run_demo() -> Result<(), Box<dyn std::error::Error>> {
    let store = TodoStore::open_in_memory()?;
    let service = store.service()?;

    let work = service.add_category("Work", None)?;
    let mike = service.add_item(work.uuid, "Find Mike")?;
    service.add_item(work.uuid, "Buy Eggos")?;

    let hits = service.items(work.uuid, Some("mike"))?;
    let titles: Vec<&str> = hits.iter().map(|item| item.title.as_str()).collect();
    println!("search work/mike={titles:?}");

    service.toggle_item(mike.uuid)?;
    for item in service.items(work.uuid, None)? {
        println!(
            "item title={:?} done={} color={}",
            item.title, item.done, work.color_tag
        );
    }
    Ok(())
}

fn print_summary(path: &Path) -> Result<(), RepoError> {
    let store = TodoStore::open(path)?;
    let categories = store.categories()?;
    let items = store.items()?;

    let listed = categories.list_categories()?;
    println!("categories={}", listed.len());
    for category in listed {
        let count = items.list_by_category(category.uuid)?.len();
        println!("category id={} items={}", category.uuid, count);
    }
    Ok(())
}
