//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `georemind_core` linkage without a mobile shell.
//! - Optionally dump the reminders stored in a database file.
//!
//! Usage: `georemind [--json] [DB_PATH]`; falls back to `GEOREMIND_DB_PATH`.
//! `--json` prints the stored records in their serialized wire shape.

use georemind_core::db::open_db;
use georemind_core::{CoreConfig, Reminder, ReminderStore, SqliteReminderStore};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, PartialEq)]
struct CliArgs {
    json: bool,
    db_path: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> CliArgs {
    let mut parsed = CliArgs {
        json: false,
        db_path: None,
    };
    for arg in args {
        if arg == "--json" {
            parsed.json = true;
        } else if parsed.db_path.is_none() {
            parsed.db_path = Some(PathBuf::from(arg));
        }
    }
    parsed
}

fn main() -> ExitCode {
    let args = parse_args(std::env::args().skip(1));
    let db_path = args
        .db_path
        .unwrap_or_else(|| CoreConfig::from_env().db_path);

    if !args.json {
        println!("georemind_core ping={}", georemind_core::ping());
        println!("georemind_core version={}", georemind_core::core_version());
    }

    let store = match open_db(&db_path) {
        Ok(conn) => SqliteReminderStore::new(conn),
        Err(err) => {
            eprintln!("failed to open `{}`: {err}", db_path.display());
            return ExitCode::FAILURE;
        }
    };

    let reminders = match store.get_all() {
        Ok(reminders) => reminders,
        Err(err) => {
            eprintln!("failed to list reminders: {err}");
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        return match serde_json::to_string_pretty(&reminders) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("failed to serialize reminders: {err}");
                ExitCode::FAILURE
            }
        };
    }

    println!("db={} reminders={}", db_path.display(), reminders.len());
    for reminder in &reminders {
        println!("{}", summary_line(reminder));
    }
    ExitCode::SUCCESS
}

fn summary_line(reminder: &Reminder) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        reminder.id,
        reminder.title.as_deref().unwrap_or("-"),
        reminder.location.as_deref().unwrap_or("-"),
        reminder
            .coordinates()
            .map(|(lat, lng)| format!("{lat:.5},{lng:.5}"))
            .unwrap_or_else(|| "-".to_string()),
    )
}
