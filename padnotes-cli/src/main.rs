//! Command-line front end for Padnotes.
//!
//! This is the "UI layer" of the pad: it maps subcommands onto
//! [`NoteStore`] operations and renders the resulting list as text or JSON.
//! All state consistency lives in `padnotes-core`; this binary only supplies
//! inputs and re-renders after operations that change the list.

use clap::{Parser, Subcommand};
use log::debug;
use padnotes_core::{Note, NoteStore, Result, SqliteGateway, DEFAULT_DATASET_KEY};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "padnotes",
    version,
    about = "Local-first sticky-note pad",
    infer_subcommands = true,
    arg_required_else_help = true
)]
struct Cli {
    /// Database file (default: the per-user data directory).
    #[arg(long, global = true, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Machine-readable JSON output.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a note.
    Add { name: String, text: String },
    /// Replace a note's name and text.
    Edit {
        id: String,
        name: String,
        text: String,
    },
    /// Delete one note.
    Delete { id: String },
    /// Print all notes in display order.
    List,
    /// Print the notes whose name or text contains the query.
    Find { query: String },
    /// Delete all notes and remove the persisted entry.
    Clear,
    /// Reprint the list whenever another running instance changes it.
    Watch {
        /// Poll interval in milliseconds.
        #[arg(long, default_value_t = 500, value_name = "MS")]
        interval_ms: u64,
    },
}

/// Default database location: `<user data dir>/padnotes/padnotes.db`.
fn default_data_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("padnotes")
        .join("padnotes.db")
}

fn print_notes(notes: &[Note], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(notes)?);
        return Ok(());
    }
    if notes.is_empty() {
        println!("(no notes)");
        return Ok(());
    }
    for note in notes {
        println!("{}  {}", note.id, note.name);
        println!("    {}", note.text);
    }
    Ok(())
}

fn print_note(note: &Note, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
    } else {
        println!("{}  {}", note.id, note.name);
        println!("    {}", note.text);
    }
    Ok(())
}

fn run_command(
    store: &mut NoteStore<SqliteGateway>,
    command: Command,
    json: bool,
) -> Result<()> {
    match command {
        Command::Add { name, text } => {
            let created = store.create(&name, &text)?;
            print_note(&created, json)
        }
        Command::Edit { id, name, text } => {
            let updated = store.edit(&id, &name, &text)?;
            print_note(&updated, json)
        }
        Command::Delete { id } => {
            store.delete(&id)?;
            if !json {
                println!("deleted {id}");
            }
            Ok(())
        }
        Command::List => print_notes(store.notes(), json),
        Command::Find { query } => print_notes(&store.find(&query), json),
        Command::Clear => {
            store.clear_all()?;
            if !json {
                println!("cleared");
            }
            Ok(())
        }
        Command::Watch { interval_ms } => {
            print_notes(store.notes(), json)?;
            loop {
                thread::sleep(Duration::from_millis(interval_ms));
                if store.sync_external_changes()? {
                    print_notes(store.notes(), json)?;
                }
            }
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let path = cli.data.unwrap_or_else(default_data_path);
    debug!("using database at {}", path.display());

    let gateway = SqliteGateway::open(&path, DEFAULT_DATASET_KEY)?;
    let mut store = NoteStore::new(gateway)?;
    run_command(&mut store, cli.command, cli.json)
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e.user_message());
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_at(dir: &TempDir) -> NoteStore<SqliteGateway> {
        let gateway =
            SqliteGateway::open(dir.path().join("padnotes.db"), DEFAULT_DATASET_KEY).unwrap();
        NoteStore::new(gateway).unwrap()
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from(["padnotes", "add", "Groceries", "milk, eggs"]).unwrap();
        assert!(!cli.json);
        match cli.command {
            Command::Add { name, text } => {
                assert_eq!(name, "Groceries");
                assert_eq!(text, "milk, eggs");
            }
            other => panic!("parsed wrong command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["padnotes", "list", "--json", "--data", "/tmp/x.db"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/x.db")));
    }

    #[test]
    fn test_parse_watch_interval_default() {
        let cli = Cli::try_parse_from(["padnotes", "watch"]).unwrap();
        match cli.command {
            Command::Watch { interval_ms } => assert_eq!(interval_ms, 500),
            other => panic!("parsed wrong command: {other:?}"),
        }
    }

    #[test]
    fn test_add_and_delete_against_a_real_database() {
        let dir = TempDir::new().unwrap();
        let mut store = store_at(&dir);

        run_command(
            &mut store,
            Command::Add {
                name: "Groceries".to_string(),
                text: "milk, eggs".to_string(),
            },
            false,
        )
        .unwrap();
        assert_eq!(store.len(), 1);

        let id = store.notes()[0].id.clone();
        run_command(&mut store, Command::Delete { id }, false).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_unknown_id_surfaces_not_found() {
        let dir = TempDir::new().unwrap();
        let mut store = store_at(&dir);

        let result = run_command(
            &mut store,
            Command::Delete {
                id: "nosuchnote".to_string(),
            },
            false,
        );
        assert!(result.is_err());
    }
}
