//! Card-room operator console.
//!
//! Reads one command per line from stdin and runs it against a single
//! allocation actor. Seat conflicts and other rejections are printed and the
//! session continues.

mod commands;
mod config;
mod logging;
mod session;

use anyhow::Error;
use card_room::{
    allocation::{AllocationActor, AllocationError, TableAllocationStore},
    seed,
};
use ctrlc::set_handler;
use pico_args::Arguments;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::{
    commands::{Command, parse_command},
    config::ConsoleConfig,
    session::Outcome,
};

const HELP: &str = "\
Run a card-room seat allocation console

USAGE:
  cr_console [OPTIONS]

OPTIONS:
  --max-table-size N       Largest table capacity  [default: env CARD_ROOM_MAX_TABLE_SIZE or 23]

FLAGS:
  --json                   Print outcomes as JSON
  --empty                  Start without the demo tables and waitlist
  -h, --help               Print help information

ENVIRONMENT:
  CARD_ROOM_MAX_TABLE_SIZE Largest table capacity
  CARD_ROOM_MAX_WAITLIST   Waitlist capacity
  CARD_ROOM_INBOX_CAPACITY Allocation actor inbox depth
  RUST_LOG                 Log filter (logs go to stderr)

Type 'help' at the prompt for the command list.
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let json_output = pargs.contains("--json");
    let empty = pargs.contains("--empty");
    let max_table_size: Option<usize> = pargs.opt_value_from_str("--max-table-size")?;

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        anyhow::bail!("Unexpected arguments: {:?}", remaining);
    }

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    logging::init();

    let config = ConsoleConfig::from_env(max_table_size, json_output, empty)?;

    let store = if config.load_seed {
        seed::demo_store(config.allocation.clone())
            .map_err(|e| anyhow::anyhow!("Failed to load demo data: {}", e))?
    } else {
        TableAllocationStore::new(config.allocation.clone())
    };

    info!(
        "Console ready with {} table(s) and {} waiting player(s)",
        store.tables().count(),
        store.waitlist().len()
    );

    let (handle, task) = AllocationActor::spawn(store);

    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if stdin.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let Ok(line) = std::str::from_utf8(&buf) else {
            eprintln!("Ignoring input line that is not valid UTF-8");
            continue;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = match parse_command(line) {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        let outcome = match session::execute(&handle, command).await {
            Ok(outcome) => outcome,
            Err(AllocationError::ActorClosed) => {
                anyhow::bail!("Allocation actor stopped unexpectedly");
            }
            Err(e) => Outcome::from(e),
        };

        logging::log_command(line, &outcome);
        println!("{}", session::render(&outcome, config.json_output));
    }

    handle
        .shutdown()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to stop allocation actor: {}", e))?;
    let store = task.await?;

    info!(
        "Session ended after {} seat change(s)",
        store.history().len()
    );

    Ok(())
}
