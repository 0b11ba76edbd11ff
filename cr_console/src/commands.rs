use card_room::{
    seating::SeatNumber,
    table::{TableId, TableStatus},
    waitlist::EntryId,
};
use std::fmt;

/// Operator command read from one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every table with its seats.
    Tables,
    /// Show one table.
    Table(TableId),
    /// Show the waitlist, optionally for one game type.
    Waitlist(Option<String>),
    /// Seat a player at a chosen seat.
    Assign {
        player_id: String,
        player_name: String,
        table_id: TableId,
        seat_number: SeatNumber,
    },
    /// Seat a waitlisted player at their preferred seat.
    Prefer(EntryId),
    /// Free a seat.
    Release {
        table_id: TableId,
        seat_number: SeatNumber,
    },
    /// Add a player to the waitlist.
    Join {
        player_id: String,
        player_name: String,
        game_type: String,
        table_id: Option<TableId>,
        seat_number: Option<SeatNumber>,
    },
    /// Remove a waitlist entry.
    Leave(EntryId),
    /// Change a table's status.
    Status {
        table_id: TableId,
        status: TableStatus,
    },
    /// Change a table's capacity.
    Capacity {
        table_id: TableId,
        max_players: usize,
    },
    /// Report seats that do not fit their table.
    Audit,
    /// Show assignments and releases.
    History,
    Help,
    Quit,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Argument could not be read as a number.
    InvalidNumber { name: &'static str, value: String },
    /// Unknown table status.
    InvalidStatus(String),
    /// Command is missing arguments.
    Usage(&'static str),
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber { name, value } => {
                write!(f, "Invalid {} '{}'. Must be a positive number", name, value)
            }
            Self::InvalidStatus(value) => write!(
                f,
                "Invalid status '{}'. Use 'active', 'paused' or 'ended'",
                value
            ),
            Self::Usage(usage) => write!(f, "Usage: {}", usage),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{}'. Type 'help' to see available commands",
                cmd
            ),
        }
    }
}

impl std::error::Error for ParseError {}

pub const USAGE: &str = "\
COMMANDS:
  tables                                          List tables with occupied and open seats
  table    TABLE                                  Show one table
  waitlist [GAME_TYPE]                            Show the waitlist, optionally for one game
  assign   PLAYER_ID NAME TABLE SEAT              Seat a player at a chosen seat
  prefer   ENTRY_ID                               Seat a waitlisted player at their preferred seat
  release  TABLE SEAT                             Free a seat
  join     PLAYER_ID NAME GAME_TYPE [TABLE [SEAT]] Add a player to the waitlist
  leave    ENTRY_ID                               Remove a waitlist entry
  status   TABLE active|paused|ended              Change a table's status
  capacity TABLE MAX_PLAYERS                      Change a table's seat count
  audit                                           Report seats outside their table
  history                                         Show assignments and releases
  help                                            Show this message
  quit                                            Exit

Use '_' for spaces in names and game types (e.g. Texas_Hold'em).
";

/// Parse a command line into a Command.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(parse_command("prefer 3"), Ok(Command::Prefer(3)));
/// assert_eq!(parse_command("tables"), Ok(Command::Tables));
/// ```
pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let parts: Vec<&str> = input.split_ascii_whitespace().collect();

    match parts.as_slice() {
        ["tables"] => Ok(Command::Tables),
        ["audit"] => Ok(Command::Audit),
        ["history"] => Ok(Command::History),
        ["help"] | ["?"] => Ok(Command::Help),
        ["quit"] | ["exit"] => Ok(Command::Quit),

        ["table", table] => Ok(Command::Table(parse_number("table", table)?)),
        ["table", ..] => Err(ParseError::Usage("table TABLE")),

        ["waitlist"] => Ok(Command::Waitlist(None)),
        ["waitlist", game_type] => Ok(Command::Waitlist(Some(spaced(game_type)))),
        ["waitlist", ..] => Err(ParseError::Usage("waitlist [GAME_TYPE]")),

        ["assign", player_id, player_name, table, seat] => Ok(Command::Assign {
            player_id: player_id.to_string(),
            player_name: spaced(player_name),
            table_id: parse_number("table", table)?,
            seat_number: parse_number("seat", seat)?,
        }),
        ["assign", ..] => Err(ParseError::Usage("assign PLAYER_ID NAME TABLE SEAT")),

        ["prefer", entry] => Ok(Command::Prefer(parse_number("entry", entry)?)),
        ["prefer", ..] => Err(ParseError::Usage("prefer ENTRY_ID")),

        ["release", table, seat] => Ok(Command::Release {
            table_id: parse_number("table", table)?,
            seat_number: parse_number("seat", seat)?,
        }),
        ["release", ..] => Err(ParseError::Usage("release TABLE SEAT")),

        ["join", player_id, player_name, game_type, rest @ ..] if rest.len() <= 2 => {
            let table_id = rest
                .first()
                .map(|table| parse_number("table", table))
                .transpose()?;
            let seat_number = rest
                .get(1)
                .map(|seat| parse_number("seat", seat))
                .transpose()?;

            Ok(Command::Join {
                player_id: player_id.to_string(),
                player_name: spaced(player_name),
                game_type: spaced(game_type),
                table_id,
                seat_number,
            })
        }
        ["join", ..] => Err(ParseError::Usage(
            "join PLAYER_ID NAME GAME_TYPE [TABLE [SEAT]]",
        )),

        ["leave", entry] => Ok(Command::Leave(parse_number("entry", entry)?)),
        ["leave", ..] => Err(ParseError::Usage("leave ENTRY_ID")),

        ["status", table, status] => Ok(Command::Status {
            table_id: parse_number("table", table)?,
            status: status
                .parse()
                .map_err(|_| ParseError::InvalidStatus(status.to_string()))?,
        }),
        ["status", ..] => Err(ParseError::Usage("status TABLE active|paused|ended")),

        ["capacity", table, max_players] => Ok(Command::Capacity {
            table_id: parse_number("table", table)?,
            max_players: parse_number("capacity", max_players)?,
        }),
        ["capacity", ..] => Err(ParseError::Usage("capacity TABLE MAX_PLAYERS")),

        _ => Err(ParseError::UnrecognizedCommand(input.trim().to_string())),
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        name,
        value: value.to_string(),
    })
}

fn spaced(token: &str) -> String {
    token.replace('_', " ")
}
