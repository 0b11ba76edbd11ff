//! Executes operator commands against the allocation actor.

use card_room::{
    allocation::{
        AllocationError, AllocationErrorKind, AllocationHandle, AllocationResult, BoundsViolation,
        SeatAssignment, SeatEvent, SeatRelease, TableSummary,
    },
    table::{Table, TableId, TablePatch, TableStatus},
    waitlist::{EntryMatcher, NewWaitlistEntry, WaitlistEntry},
};
use serde::Serialize;

use crate::commands::{Command, USAGE};

/// Result of one command, printable as text or JSON
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Tables { tables: Vec<TableSummary> },
    Table { table: TableSummary },
    Waitlist { entries: Vec<WaitlistEntry> },
    Assigned { assignment: SeatAssignment },
    Released { release: SeatRelease },
    Joined { entry: WaitlistEntry },
    Left { entry: WaitlistEntry },
    StatusChanged {
        table_id: TableId,
        from: TableStatus,
        to: TableStatus,
    },
    TableUpdated { table: Table },
    Audit { violations: Vec<BoundsViolation> },
    History { events: Vec<SeatEvent> },
    /// Engine refused the request; nothing changed
    Rejected {
        kind: AllocationErrorKind,
        message: String,
    },
    Help { usage: String },
}

impl From<AllocationError> for Outcome {
    fn from(err: AllocationError) -> Self {
        Outcome::Rejected {
            kind: err.kind(),
            message: err.client_message(),
        }
    }
}

/// Run one command
///
/// # Arguments
///
/// * `handle` - Allocation actor handle
/// * `command` - Parsed command; `Quit` is handled by the caller
///
/// # Returns
///
/// * `AllocationResult<Outcome>` - Engine rejections come back as
///   `Err` so the caller can tell them apart from a stopped actor
pub async fn execute(handle: &AllocationHandle, command: Command) -> AllocationResult<Outcome> {
    let outcome = match command {
        Command::Tables => Outcome::Tables {
            tables: handle.tables().await?,
        },

        Command::Table(table_id) => match handle.table(table_id).await? {
            Some(table) => Outcome::Table { table },
            None => return Err(AllocationError::TableNotFound(table_id)),
        },

        Command::Waitlist(game_type) => Outcome::Waitlist {
            entries: handle.waitlist(game_type).await?,
        },

        Command::Assign {
            player_id,
            player_name,
            table_id,
            seat_number,
        } => Outcome::Assigned {
            assignment: handle
                .assign_seat(player_id.into(), player_name, table_id, seat_number)
                .await?,
        },

        Command::Prefer(entry_id) => Outcome::Assigned {
            assignment: handle.assign_preferred_seat(entry_id).await?,
        },

        Command::Release {
            table_id,
            seat_number,
        } => Outcome::Released {
            release: handle.release_seat(table_id, seat_number).await?,
        },

        Command::Join {
            player_id,
            player_name,
            game_type,
            table_id,
            seat_number,
        } => {
            let mut request = NewWaitlistEntry::new(player_id, player_name, game_type);
            match (table_id, seat_number) {
                (Some(table_id), Some(seat_number)) => {
                    request = request.prefer_seat(table_id, seat_number)
                }
                (Some(table_id), None) => request = request.prefer_table(table_id),
                _ => {}
            }
            Outcome::Joined {
                entry: handle.join_waitlist(request).await?,
            }
        }

        Command::Leave(entry_id) => Outcome::Left {
            entry: handle.leave_waitlist(EntryMatcher::Id(entry_id)).await?,
        },

        Command::Status { table_id, status } => {
            let from = handle.set_table_status(table_id, status).await?;
            Outcome::StatusChanged {
                table_id,
                from,
                to: status,
            }
        }

        Command::Capacity {
            table_id,
            max_players,
        } => Outcome::TableUpdated {
            table: handle
                .update_table(table_id, TablePatch::capacity(max_players))
                .await?,
        },

        Command::Audit => Outcome::Audit {
            violations: handle.audit().await?,
        },

        Command::History => Outcome::History {
            events: handle.history().await?,
        },

        Command::Help | Command::Quit => Outcome::Help {
            usage: USAGE.to_string(),
        },
    };

    Ok(outcome)
}

/// Render an outcome for the operator
pub fn render(outcome: &Outcome, json: bool) -> String {
    if json {
        return serde_json::to_string(outcome)
            .unwrap_or_else(|e| format!("{{\"outcome\":\"error\",\"message\":\"{}\"}}", e));
    }

    match outcome {
        Outcome::Tables { tables } if tables.is_empty() => "No tables".to_string(),
        Outcome::Tables { tables } => tables
            .iter()
            .map(render_table)
            .collect::<Vec<_>>()
            .join("\n"),
        Outcome::Table { table } => render_table(table),

        Outcome::Waitlist { entries } if entries.is_empty() => "Waitlist is empty".to_string(),
        Outcome::Waitlist { entries } => entries
            .iter()
            .map(render_entry)
            .collect::<Vec<_>>()
            .join("\n"),

        Outcome::Assigned { assignment } => format!(
            "Seated {} ({}) at table {} seat {}",
            assignment.player_name,
            assignment.player_id,
            assignment.table_id,
            assignment.seat_number
        ),
        Outcome::Released { release } if release.was_occupied => format!(
            "Released table {} seat {}",
            release.table_id, release.seat_number
        ),
        Outcome::Released { release } => format!(
            "Table {} seat {} was already free",
            release.table_id, release.seat_number
        ),

        Outcome::Joined { entry } => format!("Added to waitlist: {}", render_entry(entry)),
        Outcome::Left { entry } => format!(
            "Removed {} ({}) from the waitlist",
            entry.player_name, entry.player_id
        ),

        Outcome::StatusChanged { table_id, from, to } => {
            format!("Table {} is now {} (was {})", table_id, to, from)
        }
        Outcome::TableUpdated { table } => format!(
            "Table {} now seats {} player(s)",
            table.id, table.max_players
        ),

        Outcome::Audit { violations } if violations.is_empty() => {
            "All occupied seats fit their tables".to_string()
        }
        Outcome::Audit { violations } => violations
            .iter()
            .map(|violation| format!("! {}", violation))
            .collect::<Vec<_>>()
            .join("\n"),

        Outcome::History { events } if events.is_empty() => "No seat changes yet".to_string(),
        Outcome::History { events } => events
            .iter()
            .map(render_event)
            .collect::<Vec<_>>()
            .join("\n"),

        Outcome::Rejected { message, .. } => format!("Error: {}", message),
        Outcome::Help { usage } => usage.trim_end().to_string(),
    }
}

fn render_table(summary: &TableSummary) -> String {
    let table = &summary.table;
    format!(
        "#{} {} | {} {} | {} | {}/{} seated | taken {:?} open {:?} | {} waiting",
        table.id,
        table.name,
        table.game_type,
        table.stakes,
        table.status,
        summary.occupied_seats.len(),
        table.max_players,
        summary.occupied_seats,
        summary.open_seats,
        summary.waitlist_count
    )
}

fn render_entry(entry: &WaitlistEntry) -> String {
    let preference = match (entry.preferred_table, entry.preferred_seat) {
        (Some(table), Some(seat)) => format!("table {} seat {}", table, seat),
        (Some(table), None) => format!("table {}", table),
        _ => "any table".to_string(),
    };
    format!(
        "{}. [entry {}] {} ({}) | {} | {}",
        entry.position, entry.id, entry.player_name, entry.player_id, entry.game_type, preference
    )
}

fn render_event(event: &SeatEvent) -> String {
    match event {
        SeatEvent::Assigned(assignment) => format!(
            "{} assigned {} to table {} seat {} ({})",
            assignment.assigned_at.format("%H:%M:%S"),
            assignment.player_id,
            assignment.table_id,
            assignment.seat_number,
            assignment.source
        ),
        SeatEvent::Released(release) => format!(
            "{} released table {} seat {}",
            release.released_at.format("%H:%M:%S"),
            release.table_id,
            release.seat_number
        ),
    }
}
