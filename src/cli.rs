use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "community tier ranking board")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Render the board once
    List {
        /// Case-insensitive match against name, tier, points, or rank
        #[arg(short, long)]
        search: Option<String>,
        /// Show only records with exactly this tier
        #[arg(short, long)]
        tier: Option<String>,
        /// Sort column: rank, name, tier, or points (default rank)
        #[arg(long)]
        sort_by: Option<String>,
        /// asc or desc (default asc)
        #[arg(long)]
        order: Option<String>,
    },
    /// Live view, re-rendered whenever the board changes
    Watch {
        #[arg(short, long)]
        search: Option<String>,
        #[arg(short, long)]
        tier: Option<String>,
        #[arg(long)]
        sort_by: Option<String>,
        #[arg(long)]
        order: Option<String>,
        /// Game server polled by the status widget
        #[arg(long)]
        host: Option<String>,
    },
    /// Start the read-only viewer API
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Print the tier → points mapping
    Mapping,
    /// Add a player to the board
    Add {
        name: String,
        tier: String,
        /// Point value; defaults to the tier's mapped value
        #[arg(long)]
        points: Option<i64>,
        /// Display rank; defaults to the end of the board
        #[arg(long)]
        rank: Option<i64>,
    },
    /// Edit the player at a canonical-list position
    Edit {
        index: usize,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        tier: Option<String>,
        #[arg(long)]
        points: Option<i64>,
        #[arg(long)]
        rank: Option<i64>,
    },
    /// Delete the player at a canonical-list position
    Delete {
        index: usize,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Remove every player from the board
    Clear {
        #[arg(long)]
        yes: bool,
    },
    /// Set one tier's point value in the mapping
    SetTier { label: String, points: i64 },
    /// Re-derive player points from the tier mapping
    ApplyMapping {
        /// Only fill records whose points are currently 0
        #[arg(long)]
        empty_only: bool,
        #[arg(long)]
        yes: bool,
    },
    /// Replace the board with a .json or CSV file
    Import { path: PathBuf },
    /// Export the board as pretty-printed JSON
    Export {
        /// Output path (optional, defaults to players.json)
        path: Option<PathBuf>,
    },
    /// Poll the game server status once
    Status { host: Option<String> },
    /// Generate shell completions
    Completions { shell: Shell },
}

/// Gate for destructive actions. `--yes` stands in for the confirmation
/// dialog; otherwise the answer comes from stdin and anything but y/yes
/// leaves state untouched.
pub fn confirm(message: &str, assume_yes: bool) -> io::Result<bool> {
    if assume_yes {
        return Ok(true);
    }

    print!("{message} [y/N] ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}
