use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

#[derive(Parser, Debug)]
#[command(name = "taskdeck")]
#[command(version)]
#[command(about = "Inspect kanban boards and replay drag-and-drop gestures against them")]
#[command(long_about = "
taskdeck loads a kanban board from a YAML or JSON seed (or a built-in demo board),
lays it out on a simple grid and lets you drive it the way a UI would:

  taskdeck show                             # Print the demo board
  taskdeck --format json show --seed b.yaml # Board as JSON
  taskdeck replay drag.yaml                 # Replay press/move/release gestures
  taskdeck apply ops.json --actor ada       # Run a batch of JSON operations

Configuration is read from taskdeck.toml, taskdeck.yaml or taskdeck.json in the
current directory (or --config FILE), then TASKDECK_* environment variables, e.g.
TASKDECK_DRAG__ACTIVATION_DISTANCE=4.
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Read configuration from this file instead of discovering one
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the board, columns left to right with their tasks in order
    Show {
        /// Board seed file (YAML or JSON); the demo board when omitted
        #[arg(long, value_name = "FILE")]
        seed: Option<PathBuf>,
    },
    /// Replay a gesture script against the laid-out board
    #[command(long_about = "
Replay a gesture script. Each step is one of:

  - press: <task title or id>      # pointer down on the card's center
  - move: <task or column title>   # pointer to a card, or to the free slot under a column
  - move: { x: 300, y: 120 }       # pointer to raw coordinates
  - drop: <task or column title>   # move there and release
  - release                        # pointer up where it is
  - cancel                         # abandon the gesture

Every step's outcome is printed, followed by the final board.
")]
    Replay {
        /// Gesture script (YAML or JSON)
        script: PathBuf,

        /// Board seed file (YAML or JSON); the demo board when omitted
        #[arg(long, value_name = "FILE")]
        seed: Option<PathBuf>,
    },
    /// Run a JSON batch of board operations
    Apply {
        /// JSON file with one operation object or an array of them; `-` reads stdin
        ops: PathBuf,

        /// Board seed file (YAML or JSON); the demo board when omitted
        #[arg(long, value_name = "FILE")]
        seed: Option<PathBuf>,

        /// Actor recorded on every logged operation
        #[arg(long)]
        actor: Option<String>,
    },
}
