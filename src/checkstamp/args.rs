use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "checkstamp", version)]
#[command(about = "Stamp unchecked checkboxes with the date they were created", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Debug logging on stderr (same as the debug-logging setting)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add missing creation dates to one file
    #[command(alias = "f")]
    File {
        /// Markdown file to stamp
        path: PathBuf,
    },

    /// Add missing creation dates to every note under a directory
    #[command(alias = "v")]
    Vault {
        /// Root of the vault (defaults to the current directory)
        root: Option<PathBuf>,

        /// Extensions to include (e.g. md txt); defaults to md
        #[arg(short, long = "ext", value_name = "EXT", num_args = 1..)]
        extensions: Vec<String>,
    },

    /// Stamp text from stdin and write the result to stdout
    Text {
        /// Date to stamp with (YYYY-MM-DD); defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Editor hook: stamp the task just finished above the cursor
    Live {
        /// File being edited
        path: PathBuf,

        /// Cursor line (0-based) after the edit
        #[arg(short, long)]
        line: usize,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (real-time, date-source, debug-logging)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
