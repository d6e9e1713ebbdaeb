use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "idscope")]
#[command(about = "Make element ids unique while keeping references intact", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding config.json
    #[arg(long, global = true, default_value = ".idscope")]
    pub config_dir: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrite the ids of a JSON element tree and print it
    #[command(alias = "s")]
    Scope {
        /// JSON file to read ("-" for stdin)
        #[arg(default_value = "-")]
        input: String,

        /// Rewrite the root element itself instead of its descendants
        #[arg(long)]
        own: bool,

        /// Also scan this attribute (repeatable)
        #[arg(short, long = "attr")]
        attrs: Vec<String>,

        /// Scan only this attribute (repeatable)
        #[arg(long = "only")]
        only: Vec<String>,

        /// Prefix for generated ids
        #[arg(short, long)]
        prefix: Option<String>,

        /// Id mapping file to reuse and update across runs
        #[arg(short, long)]
        map: Option<PathBuf>,

        /// Print rewrite events to stderr
        #[arg(long)]
        events: bool,
    },

    /// List the attributes that would be scanned
    Attrs {
        /// Also scan this attribute (repeatable)
        #[arg(short, long = "attr")]
        attrs: Vec<String>,

        /// Scan only this attribute (repeatable)
        #[arg(long = "only")]
        only: Vec<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., prefix)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
