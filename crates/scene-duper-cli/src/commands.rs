use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "scene-duper")]
#[command(about = "Find duplicate and incomplete scenes in a catalog, then clean them up", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check the catalog for duplicate files, duplicate titles and scenes without files
    Check {
        /// Write findings as CSV; a timestamped file name is used when PATH is omitted
        #[arg(long, value_name = "PATH", num_args = 0..=1)]
        export: Option<Option<PathBuf>>,
    },
    /// Check the catalog, then resolve findings interactively
    Review,
    /// List plugin tasks grouped by plugin
    Tasks,
    /// Run a plugin's task
    RunTask {
        /// Plugin id as shown by `tasks`
        plugin_id: String,
    },
    /// Print configuration values
    PrintConfig,
}
