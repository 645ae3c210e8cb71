use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mpick",
    version,
    about = "Terminal picker for merge conflicts and itemized questions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (defaults to ~/.config/mpick/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Color theme, overrides the config file
    #[arg(long, global = true)]
    pub theme: Option<String>,

    /// Write a debug log to this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Never open the interactive UI; report a cancelled result instead
    #[arg(long, global = true)]
    pub no_tui: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Choose a resolution for one conflict unit (JSON) and print the outcome
    Resolve(InputArgs),

    /// Answer each item in turn and print the assembled document
    Walk {
        #[command(flatten)]
        input: InputArgs,

        /// Max chars of each item's text quoted in the document
        #[arg(long)]
        preview_chars: Option<usize>,

        /// Print only the document (nothing when cancelled)
        #[arg(long)]
        raw: bool,
    },

    /// Print the numbered items found in a markdown document as JSON
    Extract(InputArgs),
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Input file, or `-` for stdin
    pub input: PathBuf,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
