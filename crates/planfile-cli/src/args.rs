use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "planfile",
    version,
    about = "Check, stamp and translate ground-station JSON files"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate a file's header envelope against a type and version range
    Check(CheckArgs),
    /// Write the header envelope onto a file
    Stamp(StampArgs),
    /// Substitute catalog translations into a file's designated keys
    Translate(TranslateArgs),
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// File to validate
    pub file: PathBuf,

    /// Expected fileType value
    #[arg(long)]
    pub file_type: String,

    /// Oldest supported schema version
    #[arg(long, default_value_t = 1)]
    pub min_version: u32,

    /// Newest supported schema version
    #[arg(long)]
    pub max_version: u32,

    /// Require the groundStation marker (externally distributed files)
    #[arg(long)]
    pub external: bool,
}

#[derive(Parser, Debug)]
pub struct StampArgs {
    /// File to stamp
    pub file: PathBuf,

    /// fileType value to write
    #[arg(long)]
    pub file_type: String,

    /// version value to write
    #[arg(long)]
    pub set_version: u32,

    /// Write here instead of back to FILE
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct TranslateArgs {
    /// File to translate
    pub file: PathBuf,

    /// Translation catalog ({ context: { source: translation } })
    #[arg(long)]
    pub catalog: PathBuf,

    /// Translation context; defaults to the file name
    #[arg(long)]
    pub context: Option<String>,

    /// Write here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}
