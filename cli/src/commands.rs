use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "mrcli")]
#[command(about = "A multi-router command-line interface.")]
pub struct CommandLine {
    /// Newline-delimited device inventory file (name[,platform] per line)
    #[arg(short, long)]
    pub inventory: PathBuf,

    /// Select targets by regular expression (full-name match)
    #[arg(short, long)]
    pub targets: Option<String>,

    /// Execute a single command and exit instead of starting the shell
    #[arg(short, long)]
    pub cmd: Option<String>,

    /// Output mode (raw, structured)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Per-target timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Program used to reach each device (invoked as: PROG DEVICE COMMAND)
    #[arg(long, default_value = "ssh")]
    pub remote_shell: String,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
