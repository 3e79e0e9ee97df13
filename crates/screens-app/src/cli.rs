use clap::Parser;
use std::path::PathBuf;

/// screens — desktop shell for the Screen & Window Repair page.
#[derive(Parser, Debug)]
#[command(name = "screens", version, about)]
pub struct Args {
    /// Directory holding index.html and its assets (default: current directory).
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Log level override (e.g. "screens=debug").
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
