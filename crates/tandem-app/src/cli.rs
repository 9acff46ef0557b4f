use std::path::PathBuf;

use clap::Parser;

/// Tandem: terminal sessions and web content side by side, grouped into
/// projects.
#[derive(Parser, Debug)]
#[command(name = "tandem", version, about)]
pub struct Args {
    /// Working directory new sessions start in.
    #[arg(short = 'd', long)]
    pub directory: Option<PathBuf>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter override, e.g. `debug` or `tandem_pty=trace`.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Open a project with this name. Repeat for more projects.
    #[arg(short = 'p', long = "project")]
    pub projects: Vec<String>,

    /// Address to load in the first project's content tab.
    #[arg(long)]
    pub url: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
