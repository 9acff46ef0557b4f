mod cli;
mod command;
mod driver;

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::mpsc;

use tandem_config::TandemConfig;
use tandem_input::KeybindRegistry;
use tandem_pty::{PtySupervisor, ShellCommand};
use tandem_surface::HeadlessFactory;
use tandem_workspace::{InputDispatcher, Workspace, WorkspaceSettings};
use tracing_subscriber::EnvFilter;

use crate::driver::Driver;

const DEFAULT_DIRECTIVE: &str = "tandem=info";

fn load_config(args: &cli::Args) -> (TandemConfig, Option<String>) {
    let loaded = match &args.config {
        Some(path) => tandem_config::load_config_from(path),
        None => tandem_config::load_config(),
    };
    match loaded {
        Ok(config) => (config, None),
        Err(e) => (TandemConfig::default(), Some(e.to_string())),
    }
}

fn init_logging(args: &cli::Args, config: &TandemConfig) {
    let directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| format!("tandem={}", config.logging.level.as_str()));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| DEFAULT_DIRECTIVE.parse().unwrap()),
            ),
        )
        .init();
}

/// `--directory`, else the configured directory, else the process cwd.
fn working_directory(args: &cli::Args, config: &TandemConfig) -> PathBuf {
    args.directory
        .clone()
        .or_else(|| config.shell.working_directory.as_ref().map(PathBuf::from))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn main() {
    let args = cli::parse();
    let (config, config_error) = load_config(&args);
    init_logging(&args, &config);

    tracing::info!("Tandem v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &args.config {
        tracing::info!(path = %path.display(), "using config override");
    }
    if let Some(e) = config_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    let registry = KeybindRegistry::from_config(&config.keybinds);
    tracing::info!(bindings = registry.len(), "keybind registry loaded");

    let cwd = working_directory(&args, &config);
    let settings = WorkspaceSettings::from_config(&config, cwd);
    let host = PtySupervisor::new(ShellCommand::from_config(&config.shell));
    let mut workspace = Workspace::new(settings, host, HeadlessFactory);

    let mut names = args.projects.iter();
    if let Some(first) = names.next() {
        workspace.rename_project(workspace.active_project_id(), first);
    }
    let first_project = workspace.active_project_id();
    for name in names {
        workspace.create_project(Some(name));
    }
    if let Some(url) = &args.url {
        workspace.navigate(first_project, url);
    }
    workspace.switch_project(first_project);

    let (tx, rx) = mpsc::channel();
    let reader = std::thread::Builder::new()
        .name("stdin".into())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
    if let Err(e) = reader {
        tracing::error!("Failed to start input reader: {e}");
        workspace.shutdown();
        return;
    }

    let input = InputDispatcher::new(registry);
    let driver = Driver::new(workspace, input, io::stdout());
    tracing::info!("Entering driver loop (type 'help' for commands)");
    if let Err(e) = driver.run(rx) {
        tracing::error!("Driver loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
