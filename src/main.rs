use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use hotlogic::config::Config;
use hotlogic::fetch::HttpFetch;
use hotlogic::home;
use hotlogic::logging::init_tracing;
use hotlogic::{get_injectors, Dependencies, LogicMiddleware, Store};

#[derive(Debug, Parser)]
#[command(name = "hotlogic", version, about = "Browse a user's repositories")]
struct Cli {
    /// Config file (default: ~/.config/hotlogic/config.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the repositories of a user, most recently updated first.
    Repos {
        /// Username; falls back to `bootstrap.username` from the config.
        username: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    init_tracing(cli.log_level.as_deref().unwrap_or(&config.logging.level));

    match cli.command {
        Command::Repos { username } => {
            let username = username.unwrap_or_else(|| config.bootstrap.username.clone());
            list_repos(&config, &username).await
        }
    }
}

async fn list_repos(config: &Config, username: &str) -> anyhow::Result<ExitCode> {
    if username.trim().is_empty() {
        anyhow::bail!("no username given and bootstrap.username is not set");
    }

    let fetch = HttpFetch::new(&config.service).context("failed to set up HTTP fetch")?;
    let middleware = LogicMiddleware::new(Vec::new(), Dependencies::new(Arc::new(fetch)))?;
    let store = Store::builder().logic(middleware.clone()).build();

    let injectors = get_injectors(&store)?;
    home::inject_reducers(&injectors)?;
    store.dispatch(home::change_username(username));
    // Installing the logic runs its bootstrap, which starts the first load.
    home::install(&injectors, &config.service.base_url)?;

    middleware.when_complete().await;

    let state = store.get_state();
    if let Some(error) = home::select_error(&state) {
        eprintln!("Failed to load repositories for {username}: {error}");
        return Ok(ExitCode::FAILURE);
    }

    let repos = home::select_repos(&state).cloned().unwrap_or_default();
    for repo in &repos {
        let name = repo["name"].as_str().unwrap_or("<unnamed>");
        let stars = repo["stargazers_count"].as_u64().unwrap_or(0);
        println!("{name}\t★ {stars}");
    }
    tracing::info!(username, count = repos.len(), "Repositories listed");
    Ok(ExitCode::SUCCESS)
}
