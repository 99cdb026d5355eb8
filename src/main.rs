use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use bfs_animator::config::{Limits, ServerConfig};
use bfs_animator::request::{MazeRequest, TspRequest};
use bfs_animator::server;
use bfs_animator::stream::write_events;

/// Streams breadth-first search progress as newline-delimited JSON.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server.
    Serve(ServeArgs),
    /// Run one request file and print its event stream to stdout.
    Run {
        #[arg(value_enum)]
        kind: Kind,
        /// JSON request body, as it would be posted to the server.
        #[arg(value_name = "FILE")]
        request: PathBuf,
        #[command(flatten)]
        limits: LimitArgs,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum Kind {
    Maze,
    Tsp,
}

#[derive(clap::Args, Debug)]
struct ServeArgs {
    #[arg(long, env = "BFS_ANIMATOR_HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(long, env = "BFS_ANIMATOR_PORT", default_value_t = 8000)]
    port: u16,

    /// Pause before each streamed event (e.g. "50ms").
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    event_delay: Option<Duration>,

    #[command(flatten)]
    limits: LimitArgs,
}

#[derive(clap::Args, Debug)]
struct LimitArgs {
    /// Largest accepted maze, in cells.
    #[arg(long, default_value_t = Limits::default().max_grid_cells)]
    max_grid_cells: usize,

    /// Largest accepted TSP instance, in cities.
    #[arg(long, default_value_t = Limits::default().max_cities)]
    max_cities: usize,
}

impl From<&LimitArgs> for Limits {
    fn from(args: &LimitArgs) -> Self {
        Limits {
            max_grid_cells: args.max_grid_cells,
            max_cities: args.max_cities,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve(args) => serve(args),
        Command::Run {
            kind,
            request,
            limits,
        } => run_file(kind, &request, &Limits::from(&limits)),
    }
}

fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = ServerConfig {
        host: args.host,
        port: args.port,
        event_delay: args.event_delay.unwrap_or(Duration::ZERO),
        limits: Limits::from(&args.limits),
    };

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(config.bind_addr())
            .await
            .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
        server::serve(listener, &config)
            .await
            .context("server stopped")
    })
}

fn run_file(kind: Kind, path: &Path, limits: &Limits) -> anyhow::Result<()> {
    let body = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut stdout = io::stdout().lock();

    let written = match kind {
        Kind::Maze => {
            let request: MazeRequest =
                serde_json::from_str(&body).context("invalid maze request")?;
            write_events(&mut stdout, request.into_search(limits)?)?
        }
        Kind::Tsp => {
            let request: TspRequest = serde_json::from_str(&body).context("invalid tsp request")?;
            write_events(&mut stdout, request.into_search(limits)?)?
        }
    };

    tracing::debug!(events = written, "stream written");
    Ok(())
}
