use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use reach_server::bench::{BenchConfig, Strategy, run_bench};
use reach_server::cache::CacheConfig;
use reach_server::domain::Category;
use reach_server::ingest::{Dataset, write_covered};
use reach_server::reach::{EngineConfig, ReachabilityEngine, SearchMode};
use reach_server::web::{AppState, create_router};

#[derive(Parser)]
#[command(name = "reach", version, about = "X-minute accessibility over a weighted network")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the covered set for a threshold
    Run {
        /// Travel cost threshold, same unit as edge weights
        threshold: f64,

        /// Number of timed iterations
        #[arg(default_value_t = 1)]
        repeat: usize,

        #[command(flatten)]
        data: DataArgs,

        /// How virtual sources are attached
        #[arg(long, value_enum, default_value_t = Strategy::Overlay)]
        strategy: Strategy,

        /// Write covered node ids to this CSV file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Serve coverage queries over HTTP
    Serve {
        #[command(flatten)]
        data: DataArgs,

        /// Address to listen on
        #[arg(long, env = "REACH_ADDR", default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
}

#[derive(Args)]
struct DataArgs {
    /// Node table (id,label)
    #[arg(long, env = "REACH_NODES", default_value = "nodes.csv")]
    nodes: PathBuf,

    /// Edge table (source,target,weight)
    #[arg(long, env = "REACH_EDGES", default_value = "edges.csv")]
    edges: PathBuf,

    /// Restrict to these categories (repeatable; defaults to all)
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Frontier discipline
    #[arg(long, value_enum, default_value_t = SearchMode::Settled)]
    mode: SearchMode,

    /// Search categories on the rayon pool
    #[arg(long)]
    parallel: bool,
}

impl DataArgs {
    fn load(&self) -> Result<Dataset, Box<dyn std::error::Error>> {
        let mut data = Dataset::load(&self.nodes, &self.edges)?;
        info!(
            nodes = data.graph.node_count(),
            edges = data.graph.edge_count(),
            raw_edges = data.graph.raw_edge_count(),
            categories = data.index.len(),
            "dataset loaded"
        );

        if !self.categories.is_empty() {
            let wanted = self
                .categories
                .iter()
                .map(|c| Category::parse(c))
                .collect::<Result<Vec<_>, _>>()?;
            data.index = data.index.select(&wanted);
        }
        Ok(data)
    }

    fn engine_config(&self) -> EngineConfig {
        EngineConfig::new(self.mode, self.parallel)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Run {
            threshold,
            repeat,
            data,
            strategy,
            output,
        } => {
            let engine = ReachabilityEngine::new(data.engine_config());
            let mut dataset = data.load()?;
            let report = run_bench(
                &engine,
                &mut dataset,
                threshold,
                &BenchConfig::new(repeat, strategy),
            )?;
            println!("{report}");

            if let Some(path) = output {
                write_covered(&path, &report.last.covered)?;
                info!(path = %path.display(), "covered nodes written");
            }
        }
        Command::Serve { data, addr } => {
            let engine_config = data.engine_config();
            let dataset = data.load()?;
            let state = AppState::new(dataset, engine_config, &CacheConfig::default());
            let app = create_router(state);

            info!(%addr, "reach server listening");
            info!("  GET  /health                      - Health check");
            info!("  GET  /categories                  - Categories and member counts");
            info!("  POST /coverage                    - Covered set for a threshold");
            info!("  GET  /nodes/:id/reach?threshold=  - Per-category reach of one node");

            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }
    Ok(())
}
