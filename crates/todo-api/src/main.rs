//! Todo list server binary.
//!
//! Start the server with:
//! ```bash
//! TODO_PORT=8765 cargo run -p todo-api --bin todo-server
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use todo_api::{serve, ApiConfig, AppState};
use todo_list::TodoList;
use todo_persistence::{ItemStore, JsonItemStore, MemoryItemStore};

/// Ordered to-do list HTTP server
#[derive(Parser, Debug)]
#[command(name = "todo-server")]
#[command(about = "Serve an ordered to-do list over HTTP")]
struct Args {
    /// Host to bind (overrides TODO_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides TODO_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Document store directory (overrides TODO_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep items in memory only
    #[arg(long)]
    in_memory: bool,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "todo_api=info,todo_list=info,todo_persistence=warn",
            1 => "todo_api=debug,todo_list=debug,todo_persistence=info,tower_http=info",
            2 => "todo_api=trace,todo_list=trace,todo_persistence=trace,tower_http=debug",
            _ => "trace",
        }
    }

    fn apply(self, mut config: ApiConfig) -> ApiConfig {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(dir) = self.data_dir {
            config = config.with_data_dir(dir);
        }
        let in_memory = config.in_memory || self.in_memory;
        config.with_in_memory(in_memory)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::from_filename(".env.local").or_else(|_| dotenvy::dotenv());

    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter()));
    fmt().with_env_filter(filter).with_target(false).init();

    let config = args.apply(ApiConfig::from_env());

    let store: Arc<dyn ItemStore> = if config.in_memory {
        info!("using in-memory store");
        Arc::new(MemoryItemStore::new())
    } else {
        info!(path = %config.data_dir.display(), "opening document store");
        Arc::new(JsonItemStore::open(&config.data_dir)?)
    };

    let state = AppState::new(config.clone(), TodoList::new(store));
    serve(config, state).await?;

    Ok(())
}
