use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use vitalis::config::Config;
use vitalis::error::AppResult;
use vitalis::server;

/// vitalis - liveness API server
#[derive(Parser, Debug)]
#[command(name = "vitalis")]
#[command(version)]
#[command(about = "Liveness API server with a configurable CORS policy", long_about = None)]
struct Cli {
    /// Read settings from this env file instead of ./.env
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the web server
    Server {
        /// Host to bind to (overrides SERVER_HOST env var)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides SERVER_PORT env var)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate the configuration and print it
    CheckConfig,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    init_tracing(cli.json_logs);

    // Load configuration
    let mut config = Config::load(cli.env_file.as_deref())?;

    match cli.command {
        Commands::Server { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            server::run_server(config).await
        }
        Commands::CheckConfig => {
            let _ = vitalis::cors::build_cors_layer(&config.cors)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
