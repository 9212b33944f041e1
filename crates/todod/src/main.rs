//! todod — the todo service daemon.
//!
//! Single binary that assembles the request pipeline: the embedded store,
//! one shared service instance, and the two front ends (REST + gRPC)
//! running as concurrent listeners in the same process.
//!
//! # Usage
//!
//! ```text
//! todod serve --http-port 8080 --grpc-port 50051 --data-dir ./data
//! ```
//!
//! Each flag falls back to its environment variable (`HTTP_PORT`,
//! `GRPC_PORT`, `DATA_DIR`), then to the built-in default.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use todo_core::Config;
use todo_service::{Service, TodoService};
use todo_store::TodoStore;

#[derive(Parser)]
#[command(name = "todod", about = "Todo service daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run both API servers (REST + gRPC) in one process.
    Serve {
        /// REST listen port (overrides HTTP_PORT).
        #[arg(long)]
        http_port: Option<u16>,

        /// gRPC listen port (overrides GRPC_PORT).
        #[arg(long)]
        grpc_port: Option<u16>,

        /// Data directory for persistent state (overrides DATA_DIR).
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,todod=debug,todo_store=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            http_port,
            grpc_port,
            data_dir,
        } => {
            // Environment first, flags override.
            let mut config = Config::from_env();
            if let Some(port) = http_port {
                config.http_port = port;
            }
            if let Some(port) = grpc_port {
                config.grpc_port = port;
            }
            if let Some(dir) = data_dir {
                config.data_dir = dir;
            }
            serve(config).await
        }
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    info!("todo daemon starting");

    // Ensure data directory exists.
    std::fs::create_dir_all(&config.data_dir)?;
    let db_path = config.data_dir.join("todo.redb");

    // One store and one service instance, shared by both front ends.
    let store = TodoStore::open(&db_path)?;
    info!(path = ?db_path, "todo store opened");

    let service: Arc<dyn TodoService> = Arc::new(Service::new(Arc::new(store)));

    // ── gRPC server ────────────────────────────────────────────
    let grpc = todo_grpc::TodoGrpcServer::new(Arc::clone(&service));
    let reflection = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(todo_grpc::proto::FILE_DESCRIPTOR_SET)
        .build_v1()?;

    let grpc_addr = SocketAddr::from(([0, 0, 0, 0], config.grpc_port));
    info!(%grpc_addr, "gRPC server starting");

    let grpc_handle = tokio::spawn(async move {
        if let Err(e) = tonic::transport::Server::builder()
            .add_service(grpc.into_service())
            .add_service(reflection)
            .serve(grpc_addr)
            .await
        {
            tracing::error!(error = %e, "gRPC server error");
        }
    });

    // ── REST server ────────────────────────────────────────────
    let router = todo_rest::build_router(service);
    let http_addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));

    info!(%http_addr, "REST API server starting");
    for route in [
        "GET /",
        "GET /todo",
        "POST /todo",
        "GET /todo/{id}",
        "PUT /todo/{id}",
        "DELETE /todo/{id}",
    ] {
        info!(route, "route registered");
    }

    let listener = tokio::net::TcpListener::bind(http_addr).await?;

    // Graceful shutdown on Ctrl-C.
    let server = axum::serve(listener, router).with_graceful_shutdown(async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
        info!("shutdown signal received");
    });

    server.await?;

    // No in-flight draining on the gRPC side; it stops with the process.
    grpc_handle.abort();

    info!("todo daemon stopped");
    Ok(())
}
