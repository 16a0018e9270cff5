//! Web server command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use pm_store::{MemoryStore, RedisStore};
use pm_web::{ServerConfig, SharedStore};

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "5000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Redis connection URL
    #[arg(long, env = "REDIS_URL", default_value = "redis://127.0.0.1:6379")]
    pub redis_url: String,

    /// Keep records in process memory instead of Redis (lost on exit)
    #[arg(long)]
    pub memory: bool,

    /// Serve the GraphiQL IDE on GET /graphql
    #[arg(long, env = "GRAPHIQL")]
    pub graphiql: bool,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (defaults to ./pm-serve.log)
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs) -> Result<()> {
    let (store, backend): (SharedStore, String) = if args.memory {
        tracing::warn!("Using in-memory store; records are lost on exit");
        (Arc::new(MemoryStore::new()), "memory".to_string())
    } else {
        let store = RedisStore::connect(&args.redis_url)
            .await
            .with_context(|| format!("Failed to connect to Redis at {}", args.redis_url))?;
        (Arc::new(store), args.redis_url.clone())
    };

    println!();
    println!("  {} {}", "PM".cyan().bold(), "GraphQL Server".bold());
    println!();
    println!("  {}  http://{}:{}/graphql", "GraphQL".green(), args.host, args.port);
    if args.graphiql {
        println!("  {} http://{}:{}/graphql", "GraphiQL".green(), args.host, args.port);
    }
    println!("  {}    {}", "Store".green(), backend);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        graphiql: args.graphiql,
    };
    pm_web::run_server(store, config).await?;

    Ok(())
}
