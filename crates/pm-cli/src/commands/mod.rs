//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod schema;
pub mod serve;

/// PM - GraphQL API for clients and their projects
#[derive(Parser)]
#[command(name = "pm")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the GraphQL server
    Serve(serve::ServeArgs),

    /// Print the GraphQL schema (SDL)
    Schema,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::execute(args).await,
            Commands::Schema => schema::execute(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_defaults() {
        let cli = Cli::try_parse_from(["pm", "serve"]).unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        // PORT/HOST/REDIS_URL may be set in the environment running the tests.
        if std::env::var_os("PORT").is_none() {
            assert_eq!(args.port, 5000);
        }
        if std::env::var_os("HOST").is_none() {
            assert_eq!(args.host, "0.0.0.0");
        }
        assert!(!args.memory);
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from([
            "pm", "serve", "--port", "8080", "--host", "127.0.0.1", "--memory", "--graphiql",
        ])
        .unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.port, 8080);
        assert_eq!(args.host, "127.0.0.1");
        assert!(args.memory);
        assert!(args.graphiql);
    }
}
